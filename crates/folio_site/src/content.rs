//! Static page content
//!
//! Read-only tables consumed when the page tree is composed. Nothing in the
//! animation or controller logic branches on their contents, only on their
//! lengths.

use serde::Serialize;

use crate::section::SectionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: &'static str,
    pub section: SectionId,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { title: "Home", section: SectionId::Home },
    NavLink { title: "About", section: SectionId::About },
    NavLink { title: "Services", section: SectionId::Services },
    NavLink { title: "Projects", section: SectionId::Projects },
    NavLink { title: "Contact", section: SectionId::Contact },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeroContent {
    pub heading: &'static str,
    pub subheading: &'static str,
    pub highlight: &'static str,
    pub roles: &'static str,
    pub call_to_action: &'static str,
}

pub const HERO: HeroContent = HeroContent {
    heading: "Hi, I'm Prakash Patel",
    subheading: "Turning Ideas Into",
    highlight: "Digital Reality",
    roles: "Full Stack Developer | UI/UX Designer | Tech Enthusiast",
    call_to_action: "Explore My Work",
};

/// A skill category card in the About section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    /// Gradient endpoints
    pub colors: (&'static str, &'static str),
}

pub const SKILLS: &[SkillCategory] = &[
    SkillCategory {
        name: "Frontend Development",
        icon: "💻",
        description: "Building beautiful user interfaces",
        skills: &["React", "JavaScript", "Tailwind CSS", "HTML", "CSS"],
        colors: ("#FF3CAC", "#784BA0"),
    },
    SkillCategory {
        name: "Backend Development",
        icon: "⚡",
        description: "Creating robust server solutions",
        skills: &["Node.js", "MongoDB", "ExpressJs"],
        colors: ("#4158D0", "#C850C0"),
    },
    SkillCategory {
        name: "UI/UX Design",
        icon: "🎨",
        description: "Designing modern interfaces",
        skills: &["Figma", "Tailwind", "GSAP", "Framer"],
        colors: ("#0093E9", "#80D0C7"),
    },
    SkillCategory {
        name: "Development Tools",
        icon: "🛠",
        description: "Using modern dev tools",
        skills: &["Git", "VS Code", "Postman"],
        colors: ("#00f5a0", "#00d9f5"),
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat { value: "6+", label: "Months Experience" },
    Stat { value: "15+", label: "Projects Completed" },
    Stat { value: "10+", label: "Technologies" },
    Stat { value: "5+", label: "Happy Clients" },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Service {
    pub title: &'static str,
    pub description: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        title: "Frontend Development",
        description: "Building responsive and performant web applications using modern \
            frameworks and best practices.",
    },
    Service {
        title: "Creative UI/UX",
        description: "Crafting intuitive and visually appealing user interfaces with attention \
            to detail and user experience.",
    },
    Service {
        title: "Responsive Websites",
        description: "Developing mobile-first websites that look and work perfectly across all \
            devices and screen sizes.",
    },
    Service {
        title: "Animation Integration",
        description: "Implementing smooth and engaging animations to enhance user interaction \
            and website aesthetics.",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub image: &'static str,
    pub live_link: &'static str,
    pub github_link: &'static str,
    /// Accent color
    pub color: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Apple Vision Pro Clone",
        description: "A stunning 3D UI clone of Apple Vision Pro website with smooth animations \
            and interactions.",
        tech: &["React", "Three.js", "GSAP", "Tailwind"],
        image: "/vision-pro.jpg",
        live_link: "#",
        github_link: "#",
        color: "#FF3CAC",
    },
    Project {
        title: "iPhone 15 3D Model",
        description: "Interactive 3D iPhone model showcase with React Three Fiber and realistic \
            lighting.",
        tech: &["React", "Three Fiber", "Drei", "GSAP"],
        image: "/iphone-15.jpg",
        live_link: "#",
        github_link: "#",
        color: "#4158D0",
    },
    Project {
        title: "E-Commerce Store",
        description: "Full-featured clothing store with shopping cart, checkout, and payment \
            integration.",
        tech: &["Next.js", "MongoDB", "Stripe", "Tailwind"],
        image: "/ecommerce.jpg",
        live_link: "#",
        github_link: "#",
        color: "#00f5a0",
    },
    Project {
        title: "Music Player",
        description: "Clean and minimal music player with intuitive controls and smooth \
            animations.",
        tech: &["React", "Howler.js", "GSAP", "Tailwind"],
        image: "/music-player.jpg",
        live_link: "#",
        github_link: "#",
        color: "#FF5733",
    },
    Project {
        title: "Refokus Clone",
        description: "Pixel-perfect clone of Refokus agency website with modern animations.",
        tech: &["Next.js", "Framer Motion", "GSAP", "Tailwind"],
        image: "/refokus.jpg",
        live_link: "#",
        github_link: "#",
        color: "#8B5CF6",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { name: "GitHub", url: "https://github.com/yourusername" },
    SocialLink { name: "LinkedIn", url: "https://linkedin.com/in/yourusername" },
    SocialLink { name: "Instagram", url: "https://instagram.com/yourusername" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_links_cover_every_section_in_order() {
        let sections: Vec<_> = NAV_LINKS.iter().map(|link| link.section).collect();
        assert_eq!(sections, SectionId::ALL);
    }

    #[test]
    fn test_project_colors_are_hex() {
        for project in PROJECTS {
            assert!(project.color.starts_with('#'));
            assert_eq!(project.color.len(), 7);
        }
    }
}
