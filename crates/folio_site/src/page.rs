//! Page composition
//!
//! [`Page`] lays out the navigation bar and the five sections as an element
//! tree, owns the animation scheduler, and routes scroll, time, and click
//! events to the section controllers. It is the headless equivalent of the
//! browser page: callers feed it events and read back element styles and
//! controller state.

use std::time::Duration;

use folio_animation::{AnimationScheduler, AnimationScope, SchedulerHandle};
use folio_core::{ElementBuilder, ElementId, ElementTree, Rect, Selector, Viewport, VisualProps};
use indexmap::IndexMap;
use serde::Serialize;

use crate::carousel::{CarouselController, CarouselState, Direction};
use crate::choreography;
use crate::config::SiteConfig;
use crate::contact::{
    ContactFormController, DeliveryError, EmailTransport, Submission, SubmissionTicket,
    SubmitRejected,
};
use crate::content::{NAV_LINKS, PROJECTS, SERVICES, SKILLS, SOCIAL_LINKS, STATS};
use crate::error::{Result, SiteError};
use crate::navigation::{NavState, NavigationController, ScrollRequest, SmoothScroll};
use crate::particles::{ParticleBackdrop, ParticleConfig};
use crate::section::{SectionAnimationController, SectionId};

const NAV_HEIGHT: f32 = 80.0;
const ABOUT_HEIGHT: f32 = 1800.0;
const SERVICES_HEIGHT: f32 = 1200.0;
const PROJECTS_HEIGHT: f32 = 1400.0;
const CONTACT_HEIGHT: f32 = 1200.0;

/// Serializable summary of the page state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f32,
    pub nav: NavState,
    pub menu_open: bool,
    pub mounted_sections: Vec<SectionId>,
    pub registrations: usize,
    pub animating: bool,
    pub carousel: Option<CarouselState>,
    pub submission: Submission,
    pub success_visible: bool,
}

/// The composed single-page site
pub struct Page {
    config: SiteConfig,
    tree: ElementTree,
    scheduler: AnimationScheduler,
    nav_root: ElementId,
    nav_scope: Option<AnimationScope>,
    sections: IndexMap<SectionId, SectionAnimationController>,
    navigation: NavigationController,
    carousel: Option<CarouselController>,
    contact: ContactFormController,
    /// Success checkmark timeline, present from a delivered message until
    /// Contact unmounts or the next success replays it
    checkmark: Option<AnimationScope>,
    smooth_scroll: Option<SmoothScroll>,
    particles: ParticleConfig,
    backdrop: Option<Box<dyn ParticleBackdrop>>,
}

impl Page {
    /// Compose the page; nothing is mounted yet
    pub fn new(config: SiteConfig) -> Result<Self> {
        let viewport = config.viewport.to_viewport();
        let mut tree = ElementTree::new();
        let layout = compose(&mut tree, &viewport)?;

        let section_rects = layout
            .sections
            .iter()
            .filter_map(|(id, root)| tree.rect(*root).map(|rect| (*id, rect)))
            .collect();
        let navigation = NavigationController::new(config.navigation, section_rects);

        let sections = layout
            .sections
            .iter()
            .map(|(id, root)| (*id, SectionAnimationController::new(*id, *root)))
            .collect();

        let mut contact = ContactFormController::from_config(&config.contact);
        contact.unmount();

        tracing::debug!(elements = tree.len(), "page composed");
        Ok(Self {
            scheduler: AnimationScheduler::new(viewport),
            nav_root: layout.nav_root,
            nav_scope: None,
            sections,
            navigation,
            carousel: None,
            contact,
            checkmark: None,
            smooth_scroll: None,
            particles: ParticleConfig::default(),
            backdrop: None,
            tree,
            config,
        })
    }

    /// Attach the renderer that draws the hero's particle field
    pub fn with_backdrop(mut self, backdrop: impl ParticleBackdrop + 'static) -> Self {
        self.backdrop = Some(Box::new(backdrop));
        self
    }

    pub fn with_particles(mut self, particles: ParticleConfig) -> Self {
        self.particles = particles;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn handle(&self) -> SchedulerHandle {
        self.scheduler.handle()
    }

    pub fn viewport(&self) -> Viewport {
        self.scheduler.viewport()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn contact(&self) -> &ContactFormController {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactFormController {
        &mut self.contact
    }

    pub fn particles(&self) -> &ParticleConfig {
        &self.particles
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionAnimationController> {
        self.sections.get(&id)
    }

    pub fn section_root(&self, id: SectionId) -> Option<ElementId> {
        self.sections.get(&id).map(|s| s.root())
    }

    /// Height of the whole document
    pub fn document_height(&self) -> f32 {
        self.sections
            .values()
            .filter_map(|s| self.tree.rect(s.root()))
            .map(|rect| rect.bottom())
            .fold(0.0, f32::max)
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport().height).max(0.0)
    }

    /// Mount the navigation bar and every section in document order
    pub fn mount(&mut self) -> Result<()> {
        if self.nav_scope.is_none() {
            let scope = AnimationScope::build(
                &self.scheduler.handle(),
                &mut self.tree,
                self.nav_root,
                &choreography::navbar(),
            )?;
            self.nav_scope = Some(scope);
        }
        for id in SectionId::ALL {
            self.mount_section(id)?;
        }
        tracing::info!(registrations = self.scheduler.registration_count(), "page mounted");
        Ok(())
    }

    /// Mount (or remount) one section
    pub fn mount_section(&mut self, id: SectionId) -> Result<()> {
        if id == SectionId::Projects {
            if let Some(previous) = self.carousel.take() {
                previous.release(&mut self.tree);
            }
        }
        let handle = self.scheduler.handle();
        let controller = self.sections.get_mut(&id).ok_or(SiteError::MissingSection(id))?;
        controller.mount(&handle, &mut self.tree)?;
        let root = controller.root();

        match id {
            SectionId::Home => {
                if let Some(backdrop) = self.backdrop.as_mut() {
                    backdrop.mount(&self.particles);
                }
            }
            SectionId::Projects => {
                let items = self.tree.query_within(root, &Selector::class("project-card"));
                let accents = self.tree.query_within(root, &Selector::class("bg-accent"));
                self.carousel = Some(CarouselController::new(
                    &mut self.tree,
                    items,
                    accents,
                    self.config.carousel.transition(),
                )?);
            }
            SectionId::Contact => self.contact.mount(),
            SectionId::About | SectionId::Services => {}
        }
        Ok(())
    }

    /// Unmount one section, releasing everything it owns
    pub fn unmount_section(&mut self, id: SectionId) {
        if !self.sections.contains_key(&id) {
            return;
        }

        // Tear down in reverse mount order: controllers first, then the scope
        match id {
            SectionId::Home => {
                if let Some(backdrop) = self.backdrop.as_mut() {
                    backdrop.unmount();
                }
            }
            SectionId::Projects => {
                if let Some(carousel) = self.carousel.take() {
                    carousel.release(&mut self.tree);
                }
            }
            SectionId::Contact => {
                self.contact.unmount();
                if let Some(scope) = self.checkmark.take() {
                    scope.dispose(&mut self.tree);
                }
            }
            SectionId::About | SectionId::Services => {}
        }

        if let Some(controller) = self.sections.get_mut(&id) {
            controller.unmount(&mut self.tree);
        }
    }

    /// Unmount everything
    pub fn unmount(&mut self) {
        for id in SectionId::ALL {
            self.unmount_section(id);
        }
        if let Some(scope) = self.nav_scope.take() {
            scope.dispose(&mut self.tree);
        }
        self.smooth_scroll = None;
        tracing::info!("page unmounted");
    }

    /// A user scroll: jumps to `scroll_y` and cancels any smooth scroll
    pub fn scroll_to(&mut self, scroll_y: f32) -> NavState {
        self.smooth_scroll = None;
        self.apply_scroll(scroll_y)
    }

    fn apply_scroll(&mut self, scroll_y: f32) -> NavState {
        let scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        let viewport = self.viewport().scrolled_to(scroll_y);
        self.scheduler.on_scroll(&mut self.tree, viewport);
        self.navigation.on_scroll(scroll_y)
    }

    /// Click the navigation link for `section`
    pub fn click_nav(&mut self, section: SectionId) -> Option<ScrollRequest> {
        let viewport = self.viewport();
        let request = self.navigation.navigate_to(section, &viewport)?;
        let target = request.target.min(self.max_scroll());
        self.smooth_scroll = Some(SmoothScroll::new(viewport.scroll_y, target));
        Some(request)
    }

    /// Settle a contact delivery; a success plays the checkmark
    ///
    /// Returns false when the ticket is stale, as
    /// [`ContactFormController::settle`] does.
    pub fn settle_contact(
        &mut self,
        ticket: SubmissionTicket,
        outcome: std::result::Result<(), DeliveryError>,
    ) -> bool {
        if !self.contact.settle(ticket, outcome) {
            return false;
        }
        if self.contact.submission() == Submission::Succeeded {
            if let Err(err) = self.play_checkmark() {
                tracing::warn!(%err, "success checkmark not played");
            }
        }
        true
    }

    /// Validate, deliver through `transport`, and settle
    pub async fn submit_contact<T>(
        &mut self,
        transport: &T,
    ) -> std::result::Result<(), SubmitRejected>
    where
        T: EmailTransport + ?Sized,
    {
        let pending = self.contact.begin_submit()?;
        let outcome = transport.send(&pending.request).await;
        self.settle_contact(pending.ticket, outcome);
        Ok(())
    }

    fn play_checkmark(&mut self) -> Result<()> {
        let root = self
            .section_root(SectionId::Contact)
            .ok_or(SiteError::MissingSection(SectionId::Contact))?;
        if let Some(previous) = self.checkmark.take() {
            previous.dispose(&mut self.tree);
        }
        let scope = AnimationScope::build(
            &self.scheduler.handle(),
            &mut self.tree,
            root,
            &choreography::success_checkmark(),
        )?;
        self.checkmark = Some(scope);
        Ok(())
    }

    /// Step the carousel (Projects must be mounted)
    pub fn navigate_carousel(&mut self, direction: Direction) -> bool {
        match self.carousel.as_mut() {
            Some(carousel) => carousel.navigate(&mut self.tree, direction),
            None => false,
        }
    }

    /// Advance time by `dt`
    ///
    /// Returns true while anything (smooth scroll, tweens, carousel) still
    /// needs frames.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut active = false;

        if let Some(scroll) = self.smooth_scroll.as_mut() {
            let position = scroll.step(dt);
            let settled = scroll.is_settled();
            self.apply_scroll(position);
            if settled {
                self.smooth_scroll = None;
            } else {
                active = true;
            }
        }

        active |= self.scheduler.tick(&mut self.tree, dt);
        if let Some(carousel) = self.carousel.as_mut() {
            active |= carousel.tick(&mut self.tree, dt);
        }
        self.contact.advance(dt);
        active || self.contact.success_visible()
    }

    /// Whether a smooth scroll is in progress
    pub fn is_scrolling(&self) -> bool {
        self.smooth_scroll.is_some()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            scroll_y: self.viewport().scroll_y,
            nav: self.navigation.state(),
            menu_open: self.navigation.is_menu_open(),
            mounted_sections: self
                .sections
                .values()
                .filter(|s| s.is_mounted())
                .map(|s| s.section())
                .collect(),
            registrations: self.scheduler.registration_count(),
            animating: self.scheduler.has_active_animations() || self.smooth_scroll.is_some(),
            carousel: self.carousel.as_ref().map(|c| c.state()),
            submission: self.contact.submission(),
            success_visible: self.contact.success_visible(),
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("elements", &self.tree.len())
            .field("scheduler", &self.scheduler)
            .field("sections", &self.sections.len())
            .field("has_backdrop", &self.backdrop.is_some())
            .finish()
    }
}

struct Layout {
    nav_root: ElementId,
    sections: IndexMap<SectionId, ElementId>,
}

/// Stacks children inside one section at offsets from its top
struct SectionBuilder<'a> {
    tree: &'a mut ElementTree,
    section: SectionId,
    root: ElementId,
    top: f32,
    width: f32,
}

impl SectionBuilder<'_> {
    fn child(
        &mut self,
        parent: Option<ElementId>,
        builder: ElementBuilder,
        offset: f32,
        height: f32,
    ) -> Result<ElementId> {
        let rect = Rect::new(0.0, self.top + offset, self.width, height);
        self.tree
            .insert(Some(parent.unwrap_or(self.root)), builder.rect(rect))
            .ok_or(SiteError::MissingSection(self.section))
    }

    fn class(&mut self, class: &str, offset: f32, height: f32) -> Result<ElementId> {
        self.child(None, ElementBuilder::new().class(class), offset, height)
    }
}

fn compose(tree: &mut ElementTree, viewport: &Viewport) -> Result<Layout> {
    let width = viewport.width;

    let nav_root = tree
        .insert(
            None,
            ElementBuilder::new()
                .id("navbar")
                .class("navbar")
                .rect(Rect::new(0.0, 0.0, width, NAV_HEIGHT)),
        )
        .ok_or(SiteError::MissingSection(SectionId::Home))?;
    for link in NAV_LINKS {
        tree.insert(
            Some(nav_root),
            ElementBuilder::new()
                .id(format!("nav-{}", link.section))
                .class("nav-link")
                .rect(Rect::new(0.0, 0.0, 120.0, NAV_HEIGHT)),
        );
    }

    let heights = [
        (SectionId::Home, viewport.height),
        (SectionId::About, ABOUT_HEIGHT),
        (SectionId::Services, SERVICES_HEIGHT),
        (SectionId::Projects, PROJECTS_HEIGHT),
        (SectionId::Contact, CONTACT_HEIGHT),
    ];

    let mut sections = IndexMap::new();
    let mut top = 0.0;
    for (section, height) in heights {
        let mut root_builder = ElementBuilder::new()
            .id(section.anchor())
            .class("section")
            .rect(Rect::new(0.0, top, width, height));
        if section == SectionId::Contact {
            root_builder = root_builder.class("contact-section");
        }
        let root = tree
            .insert(None, root_builder)
            .ok_or(SiteError::MissingSection(section))?;

        let mut builder = SectionBuilder {
            tree: &mut *tree,
            section,
            root,
            top,
            width,
        };
        match section {
            SectionId::Home => compose_home(&mut builder, height)?,
            SectionId::About => compose_about(&mut builder, height)?,
            SectionId::Services => compose_services(&mut builder, height)?,
            SectionId::Projects => compose_projects(&mut builder, height)?,
            SectionId::Contact => compose_contact(&mut builder, height)?,
        }

        sections.insert(section, root);
        top += height;
    }

    Ok(Layout { nav_root, sections })
}

fn compose_home(b: &mut SectionBuilder<'_>, height: f32) -> Result<()> {
    b.class("hero-heading", 240.0, 72.0)?;
    b.class("hero-subheading", 330.0, 80.0)?;
    b.class("role-text", 430.0, 28.0)?;
    b.class("cta-button", 520.0, 56.0)?;
    let avatar = b.class("avatar-container", 200.0, 400.0)?;
    b.child(Some(avatar), ElementBuilder::new().class("avatar-glow"), 200.0, 400.0)?;
    b.class("scroll-arrow", height - 80.0, 32.0)?;
    Ok(())
}

fn compose_about(b: &mut SectionBuilder<'_>, height: f32) -> Result<()> {
    b.class("parallax-bg", 0.0, height)?;
    b.class("about-title", 80.0, 120.0)?;
    b.class("about-content", 240.0, 120.0)?;
    for (i, _) in SKILLS.iter().enumerate() {
        let card = ElementBuilder::new().id(format!("skill-{i}")).class("skill-card");
        b.child(None, card, 420.0 + i as f32 * 240.0, 200.0)?;
    }
    for (i, _) in STATS.iter().enumerate() {
        let stat = ElementBuilder::new().id(format!("stat-{i}")).class("stat");
        b.child(None, stat, 1480.0, 120.0)?;
    }
    Ok(())
}

fn compose_services(b: &mut SectionBuilder<'_>, height: f32) -> Result<()> {
    b.class("services-parallax-bg", 0.0, height)?;
    b.class("services-heading", 80.0, 100.0)?;
    let grid = b.class("services-grid", 260.0, 840.0)?;
    for (i, _) in SERVICES.iter().enumerate() {
        let card = ElementBuilder::new().id(format!("service-{i}")).class("service-card");
        b.child(Some(grid), card, 260.0 + i as f32 * 200.0, 180.0)?;
    }
    Ok(())
}

fn compose_projects(b: &mut SectionBuilder<'_>, height: f32) -> Result<()> {
    b.class("parallax-bg", 0.0, height)?;
    b.class("projects-title", 80.0, 160.0)?;
    let container = b.class("projects-container", 320.0, 700.0)?;
    // Cards are stacked on top of each other; the carousel shows one at a time
    for (i, _) in PROJECTS.iter().enumerate() {
        let card = ElementBuilder::new().id(format!("project-{i}")).class("project-card");
        let card = b.child(Some(container), card, 320.0, 700.0)?;
        for _ in 0..2 {
            b.child(Some(card), ElementBuilder::new().class("bg-accent"), 320.0, 384.0)?;
        }
    }
    Ok(())
}

fn compose_contact(b: &mut SectionBuilder<'_>, height: f32) -> Result<()> {
    b.class("contact-parallax-bg", 0.0, height)?;
    let form = b.class("contact-form", 200.0, 600.0)?;
    let checkmark = ElementBuilder::new()
        .class("success-checkmark")
        .style(VisualProps::new().scale(0.0).opacity(0.0));
    b.child(Some(form), checkmark, 468.0, 64.0)?;
    for link in SOCIAL_LINKS {
        let social = ElementBuilder::new()
            .id(format!("social-{}", link.name.to_lowercase()))
            .class("social-link");
        b.child(None, social, 880.0, 48.0)?;
    }
    Ok(())
}
