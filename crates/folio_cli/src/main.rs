//! Folio CLI
//!
//! Drive the portfolio page headlessly: scroll it, click the navigation,
//! step the carousel, and deliver a contact message.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::ElementId;
use folio_site::{
    ContactFormController, Direction, EmailJsTransport, Field, Page, ParticleConfig, SectionId,
    SiteConfig, SubmitRejected,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const FRAME: Duration = Duration::from_millis(16);
/// Upper bound on frames simulated while waiting for the page to settle
const MAX_FRAMES: usize = 10_000;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless driver for the Folio portfolio page", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Site configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount the page, scroll through offsets, and print the page state
    Preview {
        /// Scroll offsets to visit, in order
        #[arg(long = "at", value_delimiter = ',', default_value = "0")]
        offsets: Vec<f32>,

        /// Milliseconds of animation time to run after each scroll
        #[arg(long, default_value = "0")]
        settle_ms: u64,

        /// Also print the inline style of every styled element in this section
        #[arg(long)]
        styles: Option<String>,
    },

    /// Click a navigation link and run the smooth scroll to completion
    Nav {
        /// Section anchor (home, about, services, projects, contact)
        section: String,
    },

    /// Step the project carousel
    Carousel {
        /// Number of steps
        #[arg(default_value = "1")]
        steps: usize,

        /// Step backward instead of forward
        #[arg(short, long)]
        backward: bool,
    },

    /// Print the hero particle backdrop configuration as JSON
    Particles,

    /// Print the effective site configuration as TOML
    Config,

    /// Validate and deliver a contact message through EmailJS
    Send {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(cli.verbose))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview {
            offsets,
            settle_ms,
            styles,
        } => cmd_preview(config, &offsets, Duration::from_millis(settle_ms), styles.as_deref()),

        Commands::Nav { section } => cmd_nav(config, &section),

        Commands::Carousel { steps, backward } => cmd_carousel(config, steps, backward),

        Commands::Particles => cmd_particles(),

        Commands::Config => cmd_config(&config),

        Commands::Send {
            name,
            email,
            message,
        } => cmd_send(config, name, email, message),
    }
}

/// `RUST_LOG` when set, otherwise `debug` or `info`
fn log_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn load_config(path: Option<&std::path::Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

fn parse_section(anchor: &str) -> Result<SectionId> {
    SectionId::from_anchor(anchor).with_context(|| {
        format!(
            "unknown section '{}'. Valid sections: {:?}",
            anchor,
            SectionId::ALL.map(|s| s.anchor())
        )
    })
}

fn mounted_page(config: SiteConfig) -> Result<Page> {
    let mut page = Page::new(config)?;
    page.mount()?;
    Ok(page)
}

/// Run `duration` of page time in frame-sized steps
fn run_for(page: &mut Page, duration: Duration) {
    let mut remaining = duration;
    while !remaining.is_zero() {
        let dt = remaining.min(FRAME);
        page.tick(dt);
        remaining -= dt;
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn element_label(page: &Page, id: ElementId) -> String {
    match page.tree().get(id) {
        Some(el) => match (&el.id, el.classes.first()) {
            (Some(id), _) => format!("#{id}"),
            (None, Some(class)) => format!(".{class}"),
            (None, None) => format!("{id:?}"),
        },
        None => format!("{id:?}"),
    }
}

fn cmd_preview(
    config: SiteConfig,
    offsets: &[f32],
    settle: Duration,
    styles: Option<&str>,
) -> Result<()> {
    let styles = styles.map(parse_section).transpose()?;
    let mut page = mounted_page(config)?;
    info!(
        "Page mounted: {} elements, {} animations",
        page.tree().len(),
        page.scheduler().registration_count()
    );

    for &offset in offsets {
        page.scroll_to(offset);
        run_for(&mut page, settle);
        print_json(&page.snapshot())?;

        if let Some(section) = styles {
            let root = page.section_root(section).context("section is not composed")?;
            for id in page.tree().descendants(root) {
                let Some(style) = page.tree().style(id) else {
                    continue;
                };
                if !style.is_empty() {
                    println!("  {:<24} {}", element_label(&page, id), style);
                }
            }
        }
    }
    Ok(())
}

fn cmd_nav(config: SiteConfig, section: &str) -> Result<()> {
    let section = parse_section(section)?;
    let mut page = mounted_page(config)?;

    let request = page
        .click_nav(section)
        .with_context(|| format!("section '{section}' has no layout"))?;
    info!("Scrolling to {} (target {:.0}px)", section, request.target);

    let mut frames = 0;
    while page.is_scrolling() && frames < MAX_FRAMES {
        page.tick(FRAME);
        frames += 1;
    }
    if page.is_scrolling() {
        warn!("Smooth scroll did not settle after {} frames", frames);
    } else {
        info!("Settled after {} frames", frames);
    }

    print_json(&page.snapshot())
}

fn cmd_carousel(config: SiteConfig, steps: usize, backward: bool) -> Result<()> {
    let transition = config.carousel.transition();
    let direction = if backward {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let mut page = mounted_page(config)?;

    for _ in 0..steps {
        if !page.navigate_carousel(direction) {
            warn!("Carousel ignored navigation");
        }
        run_for(&mut page, transition);
        if let Some(carousel) = page.carousel() {
            print_json(&carousel.state())?;
        }
    }
    Ok(())
}

fn cmd_particles() -> Result<()> {
    println!("{}", ParticleConfig::default().to_json()?);
    Ok(())
}

fn cmd_config(config: &SiteConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn cmd_send(config: SiteConfig, name: String, email: String, message: String) -> Result<()> {
    let mut form = ContactFormController::from_config(&config.contact);
    form.set_field(Field::Name, name);
    form.set_field(Field::Email, email);
    form.set_field(Field::Message, message);

    let transport = EmailJsTransport::new(config.email);
    let runtime = tokio::runtime::Runtime::new()?;

    match runtime.block_on(form.submit(&transport)) {
        Ok(()) => {}
        Err(SubmitRejected::Invalid(errors)) => {
            for (field, error) in errors.iter() {
                warn!("{}: {}", field, error.message_for(field));
            }
            anyhow::bail!("contact form is invalid");
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(err) = form.delivery_error() {
        anyhow::bail!("delivery failed: {}", err);
    }
    info!("Message sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_prefers_rust_log() {
        std::env::set_var("RUST_LOG", "folio_site=trace");
        assert_eq!(log_filter(false).to_string(), "folio_site=trace");

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter(true).to_string(), "debug");
        assert_eq!(log_filter(false).to_string(), "info");
    }

    #[test]
    fn test_parse_section_accepts_anchors() {
        assert_eq!(parse_section("#about").unwrap(), SectionId::About);
        assert!(parse_section("blog").is_err());
    }
}
