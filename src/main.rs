//! Voxa CLI - notification center demo

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;

use voxa::error::{FixSuggestion, Result, VoxaError};
use voxa::notification::{load_seed, sample_notifications, Locale, NotificationStore};
use voxa::panel::{NotificationPanel, PanelEntry};
use voxa::presenter::{TerminalPresenter, TracingPresenter};
use voxa::scheduler::{EventScheduler, TriggerState};
use voxa::share::{share_profile, Clipboard, ProfileKind, ProfileLink, ShareOutcome, SharePlatform};
use voxa::{ContentGenerator, Identity, Priority, VoxaConfig};

#[derive(Parser)]
#[command(name = "voxa")]
#[command(about = "Voxa - notification center for political transparency")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the notification inbox
    Inbox {
        /// Mark a notification as read (repeatable)
        #[arg(long = "read", value_name = "ID")]
        read: Vec<String>,

        /// Delete a notification (repeatable)
        #[arg(long = "delete", value_name = "ID")]
        delete: Vec<String>,

        /// Mark every notification as read
        #[arg(long)]
        mark_all: bool,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,

        /// Label language (en, pt-br)
        #[arg(long)]
        locale: Option<Locale>,

        /// JSON array of notifications to use instead of the sample inbox
        #[arg(long, value_name = "PATH")]
        seed_file: Option<PathBuf>,
    },

    /// Run the timed toast demo until every trigger has fired
    Demo {
        /// Signed-in email, enables the welcome toast
        #[arg(long)]
        email: Option<String>,

        /// RNG seed for reproducible content
        #[arg(long)]
        seed: Option<u64>,

        /// Multiplier for trigger offsets (0.1 = ten times faster)
        #[arg(long)]
        time_scale: Option<f64>,

        /// Dump the scheduler event log as JSON at the end
        #[arg(long)]
        trace: bool,

        /// Send toasts to the log (stderr) instead of drawing them
        #[arg(short, long)]
        quiet: bool,
    },

    /// Build and copy a profile share link
    Share {
        /// Profile kind (user, politician)
        kind: ProfileKind,

        /// Profile id
        id: String,

        /// Display name used in the share text
        name: String,

        /// Override the link origin
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inbox {
            read,
            delete,
            mark_all,
            json,
            locale,
            seed_file,
        } => run_inbox(&read, &delete, mark_all, json, locale, seed_file),
        Commands::Demo {
            email,
            seed,
            time_scale,
            trace,
            quiet,
        } => run_demo(email, seed, time_scale, trace, quiet).await,
        Commands::Share {
            kind,
            id,
            name,
            base_url,
        } => run_share(kind, id, name, base_url),
        Commands::Config { action } => run_config(action.unwrap_or(ConfigAction::Show)),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_config() -> Result<VoxaConfig> {
    VoxaConfig::load()?.with_env()
}

// ═══════════════════════════════════════════════════════════════
// inbox
// ═══════════════════════════════════════════════════════════════

fn run_inbox(
    read: &[String],
    delete: &[String],
    mark_all: bool,
    json: bool,
    locale: Option<Locale>,
    seed_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config()?;
    let locale = locale.unwrap_or_else(|| config.locale());
    let now = Utc::now();

    let records = match seed_file {
        Some(path) => load_seed(path)?,
        None => sample_notifications(now),
    };
    let mut panel = NotificationPanel::new(NotificationStore::seed(records));

    for id in read {
        if !panel.mark_read(id) {
            eprintln!("{} no unread notification with id '{}'", "!".yellow(), id);
        }
    }
    for id in delete {
        if !panel.delete(id) {
            eprintln!("{} no notification with id '{}'", "!".yellow(), id);
        }
    }
    if mark_all {
        panel.mark_all_read();
    }

    panel.open();
    let entries = panel.entries(now, locale).unwrap_or_default();

    if json {
        let out = serde_json::to_string_pretty(&entries).map_err(std::io::Error::from)?;
        println!("{}", out);
        return Ok(());
    }

    let heading = match locale {
        Locale::En => "Notifications",
        Locale::PtBr => "Notificações",
    };
    match panel.badge() {
        Some(unread) => println!("{} {}", heading.bold(), format!("({})", unread).cyan()),
        None => println!("{}", heading.bold()),
    }

    if entries.is_empty() {
        let empty = match locale {
            Locale::En => "No notifications",
            Locale::PtBr => "Nenhuma notificação",
        };
        println!("  {}", empty.dimmed());
        return Ok(());
    }

    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &PanelEntry) {
    let marker = if entry.read {
        "○".dimmed()
    } else {
        "●".blue()
    };
    let title = match entry.priority {
        Priority::High => entry.title.red().bold(),
        Priority::Medium => entry.title.yellow().bold(),
        Priority::Low => entry.title.blue().bold(),
    };
    let badge = entry
        .score_badge
        .as_deref()
        .map(|b| format!(" [{}]", b))
        .unwrap_or_default();

    println!(
        "{} {} {}{}  {}",
        marker,
        format!("#{}", entry.id).dimmed(),
        title,
        badge.green(),
        entry.time_label.dimmed()
    );
    println!("    {}", entry.message);
}

// ═══════════════════════════════════════════════════════════════
// demo
// ═══════════════════════════════════════════════════════════════

async fn run_demo(
    email: Option<String>,
    seed: Option<u64>,
    time_scale: Option<f64>,
    trace: bool,
    quiet: bool,
) -> Result<()> {
    let mut config = load_config()?;
    if seed.is_some() {
        config.generator.seed = seed;
    }
    if time_scale.is_some() {
        config.scheduler.time_scale = time_scale;
    }
    if email.is_some() {
        config.identity.email = email;
    }

    let catalog = config.catalog()?;
    let identity = config.email().map(Identity::from_email);

    let mut scheduler = EventScheduler::new(ContentGenerator::new(config.seed()))
        .with_welcome_delay(config.welcome_delay()?);
    let armed = if quiet {
        scheduler.activate(&catalog, identity.as_ref(), TracingPresenter)
    } else {
        scheduler.activate(&catalog, identity.as_ref(), TerminalPresenter)
    };

    println!(
        "{} {} triggers armed (Ctrl+C to stop)\n",
        "→".cyan(),
        armed.to_string().cyan().bold()
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = scheduler.settled() => {}
    }

    let fired = scheduler
        .trigger_states()
        .iter()
        .filter(|(_, state)| *state == TriggerState::Fired)
        .count();
    let cancelled = scheduler.deactivate();
    println!(
        "{} {} fired, {} cancelled",
        "✓".green(),
        fired,
        cancelled
    );

    if trace {
        let out = serde_json::to_string_pretty(&scheduler.event_log().to_json())
            .map_err(std::io::Error::from)?;
        println!("{}", out);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
// share
// ═══════════════════════════════════════════════════════════════

/// Pipes text into the first clipboard tool found on the system
struct SystemClipboard;

const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        for (program, args) in CLIPBOARD_TOOLS {
            let Ok(mut child) = Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            else {
                continue;
            };
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes())?;
            }
            if child.wait()?.success() {
                return Ok(());
            }
        }
        Err(VoxaError::ClipboardFailed {
            reason: "no working clipboard tool found".into(),
        }
        .into())
    }
}

fn run_share(kind: ProfileKind, id: String, name: String, base_url: Option<String>) -> Result<()> {
    let config = load_config()?;
    let base_url = base_url.unwrap_or_else(|| config.base_url().to_string());
    let link = ProfileLink::new(kind, id, name, &base_url)?;

    println!("{} {}", "Link:".bold(), link.url());
    println!("  {}", link.share_text().dimmed());
    println!(
        "  {} {}",
        "Twitter: ".dimmed(),
        link.social_url(SharePlatform::Twitter)
    );
    println!(
        "  {} {}",
        "Facebook:".dimmed(),
        link.social_url(SharePlatform::Facebook)
    );
    println!(
        "  {} {}",
        "WhatsApp:".dimmed(),
        link.social_url(SharePlatform::Whatsapp)
    );
    println!("  {} {}\n", "QR code: ".dimmed(), link.qr_code_url());

    // Terminals have no native share sheet.
    let outcome = share_profile(&link, None, &SystemClipboard, &TerminalPresenter);
    tracing::debug!(?outcome, "share finished");
    if outcome == ShareOutcome::Failed {
        tracing::info!("link printed above, clipboard unavailable");
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
// config
// ═══════════════════════════════════════════════════════════════

fn run_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", VoxaConfig::config_path().display());
        }
        ConfigAction::Show => {
            let config = load_config()?;
            let out = toml::to_string_pretty(&config).map_err(|e| VoxaError::ConfigError {
                reason: format!("Failed to serialize config: {}", e),
            })?;
            println!(
                "{} {}",
                "#".dimmed(),
                VoxaConfig::config_path().display().to_string().dimmed()
            );
            println!("{}", out);
            println!("{} {}", "time_scale =".dimmed(), config.time_scale()?);
            println!(
                "{} {}",
                "triggers   =".dimmed(),
                config.catalog()?.len()
            );
        }
    }
    Ok(())
}
