//! vcad-duet - manage Duet printer instances
//!
//! Adds, edits and removes the printer instances the vcad slicer uploads
//! to, stored in a JSON preference file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use vcad_slicer_duet::{FilePreferences, InstanceProfile, InstanceRegistry};

mod commands;
mod settings;

use commands::{Changes, LoggingDevices};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "vcad-duet")]
#[command(about = "Manage Duet printer instances for the vcad slicer", long_about = None)]
struct Cli {
    /// Preference file holding the instances
    #[arg(long, env = "VCAD_DUET_PREFS", global = true)]
    prefs: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List instance names
    List,
    /// Show one instance (passwords masked)
    Show {
        /// Instance name
        name: String,
    },
    /// Register a new instance
    Add {
        /// Instance name
        name: String,
        /// Base URL, e.g. http://192.168.1.20
        url: String,
        /// RepRapFirmware password
        #[arg(long, default_value = "")]
        duet_password: String,
        /// HTTP basic-auth user
        #[arg(long, default_value = "")]
        http_user: String,
        /// HTTP basic-auth password
        #[arg(long, default_value = "")]
        http_password: String,
    },
    /// Change an existing instance
    Edit {
        /// Current instance name
        old_name: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New base URL
        #[arg(long)]
        url: Option<String>,
        /// New RepRapFirmware password
        #[arg(long)]
        duet_password: Option<String>,
        /// New HTTP basic-auth user
        #[arg(long)]
        http_user: Option<String>,
        /// New HTTP basic-auth password
        #[arg(long)]
        http_password: Option<String>,
    },
    /// Remove an instance
    Remove {
        /// Instance name
        name: String,
    },
    /// Check whether a URL is accepted as a printer address
    CheckUrl {
        /// URL to check
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let prefs_path = settings.preferences_path(cli.prefs);
    debug!("Using preferences {}", prefs_path.display());

    let mut registry = InstanceRegistry::with_config(
        LoggingDevices::default(),
        FilePreferences::new(prefs_path),
        settings.registry,
    )?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::List => commands::list(&registry, &mut out)?,
        Commands::Show { name } => commands::show(&registry, &name, &mut out)?,
        Commands::Add {
            name,
            url,
            duet_password,
            http_user,
            http_password,
        } => {
            // Validated as typed; the registry adds the trailing slash.
            let profile = InstanceProfile {
                url,
                duet_password,
                http_user,
                http_password,
            };
            commands::add(&mut registry, &name, profile)?;
        }
        Commands::Edit {
            old_name,
            name,
            url,
            duet_password,
            http_user,
            http_password,
        } => {
            let changes = Changes {
                name,
                url,
                duet_password,
                http_user,
                http_password,
            };
            commands::edit(&mut registry, &old_name, changes)?;
        }
        Commands::Remove { name } => commands::remove(&mut registry, &name)?,
        Commands::CheckUrl { url } => commands::check_url(&url, &mut out)?,
    }

    registry.shutdown();
    Ok(())
}
