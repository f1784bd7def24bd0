//! Shade CLI
//!
//! Scans a project for color utilities such as `bg-blue-150` and writes the
//! `@theme inline` block that defines the in-between intensities.

mod config;
mod project;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shade_scan::ScanSession;
use shade_theme::{is_stop, palette::color_var, synthesize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ShadeConfig;
use crate::run::{BuildArgs, Target};

#[derive(Parser)]
#[command(name = "shade", version, about = "Synthesized color intensities for utility CSS")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./shade.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan once and write the theme
    Build(BuildArgs),

    /// Scan, then rescan whenever a tracked file changes
    Watch(BuildArgs),

    /// Print the expression for one color and intensity
    Synth {
        /// Color family, e.g. `blue`
        family: String,
        /// Intensity, e.g. `150`
        intensity: u32,
    },

    /// Create a shade.toml
    Init {
        /// Directory to create it in
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            let config = load_config(cli.config.as_deref())?;
            let target = Target::resolve(&config, args);
            let mut session = ScanSession::new(config.options);
            run::build_once(&mut session, &target).await?;
        }
        Commands::Watch(args) => {
            let config = load_config(cli.config.as_deref())?;
            let debounce = Duration::from_millis(config.watch.debounce_ms);
            let target = Target::resolve(&config, args);
            run::watch(ScanSession::new(config.options), target, debounce).await?;
        }
        Commands::Synth { family, intensity } => {
            if is_stop(intensity) {
                info!("{} is a stock stop, nothing to synthesize", intensity);
                println!("{}", color_var(&family, intensity));
            } else {
                println!("{}", synthesize(&family, intensity));
            }
        }
        Commands::Init { dir, force } => {
            project::create_config(&dir, force)?;
            info!("Created {}", dir.join(config::CONFIG_FILE).display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ShadeConfig> {
    match path {
        Some(path) => ShadeConfig::load_from_file(path),
        None => ShadeConfig::load_from_dir(Path::new(".")),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "shade=debug" } else { "shade=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
