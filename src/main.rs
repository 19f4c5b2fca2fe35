//! DiffMovie command-line entry point
//!
//! Probes video files with ffprobe and compares them field by field.
//!
//! # Usage
//!
//! ```bash
//! diffmovie inspect clip.mp4
//! diffmovie compare a.mp4 b.mkv --only-diff --summary
//! diffmovie compare a.mp4 --preset youtube-hd --commands
//! diffmovie command phone.mov master.mp4 -o matched.mp4
//! diffmovie shell
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use diffmovie::app::container::DefaultAppContainer;
use diffmovie::cli::{commands, shell, Cli, Commands};
use diffmovie::config_initialization::initialize_configuration_hierarchy;
use diffmovie::utils::logging::LoggingSystem;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    LoggingSystem::new(config.logging()).initialize();
    debug!("Resolved configuration: {:?}", config);

    let container = DefaultAppContainer::new(&config);

    match cli.command {
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, args).await?;
        }
        Commands::Compare(args) => {
            info!("Executing compare command");
            commands::compare(&container, args).await?;
        }
        Commands::Command(args) => {
            info!("Executing command command");
            commands::command(&container, args).await?;
        }
        Commands::Presets(args) => commands::presets(args)?,
        Commands::Shell(args) => {
            info!("Starting interactive shell");
            shell::run(&container, args).await?;
        }
    }

    Ok(())
}
