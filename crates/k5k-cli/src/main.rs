mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use config::Config;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("k5k=info".parse()?)
                .add_directive("k5k_core=info".parse()?),
        )
        .init();

    let args = Cli::parse();

    let config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) if is_not_found(&e) => {
            debug!("No config at {:?}, using defaults", args.config);
            Config::default()
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    match args.command {
        Command::List {
            file,
            sort,
            lossy_names,
        } => commands::list::run(
            &file,
            sort.unwrap_or(config.sort),
            &config.decode_options(lossy_names),
        ),
        Command::Dump {
            file,
            format,
            output,
            lossy_names,
        } => commands::dump::run(
            &file,
            format,
            output.as_deref(),
            &config.decode_options(lossy_names),
        ),
        Command::Extract {
            file,
            dir,
            lossy_names,
        } => commands::extract::run(&file, &dir, &config.decode_options(lossy_names)),
        Command::Hexdump { file, patch, ascii } => {
            commands::hexdump::run(&file, patch, ascii, &config.decode_options(false))
        }
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}
