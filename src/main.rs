//! Command-line tool for creating pins and inspecting an account
//!
//! # Usage
//!
//! ```bash
//! pinner --login me@example.com --password secret \
//!     pin --board 123456789 --image https://example.com/cat.jpg --link https://example.com/cats
//! pinner boards
//! pinner pins --board 123456789
//! pinner me
//! ```
//!
//! Results are printed to stdout as JSON; logs and errors go to stderr.

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use pinterest_pinner::{
    Settings,
    cli::{self, Command},
    config::ConfigLoader,
    utils,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "pinner")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Account login (username or e-mail)
    #[arg(long, value_name = "LOGIN", global = true)]
    login: Option<String>,

    /// Account password
    #[arg(long, value_name = "PASSWORD", global = true)]
    password: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Settings::default_path);
    let mut settings = match ConfigLoader::new().load(config_path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    cli::init_logging(
        cli.verbose || settings.logging.verbose,
        &settings.logging.level,
    );

    // Command line flags override file and environment
    if let Some(login) = cli.login {
        settings.account.login = Some(login);
    }
    if let Some(password) = cli.password {
        settings.account.password = Some(password);
    }

    debug!("pinner v{} running {:?}", utils::get_version(), cli.command);

    match cli::run_command(&settings, &cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
