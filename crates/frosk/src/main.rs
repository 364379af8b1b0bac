// SPDX-FileCopyrightText: 2026 Frosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! frosk: a local credential vault behind one master password.
//!
//! This is the binary entry point.

mod check;
mod commands;
mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use frosk_config::{ConfigError, FroskConfig};
use frosk_core::FroskError;
use frosk_storage::SqliteStorage;
use frosk_vault::generator::DEFAULT_LENGTH;
use frosk_vault::{Vault, get_master_password, get_master_password_with_confirm};

/// frosk - a local, master-password protected credential vault.
#[derive(Parser, Debug)]
#[command(name = "frosk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the search path.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the vault and set its master password.
    Init,
    /// Store a credential for a new service.
    Add {
        service: String,
        username: String,
        /// Generate a random password instead of prompting for one.
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Decrypt and print a stored credential.
    Get {
        service: String,
        /// Print the password in full instead of masked.
        #[arg(long)]
        show: bool,
    },
    /// List stored service names.
    List {
        /// Print a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Permanently delete a stored credential.
    Delete {
        service: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print a random password without touching the vault.
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Run diagnostic checks on the configuration and the vault database.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

/// Password generator options.
#[derive(Args, Debug, Clone, Copy)]
struct GeneratorArgs {
    /// Number of characters.
    #[arg(long, short, default_value_t = DEFAULT_LENGTH)]
    length: usize,
    /// Only letters and digits.
    #[arg(long)]
    no_special: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            frosk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_tracing(&config.logging) {
        eprintln!("frosk: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("frosk: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<FroskConfig, Vec<ConfigError>> {
    match path {
        Some(path) => frosk_config::load_and_validate_path(path),
        None => frosk_config::load_and_validate(),
    }
}

async fn run(command: Commands, config: &FroskConfig) -> Result<(), FroskError> {
    let mut out = std::io::stdout().lock();

    // The database is opened on first use, so `generate` never touches it.
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    let vault = Vault::new(storage, config.vault.clone());

    let result = dispatch(command, config, &vault, &mut out).await;
    let closed = vault.close().await;
    result.and(closed)
}

async fn dispatch(
    command: Commands,
    config: &FroskConfig,
    vault: &Vault,
    out: &mut impl Write,
) -> Result<(), FroskError> {
    match command {
        Commands::Init => {
            if vault.is_initialized().await? {
                return Err(FroskError::AlreadyInitialized);
            }
            let master = get_master_password_with_confirm()?;
            commands::init(vault, &master, &config.storage.database_path, out).await
        }
        Commands::Add {
            service,
            username,
            generate,
            generator,
        } => {
            let master = get_master_password()?;
            vault.require_master_password(&master).await?;
            let password = if generate {
                commands::generated_secret(generator.length, !generator.no_special)?
            } else {
                commands::read_credential_password(&service)?
            };
            commands::add(vault, &service, &username, &password, &master, out).await
        }
        Commands::Get { service, show } => {
            let master = get_master_password()?;
            commands::get(vault, &service, &master, show, out).await
        }
        Commands::List { json } => commands::list(vault, json, out).await,
        Commands::Delete { service, yes } => {
            let master = get_master_password()?;
            vault.require_master_password(&master).await?;
            if yes || commands::confirm(&format!("Delete credential for `{service}`?"))? {
                commands::delete(vault, &service, out).await
            } else {
                commands::aborted(out)
            }
        }
        Commands::Check { plain } => check::run_check(config, vault, plain, out).await,
        Commands::Generate { generator } => {
            commands::generate(generator.length, !generator.no_special, out)
        }
    }
}
