// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modmail - private moderator threads opened from a button.
//!
//! This is the binary entry point for the Modmail bot.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Modmail - private moderator threads opened from a button.
#[derive(Parser, Debug)]
#[command(name = "modmail", version, about, long_about = None)]
struct Cli {
    /// Additional config file, merged after the standard locations.
    #[arg(short = 'C', long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Register commands and handle interactions (default).
    Serve,
    /// Register the slash commands and exit.
    RegisterCommands,
    /// Validate the configuration, print the effective settings and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match modmail_config::load_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            modmail_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::RegisterCommands => serve::run_register(config).await,
        Commands::CheckConfig => match modmail_config::render_effective(&config) {
            Ok(rendered) => {
                println!(
                    "# modmail: config ok (transport={}, commands={})\n{rendered}",
                    serve::transport_name(&config),
                    serve::command_scope(&config).describe()
                );
                Ok(())
            }
            Err(e) => {
                modmail_config::render_errors(&[e]);
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("modmail: {e}");
            ExitCode::FAILURE
        }
    }
}
