//! stackmix CLI
//!
//! Toggles options in a store of layered YAML fragments and applies the
//! merged result to a container engine.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::{ComposeAction, DirectAction, EnableAction};
use context::AppContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!(command = ?cli.command, "Starting");

    let ctx = AppContext::load(&cli)?;
    execute_command(ctx, cli.command)
}

fn execute_command(mut ctx: AppContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(&ctx, json),
        Commands::Show { option, json } => commands::run_show(&ctx, &option, json),
        Commands::Global { json } => commands::run_global(&ctx, json),
        Commands::Names { option, json } => commands::run_names(&ctx, &option, json),
        Commands::Enable { option } => {
            commands::run_set_enabled(&mut ctx, &option, EnableAction::Enable).map(drop)
        }
        Commands::Disable { option } => {
            commands::run_set_enabled(&mut ctx, &option, EnableAction::Disable).map(drop)
        }
        Commands::Toggle { option } => {
            commands::run_set_enabled(&mut ctx, &option, EnableAction::Toggle).map(drop)
        }
        Commands::Addon { option, addon, off } => {
            commands::run_set_addon(&mut ctx, &option, &addon, !off)
        }
        Commands::Status { json } => commands::run_status(&ctx, json),
        Commands::Up => commands::run_compose(&ctx, ComposeAction::Up),
        Commands::Down => commands::run_compose(&ctx, ComposeAction::Down),
        Commands::Start { option } => commands::run_direct(&ctx, &option, DirectAction::Start),
        Commands::Stop { option } => commands::run_direct(&ctx, &option, DirectAction::Stop),
        Commands::Restart { option } => {
            commands::run_direct(&ctx, &option, DirectAction::Restart)
        }
        Commands::Pull { option } => commands::run_pull(&ctx, &option),
        Commands::Watch { interval } => commands::run_watch(ctx, interval),
    }
}
