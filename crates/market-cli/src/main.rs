//! Extension marketplace CLI
//!
//! Registry migrations and read-only browsing of the joined catalog.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use market_registry::FilterOptions;

use cli::{Cli, Commands};
use commands::ListArgs;
use context::Context;
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

    let Some(cmd) = cli.command.clone() else {
        println!("{} Extension marketplace registry tools", "market".green().bold());
        println!();
        println!("Run {} for available commands.", "market --help".cyan());
        return Ok(());
    };

    let ctx = Context::from_cli(&cli)?;
    execute_command(&ctx, cmd)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Convert { write } => commands::run_convert(ctx, write),
        Commands::ExtractProviders { write } => commands::run_extract(ctx, write),
        Commands::FixProviders { write } => commands::run_fix(ctx, write),
        Commands::List {
            search,
            category,
            compat,
            license,
            price,
            provider,
            page,
            reviews,
            json,
        } => {
            let args = ListArgs {
                filters: FilterOptions {
                    search,
                    category,
                    compatibility: compat,
                    license,
                    price,
                    provider,
                },
                page,
                reviews,
                json,
            };
            commands::run_list(ctx, &args)
        }
        Commands::Show {
            slug,
            reviews,
            json,
        } => commands::run_show(ctx, &slug, reviews.as_deref(), json),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
    }
}
