//! Registry migration commands

use colored::Colorize;
use market_migrate::{FixOutcome, convert_file, extract_files, fix_file};

use crate::cli::WriteArgs;
use crate::context::Context;
use crate::error::Result;

/// Run the convert command
pub fn run_convert(ctx: &Context, write: WriteArgs) -> Result<()> {
    let store = write.store();
    let report = convert_file(&ctx.registry_path, &store, &ctx.providers, write.dry_run)?;

    println!("Converting {} extensions...", report.total());
    for record in &report.records {
        let marker = if record.changed { "✓".green() } else { "=".dimmed() };
        println!("  {} {} -> {}", marker, record.name, record.provider_id.cyan());
    }
    println!();
    finish(ctx, write, &format!("{} of {} extensions updated", report.changed(), report.total()));
    Ok(())
}

/// Run the extract-providers command
pub fn run_extract(ctx: &Context, write: WriteArgs) -> Result<()> {
    let store = write.store();
    let report = extract_files(
        &ctx.registry_path,
        &ctx.providers_path,
        &store,
        &ctx.providers,
        write.dry_run,
    )?;

    println!(
        "Extracted {} unique providers from {} extensions",
        report.provider_count(),
        report.extension_count
    );
    println!();
    println!("{}", "Provider summary:".bold());
    for (name, count) in &report.provider_counts {
        println!("  {}: {} extensions", name, count);
    }
    println!();
    finish(ctx, write, "registry and providers written");
    Ok(())
}

/// Run the fix-providers command
pub fn run_fix(ctx: &Context, write: WriteArgs) -> Result<()> {
    let store = write.store();
    let report = fix_file(&ctx.registry_path, &store, write.dry_run)?;

    for outcome in &report.outcomes {
        match outcome {
            FixOutcome::Fixed { name, provider_id } => {
                println!("Fixed {}: unknown -> {}", name, provider_id.green());
            }
            FixOutcome::Undetected { name } => {
                println!("{} {}", "Could not detect provider for:".yellow(), name);
            }
        }
    }
    println!();
    println!(
        "Fixed {} extensions with correct provider_ids",
        report.fixed_count()
    );
    if write.dry_run {
        println!("{} nothing written", "Dry run:".yellow().bold());
    }
    Ok(())
}

fn finish(ctx: &Context, write: WriteArgs, summary: &str) {
    if write.dry_run {
        println!("{} nothing written ({})", "Dry run:".yellow().bold(), summary);
    } else {
        println!(
            "{} {} ({})",
            "Done:".green().bold(),
            summary,
            ctx.registry_path.display()
        );
    }
}
