//! Read-only catalog commands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use market_registry::reviews::{apply_stats, load_reviews, stats_by_slug};
use market_registry::{Catalog, CatalogHandle, FilterOptions, ITEMS_PER_PAGE, JoinedExtension};
use serde_json::json;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Options of the list command.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub filters: FilterOptions,
    pub page: usize,
    pub reviews: Option<PathBuf>,
    pub json: bool,
}

/// Run the list command
pub fn run_list(ctx: &Context, args: &ListArgs) -> Result<()> {
    let catalog = load_catalog(ctx, args.reviews.as_deref())?;
    let page = catalog.query(&args.filters, args.page, ITEMS_PER_PAGE);

    if page.total_items > 0 && page.items.is_empty() {
        return Err(CliError::user(format!(
            "Page {} is past the last page ({})",
            page.page, page.total_pages
        )));
    }

    if args.json {
        let out = json!({
            "page": page.page,
            "total_pages": page.total_pages,
            "total_items": page.total_items,
            "items": page.items,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if page.total_items == 0 {
        println!("No extensions match the current filters.");
        return Ok(());
    }

    println!(
        "{} (page {} of {}, {} total)",
        "Extensions".bold(),
        page.page,
        page.total_pages,
        page.total_items
    );
    println!();
    for item in &page.items {
        print_row(item);
    }

    if page.page < page.total_pages {
        println!();
        println!("Use {} for more.", format!("--page {}", page.page + 1).cyan());
    }
    Ok(())
}

/// Run the show command
pub fn run_show(ctx: &Context, slug: &str, reviews: Option<&Path>, json: bool) -> Result<()> {
    let catalog = load_catalog(ctx, reviews)?;
    let item = catalog.find(slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }

    let ext = &item.extension;
    println!("{} {}", ext.name.bold(), format!("v{}", ext.latest_version).dimmed());
    if !ext.description_short.is_empty() {
        println!("{}", ext.description_short);
    }
    println!();

    field("Slug", &ext.slug);
    field("Category", ext.category.label());
    field("Provider", &item.provider.name);
    field("License", &ext.license);
    field("Price", ext.price.as_str());
    if !ext.core_compat.is_empty() {
        field("Compatible", &ext.core_compat.join(", "));
    }
    if let Some(rating) = rating_text(item) {
        field("Rating", &rating);
    }
    if !ext.repo_url.is_empty() {
        field("Repository", &ext.repo_url);
    }

    if !ext.description_long.is_empty() {
        println!();
        println!("{}", ext.description_long);
    }
    if !ext.install_notes.is_empty() {
        println!();
        println!("{}", "Installation:".cyan().bold());
        println!("{}", ext.install_notes);
    }
    Ok(())
}

/// Load the joined catalog, overlaying review stats when given.
fn load_catalog(ctx: &Context, reviews: Option<&Path>) -> Result<Arc<Catalog>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let handle = CatalogHandle::new(ctx.source(), ctx.providers.clone());
    let catalog = runtime.block_on(handle.get())?;

    let Some(path) = reviews else {
        return Ok(catalog);
    };

    let stats = stats_by_slug(&load_reviews(path)?);
    let mut items = catalog.extensions().to_vec();
    apply_stats(&mut items, &stats);
    Ok(Arc::new(Catalog::new(items)))
}

fn print_row(item: &JoinedExtension) {
    let ext = &item.extension;
    let rating = rating_text(item).unwrap_or_default();
    println!(
        "  {:<28} {} ({}) {}",
        ext.slug.green(),
        ext.name,
        item.provider.name.dimmed(),
        rating.yellow()
    );
    if !ext.description_short.is_empty() {
        println!("  {:<28} {}", "", ext.description_short.dimmed());
    }
}

fn field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{label}:").dimmed(), value);
}

fn rating_text(item: &JoinedExtension) -> Option<String> {
    let avg = item.extension.rating_avg?;
    let count = item.extension.rating_count.unwrap_or(0);
    Some(format!("★ {avg:.1} ({count})"))
}
