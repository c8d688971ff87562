//! `shelf search`: non-interactive catalog search.

use anyhow::{Context, Result};
use shelf_core::config::Config;
use shelf_core::services::{Book, CatalogSearchService};
use tracing::info;

pub fn run(config: &Config, query: &str, json: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let books = catalog
        .search(query)
        .with_context(|| format!("search catalog for \"{query}\""))?;
    info!(%query, hits = books.len(), "cli search");

    if json {
        let out = serde_json::to_string_pretty(&books).context("serialize results")?;
        println!("{out}");
        return Ok(());
    }

    if books.is_empty() {
        println!("No books match \"{query}\"");
        return Ok(());
    }
    for book in &books {
        println!("{}", format_book(book));
    }
    Ok(())
}

fn format_book(book: &Book) -> String {
    let mut line = format!("{}  {} by {}", book.isbn, book.title, book.author);
    if let Some(year) = book.year {
        line.push_str(&format!(" ({year})"));
    }
    line
}
