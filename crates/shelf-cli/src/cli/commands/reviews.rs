//! `shelf reviews`: ratings and reviews for one book.

use anyhow::{Context, Result};
use shelf_core::config::Config;
use shelf_core::services::{BookReviews, ReviewService};
use tracing::info;

pub fn run(config: &Config, isbn: &str, json: bool) -> Result<()> {
    let store = config.reviews()?;
    let book = store
        .lookup(isbn)
        .with_context(|| format!("look up reviews for {isbn}"))?;
    info!(%isbn, ratings = book.rating.count, reviews = book.reviews.len(), "cli reviews");

    if json {
        let out = serde_json::to_string_pretty(&book).context("serialize reviews")?;
        println!("{out}");
        return Ok(());
    }

    println!("{}", format_rating(&book));
    if book.reviews.is_empty() {
        println!("No reviews yet");
    }
    for review in &book.reviews {
        println!(
            "{}  user {}: {}",
            review.time.format("%Y-%m-%d"),
            review.user_id,
            review.comment
        );
    }
    Ok(())
}

fn format_rating(book: &BookReviews) -> String {
    if book.rating.is_rated() {
        format!(
            "{}  {:.2}/10 from {} rating(s)",
            book.isbn(),
            book.rating.average,
            book.rating.count
        )
    } else {
        format!("{}  not rated yet", book.isbn())
    }
}
