//! Read-only review and rating lookup.
//!
//! The book-review landing page shows each search hit together with its
//! average rating and the reviews readers left for it. The data is read from
//! the `Reviews.csv` and `Ratings.csv` files kept by the reviews backend, or
//! taken from a small built-in sample. Nothing here writes reviews.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RemoteError;

/// Review file name inside the reviews directory.
pub const REVIEWS_FILE: &str = "Reviews.csv";

/// Rating file name inside the reviews directory.
pub const RATINGS_FILE: &str = "Ratings.csv";

/// Highest rating a reader can give; ratings run from 0.
pub const MAX_RATING: u8 = 10;

/// One reader's written review of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "ReviewID")]
    pub review_id: u32,
    #[serde(alias = "UserID")]
    pub user_id: u32,
    #[serde(alias = "ISBN")]
    pub isbn: String,
    #[serde(alias = "Comment")]
    pub comment: String,
    /// Day the review was written (`YYYY-MM-DD` on disk).
    #[serde(alias = "Time")]
    pub time: NaiveDate,
}

/// One reader's 0-10 rating of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(alias = "UserID")]
    pub user_id: u32,
    #[serde(alias = "ISBN")]
    pub isbn: String,
    #[serde(alias = "Book-Rating")]
    pub rating: u8,
}

/// Average rating of one book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSummary {
    pub isbn: String,
    /// Mean rating rounded to two decimals; 0.0 when nobody rated the book.
    pub average: f64,
    pub count: usize,
}

impl RatingSummary {
    fn from_ratings<'a>(isbn: &str, ratings: impl Iterator<Item = &'a Rating>) -> Self {
        let (sum, count) = ratings.fold((0u32, 0usize), |(sum, count), r| {
            (sum + u32::from(r.rating), count + 1)
        });
        let average = if count == 0 {
            0.0
        } else {
            (f64::from(sum) / count as f64 * 100.0).round() / 100.0
        };
        Self {
            isbn: isbn.to_string(),
            average,
            count,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.count > 0
    }
}

/// Rating summary and reviews for one ISBN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookReviews {
    pub rating: RatingSummary,
    pub reviews: Vec<Review>,
}

impl BookReviews {
    pub fn isbn(&self) -> &str {
        &self.rating.isbn
    }

    /// The most recently written review, if any.
    pub fn latest(&self) -> Option<&Review> {
        self.reviews.iter().max_by_key(|review| review.time)
    }
}

/// Review and rating lookup by ISBN.
pub trait ReviewService {
    /// Reviews for `isbn`, in the order they were written to the store.
    fn reviews_for(&self, isbn: &str) -> Result<Vec<Review>, RemoteError>;

    fn rating_for(&self, isbn: &str) -> Result<RatingSummary, RemoteError>;

    fn lookup(&self, isbn: &str) -> Result<BookReviews, RemoteError> {
        Ok(BookReviews {
            rating: self.rating_for(isbn)?,
            reviews: self.reviews_for(isbn)?,
        })
    }
}

/// In-memory reviews and ratings.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviews {
    reviews: Vec<Review>,
    ratings: Vec<Rating>,
}

impl MemoryReviews {
    /// Ratings above `MAX_RATING` are dropped.
    pub fn new(reviews: Vec<Review>, ratings: Vec<Rating>) -> Self {
        let ratings = ratings
            .into_iter()
            .filter(|r| {
                let valid = r.rating <= MAX_RATING;
                if !valid {
                    warn!(isbn = %r.isbn, rating = r.rating, "out of range rating skipped");
                }
                valid
            })
            .collect();
        Self { reviews, ratings }
    }

    /// Parses `Reviews.csv` and `Ratings.csv` contents (comma separated,
    /// with header rows). An empty string stands for a missing file.
    ///
    /// # Errors
    /// Returns an error if a row cannot be read, a number or date does not
    /// parse, or a required column is missing.
    pub fn from_csv_strs(reviews: &str, ratings: &str) -> Result<Self> {
        let reviews = read_rows(reviews).context("Failed to parse reviews")?;
        let ratings = read_rows(ratings).context("Failed to parse ratings")?;
        Ok(Self::new(reviews, ratings))
    }

    /// Loads `Reviews.csv` and `Ratings.csv` from `dir`. A file that does not
    /// exist counts as empty.
    ///
    /// # Errors
    /// Returns an error if a file exists but cannot be read or parsed.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let reviews = read_optional(&dir.join(REVIEWS_FILE))?;
        let ratings = read_optional(&dir.join(RATINGS_FILE))?;
        let loaded = Self::from_csv_strs(&reviews, &ratings)
            .with_context(|| format!("Failed to load reviews from {}", dir.display()))?;
        debug!(
            dir = %dir.display(),
            reviews = loaded.reviews.len(),
            ratings = loaded.ratings.len(),
            "reviews loaded"
        );
        Ok(loaded)
    }

    /// Built-in sample for the books in the sample catalog.
    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let reviews = [
            (1, 1, "0399135782", "A moving story about mothers, daughters and secrets.", date(2024, 3, 2)),
            (2, 2, "0399135782", "Slow first chapters, but the second half is wonderful.", date(2024, 4, 11)),
            (3, 3, "0195153448", "Dense, but the best reference on Greek myth I own.", date(2024, 2, 19)),
            (4, 4, "0671870432", "Turow at his most cynical. Great courtroom scenes.", date(2024, 5, 27)),
        ]
        .into_iter()
        .map(|(review_id, user_id, isbn, comment, time)| Review {
            review_id,
            user_id,
            isbn: isbn.to_string(),
            comment: comment.to_string(),
            time,
        })
        .collect();
        let ratings = [
            (1, "0399135782", 9),
            (2, "0399135782", 7),
            (3, "0399135782", 8),
            (3, "0195153448", 6),
            (1, "0002005018", 8),
            (4, "0002005018", 5),
            (4, "0671870432", 7),
        ]
        .into_iter()
        .map(|(user_id, isbn, rating)| Rating {
            user_id,
            isbn: isbn.to_string(),
            rating,
        })
        .collect();
        Self::new(reviews, ratings)
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

impl ReviewService for MemoryReviews {
    fn reviews_for(&self, isbn: &str) -> Result<Vec<Review>, RemoteError> {
        Ok(self
            .reviews
            .iter()
            .filter(|review| review.isbn == isbn)
            .cloned()
            .collect())
    }

    fn rating_for(&self, isbn: &str) -> Result<RatingSummary, RemoteError> {
        Ok(RatingSummary::from_ratings(
            isbn,
            self.ratings.iter().filter(|r| r.isbn == isbn),
        ))
    }
}

fn read_rows<T: DeserializeOwned>(contents: &str) -> Result<Vec<T>> {
    let rows = csv::Reader::from_reader(contents.as_bytes())
        .deserialize()
        .collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

fn read_optional(path: &Path) -> Result<String> {
    if !path.exists() {
        debug!(path = %path.display(), "no file, treating as empty");
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
