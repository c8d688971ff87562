//! Catalog search.
//!
//! `MemoryCatalog` holds the book list in memory. It is loaded from a
//! Book-Crossing `BX_Books.csv` export (semicolon separated, ISO-8859-1), from
//! a TOML file with `[[books]]` tables, or from a small built-in sample.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RemoteError;

/// Default cap on results per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub publisher: Option<String>,
}

/// Search by title, author or ISBN.
pub trait CatalogSearchService {
    fn search(&self, query: &str) -> Result<Vec<Book>, RemoteError>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    books: Vec<Book>,
}

/// One `BX_Books.csv` row. Trailing columns (cover image URLs) are ignored.
#[derive(Debug, Deserialize)]
struct BxBookRow {
    #[serde(rename = "ISBN")]
    isbn: String,
    #[serde(rename = "Book-Title")]
    title: String,
    #[serde(rename = "Book-Author")]
    author: String,
    #[serde(rename = "Year-Of-Publication", default)]
    year: String,
    #[serde(rename = "Publisher", default)]
    publisher: String,
}

impl From<BxBookRow> for Book {
    fn from(row: BxBookRow) -> Self {
        // The export writes 0 for an unknown year.
        let year = row.year.trim().parse::<u16>().ok().filter(|y| *y != 0);
        let publisher = row.publisher.trim();
        Book {
            isbn: row.isbn.trim().to_string(),
            title: row.title,
            author: row.author,
            year,
            publisher: (!publisher.is_empty()).then(|| publisher.to_string()),
        }
    }
}

/// ISO-8859-1 maps every byte to the code point with the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn is_csv(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// In-memory catalog.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    books: Vec<Book>,
    limit: usize,
}

impl MemoryCatalog {
    pub fn new(books: Vec<Book>, limit: usize) -> Self {
        Self {
            books,
            limit: limit.max(1),
        }
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or a book entry is
    /// missing `isbn`, `title` or `author`.
    pub fn from_toml_str(contents: &str, limit: usize) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents).context("Failed to parse catalog")?;
        Ok(Self::new(file.books, limit))
    }

    /// Parses a `BX_Books.csv` export that has already been decoded to text.
    ///
    /// Columns are matched by header name: `ISBN`, `Book-Title`,
    /// `Book-Author`, `Year-Of-Publication` and `Publisher`. Rows are kept in
    /// file order, duplicates included; search reports each ISBN once.
    ///
    /// # Errors
    /// Returns an error if a row cannot be read or lacks a required column.
    pub fn from_csv_str(contents: &str, limit: usize) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(contents.as_bytes());
        let books = reader
            .deserialize::<BxBookRow>()
            .map(|row| row.map(Book::from))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse catalog CSV")?;
        Ok(Self::new(books, limit))
    }

    /// Loads a catalog file from disk.
    ///
    /// A `.csv` file is read as an ISO-8859-1 `BX_Books.csv` export; anything
    /// else is read as UTF-8 TOML.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let catalog = if is_csv(path) {
            let bytes = fs::read(path)
                .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
            Self::from_csv_str(&decode_latin1(&bytes), limit)
        } else {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog from {}", path.display()))?;
            Self::from_toml_str(&contents, limit)
        };
        let catalog =
            catalog.with_context(|| format!("Failed to load catalog from {}", path.display()))?;
        debug!(path = %path.display(), books = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Built-in sample used when no catalog file is configured.
    pub fn sample(limit: usize) -> Self {
        let books = [
            ("0195153448", "Classical Mythology", "Mark P. O. Morford", 2002, "Oxford University Press"),
            ("0002005018", "Clara Callan", "Richard Bruce Wright", 2001, "HarperFlamingo Canada"),
            ("0060973129", "Decision in Normandy", "Carlo D'Este", 1991, "HarperPerennial"),
            ("0374157065", "Flu: The Story of the Great Influenza Pandemic of 1918", "Gina Bari Kolata", 1999, "Farrar Straus Giroux"),
            ("0393045218", "The Mummies of Urumchi", "E. J. W. Barber", 1999, "W. W. Norton & Company"),
            ("0399135782", "The Kitchen God's Wife", "Amy Tan", 1991, "Putnam Pub Group"),
            ("0425176428", "What If?: The World's Foremost Military Historians Imagine What Might Have Been", "Robert Cowley", 2000, "Berkley Publishing Group"),
            ("0671870432", "PLEADING GUILTY", "Scott Turow", 1993, "Audioworks"),
            ("0679425608", "Under the Black Flag: The Romance and the Reality of Life Among the Pirates", "David Cordingly", 1996, "Random House"),
            ("074322678X", "Where You'll Find Me: And Other Stories", "Ann Beattie", 2002, "Scribner"),
            ("0771074670", "Nights Below Station Street", "David Adams Richards", 1988, "Emblem Editions"),
            ("080652121X", "Hitler's Secret Bankers: The Myth of Swiss Neutrality During the Holocaust", "Adam Lebor", 2000, "Citadel Press"),
            ("0887841740", "The Middle Stories", "Sheila Heti", 2004, "House of Anansi Press"),
            ("1552041778", "Jane Doe", "R. J. Kaiser", 1999, "Mira Books"),
            ("1558746218", "A Second Chicken Soup for the Woman's Soul", "Jack Canfield", 1998, "Health Communications"),
        ]
        .into_iter()
        .map(|(isbn, title, author, year, publisher)| Book {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            year: Some(year),
            publisher: Some(publisher.to_string()),
        })
        .collect();
        Self::new(books, limit)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl CatalogSearchService for MemoryCatalog {
    /// Case-insensitive substring match on title, author or ISBN.
    ///
    /// An empty query returns nothing. Repeated ISBNs are reported once and
    /// at most `limit` books come back, in catalog order.
    fn search(&self, query: &str) -> Result<Vec<Book>, RemoteError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for book in &self.books {
            if seen.contains(book.isbn.as_str()) {
                continue;
            }
            let hit = book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
                || book.isbn.to_lowercase().contains(&needle);
            if hit {
                seen.insert(book.isbn.as_str());
                results.push(book.clone());
            }
            if results.len() >= self.limit {
                break;
            }
        }

        debug!(query, hits = results.len(), "catalog search");
        Ok(results)
    }
}
