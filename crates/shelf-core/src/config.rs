//! Configuration management for Shelf.
//!
//! Loads configuration from ${SHELF_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::catalog::{DEFAULT_SEARCH_LIMIT, MemoryCatalog};
use crate::services::reviews::MemoryReviews;

/// Which landing page copy to show.
///
/// The library homepage and the book-review landing page share one panel
/// machine; only the welcome text differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Variant {
    #[default]
    Library,
    BookReview,
}

impl Variant {
    pub fn site_name(self) -> &'static str {
        match self {
            Variant::Library => "Library",
            Variant::BookReview => "BookReview.com",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Variant::Library => "Welcome to Our Library!",
            Variant::BookReview => "Welcome to BookReview.com",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Variant::Library => {
                "Browse books, search by title or author, and register to make requests."
            }
            Variant::BookReview => {
                "Discover and share your thoughts on your favorite books. \
                 Join our community or continue as a guest to explore reviews."
            }
        }
    }

    /// The book-review page shows ratings and reviews next to search hits.
    pub fn shows_reviews(self) -> bool {
        matches!(self, Variant::BookReview)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Variant::Library => "library",
            Variant::BookReview => "book-review",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" | "homepage" => Ok(Variant::Library),
            "book-review" | "bookreview" | "landing" => Ok(Variant::BookReview),
            other => Err(format!(
                "unknown variant '{other}' (expected 'library' or 'book-review')"
            )),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Auth backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthBackend {
    /// Accept and log every submission.
    #[default]
    Logging,
    /// In-memory account directory.
    Memory,
}

pub mod paths {
    //! Path resolution for Shelf configuration and data directories.
    //!
    //! SHELF_HOME resolution order:
    //! 1. SHELF_HOME environment variable (if set)
    //! 2. ~/.config/shelf (default)
    //! 3. ./.shelf when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Shelf home directory.
    pub fn shelf_home() -> PathBuf {
        if let Ok(home) = std::env::var("SHELF_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".shelf"),
            |h| h.join(".config").join("shelf"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        shelf_home().join("config.toml")
    }

    /// Returns the default log file path.
    pub fn log_path() -> PathBuf {
        shelf_home().join("logs").join("shelf.log")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landing page copy.
    pub variant: Variant,

    /// Which auth service to use.
    pub auth_backend: AuthBackend,

    /// Optional catalog file; built-in sample when unset.
    pub catalog_path: Option<PathBuf>,

    /// Maximum catalog search results.
    pub search_limit: usize,

    /// Directory holding `Reviews.csv` and `Ratings.csv`; built-in sample
    /// when unset.
    pub reviews_dir: Option<PathBuf>,

    /// Log file override.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            auth_backend: AuthBackend::default(),
            catalog_path: None,
            search_limit: DEFAULT_SEARCH_LIMIT,
            reviews_dir: None,
            log_file: None,
        }
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not
    /// valid config TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Effective log file path.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(paths::log_path)
    }

    /// Builds the catalog: the configured file, or the built-in sample.
    ///
    /// # Errors
    /// Returns an error if the configured catalog file cannot be loaded.
    pub fn catalog(&self) -> Result<MemoryCatalog> {
        match &self.catalog_path {
            Some(path) => MemoryCatalog::load(path, self.search_limit),
            None => Ok(MemoryCatalog::sample(self.search_limit)),
        }
    }

    /// Builds the review store: the configured directory, or the built-in
    /// sample.
    ///
    /// # Errors
    /// Returns an error if a review or rating file cannot be loaded.
    pub fn reviews(&self) -> Result<MemoryReviews> {
        match &self.reviews_dir {
            Some(dir) => MemoryReviews::load_dir(dir),
            None => Ok(MemoryReviews::sample()),
        }
    }
}
