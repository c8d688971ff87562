//! Application state.
//!
//! `AppState` is everything the reducer mutates and the composer reads. The
//! panel itself (and any form it owns) lives inside the state machine.

use shelf_core::config::Variant;
use shelf_core::services::{Book, BookReviews, MemorySessionStore, SessionStore};
use shelf_core::{PanelKind, PanelStateMachine};

/// Catalog search box shown on the welcome and home panels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text being typed.
    pub query: String,
    /// Query most recently sent to the catalog; results for any other query
    /// are stale and dropped.
    pub submitted: Option<String>,
    /// Query the current results belong to.
    pub last_query: Option<String>,
    pub results: Vec<Book>,
    pub error: Option<String>,
    /// Ratings and reviews for `results` (book-review page only).
    pub reviews: Vec<BookReviews>,
    pub reviews_error: Option<String>,
    /// Keystrokes go to the search box instead of the panel shortcuts.
    pub focused: bool,
}

impl SearchState {
    pub fn is_pending(&self) -> bool {
        self.submitted.is_some()
    }

    /// True once a search has completed (even with zero hits).
    pub fn has_outcome(&self) -> bool {
        self.last_query.is_some()
    }

    pub fn reviews_for(&self, isbn: &str) -> Option<&BookReviews> {
        self.reviews.iter().find(|book| book.isbn() == isbn)
    }
}

/// Top-level state.
#[derive(Debug)]
pub struct AppState {
    pub machine: PanelStateMachine,
    pub variant: Variant,
    pub session: MemorySessionStore,
    pub search: SearchState,
    /// One-line message for the footer; cleared on the next key.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(variant: Variant) -> Self {
        Self {
            machine: PanelStateMachine::new(),
            variant,
            session: MemorySessionStore::new(),
            search: SearchState::default(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn panel_kind(&self) -> PanelKind {
        self.machine.kind()
    }

    /// Username of the signed-in account, if any.
    pub fn signed_in_as(&self) -> Option<&str> {
        self.session
            .current()
            .map(|session| session.account.username.as_str())
    }

    /// Panels that carry the catalog search box.
    pub fn has_search(&self) -> bool {
        matches!(
            self.panel_kind(),
            PanelKind::Welcome | PanelKind::GuestHome
        )
    }
}
