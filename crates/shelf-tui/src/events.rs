//! UI event types.
//!
//! Everything the reducer reacts to: raw terminal input plus the results of
//! effects the runtime executed on its behalf.

use crossterm::event::Event;
use shelf_core::RemoteError;
use shelf_core::services::{Account, Book, BookReviews};

#[derive(Debug)]
pub enum UiEvent {
    /// Raw crossterm input (keys, resize, paste).
    Terminal(Event),

    /// Auth service answered a login submission.
    LoginFinished(Result<Account, RemoteError>),

    /// Auth service answered a registration.
    RegisterFinished(Result<Account, RemoteError>),

    /// Catalog answered a search.
    SearchFinished {
        query: String,
        result: Result<Vec<Book>, RemoteError>,
    },

    /// Review service answered for the hits of `query`.
    ReviewsLoaded {
        query: String,
        result: Result<Vec<BookReviews>, RemoteError>,
    },
}
