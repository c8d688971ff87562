//! Collaborators the landing page talks to.
//!
//! The panel machine and forms never perform I/O themselves. Submissions
//! and searches are handed to these traits by the TUI runtime, and results
//! come back as events.
//!
//! - `auth.rs`: `AuthService` (login, register) and its implementations
//! - `catalog.rs`: `CatalogSearchService` and the in-memory catalog
//! - `reviews.rs`: `ReviewService`, read-only reviews and average ratings
//! - `session.rs`: `SessionStore` for the signed-in account

pub mod auth;
pub mod catalog;
pub mod reviews;
pub mod session;

pub use auth::{Account, AuthService, LoggingAuthService, MemoryAuthService};
pub use catalog::{Book, CatalogSearchService, MemoryCatalog};
pub use reviews::{BookReviews, MemoryReviews, RatingSummary, Review, ReviewService};
pub use session::{MemorySessionStore, Session, SessionStore};
