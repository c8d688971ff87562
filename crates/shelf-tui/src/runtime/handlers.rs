//! Effect handlers.
//!
//! Each handler calls one collaborator and turns its answer into the
//! `UiEvent` the reducer expects. Handlers never touch `AppState`.

use anyhow::Result;
use shelf_core::config::{AuthBackend, Config};
use shelf_core::services::{
    AuthService, CatalogSearchService, LoggingAuthService, MemoryAuthService, MemoryReviews,
    ReviewService,
};
use shelf_core::{LoginPayload, RegisterPayload};
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;

/// The collaborators effects are executed against.
pub struct Services {
    pub auth: Box<dyn AuthService>,
    pub catalog: Box<dyn CatalogSearchService>,
    pub reviews: Box<dyn ReviewService>,
}

impl Services {
    /// Auth and catalog, with an empty review store.
    pub fn new(auth: Box<dyn AuthService>, catalog: Box<dyn CatalogSearchService>) -> Self {
        Self {
            auth,
            catalog,
            reviews: Box::new(MemoryReviews::default()),
        }
    }

    #[must_use]
    pub fn with_reviews(mut self, reviews: Box<dyn ReviewService>) -> Self {
        self.reviews = reviews;
        self
    }

    /// Builds the configured auth backend, catalog and review store.
    ///
    /// # Errors
    /// Returns an error if the configured catalog file or reviews directory
    /// cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self> {
        let auth: Box<dyn AuthService> = match config.auth_backend {
            AuthBackend::Logging => Box::new(LoggingAuthService),
            AuthBackend::Memory => Box::new(MemoryAuthService::new()),
        };
        let catalog = config.catalog()?;
        let reviews = config.reviews()?;
        if catalog.is_empty() {
            warn!("catalog has no books, every search will come back empty");
        }
        debug!(
            backend = ?config.auth_backend,
            books = catalog.len(),
            limit = catalog.limit(),
            reviews = reviews.review_count(),
            "services ready"
        );
        Ok(Self::new(auth, Box::new(catalog)).with_reviews(Box::new(reviews)))
    }

    /// Executes one effect, returning the event carrying its result.
    ///
    /// `Quit` has no collaborator and yields nothing; the runtime handles it.
    pub fn execute(&mut self, effect: UiEffect) -> Option<UiEvent> {
        match effect {
            UiEffect::Quit => None,
            UiEffect::Login(payload) => Some(login(self.auth.as_mut(), &payload)),
            UiEffect::Register(payload) => Some(register(self.auth.as_mut(), &payload)),
            UiEffect::Search { query } => Some(search(self.catalog.as_ref(), query)),
            UiEffect::LoadReviews { query, isbns } => {
                Some(reviews(self.reviews.as_ref(), query, &isbns))
            }
        }
    }
}

pub fn login(auth: &mut dyn AuthService, payload: &LoginPayload) -> UiEvent {
    let result = auth.login(payload);
    if let Err(err) = &result {
        warn!(%err, identifier = %payload.identifier, "auth service rejected login");
    }
    UiEvent::LoginFinished(result)
}

pub fn register(auth: &mut dyn AuthService, payload: &RegisterPayload) -> UiEvent {
    let result = auth.register(payload);
    if let Err(err) = &result {
        warn!(%err, username = %payload.username, "auth service rejected registration");
    }
    UiEvent::RegisterFinished(result)
}

pub fn search(catalog: &dyn CatalogSearchService, query: String) -> UiEvent {
    let result = catalog.search(&query);
    match &result {
        Ok(books) => debug!(%query, hits = books.len(), "catalog search"),
        Err(err) => warn!(%err, %query, "catalog search failed"),
    }
    UiEvent::SearchFinished { query, result }
}

/// Looks up every ISBN; the first failure fails the whole batch.
pub fn reviews(store: &dyn ReviewService, query: String, isbns: &[String]) -> UiEvent {
    let result = isbns
        .iter()
        .map(|isbn| store.lookup(isbn))
        .collect::<Result<Vec<_>, _>>();
    match &result {
        Ok(found) => debug!(%query, books = found.len(), "reviews loaded"),
        Err(err) => warn!(%err, %query, "review lookup failed"),
    }
    UiEvent::ReviewsLoaded { query, result }
}
