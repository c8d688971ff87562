//! Reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects; nothing in this module talks to a
//! collaborator directly.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shelf_core::form::CredentialForm;
use shelf_core::services::{Account, Book, SessionStore};
use shelf_core::{Action, Panel, RemoteError};
use tracing::{debug, info, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::panels::{PanelUpdate, home, login, register, search, welcome};
use crate::state::{AppState, SearchState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(app, key)
        }
        UiEvent::Terminal(Event::Paste(text)) => {
            handle_paste(app, &text);
            vec![]
        }
        UiEvent::Terminal(_) => vec![],
        UiEvent::LoginFinished(result) => {
            handle_login_finished(app, result);
            vec![]
        }
        UiEvent::RegisterFinished(result) => {
            handle_register_finished(app, result);
            vec![]
        }
        UiEvent::SearchFinished { query, result } => handle_search_finished(app, query, result),
        UiEvent::ReviewsLoaded { query, result } => {
            if app.has_search() {
                search::apply_reviews(&mut app.search, &query, result);
            }
            vec![]
        }
    }
}

/// Applies catalog hits; on the book-review page, asks for their ratings
/// and reviews next.
fn handle_search_finished(
    app: &mut AppState,
    query: String,
    result: Result<Vec<Book>, RemoteError>,
) -> Vec<UiEffect> {
    if !app.has_search() || !search::apply_result(&mut app.search, query, result) {
        return vec![];
    }
    if !app.variant.shows_reviews() || app.search.results.is_empty() {
        return vec![];
    }
    let Some(query) = app.search.last_query.clone() else {
        return vec![];
    };
    let isbns = app
        .search
        .results
        .iter()
        .map(|book| book.isbn.clone())
        .collect();
    vec![UiEffect::LoadReviews { query, isbns }]
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    app.notice = None;

    let update = if app.search.focused && app.has_search() {
        search::handle_key(&mut app.search, key)
    } else {
        match app.machine.panel_mut() {
            Panel::Welcome => welcome::handle_key(&mut app.search, key),
            Panel::LoginForm(form) => login::handle_key(form, key),
            Panel::RegisterForm(form) => register::handle_key(form, key),
            Panel::GuestHome => home::handle_key(&mut app.search, key),
        }
    };

    apply_update(app, update)
}

fn apply_update(app: &mut AppState, update: PanelUpdate) -> Vec<UiEffect> {
    if let Some(action) = update.action {
        apply_action(app, action);
    }
    update.effects
}

/// Dispatches an action and applies what follows from the panel change.
fn apply_action(app: &mut AppState, action: Action) {
    let transition = app.machine.dispatch(action);
    if !transition.changed() {
        return;
    }
    app.search = SearchState::default();

    if action == Action::Logout
        && let Some(ended) = app.session.end()
    {
        app.notice = Some(format!("Signed out {}.", ended.account.username));
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    if app.search.focused && app.has_search() {
        app.search.query.push_str(&text);
        return;
    }
    match app.machine.panel_mut() {
        Panel::LoginForm(form) => paste_into(form, &text),
        Panel::RegisterForm(form) => paste_into(form, &text),
        Panel::Welcome | Panel::GuestHome => {}
    }
}

fn paste_into<F: CredentialForm>(form: &mut F, text: &str) {
    for c in text.chars() {
        form.push_char(c);
    }
}

fn handle_login_finished(app: &mut AppState, result: Result<Account, RemoteError>) {
    let Some(form) = app
        .machine
        .login_form_mut()
        .filter(|form| form.status().pending)
    else {
        debug!("login result dropped, no submission pending");
        return;
    };

    match result {
        Ok(account) => {
            form.status_mut().pending = false;
            info!(username = %account.username, "login succeeded");
            app.notice = Some(format!("Signed in as {}.", account.username));
            app.session.begin(account);
            apply_action(app, Action::LoginSucceeded);
        }
        Err(err) => {
            warn!(%err, "login failed");
            form.status_mut().fail(&err);
        }
    }
}

fn handle_register_finished(app: &mut AppState, result: Result<Account, RemoteError>) {
    let Some(form) = app
        .machine
        .register_form_mut()
        .filter(|form| form.status().pending)
    else {
        debug!("registration result dropped, no submission pending");
        return;
    };

    match result {
        Ok(account) => {
            form.status_mut().pending = false;
            info!(username = %account.username, "registration succeeded");
            apply_action(app, Action::RegisterSucceeded);
        }
        Err(err) => {
            warn!(%err, "registration failed");
            form.status_mut().fail(&err);
        }
    }
}
