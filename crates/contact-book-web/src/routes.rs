// crates/contact-book-web/src/routes.rs
// ============================================================================
// Module: Contact Routes
// Description: HTTP handlers binding verbs and paths to repository calls.
// Purpose: Keep handlers thin over the repository and the view selector.
// Dependencies: contact-book-core, axum, serde, tokio
// ============================================================================

//! ## Overview
//! Handlers parse the request, call [`contact_book_core::ContactRepository`],
//! pick a response shape, and render it. Every response that carries the page
//! layout drains the notice queue exactly once; row fragments, redirects, and
//! plain-text probes leave it untouched.
//!
//! Validation failures re-render the form with HTTP 200. Missing records are a
//! 404 page. Store failures are a 500 page and are never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Form;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use contact_book_core::ContactFields;
use contact_book_core::ContactId;
use contact_book_core::DeleteOutcome;
use contact_book_core::FRAGMENT_TRIGGER_HEADER;
use contact_book_core::FormMode;
use contact_book_core::FormView;
use contact_book_core::FragmentSignal;
use contact_book_core::PageRequest;
use contact_book_core::RepositoryError;
use contact_book_core::StoreError;
use contact_book_core::select_list_view;
use serde::Deserialize;

use crate::render;
use crate::server::ServerState;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Notice pushed after a successful create.
pub const CREATED_NOTICE: &str = "Created new contact!";
/// Notice pushed after a successful update.
pub const UPDATED_NOTICE: &str = "Updated contact!";
/// Notice pushed after a delete that removed a record.
pub const DELETED_NOTICE: &str = "Deleted contact!";
/// Notice pushed when a delete targets a missing record.
pub const MISSING_NOTICE: &str = "Contact not found";
/// Advisory returned by the email probe when another record shares the email.
pub const EMAIL_IN_USE_MESSAGE: &str = "This email is already in use by another contact";

// ============================================================================
// SECTION: Response Labels
// ============================================================================

/// Response extension read by the audit middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseLabel {
    /// Rendered response shape.
    pub shape: &'static str,
    /// Error kind for failed requests.
    pub error_kind: Option<&'static str>,
}

/// Attaches a shape label to a response.
fn labelled(shape: &'static str, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response.extensions_mut().insert(ResponseLabel {
        shape,
        error_kind: None,
    });
    response
}

// ============================================================================
// SECTION: Query Types
// ============================================================================

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Raw search term.
    #[serde(default)]
    pub q: Option<String>,
    /// Raw 1-based page number.
    #[serde(default)]
    pub page: Option<String>,
}

/// Email probe query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    /// Candidate email; the stored email is used when absent.
    #[serde(default)]
    pub email: Option<String>,
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// `GET /`
pub async fn index() -> Response {
    labelled("redirect", Redirect::to("/contacts"))
}

/// `GET /contacts?q=&page=`
pub async fn list_contacts(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let trigger = headers.get(FRAGMENT_TRIGGER_HEADER).and_then(|value| value.to_str().ok());
    let signal = FragmentSignal::from_trigger(trigger);
    let request = PageRequest::from_query(query.page.as_deref(), state.page_size);
    let result = run_blocking(|| state.repository.query(query.q.as_deref(), request));
    let page = match result {
        Ok(page) => page,
        Err(err) => return server_error(&state, &err),
    };
    let view = select_list_view(signal, query.q.as_deref(), page);
    let notices = if view.drains_notices() { state.notices.drain_all() } else { Vec::new() };
    labelled(view.shape(), Html(render::list_view(&view, &notices)))
}

/// `GET /contacts/new`
pub async fn new_contact_form(State(state): State<Arc<ServerState>>) -> Response {
    form_response(&state, &FormView::blank())
}

/// `POST /contacts/new`
pub async fn create_contact(
    State(state): State<Arc<ServerState>>,
    Form(fields): Form<ContactFields>,
) -> Response {
    let contact = match fields.validate() {
        Ok(contact) => contact,
        Err(rejected) => {
            return form_response(&state, &FormView::with_errors(FormMode::Create, rejected));
        }
    };
    match run_blocking(|| state.repository.create(contact)) {
        Ok(_) => {
            state.notices.success(CREATED_NOTICE);
            labelled("redirect", Redirect::to("/contacts"))
        }
        Err(err) => server_error(&state, &err),
    }
}

/// `GET /contacts/{id}`
pub async fn view_contact(
    State(state): State<Arc<ServerState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = ContactId::parse(&raw_id) else {
        return not_found_page(&state);
    };
    match run_blocking(|| state.repository.find(id)) {
        Ok(Some(record)) => {
            let notices = state.notices.drain_all();
            labelled("full_page", Html(render::contact_page(&record, &notices)))
        }
        Ok(None) => not_found_page(&state),
        Err(err) => server_error(&state, &err),
    }
}

/// `GET /contacts/{id}/edit`
pub async fn edit_contact_form(
    State(state): State<Arc<ServerState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let Some(id) = ContactId::parse(&raw_id) else {
        return not_found_page(&state);
    };
    match run_blocking(|| state.repository.find(id)) {
        Ok(Some(record)) => form_response(&state, &FormView::for_record(&record)),
        Ok(None) => not_found_page(&state),
        Err(err) => server_error(&state, &err),
    }
}

/// `POST /contacts/{id}/edit`
pub async fn update_contact(
    State(state): State<Arc<ServerState>>,
    Path(raw_id): Path<String>,
    Form(fields): Form<ContactFields>,
) -> Response {
    let Some(id) = ContactId::parse(&raw_id) else {
        return not_found_page(&state);
    };
    let contact = match fields.validate() {
        Ok(contact) => contact,
        Err(rejected) => {
            return form_response(&state, &FormView::with_errors(FormMode::Edit(id), rejected));
        }
    };
    match run_blocking(|| state.repository.update(id, contact)) {
        Ok(record) => {
            state.notices.success(UPDATED_NOTICE);
            labelled("redirect", Redirect::to(&format!("/contacts/{}", record.id)))
        }
        Err(RepositoryError::NotFound(_)) => not_found_page(&state),
        Err(err) => server_error(&state, &err),
    }
}

/// `DELETE /contacts/{id}`
pub async fn delete_contact(
    State(state): State<Arc<ServerState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let outcome = match ContactId::parse(&raw_id) {
        Some(id) => match run_blocking(|| state.repository.delete(id)) {
            Ok(outcome) => outcome,
            Err(err) => return server_error(&state, &err),
        },
        None => DeleteOutcome::Absent,
    };
    match outcome {
        DeleteOutcome::Deleted => state.notices.success(DELETED_NOTICE),
        DeleteOutcome::Absent => state.notices.error(MISSING_NOTICE),
    }
    labelled("redirect", Redirect::to("/contacts"))
}

/// `GET /contacts/{id}/email?email=`
pub async fn email_probe(
    State(state): State<Arc<ServerState>>,
    Path(raw_id): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Response {
    let Some(id) = ContactId::parse(&raw_id) else {
        return labelled("text", (StatusCode::NOT_FOUND, MISSING_NOTICE));
    };
    let result = run_blocking(|| -> Result<Option<bool>, RepositoryError> {
        let email = match query.email {
            Some(email) => email,
            None => match state.repository.find(id)? {
                Some(record) => record.email,
                None => return Ok(None),
            },
        };
        state.repository.email_conflict(id, &email).map(Some)
    });
    match result {
        Ok(Some(true)) => labelled("text", EMAIL_IN_USE_MESSAGE),
        Ok(Some(false)) => labelled("text", String::new()),
        Ok(None) => labelled("text", (StatusCode::NOT_FOUND, MISSING_NOTICE)),
        Err(err) => {
            let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "contact store error")
                .into_response();
            response.extensions_mut().insert(ResponseLabel {
                shape: "text",
                error_kind: Some(error_kind(&err)),
            });
            response
        }
    }
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<Arc<ServerState>>) -> Response {
    not_found_page(&state)
}

// ============================================================================
// SECTION: Response Helpers
// ============================================================================

/// Renders a form page, draining notices.
fn form_response(state: &ServerState, form: &FormView) -> Response {
    let notices = state.notices.drain_all();
    let shape = if form.has_errors() { "form_errors" } else { "form" };
    labelled(shape, Html(render::form_page(form, &notices)))
}

/// Renders the 404 page, draining notices.
fn not_found_page(state: &ServerState) -> Response {
    let notices = state.notices.drain_all();
    labelled("not_found", (StatusCode::NOT_FOUND, Html(render::not_found_page(&notices))))
}

/// Renders the 500 page, draining notices.
fn server_error(state: &ServerState, err: &RepositoryError) -> Response {
    let notices = state.notices.drain_all();
    let mut response =
        (StatusCode::INTERNAL_SERVER_ERROR, Html(render::server_error_page(&notices)))
            .into_response();
    response.extensions_mut().insert(ResponseLabel {
        shape: "server_error",
        error_kind: Some(error_kind(err)),
    });
    response
}

/// Maps repository errors to stable audit labels.
const fn error_kind(err: &RepositoryError) -> &'static str {
    match err {
        RepositoryError::NotFound(_) => "not_found",
        RepositoryError::Store(StoreError::Io(_)) => "store_io",
        RepositoryError::Store(StoreError::Db(_)) => "store_db",
        RepositoryError::Store(StoreError::Corrupt(_)) => "store_corrupt",
        RepositoryError::Store(StoreError::VersionMismatch(_)) => "store_version_mismatch",
        RepositoryError::Store(StoreError::Invalid(_)) => "store_invalid",
        RepositoryError::Store(StoreError::Store(_)) => "store",
    }
}

/// Runs a synchronous store call, shifting to a blocking context when available.
fn run_blocking<T>(call: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}
