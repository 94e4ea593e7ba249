// crates/contact-book-web/src/server.rs
// ============================================================================
// Module: Contact Book HTTP Server
// Description: Server bootstrap, shared state, router, and audit middleware.
// Purpose: Serve the contact book over HTTP from validated configuration.
// Dependencies: contact-book-{core, config, store-sqlite}, axum, tokio
// ============================================================================

//! ## Overview
//! [`ContactServer`] builds the contact store, the audit sink, and the shared
//! [`ServerState`] from [`ContactBookConfig`], then serves the route table
//! from [`build_router`]. The notice queue lives in the server state and is
//! handed to the render path explicitly; there is no process-global state.
//! Request bodies are capped at `server.max_body_bytes`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use contact_book_config::AuditConfig;
use contact_book_config::ContactBookConfig;
use contact_book_config::StoreType;
use contact_book_core::ContactRepository;
use contact_book_core::InMemoryContactStore;
use contact_book_core::NoticeQueue;
use contact_book_core::SharedContactStore;
use contact_book_store_sqlite::SqliteContactStore;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::audit::FileAuditSink;
use crate::audit::HttpAuditEvent;
use crate::audit::HttpAuditEventParams;
use crate::audit::HttpAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::routes;
use crate::routes::ResponseLabel;

// ============================================================================
// SECTION: Server State
// ============================================================================

/// State shared by every request handler.
pub struct ServerState {
    /// Contact repository.
    pub(crate) repository: ContactRepository,
    /// Pending notices, drained by the next full-page render.
    pub(crate) notices: NoticeQueue,
    /// Rows per listing page.
    pub(crate) page_size: u32,
    /// Request audit sink.
    pub(crate) audit: Arc<dyn HttpAuditSink>,
}

impl ServerState {
    /// Builds server state over a store.
    #[must_use]
    pub fn new(store: SharedContactStore, page_size: u32, audit: Arc<dyn HttpAuditSink>) -> Self {
        Self {
            repository: ContactRepository::new(store),
            notices: NoticeQueue::new(),
            page_size: page_size.max(1),
            audit,
        }
    }

    /// Returns the contact repository.
    #[must_use]
    pub const fn repository(&self) -> &ContactRepository {
        &self.repository
    }

    /// Returns the pending notice queue.
    #[must_use]
    pub const fn notices(&self) -> &NoticeQueue {
        &self.notices
    }
}

// ============================================================================
// SECTION: Contact Server
// ============================================================================

/// Contact book HTTP server instance.
pub struct ContactServer {
    /// Validated bind address.
    bind: SocketAddr,
    /// Maximum accepted request body size.
    max_body_bytes: usize,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl ContactServer {
    /// Builds a server from configuration, opening the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid or the store or
    /// audit sink cannot be opened.
    pub fn from_config(config: &ContactBookConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let store = build_contact_store(config)?;
        let audit = build_audit_sink(&config.audit)?;
        Self::with_store(config, store, audit)
    }

    /// Builds a server from configuration over an already-open store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] when configuration is invalid.
    pub fn with_store(
        config: &ContactBookConfig,
        store: SharedContactStore,
        audit: Arc<dyn HttpAuditSink>,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let state = Arc::new(ServerState::new(store, config.pagination.page_size, audit));
        Ok(Self {
            bind,
            max_body_bytes: config.server.max_body_bytes,
            state,
        })
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Returns the shared handler state.
    #[must_use]
    pub const fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Builds the route table for this server.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state), self.max_body_bytes)
    }

    /// Binds the configured address and serves requests.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        self.serve_listener(listener).await
    }

    /// Serves requests on an already-bound listener.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the server fails.
    pub async fn serve_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let app = self.router();
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the contact book route table over shared state.
#[must_use]
pub fn build_router(state: Arc<ServerState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/contacts", get(routes::list_contacts))
        .route("/contacts/new", get(routes::new_contact_form).post(routes::create_contact))
        .route("/contacts/{id}", get(routes::view_contact).delete(routes::delete_contact))
        .route(
            "/contacts/{id}/edit",
            get(routes::edit_contact_form).post(routes::update_contact),
        )
        .route("/contacts/{id}/email", get(routes::email_probe))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(Arc::clone(&state), audit_requests))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

// ============================================================================
// SECTION: Middleware
// ============================================================================

/// Records one audit event per request.
async fn audit_requests(
    State(state): State<Arc<ServerState>>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let label = response.extensions().get::<ResponseLabel>().copied();
    let event = HttpAuditEvent::new(HttpAuditEventParams {
        method,
        path,
        status: response.status(),
        shape: label.map(|label| label.shape),
        error_kind: label.and_then(|label| label.error_kind),
        latency_ms: started.elapsed().as_millis(),
    });
    state.audit.record(&event);
    response
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Opens the configured contact store.
fn build_contact_store(config: &ContactBookConfig) -> Result<SharedContactStore, ServerError> {
    match config.store.store_type {
        StoreType::Memory => Ok(SharedContactStore::from_store(InMemoryContactStore::new())),
        StoreType::Sqlite => {
            let sqlite = config
                .store
                .sqlite()
                .ok_or_else(|| ServerError::Init("sqlite store config missing".to_string()))?;
            let store = SqliteContactStore::new(&sqlite)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(SharedContactStore::from_store(store))
        }
    }
}

/// Builds the configured audit sink.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn HttpAuditSink>, ServerError> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contact server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}
