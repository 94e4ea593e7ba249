// crates/contact-book-web/src/lib.rs
// ============================================================================
// Module: Contact Book Web
// Description: HTTP server, routes, and HTML rendering for the contact book.
// Purpose: Serve the contact book as server-rendered pages and row fragments.
// Dependencies: contact-book-{core, config, store-sqlite}, axum, tokio
// ============================================================================

//! ## Overview
//! Contact book web binds the routes of the contact book to
//! [`contact_book_core::ContactRepository`] and renders full pages, row
//! fragments, and forms as HTML. Every request is recorded through an
//! [`HttpAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod render;
pub mod routes;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::HttpAuditEvent;
pub use audit::HttpAuditSink;
pub use audit::HttpOutcome;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use routes::CREATED_NOTICE;
pub use routes::DELETED_NOTICE;
pub use routes::EMAIL_IN_USE_MESSAGE;
pub use routes::MISSING_NOTICE;
pub use routes::UPDATED_NOTICE;
pub use server::ContactServer;
pub use server::ServerError;
pub use server::ServerState;
pub use server::build_router;
