// crates/contact-book-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Contact Store
// Description: Durable ContactStore backend using SQLite.
// Purpose: Persist contacts in the single `contacts` table on disk.
// Dependencies: contact-book-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`ContactStore`] implementation over
//! one `contacts` table with an auto-incrementing key and four non-null text
//! columns. Existing databases with that table are opened as-is; rows that do
//! not map onto a contact fail closed as corruption.
//!
//! [`ContactStore`]: contact_book_core::ContactStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteContactStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
