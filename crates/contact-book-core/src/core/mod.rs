// crates/contact-book-core/src/core/mod.rs
// ============================================================================
// Module: Contact Book Core Types
// Description: Contact records, pagination windows, search terms, and notices.
// Purpose: Provide the stable value types shared by stores, routes, and views.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types are plain values with no I/O. Stores, the repository, and the
//! HTTP layer all speak in these types, so the record shape and the page
//! arithmetic are defined exactly once.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod contact;
pub mod notice;
pub mod page;
pub mod search;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contact::ContactField;
pub use contact::ContactFields;
pub use contact::ContactId;
pub use contact::ContactRecord;
pub use contact::FieldErrors;
pub use contact::InvalidContact;
pub use contact::ValidContact;
pub use notice::Notice;
pub use notice::NoticeKind;
pub use notice::NoticeQueue;
pub use page::DEFAULT_PAGE_SIZE;
pub use page::PageRequest;
pub use page::SearchPage;
pub use page::total_pages;
pub use search::SearchTerm;
