// crates/contact-book-core/src/lib.rs
// ============================================================================
// Module: Contact Book Core Library
// Description: Public API surface for the contact book core.
// Purpose: Expose core types, the store interface, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Contact book core owns the contact record model, paginated search-aware
//! persistence through [`ContactRepository`], the drain-once [`NoticeQueue`],
//! and the view selector that decides between full pages and row fragments.
//! It performs no HTTP or file I/O; storage arrives through [`ContactStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ContactStore;
pub use interfaces::StoreError;
pub use runtime::ContactRepository;
pub use runtime::DeleteOutcome;
pub use runtime::FRAGMENT_TRIGGER_HEADER;
pub use runtime::FRAGMENT_TRIGGER_IDS;
pub use runtime::FormMode;
pub use runtime::FormView;
pub use runtime::FragmentSignal;
pub use runtime::InMemoryContactStore;
pub use runtime::LOAD_MORE_TRIGGER_ID;
pub use runtime::ListView;
pub use runtime::RepositoryError;
pub use runtime::SEARCH_TRIGGER_ID;
pub use runtime::SharedContactStore;
pub use runtime::select_list_view;
