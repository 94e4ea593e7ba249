// crates/contact-book-core/src/runtime/mod.rs
// ============================================================================
// Module: Contact Book Runtime
// Description: Contact repository, view selection, and the in-memory store.
// Purpose: Implement list, search, and mutation behavior over any store.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the behavior shared by every surface: the repository
//! that owns contact persistence and the selector that maps a request onto a
//! response shape. The HTTP layer only binds routes to these calls.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod repository;
pub mod store;
pub mod view;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use repository::ContactRepository;
pub use repository::DeleteOutcome;
pub use repository::RepositoryError;
pub use store::InMemoryContactStore;
pub use store::SharedContactStore;
pub use view::FRAGMENT_TRIGGER_HEADER;
pub use view::FRAGMENT_TRIGGER_IDS;
pub use view::FormMode;
pub use view::FormView;
pub use view::FragmentSignal;
pub use view::LOAD_MORE_TRIGGER_ID;
pub use view::ListView;
pub use view::SEARCH_TRIGGER_ID;
pub use view::select_list_view;
