// crates/contact-book-core/src/runtime/repository.rs
// ============================================================================
// Module: Contact Repository
// Description: Paginated, search-aware CRUD over a contact store.
// Purpose: Be the sole owner of contact reads and writes.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! [`ContactRepository`] turns [`ContactStore`] primitives into the list,
//! search, and mutation operations the HTTP layer uses. Page arithmetic is
//! delegated to [`PageRequest`] and filtering to [`SearchTerm`], so listing
//! and searching share one window rule and one match rule.
//!
//! ## Invariants
//! - `SearchPage::total` counts the whole match set regardless of the window.
//! - `update` on a missing identifier is [`RepositoryError::NotFound`].
//! - `delete` never fails for a missing identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ContactId;
use crate::core::ContactRecord;
use crate::core::PageRequest;
use crate::core::SearchPage;
use crate::core::SearchTerm;
use crate::core::ValidContact;
use crate::interfaces::ContactStore;
use crate::interfaces::StoreError;
use crate::runtime::store::SharedContactStore;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contact repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record has the identifier.
    #[error("contact not found: {0}")]
    NotFound(ContactId),
    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of an idempotent delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A record was removed.
    Deleted,
    /// No record had the identifier.
    Absent,
}

// ============================================================================
// SECTION: Repository
// ============================================================================

/// Paginated, search-aware contact repository.
#[derive(Debug, Clone)]
pub struct ContactRepository<S = SharedContactStore> {
    /// Backing store.
    store: S,
}

impl<S: ContactStore> ContactRepository<S> {
    /// Creates a repository over a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Lists every contact, one window at a time.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the store fails.
    pub fn list(&self, request: PageRequest) -> Result<SearchPage, RepositoryError> {
        self.window(None, request)
    }

    /// Lists contacts matching `term`, one window at a time.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the store fails.
    pub fn search(
        &self,
        term: &SearchTerm,
        request: PageRequest,
    ) -> Result<SearchPage, RepositoryError> {
        self.window(Some(term), request)
    }

    /// Lists or searches depending on a raw, possibly blank query.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the store fails.
    pub fn query(
        &self,
        raw_term: Option<&str>,
        request: PageRequest,
    ) -> Result<SearchPage, RepositoryError> {
        match raw_term.and_then(SearchTerm::parse) {
            Some(term) => self.search(&term, request),
            None => self.list(request),
        }
    }

    /// Inserts a contact and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the insert fails.
    pub fn create(&self, contact: ValidContact) -> Result<ContactRecord, RepositoryError> {
        Ok(self.store.insert(&contact)?)
    }

    /// Loads a contact; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the lookup fails.
    pub fn find(&self, id: ContactId) -> Result<Option<ContactRecord>, RepositoryError> {
        Ok(self.store.get(id)?)
    }

    /// Replaces all four fields of a contact.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the identifier is unknown
    /// and [`RepositoryError::Store`] when the update fails.
    pub fn update(
        &self,
        id: ContactId,
        contact: ValidContact,
    ) -> Result<ContactRecord, RepositoryError> {
        self.store.replace(id, &contact)?.ok_or(RepositoryError::NotFound(id))
    }

    /// Deletes a contact if present.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the delete fails.
    pub fn delete(&self, id: ContactId) -> Result<DeleteOutcome, RepositoryError> {
        if self.store.remove(id)? { Ok(DeleteOutcome::Deleted) } else { Ok(DeleteOutcome::Absent) }
    }

    /// Returns true when a record other than `id` has exactly this email.
    ///
    /// Stored emails are trimmed, so the candidate is trimmed before lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Store`] when the lookup fails.
    pub fn email_conflict(&self, id: ContactId, email: &str) -> Result<bool, RepositoryError> {
        Ok(self.store.email_owners(email.trim())?.into_iter().any(|owner| owner != id))
    }

    /// Counts matches and fetches one window.
    fn window(
        &self,
        filter: Option<&SearchTerm>,
        request: PageRequest,
    ) -> Result<SearchPage, RepositoryError> {
        let total = self.store.count(filter)?;
        let records = if request.offset() >= total {
            Vec::new()
        } else {
            self.store.fetch(filter, request.limit(), request.offset())?
        };
        Ok(SearchPage::new(request, records, total))
    }
}
