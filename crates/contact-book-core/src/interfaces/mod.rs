// crates/contact-book-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contact Book Interfaces
// Description: Backend-agnostic contact storage contract.
// Purpose: Define the store surface used by the contact repository.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`ContactStore`] is the only seam between the repository and durable
//! storage. Implementations must return rows in ascending identifier order,
//! apply [`SearchTerm::matches`] semantics exactly when filtering, and fail
//! closed with [`StoreError::Corrupt`] on rows that do not map onto
//! [`ContactRecord`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ContactId;
use crate::core::ContactRecord;
use crate::core::SearchTerm;
use crate::core::ValidContact;

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Contact store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("contact store io error: {0}")]
    Io(String),
    /// Database engine reported an error.
    #[error("contact store db error: {0}")]
    Db(String),
    /// Stored row does not match the contact record shape.
    #[error("contact store corruption: {0}")]
    Corrupt(String),
    /// Stored schema is incompatible.
    #[error("contact store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store input or configuration is invalid.
    #[error("contact store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("contact store error: {0}")]
    Store(String),
}

// ============================================================================
// SECTION: Contact Store
// ============================================================================

/// Durable keyed contact storage.
pub trait ContactStore: Send + Sync {
    /// Counts records matching the optional filter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the count cannot be computed.
    fn count(&self, filter: Option<&SearchTerm>) -> Result<u64, StoreError>;

    /// Fetches a window of matching records in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when rows cannot be read or mapped.
    fn fetch(
        &self,
        filter: Option<&SearchTerm>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ContactRecord>, StoreError>;

    /// Inserts a record and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn insert(&self, contact: &ValidContact) -> Result<ContactRecord, StoreError>;

    /// Loads a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn get(&self, id: ContactId) -> Result<Option<ContactRecord>, StoreError>;

    /// Replaces all four fields of an existing record.
    ///
    /// Returns `None` when no record has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the update fails.
    fn replace(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, StoreError>;

    /// Removes a record; returns false when nothing was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the delete fails.
    fn remove(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Returns identifiers of every record whose email equals `email` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn email_owners(&self, email: &str) -> Result<Vec<ContactId>, StoreError>;
}
