// crates/contact-book-core/src/runtime/store.rs
// ============================================================================
// Module: Contact Book In-Memory Store
// Description: In-memory contact store and the shared store wrapper.
// Purpose: Provide a deterministic store for tests, demos, and `type = "memory"`.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryContactStore`] keeps records in a `BTreeMap` keyed by identifier,
//! so iteration order is ascending identifier order, matching the natural
//! row order of the SQLite backend. Identifiers come from a monotonic
//! counter and are never reused, even after deletes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::core::ContactId;
use crate::core::ContactRecord;
use crate::core::SearchTerm;
use crate::core::ValidContact;
use crate::interfaces::ContactStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable state guarded by the store mutex.
#[derive(Debug)]
struct MemoryState {
    /// Records keyed by identifier.
    records: BTreeMap<ContactId, ContactRecord>,
    /// Next identifier to assign.
    next_id: u64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory contact store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContactStore {
    /// Store state protected by a mutex.
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryContactStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store state.
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Store("contact store mutex poisoned".to_string()))
    }
}

impl ContactStore for InMemoryContactStore {
    fn count(&self, filter: Option<&SearchTerm>) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let count = guard.records.values().filter(|record| passes(filter, record)).count();
        drop(guard);
        u64::try_from(count).map_err(|_| StoreError::Invalid("record count overflow".to_string()))
    }

    fn fetch(
        &self,
        filter: Option<&SearchTerm>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ContactRecord>, StoreError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let guard = self.lock()?;
        Ok(guard
            .records
            .values()
            .filter(|record| passes(filter, record))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    fn insert(&self, contact: &ValidContact) -> Result<ContactRecord, StoreError> {
        let mut guard = self.lock()?;
        let id = ContactId::from_raw(guard.next_id)
            .ok_or_else(|| StoreError::Store("contact id counter exhausted".to_string()))?;
        guard.next_id = guard
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Store("contact id counter exhausted".to_string()))?;
        let record = contact.with_id(id);
        guard.records.insert(id, record.clone());
        drop(guard);
        Ok(record)
    }

    fn get(&self, id: ContactId) -> Result<Option<ContactRecord>, StoreError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    fn replace(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, StoreError> {
        let mut guard = self.lock()?;
        let Some(slot) = guard.records.get_mut(&id) else {
            return Ok(None);
        };
        *slot = contact.with_id(id);
        Ok(Some(slot.clone()))
    }

    fn remove(&self, id: ContactId) -> Result<bool, StoreError> {
        Ok(self.lock()?.records.remove(&id).is_some())
    }

    fn email_owners(&self, email: &str) -> Result<Vec<ContactId>, StoreError> {
        let guard = self.lock()?;
        Ok(guard
            .records
            .values()
            .filter(|record| record.email == email)
            .map(|record| record.id)
            .collect())
    }
}

/// Applies the optional filter.
fn passes(filter: Option<&SearchTerm>, record: &ContactRecord) -> bool {
    filter.is_none_or(|term| term.matches(record))
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared contact store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedContactStore {
    /// Inner store implementation.
    inner: Arc<dyn ContactStore>,
}

impl SharedContactStore {
    /// Wraps a contact store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ContactStore + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for SharedContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedContactStore").finish_non_exhaustive()
    }
}

impl ContactStore for SharedContactStore {
    fn count(&self, filter: Option<&SearchTerm>) -> Result<u64, StoreError> {
        self.inner.count(filter)
    }

    fn fetch(
        &self,
        filter: Option<&SearchTerm>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ContactRecord>, StoreError> {
        self.inner.fetch(filter, limit, offset)
    }

    fn insert(&self, contact: &ValidContact) -> Result<ContactRecord, StoreError> {
        self.inner.insert(contact)
    }

    fn get(&self, id: ContactId) -> Result<Option<ContactRecord>, StoreError> {
        self.inner.get(id)
    }

    fn replace(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, StoreError> {
        self.inner.replace(id, contact)
    }

    fn remove(&self, id: ContactId) -> Result<bool, StoreError> {
        self.inner.remove(id)
    }

    fn email_owners(&self, email: &str) -> Result<Vec<ContactId>, StoreError> {
        self.inner.email_owners(email)
    }
}
