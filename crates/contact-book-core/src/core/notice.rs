// crates/contact-book-core/src/core/notice.rs
// ============================================================================
// Module: Notice Queue
// Description: Transient user-facing messages shown once on the next full page.
// Purpose: Carry "push now, drain on next render" notices across a redirect.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Handlers push notices after a mutation; the next full-page render drains
//! them. Draining takes every buffered notice under one lock acquisition, so
//! a notice is rendered at most once even when requests race.
//!
//! ## Invariants
//! - [`NoticeQueue::drain_all`] returns notices in push order and leaves the
//!   queue empty.
//! - Pushes that race with a drain land either in that drain or the next one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::MutexGuard;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// An action completed.
    Success,
    /// An action failed or was refused.
    Error,
}

impl NoticeKind {
    /// Returns a stable label for CSS classes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A single transient message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Message text.
    pub text: String,
}

impl Notice {
    /// Builds a success notice.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    /// Builds an error notice.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

// ============================================================================
// SECTION: Queue
// ============================================================================

/// Write-once, drain-once notice buffer.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    /// Buffered notices in push order.
    notices: Mutex<Vec<Notice>>,
}

impl NoticeQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notice.
    pub fn push(&self, notice: Notice) {
        self.lock().push(notice);
    }

    /// Appends a success notice.
    pub fn success(&self, text: impl Into<String>) {
        self.push(Notice::success(text));
    }

    /// Appends an error notice.
    pub fn error(&self, text: impl Into<String>) {
        self.push(Notice::error(text));
    }

    /// Removes and returns every buffered notice.
    #[must_use]
    pub fn drain_all(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of buffered notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Locks the buffer; a poisoned lock still guards a consistent `Vec`.
    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
