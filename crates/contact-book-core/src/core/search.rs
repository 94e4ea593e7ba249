// crates/contact-book-core/src/core/search.rs
// ============================================================================
// Module: Search Term
// Description: The single contact match rule used by every store backend.
// Purpose: Keep paginated and unpaginated search on one matcher.
// Dependencies: crate::core::contact
// ============================================================================

//! ## Overview
//! A record matches a [`SearchTerm`] when any of its four text fields
//! contains the term as a case-sensitive substring. Store backends that
//! filter natively must reproduce exactly this rule.

use crate::core::contact::ContactField;
use crate::core::contact::ContactRecord;

/// A non-empty, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Builds a term from raw input; blank input yields `None` (no filter).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    /// Returns the term text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when any contact field contains the term.
    #[must_use]
    pub fn matches(&self, record: &ContactRecord) -> bool {
        ContactField::ALL.iter().any(|field| field_value(record, *field).contains(self.as_str()))
    }
}

/// Returns a record's value for a field.
fn field_value(record: &ContactRecord, field: ContactField) -> &str {
    match field {
        ContactField::FirstName => &record.first_name,
        ContactField::LastName => &record.last_name,
        ContactField::Email => &record.email,
        ContactField::PhoneNumber => &record.phone_number,
    }
}
