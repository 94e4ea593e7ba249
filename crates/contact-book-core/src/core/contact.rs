// crates/contact-book-core/src/core/contact.rs
// ============================================================================
// Module: Contact Record Model
// Description: Contact entity, submission fields, and field validation.
// Purpose: Define the single record shape shared by stores, repository, and views.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A contact is an identifier plus four required text fields. Submissions
//! arrive as [`ContactFields`] (raw, possibly invalid) and are promoted to
//! [`ValidContact`] only through [`ContactFields::validate`]. Repository
//! writes accept [`ValidContact`], so unvalidated input cannot reach a store.
//!
//! ## Invariants
//! - [`ContactId`] is always >= 1 and assigned by the store.
//! - [`ValidContact`] fields are never empty after trimming.
//! - [`FieldErrors`] carries exactly one slot per [`ContactField`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier
// ============================================================================

/// Store-assigned contact identifier.
///
/// # Invariants
/// - Always >= 1 (non-zero); never reused within a store lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(NonZeroU64);

impl ContactId {
    /// Creates a contact identifier from a raw value (returns `None` if zero).
    #[must_use]
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Creates a contact identifier from a signed store key.
    ///
    /// Returns `None` for zero or negative keys.
    #[must_use]
    pub fn from_store_key(key: i64) -> Option<Self> {
        u64::try_from(key).ok().and_then(Self::from_raw)
    }

    /// Parses a path segment such as `"42"` into an identifier.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        segment.trim().parse::<u64>().ok().and_then(Self::from_raw)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// The four recognized contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Email address.
    Email,
    /// Phone number.
    PhoneNumber,
}

impl ContactField {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::PhoneNumber];

    /// Returns the stable wire name used by forms and error maps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
        }
    }
}

/// Raw contact values as submitted or as loaded for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone_number: String,
}

impl ContactFields {
    /// Builds a field set from string-like values.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Returns the value for a single field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::PhoneNumber => &self.phone_number,
        }
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    fn trimmed(&self) -> Self {
        Self::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
            self.phone_number.trim(),
        )
    }

    /// Validates the submission.
    ///
    /// Accepted values are stored trimmed; rejected values are returned as
    /// submitted.
    ///
    /// # Errors
    ///
    /// Returns the original values together with a [`FieldErrors`] map when
    /// any field is empty or the email is malformed.
    pub fn validate(self) -> Result<ValidContact, InvalidContact> {
        let mut errors = FieldErrors::default();
        for field in ContactField::ALL {
            if self.get(field).trim().is_empty() {
                errors.set(field, format!("{} is required", field.label()));
            }
        }
        if errors.get(ContactField::Email).is_empty() && !is_well_formed_email(self.email.trim()) {
            errors.set(ContactField::Email, "Email must be a valid email address");
        }
        if errors.is_empty() {
            Ok(ValidContact {
                fields: self.trimmed(),
            })
        } else {
            Err(InvalidContact {
                values: self,
                errors,
            })
        }
    }
}

/// A rejected submission: the values as submitted plus per-field messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidContact {
    /// Submitted values, unchanged.
    pub values: ContactFields,
    /// Per-field error messages.
    pub errors: FieldErrors,
}

/// Contact fields that passed validation.
///
/// # Invariants
/// - Only constructible through [`ContactFields::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    /// Validated values.
    fields: ContactFields,
}

impl ValidContact {
    /// Returns the validated field values.
    #[must_use]
    pub const fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Attaches a store identifier to produce a full record.
    #[must_use]
    pub fn with_id(&self, id: ContactId) -> ContactRecord {
        ContactRecord::from_fields(id, self.fields.clone())
    }
}

// ============================================================================
// SECTION: Field Errors
// ============================================================================

/// Per-field validation messages; an empty string means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    /// Message for `first_name`.
    pub first_name: String,
    /// Message for `last_name`.
    pub last_name: String,
    /// Message for `email`.
    pub email: String,
    /// Message for `phone_number`.
    pub phone_number: String,
}

impl FieldErrors {
    /// Returns the message slot for a field.
    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::PhoneNumber => &self.phone_number,
        }
    }

    /// Replaces the message slot for a field.
    pub fn set(&mut self, field: ContactField, message: impl Into<String>) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::PhoneNumber => &mut self.phone_number,
        };
        *slot = message.into();
    }

    /// Returns true when no field carries a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        ContactField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

// ============================================================================
// SECTION: Record
// ============================================================================

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Store-assigned identifier.
    pub id: ContactId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
}

impl ContactRecord {
    /// Builds a record from an identifier and field values.
    #[must_use]
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone_number: fields.phone_number,
        }
    }

    /// Returns a copy of the four text fields.
    #[must_use]
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    /// Returns `"First Last"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks the `local@domain.tld` shape without resolving anything.
fn is_well_formed_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.find('.') {
        Some(dot) => dot > 0 && !domain.ends_with('.'),
        None => false,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
