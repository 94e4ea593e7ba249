// crates/contact-book-cli/src/seed.rs
// ============================================================================
// Module: Contact Seeding
// Description: Synthetic contact generation for demo and load data.
// Purpose: Fill a store with plausible contacts through the repository.
// Dependencies: contact-book-core, rand, thiserror
// ============================================================================

//! ## Overview
//! [`synthetic_contact`] draws a first and last name from fixed pools and
//! derives the email from them; phone numbers are random North American
//! style numbers. [`seed_contacts`] inserts generated contacts through
//! [`ContactRepository`], so seeded rows pass the same validation as rows
//! created over HTTP.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contact_book_core::ContactField;
use contact_book_core::ContactFields;
use contact_book_core::ContactRecord;
use contact_book_core::ContactRepository;
use contact_book_core::ContactStore;
use contact_book_core::FieldErrors;
use contact_book_core::RepositoryError;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default number of contacts inserted by `contact-book seed`.
pub const DEFAULT_SEED_COUNT: u32 = 300;

/// Given-name pool.
const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Beatrice", "Carlos", "Chen", "Dmitri", "Elena", "Farah", "Grace",
    "Hiro", "Ines", "Jamal", "Katya", "Liam", "Mei", "Nadia", "Omar", "Priya", "Quinn", "Rosa",
    "Sven", "Tariq", "Uma", "Viktor", "Wen", "Ximena", "Yusuf", "Zara",
];

/// Family-name pool.
const LAST_NAMES: &[&str] = &[
    "Abara", "Becker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hopper", "Ivanova",
    "Johnson", "Kowalski", "Lovelace", "Moreau", "Nakamura", "Okafor", "Patel", "Quispe",
    "Rossi", "Silva", "Turing", "Umarov", "Varga", "Wong", "Yilmaz", "Zhang",
];

/// Email domain pool.
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Seeding errors.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A generated contact failed validation.
    #[error("generated contact rejected: {0}")]
    Rejected(String),
    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// ============================================================================
// SECTION: Generation
// ============================================================================

/// Generates one synthetic contact.
pub fn synthetic_contact<R: Rng + ?Sized>(rng: &mut R) -> ContactFields {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ada");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Lovelace");
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
    let tag: u16 = rng.gen_range(1..1000);
    let email = format!("{}.{}{tag}@{domain}", first.to_lowercase(), last.to_lowercase());
    let phone = format!(
        "({:03}) {:03}-{:04}",
        rng.gen_range(200..1000_u16),
        rng.gen_range(200..1000_u16),
        rng.gen_range(0..10_000_u16)
    );
    ContactFields::new(first, last, email, phone)
}

/// Inserts `count` synthetic contacts and returns the stored records.
///
/// # Errors
///
/// Returns [`SeedError`] when a contact is rejected or the store fails.
pub fn seed_contacts<S: ContactStore, R: Rng + ?Sized>(
    repository: &ContactRepository<S>,
    count: u32,
    rng: &mut R,
) -> Result<Vec<ContactRecord>, SeedError> {
    let mut inserted = Vec::new();
    for _ in 0..count {
        let contact = synthetic_contact(rng)
            .validate()
            .map_err(|rejected| SeedError::Rejected(rejection_summary(&rejected.errors)))?;
        inserted.push(repository.create(contact)?);
    }
    Ok(inserted)
}

/// Joins the non-empty field messages.
fn rejection_summary(errors: &FieldErrors) -> String {
    ContactField::ALL
        .iter()
        .map(|field| errors.get(*field))
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
