// crates/contact-book-cli/src/lib.rs
// ============================================================================
// Module: Contact Book CLI Library
// Description: Shared helpers for the contact book command-line interface.
// Purpose: Provide the message catalog and seeding routines to the binary.
// Dependencies: contact-book-core, rand, thiserror
// ============================================================================

//! ## Overview
//! This library houses the pieces of the `contact-book` binary that are worth
//! testing on their own: the message catalog behind [`t!`](crate::t) and the synthetic
//! contact generator used by `contact-book seed`.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Message catalog and translation helpers.
pub mod i18n;
/// Synthetic contact generation and store seeding.
pub mod seed;
