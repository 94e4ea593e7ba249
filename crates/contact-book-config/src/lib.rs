// crates/contact-book-config/src/lib.rs
// ============================================================================
// Module: Contact Book Config Library
// Description: Canonical config model, validation, and example generation.
// Purpose: Single source of truth for contact-book.toml semantics.
// Dependencies: contact-book-core, contact-book-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `contact-book-config` defines the configuration model for the contact
//! book server. Loading is strict and fail-closed: oversized, non-UTF-8, or
//! malformed files are rejected, and [`ContactBookConfig::validate`] checks
//! cross-field rules before anything is opened or bound.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
