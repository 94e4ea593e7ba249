// crates/contact-book-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI Message Catalog Tests
// Description: Tests for catalog lookup and placeholder substitution.
// Purpose: Ensure CLI messages render deterministically.
// Dependencies: contact-book-cli
// ============================================================================

//! ## Overview
//! Validates catalog lookup, fallback to the key, and placeholder substitution.

use crate::i18n::MessageArg;
use crate::i18n::translate;
use crate::t;

#[test]
fn translate_substitutes_placeholders() {
    let message = translate(
        "seed.ok",
        vec![MessageArg::new("count", "12"), MessageArg::new("path", "contacts.sqlite")],
    );
    assert_eq!(message, "Inserted 12 contacts into contacts.sqlite.");
}

#[test]
fn missing_key_falls_back_to_key() {
    assert_eq!(translate("nope.missing", Vec::new()), "nope.missing");
}

#[test]
fn macro_formats_display_values() {
    let message = t!("serve.listening", bind = "127.0.0.1:3000");
    assert_eq!(message, "Contact book listening on http://127.0.0.1:3000/contacts");
    assert_eq!(t!("config.validate.ok"), "Config valid.");
}

#[test]
fn unused_placeholders_stay_visible() {
    let message = t!("config.load_failed");
    assert_eq!(message, "Failed to load config: {error}");
}
