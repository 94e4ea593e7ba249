// crates/contact-book-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the `config example` command.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for contact book configuration. The output parses and
//! validates with [`crate::ContactBookConfig::from_bytes`].

/// Returns a canonical example `contact-book.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:3000"
max_body_bytes = 65536
# allow_non_loopback = false

[store]
type = "sqlite"
path = "contacts.sqlite"
journal_mode = "wal"
sync_mode = "full"
busy_timeout_ms = 5000

[pagination]
page_size = 10

[audit]
enabled = true
# path = "contact-book-audit.jsonl"
"#,
    )
}
