// crates/contact-book-core/tests/repository.rs
// ============================================================================
// Module: Contact Repository Tests
// Description: List, search, and CRUD behavior over the in-memory store.
// Purpose: Validate windowing, totals, full replace, and idempotent delete.
// Dependencies: contact-book-core
// ============================================================================

//! ## Overview
//! Exercises the contact repository end to end through the in-memory store.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use contact_book_core::ContactFields;
use contact_book_core::ContactId;
use contact_book_core::ContactRepository;
use contact_book_core::DeleteOutcome;
use contact_book_core::InMemoryContactStore;
use contact_book_core::PageRequest;
use contact_book_core::RepositoryError;
use contact_book_core::SearchTerm;
use contact_book_core::SharedContactStore;
use contact_book_core::ValidContact;

fn contact(first: &str, last: &str, email: &str, phone: &str) -> ValidContact {
    ContactFields::new(first, last, email, phone).validate().unwrap()
}

fn numbered(index: usize) -> ValidContact {
    contact(
        &format!("First{index}"),
        &format!("Last{index}"),
        &format!("user{index}@example.com"),
        &format!("555-{index:04}"),
    )
}

fn repository_with(count: usize) -> ContactRepository {
    let repository =
        ContactRepository::new(SharedContactStore::from_store(InMemoryContactStore::new()));
    for index in 0 .. count {
        repository.create(numbered(index)).unwrap();
    }
    repository
}

#[test]
fn empty_store_lists_nothing() {
    let page = repository_with(0).list(PageRequest::new(1, 10)).unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next());
}

#[test]
fn twenty_five_rows_paginate_into_three_pages() {
    let repository = repository_with(25);
    let last = repository.list(PageRequest::new(3, 10)).unwrap();
    assert_eq!(last.records.len(), 5);
    assert_eq!(last.total, 25);
    assert_eq!(last.total_pages, 3);
    assert_eq!(last.records[0].first_name, "First20");
    assert!(last.next_page().is_none());

    let first = repository.list(PageRequest::new(1, 10)).unwrap();
    assert_eq!(first.records.len(), 10);
    assert_eq!(first.next_page(), Some(2));
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let page = repository_with(5).list(PageRequest::new(9, 10)).unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn page_zero_is_clamped_to_first_page() {
    let page = repository_with(3).list(PageRequest::new(0, 2)).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.records.len(), 2);
}

#[test]
fn search_matches_any_field_and_counts_all_matches() {
    let repository = repository_with(0);
    repository.create(contact("Grace", "Hopper", "grace@navy.mil", "555-1111")).unwrap();
    repository.create(contact("Ada", "Lovelace", "ada@example.com", "555-2222")).unwrap();
    repository.create(contact("Alan", "Turing", "alan@navy.mil", "555-3333")).unwrap();
    repository.create(contact("Edsger", "Dijkstra", "ed@example.com", "555-2299")).unwrap();

    let by_email = SearchTerm::parse("navy").unwrap();
    let page = repository.search(&by_email, PageRequest::new(1, 1)).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].first_name, "Grace");

    let by_phone = SearchTerm::parse("555-22").unwrap();
    let page = repository.search(&by_phone, PageRequest::new(1, 10)).unwrap();
    assert_eq!(page.total, 2);

    let by_last = SearchTerm::parse("Turing").unwrap();
    assert_eq!(repository.search(&by_last, PageRequest::new(1, 10)).unwrap().total, 1);
}

#[test]
fn search_is_case_sensitive() {
    let repository = repository_with(0);
    repository.create(contact("Ada", "Lovelace", "ada@example.com", "555-2222")).unwrap();
    let lower = SearchTerm::parse("lovelace").unwrap();
    assert_eq!(repository.search(&lower, PageRequest::new(1, 10)).unwrap().total, 0);
}

#[test]
fn blank_query_behaves_like_list() {
    let repository = repository_with(12);
    let listed = repository.list(PageRequest::new(2, 10)).unwrap();
    let queried = repository.query(Some("   "), PageRequest::new(2, 10)).unwrap();
    assert_eq!(listed, queried);
    assert_eq!(repository.query(None, PageRequest::new(2, 10)).unwrap(), listed);
}

#[test]
fn create_then_find_round_trips() {
    let repository = repository_with(0);
    let input = contact("Ada", "Lovelace", "ada@example.com", "555-0100");
    let created = repository.create(input.clone()).unwrap();
    let found = repository.find(created.id).unwrap().expect("record exists");
    assert_eq!(found, input.with_id(created.id));
}

#[test]
fn update_replaces_every_field_and_keeps_id() {
    let repository = repository_with(0);
    let created = repository.create(contact("Ada", "Lovelace", "ada@example.com", "1")).unwrap();
    let replacement = contact("Augusta", "King", "augusta@example.com", "2");
    let updated = repository.update(created.id, replacement.clone()).unwrap();
    assert_eq!(updated, replacement.with_id(created.id));
    assert_eq!(repository.find(created.id).unwrap(), Some(updated));
}

#[test]
fn update_missing_contact_reports_not_found() {
    let repository = repository_with(0);
    let missing = ContactId::from_raw(42).unwrap();
    let err = repository.update(missing, numbered(1)).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(id) if id == missing));
    assert!(repository.find(missing).unwrap().is_none());
}

#[test]
fn delete_is_idempotent() {
    let repository = repository_with(2);
    let id = ContactId::from_raw(1).unwrap();
    assert_eq!(repository.delete(id).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(repository.delete(id).unwrap(), DeleteOutcome::Absent);
    assert!(repository.find(id).unwrap().is_none());
    assert_eq!(repository.list(PageRequest::new(1, 10)).unwrap().total, 1);
}

#[test]
fn identifiers_are_not_reused_after_delete() {
    let repository = repository_with(2);
    repository.delete(ContactId::from_raw(2).unwrap()).unwrap();
    let created = repository.create(numbered(9)).unwrap();
    assert_eq!(created.id.get(), 3);
}

#[test]
fn email_conflict_ignores_the_record_itself() {
    let repository = repository_with(0);
    let first = repository.create(contact("A", "One", "shared@example.com", "1")).unwrap();
    let second = repository.create(contact("B", "Two", "shared@example.com", "2")).unwrap();
    let third = repository.create(contact("C", "Three", "unique@example.com", "3")).unwrap();

    assert!(repository.email_conflict(first.id, &first.email).unwrap());
    assert!(repository.email_conflict(second.id, &second.email).unwrap());
    assert!(!repository.email_conflict(third.id, &third.email).unwrap());
    assert!(!repository.email_conflict(first.id, "SHARED@example.com").unwrap());
}

#[test]
fn padded_emails_still_conflict() {
    let repository = repository_with(0);
    let padded = repository.create(contact("Ann", "One", "  ann@example.com ", "1")).unwrap();
    let plain = repository.create(contact("Ann", "Two", "ann@example.com", "2")).unwrap();

    assert_eq!(padded.email, "ann@example.com");
    assert!(repository.email_conflict(padded.id, &padded.email).unwrap());
    assert!(repository.email_conflict(plain.id, " ann@example.com").unwrap());
}
