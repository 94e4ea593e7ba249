// crates/contact-book-web/tests/common/mod.rs
// ============================================================================
// Module: Web Test Fixtures
// Description: Shared server and client helpers for HTTP route tests.
// Purpose: Run a real server on a loopback port over an in-memory store.
// Dependencies: contact-book-{core, config, web}, reqwest, tokio
// ============================================================================

//! ## Overview
//! Each test gets its own server bound to `127.0.0.1:0`, a client that does
//! not follow redirects, and a recording audit sink.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use contact_book_config::ContactBookConfig;
use contact_book_core::ContactFields;
use contact_book_core::ContactId;
use contact_book_core::ContactRecord;
use contact_book_core::ContactStore;
use contact_book_core::InMemoryContactStore;
use contact_book_core::SearchTerm;
use contact_book_core::SharedContactStore;
use contact_book_core::StoreError;
use contact_book_core::ValidContact;
use contact_book_web::ContactServer;
use contact_book_web::HttpAuditEvent;
use contact_book_web::HttpAuditSink;
use contact_book_web::ServerState;
use reqwest::Client;
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use url::form_urlencoded;

// ============================================================================
// SECTION: Audit Recorder
// ============================================================================

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<HttpAuditEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<HttpAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl HttpAuditSink for RecordingAuditSink {
    fn record(&self, event: &HttpAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// SECTION: Failing Store
// ============================================================================

/// Store whose every operation fails with a clone of one error.
pub struct FailingContactStore {
    error: StoreError,
}

impl FailingContactStore {
    pub const fn new(error: StoreError) -> Self {
        Self {
            error,
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(self.error.clone())
    }
}

impl ContactStore for FailingContactStore {
    fn count(&self, _filter: Option<&SearchTerm>) -> Result<u64, StoreError> {
        self.fail()
    }

    fn fetch(
        &self,
        _filter: Option<&SearchTerm>,
        _limit: u64,
        _offset: u64,
    ) -> Result<Vec<ContactRecord>, StoreError> {
        self.fail()
    }

    fn insert(&self, _contact: &ValidContact) -> Result<ContactRecord, StoreError> {
        self.fail()
    }

    fn get(&self, _id: ContactId) -> Result<Option<ContactRecord>, StoreError> {
        self.fail()
    }

    fn replace(
        &self,
        _id: ContactId,
        _contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, StoreError> {
        self.fail()
    }

    fn remove(&self, _id: ContactId) -> Result<bool, StoreError> {
        self.fail()
    }

    fn email_owners(&self, _email: &str) -> Result<Vec<ContactId>, StoreError> {
        self.fail()
    }
}

// ============================================================================
// SECTION: Test Server
// ============================================================================

/// Running server plus handles for inspecting it.
pub struct TestServer {
    pub base_url: String,
    pub state: Arc<ServerState>,
    pub audit: Arc<RecordingAuditSink>,
    pub client: Client,
}

/// Starts a server with the given page size and body limit.
pub async fn spawn_server_with(page_size: u32, max_body_bytes: usize) -> TestServer {
    let store = SharedContactStore::from_store(InMemoryContactStore::new());
    spawn_server_over(store, page_size, max_body_bytes).await
}

/// Starts a server over a store whose every call fails with `error`.
pub async fn spawn_failing_server(error: StoreError) -> TestServer {
    let store = SharedContactStore::from_store(FailingContactStore::new(error));
    spawn_server_over(store, 10, 64 * 1024).await
}

/// Starts a server over an arbitrary store.
pub async fn spawn_server_over(
    store: SharedContactStore,
    page_size: u32,
    max_body_bytes: usize,
) -> TestServer {
    let mut config = ContactBookConfig::default();
    config.pagination.page_size = page_size;
    config.server.max_body_bytes = max_body_bytes;
    let audit = Arc::new(RecordingAuditSink::default());
    let server = ContactServer::with_store(&config, store, audit.clone()).unwrap();
    let state = Arc::clone(server.state());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.serve_listener(listener).await;
    });
    let client = Client::builder().redirect(reqwest::redirect::Policy::none()).build().unwrap();
    TestServer {
        base_url: format!("http://{addr}"),
        state,
        audit,
        client,
    }
}

/// Starts a server with ten rows per page.
pub async fn spawn_server() -> TestServer {
    spawn_server_with(10, 64 * 1024).await
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Inserts a contact directly through the repository.
    pub fn seed(&self, first: &str, last: &str, email: &str) -> ContactRecord {
        let contact = ContactFields::new(first, last, email, "555-0100").validate().unwrap();
        self.state.repository().create(contact).unwrap()
    }

    /// Inserts `count` numbered contacts.
    pub fn seed_many(&self, count: usize) {
        for index in 0..count {
            self.seed(&format!("First{index}"), "Person", &format!("person{index}@example.com"));
        }
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn get_with_trigger(&self, path: &str, trigger: &str) -> Response {
        self.client.get(self.url(path)).header("HX-Trigger", trigger).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, pairs: &[(&str, &str)]) -> Response {
        let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish();
        self.client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }
}

/// Returns the redirect target of a response.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Counts contact rows in rendered HTML.
pub fn row_count(html: &str) -> usize {
    html.matches("<tr><td>").count()
}

/// Form body for a complete contact.
pub fn contact_form<'a>(first: &'a str, last: &'a str, email: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![("first_name", first), ("last_name", last), ("email", email), ("phone_number", "555-0199")]
}
