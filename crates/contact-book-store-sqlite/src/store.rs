// crates/contact-book-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Contact Store
// Description: Durable ContactStore backed by a single SQLite table.
// Purpose: Persist contacts with natural id ordering and fail-closed row mapping.
// Dependencies: contact-book-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements [`ContactStore`] over the `contacts` table. The
//! table layout is the on-disk contract and is never altered: opening a
//! database whose `contacts` columns differ is a version mismatch. Rows are
//! mapped through a typed step that rejects non-text values and non-positive
//! keys as corruption instead of coercing them.
//!
//! Search uses `instr(column, ?) > 0` on all four text columns, which is the
//! same case-sensitive substring rule as [`SearchTerm::matches`].

// ============================================================================//
// SECTION: Imports
// ============================================================================//

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use contact_book_core::ContactFields;
use contact_book_core::ContactId;
use contact_book_core::ContactRecord;
use contact_book_core::ContactStore;
use contact_book_core::SearchTerm;
use contact_book_core::StoreError;
use contact_book_core::ValidContact;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================//
// SECTION: Constants
// ============================================================================//

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Columns of the `contacts` table, in declaration order.
const CONTACT_COLUMNS: [&str; 5] = ["id", "first_name", "last_name", "email", "phone_number"];
/// Table definition for new databases.
const CREATE_CONTACTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone_number TEXT NOT NULL
);";
/// Filter clause matching the term `?1` against every text column.
const MATCH_CLAUSE: &str = "WHERE instr(first_name, ?1) > 0 OR instr(last_name, ?1) > 0 OR \
                            instr(email, ?1) > 0 OR instr(phone_number, ?1) > 0";

// ============================================================================//
// SECTION: Config
// ============================================================================//

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` contact store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Builds a config for `path` with default pragmas.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================//
// SECTION: Errors
// ============================================================================//

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Row does not map onto a contact record.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Existing `contacts` table has an unexpected layout.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store configuration or input.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Classifies a `rusqlite` error raised while reading a row.
fn row_error(err: &rusqlite::Error) -> SqliteStoreError {
    match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            SqliteStoreError::Corrupt(err.to_string())
        }
        _ => SqliteStoreError::Db(err.to_string()),
    }
}

// ============================================================================//
// SECTION: Store
// ============================================================================//

/// `SQLite`-backed contact store.
#[derive(Clone)]
pub struct SqliteContactStore {
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteContactStore {
    /// Opens an `SQLite`-backed contact store, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened, or
    /// when an existing `contacts` table has a different layout.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Deletes every contact and restarts identifier assignment at 1.
    ///
    /// Returns the number of removed rows.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the reset fails.
    pub fn reset(&self) -> Result<u64, SqliteStoreError> {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let removed = tx
            .execute("DELETE FROM contacts", params![])
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let has_sequence: bool = tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE name = 'sqlite_sequence')",
                params![],
                |row| row.get(0),
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if has_sequence {
            tx.execute("DELETE FROM sqlite_sequence WHERE name = 'contacts'", params![])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        u64::try_from(removed).map_err(|_| SqliteStoreError::Invalid("row count overflow".into()))
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Counts rows, optionally filtered.
    fn count_rows(&self, filter: Option<&SearchTerm>) -> Result<u64, SqliteStoreError> {
        let guard = self.lock()?;
        let count: i64 = match filter {
            Some(term) => guard.query_row(
                &format!("SELECT COUNT(*) FROM contacts {MATCH_CLAUSE}"),
                params![term.as_str()],
                |row| row.get(0),
            ),
            None => guard.query_row("SELECT COUNT(*) FROM contacts", params![], |row| row.get(0)),
        }
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        u64::try_from(count)
            .map_err(|_| SqliteStoreError::Corrupt(format!("negative row count: {count}")))
    }

    /// Reads one window of rows in ascending id order.
    fn fetch_rows(
        &self,
        filter: Option<&SearchTerm>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ContactRecord>, SqliteStoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let guard = self.lock()?;
        let records = match filter {
            Some(term) => {
                let sql = format!(
                    "SELECT id, first_name, last_name, email, phone_number FROM contacts \
                     {MATCH_CLAUSE} ORDER BY id LIMIT ?2 OFFSET ?3"
                );
                collect_records(&guard, &sql, params![term.as_str(), limit, offset])
            }
            None => collect_records(
                &guard,
                "SELECT id, first_name, last_name, email, phone_number FROM contacts ORDER BY id \
                 LIMIT ?1 OFFSET ?2",
                params![limit, offset],
            ),
        };
        drop(guard);
        records
    }

    /// Inserts a row and reads back its key.
    fn insert_row(&self, contact: &ValidContact) -> Result<ContactRecord, SqliteStoreError> {
        let fields = contact.fields();
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO contacts (first_name, last_name, email, phone_number) VALUES (?1, \
                 ?2, ?3, ?4)",
                params![fields.first_name, fields.last_name, fields.email, fields.phone_number],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let key = guard.last_insert_rowid();
        drop(guard);
        let id = ContactId::from_store_key(key)
            .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid assigned id: {key}")))?;
        Ok(contact.with_id(id))
    }

    /// Loads a single row.
    fn get_row(&self, id: ContactId) -> Result<Option<ContactRecord>, SqliteStoreError> {
        let key = store_key(id)?;
        let guard = self.lock()?;
        let row = guard
            .query_row(
                "SELECT id, first_name, last_name, email, phone_number FROM contacts WHERE id = ?1",
                params![key],
                read_row,
            )
            .optional()
            .map_err(|err| row_error(&err))?;
        drop(guard);
        row.map(into_record).transpose()
    }

    /// Overwrites all four text columns of a row.
    fn replace_row(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, SqliteStoreError> {
        let key = store_key(id)?;
        let fields = contact.fields();
        let guard = self.lock()?;
        let changed = guard
            .execute(
                "UPDATE contacts SET first_name = ?1, last_name = ?2, email = ?3, phone_number = \
                 ?4 WHERE id = ?5",
                params![fields.first_name, fields.last_name, fields.email, fields.phone_number, key],
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok((changed > 0).then(|| contact.with_id(id)))
    }

    /// Deletes a row.
    fn remove_row(&self, id: ContactId) -> Result<bool, SqliteStoreError> {
        let key = store_key(id)?;
        let guard = self.lock()?;
        let removed = guard
            .execute("DELETE FROM contacts WHERE id = ?1", params![key])
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(removed > 0)
    }

    /// Lists ids whose email matches exactly.
    fn email_owner_rows(&self, email: &str) -> Result<Vec<ContactId>, SqliteStoreError> {
        let guard = self.lock()?;
        let mut statement = guard
            .prepare("SELECT id FROM contacts WHERE email = ?1 ORDER BY id")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let keys = statement
            .query_map(params![email], |row| row.get::<_, i64>(0))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| row_error(&err))?;
        drop(statement);
        drop(guard);
        keys.into_iter()
            .map(|key| {
                ContactId::from_store_key(key)
                    .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid contact id: {key}")))
            })
            .collect()
    }
}

impl ContactStore for SqliteContactStore {
    fn count(&self, filter: Option<&SearchTerm>) -> Result<u64, StoreError> {
        self.count_rows(filter).map_err(StoreError::from)
    }

    fn fetch(
        &self,
        filter: Option<&SearchTerm>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<ContactRecord>, StoreError> {
        self.fetch_rows(filter, limit, offset).map_err(StoreError::from)
    }

    fn insert(&self, contact: &ValidContact) -> Result<ContactRecord, StoreError> {
        self.insert_row(contact).map_err(StoreError::from)
    }

    fn get(&self, id: ContactId) -> Result<Option<ContactRecord>, StoreError> {
        self.get_row(id).map_err(StoreError::from)
    }

    fn replace(
        &self,
        id: ContactId,
        contact: &ValidContact,
    ) -> Result<Option<ContactRecord>, StoreError> {
        self.replace_row(id, contact).map_err(StoreError::from)
    }

    fn remove(&self, id: ContactId) -> Result<bool, StoreError> {
        self.remove_row(id).map_err(StoreError::from)
    }

    fn email_owners(&self, email: &str) -> Result<Vec<ContactId>, StoreError> {
        self.email_owner_rows(email).map_err(StoreError::from)
    }
}

// ============================================================================//
// SECTION: Row Mapping
// ============================================================================//

/// Raw column values of one `contacts` row.
type RawRow = (i64, String, String, String, String);

/// Reads the five columns with strict typing.
fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

/// Maps raw columns onto a record, rejecting non-positive keys.
fn into_record(raw: RawRow) -> Result<ContactRecord, SqliteStoreError> {
    let (key, first_name, last_name, email, phone_number) = raw;
    let id = ContactId::from_store_key(key)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("invalid contact id: {key}")))?;
    Ok(ContactRecord::from_fields(
        id,
        ContactFields {
            first_name,
            last_name,
            email,
            phone_number,
        },
    ))
}

/// Runs a row query and maps every row.
fn collect_records(
    connection: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<ContactRecord>, SqliteStoreError> {
    let mut statement =
        connection.prepare(sql).map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let rows = statement
        .query_map(params, read_row)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| row_error(&err))?;
    rows.into_iter().map(into_record).collect()
}

/// Converts an identifier into an `SQLite` integer key.
fn store_key(id: ContactId) -> Result<i64, SqliteStoreError> {
    i64::try_from(id.get())
        .map_err(|_| SqliteStoreError::Invalid(format!("contact id out of range: {id}")))
}

// ============================================================================//
// SECTION: Helpers
// ============================================================================//

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.exists() && path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Creates the `contacts` table or validates an existing one.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch(CREATE_CONTACTS_TABLE)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let columns = {
        let mut statement = tx
            .prepare("SELECT name FROM pragma_table_info('contacts') ORDER BY cid")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        statement
            .query_map(params![], |row| row.get::<_, String>(0))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?
    };
    if columns != CONTACT_COLUMNS {
        return Err(SqliteStoreError::VersionMismatch(format!(
            "unexpected contacts columns: {}",
            columns.join(", ")
        )));
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}
