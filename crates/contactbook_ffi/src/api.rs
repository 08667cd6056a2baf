//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the contact list screen's use-cases to Dart via FRB.
//! - Own the process-wide contact store and serialize access to it.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call runs under one mutex, so snapshot writes complete in
//!   mutation order.
//! - Item `index` values always refer to the unfiltered list.

use contactbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Contact, ContactStore, SqliteKeyValueStore, StorageConfig, StoreError,
};
use log::error;
use once_cell::sync::OnceCell;
use std::sync::{Mutex, MutexGuard};

type SharedStore = ContactStore<SqliteKeyValueStore>;

static CONTACT_STORE: OnceCell<Mutex<SharedStore>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the contact list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    /// Position in the unfiltered list; pass back to `contacts_delete`.
    pub index: u32,
    pub name: String,
    pub number: String,
    pub email: String,
}

/// Current projection of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    /// Visible contacts (filtered while a search query is active).
    pub items: Vec<ContactItem>,
    /// `None` when the search box is closed.
    pub search_query: Option<String>,
    /// Whether delete actions should be disabled.
    pub filter_active: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl ContactListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            search_query: None,
            filter_active: false,
            message: message.into(),
        }
    }
}

/// Generic action response envelope for contact mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ContactActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Loads persisted contacts; call once at app start.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Repeated calls succeed without reloading.
/// - A corrupt snapshot still reports success with an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_load() -> ContactActionResponse {
    let result = with_contact_store(|store| match store.load() {
        Ok(outcome) => Ok(format!("Contacts loaded ({outcome:?}).")),
        Err(StoreError::AlreadyLoaded) => Ok("Contacts already loaded.".to_string()),
        Err(err) => Err(err.to_string()),
    });
    match result {
        Ok(message) => ContactActionResponse::success(message),
        Err(err) => ContactActionResponse::failure(format!("contacts_load failed: {err}")),
    }
}

/// Returns the visible contact list with current search state.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_list() -> ContactListResponse {
    match with_contact_store(|store| list_response(store)) {
        Ok(response) => response,
        Err(err) => ContactListResponse::failure(format!("contacts_list failed: {err}")),
    }
}

/// Adds a contact from the create form.
///
/// # FFI contract
/// - All three fields must be non-empty; otherwise `ok=false` and nothing
///   changes.
/// - Persists the full list before returning.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_add(name: String, number: String, email: String) -> ContactActionResponse {
    match with_contact_store(|store| store.add(name, number, email).map_err(|err| err.to_string()))
    {
        Ok(_) => ContactActionResponse::success("Contact saved."),
        Err(err) => ContactActionResponse::failure(format!("contacts_add failed: {err}")),
    }
}

/// Deletes the contact at `index` of the unfiltered list.
///
/// # FFI contract
/// - Refused with `ok=false` while a search query is non-empty.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_delete(index: u32) -> ContactActionResponse {
    let result = with_contact_store(|store| {
        store
            .delete(index as usize)
            .map(|_| ())
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(()) => ContactActionResponse::success("Contact deleted."),
        Err(err) => ContactActionResponse::failure(format!("contacts_delete failed: {err}")),
    }
}

/// Opens the search box; does not touch storage.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_search_open() -> ContactListResponse {
    update_search("contacts_search_open", |store| store.open_search())
}

/// Replaces the search query and returns the filtered list.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_search_set(query: String) -> ContactListResponse {
    update_search("contacts_search_set", move |store| {
        store.set_search_query(query)
    })
}

/// Closes the search box and returns the full list.
#[flutter_rust_bridge::frb(sync)]
pub fn contacts_search_close() -> ContactListResponse {
    update_search("contacts_search_close", |store| store.close_search())
}

fn update_search(operation: &str, apply: impl FnOnce(&mut SharedStore)) -> ContactListResponse {
    let result = with_contact_store(|store| {
        apply(store);
        list_response(store)
    });
    match result {
        Ok(response) => response,
        Err(err) => ContactListResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn list_response(store: &SharedStore) -> Result<ContactListResponse, String> {
    let items = store
        .visible_indexed()
        .into_iter()
        .map(|(index, contact)| to_contact_item(index, contact))
        .collect::<Result<Vec<_>, _>>()?;
    let message = if items.is_empty() {
        "No contacts.".to_string()
    } else {
        format!("{} contact(s).", items.len())
    };
    Ok(ContactListResponse {
        items,
        search_query: store.search_query().map(str::to_string),
        filter_active: store.is_filter_active(),
        message,
    })
}

/// Fails instead of truncating: a clamped index would address another row.
fn to_contact_item(index: usize, contact: &Contact) -> Result<ContactItem, String> {
    let index = u32::try_from(index)
        .map_err(|_| format!("contact index {index} exceeds the FFI index range"))?;
    Ok(ContactItem {
        index,
        name: contact.name.clone(),
        number: contact.number.clone(),
        email: contact.email.clone(),
    })
}

fn with_contact_store<T>(
    f: impl FnOnce(&mut SharedStore) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = lock_contact_store()?;
    f(&mut guard)
}

fn lock_contact_store() -> Result<MutexGuard<'static, SharedStore>, String> {
    let cell = CONTACT_STORE.get_or_try_init(|| {
        let config = StorageConfig::from_env();
        SqliteKeyValueStore::open(&config.db_path)
            .map(|kv| Mutex::new(ContactStore::new(kv)))
            .map_err(|err| {
                error!(
                    "event=store_open module=ffi status=error db_path={} error={}",
                    config.db_path.display(),
                    err
                );
                format!("contact DB open failed: {err}")
            })
    })?;
    cell.lock()
        .map_err(|_| "contact store lock poisoned".to_string())
}
