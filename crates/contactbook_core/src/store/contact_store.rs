//! Contact store: in-memory list mirrored to a persisted snapshot.
//!
//! # Responsibility
//! - Hydrate the contact list once from the snapshot at startup.
//! - Apply add/delete mutations and persist the full list after each one.
//! - Track search state and answer filtered projections.
//!
//! # Invariants
//! - No mutation is accepted before `load()` completes.
//! - Each successful mutation performs exactly one snapshot write; rejected
//!   mutations and search state changes perform none.
//! - Persistence failures never roll back in-memory state.
//! - `delete` is refused while a non-empty search query is active, since
//!   indexes refer to the unfiltered list.

use crate::kv::{KeyValueStore, KvError};
use crate::model::contact::{Contact, ContactValidationError};
use crate::search::name::{filter_by_name, filter_indexed_by_name};
use crate::snapshot::{decode_snapshot, encode_snapshot, SnapshotError, CONTACTS_KEY};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for contact store operations.
///
/// Every variant leaves the in-memory list exactly as it was.
#[derive(Debug)]
pub enum StoreError {
    /// A mutation or save was requested before `load()`.
    NotLoaded,
    /// `load()` was called a second time.
    AlreadyLoaded,
    Validation(ContactValidationError),
    /// Delete was requested while a non-empty search query is active.
    FilterActive,
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    Persist(KvError),
    Snapshot(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "contact store is not loaded yet"),
            Self::AlreadyLoaded => write!(f, "contact store is already loaded"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::FilterActive => write!(f, "cannot delete while a search filter is active"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "contact index {index} is out of range for {len} contact(s)")
            }
            Self::Persist(err) => write!(f, "failed to persist contacts: {err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persist(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::NotLoaded
            | Self::AlreadyLoaded
            | Self::FilterActive
            | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ContactValidationError> for StoreError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Persist(value)
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Result of the one-time startup load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot found and decoded.
    Restored { count: usize },
    /// No snapshot stored yet; the list starts empty.
    Missing,
    /// Snapshot could not be read or decoded; the list starts empty.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Uninitialized,
    Loaded,
}

/// Owner of the contact list and its persisted snapshot.
pub struct ContactStore<K: KeyValueStore> {
    kv: K,
    contacts: Vec<Contact>,
    search: Option<String>,
    state: LoadState,
}

impl<K: KeyValueStore> ContactStore<K> {
    /// Creates an unloaded, empty store over the given key-value slot.
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            contacts: Vec::new(),
            search: None,
            state: LoadState::Uninitialized,
        }
    }

    /// Hydrates the in-memory list from the persisted snapshot.
    ///
    /// Read and decode failures are logged and degrade to an empty list.
    ///
    /// # Errors
    /// - `AlreadyLoaded` when called more than once.
    pub fn load(&mut self) -> StoreResult<LoadOutcome> {
        if self.state == LoadState::Loaded {
            warn!("event=contacts_load module=store status=rejected reason=already_loaded");
            return Err(StoreError::AlreadyLoaded);
        }
        self.state = LoadState::Loaded;

        let raw = match self.kv.get_item(CONTACTS_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                info!("event=contacts_load module=store status=ok snapshot=missing count=0");
                return Ok(LoadOutcome::Missing);
            }
            Err(err) => {
                error!(
                    "event=contacts_load module=store status=error error_code=snapshot_read_failed error={}",
                    err
                );
                return Ok(LoadOutcome::Discarded);
            }
        };

        match decode_snapshot(&raw) {
            Ok(contacts) => {
                let count = contacts.len();
                self.contacts = contacts;
                info!(
                    "event=contacts_load module=store status=ok snapshot=restored count={}",
                    count
                );
                Ok(LoadOutcome::Restored { count })
            }
            Err(err) => {
                error!(
                    "event=contacts_load module=store status=error error_code=snapshot_decode_failed bytes={} error={}",
                    raw.len(),
                    err
                );
                Ok(LoadOutcome::Discarded)
            }
        }
    }

    /// Serializes the full list and overwrites the persisted snapshot.
    ///
    /// Mutations call this themselves; the returned error is informational.
    ///
    /// # Errors
    /// - `NotLoaded` before `load()`; saving then would clobber the snapshot.
    /// - `Snapshot`/`Persist` when encoding or writing fails.
    pub fn save(&mut self) -> StoreResult<()> {
        self.ensure_loaded("save")?;

        let result = encode_snapshot(&self.contacts)
            .map_err(StoreError::from)
            .and_then(|raw| {
                self.kv
                    .set_item(CONTACTS_KEY, &raw)
                    .map_err(StoreError::from)
            });

        match &result {
            Ok(()) => debug!(
                "event=contacts_save module=store status=ok count={}",
                self.contacts.len()
            ),
            Err(err) => error!(
                "event=contacts_save module=store status=error count={} error={}",
                self.contacts.len(),
                err
            ),
        }
        result
    }

    /// Appends a new contact after checking all fields are present.
    ///
    /// Returns the index of the new contact. No duplicate detection.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        number: impl Into<String>,
        email: impl Into<String>,
    ) -> StoreResult<usize> {
        self.ensure_loaded("add")?;

        let contact = Contact::new(name, number, email).map_err(|err| {
            warn!(
                "event=contact_add module=store status=rejected reason=validation error={}",
                err
            );
            StoreError::Validation(err)
        })?;

        self.contacts.push(contact);
        let index = self.contacts.len() - 1;
        info!(
            "event=contact_add module=store status=ok index={} count={}",
            index,
            self.contacts.len()
        );
        self.persist_after_mutation();
        Ok(index)
    }

    /// Removes the contact at `index` of the unfiltered list.
    ///
    /// Refused while a non-empty search query is active.
    pub fn delete(&mut self, index: usize) -> StoreResult<Contact> {
        self.ensure_loaded("delete")?;

        if self.is_filter_active() {
            warn!(
                "event=contact_delete module=store status=rejected reason=filter_active index={}",
                index
            );
            return Err(StoreError::FilterActive);
        }

        let len = self.contacts.len();
        if index >= len {
            warn!(
                "event=contact_delete module=store status=rejected reason=out_of_range index={} count={}",
                index, len
            );
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let removed = self.contacts.remove(index);
        info!(
            "event=contact_delete module=store status=ok index={} count={}",
            index,
            self.contacts.len()
        );
        self.persist_after_mutation();
        Ok(removed)
    }

    /// Read-only name projection; `None` is the explicit no-filter mode.
    pub fn filter(&self, query: Option<&str>) -> Vec<&Contact> {
        filter_by_name(&self.contacts, query)
    }

    /// Projection currently shown to the user, honoring search state.
    pub fn visible(&self) -> Vec<&Contact> {
        self.filter(self.search_query())
    }

    /// Visible contacts paired with their index in the unfiltered list.
    pub fn visible_indexed(&self) -> Vec<(usize, &Contact)> {
        filter_indexed_by_name(&self.contacts, self.search_query())
    }

    /// Opens the search box with an empty query. Keeps an existing query.
    pub fn open_search(&mut self) {
        if self.search.is_none() {
            self.search = Some(String::new());
        }
    }

    /// Replaces the active query, opening search if it was closed.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search = Some(query.into());
    }

    /// Closes the search box and drops the query.
    pub fn close_search(&mut self) {
        self.search = None;
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether a non-empty query currently narrows the visible list.
    pub fn is_filter_active(&self) -> bool {
        self.search.as_deref().is_some_and(|query| !query.is_empty())
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Underlying key-value slot.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn ensure_loaded(&self, operation: &'static str) -> StoreResult<()> {
        if self.is_loaded() {
            return Ok(());
        }
        warn!(
            "event=contact_{} module=store status=rejected reason=not_loaded",
            operation
        );
        Err(StoreError::NotLoaded)
    }

    fn persist_after_mutation(&mut self) {
        // Already logged by `save`; memory stays authoritative.
        let _ = self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactStore, LoadOutcome, StoreError};
    use crate::kv::{KeyValueStore, MemoryKeyValueStore};
    use crate::snapshot::CONTACTS_KEY;

    fn loaded_store() -> ContactStore<MemoryKeyValueStore> {
        let mut store = ContactStore::new(MemoryKeyValueStore::new());
        assert_eq!(store.load().unwrap(), LoadOutcome::Missing);
        store
    }

    #[test]
    fn load_does_not_write_snapshot() {
        let store = loaded_store();
        assert!(store.kv().get_item(CONTACTS_KEY).unwrap().is_none());
    }

    #[test]
    fn second_load_is_rejected_and_keeps_state() {
        let mut store = loaded_store();
        store.add("Ann", "123", "a@x.com").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::AlreadyLoaded));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn open_search_keeps_existing_query() {
        let mut store = loaded_store();
        store.set_search_query("an");
        store.open_search();
        assert_eq!(store.search_query(), Some("an"));

        store.close_search();
        store.open_search();
        assert_eq!(store.search_query(), Some(""));
        assert!(!store.is_filter_active());
    }

    #[test]
    fn visible_indexed_keeps_unfiltered_positions() {
        let mut store = loaded_store();
        store.add("Ann", "123", "a@x.com").unwrap();
        store.add("Bo", "456", "b@x.com").unwrap();
        store.add("Dana", "789", "d@x.com").unwrap();

        store.set_search_query("AN");
        let positions = store
            .visible_indexed()
            .into_iter()
            .map(|(index, contact)| (index, contact.name.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(positions, vec![(0, "Ann"), (2, "Dana")]);
    }

    #[test]
    fn validation_error_exposes_source() {
        let mut store = loaded_store();
        let err = store.add("Ann", "", "a@x.com").unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "contact number must not be empty");
    }
}
