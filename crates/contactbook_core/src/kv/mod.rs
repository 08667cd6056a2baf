//! Key-value persistence slot contracts and implementations.
//!
//! # Responsibility
//! - Model the device-local key-value storage the contact snapshot lives in.
//! - Keep storage backends swappable behind one small trait.
//!
//! # Invariants
//! - `set_item` replaces the whole value for a key; there are no partial writes.
//! - A missing key reads as `Ok(None)`, never as an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Error raised by key-value storage backends.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend cannot serve requests right now (for example storage is full
    /// or revoked by the platform).
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "key-value storage unavailable: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Device-local string key-value storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()>;
    fn remove_item(&mut self, key: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        (**self).remove_item(key)
    }
}
