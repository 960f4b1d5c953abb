//! Repositories over the shared key-value store.
//!
//! Each repository owns its in-memory list and writes the whole list back
//! through [`LocalStore`] after every mutation. Storage failures are logged
//! and swallowed so a broken store degrades to in-memory operation.
//!
//! [`LocalStore`]: crate::storage::LocalStore

mod accounts;
mod consultations;
mod pets;

pub use accounts::*;
pub use consultations::*;
pub use pets::*;

use serde::Serialize;

use crate::storage::LocalStore;

/// Encode `value` as JSON and write it under `key`, logging failures.
pub(crate) fn save_json<T: Serialize>(store: &LocalStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to encode {}: {}", key, err);
            return;
        }
    };
    if let Err(err) = store.save(key, &json) {
        log::error!("failed to persist {}: {}", key, err);
    }
}

/// Read the raw string under `key`; a store error reads as absent.
pub(crate) fn load_raw(store: &LocalStore, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(value) => value,
        Err(err) => {
            log::error!("failed to read {}: {}", key, err);
            None
        }
    }
}
