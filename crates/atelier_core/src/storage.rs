//! Key-value persistence seam used by the store.
//!
//! Each persisted slice is an independent JSON document under a well-known
//! key. The store never fails on a bad slice: a read that cannot be parsed
//! degrades to the slice's default and logs a warning.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Slice key holding the hidden project ids.
pub const HIDDEN_PROJECTS_KEY: &str = "hidden-projects";
/// Slice key holding the hidden blog ids (project ids or article ids).
pub const HIDDEN_BLOGS_KEY: &str = "hidden-blogs";
/// Slice key holding the review collection, seeded on first run.
pub const CUSTOM_REVIEWS_KEY: &str = "custom-reviews";
/// Slice key holding admin-created articles.
pub const CUSTOM_ARTICLES_KEY: &str = "custom-articles";
/// Slice key holding the opaque admin session flag.
pub const AUTH_KEY: &str = "auth";

/// Synchronous key-value storage for the persisted slices.
///
/// Implementations log and degrade on IO failure rather than surfacing
/// errors; store state never depends on a write having succeeded.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Outcome of reading one persisted slice.
#[derive(Debug)]
pub(crate) enum SliceRead<T> {
    /// The key has never been written.
    Absent,
    /// The key exists but its payload did not parse.
    Malformed,
    Loaded(T),
}

pub(crate) fn read_slice<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> SliceRead<T> {
    let Some(raw) = storage.get(key) else {
        return SliceRead::Absent;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => SliceRead::Loaded(value),
        Err(err) => {
            warn!("Discarding malformed slice {key:?}: {err}");
            SliceRead::Malformed
        }
    }
}

pub(crate) fn write_slice<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(encoded) => storage.set(key, &encoded),
        Err(err) => warn!("Failed to encode slice {key:?}: {err}"),
    }
}

/// In-memory storage backend.
///
/// Clones share one underlying map, so a test (or a second store, to
/// exercise the last-writer-wins behaviour of concurrent sessions) can
/// observe writes made through another handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, e.g. to simulate a previous session.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .expect("storage mutex")
            .insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("storage mutex").get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage mutex")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.lock().expect("storage mutex").remove(key);
    }
}
