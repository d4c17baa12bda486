// ABOUTME: Key-value persistence boundary with JSON file and in-memory backends
// ABOUTME: Hosts the progress store and drill bank built on top of it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlaySmart

//! # Persistence
//!
//! The engine persists exactly two values — the progress map and the drill
//! bank — under fixed string keys in a process-external key-value store (the
//! browser host backs this with `localStorage`). The [`KeyValueStore`] trait
//! keeps the engine agnostic of the backend; [`JsonFileStore`] serves native
//! hosts, [`MemoryStore`] serves tests.
//!
//! Corrupt or structurally invalid stored values are discarded and treated as
//! absent; loading never fails.

mod drill_bank;
mod progress;

pub use drill_bank::{DrillBank, DRILL_BANK_KEY};
pub use progress::{ProgressStore, PROGRESS_KEY};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::errors::{AppError, AppResult};

/// String-keyed persistence backend
///
/// Values are opaque strings; the stores layered on top encode JSON into
/// them. Mutations must be serialized by the host (the controller owns the
/// store and mutates it from a single event flow).
pub trait KeyValueStore {
    /// Read a value, `None` when absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] when the backend cannot persist.
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a value if present
    fn remove(&mut self, key: &str);
}

/// In-memory backend for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// File-backed store holding all keys in one JSON object
///
/// The whole map is rewritten on every `set`; with two small keys this is
/// cheaper than managing per-key files.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any existing content
    ///
    /// A missing file starts empty; an unreadable or corrupt file is
    /// discarded with a warning rather than propagated.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(values) => values,
                Err(error) => {
                    warn!(path = %path.display(), %error, "discarding corrupt store file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    fn flush(&self) -> AppResult<()> {
        let encoded = serde_json::to_string(&self.values)?;
        fs::write(&self.path, encoded)
            .map_err(|e| AppError::storage(format!("{}: {e}", self.path.display())))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        if let Err(error) = self.flush() {
            warn!(%error, "failed to persist key removal");
        }
    }
}
