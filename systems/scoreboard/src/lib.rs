#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Best-score persistence collaborator.
//!
//! The session only announces new records through
//! [`Event::BestScoreRecorded`]; this system owns where the value lives.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use snake_arcade_core::Event;
use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the best score is persisted.
pub const BEST_SCORE_KEY: &str = "best-score";

/// Failures raised by a best-score store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("best-score file {path} could not be accessed")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The stored document is not valid TOML or has the wrong shape.
    #[error("best-score file {path} is malformed")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// The value could not be encoded.
    #[error("best score could not be encoded")]
    Encode(#[from] toml::ser::Error),
    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("in-memory best-score store is poisoned")]
    Poisoned,
}

/// Key-value storage for the best score.
pub trait BestScoreStore: fmt::Debug {
    /// Reads the persisted value, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Replaces the persisted value.
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        (**self).save(score)
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct BestScoreDocument {
    best_score: Option<u32>,
}

/// Store persisting a TOML document of the form `best-score = N`.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`; the file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl BestScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(error)),
        };

        let document: BestScoreDocument =
            toml::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(document.best_score)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let document = BestScoreDocument {
            best_score: Some(score),
        };
        let contents = toml::to_string(&document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
            }
        }
        fs::write(&self.path, contents).map_err(|error| self.io_error(error))
    }
}

/// Volatile store, shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `score`.
    #[must_use]
    pub fn with_value(score: u32) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(score))),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        self.value
            .lock()
            .map(|value| *value)
            .map_err(|_| StoreError::Poisoned)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let mut value = self.value.lock().map_err(|_| StoreError::Poisoned)?;
        *value = Some(score);
        Ok(())
    }
}

/// System persisting new best scores announced by the world.
#[derive(Debug)]
pub struct Scoreboard<S> {
    store: S,
}

impl<S: BestScoreStore> Scoreboard<S> {
    /// Creates a scoreboard writing through `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the persisted best score, falling back to zero.
    ///
    /// Store failures are logged and never propagated.
    #[must_use]
    pub fn load_best(&self) -> u32 {
        match self.store.load() {
            Ok(Some(score)) => {
                debug!(key = BEST_SCORE_KEY, score, "best score loaded");
                score
            }
            Ok(None) => 0,
            Err(error) => {
                warn!(key = BEST_SCORE_KEY, error = %error, "failed to load best score");
                0
            }
        }
    }

    /// Persists every best score recorded in `events`.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::BestScoreRecorded { score } = event {
                match self.store.save(*score) {
                    Ok(()) => debug!(key = BEST_SCORE_KEY, score, "best score saved"),
                    Err(error) => {
                        warn!(key = BEST_SCORE_KEY, error = %error, "failed to save best score");
                    }
                }
            }
        }
    }

    /// Backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_is_shared_between_clones() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.save(40).expect("save");

        assert_eq!(observer.load().expect("load"), Some(40));
    }

    #[test]
    fn document_uses_persisted_key() {
        let encoded = toml::to_string(&BestScoreDocument {
            best_score: Some(120),
        })
        .expect("encode");

        assert_eq!(encoded.trim(), format!("{BEST_SCORE_KEY} = 120"));
    }

    #[test]
    fn scoreboard_ignores_unrelated_events() {
        let mut scoreboard = Scoreboard::new(MemoryStore::new());

        scoreboard.handle(&[Event::ScoreChanged { score: 90 }, Event::MagnetExpired]);

        assert_eq!(scoreboard.store().load().expect("load"), None);
        assert_eq!(scoreboard.load_best(), 0);
    }
}
