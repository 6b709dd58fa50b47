//! # State Store
//!
//! Serialized mutation over the aggregate document, independent of
//! backend.
//!
//! Contract:
//! - `read` returns the current persisted state and never waits on the
//!   mutation queue.
//! - `mutate` executes at most one body at a time process-wide, loads a
//!   fresh copy, and persists only when the body succeeds. A failing body
//!   writes nothing and releases the exclusion, so a failure never stalls
//!   queued mutations.
//!
//! Two backends satisfy the contract: a single JSON file guarded purely by
//! the in-memory gate, and a Postgres row additionally guarded by a
//! `SELECT … FOR UPDATE` row lock.

pub mod file_state;
#[cfg(feature = "postgres")]
pub mod pg_state;

use crate::state::AppState;
use crate::types::VitalError;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub use file_state::{DEFAULT_STATE_PATH, FileStateStore};
#[cfg(feature = "postgres")]
pub use pg_state::PgStateStore;

// =============================================================================
// BACKEND DISPATCH
// =============================================================================

/// Where the document is persisted.
#[derive(Debug)]
pub enum StateBackend {
    File(FileStateStore),
    #[cfg(feature = "postgres")]
    Postgres(PgStateStore),
}

/// The process-wide store handle.
#[derive(Debug)]
pub struct StateStore {
    backend: StateBackend,
    gate: Mutex<()>,
}

impl StateStore {
    /// Open a file-backed store at `path`.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, VitalError> {
        Ok(Self {
            backend: StateBackend::File(FileStateStore::open(path)?),
            gate: Mutex::new(()),
        })
    }

    /// Open a Postgres-backed store.
    #[cfg(feature = "postgres")]
    pub fn open_postgres(database_url: &str) -> Result<Self, VitalError> {
        Ok(Self {
            backend: StateBackend::Postgres(PgStateStore::open(database_url)?),
            gate: Mutex::new(()),
        })
    }

    /// Human-readable location of the backing document.
    #[must_use]
    pub fn location(&self) -> String {
        match &self.backend {
            StateBackend::File(file) => file.path().display().to_string(),
            #[cfg(feature = "postgres")]
            StateBackend::Postgres(pg) => pg.url().to_owned(),
        }
    }

    // A mutation that failed mid-flight leaves the gate poisoned but the
    // document untouched; later callers may proceed.
    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current persisted state. Does not wait on in-flight mutations, so
    /// the result may be superseded immediately.
    pub fn read(&self) -> Result<AppState, VitalError> {
        match &self.backend {
            StateBackend::File(file) => file.load(),
            #[cfg(feature = "postgres")]
            StateBackend::Postgres(pg) => pg.load(),
        }
    }

    /// Run `mutator` under the process-wide exclusion and persist its
    /// result. Returns the mutator's value; on error nothing is written.
    pub fn mutate<T>(
        &self,
        mutator: impl FnOnce(&mut AppState) -> Result<T, VitalError>,
    ) -> Result<T, VitalError> {
        let _guard = self.lock_gate();
        match &self.backend {
            StateBackend::File(file) => {
                let mut state = file.load()?;
                let result = mutator(&mut state)?;
                file.save(&state)?;
                Ok(result)
            }
            #[cfg(feature = "postgres")]
            StateBackend::Postgres(pg) => pg.mutate_with(mutator),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
