//! Single-document file backend.
//!
//! The whole state lives in one pretty-printed JSON file. Exclusion is
//! provided by the store's in-memory gate, not the filesystem; this
//! backend only loads and saves.

use crate::state::AppState;
use crate::types::VitalError;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = ".data/health-db.json";

/// File-backed persistence of the aggregate document.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Open (and create if absent) the document at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VitalError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.ensure_file()?;
        Ok(store)
    }

    /// Where the document lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_file(&self) -> Result<(), VitalError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| VitalError::Io(e.to_string()))?;
            }
        }
        if !self.path.exists() {
            self.save(&AppState::default())?;
        }
        Ok(())
    }

    /// Load the current document. A corrupt file reads as a blank state
    /// rather than poisoning every caller.
    pub fn load(&self) -> Result<AppState, VitalError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| VitalError::Io(e.to_string()))?;
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    /// Persist the document, pretty-printed for hand inspection.
    pub fn save(&self, state: &AppState) -> Result<(), VitalError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| VitalError::Serialization(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| VitalError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::now_iso;
    use crate::state::UserPreference;
    use crate::types::WeightUnit;

    #[test]
    fn open_creates_the_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/health-db.json");
        let store = FileStateStore::open(&path).expect("open");
        assert!(path.exists());
        assert_eq!(store.load().expect("load"), AppState::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStateStore::open(dir.path().join("db.json")).expect("open");
        let now = now_iso();
        let state = AppState {
            user_preferences: vec![UserPreference {
                id: "p1".into(),
                user_id: "u1".into(),
                weight_unit: WeightUnit::Lbs,
                created_at: now.clone(),
                updated_at: now,
            }],
            ..AppState::default()
        };
        store.save(&state).expect("save");
        assert_eq!(store.load().expect("load"), state);
    }

    #[test]
    fn corrupt_document_loads_as_blank_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("db.json");
        let store = FileStateStore::open(&path).expect("open");
        std::fs::write(&path, "{not json").expect("write");
        assert_eq!(store.load().expect("load"), AppState::default());
    }
}
