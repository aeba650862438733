//! JSON file persistence for term stores.
//!
//! The file is a single pretty-printed JSON object mapping term to
//! definition, sorted by term and kept human-editable (non-ASCII text is
//! written as-is). Saving the loaded store reproduces the file byte for byte.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::model::TermStore;
use crate::traits::TermRepository;

/// Default file name used when no path is configured.
pub const DEFAULT_STORE_FILE: &str = "slang.json";

/// A term store persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonTermFile {
    path: PathBuf,
}

impl JsonTermFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store, or the built-in defaults if the file does not exist.
    ///
    /// Any other failure (unreadable, corrupt) is returned as-is.
    pub fn load_or_default(&self) -> Result<TermStore, StoreError> {
        match self.load() {
            Ok(store) => Ok(store),
            Err(e) if e.is_not_found() => {
                debug!(path = %self.path.display(), "no term file yet, using defaults");
                Ok(TermStore::with_defaults())
            }
            Err(e) => Err(e),
        }
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

/// Render a store in the on-disk format.
pub fn to_json(store: &TermStore) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(store)?;
    json.push('\n');
    Ok(json)
}

impl TermRepository for JsonTermFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<TermStore, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        let store: TermStore =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(terms = store.len(), "loaded term store");
        Ok(store)
    }

    #[instrument(skip(self, store), fields(path = %self.path.display(), terms = store.len()))]
    fn save(&self, store: &TermStore) -> Result<(), StoreError> {
        let json = to_json(store).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }

        // Write next to the target and rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        let mut file = std::fs::File::create(&tmp).map_err(|e| self.unavailable(e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| self.unavailable(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.unavailable(e))?;

        debug!("saved term store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TermStore {
        vec![
            ("bet".to_string(), "agreement".to_string()),
            ("cap".to_string(), "lie".to_string()),
            ("rizz".to_string(), "charm".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonTermFile::new(dir.path().join("slang.json"));

        let store = sample();
        file.save(&store).unwrap();
        let loaded = file.load().unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn resave_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.json");
        let file = JsonTermFile::new(&path);

        file.save(&TermStore::with_defaults()).unwrap();
        let first = std::fs::read(&path).unwrap();
        file.save(&file.load().unwrap()).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn file_is_human_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.json");
        let file = JsonTermFile::new(&path);

        let mut store = sample();
        store.insert("no cap", "for real, honestly ✨").unwrap();
        file.save(&store).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"bet\": \"agreement\""));
        assert!(text.contains("for real, honestly ✨"));
        assert!(!dir.path().join("slang.json.tmp").exists());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonTermFile::new(dir.path().join("nope.json"));

        let err = file.load().unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(file.load_or_default().unwrap().len(), 10);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let file = JsonTermFile::new(&path);

        assert!(matches!(file.load(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(
            file.load_or_default(),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonTermFile::new(dir.path().join("data/terms/slang.json"));
        file.save(&sample()).unwrap();
        assert_eq!(file.load().unwrap().len(), 3);
    }
}
