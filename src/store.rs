use crate::consts;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence of the single best-score value
pub(crate) trait HighScoreStore {
    /// Return the stored high score, or 0 if there is none or it is not a
    /// valid non-negative integer.
    fn load_high_score(&self) -> u32;

    /// Record `score` as the new high score
    fn save_high_score(&mut self, score: u32) -> Result<(), SaveError>;
}

/// A key-value store of strings, kept in memory and (unless created with
/// [`Storage::in_memory()`]) mirrored to a JSON object on disk.
///
/// Entries written by someone else may hold any JSON value; such entries are
/// kept as-is but read back as absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Storage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl Storage {
    /// Return the default path of the store file
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("storage.json"))
    }

    /// Create an empty store that is never written to disk
    pub(crate) fn in_memory() -> Storage {
        Storage::default()
    }

    /// Open the store file at `path`.  A missing file is treated as an empty
    /// store; it will be created on the first write.  So is a file that isn't
    /// a JSON object, in which case it is overwritten on the first write.
    pub(crate) fn open(path: PathBuf) -> Result<Storage, LoadError> {
        let entries = match fs_err::read(&path) {
            Ok(src) => serde_json::from_slice(&src).unwrap_or_else(|e| {
                let e: &(dyn std::error::Error + 'static) = &e;
                tracing::warn!(
                    path = %path.display(),
                    error = e,
                    "Ignoring unreadable store file contents"
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(LoadError::read(e)),
        };
        Ok(Storage {
            path: Some(path),
            entries,
        })
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Set `key` to `value` and write the whole store back to disk
    pub(crate) fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        self.entries.insert(key.to_owned(), Value::String(value));
        self.flush()
    }

    fn flush(&self) -> Result<(), SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&self.entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl HighScoreStore for Storage {
    fn load_high_score(&self) -> u32 {
        let Some(raw) = self.get(consts::HIGH_SCORE_KEY) else {
            return 0;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(value = raw, "Ignoring malformed stored high score");
            0
        })
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), SaveError> {
        self.set(consts::HIGH_SCORE_KEY, score.to_string())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }

    /// A write failure for stores that don't touch the disk
    #[cfg(test)]
    pub(crate) fn simulated() -> Self {
        SaveError::write(std::io::Error::other("simulated write failure"))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize store")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read stored high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read store file")]
    Read(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error as _;

    #[test]
    fn missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Storage::open(tmp.path().join("storage.json")).unwrap();
        assert_eq!(store.get(consts::HIGH_SCORE_KEY), None);
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn save_then_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data").join("gridsnake").join("storage.json");
        let mut store = Storage::open(path.clone()).unwrap();
        store.save_high_score(17).unwrap();
        let src = fs_err::read_to_string(&path).unwrap();
        assert_eq!(src, "{\"highScore-snake-v1\":\"17\"}\n");
        let store = Storage::open(path).unwrap();
        assert_eq!(store.load_high_score(), 17);
    }

    #[test]
    fn other_keys_survive_save() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        fs_err::write(&path, "{\"theme\": \"dark\"}").unwrap();
        let mut store = Storage::open(path.clone()).unwrap();
        store.save_high_score(3).unwrap();
        let store = Storage::open(path).unwrap();
        assert_eq!(store.get("theme"), Some("dark"));
        assert_eq!(store.load_high_score(), 3);
    }

    #[test]
    fn malformed_values_read_as_zero() {
        for raw in ["", "abc", "-4", "12abc", "7.5"] {
            let mut store = Storage::in_memory();
            store
                .set(consts::HIGH_SCORE_KEY, String::from(raw))
                .unwrap();
            assert_eq!(store.load_high_score(), 0, "raw value {raw:?}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let mut store = Storage::in_memory();
        store
            .set(consts::HIGH_SCORE_KEY, String::from(" 42\n"))
            .unwrap();
        assert_eq!(store.load_high_score(), 42);
    }

    #[test]
    fn in_memory_store_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = Storage::in_memory();
        store.save_high_score(9).unwrap();
        assert_eq!(store.load_high_score(), 9);
        assert_eq!(fs_err::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn non_string_value_reads_as_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        fs_err::write(&path, "{\"highScore-snake-v1\": 17, \"other\": \"x\"}").unwrap();
        let mut store = Storage::open(path.clone()).unwrap();
        assert_eq!(store.get(consts::HIGH_SCORE_KEY), None);
        assert_eq!(store.load_high_score(), 0);
        assert_eq!(store.get("other"), Some("x"));
        store.save_high_score(4).unwrap();
        let store = Storage::open(path).unwrap();
        assert_eq!(store.load_high_score(), 4);
        assert_eq!(store.get("other"), Some("x"));
    }

    #[rstest]
    #[case("{not json")]
    #[case("")]
    #[case("[1, 2, 3]")]
    #[case("\"highScore-snake-v1\"")]
    fn unreadable_file_is_empty(#[case] contents: &str) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        fs_err::write(&path, contents).unwrap();
        let mut store = Storage::open(path.clone()).unwrap();
        assert_eq!(store.load_high_score(), 0);
        store.save_high_score(8).unwrap();
        let src = fs_err::read_to_string(&path).unwrap();
        assert_eq!(src, "{\"highScore-snake-v1\":\"8\"}\n");
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory can't be read as a file.
        let e = Storage::open(tmp.path().to_owned()).unwrap_err();
        assert_eq!(e.to_string(), "Failed to read stored high score from disk");
        assert_eq!(
            e.source().map(ToString::to_string).as_deref(),
            Some("failed to read store file")
        );
    }
}
