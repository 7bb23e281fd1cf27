//! JSON document store.
//!
//! The whole mapping lives in one file. Every append reads the file, inserts
//! one record and rewrites the file through a temp file + rename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::fs;
use tokio::sync::Mutex;

use crate::storage::record::{MessageRecord, Messages};
use crate::storage::{StorageError, StorageResult};

/// Handle to the on-disk message store.
///
/// Clones share one write lock, so appends through any clone are serialized.
/// Nothing guards against a second process writing the same file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with an empty mapping if it does not exist yet.
    ///
    /// Existing content is left untouched.
    pub async fn initialize(&self) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        if fs::try_exists(&self.path).await.map_err(|e| self.io_error(e))? {
            tracing::debug!(path = %self.path.display(), "Store already initialized");
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        self.write_all(&Messages::new()).await?;
        tracing::info!(path = %self.path.display(), "Created empty message store");
        Ok(())
    }

    /// Read the full mapping from disk.
    pub async fn load(&self) -> StorageResult<Messages> {
        let bytes = fs::read(&self.path).await.map_err(|e| self.io_error(e))?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Insert or overwrite `key` and rewrite the file.
    pub async fn append(&self, key: String, record: MessageRecord) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut messages = self.load().await?;
        if messages.insert(key.clone(), record).is_some() {
            tracing::warn!(key = %key, "Timestamp collision, previous message overwritten");
        }
        self.write_all(&messages).await?;

        tracing::debug!(key = %key, total = messages.len(), "Message appended");
        Ok(())
    }

    async fn write_all(&self, messages: &Messages) -> StorageResult<()> {
        let bytes = to_pretty_json(messages).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &bytes).await.map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).await.map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Serialize with four-space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(out)
}

/// True if the error means the store file itself is missing.
pub fn is_missing(err: &StorageError) -> bool {
    matches!(err, StorageError::Io { source, .. } if source.kind() == ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("storage").join("data.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn initialize_creates_empty_mapping() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{}");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();
        store
            .append("2024-01-01T00:00:00.000000".into(), MessageRecord::new("alice", "hello"))
            .await
            .unwrap();
        let before = std::fs::read(store.path()).unwrap();

        store.initialize().await.unwrap();

        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn append_round_trips_many_records() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();

        for i in 0..25 {
            let key = format!("2024-01-01T00:00:{i:02}.000000");
            store
                .append(key, MessageRecord::new(format!("user{i}"), format!("msg {i}")))
                .await
                .unwrap();
        }

        let reopened = Store::new(store.path());
        let messages = reopened.load().await.unwrap();
        assert_eq!(messages.len(), 25);
        assert_eq!(
            messages["2024-01-01T00:00:07.000000"],
            MessageRecord::new("user7", "msg 7")
        );
    }

    #[tokio::test]
    async fn same_key_overwrites() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();

        let key = "2024-01-01T12:00:00.000000".to_string();
        store.append(key.clone(), MessageRecord::new("a", "first")).await.unwrap();
        store.append(key.clone(), MessageRecord::new("b", "second")).await.unwrap();

        let messages = store.load().await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[&key], MessageRecord::new("b", "second"));
    }

    #[tokio::test]
    async fn writes_four_space_indent() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();
        store
            .append("2024-01-01T00:00:00.000000".into(), MessageRecord::new("bob", "hi there"))
            .await
            .unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        let expected = "{\n    \"2024-01-01T00:00:00.000000\": {\n        \"username\": \"bob\",\n        \"message\": \"hi there\"\n    }\n}";
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn reads_existing_document() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{
    "2024-11-05T18:22:03.114520": {
        "username": "ivan",
        "message": "time: 18:22"
    }
}"#,
        )
        .unwrap();

        let messages = store.load().await.unwrap();
        assert_eq!(
            messages["2024-11-05T18:22:03.114520"],
            MessageRecord::new("ivan", "time: 18:22")
        );
    }

    #[tokio::test]
    async fn corrupt_file_is_format_error() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "[1, 2, 3]").unwrap();

        let err = store
            .append("k".into(), MessageRecord::new("a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Format { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let (_dir, store) = temp_store();

        let err = store.load().await.unwrap_err();
        assert!(is_missing(&err));
    }

    #[tokio::test]
    async fn failed_rewrite_is_io_error_and_keeps_file() {
        let (_dir, store) = temp_store();
        store.initialize().await.unwrap();
        store
            .append("2024-01-01T00:00:00.000000".into(), MessageRecord::new("alice", "hello"))
            .await
            .unwrap();
        let before = std::fs::read(store.path()).unwrap();
        // Occupy the temp path so the rewrite cannot create it.
        std::fs::create_dir(store.path().with_extension("json.tmp")).unwrap();

        let err = store
            .append("2024-01-01T00:00:01.000000".into(), MessageRecord::new("bob", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!is_missing(&err));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }
}
