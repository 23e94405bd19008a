//! JSON document store
//!
//! Writes client-supplied JSON payloads into a single flat storage
//! directory. Filenames are reduced to their basename so a request can
//! never target a path outside the directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

/// Errors from a save attempt
///
/// `InvalidFilename` is a client fault; the other variants are server
/// faults. The handler maps them to status codes deterministically.
#[derive(Debug)]
pub enum SaveError {
    /// Filename reduced to an empty or reserved basename
    InvalidFilename,
    /// Payload could not be serialized back to JSON text
    Serialize(serde_json::Error),
    /// Writing the target file failed
    Io(std::io::Error),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFilename => write!(f, "invalid filename"),
            Self::Serialize(e) => write!(f, "failed to serialize content: {e}"),
            Self::Io(e) => write!(f, "failed to write file: {e}"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFilename => None,
            Self::Serialize(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

/// Flat directory of saved JSON documents, one file per distinct name
///
/// Files are overwritten in place when a name repeats; there is no
/// versioning and no atomic-write guarantee.
pub struct SaveStore {
    dir: PathBuf,
    durable: bool,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>, durable: bool) -> Self {
        Self {
            dir: dir.into(),
            durable,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the host filesystem is expected to keep saved files around
    pub const fn is_durable(&self) -> bool {
        self.durable
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Serialize `content` and write it to `<dir>/<basename(filename)>`
    ///
    /// Output is pretty-printed with 2-space indentation; non-ASCII
    /// characters stay as literal Unicode. Any existing file at the
    /// target path is fully replaced. Returns the path written.
    pub async fn save(&self, filename: &str, content: &Value) -> Result<PathBuf, SaveError> {
        let name = sanitize_filename(filename).ok_or(SaveError::InvalidFilename)?;
        let target = self.dir.join(name);

        let text = serde_json::to_string_pretty(content).map_err(SaveError::Serialize)?;
        fs::write(&target, text).await.map_err(SaveError::Io)?;

        Ok(target)
    }
}

/// Strip directory components from a client-supplied filename
///
/// Keeps only the final path segment so `../../etc/passwd` becomes
/// `passwd`. Returns `None` when nothing usable remains (empty name,
/// trailing separator, `.` or `..`).
pub fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

    /// Store backed by a fresh per-test directory under the system temp dir
    fn temp_store() -> SaveStore {
        let dir = std::env::temp_dir().join(format!(
            "stashd-store-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        SaveStore::new(dir, true)
    }

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_filename("notes.json"), Some("notes.json"));
        assert_eq!(sanitize_filename("no-extension"), Some("no-extension"));
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd"));
        assert_eq!(sanitize_filename("/absolute/path.json"), Some("path.json"));
        assert_eq!(sanitize_filename("a\\b\\mixed.json"), Some("mixed.json"));
    }

    #[test]
    fn test_sanitize_preserves_surrounding_whitespace() {
        // Basename extraction only; whitespace is part of the name
        assert_eq!(sanitize_filename(" notes.json "), Some(" notes.json "));
        assert_eq!(sanitize_filename("dir/ padded "), Some(" padded "));
    }

    #[test]
    fn test_sanitize_rejects_empty_result() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("dir/"), None);
        assert_eq!(sanitize_filename("."), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename("a/.."), None);
    }

    #[tokio::test]
    async fn test_save_round_trip() {
        let store = temp_store();
        let content = serde_json::json!({"a": 1, "b": [2, 3]});

        let path = store.save("notes.json", &content).await.unwrap();
        assert_eq!(path, store.dir().join("notes.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, content);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let store = temp_store();

        store
            .save("doc.json", &serde_json::json!({"version": 1}))
            .await
            .unwrap();
        let path = store
            .save("doc.json", &serde_json::json!({"version": 2}))
            .await
            .unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({"version": 2}));
    }

    #[tokio::test]
    async fn test_save_sanitizes_traversal() {
        let store = temp_store();

        let path = store
            .save("../../etc/passwd", &serde_json::json!("x"))
            .await
            .unwrap();

        assert_eq!(path, store.dir().join("passwd"));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_rejects_unusable_name() {
        let store = temp_store();
        let result = store.save("dir/", &serde_json::json!(1)).await;
        assert!(matches!(result, Err(SaveError::InvalidFilename)));
    }

    #[tokio::test]
    async fn test_save_output_is_pretty_and_unescaped() {
        let store = temp_store();
        let content = serde_json::json!({"title": "中文标题", "n": 1});

        let path = store.save("cjk.json", &content).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        // 2-space indentation and literal Unicode, no \u escapes
        assert!(written.contains("\n  \"title\""));
        assert!(written.contains("中文标题"));
        assert!(!written.contains("\\u"));
    }

    #[tokio::test]
    async fn test_save_accepts_scalar_content() {
        let store = temp_store();
        let path = store.save("scalar.json", &serde_json::json!(42)).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "42");
    }
}
