//! Persistent key-value state and the chat session id.
//!
//! The browser keeps state in `localStorage`; natively it lives in a small
//! JSON file. Both sit behind [`KeyValueStore`]. The only key the crate
//! uses is [`SESSION_KEY`].

use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::UiError;

/// Storage key holding the chat session id.
pub const SESSION_KEY: &str = "chatbot_session_id";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// Return the stored session id, creating and persisting one on first use.
///
/// A store that fails to persist still yields a usable id for this call;
/// the failure is logged.
pub fn session_id<S: KeyValueStore + ?Sized>(store: &S) -> String {
    if let Some(existing) = store.get(SESSION_KEY).filter(|s| !s.is_empty()) {
        return existing;
    }
    let id = generate_session_id(now_millis(), &mut rand::thread_rng());
    debug!(session_id = %id, "created chat session id");
    if let Err(e) = store.set(SESSION_KEY, &id) {
        warn!(error = %e, "could not persist chat session id");
    }
    id
}

/// `session_<millis>_<9 base-36 chars>`.
pub fn generate_session_id<R: Rng>(millis: u64, rng: &mut R) -> String {
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("session_{millis}_{suffix}")
}

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        self.entries
            .lock()
            .map_err(|e| UiError::Storage(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON-file store; every `set` rewrites the file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, UiError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| UiError::Storage(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(UiError::Storage(format!("{}: {e}", path.display()))),
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), UiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| UiError::Storage(format!("{}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| UiError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| UiError::Storage(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|m| m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| UiError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_session_id(1_700_000_000_000, &mut rng);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_session_id_created_once_and_stable() {
        let store = MemoryStore::new();
        assert!(store.get(SESSION_KEY).is_none());
        let first = session_id(&store);
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some(first.as_str()));
        for _ in 0..5 {
            assert_eq!(session_id(&store), first);
        }
    }

    #[test]
    fn test_session_id_reuses_existing_value() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "session_1_abcdefghi").unwrap();
        assert_eq!(session_id(&store), "session_1_abcdefghi");
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), UiError> {
            Err(UiError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn test_session_id_survives_failing_store() {
        let id = session_id(&ReadOnly);
        assert!(id.starts_with("session_"));
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let first = {
            let store = FileStore::open(&path).unwrap();
            session_id(&store)
        };
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(session_id(&reopened), first);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(UiError::Storage(_))));
    }
}
