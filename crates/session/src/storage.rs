//! Durable credential storage boundary.
//!
//! Two string-keyed slots, read once at startup and written through on
//! every credential mutation. Absent keys mean "no session".

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Slot holding the opaque session token.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the serialized identity.
pub const USER_KEY: &str = "user";

/// Synchronous string-slot storage.
///
/// Writes must be durable before the call returns; the store reports
/// success to its caller only after the write-through completed.
pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// File-backed storage: one JSON document holding the slots.
///
/// Loaded once at open; every mutation rewrites the file before returning.
/// Write failures are logged and do not tear down the in-memory session.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    slots: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file, loading any existing content.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let slots = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("session file is unreadable, starting empty: {err:?}");
                HashMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    /// Open at the platform data directory, e.g.
    /// `~/.local/share/centralstore/session.json`.
    pub fn at_default_path() -> io::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no platform data directory")
        })?;
        let dir = base.join("centralstore");
        std::fs::create_dir_all(&dir)?;
        Self::open(dir.join("session.json"))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn flush(&self, slots: &HashMap<String, String>) {
        match serde_json::to_string_pretty(slots) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.path, raw) {
                    tracing::error!("failed to persist session file: {err:?}");
                }
            }
            Err(err) => tracing::error!("failed to serialize session slots: {err:?}"),
        }
    }
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn put(&self, key: &str, value: &str) {
        let mut slots = self.lock();
        slots.insert(key.to_string(), value.to_string());
        self.flush(&slots);
    }

    fn remove(&self, key: &str) {
        let mut slots = self.lock();
        if slots.remove(key).is_some() {
            self.flush(&slots);
        }
    }
}
