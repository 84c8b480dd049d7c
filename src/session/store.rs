// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential storage backends.
//!
//! The store is the single source of truth for credentials: the client reads
//! it on every request and never caches tokens elsewhere.

use crate::error::SessionError;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Named string slots holding the session credentials.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn clear(&self, key: &str);

    /// Write several slots as one change.
    ///
    /// Durable stores land all entries in a single write or none of them.
    fn set_many(&self, entries: &[(&str, &str)]) {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Clear several slots as one change.
    fn clear_many(&self, keys: &[&str]) {
        for key in keys {
            self.clear(key);
        }
    }
}

/// In-memory store (tests, one-shot tools).
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: DashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }

    fn clear(&self, key: &str) {
        self.slots.remove(key);
    }
}

type Slots = BTreeMap<String, String>;

/// Durable store: a small JSON object on disk.
///
/// Every `get` reads the file, and every change is a read-modify-write of the
/// on-disk object, so several stores (or processes) sharing one path see each
/// other's writes. The file is replaced atomically via rename.
///
/// Write failures are logged at error level with the path and otherwise
/// swallowed. After a failed write the file keeps its previous contents: a
/// refresh token rotated by the backend then survives only in memory, and the
/// next run starts from the revoked one on disk.
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Open (or lazily create) the session file at `path`.
    ///
    /// An existing file must hold a JSON object; anything else is reported as
    /// [`SessionError::Corrupt`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let slots = read_slots(&path)?;

        tracing::debug!(path = %path.display(), slots = slots.len(), "Session file opened");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to the current on-disk object and write it back.
    ///
    /// `change` returns false when nothing changed, which skips the write.
    fn update(&self, change: impl FnOnce(&mut Slots) -> bool) {
        let _guard = self.write_lock.lock();

        let mut slots = match read_slots(&self.path) {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Replacing unreadable session file");
                Slots::new()
            }
        };
        if !change(&mut slots) {
            return;
        }

        if let Err(e) = self.persist(&slots) {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to persist session");
        }
    }

    fn persist(&self, slots: &Slots) -> Result<(), SessionError> {
        if slots.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Atomic replace via rename; per-process temp name
        let tmp = self
            .path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&tmp, serde_json::to_vec_pretty(slots)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn read_slots(path: &Path) -> Result<Slots, SessionError> {
    match fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => Ok(Slots::new()),
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Slots::new()),
        Err(e) => Err(e.into()),
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match read_slots(&self.path) {
            Ok(mut slots) => slots.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to read session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        self.set_many(&[(key, value)]);
    }

    fn clear(&self, key: &str) {
        self.clear_many(&[key]);
    }

    fn set_many(&self, entries: &[(&str, &str)]) {
        self.update(|slots| {
            for (key, value) in entries {
                slots.insert(key.to_string(), value.to_string());
            }
            true
        });
    }

    fn clear_many(&self, keys: &[&str]) {
        self.update(|slots| {
            let before = slots.len();
            slots.retain(|k, _| !keys.contains(&k.as_str()));
            slots.len() != before
        });
    }
}
