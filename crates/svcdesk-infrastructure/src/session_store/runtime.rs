use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use svcdesk_core::error::Result;
use svcdesk_core::session::{AccessToken, Session, SessionStore};

/// Session store backed by a JSON file in the runtime directory.
///
/// The file is a write-through copy of the in-memory value. All file I/O
/// happens under the write lock so the file never disagrees with memory
/// for longer than one mutation. When the new session cannot be written,
/// the previous file is discarded and the store keeps working from memory,
/// so a later process starts signed out rather than as the replaced user.
#[derive(Debug)]
pub struct RuntimeSessionStore {
    path: PathBuf,
    current: RwLock<Option<Arc<Session>>>,
}

impl RuntimeSessionStore {
    /// Opens the store at `path`, restoring a previous session if one is
    /// present and not yet expired.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let restored = match Self::load(&path) {
            Ok(Some(session)) if session.is_expired_at(Utc::now()) => {
                tracing::info!("[RuntimeSessionStore] Stored session has expired, discarding");
                Self::remove_file(&path);
                None
            }
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    "[RuntimeSessionStore] Discarding unreadable session file {:?}: {}",
                    path,
                    e
                );
                Self::remove_file(&path);
                None
            }
        };
        Self {
            path,
            current: RwLock::new(restored.map(Arc::new)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Option<Session>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(session)?;

        let tmp_path = self.tmp_path();
        let mut tmp_file = create_private(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Makes sure no session can be restored from `path`.
    ///
    /// Removes the file, or truncates it when removal fails (an empty file
    /// restores nothing). Returns `false` if neither worked.
    fn remove_file(path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!(
                    "[RuntimeSessionStore] Failed to remove {:?}: {}, truncating instead",
                    path,
                    e
                );
                match File::create(path) {
                    Ok(_) => true,
                    Err(e) => {
                        tracing::warn!(
                            "[RuntimeSessionStore] Session file {:?} could not be cleared: {}",
                            path,
                            e
                        );
                        false
                    }
                }
            }
        }
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    File::create(path)
}

impl SessionStore for RuntimeSessionStore {
    fn get(&self) -> Option<Arc<Session>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, session: Session) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = self.persist(&session) {
            tracing::warn!(
                "[RuntimeSessionStore] Failed to write session file, keeping it in memory: {}",
                e
            );
            if let Err(e) = fs::remove_file(self.tmp_path()) {
                tracing::debug!("[RuntimeSessionStore] Left temporary file in place: {}", e);
            }
            Self::remove_file(&self.path);
        }
        *current = Some(Arc::new(session));
    }

    fn clear(&self) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = None;
        if !Self::remove_file(&self.path) {
            tracing::warn!("[RuntimeSessionStore] Signed out, but the session file remains");
        }
    }

    fn clear_if_current(&self, token: &AccessToken) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.as_ref().is_some_and(|s| &s.token == token) {
            *current = None;
            if !Self::remove_file(&self.path) {
                tracing::warn!("[RuntimeSessionStore] Session torn down, but the session file remains");
            }
            true
        } else {
            false
        }
    }
}
