//! Session persistence between invocations.
//!
//! The session is kept as YAML at `<root>/session.yaml`. All I/O goes
//! through the `FileSystem` port.

use std::path::{Path, PathBuf};

use super::{Session, SessionHandle};
use crate::ports::FileSystem;

const SESSION_FILE: &str = "session.yaml";

/// Reads and writes the persisted session.
pub struct SessionStore<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
}

impl<'a> SessionStore<'a> {
    /// Creates a store rooted at the given directory.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, root: &Path) -> Self {
        Self { fs, root: root.to_path_buf() }
    }

    /// Loads the saved session, or `None` if nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, String> {
        let path = self.path();
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        let contents = self
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read session {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| format!("Failed to parse session {}: {e}", path.display()))
    }

    /// Saves `session`, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, session: &Session) -> Result<(), String> {
        let yaml = serde_yaml::to_string(session)
            .map_err(|e| format!("Failed to serialize session: {e}"))?;
        let path = self.path();
        self.fs
            .write(&path, &yaml)
            .map_err(|e| format!("Failed to write session {}: {e}", path.display()))
    }

    /// Forgets the saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be removed.
    pub fn clear(&self) -> Result<(), String> {
        let path = self.path();
        self.fs
            .remove(&path)
            .map_err(|e| format!("Failed to remove session {}: {e}", path.display()))
    }

    /// Writes whatever `handle` currently holds; an ended session is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if saving or clearing fails.
    pub fn persist(&self, handle: &SessionHandle) -> Result<(), String> {
        match handle.snapshot() {
            Some(session) => self.save(&session),
            None => self.clear(),
        }
    }

    fn path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::session::tests::sample_session;

    #[test]
    fn save_and_load_round_trips() {
        let fs = MemoryFileSystem::new();
        let store = SessionStore::new(&fs, Path::new("/store"));

        store.save(&sample_session()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample_session()));
    }

    #[test]
    fn load_without_file_is_logged_out() {
        let fs = MemoryFileSystem::new();
        let store = SessionStore::new(&fs, Path::new("/store"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let fs = MemoryFileSystem::new();
        fs.write(Path::new("/store/session.yaml"), "user: [").unwrap();
        let store = SessionStore::new(&fs, Path::new("/store"));

        let err = store.load().unwrap_err();
        assert!(err.contains("Failed to parse session"));
    }

    #[test]
    fn persist_follows_handle() {
        let fs = MemoryFileSystem::new();
        let store = SessionStore::new(&fs, Path::new("/store"));
        let handle = SessionHandle::new(Some(sample_session()));

        store.persist(&handle).unwrap();
        assert!(fs.exists(Path::new("/store/session.yaml")));

        handle.end();
        store.persist(&handle).unwrap();
        assert!(!fs.exists(Path::new("/store/session.yaml")));
    }
}
