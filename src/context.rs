//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::{HttpApi, LiveClock, LiveFileSystem};
use crate::config::Config;
use crate::ports::{AuthApi, FileSystem, TaskApi};
use crate::session::{SessionHandle, SessionStore};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. The session is
/// shared with whichever adapters need credentials.
pub struct ServiceContext {
    /// Filesystem for the saved session.
    pub fs: Box<dyn FileSystem>,
    /// Task service.
    pub tasks: Box<dyn TaskApi>,
    /// Auth service.
    pub auth: Box<dyn AuthApi>,
    /// Current session, if anyone is logged in.
    pub session: SessionHandle,
    store_root: PathBuf,
}

impl ServiceContext {
    /// Creates a live context talking to the configured task service.
    ///
    /// The saved session, if any, is loaded from the store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved session cannot be read.
    pub fn live(config: &Config) -> Result<Self, String> {
        let fs: Box<dyn FileSystem> = Box::new(LiveFileSystem);
        let saved = SessionStore::new(fs.as_ref(), &config.store).load()?;
        let session = SessionHandle::new(saved);
        let api = HttpApi::new(&config.api_url, session.clone(), Arc::new(LiveClock));

        Ok(Self {
            fs,
            tasks: Box::new(api.clone()),
            auth: Box::new(api),
            session,
            store_root: config.store.clone(),
        })
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn from_parts(
        fs: Box<dyn FileSystem>,
        tasks: Box<dyn TaskApi>,
        auth: Box<dyn AuthApi>,
        session: SessionHandle,
        store_root: &Path,
    ) -> Self {
        Self { fs, tasks, auth, session, store_root: store_root.to_path_buf() }
    }

    /// Store for the saved session.
    #[must_use]
    pub fn session_store(&self) -> SessionStore<'_> {
        SessionStore::new(self.fs.as_ref(), &self.store_root)
    }

    /// Writes the current session to disk, or removes it if it ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be written or removed.
    pub fn persist_session(&self) -> Result<(), String> {
        self.session_store().persist(&self.session)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryFileSystem, MemoryTaskService};
    use crate::session::Session;

    /// Context over a shared in-memory service.
    pub(crate) fn memory_context(
        service: Arc<MemoryTaskService>,
        session: Option<Session>,
    ) -> ServiceContext {
        ServiceContext::from_parts(
            Box::new(MemoryFileSystem::new()),
            Box::new(Arc::clone(&service)),
            Box::new(service),
            SessionHandle::new(session),
            Path::new("/store"),
        )
    }

    #[test]
    fn persist_session_writes_and_clears() {
        let ctx = memory_context(
            Arc::new(MemoryTaskService::default()),
            Some(crate::session::tests::sample_session()),
        );

        ctx.persist_session().unwrap();
        assert!(ctx.session_store().load().unwrap().is_some());

        ctx.session.end();
        ctx.persist_session().unwrap();
        assert!(ctx.session_store().load().unwrap().is_none());
    }

    #[test]
    fn live_context_starts_logged_out_with_empty_store() {
        let dir = std::env::temp_dir().join("taskboard_ctx_live_empty");
        let config = Config {
            api_url: crate::config::DEFAULT_API_URL.into(),
            store: dir.clone(),
            log: "warn".into(),
        };

        let ctx = ServiceContext::live(&config).unwrap();
        assert!(!ctx.session.is_active());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
