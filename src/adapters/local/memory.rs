use crate::domain::session::PersistedSession;
use crate::ports::session::SessionStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::error::Error;
use std::sync::Arc;

/// In-memory session store for tests and ephemeral embedding; same
/// last-write-wins contract as the filesystem store.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Option<PersistedSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Direct peek at the stored session, for assertions.
    pub fn current(&self) -> Option<PersistedSession> {
        self.inner.lock().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &PersistedSession) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.inner.lock() = Some(session.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<PersistedSession>, Box<dyn Error + Send + Sync>> {
        Ok(self.inner.lock().clone())
    }
}
