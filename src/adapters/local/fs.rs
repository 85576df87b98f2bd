use crate::domain::session::PersistedSession;
use crate::ports::session::SessionStore;
use async_trait::async_trait;
use std::error::Error;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Session store backed by one JSON document on disk, the library
/// equivalent of the browser's localStorage record. Each save overwrites
/// the whole file; concurrent writers are a documented non-goal.
#[derive(Clone)]
pub struct FsSessionStore {
    path: PathBuf,
}

impl FsSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FsSessionStore {
    async fn save(&self, session: &PersistedSession) -> Result<(), Box<dyn Error + Send + Sync>> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<PersistedSession>, Box<dyn Error + Send + Sync>> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&body)?))
    }
}
