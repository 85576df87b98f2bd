use crate::domain::session::PersistedSession;
use async_trait::async_trait;
use std::error::Error;

/// Persistence bridge. Write-through mirror of the orchestrator state:
/// read once at startup, overwritten wholesale on every transition.
/// Last write wins; there is no merge logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session: &PersistedSession) -> Result<(), Box<dyn Error + Send + Sync>>;

    async fn load(&self) -> Result<Option<PersistedSession>, Box<dyn Error + Send + Sync>>;
}
