use crate::domain::jobs::RemoteJobStatus;
use crate::domain::storyboard::Storyboard;
use async_trait::async_trait;
use serde::Deserialize;
use std::error::Error;

/// Acknowledgement of a render submission. `output_url` is set when the
/// service rendered synchronously and there is nothing to poll.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderReceipt {
    pub job_id: String,
    #[serde(default)]
    pub output_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    pub status: RemoteJobStatus,
    #[serde(default)]
    pub output_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenderPort: Send + Sync {
    /// Queue a render of the given storyboard.
    async fn submit(
        &self,
        storyboard: &Storyboard,
    ) -> Result<RenderReceipt, Box<dyn Error + Send + Sync>>;

    /// Query the status of a previously submitted job.
    async fn status(&self, job_id: &str) -> Result<StatusReport, Box<dyn Error + Send + Sync>>;
}
