use crate::domain::storyboard::Storyboard;
use crate::ports::renderer::{RenderPort, RenderReceipt, StatusReport};
use async_trait::async_trait;
use std::error::Error;

/// HTTP client for the render and status endpoints of the studio backend.
#[derive(Clone)]
pub struct HttpRenderer {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RenderPort for HttpRenderer {
    async fn submit(
        &self,
        storyboard: &Storyboard,
    ) -> Result<RenderReceipt, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/api/render", self.base_url))
            .json(storyboard)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(format!(
                "render endpoint returned {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )
            .into());
        }
        Ok(response.json().await?)
    }

    async fn status(&self, job_id: &str) -> Result<StatusReport, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .get(format!("{}/api/status/{}", self.base_url, job_id))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(format!("status endpoint returned {}", response.status()).into());
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::jobs::RemoteJobStatus;
    use crate::ports::renderer::{RenderReceipt, StatusReport};

    #[test]
    fn parses_render_receipt() {
        let receipt: RenderReceipt =
            serde_json::from_str(r#"{"job_id": "abc", "status": "queued"}"#).unwrap();
        assert_eq!(receipt.job_id, "abc");
        assert!(receipt.output_url.is_none());
    }

    #[test]
    fn parses_terminal_status_report() {
        let report: StatusReport = serde_json::from_str(
            r#"{"status": "completed", "output_url": "/out/abc.mp4"}"#,
        )
        .unwrap();
        assert_eq!(report.status, RemoteJobStatus::Completed);
        assert_eq!(report.output_url.as_deref(), Some("/out/abc.mp4"));
    }

    #[test]
    fn parses_failure_with_message() {
        let report: StatusReport =
            serde_json::from_str(r#"{"status": "failed", "message": "encoder error"}"#).unwrap();
        assert_eq!(report.status, RemoteJobStatus::Failed);
        assert_eq!(report.message.as_deref(), Some("encoder error"));
    }
}
