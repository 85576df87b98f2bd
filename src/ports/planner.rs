use crate::domain::storyboard::Storyboard;
use async_trait::async_trait;
use bytes::Bytes;
use std::error::Error;

/// One raw media file headed for analysis.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Creative parameters the user picked before generating.
#[derive(Debug, Clone)]
pub struct StyleParams {
    pub style: String,
    /// 0 lets the agent decide.
    pub duration_seconds: u32,
    pub aspect_ratio: String,
    pub use_music: bool,
    pub use_voiceover: bool,
}

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub media: Vec<MediaUpload>,
    pub params: StyleParams,
}

/// Analysis result. `job_id` is present when the backend already queued a
/// render for the fresh plan.
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub storyboard: Storyboard,
    pub job_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub storyboard: Storyboard,
    pub explanation: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlannerPort: Send + Sync {
    /// Upload media and obtain a fresh storyboard.
    async fn analyze(
        &self,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeOutcome, Box<dyn Error + Send + Sync>>;

    /// Rewrite the current storyboard according to a natural-language
    /// request.
    async fn edit(
        &self,
        storyboard: &Storyboard,
        message: &str,
    ) -> Result<EditOutcome, Box<dyn Error + Send + Sync>>;
}
