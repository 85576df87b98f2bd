use crate::domain::storyboard::Storyboard;
use crate::ports::planner::{AnalyzeOutcome, AnalyzeRequest, EditOutcome, PlannerPort};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// HTTP client for the analysis and chat-edit endpoints of the studio
/// backend.
#[derive(Clone)]
pub struct HttpPlanner {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPlanner {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// The analyze endpoint returns the storyboard fields at the top level,
/// with an optional `job_id` when the backend queued a render itself.
#[derive(Debug, Deserialize)]
struct AnalyzeWireResponse {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(flatten)]
    storyboard: Storyboard,
}

#[derive(Debug, Serialize)]
struct EditWireRequest<'a> {
    storyboard: &'a Storyboard,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct EditWireResponse {
    #[serde(default)]
    storyboard: Option<Storyboard>,
    #[serde(default)]
    explanation: Option<String>,
}

#[async_trait]
impl PlannerPort for HttpPlanner {
    async fn analyze(
        &self,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeOutcome, Box<dyn Error + Send + Sync>> {
        let params = &request.params;
        let mut form = Form::new()
            .text("style", params.style.clone())
            .text("duration_seconds", params.duration_seconds.to_string())
            .text("aspect_ratio", params.aspect_ratio.clone())
            .text("use_music", params.use_music.to_string())
            .text("use_voiceover", params.use_voiceover.to_string());
        for media in request.media {
            let part = Part::stream(media.bytes)
                .file_name(media.file_name)
                .mime_str(&media.content_type)?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(format!("{}/api/analyze", self.base_url))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(format!(
                "analyze endpoint returned {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )
            .into());
        }

        let wire: AnalyzeWireResponse = response.json().await?;
        Ok(AnalyzeOutcome {
            storyboard: wire.storyboard,
            job_id: wire.job_id,
        })
    }

    async fn edit(
        &self,
        storyboard: &Storyboard,
        message: &str,
    ) -> Result<EditOutcome, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/api/chat/edit", self.base_url))
            .json(&EditWireRequest {
                storyboard,
                message,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(format!("chat-edit endpoint returned {}", response.status()).into());
        }

        let wire: EditWireResponse = response.json().await?;
        match wire.storyboard {
            Some(storyboard) => Ok(EditOutcome {
                storyboard,
                explanation: wire
                    .explanation
                    .unwrap_or_else(|| "I've updated the video plan based on your request.".into()),
            }),
            None => Err("planner returned no storyboard for the edit".into()),
        }
    }
}
