//! Durable session snapshot mirrored through the persistence bridge.

use crate::domain::storyboard::Storyboard;
use serde::{Deserialize, Serialize};

/// What survives a reload: the last accepted plan, the id of a render that
/// was still in flight, and the URL of the last finished render.
///
/// `job_id` and `result_url` are mutually exclusive in practice: the id is
/// cleared once the job reaches a terminal state, so a resume never polls
/// a superseded job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storyboard: Option<Storyboard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
}
