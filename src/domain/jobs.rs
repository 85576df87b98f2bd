//! Render job lifecycle.
//!
//! The backend tracks one asynchronous render per submission; the client
//! mirrors it with a small state machine. A newer render supersedes (never
//! mutates) the previous one, so at most one job is live per project.

use serde::{Deserialize, Serialize};

/// Status strings reported by the render service. The backend writes
/// `complete` on success while every other path says `completed`, so both
/// spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteJobStatus {
    Queued,
    Processing,
    #[serde(alias = "complete")]
    Completed,
    Failed,
}

/// Client-side view of the one tracked render job.
///
/// `Submitting` and `Polling` are the live states; starting a new cycle
/// while one is live must cancel it first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobState {
    Idle,
    Submitting,
    Polling { job_id: String },
    Completed { result_url: String },
    Failed { message: String },
}

impl JobState {
    pub fn is_live(&self) -> bool {
        matches!(self, JobState::Submitting | JobState::Polling { .. })
    }

    pub fn job_id(&self) -> Option<&str> {
        match self {
            JobState::Polling { job_id } => Some(job_id),
            _ => None,
        }
    }

    pub fn result_url(&self) -> Option<&str> {
        match self {
            JobState::Completed { result_url } => Some(result_url),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            JobState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_statuses() {
        let parse = |s: &str| serde_json::from_str::<RemoteJobStatus>(s).unwrap();
        assert_eq!(parse("\"queued\""), RemoteJobStatus::Queued);
        assert_eq!(parse("\"processing\""), RemoteJobStatus::Processing);
        assert_eq!(parse("\"completed\""), RemoteJobStatus::Completed);
        assert_eq!(parse("\"failed\""), RemoteJobStatus::Failed);
    }

    #[test]
    fn accepts_legacy_complete_spelling() {
        let status: RemoteJobStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(status, RemoteJobStatus::Completed);
    }

    #[test]
    fn live_states() {
        assert!(JobState::Submitting.is_live());
        assert!(JobState::Polling {
            job_id: "j1".into()
        }
        .is_live());
        assert!(!JobState::Idle.is_live());
        assert!(!JobState::Completed {
            result_url: "/out/a.mp4".into()
        }
        .is_live());
    }
}
