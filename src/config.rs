//! Configuration for the studio client.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// How the job tracker polls a render job.
#[derive(Clone, Debug)]
pub struct PollPolicy {
    /// Period between status queries.
    pub interval: Duration,
    /// Give up and mark the job failed after this long without a terminal
    /// status.
    pub max_duration: Duration,
    /// Give up after this many consecutive transport failures. A single
    /// failed poll is never fatal; only an unbroken run of them is.
    pub max_transport_failures: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_duration: Duration::from_secs(600),
            max_transport_failures: 30,
        }
    }
}

/// Configuration loaded from the environment.
#[derive(Clone, Debug)]
pub struct StudioConfig {
    /// Base URL of the studio backend
    pub api_base_url: String,
    /// Path of the durable session document
    pub session_path: PathBuf,
    pub poll: PollPolicy,
}

impl StudioConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = PollPolicy::default();
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| String::from("http://localhost:8080")),
            session_path: env::var("SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./studio-session.json")),
            poll: PollPolicy {
                interval: env::var("POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.interval),
                max_duration: env::var("POLL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.max_duration),
                max_transport_failures: env::var("POLL_MAX_TRANSPORT_FAILURES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_transport_failures),
            },
        }
    }
}
