//! The studio orchestrator: one project's generation pipeline.
//!
//! Coordinates the storyboard model, the render job tracker, and the
//! persistence bridge in response to four triggers: initial load,
//! generate, conversational edit, and job poll tick. All state lives
//! behind one mutex that is never held across an await; every
//! continuation that resumes after network I/O re-checks a generation
//! counter and a cancellation token before touching state, so a
//! superseded analyze or poll response can never clobber a newer plan.

use crate::config::PollPolicy;
use crate::domain::conversation::{ConversationLog, ConversationTurn};
use crate::domain::jobs::{JobState, RemoteJobStatus};
use crate::domain::session::PersistedSession;
use crate::domain::storyboard::Storyboard;
use crate::error::StudioError;
use crate::ports::planner::{AnalyzeRequest, MediaUpload, PlannerPort, StyleParams};
use crate::ports::renderer::RenderPort;
use crate::ports::session::SessionStore;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const ANALYZE_FAILED_REPLY: &str =
    "I couldn't analyze that footage. Your project is unchanged; please try again.";
const PLAN_REJECTED_REPLY: &str =
    "The analysis came back with an unusable plan, so I kept your project unchanged.";
const EDIT_FAILED_REPLY: &str =
    "Sorry, I couldn't work out how to make that edit. Your current plan is unchanged.";

/// Read-only view the UI renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioSnapshot {
    pub storyboard: Option<Storyboard>,
    pub job: JobState,
    pub conversation: Vec<ConversationTurn>,
}

struct StudioState {
    storyboard: Option<Storyboard>,
    job: JobState,
    conversation: ConversationLog,
    /// Bumped whenever a cycle is superseded; stale continuations compare
    /// their captured value against this before applying results.
    generation: u64,
    poll_cancel: Option<CancellationToken>,
    /// Set for the duration of a `generate` call; the job itself is still
    /// `Idle` while the analysis request is in flight.
    analyzing: bool,
}

impl StudioState {
    fn new() -> Self {
        Self {
            storyboard: None,
            job: JobState::Idle,
            conversation: ConversationLog::default(),
            generation: 0,
            poll_cancel: None,
            analyzing: false,
        }
    }

    /// Cancels any live polling loop and opens a new cycle. Single-flight:
    /// at most one polling loop survives this call.
    fn supersede(&mut self) -> (CancellationToken, u64) {
        if let Some(token) = self.poll_cancel.take() {
            token.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.poll_cancel = Some(token.clone());
        (token, self.generation)
    }

    /// The durable mirror of the current state. Only a polling job carries
    /// an id; terminal states persist the result (or nothing) so a resume
    /// never polls a superseded job.
    fn session_view(&self) -> PersistedSession {
        PersistedSession {
            storyboard: self.storyboard.clone(),
            job_id: self.job.job_id().map(str::to_string),
            result_url: self.job.result_url().map(str::to_string),
        }
    }
}

pub struct StudioOrchestrator<P, R, S> {
    planner: P,
    renderer: Arc<R>,
    store: Arc<S>,
    poll: PollPolicy,
    state: Arc<Mutex<StudioState>>,
}

impl<P, R, S> StudioOrchestrator<P, R, S>
where
    P: PlannerPort,
    R: RenderPort + 'static,
    S: SessionStore + 'static,
{
    pub fn new(planner: P, renderer: R, store: S, poll: PollPolicy) -> Self {
        Self {
            planner,
            renderer: Arc::new(renderer),
            store: Arc::new(store),
            poll,
            state: Arc::new(Mutex::new(StudioState::new())),
        }
    }

    pub fn snapshot(&self) -> StudioSnapshot {
        let st = self.state.lock();
        StudioSnapshot {
            storyboard: st.storyboard.clone(),
            job: st.job.clone(),
            conversation: st.conversation.turns().to_vec(),
        }
    }

    /// Load the persisted session and adopt it: a stored result URL wins
    /// over a stored job id, a stored job id resumes polling, otherwise
    /// the project is idle with the stored plan loaded for editing.
    /// Idempotent: re-initializing first supersedes any live polling, so
    /// two calls in a row observe the same state.
    pub async fn initialize(&self) -> Result<(), StudioError> {
        let session = self
            .store
            .load()
            .await
            .map_err(StudioError::Session)?
            .unwrap_or_default();

        let resume = {
            let mut st = self.state.lock();
            let st = &mut *st;
            let (token, generation) = st.supersede();
            st.storyboard = session.storyboard;

            if let (Some(storyboard), true) = (&st.storyboard, st.conversation.is_empty()) {
                st.conversation.append(ConversationTurn::agent(format!(
                    "I've created a {} plan with {} scenes. Want to change anything?",
                    storyboard.style,
                    storyboard.scenes.len()
                )));
            }

            if let Some(result_url) = session.result_url {
                st.job = JobState::Completed { result_url };
                None
            } else if let Some(job_id) = session.job_id {
                info!(job_id, "resuming interrupted render");
                st.job = JobState::Polling {
                    job_id: job_id.clone(),
                };
                Some((job_id, token, generation))
            } else {
                st.job = JobState::Idle;
                None
            }
        };

        if let Some((job_id, token, generation)) = resume {
            self.spawn_poll_loop(job_id, token, generation);
        }
        Ok(())
    }

    /// Analyze raw media into a fresh storyboard and render it.
    ///
    /// Rejected while a render is live: racing two analyze calls would
    /// leave an ambiguous current plan.
    pub async fn generate(
        &self,
        media: Vec<MediaUpload>,
        params: StyleParams,
    ) -> Result<(), StudioError> {
        if media.is_empty() {
            return Err(StudioError::NoSourceMedia);
        }
        {
            let mut st = self.state.lock();
            if st.analyzing || st.job.is_live() {
                return Err(StudioError::RenderInFlight);
            }
            st.analyzing = true;
        }
        let result = self.analyze_and_render(media, params).await;
        self.state.lock().analyzing = false;
        result
    }

    async fn analyze_and_render(
        &self,
        media: Vec<MediaUpload>,
        params: StyleParams,
    ) -> Result<(), StudioError> {
        let outcome = match self.planner.analyze(AnalyzeRequest { media, params }).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state
                    .lock()
                    .conversation
                    .append(ConversationTurn::agent(ANALYZE_FAILED_REPLY));
                return Err(StudioError::transport("analyze", e));
            }
        };

        if let Err(violation) = outcome.storyboard.validate() {
            self.state
                .lock()
                .conversation
                .append(ConversationTurn::agent(PLAN_REJECTED_REPLY));
            return Err(violation.into());
        }

        self.state
            .lock()
            .conversation
            .append(ConversationTurn::agent(summarize_plan(&outcome.storyboard)));

        // The backend may have queued its own render (outcome.job_id), but
        // the job we track must be the one for the plan we hold; submit
        // our own so the two can never drift apart.
        self.render(outcome.storyboard).await
    }

    /// Apply a conversational edit to the current storyboard, then render
    /// the result. Any failure leaves the prior plan and video untouched.
    pub async fn apply_edit(&self, message: &str) -> Result<(), StudioError> {
        let current = self
            .state
            .lock()
            .storyboard
            .clone()
            .ok_or(StudioError::NoStoryboard)?;

        self.state
            .lock()
            .conversation
            .append(ConversationTurn::user(message));

        let outcome = match self.planner.edit(&current, message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state
                    .lock()
                    .conversation
                    .append(ConversationTurn::agent(EDIT_FAILED_REPLY));
                return Err(StudioError::EditRejected(e.to_string()));
            }
        };

        if let Err(violation) = outcome.storyboard.validate() {
            self.state
                .lock()
                .conversation
                .append(ConversationTurn::agent(EDIT_FAILED_REPLY));
            return Err(violation.into());
        }

        self.state
            .lock()
            .conversation
            .append(ConversationTurn::agent(outcome.explanation));

        self.render(outcome.storyboard).await
    }

    /// Make the storyboard current and start a render cycle for it,
    /// superseding whatever was in flight.
    pub async fn render(&self, storyboard: Storyboard) -> Result<(), StudioError> {
        storyboard.validate()?;

        let (token, generation) = {
            let mut st = self.state.lock();
            let cycle = st.supersede();
            st.storyboard = Some(storyboard.clone());
            st.job = JobState::Submitting;
            cycle
        };

        let receipt = match self.renderer.submit(&storyboard).await {
            Ok(receipt) => receipt,
            Err(e) => {
                let mut st = self.state.lock();
                if st.generation == generation {
                    st.job = JobState::Idle;
                }
                return Err(StudioError::transport("render", e));
            }
        };

        let poll_job = {
            let mut st = self.state.lock();
            if st.generation != generation {
                // Superseded while the submission was in flight.
                return Ok(());
            }
            match receipt.output_url {
                Some(result_url) => {
                    st.job = JobState::Completed { result_url };
                    None
                }
                None => {
                    debug!(job_id = %receipt.job_id, "render submitted");
                    st.job = JobState::Polling {
                        job_id: receipt.job_id.clone(),
                    };
                    Some(receipt.job_id)
                }
            }
        };

        write_through(self.store.as_ref(), &self.state).await;

        if let Some(job_id) = poll_job {
            self.spawn_poll_loop(job_id, token, generation);
        }
        Ok(())
    }

    /// Cancel any active polling and drop the in-memory job state. The
    /// persisted session is untouched so a later `initialize` can resume.
    pub fn reset(&self) {
        let mut st = self.state.lock();
        st.supersede();
        st.job = JobState::Idle;
    }

    fn spawn_poll_loop(&self, job_id: String, token: CancellationToken, generation: u64) {
        let renderer = Arc::clone(&self.renderer);
        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let policy = self.poll.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(policy.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let started = Instant::now();
            let mut consecutive_failures: u32 = 0;

            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = ticker.tick() => {}
                }

                if started.elapsed() >= policy.max_duration {
                    let message = format!(
                        "render timed out after {}s",
                        policy.max_duration.as_secs()
                    );
                    finish(&state, store.as_ref(), generation, JobState::Failed { message }).await;
                    return;
                }

                let report = tokio::select! {
                    _ = token.cancelled() => return,
                    report = renderer.status(&job_id) => report,
                };

                match report {
                    Err(e) => {
                        // One failed poll must not orphan a job that is
                        // still processing; only an unbroken run of
                        // failures gives up.
                        consecutive_failures += 1;
                        warn!(
                            job_id,
                            consecutive_failures,
                            error = %e,
                            "status poll failed; retrying"
                        );
                        if consecutive_failures >= policy.max_transport_failures {
                            let message = format!(
                                "render service unreachable; giving up after {} failed status checks",
                                consecutive_failures
                            );
                            finish(&state, store.as_ref(), generation, JobState::Failed { message })
                                .await;
                            return;
                        }
                    }
                    Ok(report) => {
                        consecutive_failures = 0;
                        match report.status {
                            RemoteJobStatus::Completed => {
                                let next = match report.output_url {
                                    Some(result_url) => {
                                        info!(job_id, %result_url, "render completed");
                                        JobState::Completed { result_url }
                                    }
                                    None => JobState::Failed {
                                        message: "render completed without an output URL".into(),
                                    },
                                };
                                finish(&state, store.as_ref(), generation, next).await;
                                return;
                            }
                            RemoteJobStatus::Failed => {
                                let message = report
                                    .message
                                    .unwrap_or_else(|| "render failed".to_string());
                                warn!(job_id, %message, "render failed");
                                finish(&state, store.as_ref(), generation, JobState::Failed { message })
                                    .await;
                                return;
                            }
                            RemoteJobStatus::Queued | RemoteJobStatus::Processing => {}
                        }
                    }
                }
            }
        });
    }
}

/// Apply a terminal job state, unless a newer cycle superseded this one
/// while the poll response was in flight.
async fn finish<S: SessionStore>(
    state: &Mutex<StudioState>,
    store: &S,
    generation: u64,
    next: JobState,
) {
    {
        let mut st = state.lock();
        if st.generation != generation {
            return;
        }
        st.job = next;
        st.poll_cancel = None;
    }
    write_through(store, state).await;
}

async fn write_through<S: SessionStore>(store: &S, state: &Mutex<StudioState>) {
    let session = { state.lock().session_view() };
    if let Err(e) = store.save(&session).await {
        warn!(error = %e, "session write-through failed");
    }
}

fn summarize_plan(storyboard: &Storyboard) -> String {
    let mut lines = vec![format!(
        "I've created a {} plan with {} scenes:",
        storyboard.style,
        storyboard.scenes.len()
    )];
    for (i, scene) in storyboard.scenes.iter().enumerate() {
        let caption = if scene.caption.is_empty() {
            "(no caption)"
        } else {
            scene.caption.as_str()
        };
        lines.push(format!(
            "{}. [{}] {:.1}s-{:.1}s: {}",
            i + 1,
            scene.role,
            scene.start,
            scene.end,
            caption
        ));
    }
    lines.join("\n")
}
