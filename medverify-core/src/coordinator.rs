//! Verification request coordinator
//!
//! Owns the dashboard state (`input, busy, stage, finishing, result, error`)
//! and runs each submission as two timelines:
//! - a cosmetic stage ticker on a fixed schedule
//! - the real request to the verification backend
//!
//! They meet only at the success/failure transition, which also stops the
//! ticker. Every event carries the token of the submission that produced it;
//! the state ignores events from anything but the latest submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::client::{HttpVerificationClient, VerificationBackend};
use crate::config::{MedVerifyConfig, StageConfig};
use crate::error::{ErrorKind, MedVerifyError, VerifyError, CONNECTION_MESSAGE, EMPTY_INPUT_MESSAGE};
use crate::models::{AnalysisStage, VerificationRequest, VerificationResult};
use crate::report::Report;

/// Canned queries offered under the input box.
pub const EXAMPLE_QUERIES: [&str; 3] = [
    "Does drinking lemon water cure cancer?",
    "The MMR vaccine causes autism.",
    "https://www.who.int/news-room/fact-sheets/detail/influenza-(seasonal)",
];

/// Chip text for an example: first 30 characters and an ellipsis.
pub fn example_label(query: &str) -> String {
    let head: String = query.chars().take(30).collect();
    format!("{}...", head)
}

// ============================================================================
// State container
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub input: String,
    pub busy: bool,
    pub stage: AnalysisStage,
    /// Set between the success transition and publication; drives the
    /// spinner fade-out.
    pub finishing: bool,
    pub result: Option<VerificationResult>,
    pub error: Option<DashboardError>,
    /// Token of the submission that currently owns the state.
    pub token: u64,
}

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    InputChanged(String),
    Accepted { token: u64, input: String },
    Rejected { message: String },
    StageAdvanced { token: u64, stage: AnalysisStage },
    Succeeded { token: u64 },
    Published { token: u64, result: VerificationResult },
    Failed { token: u64 },
}

impl DashboardState {
    /// Apply one event. Returns `false` when the event was stale or a no-op.
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        match event {
            DashboardEvent::InputChanged(input) => {
                if self.input == input {
                    return false;
                }
                self.input = input;
                true
            }
            DashboardEvent::Accepted { token, input } => {
                if token <= self.token {
                    return false;
                }
                self.token = token;
                self.input = input;
                self.busy = true;
                self.stage = AnalysisStage::ExtractingKeywords;
                self.finishing = false;
                self.result = None;
                self.error = None;
                true
            }
            DashboardEvent::Rejected { message } => {
                // Submit is disabled while loading.
                if self.busy {
                    return false;
                }
                self.error = Some(DashboardError {
                    kind: ErrorKind::Validation,
                    message,
                });
                true
            }
            DashboardEvent::StageAdvanced { token, stage } => {
                if token != self.token || !self.busy || self.finishing || stage <= self.stage {
                    return false;
                }
                self.stage = stage;
                true
            }
            DashboardEvent::Succeeded { token } => {
                if token != self.token || !self.busy || self.finishing {
                    return false;
                }
                self.stage = AnalysisStage::FinalVerdict;
                self.finishing = true;
                true
            }
            DashboardEvent::Published { token, result } => {
                if token != self.token || !self.finishing {
                    return false;
                }
                self.result = Some(result);
                self.error = None;
                self.busy = false;
                self.finishing = false;
                true
            }
            DashboardEvent::Failed { token } => {
                if token != self.token || !self.busy {
                    return false;
                }
                self.busy = false;
                self.finishing = false;
                self.stage = AnalysisStage::Idle;
                self.error = Some(DashboardError {
                    kind: ErrorKind::Connection,
                    message: CONNECTION_MESSAGE.to_string(),
                });
                true
            }
        }
    }

    pub fn report(&self) -> Option<Report> {
        self.result.as_ref().map(Report::from_result)
    }
}

// ============================================================================
// Coordinator
// ============================================================================

struct Inner {
    backend: Arc<dyn VerificationBackend>,
    stages: StageConfig,
    state: watch::Sender<DashboardState>,
    next_token: AtomicU64,
}

/// Cheap to clone; all clones drive the same dashboard.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

/// Aborts the ticker when the owning submission ends or is dropped.
struct TickerGuard(JoinHandle<()>);

impl Drop for TickerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Coordinator {
    pub fn new(backend: Arc<dyn VerificationBackend>, stages: StageConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(Inner {
                backend,
                stages,
                state,
                next_token: AtomicU64::new(0),
            }),
        }
    }

    /// Coordinator over the HTTP client described by `config`. The client is
    /// returned too so callers can `ping` the same service.
    pub fn from_config(
        config: &MedVerifyConfig,
    ) -> Result<(Self, Arc<HttpVerificationClient>), MedVerifyError> {
        let client = Arc::new(HttpVerificationClient::new(&config.service)?);
        let coordinator = Self::new(client.clone(), config.stages.clone());
        Ok((coordinator, client))
    }

    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.dispatch(DashboardEvent::InputChanged(text.into()));
    }

    fn dispatch(&self, event: DashboardEvent) -> bool {
        self.inner.state.send_if_modified(|state| state.apply(event))
    }

    /// Submit whatever is currently in the input field.
    pub async fn submit_current(&self) -> Result<VerificationResult, VerifyError> {
        let input = self.inner.state.borrow().input.clone();
        self.submit(&input).await
    }

    /// Fill the input with a canned example and submit it.
    pub async fn submit_example(&self, index: usize) -> Result<VerificationResult, VerifyError> {
        let query = EXAMPLE_QUERIES
            .get(index)
            .ok_or(VerifyError::UnknownExample {
                index,
                available: EXAMPLE_QUERIES.len(),
            })?;
        self.set_input(*query);
        self.submit(query).await
    }

    /// Run one full submission cycle.
    ///
    /// Resolves once the result is published or the failure recorded. A
    /// caller overtaken by a newer submission gets `VerifyError::Superseded`
    /// and its outcome never reaches the state.
    pub async fn submit(&self, query: &str) -> Result<VerificationResult, VerifyError> {
        let Some(request) = VerificationRequest::new(query) else {
            self.dispatch(DashboardEvent::Rejected {
                message: EMPTY_INPUT_MESSAGE.to_string(),
            });
            tracing::debug!("Rejected empty submission");
            return Err(VerifyError::EmptyInput);
        };

        let token = self.inner.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(DashboardEvent::Accepted {
            token,
            input: request.input.clone(),
        });
        tracing::info!(
            token,
            backend = self.inner.backend.name(),
            chars = request.input.chars().count(),
            "Verification submitted"
        );

        let ticker = self.spawn_ticker(token);
        let outcome = self.inner.backend.check(&request).await;
        drop(ticker);

        match outcome {
            Ok(result) => {
                if result.is_service_failure() {
                    tracing::warn!(
                        token,
                        reasoning = %result.reasoning,
                        "Verification service reported an internal AI failure"
                    );
                }
                if !self.dispatch(DashboardEvent::Succeeded { token }) {
                    tracing::warn!(token, "Discarding response from superseded submission");
                    return Err(VerifyError::Superseded);
                }

                tokio::time::sleep(self.inner.stages.finish_delay()).await;

                if !self.dispatch(DashboardEvent::Published {
                    token,
                    result: result.clone(),
                }) {
                    tracing::warn!(token, "Submission superseded during final verdict");
                    return Err(VerifyError::Superseded);
                }
                tracing::info!(
                    token,
                    score = result.credibility_score,
                    judgment = %result.llm_judgment,
                    "Verification result published"
                );
                Ok(result)
            }
            Err(e) => {
                if !self.dispatch(DashboardEvent::Failed { token }) {
                    tracing::warn!(token, error = %e, "Discarding failure from superseded submission");
                    return Err(VerifyError::Superseded);
                }
                tracing::error!(token, error = %e, "Submission failed");
                Err(VerifyError::Connection(e))
            }
        }
    }

    fn spawn_ticker(&self, token: u64) -> TickerGuard {
        let coordinator = self.clone();
        let interval = self.inner.stages.stage_interval();
        let start = Instant::now();

        TickerGuard(tokio::spawn(async move {
            for (step, stage) in AnalysisStage::ticked().into_iter().enumerate() {
                tokio::time::sleep_until(start + interval * (step as u32 + 1)).await;
                if !coordinator.dispatch(DashboardEvent::StageAdvanced { token, stage }) {
                    tracing::debug!(token, ?stage, "Stage tick ignored");
                    return;
                }
                tracing::debug!(token, ?stage, "Stage advanced");
            }
        }))
    }
}

// ============================================================================
// TESTS
// ============================================================================
