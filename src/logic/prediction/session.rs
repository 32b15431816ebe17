//! Prediction Session
//!
//! State machine around `POST /predict`:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Success
//!                      ▲      └─err─▶ Failed
//!                      └──── submit ───┘ (from any state)
//! ```
//!
//! At most one request is in flight. A submit that arrives while one is
//! outstanding is queued, replacing any older queued vector. When the
//! outstanding response lands it is discarded as superseded and the queued
//! vector goes out instead. Every dispatch carries a [`RequestToken`];
//! responses whose token is not the current one are ignored.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::types::PredictionResult;
use crate::error::ServiceResult;
use crate::logic::features::FeatureVector;
use crate::logic::service::RentApi;

/// Monotonically increasing id of an outbound prediction request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the caller must now send
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub token: RequestToken,
    pub vector: FeatureVector,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Submitting { token: RequestToken },
    Success(PredictionResult),
    Failed(String),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Success(_) => "success",
            SessionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct PredictionSession {
    state: SessionState,
    /// Last successful result, kept across failures
    last_known_good: Option<PredictionResult>,
    last_success_at: Option<DateTime<Utc>>,
    last_token: u64,
    in_flight: Option<RequestToken>,
    pending: Option<FeatureVector>,
    superseded: u64,
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            last_known_good: None,
            last_success_at: None,
            last_token: 0,
            in_flight: None,
            pending: None,
            superseded: 0,
        }
    }

    // ---- read contract ----

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    /// Current prediction; `None` unless the session is in Success
    pub fn prediction(&self) -> Option<&PredictionResult> {
        match &self.state {
            SessionState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Current error message; `None` unless the session is in Failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Most recent success, even if a later attempt failed
    pub fn last_known_good(&self) -> Option<&PredictionResult> {
        self.last_known_good.as_ref()
    }

    pub fn last_success_at(&self) -> Option<DateTime<Utc>> {
        self.last_success_at
    }

    /// Vector waiting for the in-flight request to finish
    pub fn pending(&self) -> Option<&FeatureVector> {
        self.pending.as_ref()
    }

    /// Responses thrown away because a newer submission existed
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    // ---- transitions ----

    /// Register a submission.
    ///
    /// Returns the request to send, or `None` when another request is
    /// already in flight and this vector was queued behind it.
    pub fn begin(&mut self, vector: FeatureVector) -> Option<Dispatch> {
        if !vector.is_within_domain() {
            log::warn!("Submitted vector out of domain, clamping: {}", vector.to_log_entry());
        }
        let vector = vector.clamped();

        if let Some(token) = self.in_flight {
            log::debug!("Request {} still in flight, queueing latest vector", token);
            self.pending = Some(vector);
            return None;
        }

        Some(self.dispatch(vector))
    }

    /// Apply the outcome of a dispatched request.
    ///
    /// Returns the next request to send when a newer vector was queued.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: ServiceResult<PredictionResult>,
    ) -> Option<Dispatch> {
        if self.in_flight != Some(token) {
            log::debug!("Ignoring response for stale request {}", token);
            self.superseded += 1;
            return None;
        }
        self.in_flight = None;

        if let Some(vector) = self.pending.take() {
            log::debug!("Discarding response {}, a newer submission is queued", token);
            self.superseded += 1;
            return Some(self.dispatch(vector));
        }

        match outcome {
            Ok(result) => {
                log::info!("Prediction {} succeeded: {:.2}", token, result.predicted_rent);
                self.last_known_good = Some(result.clone());
                self.last_success_at = Some(Utc::now());
                self.state = SessionState::Success(result);
            }
            Err(e) => {
                log::error!("Prediction {} failed: {}", token, e);
                self.state = SessionState::Failed(e.user_message());
            }
        }
        None
    }

    /// Release the in-flight slot of a request whose outcome will never be
    /// applied, e.g. because the future driving it was dropped.
    ///
    /// A queued vector stays visible through [`pending`](Self::pending) and is
    /// replaced by the next [`begin`](Self::begin), which dispatches at once.
    pub fn abandon(&mut self, token: RequestToken) {
        if self.in_flight != Some(token) {
            return;
        }
        log::warn!("Request {} abandoned before its response arrived", token);
        self.in_flight = None;
        if matches!(self.state, SessionState::Submitting { token: current } if current == token) {
            self.state = SessionState::Idle;
        }
    }

    fn dispatch(&mut self, vector: FeatureVector) -> Dispatch {
        self.pending = None;
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.in_flight = Some(token);
        self.state = SessionState::Submitting { token };
        log::info!("Dispatching prediction {}: {}", token, vector.to_log_entry());
        Dispatch { token, vector }
    }

    /// Submit and drive the request (and any queued follow-up) to completion.
    /// Dropping the returned future mid-request abandons that request.
    pub async fn submit<A: RentApi>(&mut self, api: &A, vector: FeatureVector) -> &SessionState {
        let mut next = self.begin(vector);
        while let Some(dispatch) = next {
            let guard = Outstanding {
                session: &mut *self,
                token: Some(dispatch.token),
            };
            let outcome = api.predict(&dispatch.vector).await;
            next = guard.finish(outcome);
        }
        &self.state
    }
}

/// In-flight request on an exclusively borrowed session; abandons the
/// request if dropped before [`finish`](Self::finish).
struct Outstanding<'a> {
    session: &'a mut PredictionSession,
    token: Option<RequestToken>,
}

impl Outstanding<'_> {
    fn finish(mut self, outcome: ServiceResult<PredictionResult>) -> Option<Dispatch> {
        let token = self.token.take()?;
        self.session.complete(token, outcome)
    }
}

impl Drop for Outstanding<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.session.abandon(token);
        }
    }
}

/// Same as [`Outstanding`] for a session behind a [`SessionHandle`]. The
/// lock is taken only when finishing or abandoning.
struct SharedOutstanding<'a> {
    session: &'a Mutex<PredictionSession>,
    token: Option<RequestToken>,
}

impl SharedOutstanding<'_> {
    fn finish(mut self, outcome: ServiceResult<PredictionResult>) -> Option<Dispatch> {
        let token = self.token.take()?;
        self.session.lock().complete(token, outcome)
    }
}

impl Drop for SharedOutstanding<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.session.lock().abandon(token);
        }
    }
}

/// Shareable session for callers that may submit while a request is out.
///
/// The lock is only held between awaits, never across one.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<PredictionSession>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a vector. Returns once this call has nothing left to send;
    /// a call that only queued its vector returns immediately. Dropping the
    /// returned future mid-request abandons that request.
    pub async fn submit<A: RentApi>(&self, api: &A, vector: FeatureVector) {
        let mut next = self.inner.lock().begin(vector);
        while let Some(dispatch) = next {
            let guard = SharedOutstanding {
                session: &self.inner,
                token: Some(dispatch.token),
            };
            let outcome = api.predict(&dispatch.vector).await;
            next = guard.finish(outcome);
        }
    }

    /// Read session state under the lock
    pub fn read<R>(&self, f: impl FnOnce(&PredictionSession) -> R) -> R {
        let session = self.inner.lock();
        f(&*session)
    }

    pub fn state(&self) -> SessionState {
        self.read(|session| session.state().clone())
    }
}
