use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::{
    api::{ApiClient, AttendanceSubmission},
    attendance::normalize_rows,
    error::{AppError, AppResult},
    log_debug, log_info, log_warn,
    navigation::Route,
    session::{login, Session, SessionStore},
};

use super::state::{DashboardSnapshot, DashboardState};

const ENABLE_LOGS: bool = true;

/// Owns the dashboard's state slices and runs every dashboard operation.
///
/// The state lock is never held across a network call.
#[derive(Clone)]
pub struct DashboardController {
    state: Arc<Mutex<DashboardState>>,
    api: ApiClient,
    store: Arc<SessionStore>,
}

impl DashboardController {
    pub fn new(api: ApiClient, store: Arc<SessionStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::default())),
            api,
            store,
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Loads the persisted session, issues a challenge and pulls history.
    pub async fn mount(&self) -> DashboardSnapshot {
        let session = self.store.current();
        {
            let mut state = self.state.lock().await;
            state.reset();
            if let Some(session) = &session {
                state.challenge.regenerate(&session.id, &mut rand::thread_rng());
            }
            state.session.set(session);
        }

        if let Err(err) = self.refresh().await {
            log_warn!("Dashboard mounted without history: {err}");
        }
        self.snapshot().await
    }

    /// Re-fetches attendance history. Errors land in the records slice too,
    /// and previously loaded rows stay in place. A result that arrives after
    /// a logout, remount or newer refresh is dropped.
    pub async fn refresh(&self) -> AppResult<()> {
        let (ticket, record, display_name) = {
            let mut state = self.state.lock().await;
            let Some(session) = state.session.get() else {
                return Ok(());
            };
            if session.record.is_empty() {
                return Ok(());
            }
            let (record, display_name) = (session.record.clone(), session.full_name());
            (state.records.begin_load(), record, display_name)
        };

        let result = self.api.fetch_attendance(&record).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(rows) => {
                let today = Local::now().date_naive();
                if !state
                    .records
                    .finish_load(ticket, normalize_rows(&rows, &display_name, today))
                {
                    log_debug!("Dropping stale history for record {record}");
                }
                Ok(())
            }
            Err(err) => {
                if !state.records.fail_load(ticket, err.user_message()) {
                    log_debug!("Dropping stale history error for record {record}");
                }
                Err(err)
            }
        }
    }

    pub async fn regenerate_challenge(&self) -> AppResult<DashboardSnapshot> {
        let mut state = self.state.lock().await;
        let id = state.session.get().ok_or(AppError::NoSession)?.id.clone();
        state.challenge.regenerate(&id, &mut rand::thread_rng());
        Ok(state.snapshot())
    }

    /// Records one keystroke for a challenged position. Keystrokes for other
    /// positions are ignored.
    pub async fn enter_digit(&self, position: usize, input: &str) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        if !state.challenge.enter(position, input) {
            log_warn!("Ignoring input for unchallenged position {position}");
        }
        state.snapshot()
    }

    pub async fn open_dialog(&self) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        state.dialog_open = true;
        state.snapshot()
    }

    pub async fn close_dialog(&self) -> DashboardSnapshot {
        let mut state = self.state.lock().await;
        state.dialog_open = false;
        state.snapshot()
    }

    /// Submits an attendance mark once the challenge checks out.
    ///
    /// On success history is reloaded, a fresh challenge is issued and the
    /// dialog closes. A reload failure after a successful POST does not fail
    /// the submission.
    pub async fn submit(&self) -> AppResult<DashboardSnapshot> {
        let (submission, id) = {
            let mut state = self.state.lock().await;
            if state.submitting {
                return Err(AppError::SubmissionInFlight);
            }
            let session = state.session.get().ok_or(AppError::NoSession)?.clone();
            if !state.challenge.validate(&session.id) {
                return Err(AppError::ChallengeMismatch);
            }
            let submission = submission_for(&session)?;
            state.submitting = true;
            (submission, session.id)
        };

        let result = self.api.submit_attendance(&submission).await;
        self.state.lock().await.submitting = false;
        result?;

        log_info!("Attendance recorded for {}", submission.join_user);

        if let Err(err) = self.refresh().await {
            log_warn!("History reload after submission failed: {err}");
        }

        let mut state = self.state.lock().await;
        let same_user = state.session.get().is_some_and(|session| session.id == id);
        if same_user {
            state.challenge.regenerate(&id, &mut rand::thread_rng());
        }
        state.dialog_open = false;
        Ok(state.snapshot())
    }

    /// Clears persisted state and everything the dashboard holds.
    pub async fn logout(&self) -> AppResult<Route> {
        login::logout(&self.store)?;
        self.state.lock().await.reset();
        Ok(Route::Login)
    }
}

fn submission_for(session: &Session) -> AppResult<AttendanceSubmission> {
    let record_user = session
        .record
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::Submission(format!("record '{}' is not numeric", session.record)))?;
    Ok(AttendanceSubmission {
        record_user,
        join_user: session.user.clone(),
    })
}
