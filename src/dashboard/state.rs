use rand::Rng;
use serde::Serialize;

use crate::{
    attendance::{AttendanceRecord, Challenge},
    session::Session,
};

/// The signed-in user, as read from the store on mount.
#[derive(Debug, Clone, Default)]
pub struct SessionSlice {
    session: Option<Session>,
}

impl SessionSlice {
    pub fn get(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn clear(&mut self) {
        self.session = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChallengeSlice {
    challenge: Option<Challenge>,
}

impl ChallengeSlice {
    pub fn get(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Replaces the current challenge; any typed digits are discarded.
    pub fn regenerate<R: Rng>(&mut self, id: &str, rng: &mut R) {
        self.challenge = Challenge::generate(id, rng);
    }

    pub fn enter(&mut self, position: usize, input: &str) -> bool {
        self.challenge
            .as_mut()
            .and_then(|challenge| challenge.enter(position, input))
            .is_some()
    }

    /// An absent challenge never validates.
    pub fn validate(&self, id: &str) -> bool {
        self.challenge
            .as_ref()
            .is_some_and(|challenge| challenge.validate(id))
    }

    pub fn clear(&mut self) {
        self.challenge = None;
    }
}

/// History rows plus the load status shown above the table.
#[derive(Debug, Clone, Default)]
pub struct RecordsSlice {
    rows: Vec<AttendanceRecord>,
    loading: bool,
    error: Option<String>,
    /// Bumped by every `begin_load` and `clear`; never rewinds, so a load
    /// started before a logout can't land after it.
    generation: u64,
}

impl RecordsSlice {
    pub fn rows(&self) -> &[AttendanceRecord] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a load as started and returns its ticket.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Applies the rows only if `ticket` is the latest load. Returns whether
    /// they were applied.
    pub fn finish_load(&mut self, ticket: u64, rows: Vec<AttendanceRecord>) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.rows = rows;
        self.loading = false;
        true
    }

    /// Keeps whatever rows were loaded before. Stale tickets are ignored.
    pub fn fail_load(&mut self, ticket: u64, message: String) -> bool {
        if ticket != self.generation {
            return false;
        }
        self.error = Some(message);
        self.loading = false;
        true
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.loading = false;
        self.error = None;
        self.generation += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub session: SessionSlice,
    pub challenge: ChallengeSlice,
    pub records: RecordsSlice,
    pub dialog_open: bool,
    pub submitting: bool,
}

impl DashboardState {
    pub fn reset(&mut self) {
        self.session.clear();
        self.challenge.clear();
        self.records.clear();
        self.dialog_open = false;
        self.submitting = false;
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let session = self.session.get();
        let challenge = self.challenge.get();
        DashboardSnapshot {
            full_name: session.map(Session::full_name).unwrap_or_default(),
            short_name: session.map(Session::short_name).unwrap_or_default(),
            mail: session.map(|s| s.mail.clone()).unwrap_or_default(),
            challenge: challenge
                .map(|c| {
                    c.positions()
                        .into_iter()
                        .map(|position| ChallengeSlot {
                            position,
                            value: c.entered(position).unwrap_or_default().to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            records: self.records.rows().to_vec(),
            loading: self.records.is_loading(),
            error: self.records.error().map(str::to_string),
            dialog_open: self.dialog_open,
            submitting: self.submitting,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSlot {
    pub position: usize,
    pub value: String,
}

/// What the dashboard renders. The national id itself never leaves the
/// backend; only the challenged positions do.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub full_name: String,
    pub short_name: String,
    pub mail: String,
    pub challenge: Vec<ChallengeSlot>,
    pub records: Vec<AttendanceRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub dialog_open: bool,
    pub submitting: bool,
}

impl DashboardSnapshot {
    pub fn has_user(&self) -> bool {
        !self.full_name.trim().is_empty()
    }
}
