//! Server application state management

use crate::constants::{DEFAULT_DRAFT_TTL_SECS, DEFAULT_MAX_DRAFTS};
use registration::{DirectoryChain, FormState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use submission::SubmissionSink;
use tracing::{info, warn};
use uuid::Uuid;

/// How long idle drafts live and how many may be open at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLimits {
    /// A draft untouched for this long is dropped
    pub ttl: Duration,
    /// Opening a draft beyond this evicts the least recently touched one
    pub max_open: usize,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_DRAFT_TTL_SECS),
            max_open: DEFAULT_MAX_DRAFTS,
        }
    }
}

struct DraftSession {
    form: FormState,
    last_touched: Instant,
    /// Orders sessions by recency for eviction
    stamp: u64,
}

#[derive(Default)]
struct DraftStore {
    sessions: HashMap<Uuid, DraftSession>,
    next_stamp: u64,
}

impl DraftStore {
    fn stamp(&mut self) -> u64 {
        self.next_stamp += 1;
        self.next_stamp
    }
}

impl DraftSession {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_touched) >= ttl
    }
}

/// Shared by every worker
pub struct AppState {
    /// Emails already taken: the configured rejection set plus whatever the sink knows
    pub directory: DirectoryChain,
    /// Receives accepted registrations
    pub sink: Arc<dyn SubmissionSink>,
    limits: DraftLimits,
    /// Open form-filling sessions, keyed by draft id
    drafts: Mutex<DraftStore>,
}

impl AppState {
    pub fn with_limits(
        directory: DirectoryChain,
        sink: Arc<dyn SubmissionSink>,
        limits: DraftLimits,
    ) -> Self {
        Self {
            directory,
            sink,
            limits,
            drafts: Mutex::new(DraftStore::default()),
        }
    }

    /// Open a new session with an empty draft. Expired sessions are swept first.
    pub fn create_draft(&self) -> (Uuid, FormState) {
        let now = Instant::now();
        let mut drafts = self.lock_drafts();
        self.sweep(&mut drafts, now);

        while drafts.sessions.len() >= self.limits.max_open.max(1) {
            let oldest = drafts
                .sessions
                .iter()
                .min_by_key(|(_, session)| session.stamp)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    drafts.sessions.remove(&id);
                    info!(draft_id = %id, "Evicted least recently used draft");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let form = FormState::new();
        let stamp = drafts.stamp();
        drafts.sessions.insert(
            id,
            DraftSession {
                form: form.clone(),
                last_touched: now,
                stamp,
            },
        );
        (id, form)
    }

    /// Run `f` against the session, if it exists and has not expired.
    /// The lock is held only for the call, and the session counts as touched.
    pub fn with_draft<R>(&self, id: &Uuid, f: impl FnOnce(&mut FormState) -> R) -> Option<R> {
        let now = Instant::now();
        let mut drafts = self.lock_drafts();
        let expired = drafts
            .sessions
            .get(id)
            .is_some_and(|session| session.is_expired(now, self.limits.ttl));
        if expired {
            drafts.sessions.remove(id);
            info!(draft_id = %id, "Draft expired");
            return None;
        }

        let stamp = drafts.stamp();
        drafts.sessions.get_mut(id).map(|session| {
            session.last_touched = now;
            session.stamp = stamp;
            f(&mut session.form)
        })
    }

    pub fn remove_draft(&self, id: &Uuid) -> bool {
        self.lock_drafts().sessions.remove(id).is_some()
    }

    pub fn draft_count(&self) -> usize {
        self.lock_drafts().sessions.len()
    }

    fn sweep(&self, drafts: &mut DraftStore, now: Instant) {
        let before = drafts.sessions.len();
        drafts
            .sessions
            .retain(|_, session| !session.is_expired(now, self.limits.ttl));
        let swept = before - drafts.sessions.len();
        if swept > 0 {
            info!(swept, "Dropped idle drafts");
        }
    }

    fn lock_drafts(&self) -> MutexGuard<'_, DraftStore> {
        // a panic mid-update leaves at worst one half-edited draft; keep serving
        self.drafts.lock().unwrap_or_else(|poisoned| {
            warn!("Draft store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
