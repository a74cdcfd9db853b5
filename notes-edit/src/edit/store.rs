use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{reminders::Reminder, Error, Result};

use super::{DraftSession, EditSessionView};

/// An open session together with the reminders it resolves against.
#[derive(Debug)]
pub struct OpenEdit {
    pub session: DraftSession,
    pub reminders: Vec<Reminder>,
    last_seen: Instant,
}

impl OpenEdit {
    pub fn view(&self, session_id: Uuid) -> EditSessionView {
        EditSessionView {
            session_id,
            note_id: self.session.note_id(),
            draft: self.session.draft().clone(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// Open edit sessions by id. Closed sessions are removed, so lookups only see open ones.
///
/// A session untouched for longer than `ttl` is treated as abandoned: lookups
/// report it missing and the next `open` sweeps it out.
#[derive(Clone)]
pub struct EditSessions {
    inner: Arc<Mutex<HashMap<Uuid, OpenEdit>>>,
    ttl: Duration,
}

impl EditSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Default::default(),
            ttl,
        }
    }

    pub fn open(&self, session: DraftSession, reminders: Vec<Reminder>) -> (Uuid, EditSessionView) {
        let session_id = Uuid::now_v7();
        let edit = OpenEdit {
            session,
            reminders,
            last_seen: Instant::now(),
        };
        let view = edit.view(session_id);

        let mut sessions = self.inner.lock();
        let before = sessions.len();
        sessions.retain(|_, edit| !edit.is_expired(self.ttl));
        if sessions.len() < before {
            tracing::debug!(evicted = before - sessions.len(), "expired edit sessions evicted");
        }
        sessions.insert(session_id, edit);

        (session_id, view)
    }

    pub fn with<R>(&self, session_id: Uuid, f: impl FnOnce(&mut OpenEdit) -> R) -> Result<R> {
        let mut sessions = self.inner.lock();

        if sessions.get(&session_id).is_some_and(|edit| edit.is_expired(self.ttl)) {
            sessions.remove(&session_id);
        }

        let edit = sessions
            .get_mut(&session_id)
            .ok_or_else(|| Error::NotFound("Edit session not found".into()))?;
        edit.last_seen = Instant::now();
        Ok(f(edit))
    }

    pub fn remove(&self, session_id: Uuid) -> Option<OpenEdit> {
        self.inner.lock().remove(&session_id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
