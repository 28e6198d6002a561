use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::draft::CvDraft;
use crate::session::commands::{dispatch, Command, Effect};
use crate::session::{PageSession, SessionError, SubmitStatus};

/// Idle time after which a session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Process-wide session store. Every mutation takes the write lock for the
/// length of one pure transition and hands back a snapshot.
///
/// Sessions idle past the TTL are dropped: all of them when a new session is
/// created, and any single one as soon as it is addressed.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, PageSession>>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

/// Returns the live session `id`, marking it touched. An expired session is
/// removed and reported as not found.
fn checkout(
    sessions: &mut HashMap<Uuid, PageSession>,
    id: Uuid,
    ttl: Duration,
) -> Result<&mut PageSession, SessionError> {
    let now = Utc::now();
    if sessions.get(&id).is_some_and(|s| s.is_expired(now, ttl)) {
        sessions.remove(&id);
        debug!("Page session {id} expired");
    }
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    session.touched_at = now;
    Ok(session)
}

fn sweep(sessions: &mut HashMap<Uuid, PageSession>, now: DateTime<Utc>, ttl: Duration) {
    let before = sessions.len();
    sessions.retain(|_, s| !s.is_expired(now, ttl));
    let dropped = before - sessions.len();
    if dropped > 0 {
        debug!("Dropped {dropped} idle page sessions");
    }
}

impl SessionRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    pub async fn create(&self, profile: Option<String>) -> PageSession {
        let session = PageSession::new(profile);
        let mut sessions = self.sessions.write().await;
        sweep(&mut sessions, session.created_at, self.ttl);
        sessions.insert(session.id, session.clone());
        debug!("Created page session {}", session.id);
        session
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<PageSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = checkout(&mut sessions, id, self.ttl)?;
        Ok(session.clone())
    }

    pub async fn apply(
        &self,
        id: Uuid,
        command: Command,
    ) -> Result<(Effect, PageSession), SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = checkout(&mut sessions, id, self.ttl)?;
        let effect = dispatch(session, command)?;
        Ok((effect, session.clone()))
    }

    /// Marks the session as submitting and returns its collected draft.
    pub async fn begin_submit(&self, id: Uuid) -> Result<CvDraft, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = checkout(&mut sessions, id, self.ttl)?;
        if session.submitting {
            return Err(SessionError::SubmitInFlight(id));
        }
        let missing = session.builder.missing_required();
        if !missing.is_empty() {
            return Err(SessionError::NotReady(missing));
        }
        session.submitting = true;
        Ok(session.builder.collect())
    }

    /// Clears the submitting flag. A successful save also clears every
    /// input; a failure leaves the form as it was. `None` only releases.
    pub async fn finish_submit(
        &self,
        id: Uuid,
        status: Option<SubmitStatus>,
    ) -> Result<PageSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = checkout(&mut sessions, id, self.ttl)?;
        session.submitting = false;
        if let Some(status) = status {
            if matches!(status, SubmitStatus::Success { .. }) {
                session.builder.clear_inputs();
            }
            session.last_status = Some(status);
        }
        Ok(session.clone())
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
