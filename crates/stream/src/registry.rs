use {
    crate::*,
    com::{Session, SessionId, ToViewer},
    std::{
        collections::HashMap,
        sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    },
};

type SessionMap = HashMap<SessionId, Arc<Session>>;

/// The set of connected viewers.
///
/// Connects and disconnects also drive the supervisor: the first viewer
/// starts streaming and the last one to leave stops it.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<SessionMap>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionMap> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionMap> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a session, returning the number of sessions afterwards.
    pub fn add(&self, session: Arc<Session>) -> usize {
        let mut sessions = self.write();
        sessions.insert(session.id(), session);
        sessions.len()
    }

    /// Remove a session, returning it and the number of sessions left.
    pub fn remove(&self, id: SessionId) -> (Option<Arc<Session>>, usize) {
        let mut sessions = self.write();
        let removed = sessions.remove(&id);
        (removed, sessions.len())
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.read().get(&id).cloned()
    }

    /// Copy of the current session set, safe to iterate without the lock.
    pub fn snapshot(&self) -> Vec<Arc<Session>> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Register a new viewer. The first viewer starts the stream if it is not
    /// running; every viewer is told the current status.
    pub fn connect(&self, session: Arc<Session>, supervisor: &StreamSupervisor) {
        let count = self.add(session.clone());
        log::info!("session {} joined, {} connected", session.id(), count);

        let status = supervisor.status();
        if count == 1 && status.source_available && !status.running {
            let outcome = supervisor.start();
            log::info!("first viewer, auto start: {:?}", outcome);
            reply(&session, &outcome.to_message());
        }
        reply(&session, &supervisor.status().to_message());
    }

    /// Forget a viewer. Streaming stops when nobody is left.
    pub fn disconnect(&self, id: SessionId, supervisor: &StreamSupervisor) {
        let (removed, count) = self.remove(id);
        if removed.is_none() {
            return;
        }
        log::info!("session {} left, {} connected", id, count);

        if count == 0 && supervisor.status().running {
            log::info!("no viewers left, stopping stream");
            supervisor.stop();
        }
    }
}

pub(crate) fn reply(session: &Session, message: &ToViewer) {
    if let Err(e) = session.reply(message) {
        log::warn!("reply to session {} failed: {}", session.id(), e);
    }
}
