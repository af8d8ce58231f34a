use {
    crate::*,
    com::{FromViewer, SessionEvent, SessionId, ToViewer, WsServer},
    std::{future::Future, sync::Arc},
};

/// Routes transport events to the registry and the supervisor.
///
/// Handling an event never waits on the capture loop; replies go out on the
/// session's control lane.
#[derive(Clone)]
pub struct Control {
    registry: Arc<SessionRegistry>,
    supervisor: StreamSupervisor,
}

impl Control {
    pub fn new(registry: Arc<SessionRegistry>, supervisor: StreamSupervisor) -> Self {
        Self {
            registry,
            supervisor,
        }
    }

    pub fn supervisor(&self) -> &StreamSupervisor {
        &self.supervisor
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn handle(&self, event: SessionEvent) {
        match event {
            SessionEvent::Connected(session) => self.registry.connect(session, &self.supervisor),
            SessionEvent::Message(id, command) => self.command(id, command),
            SessionEvent::Disconnected(id) => self.registry.disconnect(id, &self.supervisor),
        }
    }

    fn command(&self, id: SessionId, command: FromViewer) {
        let Some(session) = self.registry.get(id) else {
            log::debug!("{:?} from unknown session {}", command, id);
            return;
        };
        let message = match command {
            FromViewer::Start => {
                let outcome = self.supervisor.start();
                log::info!("session {} start: {:?}", id, outcome);
                outcome.to_message()
            }
            FromViewer::Stop => {
                let outcome = self.supervisor.stop();
                log::info!("session {} stop: {:?}", id, outcome);
                outcome.to_message()
            }
            FromViewer::Ping => ToViewer::Pong,
            FromViewer::Status => self.supervisor.status().to_message(),
        };
        crate::registry::reply(&session, &message);
    }

    /// Dispatch server events until `shutdown` completes, then shut the
    /// pipeline down.
    pub async fn run(self, mut server: WsServer, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                event = server.recv() => match event {
                    Ok(event) => self.handle(event),
                    Err(e) => {
                        log::error!("session events ended: {}", e);
                        break;
                    }
                },
                _ = &mut shutdown => {
                    log::info!("shutdown requested");
                    break;
                }
            }
        }
        self.supervisor.shutdown().await;
    }
}
