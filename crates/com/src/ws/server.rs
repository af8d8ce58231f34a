use {
    crate::*,
    codec::Codec,
    futures_util::{SinkExt, StreamExt},
    std::{
        net::SocketAddr,
        sync::{
            Arc,
            atomic::{AtomicU64, Ordering},
        },
        time::Duration,
    },
    tokio::{
        net::{TcpListener, TcpStream, ToSocketAddrs},
        sync::mpsc,
        task::JoinHandle,
    },
    tokio_websockets::ServerBuilder,
};

/// What happened on a viewer connection.
#[derive(Debug)]
pub enum SessionEvent {
    /// Handshake done; the session is ready to receive packets.
    Connected(Arc<Session>),
    /// A command arrived from the viewer.
    Message(SessionId, FromViewer),
    /// The connection is gone. Always the last event for a session.
    Disconnected(SessionId),
}

pub struct WsServer {
    rx: mpsc::Receiver<SessionEvent>,
    accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl WsServer {
    /// Bind a TCP listener and start accepting WebSocket connections.
    ///
    /// Every accepted connection gets its own task, which performs the
    /// handshake, spawns the session writer and then reads commands until the
    /// viewer goes away. `frame_capacity` is the depth of each session's frame
    /// lane.
    pub async fn bind(addr: impl ToSocketAddrs, frame_capacity: usize) -> Result<Self, ComError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let (tx, rx) = mpsc::channel(256);

        let accept_task = tokio::spawn(async move {
            let next_id = AtomicU64::new(1);
            loop {
                match listener.accept().await {
                    Ok((tcp_stream, peer)) => {
                        let id = next_id.fetch_add(1, Ordering::Relaxed);
                        tokio::spawn(serve(tcp_stream, peer, id, frame_capacity, tx.clone()));
                    }
                    Err(e) => {
                        log::warn!("accept error: {}", e);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
        });

        Ok(Self {
            rx,
            accept_task,
            local_addr,
        })
    }

    /// Receive the next session event from any connection.
    pub async fn recv(&mut self) -> Result<SessionEvent, ComError> {
        self.rx.recv().await.ok_or(ComError::ConnectionClosed)
    }

    /// Return the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for WsServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve(
    tcp_stream: TcpStream,
    peer: SocketAddr,
    id: SessionId,
    frame_capacity: usize,
    events: mpsc::Sender<SessionEvent>,
) {
    let _ = tcp_stream.set_nodelay(true);
    let ws_stream = match ServerBuilder::new().accept(tcp_stream).await {
        Ok((_request, ws_stream)) => ws_stream,
        Err(e) => {
            log::warn!("handshake with {} failed: {}", peer, e);
            return;
        }
    };

    let (session, mut outbox) = Session::new(id, peer, frame_capacity);
    if events
        .send(SessionEvent::Connected(Arc::new(session)))
        .await
        .is_err()
    {
        return;
    }
    log::info!("session {} connected from {}", id, peer);

    let (mut sink, mut reader) = ws_stream.split();

    let writer = tokio::spawn(async move {
        while let Some(packet) = outbox.next().await {
            if let Err(e) = sink.send(packet.into_message()).await {
                log::debug!("session {} write failed: {}", id, e);
                break;
            }
        }
        let _ = sink.close().await;
    });

    loop {
        match reader.next().await {
            Some(Ok(msg)) => {
                // text and control frames are ignored
                if !msg.is_binary() {
                    continue;
                }
                let payload = msg.into_payload();
                if payload.len() > MAX_MESSAGE_SIZE {
                    log::warn!(
                        "session {} sent {} bytes, over the limit",
                        id,
                        payload.len()
                    );
                    continue;
                }
                match FromViewer::from_bytes(&payload) {
                    Ok(command) => {
                        if events.send(SessionEvent::Message(id, command)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("session {} sent a bad message: {}", id, e),
                }
            }
            Some(Err(e)) => {
                log::warn!("session {} error: {}", id, e);
                break;
            }
            None => break,
        }
    }

    writer.abort();
    log::info!("session {} disconnected", id);
    let _ = events.send(SessionEvent::Disconnected(id)).await;
}
