use {
    crate::*,
    codec::{Codec, DecodeError},
    std::{fmt, net::SocketAddr},
    tokio::sync::mpsc::{self, error::TrySendError},
    tokio_websockets::Message,
};

/// Depth of every session's control lane.
pub const CONTROL_CAPACITY: usize = 32;

pub type SessionId = u64;

/// An encoded server message, ready to hand to any number of sessions.
#[derive(Clone)]
pub struct Packet {
    message: Message,
    len: usize,
}

impl Packet {
    pub fn encode(value: &ToViewer) -> Self {
        let payload = value.to_bytes();
        let len = payload.len();
        Self {
            message: Message::binary(payload),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn decode(self) -> Result<ToViewer, DecodeError> {
        ToViewer::from_bytes(&self.message.into_payload())
    }

    pub(crate) fn into_message(self) -> Message {
        self.message
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet({} bytes)", self.len)
    }
}

/// One connected viewer, as seen by the rest of the server.
///
/// Outbound traffic goes through two bounded lanes. Replies use the control
/// lane, frames use the frame lane, and the writer always empties the control
/// lane first so a ping is never stuck behind video.
pub struct Session {
    id: SessionId,
    peer: SocketAddr,
    control: mpsc::Sender<Packet>,
    frames: mpsc::Sender<Packet>,
}

impl Session {
    /// Create a session and the outbox its writer drains.
    pub fn new(id: SessionId, peer: SocketAddr, frame_capacity: usize) -> (Self, SessionOutbox) {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_CAPACITY);
        let (frames_tx, frames_rx) = mpsc::channel(frame_capacity.max(1));
        (
            Self {
                id,
                peer,
                control: control_tx,
                frames: frames_tx,
            },
            SessionOutbox {
                control: control_rx,
                frames: frames_rx,
            },
        )
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Queue a frame without waiting. A full lane drops the frame.
    pub fn deliver(&self, packet: &Packet) -> Result<(), DeliveryError> {
        self.frames.try_send(packet.clone()).map_err(lane_error)
    }

    /// Queue a control reply without waiting.
    pub fn reply(&self, message: &ToViewer) -> Result<(), DeliveryError> {
        self.control
            .try_send(Packet::encode(message))
            .map_err(lane_error)
    }

    pub fn is_closed(&self) -> bool {
        self.control.is_closed()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("peer", &self.peer)
            .finish()
    }
}

fn lane_error<T>(error: TrySendError<T>) -> DeliveryError {
    match error {
        TrySendError::Full(_) => DeliveryError::Full,
        TrySendError::Closed(_) => DeliveryError::Closed,
    }
}

/// Receiving side of a session's lanes.
pub struct SessionOutbox {
    control: mpsc::Receiver<Packet>,
    frames: mpsc::Receiver<Packet>,
}

impl SessionOutbox {
    /// Next packet to write, control lane first. `None` once the session is
    /// dropped and both lanes are drained.
    pub async fn next(&mut self) -> Option<Packet> {
        tokio::select! {
            biased;
            Some(packet) = self.control.recv() => Some(packet),
            Some(packet) = self.frames.recv() => Some(packet),
            else => None,
        }
    }

    /// Next packet if one is already queued.
    pub fn try_next(&mut self) -> Option<Packet> {
        self.control
            .try_recv()
            .or_else(|_| self.frames.try_recv())
            .ok()
    }
}
