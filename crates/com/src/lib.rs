//! Viewer-facing transport: the message protocol, per-viewer sessions with
//! prioritised outbound lanes, and the WebSocket server and client.

pub mod error;
pub use error::{ComError, DeliveryError};

pub mod protocol;
pub use protocol::{FromViewer, MAX_MESSAGE_SIZE, StreamStatus, ToViewer};

pub mod session;
pub use session::{CONTROL_CAPACITY, Packet, Session, SessionId, SessionOutbox};

pub mod ws;
pub use ws::{SessionEvent, WsClient, WsServer};
