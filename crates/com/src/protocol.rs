use {
    codec::{Codec, DecodeError, decode_bytes, encode_bytes},
    std::fmt,
};

/// Largest binary message either side accepts.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024;

/// Commands a viewer sends to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromViewer {
    Start,
    Stop,
    Ping,
    Status,
}

/// Outcome of a start or stop command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Started,
    AlreadyStarted,
    Stopped,
    AlreadyStopped,
    Error,
}

impl fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamStatus::Started => "started",
            StreamStatus::AlreadyStarted => "already_started",
            StreamStatus::Stopped => "stopped",
            StreamStatus::AlreadyStopped => "already_stopped",
            StreamStatus::Error => "error",
        };
        write!(f, "{name}")
    }
}

/// Messages the server sends to a viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ToViewer {
    Status {
        source_available: bool,
        running: bool,
    },
    StreamStatus {
        status: StreamStatus,
        message: String,
    },
    Pong,
    Frame {
        frame: Vec<u8>,
        sequence: u64,
        capture_time: f64,
        byte_length: u32,
    },
}

impl ToViewer {
    pub fn stream_status(status: StreamStatus, message: impl Into<String>) -> Self {
        ToViewer::StreamStatus {
            status,
            message: message.into(),
        }
    }
}

impl Codec for FromViewer {
    fn encode(&self, buf: &mut Vec<u8>) {
        let tag: u32 = match self {
            FromViewer::Start => 0,
            FromViewer::Stop => 1,
            FromViewer::Ping => 2,
            FromViewer::Status => 3,
        };
        tag.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        match u32::decode(buf, pos)? {
            0 => Ok(FromViewer::Start),
            1 => Ok(FromViewer::Stop),
            2 => Ok(FromViewer::Ping),
            3 => Ok(FromViewer::Status),
            tag => Err(DecodeError::InvalidVariant(tag)),
        }
    }
}

impl Codec for StreamStatus {
    fn encode(&self, buf: &mut Vec<u8>) {
        let tag: u32 = match self {
            StreamStatus::Started => 0,
            StreamStatus::AlreadyStarted => 1,
            StreamStatus::Stopped => 2,
            StreamStatus::AlreadyStopped => 3,
            StreamStatus::Error => 4,
        };
        tag.encode(buf);
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        match u32::decode(buf, pos)? {
            0 => Ok(StreamStatus::Started),
            1 => Ok(StreamStatus::AlreadyStarted),
            2 => Ok(StreamStatus::Stopped),
            3 => Ok(StreamStatus::AlreadyStopped),
            4 => Ok(StreamStatus::Error),
            tag => Err(DecodeError::InvalidVariant(tag)),
        }
    }
}

impl Codec for ToViewer {
    fn encode(&self, buf: &mut Vec<u8>) {
        match self {
            ToViewer::Status {
                source_available,
                running,
            } => {
                0u32.encode(buf);
                source_available.encode(buf);
                running.encode(buf);
            }
            ToViewer::StreamStatus { status, message } => {
                1u32.encode(buf);
                status.encode(buf);
                message.encode(buf);
            }
            ToViewer::Pong => 2u32.encode(buf),
            ToViewer::Frame {
                frame,
                sequence,
                capture_time,
                byte_length,
            } => {
                3u32.encode(buf);
                encode_bytes(frame, buf);
                sequence.encode(buf);
                capture_time.encode(buf);
                byte_length.encode(buf);
            }
        }
    }

    fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, DecodeError> {
        match u32::decode(buf, pos)? {
            0 => Ok(ToViewer::Status {
                source_available: bool::decode(buf, pos)?,
                running: bool::decode(buf, pos)?,
            }),
            1 => Ok(ToViewer::StreamStatus {
                status: StreamStatus::decode(buf, pos)?,
                message: String::decode(buf, pos)?,
            }),
            2 => Ok(ToViewer::Pong),
            3 => Ok(ToViewer::Frame {
                frame: decode_bytes(buf, pos)?,
                sequence: u64::decode(buf, pos)?,
                capture_time: f64::decode(buf, pos)?,
                byte_length: u32::decode(buf, pos)?,
            }),
            tag => Err(DecodeError::InvalidVariant(tag)),
        }
    }
}
