use {
    crate::*,
    com::{DeliveryError, Packet, Session},
    std::{
        sync::Arc,
        time::{Duration, Instant},
    },
};

/// Fans one encoded frame out to a snapshot of sessions.
///
/// The frame is serialised once and queued on each session's frame lane
/// without waiting. A session that is full or gone misses this frame and
/// nothing else.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    fanout_warning: Duration,
}

impl Broadcaster {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            fanout_warning: config.fanout_warning(),
        }
    }

    /// Deliver `frame` to every session in `sessions`, returning how many
    /// accepted it.
    pub fn deliver(&self, frame: &EncodedFrame, sessions: &[Arc<Session>]) -> usize {
        if sessions.is_empty() {
            return 0;
        }

        let start = Instant::now();
        let packet = Packet::encode(&frame.to_message());
        let mut delivered = 0;
        for session in sessions {
            match session.deliver(&packet) {
                Ok(()) => delivered += 1,
                Err(DeliveryError::Full) => log::debug!(
                    "session {} is behind, dropped frame {}",
                    session.id(),
                    frame.sequence
                ),
                Err(DeliveryError::Closed) => log::warn!(
                    "session {} is gone, frame {} not delivered",
                    session.id(),
                    frame.sequence
                ),
            }
        }

        let elapsed = start.elapsed();
        if elapsed > self.fanout_warning {
            log::warn!(
                "fan-out of frame {} to {} sessions took {:?}",
                frame.sequence,
                sessions.len(),
                elapsed
            );
        }
        delivered
    }
}
