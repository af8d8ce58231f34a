#![allow(dead_code)]

use {
    base::Vec2,
    com::{Packet, Session, SessionOutbox, ToViewer},
    image::{Image, PixelFormat},
    std::{
        net::SocketAddr,
        sync::{Arc, Mutex},
        time::Duration,
    },
    stream::*,
    video::{FrameSource, RawFrame, SourceConfig, VideoError},
};

pub const FRAME_SIZE: Vec2<usize> = Vec2 { x: 16, y: 12 };

/// What the scripted source does next, plus what it has seen.
#[derive(Default)]
pub struct Script {
    /// Reads left that fail before reads succeed again.
    pub failing_reads: u32,
    /// Every read fails.
    pub broken: bool,
    /// Opens fail.
    pub refuse_open: bool,
    /// Read numbers (1-based, over the source lifetime) that return an
    /// undecodable frame.
    pub corrupt_reads: Vec<u64>,
    /// Sleep inside each read.
    pub read_delay: Duration,
    pub reads: u64,
    pub opens: u32,
    pub closes: u32,
}

/// A `FrameSource` whose behavior tests change while it runs.
pub struct ScriptedSource {
    script: Arc<Mutex<Script>>,
    open: bool,
}

impl ScriptedSource {
    pub fn new() -> (Self, Arc<Mutex<Script>>) {
        let script = Arc::new(Mutex::new(Script::default()));
        (
            Self {
                script: script.clone(),
                open: true,
            },
            script,
        )
    }
}

impl FrameSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn open(&mut self, config: &SourceConfig) -> Result<SourceConfig, VideoError> {
        let mut script = self.script.lock().unwrap();
        script.opens += 1;
        if script.refuse_open {
            return Err(VideoError::Device("device vanished".to_string()));
        }
        self.open = true;
        Ok(config.clone())
    }

    fn read(&mut self) -> Result<RawFrame, VideoError> {
        let delay = self.script.lock().unwrap().read_delay;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let mut script = self.script.lock().unwrap();
        if !self.open {
            return Err(VideoError::Closed);
        }
        script.reads += 1;
        if script.broken {
            return Err(VideoError::Stream("select timeout".to_string()));
        }
        if script.failing_reads > 0 {
            script.failing_reads -= 1;
            return Err(VideoError::Stream("select timeout".to_string()));
        }
        let reads = script.reads;
        let image = if script.corrupt_reads.contains(&reads) {
            Image::new(FRAME_SIZE, vec![0x42; 64], PixelFormat::Jpeg)
        } else {
            Image::filled(FRAME_SIZE, [40, 80, 120])
        };
        Ok(RawFrame::new(image, reads))
    }

    fn close(&mut self) {
        self.script.lock().unwrap().closes += 1;
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

pub fn source_config() -> SourceConfig {
    SourceConfig::default().with_size(FRAME_SIZE)
}

/// Production settings with the slow waits shortened.
pub fn fast_config() -> StreamConfig {
    StreamConfig::default()
        .with_failure_backoff(Duration::from_millis(5))
        .with_reset_delay(Duration::from_millis(20))
        .with_read_timeout(Duration::from_millis(500))
}

pub struct Pipeline {
    pub supervisor: StreamSupervisor,
    pub registry: Arc<SessionRegistry>,
    pub script: Arc<Mutex<Script>>,
}

pub fn pipeline(config: StreamConfig) -> Pipeline {
    let (source, script) = ScriptedSource::new();
    let guard = CameraGuard::new(Box::new(source), source_config(), &config);
    let registry = Arc::new(SessionRegistry::new());
    let supervisor = StreamSupervisor::new(guard, registry.clone(), config);
    Pipeline {
        supervisor,
        registry,
        script,
    }
}

pub fn session(id: u64, frame_capacity: usize) -> (Arc<Session>, SessionOutbox) {
    let peer = SocketAddr::from(([127, 0, 0, 1], 40000 + id as u16));
    let (session, outbox) = Session::new(id, peer, frame_capacity);
    (Arc::new(session), outbox)
}

/// Everything queued on an outbox right now, decoded.
pub fn drain(outbox: &mut SessionOutbox) -> Vec<ToViewer> {
    let mut messages = Vec::new();
    while let Some(packet) = outbox.try_next() {
        messages.push(decode(packet));
    }
    messages
}

pub fn decode(packet: Packet) -> ToViewer {
    packet.decode().expect("undecodable packet")
}

pub fn frame_sequences(messages: &[ToViewer]) -> Vec<u64> {
    messages
        .iter()
        .filter_map(|message| match message {
            ToViewer::Frame { sequence, .. } => Some(*sequence),
            _ => None,
        })
        .collect()
}

pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
