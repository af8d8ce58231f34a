use {
    crate::*,
    com::{StreamStatus, ToViewer},
    std::{
        sync::{
            Arc, Mutex, MutexGuard,
            atomic::{AtomicBool, AtomicU64, Ordering},
        },
        time::Instant,
    },
    tokio::task::JoinHandle,
    video::RawFrame,
};

const UNAVAILABLE: &str = "camera not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Idle,
    Running,
    Stopping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyStarted,
    Unavailable(String),
}

impl StartOutcome {
    pub fn to_message(&self) -> ToViewer {
        match self {
            StartOutcome::Started => ToViewer::stream_status(StreamStatus::Started, ""),
            StartOutcome::AlreadyStarted => {
                ToViewer::stream_status(StreamStatus::AlreadyStarted, "")
            }
            StartOutcome::Unavailable(message) => {
                ToViewer::stream_status(StreamStatus::Error, message.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    AlreadyStopped,
}

impl StopOutcome {
    pub fn to_message(&self) -> ToViewer {
        match self {
            StopOutcome::Stopped => ToViewer::stream_status(StreamStatus::Stopped, ""),
            StopOutcome::AlreadyStopped => {
                ToViewer::stream_status(StreamStatus::AlreadyStopped, "")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorStatus {
    pub source_available: bool,
    pub running: bool,
}

impl SupervisorStatus {
    pub fn to_message(&self) -> ToViewer {
        ToViewer::Status {
            source_available: self.source_available,
            running: self.running,
        }
    }
}

struct Lifecycle {
    state: StreamState,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    config: StreamConfig,
    guard: CameraGuard,
    encoder: FrameEncoder,
    broadcaster: Broadcaster,
    registry: Arc<SessionRegistry>,
    stats: PipelineStats,
    lifecycle: Mutex<Lifecycle>,
    stop: AtomicBool,
    available: AtomicBool,
    sequence: AtomicU64,
}

/// Owns the capture loop and its Idle, Running and Stopping lifecycle.
///
/// `start` and `stop` never wait for the loop. At most one loop exists at any
/// time: stopping only raises a flag the loop checks at the top of each
/// cycle, and starting again before the loop has noticed simply lowers it.
#[derive(Clone)]
pub struct StreamSupervisor {
    shared: Arc<Shared>,
}

impl StreamSupervisor {
    pub fn new(guard: CameraGuard, registry: Arc<SessionRegistry>, config: StreamConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                encoder: FrameEncoder::new(&config),
                broadcaster: Broadcaster::new(&config),
                config,
                guard,
                registry,
                stats: PipelineStats::new(),
                lifecycle: Mutex::new(Lifecycle {
                    state: StreamState::Idle,
                    task: None,
                }),
                stop: AtomicBool::new(false),
                available: AtomicBool::new(true),
                sequence: AtomicU64::new(0),
            }),
        }
    }

    pub fn start(&self) -> StartOutcome {
        let mut lifecycle = self.shared.lifecycle();
        if !self.shared.available.load(Ordering::Acquire) {
            return StartOutcome::Unavailable(UNAVAILABLE.to_string());
        }
        match lifecycle.state {
            StreamState::Running => StartOutcome::AlreadyStarted,
            StreamState::Stopping => {
                // the loop has not exited yet, keep it
                self.shared.stop.store(false, Ordering::Release);
                lifecycle.state = StreamState::Running;
                log::info!("stream re-armed before the loop exited");
                StartOutcome::AlreadyStarted
            }
            StreamState::Idle => {
                self.shared.stop.store(false, Ordering::Release);
                lifecycle.state = StreamState::Running;
                self.shared.stats.loop_started();
                lifecycle.task = Some(tokio::spawn(run(self.shared.clone())));
                log::info!(
                    "stream started at {} fps from {}",
                    self.shared.config.target_fps(),
                    self.shared.guard.name()
                );
                StartOutcome::Started
            }
        }
    }

    pub fn stop(&self) -> StopOutcome {
        let mut lifecycle = self.shared.lifecycle();
        match lifecycle.state {
            StreamState::Running => {
                self.shared.stop.store(true, Ordering::Release);
                lifecycle.state = StreamState::Stopping;
                log::info!("stream stopping");
                StopOutcome::Stopped
            }
            _ => StopOutcome::AlreadyStopped,
        }
    }

    pub fn status(&self) -> SupervisorStatus {
        let lifecycle = self.shared.lifecycle();
        SupervisorStatus {
            source_available: self.shared.available.load(Ordering::Acquire),
            running: lifecycle.state == StreamState::Running,
        }
    }

    pub fn state(&self) -> StreamState {
        self.shared.lifecycle().state
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Stop for good: end the loop, wait for it and close the source.
    /// Later `start` calls report the source as unavailable.
    pub async fn shutdown(&self) {
        let task = {
            let mut lifecycle = self.shared.lifecycle();
            self.shared.available.store(false, Ordering::Release);
            self.shared.stop.store(true, Ordering::Release);
            if lifecycle.state == StreamState::Running {
                lifecycle.state = StreamState::Stopping;
            }
            lifecycle.task.take()
        };
        if let Some(task) = task {
            if let Err(e) = task.await {
                log::warn!("capture loop did not exit cleanly: {}", e);
            }
        }
        if let Err(e) = self.shared.guard.close().await {
            log::warn!("closing camera failed: {}", e);
        }
        log::info!("stream shut down");
    }
}

impl Shared {
    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// End the loop if a stop is still requested. Checked under the lifecycle
    /// lock so a concurrent `start` either re-arms this loop or sees Idle.
    fn retire_if_stopped(&self) -> bool {
        let mut lifecycle = self.lifecycle();
        if !self.stop.load(Ordering::Acquire) {
            return false;
        }
        lifecycle.state = StreamState::Idle;
        lifecycle.task = None;
        self.stats.loop_finished();
        log::info!("stream stopped");
        true
    }

    fn retire_unavailable(&self) {
        let mut lifecycle = self.lifecycle();
        self.available.store(false, Ordering::Release);
        lifecycle.state = StreamState::Idle;
        lifecycle.task = None;
        self.stats.loop_finished();
    }

    async fn publish(&self, raw: RawFrame) {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let overlays = frame_overlays(sequence, raw.captured_at);
        match self.encoder.encode(raw, sequence, overlays).await {
            Ok(frame) => {
                let sessions = self.registry.snapshot();
                let delivered = self.broadcaster.deliver(&frame, &sessions);
                self.stats
                    .record_frame(frame.byte_length(), sessions.len(), delivered);
            }
            Err(e) => {
                self.stats.record_encode_failure();
                log::warn!("skipping frame {}: {}", sequence, e);
            }
        }
    }

    /// Reset the source after a run of failures. Returns false when the
    /// source is gone for good.
    async fn recover(&self, recovery: &mut RecoveryPolicy) -> bool {
        match recovery.state().last_reset_attempt {
            Some(previous) => log::warn!(
                "{} consecutive read failures, resetting camera {} (previous reset {:?} ago)",
                recovery.consecutive_failures(),
                self.guard.name(),
                previous.elapsed()
            ),
            None => log::warn!(
                "{} consecutive read failures, resetting camera {}",
                recovery.consecutive_failures(),
                self.guard.name()
            ),
        }
        self.stats.record_reset();
        let result = self.guard.reset(self.config.reset_delay()).await;
        recovery.reset_finished();
        match result {
            Ok(_) => {
                log::info!("camera {} reset succeeded", self.guard.name());
                true
            }
            Err(e) => {
                log::error!("camera {} reset failed, source unavailable: {}", self.guard.name(), e);
                self.retire_unavailable();
                false
            }
        }
    }

    async fn pace(&self, started: Instant) {
        let period = self.config.period();
        let elapsed = started.elapsed();
        if elapsed.as_secs_f64() > period.as_secs_f64() * self.config.behind_factor() {
            log::warn!("cycle took {:?}, falling behind the {:?} period", elapsed, period);
        }
        if let Some(rest) = period.checked_sub(elapsed) {
            tokio::time::sleep(rest).await;
        }
    }
}

async fn run(shared: Arc<Shared>) {
    let mut recovery = RecoveryPolicy::new(shared.config.failure_threshold());
    loop {
        if shared.stop.load(Ordering::Acquire) && shared.retire_if_stopped() {
            return;
        }

        let started = Instant::now();
        match shared.guard.read().await {
            Ok(raw) => {
                recovery.record_success();
                shared.publish(raw).await;
            }
            Err(StreamError::LockTimeout(wait)) => {
                shared.stats.record_lock_timeout();
                log::warn!("camera busy for {:?}, skipping cycle", wait);
            }
            Err(e) => {
                shared.stats.record_read_failure();
                let action = recovery.record_failure();
                log::warn!(
                    "read failed ({} in a row): {}",
                    recovery.consecutive_failures(),
                    e
                );
                match action {
                    RecoveryAction::Reset => {
                        if !shared.recover(&mut recovery).await {
                            return;
                        }
                    }
                    RecoveryAction::Retry => {
                        tokio::time::sleep(shared.config.failure_backoff()).await;
                    }
                }
                continue;
            }
        }

        shared.pace(started).await;
    }
}
