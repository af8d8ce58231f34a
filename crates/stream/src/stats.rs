use std::{
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

const THROUGHPUT_INTERVAL: Duration = Duration::from_secs(1);
const MILESTONE: u64 = 100;

/// Counters of a supervisor, shared with whoever wants to look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub frames: u64,
    pub bytes: u64,
    pub deliveries: u64,
    pub read_failures: u64,
    pub encode_failures: u64,
    pub lock_timeouts: u64,
    pub resets: u64,
    pub loops_started: u64,
    pub active_loops: u64,
}

struct Window {
    started: Instant,
    frames: u64,
}

pub struct PipelineStats {
    frames: AtomicU64,
    bytes: AtomicU64,
    deliveries: AtomicU64,
    read_failures: AtomicU64,
    encode_failures: AtomicU64,
    lock_timeouts: AtomicU64,
    resets: AtomicU64,
    loops_started: AtomicU64,
    active_loops: AtomicU64,
    window: Mutex<Window>,
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStats {
    pub fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            read_failures: AtomicU64::new(0),
            encode_failures: AtomicU64::new(0),
            lock_timeouts: AtomicU64::new(0),
            resets: AtomicU64::new(0),
            loops_started: AtomicU64::new(0),
            active_loops: AtomicU64::new(0),
            window: Mutex::new(Window {
                started: Instant::now(),
                frames: 0,
            }),
        }
    }

    /// Count a frame that went through fan-out, and log throughput once a
    /// second.
    pub fn record_frame(&self, bytes: usize, viewers: usize, delivered: usize) {
        let frames = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        self.bytes.fetch_add(bytes as u64, Ordering::Relaxed);
        self.deliveries
            .fetch_add(delivered as u64, Ordering::Relaxed);

        if frames % MILESTONE == 0 {
            log::info!("{} frames sent", frames);
        }

        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        window.frames += 1;
        let elapsed = window.started.elapsed();
        if elapsed >= THROUGHPUT_INTERVAL {
            log::info!(
                "{:.1} fps, {} bytes/frame, {}/{} viewers",
                window.frames as f64 / elapsed.as_secs_f64(),
                bytes,
                delivered,
                viewers
            );
            window.started = Instant::now();
            window.frames = 0;
        }
    }

    pub fn record_read_failure(&self) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_encode_failure(&self) {
        self.encode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lock_timeout(&self) {
        self.lock_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn loop_started(&self) {
        self.loops_started.fetch_add(1, Ordering::SeqCst);
        self.active_loops.fetch_add(1, Ordering::SeqCst);
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        window.started = Instant::now();
        window.frames = 0;
    }

    pub(crate) fn loop_finished(&self) {
        self.active_loops.fetch_sub(1, Ordering::SeqCst);
        let snapshot = self.snapshot();
        log::info!(
            "capture loop ended: {} frames, {} bytes, {} read failures, {} encode failures in total",
            snapshot.frames,
            snapshot.bytes,
            snapshot.read_failures,
            snapshot.encode_failures
        );
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
            encode_failures: self.encode_failures.load(Ordering::Relaxed),
            lock_timeouts: self.lock_timeouts.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            loops_started: self.loops_started.load(Ordering::SeqCst),
            active_loops: self.active_loops.load(Ordering::SeqCst),
        }
    }
}
