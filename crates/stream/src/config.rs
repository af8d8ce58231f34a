use std::time::Duration;

/// Tuning of the capture loop. The defaults are the production values.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamConfig {
    target_fps: f64,
    jpeg_quality: u8,
    lock_wait: Duration,
    slow_lock: Duration,
    read_timeout: Duration,
    slow_operation: Duration,
    failure_threshold: u32,
    failure_backoff: Duration,
    reset_delay: Duration,
    fanout_warning: Duration,
    behind_factor: f64,
    frame_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            target_fps: 20.0,
            jpeg_quality: 80,
            lock_wait: Duration::from_millis(100),
            slow_lock: Duration::from_millis(50),
            read_timeout: Duration::from_secs(1),
            slow_operation: Duration::from_millis(100),
            failure_threshold: 5,
            failure_backoff: Duration::from_millis(100),
            reset_delay: Duration::from_secs(1),
            fanout_warning: Duration::from_millis(200),
            behind_factor: 1.5,
            frame_capacity: 2,
        }
    }
}

impl StreamConfig {
    /// Set the output rate the loop paces itself to.
    pub fn with_target_fps(mut self, target_fps: f64) -> Self {
        self.target_fps = target_fps;
        self
    }

    /// Set the JPEG quality (1-100).
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    /// Set how long a cycle waits for the camera lock before skipping.
    pub fn with_lock_wait(mut self, lock_wait: Duration) -> Self {
        self.lock_wait = lock_wait;
        self
    }

    /// Set the lock wait above which a warning is logged.
    pub fn with_slow_lock(mut self, slow_lock: Duration) -> Self {
        self.slow_lock = slow_lock;
        self
    }

    /// Set the longest a single read may take before it counts as failed.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Set the read/encode duration above which a warning is logged.
    pub fn with_slow_operation(mut self, slow_operation: Duration) -> Self {
        self.slow_operation = slow_operation;
        self
    }

    /// Set how many consecutive failures are tolerated before a reset.
    pub fn with_failure_threshold(mut self, failure_threshold: u32) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    /// Set the pause after a failed read.
    pub fn with_failure_backoff(mut self, failure_backoff: Duration) -> Self {
        self.failure_backoff = failure_backoff;
        self
    }

    /// Set the pause between closing and reopening during a reset.
    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    /// Set the fan-out duration above which a warning is logged.
    pub fn with_fanout_warning(mut self, fanout_warning: Duration) -> Self {
        self.fanout_warning = fanout_warning;
        self
    }

    /// Set how many periods a cycle may take before the loop warns it is behind.
    pub fn with_behind_factor(mut self, behind_factor: f64) -> Self {
        self.behind_factor = behind_factor;
        self
    }

    /// Set the depth of each session's frame lane.
    pub fn with_frame_capacity(mut self, frame_capacity: usize) -> Self {
        self.frame_capacity = frame_capacity;
        self
    }

    pub fn target_fps(&self) -> f64 {
        self.target_fps
    }

    /// Time budget of one cycle.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(0.001))
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn lock_wait(&self) -> Duration {
        self.lock_wait
    }

    pub fn slow_lock(&self) -> Duration {
        self.slow_lock
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn slow_operation(&self) -> Duration {
        self.slow_operation
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }

    pub fn failure_backoff(&self) -> Duration {
        self.failure_backoff
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub fn fanout_warning(&self) -> Duration {
        self.fanout_warning
    }

    pub fn behind_factor(&self) -> f64 {
        self.behind_factor
    }

    pub fn frame_capacity(&self) -> usize {
        self.frame_capacity
    }
}
