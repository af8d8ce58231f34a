use {
    crate::*,
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::{Duration, Instant},
    },
    tokio::{
        sync::{Mutex, OwnedMutexGuard},
        task::spawn_blocking,
        time::timeout,
    },
    video::{FrameSource, RawFrame, SourceConfig, VideoError},
};

type SourceLock = OwnedMutexGuard<Box<dyn FrameSource>>;

/// Exclusive access to the frame source.
///
/// Every operation takes the lock as an owned guard and moves it into the
/// blocking task that touches the device, so the lock is released when that
/// task finishes, whichever way it finishes.
pub struct CameraGuard {
    source: Arc<Mutex<Box<dyn FrameSource>>>,
    name: String,
    source_config: SourceConfig,
    lock_wait: Duration,
    slow_lock: Duration,
    read_timeout: Duration,
    slow_read: Duration,
    // a timed-out read may still own the lock
    stalled: AtomicBool,
}

impl CameraGuard {
    /// Wrap an open source. `source_config` is what a reset reopens it with.
    pub fn new(source: Box<dyn FrameSource>, source_config: SourceConfig, config: &StreamConfig) -> Self {
        Self {
            name: source.name().to_string(),
            source: Arc::new(Mutex::new(source)),
            source_config,
            lock_wait: config.lock_wait(),
            slow_lock: config.slow_lock(),
            read_timeout: config.read_timeout(),
            slow_read: config.slow_operation(),
            stalled: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn acquire(&self, wait: Duration) -> Result<SourceLock, StreamError> {
        let start = Instant::now();
        let lock = match timeout(wait, self.source.clone().lock_owned()).await {
            Ok(lock) => lock,
            Err(_) => {
                log::warn!("camera {} still busy after {:?}", self.name, wait);
                return Err(StreamError::LockTimeout(wait));
            }
        };
        self.stalled.store(false, Ordering::Release);
        let waited = start.elapsed();
        if waited > self.slow_lock {
            log::warn!("waited {:?} for camera {}", waited, self.name);
        }
        Ok(lock)
    }

    /// Read one frame.
    ///
    /// Gives up with `ReadTimeout` if the device does not answer within the
    /// read timeout. A timed-out read keeps the lock until the device
    /// returns; while it does, later reads fail with `Stalled`. Any other
    /// holder of the lock makes a read give up with `LockTimeout`.
    pub async fn read(&self) -> Result<RawFrame, StreamError> {
        let mut lock = match self.acquire(self.lock_wait).await {
            Ok(lock) => lock,
            Err(StreamError::LockTimeout(wait)) if self.stalled.load(Ordering::Acquire) => {
                return Err(StreamError::Stalled(wait));
            }
            Err(e) => return Err(e),
        };
        let start = Instant::now();
        let task = spawn_blocking(move || lock.read());
        let frame = match timeout(self.read_timeout, task).await {
            Ok(result) => result??,
            Err(_) => {
                self.stalled.store(true, Ordering::Release);
                return Err(StreamError::ReadTimeout(self.read_timeout));
            }
        };
        let elapsed = start.elapsed();
        if elapsed > self.slow_read {
            log::warn!("slow read from {}: {:?}", self.name, elapsed);
        }
        Ok(frame)
    }

    /// Close the source, wait `delay`, reopen it with the configuration the
    /// guard was created with and read one test frame. The lock is held
    /// throughout.
    pub async fn reset(&self, delay: Duration) -> Result<SourceConfig, StreamError> {
        // a hung read holds the lock for up to the read timeout
        let mut lock = self.acquire(self.read_timeout + self.lock_wait).await?;
        lock = spawn_blocking(move || {
            lock.close();
            lock
        })
        .await?;

        tokio::time::sleep(delay).await;

        let config = self.source_config.clone();
        let task = spawn_blocking(move || -> Result<SourceConfig, VideoError> {
            let actual = lock.open(&config)?;
            lock.read()?;
            Ok(actual)
        });
        // open plus one test read
        let wait = self.read_timeout * 2;
        let actual = timeout(wait, task)
            .await
            .map_err(|_| StreamError::ReadTimeout(wait))???;
        log::info!("camera {} reopened at {}", self.name, actual.size());
        Ok(actual)
    }

    /// Release the device. Used at shutdown.
    pub async fn close(&self) -> Result<(), StreamError> {
        let mut lock = self.acquire(self.read_timeout + self.lock_wait).await?;
        spawn_blocking(move || lock.close()).await?;
        log::info!("camera {} closed", self.name);
        Ok(())
    }
}
