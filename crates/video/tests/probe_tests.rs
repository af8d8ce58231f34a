use base::Vec2;
use image::{Image, PixelFormat};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use video::{FrameSource, RawFrame, SourceConfig, SourceKind, VideoError, probe, probe_with};

struct FakeDevice {
    open_ok: bool,
    read_ok: bool,
    opened: bool,
    closed: Arc<AtomicBool>,
}

impl FakeDevice {
    fn new(open_ok: bool, read_ok: bool) -> (Self, Arc<AtomicBool>) {
        let closed = Arc::new(AtomicBool::new(false));
        let device = Self {
            open_ok,
            read_ok,
            opened: false,
            closed: closed.clone(),
        };
        (device, closed)
    }
}

impl FrameSource for FakeDevice {
    fn name(&self) -> &str {
        "fake"
    }

    fn open(&mut self, config: &SourceConfig) -> Result<SourceConfig, VideoError> {
        if !self.open_ok {
            return Err(VideoError::Device("no such device".to_string()));
        }
        self.opened = true;
        Ok(config.clone().with_format(PixelFormat::Gray8))
    }

    fn read(&mut self) -> Result<RawFrame, VideoError> {
        if !self.read_ok {
            return Err(VideoError::Stream("select timeout".to_string()));
        }
        let image = Image::new(Vec2::new(2, 2), vec![0u8; 4], PixelFormat::Gray8);
        Ok(RawFrame::new(image, 1))
    }

    fn close(&mut self) {
        self.opened = false;
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_open(&self) -> bool {
        self.opened
    }
}

fn config() -> SourceConfig {
    SourceConfig::default().with_size(Vec2::new(64, 48))
}

#[test]
fn test_working_device_is_kept() {
    let (device, closed) = FakeDevice::new(true, true);

    let probed = probe_with(Some(Box::new(device)), &config()).unwrap();

    assert_eq!(probed.kind, SourceKind::Device);
    assert_eq!(probed.source.name(), "fake");
    assert_eq!(probed.config.format(), PixelFormat::Gray8);
    assert!(probed.source.is_open());
    assert!(!closed.load(Ordering::SeqCst));
}

#[test]
fn test_open_failure_falls_back_to_synthetic() {
    let (device, _closed) = FakeDevice::new(false, true);

    let probed = probe_with(Some(Box::new(device)), &config()).unwrap();

    assert_eq!(probed.kind, SourceKind::Synthetic);
    assert_eq!(probed.source.name(), "synthetic");
    assert!(probed.source.is_open());
}

#[test]
fn test_first_read_failure_falls_back_and_releases_device() {
    let (device, closed) = FakeDevice::new(true, false);

    let probed = probe_with(Some(Box::new(device)), &config()).unwrap();

    assert_eq!(probed.kind, SourceKind::Synthetic);
    assert!(closed.load(Ordering::SeqCst), "failed device should be closed");
}

#[test]
fn test_missing_backend_uses_synthetic() {
    let mut probed = probe_with(None, &config()).unwrap();

    assert_eq!(probed.kind, SourceKind::Synthetic);
    assert_eq!(probed.source.read().unwrap().image.size, Vec2::new(64, 48));
}

#[cfg(not(feature = "v4l2"))]
#[test]
fn test_probe_without_camera_support_is_synthetic() {
    assert_eq!(probe(&config()).unwrap().kind, SourceKind::Synthetic);
}

#[cfg(feature = "v4l2")]
#[test]
fn test_probe_with_missing_device_is_synthetic() {
    let config = config().with_device("/dev/nonexistent_camera");
    assert_eq!(probe(&config).unwrap().kind, SourceKind::Synthetic);
}
