use base::Vec2;
use image::PixelFormat;
use std::time::{Duration, Instant};
use video::{FrameSource, SourceConfig, SyntheticSource, VideoError};

fn small_config() -> SourceConfig {
    SourceConfig::default().with_size(Vec2::new(160, 120))
}

#[test]
fn test_read_before_open_is_closed() {
    let mut source = SyntheticSource::new();
    assert!(matches!(source.read(), Err(VideoError::Closed)));
}

#[test]
fn test_open_reports_rgb_and_rate() {
    let mut source = SyntheticSource::new();

    let actual = source.open(&small_config()).unwrap();

    assert!(source.is_open());
    assert_eq!(actual.format(), PixelFormat::Rgb8);
    assert_eq!(actual.size(), Vec2::new(160, 120));
    assert_eq!(actual.fps(), 20);
}

#[test]
fn test_frames_are_counted_and_sized() {
    let mut source = SyntheticSource::with_interval(Duration::ZERO);
    source.open(&small_config()).unwrap();

    let first = source.read().unwrap();
    let second = source.read().unwrap();

    assert_eq!(first.sequence, 1);
    assert_eq!(second.sequence, 2);
    assert_eq!(first.image.size, Vec2::new(160, 120));
    assert_eq!(first.image.format, PixelFormat::Rgb8);
    assert_eq!(first.image.data.len(), 160 * 120 * 3);
    // the counter text differs between frames
    assert_ne!(first.image.data, second.image.data);
}

#[test]
fn test_reads_are_rate_capped() {
    let mut source = SyntheticSource::with_interval(Duration::from_millis(30));
    source.open(&small_config()).unwrap();

    let start = Instant::now();
    for _ in 0..4 {
        source.read().unwrap();
    }

    // the first read is immediate, the next three wait out the interval
    assert!(start.elapsed() >= Duration::from_millis(90));
}

#[test]
fn test_reopen_restarts_counter() {
    let mut source = SyntheticSource::with_interval(Duration::ZERO);
    source.open(&small_config()).unwrap();
    source.read().unwrap();
    source.read().unwrap();

    source.close();
    assert!(!source.is_open());
    source.open(&small_config()).unwrap();

    assert_eq!(source.read().unwrap().sequence, 1);
}
