use {
    crate::*,
    base::{Vec2, format_datetime},
    image::{
        Image,
        overlay::{TextOverlay, draw_rect, draw_text},
    },
    std::time::{Duration, Instant, SystemTime},
};

/// Production cap of the synthetic source (~20 frames per second).
pub const SYNTHETIC_INTERVAL: Duration = Duration::from_millis(50);

const BACKGROUND: [u8; 3] = [0, 0, 0];
const BORDER: [u8; 3] = [255, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const CAPTION: &str = "TEST STREAM";

/// Fabricates a placeholder image carrying the wall-clock time and a counter.
///
/// Never fails to read once open. `read` sleeps so that consecutive frames
/// are at least `interval` apart, which makes it pace like a real camera.
pub struct SyntheticSource {
    interval: Duration,
    background: Option<Image>,
    counter: u64,
    last_read: Option<Instant>,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::with_interval(SYNTHETIC_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            background: None,
            counter: 0,
            last_read: None,
        }
    }

    fn render_background(size: Vec2<usize>) -> Result<Image, VideoError> {
        let mut image = Image::filled(size, BACKGROUND);
        let (w, h) = (size.x as i32, size.y as i32);
        // border inset scales with the frame; 50px at 640x480
        let inset = Vec2::new(w * 5 / 64, h * 5 / 48);
        draw_rect(
            &mut image,
            inset,
            Vec2::new(w - 1 - inset.x, h - 1 - inset.y),
            2,
            BORDER,
        )?;
        draw_text(
            &mut image,
            &TextOverlay::new(CAPTION, Vec2::new(w * 9 / 32, h / 2), 3, WHITE),
        )?;
        Ok(image)
    }
}

impl FrameSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn open(&mut self, config: &SourceConfig) -> Result<SourceConfig, VideoError> {
        self.background = Some(Self::render_background(config.size())?);
        self.counter = 0;
        self.last_read = None;
        Ok(config
            .clone()
            .with_format(image::PixelFormat::Rgb8)
            .with_fps((1.0 / self.interval.as_secs_f64().max(1e-3)).round() as u32))
    }

    fn read(&mut self) -> Result<RawFrame, VideoError> {
        let background = self.background.as_ref().ok_or(VideoError::Closed)?;

        if let Some(last) = self.last_read {
            let since = last.elapsed();
            if since < self.interval {
                std::thread::sleep(self.interval - since);
            }
        }

        self.counter += 1;
        let mut image = background.clone();
        let (w, h) = (image.size.x as i32, image.size.y as i32);
        let left = w * 9 / 32;
        draw_text(
            &mut image,
            &TextOverlay::new(
                format_datetime(SystemTime::now()),
                Vec2::new(left, h * 5 / 8),
                2,
                WHITE,
            ),
        )?;
        draw_text(
            &mut image,
            &TextOverlay::new(
                format!("Frame: {}", self.counter),
                Vec2::new(left, h * 17 / 24),
                2,
                WHITE,
            ),
        )?;

        self.last_read = Some(Instant::now());
        Ok(RawFrame::new(image, self.counter))
    }

    fn close(&mut self) {
        self.background = None;
    }

    fn is_open(&self) -> bool {
        self.background.is_some()
    }
}
