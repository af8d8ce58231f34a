use {
    crate::*,
    base::{Vec2, format_datetime, unix_seconds},
    com::ToViewer,
    image::{
        ImageError, into_rgb8,
        overlay::{TextOverlay, draw_text},
        rgb_to_jpeg,
    },
    std::time::{Duration, Instant, SystemTime},
    tokio::task::spawn_blocking,
    video::RawFrame,
};

pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];
const OVERLAY_SCALE: usize = 2;

/// The two annotations burned into every frame: the pipeline frame number
/// and the capture time.
pub fn frame_overlays(sequence: u64, captured_at: SystemTime) -> Vec<TextOverlay> {
    vec![
        TextOverlay::new(
            format!("Frame: {}", sequence),
            Vec2::new(10, 30),
            OVERLAY_SCALE,
            OVERLAY_COLOR,
        ),
        TextOverlay::new(
            format_datetime(captured_at),
            Vec2::new(10, 60),
            OVERLAY_SCALE,
            OVERLAY_COLOR,
        ),
    ]
}

/// A JPEG frame ready for fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFrame {
    pub data: Vec<u8>,
    pub sequence: u64,
    pub captured_at: SystemTime,
}

impl EncodedFrame {
    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    /// Capture time in seconds since the Unix epoch.
    pub fn capture_time(&self) -> f64 {
        unix_seconds(self.captured_at)
    }

    pub fn to_message(&self) -> ToViewer {
        ToViewer::Frame {
            frame: self.data.clone(),
            sequence: self.sequence,
            capture_time: self.capture_time(),
            byte_length: self.data.len() as u32,
        }
    }
}

/// Converts raw frames to annotated JPEG.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    quality: u8,
    slow_encode: Duration,
}

impl FrameEncoder {
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            quality: config.jpeg_quality(),
            slow_encode: config.slow_operation(),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Convert to RGB, burn in `overlays` and compress. Blocking.
    pub fn encode_blocking(
        &self,
        frame: RawFrame,
        sequence: u64,
        overlays: &[TextOverlay],
    ) -> Result<EncodedFrame, ImageError> {
        let mut image = into_rgb8(frame.image)?;
        for overlay in overlays {
            draw_text(&mut image, overlay)?;
        }
        Ok(EncodedFrame {
            data: rgb_to_jpeg(&image, self.quality)?,
            sequence,
            captured_at: frame.captured_at,
        })
    }

    /// `encode_blocking` on the blocking pool.
    pub async fn encode(
        &self,
        frame: RawFrame,
        sequence: u64,
        overlays: Vec<TextOverlay>,
    ) -> Result<EncodedFrame, StreamError> {
        let encoder = self.clone();
        let start = Instant::now();
        let encoded =
            spawn_blocking(move || encoder.encode_blocking(frame, sequence, &overlays)).await??;

        let elapsed = start.elapsed();
        if elapsed > self.slow_encode {
            log::warn!("slow encode of frame {}: {:?}", sequence, elapsed);
        }
        if sequence % 10 == 0 {
            log::debug!(
                "frame {}: {} bytes in {:?}",
                sequence,
                encoded.byte_length(),
                elapsed
            );
        }
        Ok(encoded)
    }
}
