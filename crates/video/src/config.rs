use {base::Vec2, image::PixelFormat, std::path::PathBuf};

/// Capture parameters requested from (or reported by) a source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceConfig {
    device: PathBuf,
    size: Vec2<usize>,
    fps: u32,
    format: PixelFormat,
    buffer_count: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/video0"),
            size: Vec2::new(640, 480),
            fps: 30,
            format: PixelFormat::Jpeg,
            buffer_count: 4,
        }
    }
}

impl SourceConfig {
    /// Set the device path (e.g., "/dev/video0").
    pub fn with_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the capture size in pixels.
    pub fn with_size(mut self, size: Vec2<usize>) -> Self {
        self.size = size;
        self
    }

    /// Set the capture rate in frames per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Set the preferred pixel format. Devices may pick another one.
    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the number of driver buffers for the capture stream.
    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn device(&self) -> &PathBuf {
        &self.device
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}
