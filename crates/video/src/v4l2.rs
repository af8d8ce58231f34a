use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat},
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

/// A V4L2 capture device (USB webcams and most Linux camera drivers).
pub struct V4l2Source {
    stream: Option<MmapStream<'static>>,
    size: Vec2<usize>,
    format: PixelFormat,
    counter: u64,
}

impl Default for V4l2Source {
    fn default() -> Self {
        Self::new()
    }
}

impl V4l2Source {
    pub fn new() -> Self {
        Self {
            stream: None,
            size: Vec2::new(0, 0),
            format: PixelFormat::Jpeg,
            counter: 0,
        }
    }
}

impl FrameSource for V4l2Source {
    fn name(&self) -> &str {
        "v4l2"
    }

    fn open(&mut self, config: &SourceConfig) -> Result<SourceConfig, VideoError> {
        self.stream.take();

        let device = Device::with_path(config.device())?;

        // request size and format, then read back what the driver picked
        let requested = config.size();
        let actual_format = Capture::set_format(
            &device,
            &Format::new(
                requested.x as u32,
                requested.y as u32,
                FourCC::new(&config.format().as_fourcc()),
            ),
        )?;
        let format = PixelFormat::from_fourcc(&actual_format.fourcc.repr).ok_or_else(|| {
            VideoError::Device(format!(
                "unsupported pixel format: {}",
                actual_format.fourcc
            ))
        })?;
        let size = Vec2::new(actual_format.width as usize, actual_format.height as usize);

        let actual_params = Capture::set_params(
            &device,
            &v4l::video::capture::Parameters::with_fps(config.fps()),
        )?;
        let fps = match actual_params.interval.numerator {
            0 => config.fps(),
            numerator => actual_params.interval.denominator / numerator,
        };

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, config.buffer_count())
            .map_err(|e| VideoError::Stream(e.to_string()))?;

        log::info!(
            "v4l2: opened {} at {} {} {} fps",
            config.device().display(),
            size,
            format,
            fps
        );

        self.stream = Some(stream);
        self.size = size;
        self.format = format;
        self.counter = 0;

        Ok(config
            .clone()
            .with_size(size)
            .with_format(format)
            .with_fps(fps))
    }

    fn read(&mut self) -> Result<RawFrame, VideoError> {
        let stream = self.stream.as_mut().ok_or(VideoError::Closed)?;
        let (data, _metadata) =
            CaptureStream::next(stream).map_err(|e| VideoError::Stream(e.to_string()))?;

        // drivers hand out an empty buffer when the device stalls
        if data.is_empty() {
            return Err(VideoError::Stream("empty frame buffer".to_string()));
        }

        self.counter += 1;
        let image = Image::new(self.size, data.to_vec(), self.format);
        Ok(RawFrame::new(image, self.counter))
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}
