use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    Gray8,
    Yuyv,
    Jpeg,
}

impl PixelFormat {
    /// Map a V4L2 fourcc to a format, if it is one we can convert.
    pub fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        match fourcc {
            b"RGB3" => Some(PixelFormat::Rgb8),
            b"AB24" => Some(PixelFormat::Rgba8),
            b"GREY" => Some(PixelFormat::Gray8),
            b"YUYV" => Some(PixelFormat::Yuyv),
            b"MJPG" => Some(PixelFormat::Jpeg),
            _ => None,
        }
    }

    pub fn as_fourcc(&self) -> [u8; 4] {
        match self {
            PixelFormat::Rgb8 => *b"RGB3",
            PixelFormat::Rgba8 => *b"AB24",
            PixelFormat::Gray8 => *b"GREY",
            PixelFormat::Yuyv => *b"YUYV",
            PixelFormat::Jpeg => *b"MJPG",
        }
    }

    /// Fixed bytes per pixel; `None` for compressed formats.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Rgb8 => Some(3),
            PixelFormat::Rgba8 => Some(4),
            PixelFormat::Gray8 => Some(1),
            PixelFormat::Yuyv => Some(2),
            PixelFormat::Jpeg => None,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.as_fourcc()))
    }
}

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    (r, g, b)
}
