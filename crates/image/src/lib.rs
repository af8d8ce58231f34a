//! Pixel buffers, color conversion, overlays and JPEG encoding.
//!
//! Everything downstream of a capture device works on `Image`: a size, a
//! byte buffer and the `PixelFormat` describing how to read it. Encoding
//! always goes through the canonical 3-channel `Rgb8` layout.

pub mod error;
pub use error::ImageError;

mod image;
pub use image::*;

mod pixelformat;
pub use pixelformat::*;

mod rgb;
pub use rgb::*;

mod jpeg;
pub use jpeg::*;

pub mod overlay;
