use {crate::*, base::Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Solid-color RGB image.
    pub fn filled(size: Vec2<usize>, color: [u8; 3]) -> Self {
        let data = color.iter().copied().cycle().take(size.area() * 3).collect();
        Self::new(size, data, PixelFormat::Rgb8)
    }

    /// Check that the buffer holds exactly one frame of `format` at `size`.
    ///
    /// JPEG data is variable-length and only has to be non-empty.
    pub fn validate(&self) -> Result<(), ImageError> {
        match self.format.bytes_per_pixel() {
            Some(bpp) => {
                let expected = self.size.area() * bpp;
                if self.data.len() != expected {
                    return Err(ImageError::Size {
                        expected,
                        got: self.data.len(),
                    });
                }
            }
            None => {
                if self.data.is_empty() {
                    return Err(ImageError::Decode("empty JPEG buffer".to_string()));
                }
            }
        }
        Ok(())
    }
}
