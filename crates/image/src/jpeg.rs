use {crate::*, crates_image::ImageEncoder};

/// Encode an RGB buffer as JPEG at `quality` (1-100).
pub fn rgb_to_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    if image.format != PixelFormat::Rgb8 {
        return Err(ImageError::Encode(format!(
            "expected RGB3 input, got {}",
            image.format
        )));
    }
    image.validate()?;
    if image.size.area() == 0 {
        return Err(ImageError::Encode(format!("cannot encode {} image", image.size)));
    }

    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            &image.data,
            image.size.x as u32,
            image.size.y as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encode any supported image as JPEG, converting to RGB first.
pub fn encode_jpeg(image: Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    rgb_to_jpeg(&into_rgb8(image)?, quality)
}
