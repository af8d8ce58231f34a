use {crate::*, base::Vec2};

pub fn yuyv_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(size.area() * 3);

    for chunk in data.chunks_exact(4) {
        let (r0, g0, b0) = yuv_to_rgb(chunk[0], chunk[1], chunk[3]);
        let (r1, g1, b1) = yuv_to_rgb(chunk[2], chunk[1], chunk[3]);
        rgb.extend_from_slice(&[r0, g0, b0, r1, g1, b1]);
    }

    rgb
}

pub fn gray_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(size.area() * 3);
    for &luma in data {
        rgb.extend_from_slice(&[luma, luma, luma]);
    }
    rgb
}

pub fn rgba_to_rgb(size: Vec2<usize>, data: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(size.area() * 3);
    for chunk in data.chunks_exact(4) {
        rgb.extend_from_slice(&chunk[..3]);
    }
    rgb
}

pub fn jpeg_to_rgb(image: &Image) -> Result<Image, ImageError> {
    let decoded = crates_image::load_from_memory_with_format(
        &image.data,
        crates_image::ImageFormat::Jpeg,
    )?;

    let rgb_image = decoded.to_rgb8();
    let (width, height) = rgb_image.dimensions();
    let size = Vec2::new(width as usize, height as usize);

    Ok(Image::new(size, rgb_image.into_raw(), PixelFormat::Rgb8))
}

/// Convert any supported layout to canonical 3-channel RGB.
///
/// `Rgb8` input is returned as-is without copying the buffer.
pub fn into_rgb8(image: Image) -> Result<Image, ImageError> {
    image.validate()?;
    let data = match image.format {
        PixelFormat::Rgb8 => return Ok(image),
        PixelFormat::Jpeg => return jpeg_to_rgb(&image),
        PixelFormat::Rgba8 => rgba_to_rgb(image.size, &image.data),
        PixelFormat::Gray8 => gray_to_rgb(image.size, &image.data),
        PixelFormat::Yuyv => yuyv_to_rgb(image.size, &image.data),
    };
    Ok(Image::new(image.size, data, PixelFormat::Rgb8))
}
