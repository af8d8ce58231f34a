use base::Vec2;
use image::{Image, ImageError, PixelFormat, into_rgb8, rgb_to_jpeg};

#[test]
fn test_yuyv_mid_gray_converts_to_gray_rgb() {
    let size = Vec2::new(2, 1);
    let image = Image::new(size, vec![128u8, 128, 128, 128], PixelFormat::Yuyv);

    let rgb = into_rgb8(image).unwrap();

    assert_eq!(rgb.format, PixelFormat::Rgb8);
    assert_eq!(rgb.data.len(), 6);
    for &v in &rgb.data {
        assert!((126..=130).contains(&v));
    }
}

#[test]
fn test_gray_expands_to_three_channels() {
    let image = Image::new(Vec2::new(2, 1), vec![10, 200], PixelFormat::Gray8);

    let rgb = into_rgb8(image).unwrap();

    assert_eq!(rgb.data, vec![10, 10, 10, 200, 200, 200]);
}

#[test]
fn test_rgba_drops_alpha() {
    let image = Image::new(Vec2::new(1, 1), vec![1, 2, 3, 255], PixelFormat::Rgba8);

    let rgb = into_rgb8(image).unwrap();

    assert_eq!(rgb.data, vec![1, 2, 3]);
}

#[test]
fn test_rgb_passes_through_unchanged() {
    let image = Image::filled(Vec2::new(3, 2), [7, 8, 9]);
    let rgb = into_rgb8(image.clone()).unwrap();
    assert_eq!(rgb, image);
}

#[test]
fn test_jpeg_decodes_to_rgb() {
    let source = Image::filled(Vec2::new(8, 8), [200, 40, 40]);
    let jpeg = rgb_to_jpeg(&source, 90).unwrap();

    let rgb = into_rgb8(Image::new(Vec2::new(8, 8), jpeg, PixelFormat::Jpeg)).unwrap();

    assert_eq!(rgb.size, Vec2::new(8, 8));
    assert_eq!(rgb.data.len(), 8 * 8 * 3);
}

#[test]
fn test_short_buffer_is_a_size_error() {
    let image = Image::new(Vec2::new(4, 4), vec![0u8; 10], PixelFormat::Yuyv);

    match into_rgb8(image) {
        Err(ImageError::Size { expected, got }) => {
            assert_eq!(expected, 32);
            assert_eq!(got, 10);
        }
        other => panic!("expected size error, got {:?}", other),
    }
}

#[test]
fn test_fourcc_mapping() {
    assert_eq!(PixelFormat::from_fourcc(b"MJPG"), Some(PixelFormat::Jpeg));
    assert_eq!(PixelFormat::from_fourcc(b"YUYV"), Some(PixelFormat::Yuyv));
    assert_eq!(PixelFormat::from_fourcc(b"H264"), None);
    assert_eq!(PixelFormat::Jpeg.to_string(), "MJPG");
}
