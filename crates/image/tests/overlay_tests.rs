use base::Vec2;
use image::{
    Image, PixelFormat,
    overlay::{GLYPH_HEIGHT, TextOverlay, draw_rect, draw_text, text_width},
};

const GREEN: [u8; 3] = [0, 255, 0];

fn pixel(image: &Image, x: usize, y: usize) -> [u8; 3] {
    let i = (y * image.size.x + x) * 3;
    [image.data[i], image.data[i + 1], image.data[i + 2]]
}

fn count_color(image: &Image, color: [u8; 3]) -> usize {
    image.data.chunks_exact(3).filter(|p| *p == color).count()
}

#[test]
fn test_text_is_drawn_above_origin() {
    let mut image = Image::filled(Vec2::new(64, 32), [0, 0, 0]);

    draw_text(&mut image, &TextOverlay::new("1", Vec2::new(2, 20), 1, GREEN)).unwrap();

    assert!(count_color(&image, GREEN) > 0);
    // nothing at or below the baseline
    for y in 20..32 {
        for x in 0..64 {
            assert_eq!(pixel(&image, x, y), [0, 0, 0]);
        }
    }
    // glyph rows span the GLYPH_HEIGHT rows above the origin
    let top = 20 - GLYPH_HEIGHT;
    assert!((0..64).any(|x| pixel(&image, x, top) == GREEN));
}

#[test]
fn test_scale_multiplies_lit_pixels() {
    let mut small = Image::filled(Vec2::new(64, 64), [0, 0, 0]);
    let mut large = small.clone();

    draw_text(&mut small, &TextOverlay::new("8", Vec2::new(4, 30), 1, GREEN)).unwrap();
    draw_text(&mut large, &TextOverlay::new("8", Vec2::new(4, 30), 2, GREEN)).unwrap();

    assert_eq!(count_color(&large, GREEN), 4 * count_color(&small, GREEN));
}

#[test]
fn test_lowercase_renders_like_uppercase() {
    let mut lower = Image::filled(Vec2::new(64, 16), [0, 0, 0]);
    let mut upper = lower.clone();

    draw_text(&mut lower, &TextOverlay::new("frame", Vec2::new(0, 10), 1, GREEN)).unwrap();
    draw_text(&mut upper, &TextOverlay::new("FRAME", Vec2::new(0, 10), 1, GREEN)).unwrap();

    assert_eq!(lower, upper);
}

#[test]
fn test_text_is_clipped_to_bounds() {
    let mut image = Image::filled(Vec2::new(8, 8), [0, 0, 0]);

    draw_text(
        &mut image,
        &TextOverlay::new("2024-12-31 23:59:59", Vec2::new(-3, 4), 3, GREEN),
    )
    .unwrap();

    assert_eq!(image.data.len(), 8 * 8 * 3);
}

#[test]
fn test_text_width() {
    assert_eq!(text_width("", 2), 0);
    assert_eq!(text_width("A", 1), 5);
    assert_eq!(text_width("AB", 2), 22);
}

#[test]
fn test_rect_outline_leaves_interior() {
    let mut image = Image::filled(Vec2::new(10, 10), [0, 0, 0]);

    draw_rect(&mut image, Vec2::new(1, 1), Vec2::new(8, 8), 1, [255, 0, 0]).unwrap();

    assert_eq!(pixel(&image, 1, 1), [255, 0, 0]);
    assert_eq!(pixel(&image, 8, 8), [255, 0, 0]);
    assert_eq!(pixel(&image, 4, 1), [255, 0, 0]);
    assert_eq!(pixel(&image, 4, 4), [0, 0, 0]);
    assert_eq!(pixel(&image, 0, 0), [0, 0, 0]);
}

#[test]
fn test_overlay_rejects_non_rgb() {
    let mut image = Image::new(Vec2::new(2, 2), vec![0u8; 8], PixelFormat::Yuyv);
    assert!(draw_text(&mut image, &TextOverlay::new("x", Vec2::new(0, 7), 1, GREEN)).is_err());
}
