//! Burn text and rectangles into RGB images.
//!
//! Text uses a built-in 5x7 bitmap font covering digits, uppercase letters
//! (lowercase is drawn as uppercase) and `:-./`. Anything else renders as `?`.
//! Drawing is clipped to the image bounds.

use {crate::*, base::Vec2};

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

// one column of spacing between glyphs
const ADVANCE: usize = GLYPH_WIDTH + 1;

const UNKNOWN: [u8; 7] = [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04];

fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        ' ' => [0x00; 7],
        _ => UNKNOWN,
    }
}

/// A line of text burned in at a fixed position.
///
/// `origin` is the bottom-left corner of the text, like a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub origin: Vec2<i32>,
    pub scale: usize,
    pub color: [u8; 3],
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, origin: Vec2<i32>, scale: usize, color: [u8; 3]) -> Self {
        Self {
            text: text.into(),
            origin,
            scale,
            color,
        }
    }
}

/// Pixel width of `text` rendered at `scale`.
pub fn text_width(text: &str, scale: usize) -> usize {
    match text.chars().count() {
        0 => 0,
        n => (n * ADVANCE - 1) * scale,
    }
}

fn ensure_rgb(image: &Image) -> Result<(), ImageError> {
    if image.format != PixelFormat::Rgb8 {
        return Err(ImageError::Encode(format!(
            "overlays need RGB3 pixels, got {}",
            image.format
        )));
    }
    image.validate()
}

fn set_pixel(image: &mut Image, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x as usize >= image.size.x || y as usize >= image.size.y {
        return;
    }
    let index = (y as usize * image.size.x + x as usize) * 3;
    image.data[index..index + 3].copy_from_slice(&color);
}

fn fill(image: &mut Image, x: i32, y: i32, w: i32, h: i32, color: [u8; 3]) {
    for py in y..y + h {
        for px in x..x + w {
            set_pixel(image, px, py, color);
        }
    }
}

/// Draw one overlay into an RGB image.
pub fn draw_text(image: &mut Image, overlay: &TextOverlay) -> Result<(), ImageError> {
    ensure_rgb(image)?;

    let scale = overlay.scale.max(1) as i32;
    let top = overlay.origin.y - GLYPH_HEIGHT as i32 * scale;
    let mut left = overlay.origin.x;

    for c in overlay.text.chars() {
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) != 0 {
                    fill(
                        image,
                        left + col as i32 * scale,
                        top + row as i32 * scale,
                        scale,
                        scale,
                        overlay.color,
                    );
                }
            }
        }
        left += ADVANCE as i32 * scale;
    }

    Ok(())
}

/// Draw a rectangle outline between two inclusive corners.
pub fn draw_rect(
    image: &mut Image,
    top_left: Vec2<i32>,
    bottom_right: Vec2<i32>,
    thickness: i32,
    color: [u8; 3],
) -> Result<(), ImageError> {
    ensure_rgb(image)?;

    let w = bottom_right.x - top_left.x + 1;
    let h = bottom_right.y - top_left.y + 1;
    let t = thickness.max(1);
    fill(image, top_left.x, top_left.y, w, t, color);
    fill(image, top_left.x, bottom_right.y - t + 1, w, t, color);
    fill(image, top_left.x, top_left.y, t, h, color);
    fill(image, bottom_right.x - t + 1, top_left.y, t, h, color);

    Ok(())
}
