//! Built-in 3x5 bitmap font for the score readout

use glam::Vec2;

use super::frame::{FrameBuffer, Rgb};
use crate::sim::Rect;

const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

/// Rows of a glyph, 3 bits each (MSB = leftmost column)
fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ' ' => [0; 5],
        _ => return None,
    };
    Some(rows)
}

/// Scaled bitmap font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    /// Pixels per glyph cell
    pub scale: u32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::with_size(18)
    }
}

impl BitmapFont {
    /// Font whose glyphs are roughly `size` pixels tall including leading
    pub fn with_size(size: u32) -> Self {
        Self {
            scale: (size / 6).max(1),
        }
    }

    /// Rendered width in pixels; unsupported characters are skipped
    pub fn text_width(&self, text: &str) -> u32 {
        let count = text.chars().filter(|&c| glyph(c).is_some()).count() as u32;
        if count == 0 {
            return 0;
        }
        (count * (GLYPH_W + 1) - 1) * self.scale
    }

    pub fn text_height(&self) -> u32 {
        GLYPH_H * self.scale
    }

    /// Draw `text` horizontally centered on `center_x` with its top at `top`
    pub fn draw(&self, frame: &mut FrameBuffer, text: &str, center_x: f32, top: f32, color: Rgb) {
        let scale = self.scale as f32;
        let mut origin = Vec2::new(center_x - self.text_width(text) as f32 / 2.0, top);

        for rows in text.chars().filter_map(glyph) {
            for (row, &bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if (bits >> (GLYPH_W - 1 - col)) & 1 != 0 {
                        let cell = Rect::new(
                            origin.x + col as f32 * scale,
                            origin.y + row as f32 * scale,
                            scale,
                            scale,
                        );
                        frame.fill_rect(&cell, color);
                    }
                }
            }
            origin.x += (GLYPH_W + 1) as f32 * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::colors::{BLACK, WHITE};

    #[test]
    fn test_text_width() {
        let font = BitmapFont { scale: 3 };
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("0"), 9);
        assert_eq!(font.text_width("30"), 21);
        assert_eq!(font.text_width("3?0"), 21);
    }

    #[test]
    fn test_draw_one() {
        let font = BitmapFont { scale: 1 };
        let mut fb = FrameBuffer::new(10, 10);
        // "1" is 3 wide; centered on x=5 it starts at x=3.5 -> column 4
        font.draw(&mut fb, "1", 5.0, 0.0, WHITE);
        assert_eq!(fb.get(5, 0), Some(WHITE));
        assert_eq!(fb.get(4, 1), Some(WHITE));
        assert_eq!(fb.get(4, 0), Some(BLACK));
        assert_eq!(fb.get(4, 4), Some(WHITE));
        assert_eq!(fb.get(6, 4), Some(WHITE));
    }
}
