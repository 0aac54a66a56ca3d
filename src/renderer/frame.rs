//! CPU frame buffer and raster primitives

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::Rect;

/// 8-bit RGB pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const ROCK: Rgb = Rgb::new(128, 110, 96);
    pub const ROCK_CRATER: Rgb = Rgb::new(84, 72, 64);
    pub const SHIP: Rgb = Rgb::new(90, 200, 255);
    pub const SHIP_COCKPIT: Rgb = Rgb::new(230, 240, 255);
    pub const SHIELD: Rgb = Rgb::new(60, 120, 255);
    pub const GUN: Rgb = Rgb::new(255, 190, 40);
    pub const EXPLOSION: Rgb = Rgb::new(255, 120, 20);
    pub const EXPLOSION_CORE: Rgb = Rgb::new(255, 230, 120);
}

/// Row-major RGB pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// Black buffer of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Raw RGB bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x as usize, y as usize)])
        } else {
            None
        }
    }

    /// Set one pixel; coordinates outside the buffer are ignored
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            let idx = self.index(x as usize, y as usize);
            self.pixels[idx] = color;
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let (x0, x1) = clip_span(rect.left(), rect.right(), self.width);
        let (y0, y1) = clip_span(rect.top(), rect.bottom(), self.height);
        for y in y0..y1 {
            let row = y * self.width as usize;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    /// Outline a rectangle with a border drawn inside its edges
    pub fn stroke_rect(&mut self, rect: &Rect, thickness: f32, color: Rgb) {
        let t = thickness.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
        self.fill_rect(&Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(&Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(&Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(&Rect::new(rect.right() - t, rect.y, t, rect.h), color);
    }

    /// Fill a disc; a pixel is covered when its center lies inside
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let (x0, x1) = clip_span(center.x - radius, center.x + radius, self.width);
        let (y0, y1) = clip_span(center.y - radius, center.y + radius, self.height);
        let r_sq = radius * radius;
        for y in y0..y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r_sq {
                    let idx = self.index(x, y);
                    self.pixels[idx] = color;
                }
            }
        }
    }

    /// Copy `src` with its top-left corner at (x, y), clipped to the buffer
    pub fn blit(&mut self, src: &FrameBuffer, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = x + sx;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let color = src.pixels[src.index(sx as usize, sy as usize)];
                let idx = self.index(dx as usize, dy as usize);
                self.pixels[idx] = color;
            }
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }
}

/// Round a [start, end) span to whole pixels inside [0, limit)
fn clip_span(start: f32, end: f32, limit: u32) -> (usize, usize) {
    let limit = limit as f32;
    let lo = start.round().clamp(0.0, limit) as usize;
    let hi = end.round().clamp(0.0, limit) as usize;
    (lo, hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colors::*;

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.fill_rect(&Rect::new(-5.0, 8.0, 8.0, 8.0), WHITE);
        assert_eq!(fb.get(0, 9), Some(WHITE));
        assert_eq!(fb.get(2, 8), Some(WHITE));
        assert_eq!(fb.get(3, 8), Some(BLACK));
        assert_eq!(fb.get(0, 7), Some(BLACK));
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.stroke_rect(&Rect::new(2.0, 2.0, 10.0, 10.0), 2.0, WHITE);
        assert_eq!(fb.get(2, 2), Some(WHITE));
        assert_eq!(fb.get(3, 7), Some(WHITE));
        assert_eq!(fb.get(11, 11), Some(WHITE));
        assert_eq!(fb.get(6, 6), Some(BLACK));
        assert_eq!(fb.get(12, 12), Some(BLACK));
    }

    #[test]
    fn test_fill_circle() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.fill_circle(Vec2::new(10.0, 10.0), 4.0, GREEN);
        assert_eq!(fb.get(10, 10), Some(GREEN));
        assert_eq!(fb.get(6, 9), Some(GREEN));
        assert_eq!(fb.get(6, 6), Some(BLACK));
        assert_eq!(fb.get(15, 10), Some(BLACK));
    }

    #[test]
    fn test_blit_and_bytes() {
        let mut src = FrameBuffer::new(2, 2);
        src.fill(Rgb::new(1, 2, 3));
        let mut dst = FrameBuffer::new(3, 3);
        dst.blit(&src, 2, 2);
        assert_eq!(dst.get(2, 2), Some(Rgb::new(1, 2, 3)));
        assert_eq!(dst.get(1, 1), Some(BLACK));

        let bytes = dst.as_bytes();
        assert_eq!(bytes.len(), 27);
        assert_eq!(&bytes[24..27], &[1, 2, 3]);
    }
}
