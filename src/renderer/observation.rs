//! Pixel observation buffer for automated controllers
//!
//! Layout is `width x height x 3` in x-major order: the byte for channel `c`
//! of pixel (x, y) sits at `(x * height + y) * 3 + c`.

use super::frame::FrameBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    width: usize,
    height: usize,
    /// Simulation frame the buffer was captured on (None until first capture)
    captured_at: Option<u64>,
    data: Vec<u8>,
}

impl Observation {
    pub const CHANNELS: usize = 3;

    /// All-black observation that has never been captured
    pub fn blank(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            captured_at: None,
            data: vec![0; width * height * Self::CHANNELS],
        }
    }

    /// Copy a finished frame into the buffer
    pub fn capture(&mut self, frame: &FrameBuffer, sim_frame: u64) {
        self.width = frame.width() as usize;
        self.height = frame.height() as usize;
        self.data.resize(self.width * self.height * Self::CHANNELS, 0);

        let pixels = frame.pixels();
        for x in 0..self.width {
            for y in 0..self.height {
                let px = pixels[y * self.width + x];
                let idx = (x * self.height + y) * Self::CHANNELS;
                self.data[idx] = px.r;
                self.data[idx + 1] = px.g;
                self.data[idx + 2] = px.b;
            }
        }
        self.captured_at = Some(sim_frame);
    }

    /// (width, height, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, Self::CHANNELS)
    }

    pub fn captured_at(&self) -> Option<u64> {
        self.captured_at
    }

    pub fn get(&self, x: usize, y: usize, channel: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || channel >= Self::CHANNELS {
            return None;
        }
        Some(self.data[(x * self.height + y) * Self::CHANNELS + channel])
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        Some([self.get(x, y, 0)?, self.get(x, y, 1)?, self.get(x, y, 2)?])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
