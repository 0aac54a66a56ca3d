//! Visible display targets

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Rgb as ImageRgb};

use super::frame::FrameBuffer;

/// External surface a finished frame is flushed to
pub trait DisplaySurface {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()>;
}

/// Encode a frame as PNG bytes
pub fn encode_png(frame: &FrameBuffer) -> io::Result<Vec<u8>> {
    let img: ImageBuffer<ImageRgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
            .ok_or_else(|| io::Error::other("frame buffer size mismatch"))?;
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(io::Error::other)?;
    Ok(png_bytes)
}

/// Writes every presented frame to a PNG file, overwriting the previous one
#[derive(Debug, Clone)]
pub struct PngSurface {
    path: PathBuf,
    presented: u64,
}

impl PngSurface {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            presented: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames written so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl DisplaySurface for PngSurface {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        fs::write(&self.path, encode_png(frame)?)?;
        self.presented += 1;
        log::debug!("Frame written to {}", self.path.display());
        Ok(())
    }
}
