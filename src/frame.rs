use std::path::Path;

use anyhow::Context as _;

use crate::error::{SlidereelError, SlidereelResult};

/// One RGBA8 raster with straight (non-premultiplied) alpha.
///
/// Base video frames are fully opaque; partial alpha only appears in overlay
/// layers before they are composited down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Opaque single-color frame.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn black(width: u32, height: u32) -> Self {
        Self::solid(width, height, [0, 0, 0, 255])
    }

    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> SlidereelResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SlidereelError::validation("frame size overflow"))?;
        if data.len() != expected {
            return Err(SlidereelError::validation(format!(
                "frame data length {} does not match {}x{}x4",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = ((y * self.width + x) as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn same_dimensions(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn write_png(&self, path: &Path) -> SlidereelResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_fill_sets_every_pixel() {
        let f = Frame::solid(3, 2, [10, 20, 30, 255]);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(f.get_pixel(x, y), [10, 20, 30, 255]);
            }
        }
    }

    #[test]
    fn from_rgba8_rejects_length_mismatch() {
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 15]).is_err());
        assert!(Frame::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn put_get_roundtrip() {
        let mut f = Frame::black(4, 4);
        f.put_pixel(3, 1, [1, 2, 3, 4]);
        assert_eq!(f.get_pixel(3, 1), [1, 2, 3, 4]);
        assert_eq!(f.get_pixel(0, 0), [0, 0, 0, 255]);
    }
}
