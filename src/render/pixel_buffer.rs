use super::{Rgba, Surface};

const BYTES_IN_PIXEL: usize = 4;

/// In-memory RGBA raster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0; BYTES_IN_PIXEL * width * height],
            width,
            height,
        }
    }

    /// Raw pixels, row-major, 4 bytes per pixel.
    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (x + y * self.width) * BYTES_IN_PIXEL;
        let mut color = [0; BYTES_IN_PIXEL];
        color.copy_from_slice(&self.data[i..i + BYTES_IN_PIXEL]);
        Some(color)
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    fn fill_block(&mut self, x: usize, y: usize, size: usize, color: Rgba) {
        // clipped to the buffer
        let x2 = (x + size).min(self.width);
        let y2 = (y + size).min(self.height);
        if x >= x2 {
            return;
        }
        for row in y..y2 {
            let start = (x + row * self.width) * BYTES_IN_PIXEL;
            let end = (x2 + row * self.width) * BYTES_IN_PIXEL;
            for pixel in self.data[start..end].chunks_exact_mut(BYTES_IN_PIXEL) {
                pixel.copy_from_slice(&color);
            }
        }
    }
}
