// sink.rs - The surface the animator paints on

use crate::color::Rgb;

/// A rectangular surface accepting per-pixel colour writes.
///
/// The animator writes every pixel of a frame and then calls `present`
/// exactly once, so implementations that show frames elsewhere publish in
/// `present` and never expose a half-written frame.
pub trait PixelSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);

    /// Called after the last pixel of a frame.
    fn present(&mut self) {}
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        (**self).set_pixel(x, y, color)
    }

    fn present(&mut self) {
        (**self).present()
    }
}

/// Row-major in-memory frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    frames_presented: u64,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            frames_presented: 0,
        }
    }

    /// `None` outside the frame, matching `set_pixel` ignoring such writes.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Coordinates of every non-black pixel, row-major.
    pub fn lit(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .filter(|&(_, &color)| color != Rgb::BLACK)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
    }
}

impl PixelSink for FrameBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
