// sinks.rs - Concrete surfaces for the animator: a shared window frame and the terminal

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen},
};
use life_engine::{FrameBuffer, PixelSink, Rgb};
use tracing::warn;

/// Last complete frame published by the animator thread.
#[derive(Debug)]
pub struct PanelFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgb>,
    pub sequence: u64,
}

impl PanelFrame {
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&color| color != Rgb::BLACK).count()
    }
}

#[derive(Debug, Clone)]
pub struct SharedFrame(Arc<Mutex<PanelFrame>>);

impl SharedFrame {
    pub fn new(width: usize, height: usize) -> Self {
        Self(Arc::new(Mutex::new(PanelFrame {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            sequence: 0,
        })))
    }

    pub fn lock(&self) -> MutexGuard<'_, PanelFrame> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Draws into a private back buffer and swaps it into the shared frame on
/// `present`, so the window only ever reads whole frames.
pub struct WindowSink {
    back: FrameBuffer,
    front: SharedFrame,
}

impl WindowSink {
    pub fn new(front: SharedFrame) -> Self {
        let (width, height) = {
            let frame = front.lock();
            (frame.width, frame.height)
        };
        Self { back: FrameBuffer::new(width, height), front }
    }
}

impl PixelSink for WindowSink {
    fn width(&self) -> usize {
        self.back.width()
    }

    fn height(&self) -> usize {
        self.back.height()
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.back.set_pixel(x, y, color);
    }

    fn present(&mut self) {
        let mut front = self.front.lock();
        front.pixels.copy_from_slice(self.back.pixels());
        front.sequence += 1;
    }
}

/// Renders two pixel rows per text row with the upper half block glyph.
pub struct TerminalSink {
    back: FrameBuffer,
    out: Stdout,
    write_failed: bool,
}

impl TerminalSink {
    pub fn new(width: usize, height: usize) -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { back: FrameBuffer::new(width, height), out, write_failed: false })
    }

    fn draw(&mut self) -> io::Result<()> {
        let (width, height) = (self.back.width(), self.back.height());
        queue!(self.out, BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;

        let mut current: Option<(Rgb, Rgb)> = None;
        for y in (0..height).step_by(2) {
            for x in 0..width {
                let top = self.back.pixel(x, y).unwrap_or_default();
                // Odd heights leave the last half block without a lower pixel
                let bottom = self.back.pixel(x, y + 1).unwrap_or_default();
                if current != Some((top, bottom)) {
                    queue!(self.out, SetForegroundColor(term_color(top)), SetBackgroundColor(term_color(bottom)))?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print('▀'))?;
            }
            queue!(self.out, ResetColor, cursor::MoveToNextLine(1))?;
            current = None;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}

fn term_color(color: Rgb) -> Color {
    Color::Rgb { r: color.r, g: color.g, b: color.b }
}

impl PixelSink for TerminalSink {
    fn width(&self) -> usize {
        self.back.width()
    }

    fn height(&self) -> usize {
        self.back.height()
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.back.set_pixel(x, y, color);
    }

    fn present(&mut self) {
        if let Err(err) = self.draw() {
            // One warning per run; the terminal is probably gone.
            if !self.write_failed {
                warn!(error = %err, "terminal write failed");
                self.write_failed = true;
            }
        }
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
    }
}
