//! Toroidal Game of Life rendered as a slowly rotating colour field.
//!
//! [`Animator`] owns a [`GridState`], drops a small pattern into it at a
//! fixed interval, advances one generation per tick and paints live cells
//! onto any [`PixelSink`] with a radial hue band.

pub mod animator;
pub mod color;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod sink;

pub use animator::{Animator, AnimatorConfig, CancelToken};
pub use color::{Palette, Rgb, hsv_to_rgb};
pub use error::LifeError;
pub use grid::{GridState, next_state};
pub use patterns::{GLIDER, PATTERN_SIZE, PATTERNS, Pattern, find_pattern};
pub use sink::{FrameBuffer, PixelSink};
