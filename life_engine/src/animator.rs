// animator.rs - Tick loop driving the grid onto a pixel sink

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::color::{Palette, Rgb, wrap_degrees};
use crate::error::LifeError;
use crate::grid::GridState;
use crate::patterns::{GLIDER, PATTERN_SIZE, Pattern};
use crate::sink::PixelSink;

/// How often `run` logs its achieved tick rate.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Pause after each frame.
    pub tick_interval: Duration,
    /// Minimum time between two pattern injections.
    pub injection_interval: Duration,
    /// Degrees added to the hue phase every tick.
    pub hue_step: f32,
    pub palette: Palette,
    pub pattern: Pattern,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            injection_interval: Duration::from_secs(1),
            hue_step: 0.5,
            palette: Palette::default(),
            pattern: GLIDER,
        }
    }
}

/// Shared stop flag checked by `Animator::run` once per tick.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Owns the grid and paints one generation per tick onto `sink`.
pub struct Animator<S: PixelSink, R: Rng> {
    grid: GridState,
    sink: S,
    rng: R,
    config: AnimatorConfig,
    hue_phase: f32,
    last_injection: Instant,
}

impl<S: PixelSink, R: Rng> Animator<S, R> {
    /// Sizes a randomised grid to the sink. Fails when the sink is smaller
    /// than the injection pattern.
    pub fn new(sink: S, mut rng: R, config: AnimatorConfig) -> Result<Self, LifeError> {
        let (width, height) = (sink.width(), sink.height());
        let grid = GridState::new(width, height, &mut rng)?;
        info!(width, height, population = grid.population(), pattern = config.pattern.name, "grid seeded");

        Ok(Self {
            grid,
            sink,
            rng,
            config,
            hue_phase: 0.0,
            last_injection: Instant::now(),
        })
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Current hue rotation in degrees, always within `[0, 360)`.
    pub fn hue_phase(&self) -> f32 {
        self.hue_phase
    }

    pub fn last_injection(&self) -> Instant {
        self.last_injection
    }

    /// One frame at the current time.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// One frame as if the clock read `now`: inject if due, advance, paint,
    /// rotate the hue.
    pub fn tick_at(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_injection) >= self.config.injection_interval {
            self.inject_at_random_origin();
            self.last_injection = now;
        }

        self.grid.advance();
        self.render();
        self.hue_phase = wrap_degrees(self.hue_phase + self.config.hue_step);
    }

    /// Drops the configured pattern at an origin drawn from
    /// `[0, width-5) x [0, height-5)`, or 0 along an axis that is exactly 5.
    pub fn inject_at_random_origin(&mut self) {
        let span_x = (self.grid.width() - PATTERN_SIZE).max(1);
        let span_y = (self.grid.height() - PATTERN_SIZE).max(1);
        let origin_x = self.rng.random_range(0..span_x);
        let origin_y = self.rng.random_range(0..span_y);

        self.grid.inject_pattern(&self.config.pattern, origin_x, origin_y);
        debug!(origin_x, origin_y, pattern = self.config.pattern.name, "pattern injected");
    }

    /// Writes every cell to the sink, then presents the frame.
    pub fn render(&mut self) {
        let (width, height) = (self.grid.width(), self.grid.height());
        for y in 0..height {
            for x in 0..width {
                let color = if self.grid.is_alive(x, y) {
                    self.config.palette.cell_color(x, y, width, height, self.hue_phase)
                } else {
                    Rgb::BLACK
                };
                self.sink.set_pixel(x, y, color);
            }
        }
        self.sink.present();
    }

    /// Ticks and sleeps until `cancel` fires.
    pub fn run(&mut self, cancel: &CancelToken) {
        info!(tick_ms = self.config.tick_interval.as_millis() as u64, "animation started");
        let mut report = RateReport::new(Instant::now());

        while !cancel.is_cancelled() {
            self.tick();
            report.record(Instant::now(), &self.grid);
            std::thread::sleep(self.config.tick_interval);
        }

        info!(generation = self.grid.generation(), "animation stopped");
    }
}

/// Periodic ticks-per-second log line.
struct RateReport {
    window_start: Instant,
    ticks: u32,
}

impl RateReport {
    fn new(now: Instant) -> Self {
        Self { window_start: now, ticks: 0 }
    }

    fn record(&mut self, now: Instant, grid: &GridState) {
        self.ticks += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= REPORT_INTERVAL {
            let rate = self.ticks as f64 / elapsed.as_secs_f64();
            info!(
                ticks_per_sec = (rate * 10.0).round() / 10.0,
                generation = grid.generation(),
                population = grid.population(),
                "refresh rate",
            );
            self.window_start = now;
            self.ticks = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::R_PENTOMINO;
    use crate::sink::FrameBuffer;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn animator(width: usize, height: usize) -> Animator<FrameBuffer, StdRng> {
        Animator::new(FrameBuffer::new(width, height), StdRng::seed_from_u64(11), AnimatorConfig::default())
            .unwrap()
    }

    #[test]
    fn too_small_sink_is_rejected() {
        let result = Animator::new(FrameBuffer::new(4, 64), StdRng::seed_from_u64(0), AnimatorConfig::default());
        assert!(matches!(result, Err(LifeError::GridTooSmall { width: 4, height: 64 })));
    }

    #[test]
    fn hue_phase_wraps_to_zero_after_full_turn() {
        let mut animator = animator(8, 8);
        let start = animator.last_injection();
        for _ in 0..720 {
            animator.tick_at(start);
            assert!((0.0..360.0).contains(&animator.hue_phase()));
        }
        assert_eq!(animator.hue_phase(), 0.0);
    }

    #[test]
    fn tiny_negative_step_keeps_phase_below_a_full_turn() {
        let config = AnimatorConfig { hue_step: -0.00001, ..AnimatorConfig::default() };
        let mut animator = Animator::new(FrameBuffer::new(8, 8), StdRng::seed_from_u64(4), config).unwrap();
        assert_eq!(animator.config().hue_step, -0.00001);

        let start = animator.last_injection();
        for _ in 0..3 {
            animator.tick_at(start);
            assert!((0.0..360.0).contains(&animator.hue_phase()), "phase {}", animator.hue_phase());
        }
    }

    #[test]
    fn selected_template_is_the_one_injected() {
        let config = AnimatorConfig { pattern: R_PENTOMINO, ..AnimatorConfig::default() };
        let mut animator = Animator::new(FrameBuffer::new(5, 5), StdRng::seed_from_u64(8), config).unwrap();
        animator.grid_mut().clear();
        animator.inject_at_random_origin();

        let mut live: Vec<_> = animator.grid().live_cells().collect();
        live.sort();
        assert_eq!(live, vec![(1, 2), (2, 1), (2, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn injection_waits_for_the_interval() {
        let mut animator = animator(12, 12);
        let start = animator.last_injection();
        animator.grid_mut().clear();

        animator.tick_at(start + Duration::from_millis(500));
        assert_eq!(animator.grid().population(), 0);
        assert_eq!(animator.last_injection(), start);

        let due = start + Duration::from_secs(1);
        animator.tick_at(due);
        assert!(animator.grid().population() > 0);
        assert_eq!(animator.last_injection(), due);
    }

    #[test]
    fn frame_mirrors_the_grid() {
        let mut animator = animator(9, 7);
        let start = animator.last_injection();
        animator.tick_at(start);

        let frame = animator.sink();
        assert_eq!(frame.frames_presented(), 1);
        for y in 0..7 {
            for x in 0..9 {
                let expected = if animator.grid().is_alive(x, y) {
                    Palette::default().cell_color(x, y, 9, 7, 0.0)
                } else {
                    Rgb::BLACK
                };
                assert_eq!(frame.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn minimum_grid_injects_at_origin() {
        let mut animator = animator(5, 5);
        animator.grid_mut().clear();
        animator.inject_at_random_origin();
        let mut live: Vec<_> = animator.grid().live_cells().collect();
        live.sort();
        assert_eq!(live, vec![(0, 2), (1, 3), (1, 4), (2, 0), (2, 1), (2, 3), (3, 2), (3, 3)]);
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
