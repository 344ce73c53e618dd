// main.rs - Colour-cycling Game of Life on a window or terminal panel
// The engine lives in life_engine; this binary picks a surface and runs it.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use eframe::egui;
use life_engine::{Animator, AnimatorConfig, CancelToken, PATTERNS, Palette, Pattern, find_pattern};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod sinks;
mod ui;

use sinks::{SharedFrame, TerminalSink, WindowSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    /// Desktop window.
    Window,
    /// 24-bit colour terminal, two pixel rows per text row.
    Terminal,
}

#[derive(Debug, Parser)]
#[command(name = "chroma_life", about = "Game of Life rendered as a rotating colour field")]
struct Cli {
    /// Panel width in pixels.
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Panel height in pixels.
    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Pause between frames.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Time between pattern injections.
    #[arg(long, default_value_t = 1000)]
    inject_every_ms: u64,

    /// Hue rotation per frame, in degrees.
    #[arg(long, default_value_t = 0.5)]
    hue_step: f32,

    /// Seed for the grid and injection origins; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Template dropped into the grid at every injection.
    #[arg(long, default_value = "glider", value_parser = parse_pattern)]
    pattern: Pattern,

    #[arg(long, value_enum, default_value_t = SinkKind::Window)]
    sink: SinkKind,
}

fn parse_pattern(name: &str) -> Result<Pattern, String> {
    find_pattern(name).copied().ok_or_else(|| {
        let known: Vec<_> = PATTERNS.iter().map(|pattern| pattern.name).collect();
        format!("unknown pattern '{name}', expected one of: {}", known.join(", "))
    })
}

impl Cli {
    fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            injection_interval: Duration::from_millis(self.inject_every_ms),
            hue_step: self.hue_step,
            palette: Palette::default(),
            pattern: self.pattern,
        }
    }
}

fn init_tracing(sink: SinkKind) {
    // Keep the terminal panel readable: only warnings unless RUST_LOG asks for more
    let fallback = match sink {
        SinkKind::Window => "info",
        SinkKind::Terminal => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.sink);

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, width = cli.width, height = cli.height, sink = ?cli.sink, "starting");
    let rng = StdRng::seed_from_u64(seed);

    match cli.sink {
        SinkKind::Window => run_window(&cli, rng),
        SinkKind::Terminal => run_terminal(&cli, rng),
    }
}

/// The window owns the main thread; the animator ticks on a worker thread
/// and hands finished frames over through `SharedFrame`.
fn run_window(cli: &Cli, rng: StdRng) -> Result<()> {
    let frame = SharedFrame::new(cli.width, cli.height);
    let mut animator = Animator::new(WindowSink::new(frame.clone()), rng, cli.animator_config())?;
    let refresh = animator.config().tick_interval;

    let cancel = CancelToken::new();
    let worker = {
        let cancel = cancel.clone();
        std::thread::Builder::new()
            .name("animator".into())
            .spawn(move || animator.run(&cancel))
            .context("failed to start animator thread")?
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ui::window_size(cli.width, cli.height)),
        ..Default::default()
    };
    let app = ui::PanelApp::new(frame, refresh);
    let result = eframe::run_native("Chroma Life", options, Box::new(|_cc| Box::new(app)));

    cancel.cancel();
    worker.join().map_err(|_| anyhow!("animator thread panicked"))?;
    result.map_err(|err| anyhow!("window failed: {err}"))
}

/// Ticks on a blocking task until Ctrl-C.
fn run_terminal(cli: &Cli, rng: StdRng) -> Result<()> {
    let config = cli.animator_config();
    let sink = TerminalSink::new(cli.width, cli.height).context("failed to prepare terminal")?;
    let mut animator = Animator::new(sink, rng, config)?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(async move {
        let cancel = CancelToken::new();
        let worker = {
            let cancel = cancel.clone();
            // Dropping the animator restores the terminal
            tokio::task::spawn_blocking(move || animator.run(&cancel))
        };

        tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
        info!("interrupt received, stopping");
        cancel.cancel();
        worker.await.context("animator task failed")?;
        Ok::<(), anyhow::Error>(())
    })
}
