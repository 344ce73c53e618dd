// ui.rs - Window that shows the animator's latest frame as a grid of lit boxes

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Rect, Vec2};

use life_engine::Rgb;

use crate::sinks::SharedFrame;

pub const BOX_SIZE: f32 = 8.0;
pub const SPACING: f32 = 1.0;

pub struct PanelApp {
    frame: SharedFrame,
    refresh: Duration,
}

impl PanelApp {
    pub fn new(frame: SharedFrame, refresh: Duration) -> Self {
        Self { frame, refresh }
    }
}

/// Window size that fits a `width` x `height` panel plus the status rows.
pub fn window_size(width: usize, height: usize) -> [f32; 2] {
    let side = |cells: usize| (BOX_SIZE + SPACING) * cells as f32 - SPACING;
    [side(width) + 32.0, side(height) + 96.0]
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Copy out under the lock so the animator thread is never held up by painting
        let (width, height, pixels, sequence, lit) = {
            let frame = self.frame.lock();
            (frame.width, frame.height, frame.pixels.clone(), frame.sequence, frame.lit_count())
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Chroma Life");
                ui.separator();
                ui.label(format!("Frame: {}", sequence));
            });

            ui.separator();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (BOX_SIZE + SPACING) * width as f32 - SPACING,
                (BOX_SIZE + SPACING) * height as f32 - SPACING,
            );
            let (_response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (idx, color) in pixels.iter().enumerate() {
                if *color == Rgb::BLACK {
                    continue;
                }
                let (col, row) = (idx % width, idx / width);
                let x = start_pos.x + col as f32 * (BOX_SIZE + SPACING);
                let y = start_pos.y + row as f32 * (BOX_SIZE + SPACING);
                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(BOX_SIZE));
                painter.rect_filled(rect, 1.0, Color32::from_rgb(color.r, color.g, color.b));
            }

            ui.separator();

            let cells = (width * height).max(1);
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", lit));
                ui.label(format!("Dead cells: {}", cells - lit));
                ui.label(format!("Population: {:.1}%", (lit as f32 / cells as f32) * 100.0));
            });
        });

        ctx.request_repaint_after(self.refresh);
    }
}
