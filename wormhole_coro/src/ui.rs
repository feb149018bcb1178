// ui.rs - Viewer window for the wormhole simulation

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use wormhole::patterns;

use crate::{SimulationControls, WormholeApp};

const MAX_BOX_SIZE: f32 = 15.0;
const MIN_BOX_SIZE: f32 = 1.0;

impl eframe::App for WormholeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!("Wormhole Game of Life: {}", self.case_name));

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                    self.update_generation();
                }

                if ui.button("↺ Reset").clicked() {
                    self.is_running = false;
                    self.reset_to_start();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.generation()));
            });

            ui.separator();

            // Speed and colors
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);

                ui.separator();

                ui.checkbox(&mut self.show_portals, "Portals");
                ui.label("H:");
                ui.color_edit_button_srgba(&mut self.horizontal_color);
                ui.label("V:");
                ui.color_edit_button_srgba(&mut self.vertical_color);
            });

            ui.separator();

            ui.label(format!(
                "{} horizontal and {} vertical portal cells. Click cells to toggle them while paused.",
                self.portals().horizontal.len(),
                self.portals().vertical.len(),
            ));

            ui.separator();

            self.draw_grid(ui);

            ui.separator();

            // Statistics
            let total = self.grid().rows() * self.grid().cols();
            let live_cells = self.grid().population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / total.max(1) as f32 * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}

impl WormholeApp {
    fn draw_grid(&mut self, ui: &mut egui::Ui) {
        let (rows, cols) = self.grid().shape();
        if rows == 0 || cols == 0 {
            ui.label("Empty grid");
            return;
        }

        let spacing = 0.5;
        let box_size = ((ui.available_width() / cols as f32) - spacing).clamp(MIN_BOX_SIZE, MAX_BOX_SIZE);
        let pitch = box_size + spacing;

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(pitch * cols as f32 - spacing, pitch * rows as f32 - spacing);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        let grid = self.grid();
        let portals = self.portals();
        for row in 0..rows {
            for col in 0..cols {
                let rect = Rect::from_min_size(
                    egui::pos2(start_pos.x + col as f32 * pitch, start_pos.y + row as f32 * pitch),
                    Vec2::splat(box_size),
                );

                let cell_color = if grid.get(row, col) { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);

                let coord = (row as isize, col as isize);
                if self.show_portals && portals.horizontal.contains(coord) {
                    painter.rect_stroke(rect, 1.0, Stroke::new(1.5, self.horizontal_color));
                } else if self.show_portals && portals.vertical.contains(coord) {
                    painter.rect_stroke(rect, 1.0, Stroke::new(1.5, self.vertical_color));
                } else if box_size >= 4.0 {
                    // Subtle border
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Handle clicking (only when not running)
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - start_pos;
                let (row, col) = ((offset.y / pitch) as usize, (offset.x / pitch) as usize);
                if row < rows && col < cols {
                    self.toggle_cell(row, col);
                }
            }
        }
    }
}
