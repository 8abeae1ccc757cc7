use eframe::egui;

use crate::deck::FitMode;

use super::DeckApp;
use super::projector::placement;

const SIDE_PANEL_WIDTH: f32 = 380.0;
const PREVIEW_HEIGHT: f32 = 220.0;

impl DeckApp {
    /// Main window while presenting: current slide, next slide, notes, timer.
    pub(super) fn draw_presenter(&mut self, ctx: &egui::Context) {
        self.draw_presenter_bar(ctx);

        egui::SidePanel::right("presenter_side")
            .default_width(SIDE_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Next").color(self.theme.muted));
                let next = self.deck.slide_at(self.deck.current_position() + 1);
                let preview_area = egui::Rect::from_min_size(
                    ui.cursor().min,
                    egui::vec2(ui.available_width(), PREVIEW_HEIGHT),
                );
                ui.allocate_rect(preview_area, egui::Sense::hover());
                match next.and_then(|id| self.textures.thumbnail(ctx, self.deck.images(), id)) {
                    Some(texture) => paint_fitted(ui, &texture, preview_area),
                    None => {
                        ui.painter().text(
                            preview_area.center(),
                            egui::Align2::CENTER_CENTER,
                            "End of presentation",
                            egui::FontId::proportional(16.0),
                            self.theme.muted,
                        );
                    }
                }

                ui.separator();
                ui.label(egui::RichText::new("Notes").color(self.theme.muted));
                let editor = egui::TextEdit::multiline(&mut self.notes_buffer)
                    .font(egui::FontId::proportional(self.theme.notes_size))
                    .desired_width(f32::INFINITY)
                    .desired_rows(12)
                    .hint_text("Speaker notes for this slide");
                let response = egui::ScrollArea::vertical()
                    .id_salt("presenter_notes")
                    .show(ui, |ui| ui.add_sized(ui.available_size(), editor))
                    .inner;
                if response.changed() {
                    self.deck.set_current_notes(&self.notes_buffer);
                }
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(self.theme.background)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                let area = ui.max_rect();
                let Some(id) = self.deck.current_slide_id() else {
                    return;
                };
                if let Some(texture) = self.textures.projection(ctx, self.deck.images(), id) {
                    paint_fitted(ui, &texture, area);
                }
                let label = self.deck.slide_label(id);
                ui.painter().text(
                    area.left_bottom() + egui::vec2(4.0, -4.0),
                    egui::Align2::LEFT_BOTTOM,
                    label,
                    egui::FontId::proportional(14.0),
                    self.theme.muted,
                );
            });
    }

    fn draw_presenter_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("presenter_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self.deck.timer_running();
                ui.label(
                    egui::RichText::new(self.deck.timer_text())
                        .monospace()
                        .size(self.theme.timer_size)
                        .color(self.theme.timer_color(running)),
                );
                ui.add_space(12.0);
                let toggle = if running { "Stop" } else { "Start" };
                if ui.button(toggle).clicked() {
                    if running {
                        self.deck.stop_timer();
                    } else {
                        self.deck.start_timer();
                    }
                }
                if ui.button("Reset").clicked() {
                    self.deck.reset_timer();
                }

                ui.add_space(24.0);
                let counter = format!(
                    "Slide {} / {}",
                    self.deck.current_position() + 1,
                    self.deck.slide_count()
                );
                ui.label(
                    egui::RichText::new(counter)
                        .size(self.theme.counter_size)
                        .color(self.theme.foreground),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("End presentation").clicked() {
                        self.deck.set_presentation_mode(false);
                    }
                    if ui.button("Save notes").clicked() {
                        self.save_notes();
                    }
                    let fullscreen = if self.projector_fullscreen {
                        "Projector: windowed"
                    } else {
                        "Projector: fullscreen"
                    };
                    if ui.button(fullscreen).clicked() {
                        self.apply(ctx, super::Action::ToggleFullscreen);
                    }
                });
            });
        });
    }
}

/// Paint a texture as large as fits inside `area`, centred.
fn paint_fitted(ui: &egui::Ui, texture: &egui::TextureHandle, area: egui::Rect) {
    let [w, h] = texture.size();
    let rect = placement([w as u32, h as u32], area, FitMode::Page, 0.0);
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    ui.painter_at(area)
        .image(texture.id(), rect, uv, egui::Color32::WHITE);
}
