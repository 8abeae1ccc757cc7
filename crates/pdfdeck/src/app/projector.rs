use eframe::egui;

use crate::deck::FitMode;

use super::DeckApp;

pub fn viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("pdfdeck_projector")
}

/// Where an image of `image` pixels goes inside `area`. With `Width` fit a
/// page taller than the area is shifted up by `offset` (0 = top, 1 = bottom).
pub fn placement(image: [u32; 2], area: egui::Rect, fit: FitMode, offset: f32) -> egui::Rect {
    let [iw, ih] = [image[0].max(1) as f32, image[1].max(1) as f32];
    match fit {
        FitMode::Page => {
            let scale = (area.width() / iw).min(area.height() / ih);
            egui::Rect::from_center_size(area.center(), egui::vec2(iw * scale, ih * scale))
        }
        FitMode::Width => {
            let scale = area.width() / iw;
            let height = ih * scale;
            if height <= area.height() {
                return egui::Rect::from_center_size(
                    area.center(),
                    egui::vec2(area.width(), height),
                );
            }
            let top = area.top() - offset.clamp(0.0, 1.0) * (height - area.height());
            egui::Rect::from_min_size(
                egui::pos2(area.left(), top),
                egui::vec2(area.width(), height),
            )
        }
    }
}

impl DeckApp {
    /// Second native window showing only the current slide.
    pub(super) fn show_projector(&mut self, ctx: &egui::Context) {
        let builder = egui::ViewportBuilder::default()
            .with_title(format!("{} (projector)", self.title))
            .with_inner_size([960.0, 540.0])
            .with_fullscreen(self.projector_fullscreen);

        ctx.show_viewport_immediate(viewport_id(), builder, |ctx, _class| {
            if ctx.input(|i| i.viewport().close_requested()) {
                self.deck.set_presentation_mode(false);
                return;
            }
            self.handle_keys(ctx);
            self.fit_projection_to_monitor(ctx);

            let background = self.theme.projector_background;
            egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(background).inner_margin(0.0))
                .show(ctx, |ui| {
                    let area = ui.max_rect();
                    self.projector_size = [area.width(), area.height()];

                    let Some(id) = self.deck.current_slide_id() else {
                        return;
                    };
                    let Some(texture) = self.textures.projection(ctx, self.deck.images(), id)
                    else {
                        return;
                    };
                    let [w, h] = texture.size();
                    let rect = placement(
                        [w as u32, h as u32],
                        area,
                        self.deck.settings().fit,
                        self.deck.vertical_offset(),
                    );
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter_at(area)
                        .image(texture.id(), rect, uv, egui::Color32::WHITE);
                });
        });
    }

    /// Once per presentation, re-render projections at the projector
    /// monitor's resolution when it is known.
    fn fit_projection_to_monitor(&mut self, ctx: &egui::Context) {
        if self.projector_sized || !self.projector_fullscreen {
            return;
        }
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        let ppp = ctx.pixels_per_point();
        let size = [
            (monitor.x * ppp).round() as u32,
            (monitor.y * ppp).round() as u32,
        ];
        if size[0] > 0 && size[1] > 0 {
            tracing::debug!(width = size[0], height = size[1], "projector monitor size");
            self.deck.set_projection_size(size);
        }
        self.projector_sized = true;
    }
}
