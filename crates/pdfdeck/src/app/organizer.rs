use eframe::egui;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

use crate::deck::{FitMode, SlideId};
use crate::pdf::browse::{BrowseEntry, scan_folder};
use crate::pdf::export::export_pages;

use super::projector::placement;
use super::{DeckApp, ErrorMessage, OpenFolder};

const CELL_SPACING: f32 = 12.0;
const CELL_LABEL_HEIGHT: f32 = 48.0;

/// Something the user did to a slide in the grid, applied after drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridAction {
    Select(usize),
    Move { from: usize, to: usize },
    Remove(usize),
}

impl DeckApp {
    /// Main window outside presentation mode.
    pub(super) fn draw_organizer(&mut self, ctx: &egui::Context) {
        self.draw_toolbar(ctx);
        self.draw_notes_panel(ctx);
        if self.folder.is_some() {
            self.draw_folder_browser(ctx);
        }

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.deck.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Drop PDF files here or use Import")
                            .size(20.0)
                            .color(self.theme.muted),
                    );
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(CELL_SPACING, CELL_SPACING);
                ui.horizontal_wrapped(|ui| {
                    for position in 0..self.deck.slide_count() {
                        if let Some(id) = self.deck.slide_at(position) {
                            self.draw_cell(ui, position, id, &mut actions);
                        }
                    }
                });
            });
        });

        for action in actions {
            self.apply_grid_action(action);
        }
    }

    fn apply_grid_action(&mut self, action: GridAction) {
        match action {
            GridAction::Select(position) => {
                self.deck.jump_to_slide(position);
            }
            GridAction::Move { from, to } => {
                self.deck.move_slide(from, to);
            }
            GridAction::Remove(position) => {
                if !self.deck.remove_slide(position) {
                    self.show_toast("The last slide cannot be removed");
                }
            }
        }
    }

    fn draw_cell(
        &mut self,
        ui: &mut egui::Ui,
        position: usize,
        id: SlideId,
        actions: &mut Vec<GridAction>,
    ) {
        let side = self.deck.settings().thumbnail_width as f32;
        let is_current = position == self.deck.current_position();
        let last = self.deck.slide_count().saturating_sub(1);
        let texture = self.textures.thumbnail(ui.ctx(), self.deck.images(), id);
        let label = format!("{}. {}", position + 1, self.deck.slide_label(id));

        let drag_id = egui::Id::new(("slide_cell", id));
        let cell = ui.vertical(|ui| {
            ui.set_width(side);
            let clicked = ui.dnd_drag_source(drag_id, position, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(side, side * 0.75), egui::Sense::click());
                ui.painter().rect_filled(rect, 4.0, self.theme.panel);
                if let Some(texture) = &texture {
                    let [w, h] = texture.size();
                    let image_rect = placement([w as u32, h as u32], rect, FitMode::Page, 0.0);
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), image_rect, uv, egui::Color32::WHITE);
                }
                if is_current {
                    ui.painter().rect_stroke(
                        rect,
                        4.0,
                        egui::Stroke::new(3.0, self.theme.selection),
                        egui::StrokeKind::Outside,
                    );
                }
                response.clicked()
            });
            if clicked.inner {
                actions.push(GridAction::Select(position));
            }

            ui.allocate_ui(egui::vec2(side, CELL_LABEL_HEIGHT), |ui| {
                ui.label(egui::RichText::new(&label).small().color(self.theme.foreground));
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(position > 0, egui::Button::new("\u{25C0}").small())
                        .on_hover_text("Move left")
                        .clicked()
                    {
                        actions.push(GridAction::Move {
                            from: position,
                            to: position - 1,
                        });
                    }
                    if ui
                        .add_enabled(position < last, egui::Button::new("\u{25B6}").small())
                        .on_hover_text("Move right")
                        .clicked()
                    {
                        actions.push(GridAction::Move {
                            from: position,
                            to: position + 1,
                        });
                    }
                    let delete = egui::Button::new(
                        egui::RichText::new("\u{2715}").color(self.theme.danger),
                    )
                    .small();
                    if ui
                        .add_enabled(last > 0, delete)
                        .on_hover_text("Remove slide")
                        .clicked()
                    {
                        actions.push(GridAction::Remove(position));
                    }
                });
            });
        });

        // Dropping another cell onto this one moves it here
        let response = cell.response;
        if let Some(from) = response.dnd_hover_payload::<usize>() {
            if *from != position {
                ui.painter().rect_stroke(
                    response.rect,
                    4.0,
                    egui::Stroke::new(2.0, self.theme.accent),
                    egui::StrokeKind::Outside,
                );
            }
        }
        if let Some(from) = response.dnd_release_payload::<usize>() {
            if *from != position {
                actions.push(GridAction::Move {
                    from: *from,
                    to: position,
                });
            }
        }
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("organizer_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Import\u{2026}").clicked() {
                    self.import_dialog();
                }
                if ui.button("Open folder\u{2026}").clicked() {
                    self.open_folder_dialog();
                }
                let has_slides = !self.deck.is_empty();
                if ui
                    .add_enabled(has_slides, egui::Button::new("Export\u{2026}"))
                    .clicked()
                {
                    self.export_dialog();
                }
                if ui.add_enabled(has_slides, egui::Button::new("Present")).clicked() {
                    self.start_presentation();
                }
                if ui.add_enabled(has_slides, egui::Button::new("Save notes")).clicked() {
                    self.save_notes();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = if self.theme.is_dark() { "Light" } else { "Dark" };
                    if ui.button(theme_label).clicked() {
                        self.theme = self.theme.toggled();
                        ctx.set_visuals(self.theme.visuals());
                    }
                    ui.label(
                        egui::RichText::new(format!("{} slides", self.deck.slide_count()))
                            .color(self.theme.muted),
                    );
                });
            });
        });
    }

    fn draw_notes_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("organizer_notes")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                let heading = match self.deck.current_slide_id() {
                    Some(id) => format!("Notes: {}", self.deck.slide_label(id)),
                    None => "Notes".to_string(),
                };
                ui.label(egui::RichText::new(heading).color(self.theme.muted));
                let enabled = !self.deck.is_empty();
                let editor = egui::TextEdit::multiline(&mut self.notes_buffer)
                    .desired_width(f32::INFINITY)
                    .hint_text("Speaker notes for the selected slide");
                let response = ui.add_enabled(enabled, editor);
                if response.changed() {
                    self.deck.set_current_notes(&self.notes_buffer);
                }
            });
    }

    fn draw_folder_browser(&mut self, ctx: &egui::Context) {
        let mut import: Vec<PathBuf> = Vec::new();
        let mut close = false;
        egui::SidePanel::left("folder_browser")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                let Some(folder) = &self.folder else {
                    return;
                };
                ui.horizontal(|ui| {
                    ui.strong(folder_name(&folder.root));
                    if ui.small_button("\u{2715}").on_hover_text("Close folder").clicked() {
                        close = true;
                    }
                });
                if ui.button("Import all").clicked() {
                    import.extend(folder.entries.iter().flat_map(BrowseEntry::files));
                }
                ui.separator();
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for entry in &folder.entries {
                        browse_entry_ui(ui, entry, &mut import);
                    }
                    if folder.entries.is_empty() {
                        ui.label(egui::RichText::new("No PDF files").color(self.theme.muted));
                    }
                });
            });
        if close {
            self.folder = None;
        }
        if !import.is_empty() {
            self.import_paths(import);
        }
    }

    pub(super) fn import_dialog(&mut self) {
        if let Some(paths) = FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_title("Import PDF")
            .pick_files()
        {
            self.import_paths(paths);
        }
    }

    fn open_folder_dialog(&mut self) {
        let Some(root) = FileDialog::new().set_title("Open folder").pick_folder() else {
            return;
        };
        match scan_folder(&root) {
            Ok(entries) => self.folder = Some(OpenFolder { root, entries }),
            Err(e) => self.errors.push_back(ErrorMessage {
                title: "Error".to_string(),
                message: format!("{e:#}"),
            }),
        }
    }

    fn export_dialog(&mut self) {
        let default_name = self
            .deck
            .primary_file()
            .and_then(|p| p.file_stem())
            .map(|stem| format!("{}-deck.pdf", stem.to_string_lossy()))
            .unwrap_or_else(|| "deck.pdf".to_string());
        let Some(output) = FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_title("Export PDF")
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };
        match export_pages(&self.deck.export_plan(), &output) {
            Ok(pages) => self.show_toast(format!("Exported {pages} slides")),
            Err(e) => self.errors.push_back(ErrorMessage {
                title: "Export failed".to_string(),
                message: e.to_string(),
            }),
        }
    }
}

fn browse_entry_ui(ui: &mut egui::Ui, entry: &BrowseEntry, import: &mut Vec<PathBuf>) {
    match entry {
        BrowseEntry::Folder { children, .. } => {
            egui::CollapsingHeader::new(entry.name())
                .id_salt(entry.path())
                .show(ui, |ui| {
                    for child in children {
                        browse_entry_ui(ui, child, import);
                    }
                });
        }
        BrowseEntry::File { path, .. } => {
            if ui
                .selectable_label(false, entry.name())
                .on_hover_text("Click to import")
                .clicked()
            {
                import.push(path.clone());
            }
        }
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
