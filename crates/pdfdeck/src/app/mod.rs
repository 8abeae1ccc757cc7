mod organizer;
mod presenter;
mod projector;
mod textures;

use eframe::egui;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{Config, StartMode};
use crate::deck::{Deck, DeckEvent};
use crate::paths::{is_pdf, normalize_input};
use crate::pdf::browse::BrowseEntry;
use crate::pdf::pdfium::PdfiumEngine;
use crate::theme::Theme;

use textures::SlideTextures;

const TOAST_DURATION: f32 = 1.5;
const TOAST_FADE_START: f32 = 1.0;
const TIMER_REPAINT: Duration = Duration::from_millis(250);

/// How the GUI was asked to start.
pub struct LaunchOptions {
    pub files: Vec<String>,
    pub present: bool,
    pub windowed: bool,
    pub slide: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    First,
    Last,
    SaveNotes,
    ToggleFullscreen,
    LeavePresentation,
    Present,
    Import,
    DeleteCurrent,
    Quit,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        if elapsed < TOAST_FADE_START {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - TOAST_FADE_START) / (TOAST_DURATION - TOAST_FADE_START)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct ErrorMessage {
    title: String,
    message: String,
}

/// An opened folder in the side browser.
struct OpenFolder {
    root: PathBuf,
    entries: Vec<BrowseEntry>,
}

struct DeckApp {
    deck: Deck,
    theme: Theme,
    textures: SlideTextures,
    /// Text of the notes editor, mirrors the current slide's notes
    notes_buffer: String,
    folder: Option<OpenFolder>,
    errors: VecDeque<ErrorMessage>,
    toast: Option<Toast>,
    projector_fullscreen: bool,
    /// Last known projector area in points, used for tall-page stepping
    projector_size: [f32; 2],
    projector_sized: bool,
    title: String,
}

impl DeckApp {
    fn new(deck: Deck, theme: Theme, projector_fullscreen: bool) -> Self {
        let [w, h] = deck.settings().projection_size;
        let mut app = Self {
            deck,
            theme,
            textures: SlideTextures::new(),
            notes_buffer: String::new(),
            folder: None,
            errors: VecDeque::new(),
            toast: None,
            projector_fullscreen,
            projector_size: [w as f32, h as f32],
            projector_sized: false,
            title: String::new(),
        };
        app.title = app.window_title();
        app.notes_buffer = app.deck.current_notes().to_string();
        app
    }

    fn window_title(&self) -> String {
        match self.deck.primary_file().and_then(|p| p.file_name()) {
            Some(name) => format!("pdfdeck - {}", name.to_string_lossy()),
            None => "pdfdeck".to_string(),
        }
    }

    fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// React to everything the deck reported since the last frame.
    fn process_events(&mut self, ctx: &egui::Context) {
        for event in self.deck.take_events() {
            match event {
                DeckEvent::CurrentNotesChanged => {
                    let notes = self.deck.current_notes();
                    if notes != self.notes_buffer {
                        self.notes_buffer = notes.to_string();
                    }
                }
                DeckEvent::CurrentFileChanged => {
                    self.title = self.window_title();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.title.clone()));
                }
                DeckEvent::PresentationModeChanged => {
                    self.projector_sized = false;
                }
                DeckEvent::Error { title, message } => {
                    self.errors.push_back(ErrorMessage { title, message });
                }
                DeckEvent::SlideOrderChanged
                | DeckEvent::CurrentPageChanged
                | DeckEvent::TimerTextChanged => {}
            }
        }
    }

    fn import_paths(&mut self, paths: Vec<PathBuf>) {
        let (pdfs, others): (Vec<PathBuf>, Vec<PathBuf>) =
            paths.into_iter().partition(|p| is_pdf(p));
        if !others.is_empty() {
            self.show_toast(format!("Skipped {} file(s) that are not PDFs", others.len()));
        }
        if pdfs.is_empty() {
            return;
        }
        let added = self.deck.import_files(pdfs);
        if added > 0 {
            self.show_toast(format!("Imported {added} slides"));
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            tracing::debug!(count = dropped.len(), "files dropped");
            self.import_paths(dropped);
        }
    }

    /// Read key presses from `ctx` (main window or projector) and apply them.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let presenting = self.deck.presentation_mode();
        let editing = ctx.memory(|m| m.focused().is_some());
        let actions: Vec<Action> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => key_action(*key, *modifiers, presenting, editing),
                    _ => None,
                })
                .collect()
        });

        // Viewport commands are sent after the input closure
        for action in actions {
            self.apply(ctx, action);
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action) {
        let presenting = self.deck.presentation_mode();
        match action {
            Action::Next => {
                if presenting {
                    self.deck.advance(self.projector_size);
                } else {
                    self.deck.next_slide();
                }
            }
            Action::Prev => {
                if presenting {
                    self.deck.retreat(self.projector_size);
                } else {
                    self.deck.prev_slide();
                }
            }
            Action::First => {
                self.deck.first_slide();
            }
            Action::Last => {
                self.deck.last_slide();
            }
            Action::SaveNotes => self.save_notes(),
            Action::ToggleFullscreen => {
                self.projector_fullscreen = !self.projector_fullscreen;
                ctx.send_viewport_cmd_to(
                    projector::viewport_id(),
                    egui::ViewportCommand::Fullscreen(self.projector_fullscreen),
                );
            }
            Action::LeavePresentation => self.deck.set_presentation_mode(false),
            Action::Present => self.start_presentation(),
            Action::Import => self.import_dialog(),
            Action::DeleteCurrent => {
                if !self.deck.remove_slide(self.deck.current_position()) {
                    self.show_toast("The last slide cannot be removed");
                }
            }
            Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn start_presentation(&mut self) {
        if self.deck.is_empty() {
            self.show_toast("Import a PDF first");
            return;
        }
        self.deck.set_presentation_mode(true);
    }

    fn save_notes(&mut self) {
        if self.deck.save_notes() {
            self.show_toast("Notes saved");
        } else if self.deck.primary_file().is_none() {
            self.show_toast("Import a PDF first");
        } else if self.deck.notes().path().is_none() {
            self.show_toast("Notes file could not be read, not saving");
        } else if self.deck.notes().is_empty() {
            self.show_toast("No notes to save");
        }
    }

    fn show_error_modal(&mut self, ctx: &egui::Context) {
        let Some(error) = self.errors.front() else {
            return;
        };
        let mut dismissed = false;
        let response = egui::Modal::new(egui::Id::new("deck_error")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading(&error.title);
            ui.add_space(8.0);
            ui.label(&error.message);
            ui.add_space(12.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed || response.should_close() {
            self.errors.pop_front();
        }
    }

    fn draw_toast(&self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let background = Theme::with_opacity(self.theme.panel, opacity * 0.9);
        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(background)
                    .corner_radius(8.0)
                    .inner_margin(16.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.message).size(18.0).color(color));
                    });
            });
        ctx.request_repaint();
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.deck.tick();
        self.handle_dropped_files(ctx);
        self.handle_keys(ctx);
        self.process_events(ctx);
        self.textures.sync(self.deck.images());

        if self.deck.presentation_mode() {
            self.draw_presenter(ctx);
            self.show_projector(ctx);
        } else {
            self.draw_organizer(ctx);
        }
        // Navigation from the projector window lands here too
        self.process_events(ctx);

        self.show_error_modal(ctx);
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        self.draw_toast(ctx);

        if self.deck.timer_running() {
            ctx.request_repaint_after(TIMER_REPAINT);
        }
    }
}

fn key_action(
    key: egui::Key,
    modifiers: egui::Modifiers,
    presenting: bool,
    editing: bool,
) -> Option<Action> {
    use egui::Key;

    if modifiers.command && key == Key::S {
        return Some(Action::SaveNotes);
    }
    // Typing in the notes editor
    if editing || modifiers.command || modifiers.alt {
        return None;
    }
    match key {
        Key::ArrowRight | Key::Space | Key::PageDown | Key::N => Some(Action::Next),
        Key::ArrowLeft | Key::PageUp | Key::P | Key::Backspace => Some(Action::Prev),
        Key::Home => Some(Action::First),
        Key::End => Some(Action::Last),
        Key::F | Key::F11 if presenting => Some(Action::ToggleFullscreen),
        Key::Escape | Key::Q if presenting => Some(Action::LeavePresentation),
        Key::F5 if !presenting => Some(Action::Present),
        Key::O if !presenting => Some(Action::Import),
        Key::Delete if !presenting => Some(Action::DeleteCurrent),
        Key::Q if !presenting => Some(Action::Quit),
        _ => None,
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let engine = PdfiumEngine::new(config.library_dir())?;
    let mut deck = Deck::new(Box::new(engine), config.deck_settings());

    if !options.files.is_empty() {
        let paths: Vec<PathBuf> = options.files.iter().map(|f| normalize_input(f)).collect();
        for path in &paths {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
        }
        deck.import_files(&paths);
    }
    if let Some(slide) = options.slide {
        deck.jump_to_slide(slide.saturating_sub(1).min(deck.slide_count().saturating_sub(1)));
    }
    let present = options.present || config.start_mode() == StartMode::Present;
    if present && !deck.is_empty() {
        deck.set_presentation_mode(true);
    }

    let theme = Theme::from_name(config.theme_name());
    let projector_fullscreen = config.projector_fullscreen() && !options.windowed;
    let app = DeckApp::new(deck, theme, projector_fullscreen);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([640.0, 400.0])
        .with_drag_and_drop(true)
        .with_title(&app.title);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let title = app.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(app.theme.visuals());
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Key, Modifiers};

    #[test]
    fn navigation_keys() {
        for key in [Key::ArrowRight, Key::Space, Key::PageDown, Key::N] {
            assert_eq!(key_action(key, Modifiers::NONE, true, false), Some(Action::Next));
        }
        for key in [Key::ArrowLeft, Key::PageUp, Key::P, Key::Backspace] {
            assert_eq!(key_action(key, Modifiers::NONE, false, false), Some(Action::Prev));
        }
        assert_eq!(key_action(Key::Home, Modifiers::NONE, true, false), Some(Action::First));
        assert_eq!(key_action(Key::End, Modifiers::NONE, true, false), Some(Action::Last));
    }

    #[test]
    fn keys_depend_on_mode() {
        assert_eq!(
            key_action(Key::Escape, Modifiers::NONE, true, false),
            Some(Action::LeavePresentation)
        );
        assert_eq!(key_action(Key::Escape, Modifiers::NONE, false, false), None);
        assert_eq!(key_action(Key::Q, Modifiers::NONE, false, false), Some(Action::Quit));
        assert_eq!(
            key_action(Key::F11, Modifiers::NONE, true, false),
            Some(Action::ToggleFullscreen)
        );
        assert_eq!(key_action(Key::F, Modifiers::NONE, false, false), None);
        assert_eq!(key_action(Key::F5, Modifiers::NONE, false, false), Some(Action::Present));
        assert_eq!(key_action(Key::O, Modifiers::NONE, false, false), Some(Action::Import));
        assert_eq!(key_action(Key::O, Modifiers::NONE, true, false), None);
    }

    #[test]
    fn editing_notes_swallows_navigation_but_not_save() {
        assert_eq!(key_action(Key::N, Modifiers::NONE, true, true), None);
        assert_eq!(key_action(Key::Space, Modifiers::NONE, true, true), None);
        assert_eq!(
            key_action(Key::S, Modifiers::COMMAND, true, true),
            Some(Action::SaveNotes)
        );
    }

    #[test]
    fn toast_fades_out() {
        let mut toast = Toast::new("hello");
        assert_eq!(toast.opacity(), 1.0);
        assert!(!toast.is_expired());
        toast.start = Instant::now() - Duration::from_secs(2);
        assert_eq!(toast.opacity(), 0.0);
        assert!(toast.is_expired());
    }
}
