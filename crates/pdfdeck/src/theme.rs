use eframe::egui::{self, Color32};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub panel: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub accent: Color32,
    /// Frame around the current slide in the organizer grid
    pub selection: Color32,
    pub danger: Color32,
    /// The projector is always black around the page
    pub projector_background: Color32,
    pub timer_running: Color32,
    pub timer_stopped: Color32,
    pub notes_size: f32,
    pub timer_size: f32,
    pub counter_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            panel: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            selection: Color32::from_rgb(0x5C, 0xB8, 0xFF),
            danger: Color32::from_rgb(0xFF, 0x7E, 0x67),
            projector_background: Color32::BLACK,
            timer_running: Color32::from_rgb(0x5C, 0xDB, 0x95),
            timer_stopped: Color32::from_rgb(0xE8, 0xA8, 0x38),
            notes_size: 20.0,
            timer_size: 44.0,
            counter_size: 18.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            panel: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            muted: Color32::from_rgb(0x70, 0x70, 0x70),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            selection: Color32::from_rgb(0x1A, 0x6B, 0xB5),
            danger: Color32::from_rgb(0xC7, 0x3E, 0x1D),
            projector_background: Color32::BLACK,
            timer_running: Color32::from_rgb(0x1E, 0x8A, 0x5A),
            timer_stopped: Color32::from_rgb(0xB8, 0x7B, 0x0A),
            notes_size: 20.0,
            timer_size: 44.0,
            counter_size: 18.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// egui visuals matching this theme.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.background;
        visuals.window_fill = self.panel;
        visuals.selection.bg_fill = Self::with_opacity(self.selection, 0.6);
        visuals.hyperlink_color = self.accent;
        visuals
    }

    pub fn timer_color(&self, running: bool) -> Color32 {
        if running {
            self.timer_running
        } else {
            self.timer_stopped
        }
    }
}
