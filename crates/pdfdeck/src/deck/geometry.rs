use serde::{Deserialize, Serialize};

use crate::pdf::PageSize;

/// How projection images are sized for the projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Whole page visible, letterboxed.
    #[default]
    Page,
    /// Page fills the screen width; pages taller than the screen are shown in
    /// two steps (top, then bottom).
    Width,
}

impl FitMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Self::Page),
            "width" => Some(Self::Width),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Width => "width",
        }
    }
}

/// Thumbnail of fixed `width`, height following the page's aspect ratio.
pub fn thumbnail_size(page: PageSize, width: u32) -> [u32; 2] {
    let width = width.max(1);
    if page.width <= 0.0 || page.height <= 0.0 {
        return [width, width];
    }
    let height = (width as f32 * page.height / page.width).round() as u32;
    [width, height.max(1)]
}

/// Largest size with the page's aspect ratio that fits inside `bounds`.
pub fn fit_within(page: PageSize, bounds: [u32; 2]) -> [u32; 2] {
    let [bw, bh] = [bounds[0].max(1), bounds[1].max(1)];
    if page.width <= 0.0 || page.height <= 0.0 {
        return [bw, bh];
    }
    let scale = (bw as f32 / page.width).min(bh as f32 / page.height);
    let w = (page.width * scale).round() as u32;
    let h = (page.height * scale).round() as u32;
    [w.clamp(1, bw), h.clamp(1, bh)]
}

/// Pixel size of the projection image for `page`.
pub fn projection_size(page: PageSize, bounds: [u32; 2], fit: FitMode) -> [u32; 2] {
    match fit {
        FitMode::Page => fit_within(page, bounds),
        FitMode::Width => thumbnail_size(page, bounds[0]),
    }
}

/// Whether `page`, scaled to the viewport width, overflows the viewport height.
pub fn is_tall(page: PageSize, viewport: [f32; 2], fit: FitMode) -> bool {
    if fit != FitMode::Width || page.width <= 0.0 || viewport[0] <= 0.0 {
        return false;
    }
    page.height * viewport[0] / page.width > viewport[1] + 0.5
}
