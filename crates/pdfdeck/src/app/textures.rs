use std::collections::HashMap;

use eframe::egui;
use image::RgbaImage;

use crate::deck::{SlideId, SlideImages};

/// GPU copies of the deck's rendered images, uploaded on first use.
///
/// Everything is dropped whenever the image cache's generation moves, which
/// only happens on import, removal and entering presentation mode.
#[derive(Default)]
pub struct SlideTextures {
    generation: Option<u64>,
    thumbnails: HashMap<SlideId, egui::TextureHandle>,
    projections: HashMap<SlideId, egui::TextureHandle>,
}

impl SlideTextures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, images: &SlideImages) {
        if self.generation != Some(images.generation()) {
            self.thumbnails.clear();
            self.projections.clear();
            self.generation = Some(images.generation());
        }
    }

    pub fn thumbnail(
        &mut self,
        ctx: &egui::Context,
        images: &SlideImages,
        id: SlideId,
    ) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.thumbnails.get(&id) {
            return Some(texture.clone());
        }
        let texture = upload(ctx, &format!("thumb-{id}"), images.thumbnail(id)?);
        self.thumbnails.insert(id, texture.clone());
        Some(texture)
    }

    /// The projection image, or the thumbnail while no projection exists.
    pub fn projection(
        &mut self,
        ctx: &egui::Context,
        images: &SlideImages,
        id: SlideId,
    ) -> Option<egui::TextureHandle> {
        if let Some(texture) = self.projections.get(&id) {
            return Some(texture.clone());
        }
        let Some(image) = images.projection(id) else {
            return self.thumbnail(ctx, images, id);
        };
        let texture = upload(ctx, &format!("projection-{id}"), image);
        self.projections.insert(id, texture.clone());
        Some(texture)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.thumbnails.len() + self.projections.len()
    }
}

fn upload(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}
