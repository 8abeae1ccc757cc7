use std::collections::HashMap;

use image::RgbaImage;

use super::SlideId;

/// Rendered images per slide: a small thumbnail for the organizer and the
/// presenter preview, and a large one for the projector.
///
/// `generation` increases on every change so the UI can tell when its GPU
/// textures are stale.
#[derive(Debug, Default)]
pub struct SlideImages {
    thumbnails: HashMap<SlideId, RgbaImage>,
    projections: HashMap<SlideId, RgbaImage>,
    generation: u64,
}

impl SlideImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn thumbnail(&self, id: SlideId) -> Option<&RgbaImage> {
        self.thumbnails.get(&id)
    }

    pub fn projection(&self, id: SlideId) -> Option<&RgbaImage> {
        self.projections.get(&id)
    }

    pub fn has_projection(&self, id: SlideId) -> bool {
        self.projections.contains_key(&id)
    }

    pub fn insert_thumbnail(&mut self, id: SlideId, image: RgbaImage) {
        self.thumbnails.insert(id, image);
        self.generation += 1;
    }

    pub fn insert_projection(&mut self, id: SlideId, image: RgbaImage) {
        self.projections.insert(id, image);
        self.generation += 1;
    }

    pub fn remove(&mut self, id: SlideId) {
        let had_thumb = self.thumbnails.remove(&id).is_some();
        let had_projection = self.projections.remove(&id).is_some();
        if had_thumb || had_projection {
            self.generation += 1;
        }
    }

    pub fn clear_projections(&mut self) {
        if !self.projections.is_empty() {
            self.projections.clear();
            self.generation += 1;
        }
    }

    #[cfg(test)]
    pub fn thumbnail_count(&self) -> usize {
        self.thumbnails.len()
    }

    #[cfg(test)]
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_tracks_changes() {
        let mut images = SlideImages::new();
        assert_eq!(images.generation(), 0);

        images.insert_thumbnail(SlideId(0), RgbaImage::new(4, 3));
        images.insert_projection(SlideId(0), RgbaImage::new(8, 6));
        assert_eq!(images.generation(), 2);
        assert_eq!(images.thumbnail(SlideId(0)).map(|i| i.width()), Some(4));
        assert!(images.has_projection(SlideId(0)));

        // Removing something that is not there is not a change
        images.remove(SlideId(9));
        assert_eq!(images.generation(), 2);

        images.clear_projections();
        assert_eq!(images.generation(), 3);
        assert_eq!(images.projection_count(), 0);
        images.clear_projections();
        assert_eq!(images.generation(), 3);

        images.remove(SlideId(0));
        assert_eq!(images.thumbnail_count(), 0);
        assert_eq!(images.generation(), 4);
    }
}
