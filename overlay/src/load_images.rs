use crate::network::{Art, ArtKind};
use log::warn;
use macroquad::prelude::*;
use std::collections::HashMap;

/// Slug-keyed store of decoded art. Filled from the bytes the networking
/// thread ships alongside snapshots; a miss renders as a placeholder card,
/// never as an error.
#[derive(Default)]
pub struct ArtCache {
    map_art: HashMap<String, Texture2D>,
    team_logos: HashMap<String, Texture2D>,
}

impl ArtCache {
    pub fn insert(&mut self, art: Art) {
        let Some(texture) = texture_from_bytes(&art.bytes) else {
            warn!("Undecodable art for slug '{}' dropped", art.slug);
            return;
        };
        match art.kind {
            ArtKind::MapArt => self.map_art.insert(art.slug, texture),
            ArtKind::TeamLogo => self.team_logos.insert(art.slug, texture),
        };
    }

    pub fn map_art(&self, slug: &str) -> Option<&Texture2D> {
        self.map_art.get(slug)
    }

    pub fn team_logo(&self, slug: &str) -> Option<&Texture2D> {
        self.team_logos.get(slug)
    }
}

/// Decode jpeg/png/webp bytes into a texture. Macroquad's own loader only
/// handles a subset of these, so decoding goes through the `image` crate
/// and uploads raw RGBA.
fn texture_from_bytes(bytes: &[u8]) -> Option<Texture2D> {
    match image::load_from_memory(bytes) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let (width, height) = rgba.dimensions();
            Some(Texture2D::from_rgba8(
                width as u16,
                height as u16,
                rgba.as_raw(),
            ))
        }
        Err(e) => {
            warn!("Failed to decode image bytes: {e}");
            None
        }
    }
}
