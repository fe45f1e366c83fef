use crate::clock::TurnClock;
use crate::load_images::ArtCache;
use coarsetime::Instant;
use macroquad::prelude::*;
use veto_common::snapshot::{MapResult, Side};

mod draft;
mod error;
mod final_scores;

pub const SCREEN_W: f32 = 1920f32;

// Panel geometry shared by the pages
pub const HEADER_Y: f32 = 40f32;
pub const HEADER_W: f32 = 800f32;
pub const HEADER_H: f32 = 110f32;
pub const HEADER_A_X: f32 = 60f32;
pub const HEADER_B_X: f32 = SCREEN_W - 60f32 - HEADER_W;

pub const PANEL_BG: Color = Color::new(0.07, 0.08, 0.12, 0.92);
pub const PANEL_EDGE: Color = Color::new(0.35, 0.38, 0.48, 1.0);
pub const ACCENT: Color = Color::new(0.98, 0.76, 0.18, 1.0);
pub const BAN_TINT: Color = Color::new(0.85, 0.2, 0.2, 1.0);
pub const PICK_TINT: Color = Color::new(0.25, 0.85, 0.45, 1.0);
pub const MUTED: Color = Color::new(0.65, 0.67, 0.72, 1.0);

pub struct PageRenderer {
    pub assets: ArtCache,
    pub clock: TurnClock,
    /// Drives the pulse on the active team's highlight
    pub animation_register: Instant,
}

impl PageRenderer {
    pub fn new() -> Self {
        Self {
            assets: ArtCache::default(),
            clock: TurnClock::default(),
            animation_register: Instant::now(),
        }
    }

    /// Alpha for the active-side highlight, pulsing slowly so it reads as
    /// "live" on stream without distracting.
    fn highlight_alpha(&self) -> f32 {
        let t = Instant::now()
            .duration_since(self.animation_register)
            .as_f64() as f32;
        0.55 + 0.45 * (t * 2.5).sin().abs()
    }

    fn draw_art(&self, texture: Option<&Texture2D>, x: f32, y: f32, w: f32, h: f32) {
        match texture {
            Some(texture) => draw_texture_ex(
                texture,
                x,
                y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            ),
            // missing asset: flat placeholder, never an error
            None => draw_rectangle(x, y, w, h, Color::new(0.16, 0.17, 0.22, 1.0)),
        }
    }

    fn draw_score_badge(&self, result: &MapResult, x: f32, y: f32) {
        let text = if result.score.is_empty() {
            format!("{}", result.winner)
        } else {
            format!("{} · {}", result.score, result.winner)
        };
        let width = measure_text(&text, None, 22, 1.0).width;
        draw_rectangle(x, y, width + 20f32, 30f32, ACCENT);
        draw_text_ex(
            &text,
            x + 10f32,
            y + 22f32,
            TextParams {
                font_size: 22,
                color: BLACK,
                ..Default::default()
            },
        );
    }
}

/// Crop `text` to fit `width` at `font_size`, appending `..` when cropped,
/// and return the x offset that centers the result within the field.
pub fn fit_text(width: f32, text: &str, font_size: u16) -> (f32, String) {
    let mut fitted = text.to_string();
    let mut cropped = false;
    while !fitted.is_empty() && measure_text(&fitted, None, font_size, 1.0).width > width {
        fitted.pop();
        cropped = true;
    }
    if cropped {
        while !fitted.is_empty()
            && measure_text(&(fitted.clone() + ".."), None, font_size, 1.0).width > width
        {
            fitted.pop();
        }
        fitted.push_str("..");
    }
    let x_off = (width - measure_text(&fitted, None, font_size, 1.0).width) / 2f32;
    (x_off, fitted)
}

pub fn side_x(side: Side) -> f32 {
    match side {
        Side::A => HEADER_A_X,
        Side::B => HEADER_B_X,
    }
}
