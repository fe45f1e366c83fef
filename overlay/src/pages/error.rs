use super::{BAN_TINT, MUTED, PANEL_BG, PageRenderer, SCREEN_W, fit_text};
use macroquad::prelude::*;

impl PageRenderer {
    /// Fatal-configuration page: the overlay was started without a usable
    /// match identifier, so there is nothing to connect to. An explicit
    /// message beats a silent black frame on the program feed.
    pub fn config_error(&self, reason: &str) {
        let panel_w = 1100f32;
        let x = (SCREEN_W - panel_w) / 2f32;
        draw_rectangle(x, 420f32, panel_w, 240f32, PANEL_BG);
        draw_rectangle_lines(x, 420f32, panel_w, 240f32, 4f32, BAN_TINT);

        let (x_off, text) = fit_text(panel_w - 80f32, "OVERLAY NOT CONFIGURED", 56);
        draw_text_ex(
            &text,
            x + 40f32 + x_off,
            510f32,
            TextParams {
                font_size: 56,
                color: BAN_TINT,
                ..Default::default()
            },
        );
        let (x_off, text) = fit_text(panel_w - 80f32, reason, 32);
        draw_text_ex(
            &text,
            x + 40f32 + x_off,
            590f32,
            TextParams {
                font_size: 32,
                color: MUTED,
                ..Default::default()
            },
        );
    }
}
