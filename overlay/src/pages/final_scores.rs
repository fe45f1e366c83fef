use super::{ACCENT, HEADER_H, HEADER_W, HEADER_Y, PANEL_BG, PANEL_EDGE, PageRenderer, SCREEN_W, fit_text, side_x};
use macroquad::prelude::*;
use veto_common::resolver::Phase;
use veto_common::slug::team_slug;
use veto_common::snapshot::{MatchSnapshot, Side};

impl PageRenderer {
    /// The series-decided panel. Replaces the grid and picked strip outright;
    /// the step pointer is irrelevant once `series_finished` is set.
    pub fn final_scores(&mut self, state: &MatchSnapshot) {
        self.team_headers_plain(state);

        let panel_w = 900f32;
        let panel_h = 420f32;
        let x = (SCREEN_W - panel_w) / 2f32;
        let y = 320f32;
        draw_rectangle(x, y, panel_w, panel_h, PANEL_BG);
        draw_rectangle_lines(x, y, panel_w, panel_h, 4f32, ACCENT);

        let winner = match state.phase() {
            Phase::SeriesOver { winner } => winner,
            _ => None,
        };

        if let Some(side) = winner {
            let logo = state
                .teams
                .get(&side)
                .map(|team| team_slug(team.name.trim()))
                .filter(|slug| !slug.is_empty())
                .and_then(|slug| self.assets.team_logo(&slug));
            self.draw_art(logo, x + (panel_w - 140f32) / 2f32, y + 40f32, 140f32, 140f32);
        }

        let (x_off, text) = fit_text(panel_w - 80f32, &state.phase_text(), 72);
        draw_text_ex(
            &text,
            x + 40f32 + x_off,
            y + 260f32,
            TextParams {
                font_size: 72,
                color: WHITE,
                ..Default::default()
            },
        );

        let score = state.series_score_text();
        if !score.is_empty() {
            let (x_off, text) = fit_text(panel_w - 80f32, &score, 64);
            draw_text_ex(
                &text,
                x + 40f32 + x_off,
                y + 360f32,
                TextParams {
                    font_size: 64,
                    color: ACCENT,
                    ..Default::default()
                },
            );
        }
    }

    /// Headers without the turn highlight; no one is on the clock anymore.
    fn team_headers_plain(&self, state: &MatchSnapshot) {
        for side in [Side::A, Side::B] {
            let x = side_x(side);
            draw_rectangle(x, HEADER_Y, HEADER_W, HEADER_H, PANEL_BG);
            draw_rectangle_lines(x, HEADER_Y, HEADER_W, HEADER_H, 2f32, PANEL_EDGE);

            let logo = state
                .teams
                .get(&side)
                .map(|team| team_slug(team.name.trim()))
                .filter(|slug| !slug.is_empty())
                .and_then(|slug| self.assets.team_logo(&slug));
            self.draw_art(logo, x + 12f32, HEADER_Y + 12f32, 86f32, 86f32);

            let label = state.team_label(side);
            let (x_off, text) = fit_text(HEADER_W - 130f32, &label, 48);
            draw_text_ex(
                &text,
                x + 110f32 + x_off,
                HEADER_Y + 70f32,
                TextParams {
                    font_size: 48,
                    color: WHITE,
                    ..Default::default()
                },
            );
        }
    }
}
