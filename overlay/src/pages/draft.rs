use super::{
    ACCENT, BAN_TINT, HEADER_H, HEADER_W, HEADER_Y, MUTED, PANEL_BG, PANEL_EDGE, PICK_TINT,
    PageRenderer, SCREEN_W, fit_text, side_x,
};
use crate::clock::wall_clock_secs;
use macroquad::prelude::*;
use veto_common::slug::team_slug;
use veto_common::snapshot::{MapEntry, MapStatus, MatchSnapshot, Side, map_name_of};

const GRID_Y: f32 = 330f32;
const CARD_W: f32 = 240f32;
const CARD_H: f32 = 320f32;
const CARD_GAP: f32 = 24f32;
const STRIP_Y: f32 = 740f32;
const STRIP_CARD_W: f32 = 300f32;
const STRIP_CARD_H: f32 = 280f32;

impl PageRenderer {
    /// Full refresh of the draft view: headers, banner, timer, active grid,
    /// picked strip. Recomputed from scratch every frame, so a new snapshot
    /// fully supersedes whatever was on screen before.
    pub fn draft_display(&mut self, state: &MatchSnapshot) {
        self.team_headers(state);
        self.phase_banner(state);
        self.turn_indicators();
        self.active_grid(state);
        self.picked_strip(state);
    }

    fn team_headers(&self, state: &MatchSnapshot) {
        for side in [Side::A, Side::B] {
            let x = side_x(side);
            draw_rectangle(x, HEADER_Y, HEADER_W, HEADER_H, PANEL_BG);

            if state.active_team() == Some(side) {
                let highlight = Color {
                    a: self.highlight_alpha(),
                    ..ACCENT
                };
                draw_rectangle_lines(x - 3f32, HEADER_Y - 3f32, HEADER_W + 6f32, HEADER_H + 6f32, 6f32, highlight);
            } else {
                draw_rectangle_lines(x, HEADER_Y, HEADER_W, HEADER_H, 2f32, PANEL_EDGE);
            }

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

    fn phase_banner(&self, state: &MatchSnapshot) {
        let text = state.phase_text();
        let (x_off, text) = fit_text(900f32, &text, 56);
        draw_text_ex(
            &text,
            (SCREEN_W - 900f32) / 2f32 + x_off,
            250f32,
            TextParams {
                font_size: 56,
                color: WHITE,
                ..Default::default()
            },
        );
    }

    /// Countdown track under each header. Only the side on the clock gets a
    /// fill and a seconds readout; the other side's track stays empty, so a
    /// turn change wipes the old indicator on the very next frame.
    fn turn_indicators(&self) {
        let bar_y = HEADER_Y + HEADER_H + 10f32;
        for side in [Side::A, Side::B] {
            draw_rectangle(side_x(side), bar_y, HEADER_W, 10f32, Color::new(0.2, 0.21, 0.26, 0.9));
        }
        let Some(side) = self.clock.side() else {
            return;
        };
        let now = wall_clock_secs();
        if let Some(progress) = self.clock.progress(now) {
            let x = side_x(side);
            draw_rectangle(x, bar_y, HEADER_W * (1f32 - progress), 10f32, ACCENT);
            if let Some(secs) = self.clock.remaining(now) {
                draw_text_ex(
                    &format!("{secs}"),
                    x + HEADER_W + 14f32,
                    bar_y + 12f32,
                    TextParams {
                        font_size: 30,
                        color: ACCENT,
                        ..Default::default()
                    },
                );
            }
        }
    }

    fn active_grid(&self, state: &MatchSnapshot) {
        let entries = state.active_mode_entries();
        if entries.is_empty() {
            return;
        }
        let total = entries.len() as f32 * CARD_W + (entries.len() as f32 - 1f32) * CARD_GAP;
        let start_x = (SCREEN_W - total) / 2f32;
        for (i, (key, entry)) in entries.iter().enumerate() {
            let x = start_x + i as f32 * (CARD_W + CARD_GAP);
            self.map_card(state, key, entry, x, GRID_Y, CARD_W, CARD_H);
        }
    }

    fn map_card(
        &self,
        state: &MatchSnapshot,
        key: &str,
        entry: &MapEntry,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) {
        draw_rectangle(x, y, w, h, PANEL_BG);
        let edge = match entry.status {
            MapStatus::Available => PANEL_EDGE,
            MapStatus::Banned => BAN_TINT,
            MapStatus::Picked => PICK_TINT,
        };
        draw_rectangle_lines(x, y, w, h, 3f32, edge);

        let name = map_name_of(key);
        let art = self
            .assets
            .map_art(&veto_common::slug::map_slug(name));
        self.draw_art(art, x + 8f32, y + 8f32, w - 16f32, 135f32);
        if entry.status == MapStatus::Banned {
            draw_rectangle(x + 8f32, y + 8f32, w - 16f32, 135f32, Color::new(0.0, 0.0, 0.0, 0.65));
            let (x_off, text) = fit_text(w - 16f32, "BANNED", 34);
            draw_text_ex(
                &text,
                x + 8f32 + x_off,
                y + 85f32,
                TextParams {
                    font_size: 34,
                    color: BAN_TINT,
                    ..Default::default()
                },
            );
        }

        let (x_off, text) = fit_text(w - 16f32, name, 32);
        draw_text_ex(
            &text,
            x + 8f32 + x_off,
            y + 180f32,
            TextParams {
                font_size: 32,
                color: WHITE,
                ..Default::default()
            },
        );

        // owning team, side choice, and result badge degrade to blanks
        if let Some(side) = entry.team {
            let (x_off, text) = fit_text(w - 16f32, &state.team_label(side), 24);
            draw_text_ex(
                &text,
                x + 8f32 + x_off,
                y + 215f32,
                TextParams {
                    font_size: 24,
                    color: MUTED,
                    ..Default::default()
                },
            );
        }
        if let Some(side_choice) = entry.side.as_deref() {
            let (x_off, text) = fit_text(w - 16f32, side_choice, 24);
            draw_text_ex(
                &text,
                x + 8f32 + x_off,
                y + 248f32,
                TextParams {
                    font_size: 24,
                    color: MUTED,
                    ..Default::default()
                },
            );
        }
        if let Some(result) = entry.slot.and_then(|slot| state.result_for(slot)) {
            self.draw_score_badge(result, x + 8f32, y + h - 42f32);
        }
    }

    /// The already-picked maps in slot order. Suppressed entirely once the
    /// series is finished (the final panel takes its place).
    fn picked_strip(&self, state: &MatchSnapshot) {
        let picked = state.picked_entries();
        if picked.is_empty() {
            return;
        }
        let total =
            picked.len() as f32 * STRIP_CARD_W + (picked.len() as f32 - 1f32) * CARD_GAP;
        let start_x = (SCREEN_W - total) / 2f32;
        for (i, (key, entry)) in picked.iter().enumerate() {
            let x = start_x + i as f32 * (STRIP_CARD_W + CARD_GAP);
            draw_rectangle(x, STRIP_Y, STRIP_CARD_W, STRIP_CARD_H, PANEL_BG);
            draw_rectangle_lines(x, STRIP_Y, STRIP_CARD_W, STRIP_CARD_H, 2f32, PANEL_EDGE);

            let slot_text = match entry.slot {
                Some(slot) => format!("MAP {slot}"),
                None => String::from("MAP"),
            };
            draw_text_ex(
                &slot_text,
                x + 12f32,
                STRIP_Y + 34f32,
                TextParams {
                    font_size: 28,
                    color: ACCENT,
                    ..Default::default()
                },
            );
            let (mode_off, mode_text) = fit_text(120f32, &entry.mode, 24);
            draw_text_ex(
                &mode_text,
                x + STRIP_CARD_W - 132f32 + mode_off,
                STRIP_Y + 32f32,
                TextParams {
                    font_size: 24,
                    color: MUTED,
                    ..Default::default()
                },
            );

            let name = map_name_of(key);
            let art = self
                .assets
                .map_art(&veto_common::slug::map_slug(name));
            self.draw_art(art, x + 12f32, STRIP_Y + 46f32, STRIP_CARD_W - 24f32, 130f32);

            let (x_off, text) = fit_text(STRIP_CARD_W - 24f32, name, 30);
            draw_text_ex(
                &text,
                x + 12f32 + x_off,
                STRIP_Y + 206f32,
                TextParams {
                    font_size: 30,
                    color: WHITE,
                    ..Default::default()
                },
            );

            let detail = match (entry.team, entry.side.as_deref()) {
                (Some(side), Some(choice)) => format!("{} · {choice}", state.team_label(side)),
                (Some(side), None) => state.team_label(side),
                (None, Some(choice)) => choice.to_string(),
                (None, None) => String::new(),
            };
            if !detail.is_empty() {
                let (x_off, text) = fit_text(STRIP_CARD_W - 24f32, &detail, 22);
                draw_text_ex(
                    &text,
                    x + 12f32 + x_off,
                    STRIP_Y + 234f32,
                    TextParams {
                        font_size: 22,
                        color: MUTED,
                        ..Default::default()
                    },
                );
            }

            if let Some(result) = entry.slot.and_then(|slot| state.result_for(slot)) {
                self.draw_score_badge(result, x + 12f32, STRIP_Y + STRIP_CARD_H - 40f32);
            }
        }
    }
}
