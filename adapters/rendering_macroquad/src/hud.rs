//! Text overlay for the Macroquad rendering backend.
//!
//! All `macroquad::text` calls live here so the board drawing code stays free
//! of font handling.

use macroquad::text::{draw_text, measure_text};
use snake_arcade_rendering::HudPresentation;

use crate::{to_macroquad_color, SceneMetrics};

/// Font size of the HUD lines relative to the cell step.
const FONT_SCALE: f32 = 0.9;
/// Smallest font size that stays readable on tiny windows.
const MIN_FONT_SIZE: f32 = 14.0;

/// Draws the status, hint and pending-settings lines above the board.
pub(crate) fn draw_hud(hud: &HudPresentation, metrics: &SceneMetrics) {
    let font_size = hud_font_size(metrics);
    let color = to_macroquad_color(hud.color);
    let mut baseline = metrics.hud_top + font_size;

    for (index, line) in hud.lines().iter().enumerate() {
        let x = if index == 0 {
            metrics.offset_x
        } else {
            let width = measure_text(line, None, font_size as u16, 1.0).width;
            metrics.offset_x + (metrics.board_width - width).max(0.0) / 2.0
        };
        draw_text(line, x, baseline, font_size, color);
        baseline += font_size;
    }
}

pub(crate) fn hud_font_size(metrics: &SceneMetrics) -> f32 {
    (metrics.cell_step * FONT_SCALE).max(MIN_FONT_SIZE)
}
