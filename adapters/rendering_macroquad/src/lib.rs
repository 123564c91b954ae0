#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake Arcade.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The adapter therefore depends on macroquad without its default `audio`
//! feature; audio cues are surfaced as log lines by the binary instead.
//!
//! Everything is drawn with rectangles, circles, lines and text.

mod hud;

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use snake_arcade_core::{Difficulty, Direction, PowerUpKind};
use snake_arcade_rendering::{
    AuraPresentation, BoardPresentation, CellPresentation, Color, FrameInput, PickupPresentation,
    Presentation, RenderingBackend, RocketPresentation, Scene,
};
use std::time::Duration;
use tracing::info;

use self::hud::draw_hud;

/// Number of HUD text lines reserved above the board.
const HUD_LINES: f32 = 3.0;
/// Gap between the window edge and the board, in cells.
const MARGIN_CELLS: f32 = 1.0;

/// Edge-triggered keyboard state observed during a single frame.
///
/// Kept separate from the polling so the mapping onto [`FrameInput`] can be
/// exercised without a window.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Arrow up or `W`.
    pub up: bool,
    /// Arrow down or `S`.
    pub down: bool,
    /// Arrow left or `A`.
    pub left: bool,
    /// Arrow right or `D`.
    pub right: bool,
    /// `Enter`.
    pub enter: bool,
    /// `Space` or `P`.
    pub pause: bool,
    /// `1`, `2` or `3`.
    pub difficulty: Option<Difficulty>,
    /// `T`.
    pub walls: bool,
    /// `Escape` or `Q`.
    pub quit: bool,
}

impl KeyState {
    fn poll() -> Self {
        let difficulty = if is_key_pressed(KeyCode::Key1) {
            Some(Difficulty::Easy)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(Difficulty::Normal)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(Difficulty::Hard)
        } else {
            None
        };

        Self {
            up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            enter: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            pause: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::P),
            difficulty,
            walls: is_key_pressed(KeyCode::T),
            quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }

    /// Translates the pressed keys into the adapter-neutral frame input.
    ///
    /// When several steering keys land on the same frame the vertical axis wins.
    #[must_use]
    pub fn frame_input(&self) -> FrameInput {
        let delta = if self.up {
            Some((0, -1))
        } else if self.down {
            Some((0, 1))
        } else if self.left {
            Some((-1, 0))
        } else if self.right {
            Some((1, 0))
        } else {
            None
        };

        FrameInput {
            direction: delta.and_then(|(dx, dy)| Direction::from_delta(dx, dy)),
            start_or_restart: self.enter,
            toggle_pause: self.pause,
            difficulty: self.difficulty,
            toggle_walls: self.walls,
        }
    }

    /// Reports whether the player asked to close the window.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        if seconds <= f32::EPSILON {
            return None;
        }
        Some(frames as f32 / seconds)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let (window_width, window_height) = preferred_window_size(&scene.board);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keys = KeyState::poll();
                if keys.quit_requested() {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, keys.frame_input(), &mut scene);

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_board(&scene.board, &metrics);
                if let Some(aura) = scene.magnet_aura {
                    draw_aura(aura, &metrics);
                }
                draw_cells(&scene.apples, &metrics, 0.35);
                draw_pickups(&scene.pickups, &metrics);
                draw_snake(&scene.snake, &metrics);
                if let Some(rocket) = scene.rocket {
                    draw_rocket(rocket, &metrics);
                }
                draw_hud(&scene.hud, &metrics);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        info!(fps = per_second, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn preferred_window_size(board: &BoardPresentation) -> (i32, i32) {
    let width = board.width() + 2.0 * MARGIN_CELLS * board.cell_length;
    let height = board.height() + (2.0 * MARGIN_CELLS + HUD_LINES) * board.cell_length;
    (width.round().max(1.0) as i32, height.round().max(1.0) as i32)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    offset_x: f32,
    offset_y: f32,
    hud_top: f32,
    board_width: f32,
    board_height: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let board = scene.board;
        let columns = board.columns as f32;
        let rows = board.rows as f32;
        let total_columns = columns + 2.0 * MARGIN_CELLS;
        let total_rows = rows + 2.0 * MARGIN_CELLS + HUD_LINES;

        if total_columns <= f32::EPSILON || total_rows <= f32::EPSILON {
            return Self {
                offset_x: 0.0,
                offset_y: 0.0,
                hud_top: 0.0,
                board_width: 0.0,
                board_height: 0.0,
                cell_step: 0.0,
            };
        }

        let cell_step = (screen_width / total_columns)
            .min(screen_height / total_rows)
            .max(0.0);
        let board_width = columns * cell_step;
        let board_height = rows * cell_step;
        let used_height = total_rows * cell_step;
        let offset_x = (screen_width - board_width) / 2.0;
        let hud_top = ((screen_height - used_height) / 2.0).max(0.0) + MARGIN_CELLS * cell_step;
        let offset_y = hud_top + HUD_LINES * cell_step;

        Self {
            offset_x,
            offset_y,
            hud_top,
            board_width,
            board_height,
            cell_step,
        }
    }

    /// Converts a cell-unit position into screen space.
    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.cell_step,
            self.offset_y + position.y * self.cell_step,
        )
    }

    fn cell_origin(&self, cell: &CellPresentation) -> Vec2 {
        self.to_screen(Vec2::new(cell.cell.x() as f32, cell.cell.y() as f32))
    }
}

fn draw_board(board: &BoardPresentation, metrics: &SceneMetrics) {
    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    let palette = snake_arcade_rendering::Palette::default();
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        metrics.board_width,
        metrics.board_height,
        to_macroquad_color(palette.board),
    );

    let line_color = to_macroquad_color(palette.grid_lines);
    for column in 1..board.columns {
        let x = metrics.offset_x + column as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            x,
            metrics.offset_y,
            x,
            metrics.offset_y + metrics.board_height,
            1.0,
            line_color,
        );
    }
    for row in 1..board.rows {
        let y = metrics.offset_y + row as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.offset_x,
            y,
            metrics.offset_x + metrics.board_width,
            y,
            1.0,
            line_color,
        );
    }

    if let Some(thickness) = border_thickness(board, metrics) {
        macroquad::shapes::draw_rectangle_lines(
            metrics.offset_x - thickness,
            metrics.offset_y - thickness,
            metrics.board_width + 2.0 * thickness,
            metrics.board_height + 2.0 * thickness,
            thickness * 2.0,
            to_macroquad_color(palette.solid_wall),
        );
    }
}

/// Solid walls get a visible frame; wrapping boards stay open.
fn border_thickness(board: &BoardPresentation, metrics: &SceneMetrics) -> Option<f32> {
    match board.walls {
        snake_arcade_core::WallMode::Solid => Some((metrics.cell_step * 0.15).max(1.0)),
        snake_arcade_core::WallMode::Wrap => None,
    }
}

fn draw_snake(snake: &[CellPresentation], metrics: &SceneMetrics) {
    let inset = metrics.cell_step * 0.06;
    for segment in snake {
        let origin = metrics.cell_origin(segment);
        macroquad::shapes::draw_rectangle(
            origin.x + inset,
            origin.y + inset,
            metrics.cell_step - 2.0 * inset,
            metrics.cell_step - 2.0 * inset,
            to_macroquad_color(segment.color),
        );
    }
}

fn draw_cells(cells: &[CellPresentation], metrics: &SceneMetrics, radius_cells: f32) {
    let radius = metrics.cell_step * radius_cells;
    for cell in cells {
        let centre = metrics.to_screen(cell.centre());
        macroquad::shapes::draw_circle(centre.x, centre.y, radius, to_macroquad_color(cell.color));
    }
}

fn draw_pickups(pickups: &[PickupPresentation], metrics: &SceneMetrics) {
    for pickup in pickups {
        let color = to_macroquad_color(pickup.body.color);
        let centre = metrics.to_screen(pickup.body.centre());
        let half = metrics.cell_step * 0.4;
        match pickup.kind {
            PowerUpKind::Bomb => {
                macroquad::shapes::draw_circle(centre.x, centre.y, half, color);
                macroquad::shapes::draw_circle(
                    centre.x + half * 0.5,
                    centre.y - half * 0.7,
                    half * 0.25,
                    to_macroquad_color(pickup.body.color.lighten(0.7)),
                );
            }
            PowerUpKind::Magnet => {
                macroquad::shapes::draw_rectangle(
                    centre.x - half,
                    centre.y - half,
                    2.0 * half,
                    2.0 * half,
                    color,
                );
            }
            PowerUpKind::Rocket => {
                let [a, b, c] = triangle_points(centre, -std::f32::consts::FRAC_PI_2, half);
                macroquad::shapes::draw_triangle(a, b, c, color);
            }
        }
    }
}

fn draw_aura(aura: AuraPresentation, metrics: &SceneMetrics) {
    let centre = metrics.to_screen(aura.centre);
    macroquad::shapes::draw_circle(
        centre.x,
        centre.y,
        aura.radius * metrics.cell_step,
        to_macroquad_color(aura.color),
    );
}

fn draw_rocket(rocket: RocketPresentation, metrics: &SceneMetrics) {
    let tail = metrics.to_screen(rocket.position);
    let nose = metrics.to_screen(rocket.nose(0.6));
    let color = to_macroquad_color(rocket.color);
    macroquad::shapes::draw_line(
        tail.x,
        tail.y,
        nose.x,
        nose.y,
        (metrics.cell_step * 0.25).max(1.0),
        color,
    );
    macroquad::shapes::draw_circle(tail.x, tail.y, metrics.cell_step * 0.3, color);
}

/// Corners of an isosceles triangle centred on `centre` pointing along `heading`.
fn triangle_points(centre: Vec2, heading: f32, radius: f32) -> [MacroquadVec2; 3] {
    let third = std::f32::consts::TAU / 3.0;
    [0.0, third, 2.0 * third].map(|offset| {
        let corner = centre + Vec2::from_angle(heading + offset) * radius;
        MacroquadVec2::new(corner.x, corner.y)
    })
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
