//! Scene building: game state to a flat triangle list
//!
//! Draw order is back to front; later vertices paint over earlier ones.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BUMPER_FLASH_TIME, TICK_RATE};
use crate::settings::Settings;
use crate::sim::{Ball, Bumper, BumperStyle, Flipper, GamePhase, GameState, Table};

/// Offset of drop shadows from the object casting them
const SHADOW_OFFSET: Vec2 = Vec2::new(4.0, 6.0);
const CIRCLE_SEGMENTS: u32 = 32;
const SCORE_ORIGIN: Vec2 = Vec2::new(24.0, 24.0);
const SCORE_DIGIT_HEIGHT: f32 = 32.0;
/// Launch hint on/off half-period, in ticks
const BLINK_TICKS: u64 = TICK_RATE as u64 / 2;

/// Build every vertex for one frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    table_frame(&mut vertices, &state.table);

    for bumper in &state.bumpers {
        bumper_shape(&mut vertices, bumper, settings);
    }

    for flipper in state.flippers() {
        flipper_shape(&mut vertices, flipper, settings.shadows);
    }

    if state.phase == GamePhase::NoBall && launch_hint_visible(state.time_ticks) {
        let spawn = state.table.launch_lane.spawn;
        vertices.extend(shapes::circle(spawn, 8.0, colors::LAUNCH_HINT, 16));
    }

    if let Some(ball) = &state.ball {
        ball_shape(&mut vertices, ball, settings.shadows);
    }

    vertices.extend(shapes::number(SCORE_ORIGIN, state.score, SCORE_DIGIT_HEIGHT, colors::SCORE));

    vertices
}

/// Blink phase of the launch hint at a given tick
pub fn launch_hint_visible(time_ticks: u64) -> bool {
    (time_ticks / BLINK_TICKS) % 2 == 0
}

fn table_frame(out: &mut Vec<Vertex>, table: &Table) {
    let (w, h) = (table.width, table.height);

    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h), colors::BACKGROUND));

    // Side and top walls; the bottom is the open drain
    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(table.left_wall, h), colors::WALL));
    out.extend(shapes::rect(Vec2::new(table.right_wall, 0.0), Vec2::new(w, h), colors::WALL));
    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, table.top_wall), colors::WALL));

    let lane = &table.launch_lane;
    out.extend(shapes::rect(lane.rect.min(), lane.rect.max(), colors::LANE));
    out.extend(shapes::ring(lane.spawn, 18.0, 24.0, colors::PLUNGER_RING, CIRCLE_SEGMENTS));
}

fn bumper_shape(out: &mut Vec<Vertex>, bumper: &Bumper, settings: &Settings) {
    if settings.shadows {
        out.extend(shapes::circle(
            bumper.pos + SHADOW_OFFSET,
            bumper.radius,
            colors::SHADOW,
            CIRCLE_SEGMENTS,
        ));
    }

    let base = match bumper.style {
        BumperStyle::Blue => colors::BUMPER_BLUE,
        BumperStyle::Red => colors::BUMPER_RED,
    };
    let body = if settings.bumper_flash && bumper.flash > 0.0 {
        colors::mix(base, colors::BUMPER_LIT, bumper.flash / BUMPER_FLASH_TIME)
    } else {
        base
    };

    out.extend(shapes::circle(bumper.pos, bumper.radius, body, CIRCLE_SEGMENTS));
    out.extend(shapes::circle(bumper.pos, bumper.radius * 0.45, colors::BUMPER_CAP, 20));
}

fn flipper_shape(out: &mut Vec<Vertex>, flipper: &Flipper, shadows: bool) {
    let half_width = flipper.width * 0.5;
    let tip = flipper.tip();

    if shadows {
        out.extend(shapes::capsule(
            flipper.pivot + SHADOW_OFFSET,
            tip + SHADOW_OFFSET,
            half_width,
            colors::SHADOW,
            12,
        ));
    }
    out.extend(shapes::capsule(flipper.pivot, tip, half_width, colors::FLIPPER, 12));
    out.extend(shapes::circle(flipper.pivot, half_width * 0.5, colors::BUMPER_CAP, 12));
}

fn ball_shape(out: &mut Vec<Vertex>, ball: &Ball, shadows: bool) {
    if shadows {
        out.extend(shapes::circle(
            ball.pos + SHADOW_OFFSET * 0.5,
            ball.radius,
            colors::SHADOW,
            CIRCLE_SEGMENTS,
        ));
    }
    out.extend(shapes::circle(ball.pos, ball.radius, colors::BALL, CIRCLE_SEGMENTS));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_ball_drawn_only_in_play() {
        let settings = Settings::default();
        let mut state = GameState::new(3);
        assert!(!has_color(&build(&state, &settings), colors::BALL));

        state.launch_ball();
        assert!(has_color(&build(&state, &settings), colors::BALL));
    }

    #[test]
    fn test_launch_hint_blinks() {
        assert!(launch_hint_visible(0));
        assert!(!launch_hint_visible(BLINK_TICKS));
        assert!(launch_hint_visible(BLINK_TICKS * 2));
    }

    #[test]
    fn test_shadows_toggle() {
        let state = GameState::new(3);
        let on = build(&state, &Settings::default());
        let off = build(
            &state,
            &Settings {
                shadows: false,
                ..Settings::default()
            },
        );
        assert!(has_color(&on, colors::SHADOW));
        assert!(!has_color(&off, colors::SHADOW));
        assert!(off.len() < on.len());
    }

    #[test]
    fn test_flashing_bumper_is_brighter() {
        let settings = Settings::default();
        let mut state = GameState::new(3);
        let base = build(&state, &settings);
        assert!(!has_color(&base, colors::BUMPER_LIT));

        state.bumpers[0].flash = BUMPER_FLASH_TIME;
        let lit = build(&state, &settings);
        assert!(has_color(&lit, colors::BUMPER_LIT));

        let no_flash = Settings {
            bumper_flash: false,
            ..Settings::default()
        };
        assert!(!has_color(&build(&state, &no_flash), colors::BUMPER_LIT));
    }

    #[test]
    fn test_score_grows_with_digits() {
        let settings = Settings::default();
        let mut state = GameState::new(3);
        state.score = 1;
        let short = build(&state, &settings).len();
        state.score = 11_111;
        let long = build(&state, &settings).len();
        assert_eq!(long - short, 4 * 2 * 6);
    }
}
