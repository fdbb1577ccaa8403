//! Pinball - a small single-player pinball table
//!
//! Core modules:
//! - `sim`: Table geometry, physics, collisions and game state
//! - `input`: Keyboard state to per-tick input snapshots
//! - `pacing`: Fixed tick-rate scheduling
//! - `game`: The loop core tying input, simulation and pacing together
//! - `renderer`: wgpu rendering pipeline
//! - `platform`: Native window key translation
//! - `settings`: Optional settings file

pub mod game;
pub mod input;
pub mod pacing;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, LoopControl};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Units are pixels and seconds. Table space has its origin at the top-left
/// corner with +y pointing down.
pub mod consts {
    /// Table dimensions
    pub const TABLE_WIDTH: f32 = 800.0;
    pub const TABLE_HEIGHT: f32 = 1000.0;
    /// Distance from the table edge to the inner face of the walls
    pub const WALL_INSET: f32 = 20.0;

    /// Loop rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed tick length
    pub const TICK_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Ball integration substeps per tick (keeps fast balls out of thin flippers)
    pub const PHYSICS_SUBSTEPS: u32 = 2;
    /// Maximum ticks to catch up in one wakeup to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 4;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Fraction of velocity lost per second
    pub const AIR_DRAG: f32 = 0.1;
    /// Velocity kept after bouncing off a wall
    pub const WALL_RESTITUTION: f32 = 0.92;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_MAX_SPEED: f32 = 1600.0;

    /// Flipper defaults
    pub const FLIPPER_LENGTH: f32 = 110.0;
    pub const FLIPPER_WIDTH: f32 = 18.0;
    /// Angles above horizontal, pointing toward the table center (radians)
    pub const FLIPPER_REST_ANGLE: f32 = -22.0 * std::f32::consts::PI / 180.0;
    pub const FLIPPER_ACTIVE_ANGLE: f32 = 25.0 * std::f32::consts::PI / 180.0;
    /// Swing speed (radians/s)
    pub const FLIPPER_SPEED: f32 = 400.0 * std::f32::consts::PI / 180.0;
    /// Impulse added along the surface normal by a swinging flipper
    pub const FLIPPER_IMPULSE: f32 = 650.0;
    /// Normal velocity kept after bouncing off a flipper
    pub const FLIPPER_RESTITUTION: f32 = 0.5;

    /// Bumper defaults
    pub const BUMPER_RADIUS: f32 = 28.0;
    pub const BUMPER_FORCE: f32 = 650.0;
    /// Share of `BUMPER_FORCE` added to the reflected velocity
    pub const BUMPER_BOOST: f32 = 0.4;
    /// Gap left between ball and bumper after pushing the ball out
    pub const BUMPER_SEPARATION: f32 = 2.0;
    /// Extra distance the ball must travel away before a new contact can score
    pub const BUMPER_RELEASE_MARGIN: f32 = 4.0;
    /// Seconds a bumper stays lit after a hit
    pub const BUMPER_FLASH_TIME: f32 = 0.2;

    /// Launch lane
    pub const LAUNCH_FORCE: f32 = 720.0;
    /// Random horizontal launch velocity range (±)
    pub const LAUNCH_JITTER: f32 = 120.0;
}

/// Unit vector for an angle measured from the +x axis (radians)
#[inline]
pub fn vec_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
