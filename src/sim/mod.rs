//! Pinball simulation module
//!
//! All gameplay logic lives here. This module is pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{CollisionResult, WallHits, ball_circle_collision, ball_segment_collision};
pub use state::{Ball, Bumper, BumperStyle, Flipper, GameEvent, GamePhase, GameState, Side};
pub use table::{BumperSpec, LaunchLane, Rect, Table};
pub use tick::{StepOutcome, TickInput, place_ball, score_hits, step_ball, tick};
