//! Game state and core simulation types
//!
//! All mutable state for a session lives in [`GameState`], which the loop owns
//! and passes explicitly into [`super::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::table::{BumperSpec, Table};
use crate::consts::*;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No ball on the table; launch is available
    NoBall,
    /// A ball is moving on the table
    BallInPlay,
    /// Quit requested; terminal
    Exiting,
}

/// Things that happened during a tick (for logging and visual feedback)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BallLaunched { pos: Vec2, vel: Vec2 },
    BumperHit { index: usize, points: u64 },
    FlipperHit { side: Side },
    BallLost,
    ExitRequested,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }
}

/// Which side of the table a flipper guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A player-controlled flipper
#[derive(Debug, Clone, PartialEq)]
pub struct Flipper {
    pub pivot: Vec2,
    pub side: Side,
    /// Angle above horizontal, measured toward the table center (radians)
    pub angle: f32,
    /// Held by the player
    pub activated: bool,
    /// Signed swing rate from the last update (positive = raising)
    pub angular_vel: f32,
    pub length: f32,
    pub width: f32,
}

impl Flipper {
    pub fn new(pivot: Vec2, side: Side) -> Self {
        Self {
            pivot,
            side,
            angle: FLIPPER_REST_ANGLE,
            activated: false,
            angular_vel: 0.0,
            length: FLIPPER_LENGTH,
            width: FLIPPER_WIDTH,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.activated = active;
    }

    pub fn target_angle(&self) -> f32 {
        if self.activated {
            FLIPPER_ACTIVE_ANGLE
        } else {
            FLIPPER_REST_ANGLE
        }
    }

    /// Swing toward the target angle at the fixed flipper speed
    pub fn update(&mut self, dt: f32) {
        let target = self.target_angle();
        let delta = target - self.angle;
        let max_step = FLIPPER_SPEED * dt;
        if delta.abs() <= max_step {
            self.angle = target;
        } else {
            self.angle += max_step.copysign(delta);
        }
        let step = delta.clamp(-max_step, max_step);
        self.angular_vel = if dt > 0.0 { step / dt } else { 0.0 };
    }

    /// Unit vector from pivot toward the tip, in table space (+y down)
    pub fn direction(&self) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        match self.side {
            Side::Left => Vec2::new(cos, -sin),
            Side::Right => Vec2::new(-cos, -sin),
        }
    }

    pub fn tip(&self) -> Vec2 {
        self.pivot + self.direction() * self.length
    }

    /// True while the flipper is moving up toward its activated angle
    pub fn is_swinging_up(&self) -> bool {
        self.angular_vel > 0.0
    }
}

/// Bumper color variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumperStyle {
    Blue,
    Red,
}

/// A bumper on the table
#[derive(Debug, Clone, PartialEq)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
    pub value: u64,
    pub style: BumperStyle,
    /// Ball is touching (or has not yet moved clear of) this bumper
    pub in_contact: bool,
    /// Remaining highlight time after a hit (seconds)
    pub flash: f32,
}

impl Bumper {
    pub fn from_spec(spec: &BumperSpec, style: BumperStyle) -> Self {
        Self {
            pos: spec.pos,
            radius: spec.radius,
            value: spec.value,
            style,
            in_contact: false,
            flash: 0.0,
        }
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub table: Table,
    pub phase: GamePhase,
    /// At most one ball; present exactly while `phase == BallInPlay`
    pub ball: Option<Ball>,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub bumpers: Vec<Bumper>,
    /// Session score, never decreases
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session on the standard table
    pub fn new(seed: u64) -> Self {
        Self::with_table(Table::standard(), seed)
    }

    pub fn with_table(table: Table, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bumpers = table
            .bumpers
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                // The center bumper is always blue
                let style = if spec.value > 150 || rng.random_bool(0.5) {
                    BumperStyle::Blue
                } else {
                    BumperStyle::Red
                };
                log::trace!("bumper {} at {:?}: {:?}", i, spec.pos, style);
                Bumper::from_spec(spec, style)
            })
            .collect();

        Self {
            seed,
            rng,
            left_flipper: Flipper::new(table.left_pivot, Side::Left),
            right_flipper: Flipper::new(table.right_pivot, Side::Right),
            table,
            phase: GamePhase::NoBall,
            ball: None,
            bumpers,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Place a new ball in the launch lane with an upward, slightly angled
    /// velocity. Does nothing unless the table is empty.
    pub fn launch_ball(&mut self) -> bool {
        if self.phase != GamePhase::NoBall {
            return false;
        }
        let jitter = self.rng.random_range(-LAUNCH_JITTER..=LAUNCH_JITTER);
        let ball = Ball::new(
            self.table.launch_lane.spawn,
            Vec2::new(jitter, -LAUNCH_FORCE),
        );
        self.events.push(GameEvent::BallLaunched {
            pos: ball.pos,
            vel: ball.vel,
        });
        self.ball = Some(ball);
        self.phase = GamePhase::BallInPlay;
        true
    }

    /// Remove the ball from play
    pub fn lose_ball(&mut self) {
        self.ball = None;
        for bumper in &mut self.bumpers {
            bumper.in_contact = false;
        }
        if self.phase == GamePhase::BallInPlay {
            self.phase = GamePhase::NoBall;
        }
        self.events.push(GameEvent::BallLost);
    }

    pub fn flippers(&self) -> [&Flipper; 2] {
        [&self.left_flipper, &self.right_flipper]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::NoBall);
        assert!(state.ball.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.bumpers.len(), state.table.bumpers.len());
    }

    #[test]
    fn test_bumper_styles_follow_seed() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        let styles_a: Vec<_> = a.bumpers.iter().map(|b| b.style).collect();
        let styles_b: Vec<_> = b.bumpers.iter().map(|b| b.style).collect();
        assert_eq!(styles_a, styles_b);
    }

    #[test]
    fn test_launch_only_from_no_ball() {
        let mut state = GameState::new(1);
        assert!(state.launch_ball());
        let first = state.ball;
        assert!(!state.launch_ball());
        assert_eq!(state.ball, first);
    }

    #[test]
    fn test_launch_velocity() {
        let mut state = GameState::new(3);
        state.launch_ball();
        let ball = state.ball.as_ref().unwrap();
        assert_eq!(ball.pos, state.table.launch_lane.spawn);
        assert_eq!(ball.vel.y, -LAUNCH_FORCE);
        assert!(ball.vel.x.abs() <= LAUNCH_JITTER);
    }

    #[test]
    fn test_flipper_swings_to_target() {
        let mut flipper = Flipper::new(Vec2::new(270.0, 820.0), Side::Left);
        flipper.set_active(true);
        flipper.update(TICK_DT);
        assert!(flipper.is_swinging_up());
        assert!(flipper.angle > FLIPPER_REST_ANGLE);

        for _ in 0..60 {
            flipper.update(TICK_DT);
        }
        assert_eq!(flipper.angle, FLIPPER_ACTIVE_ANGLE);
        assert_eq!(flipper.angular_vel, 0.0);

        flipper.set_active(false);
        flipper.update(TICK_DT);
        assert!(flipper.angular_vel < 0.0);
    }

    #[test]
    fn test_flipper_tips_point_inward() {
        let left = Flipper::new(Vec2::new(270.0, 820.0), Side::Left);
        let right = Flipper::new(Vec2::new(530.0, 820.0), Side::Right);
        // At rest both droop toward the center gap
        assert!(left.tip().x > left.pivot.x && left.tip().y > left.pivot.y);
        assert!(right.tip().x < right.pivot.x && right.tip().y > right.pivot.y);
        assert!(((left.tip() - left.pivot).length() - FLIPPER_LENGTH).abs() < 1e-3);
    }
}
