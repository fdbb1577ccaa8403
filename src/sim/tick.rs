//! Fixed timestep simulation tick
//!
//! One call to [`tick`] is one iteration of the game: flipper update, launch,
//! physics step, scoring.

use glam::Vec2;

use super::collision::{WallHits, ball_circle_collision, ball_segment_collision, resolve_walls};
use super::state::{Ball, Bumper, Flipper, GameEvent, GamePhase, GameState, Side};
use super::table::Table;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left flipper held
    pub left_flipper: bool,
    /// Right flipper held
    pub right_flipper: bool,
    /// Launch a ball (one-shot, only honored with no ball in play)
    pub launch: bool,
    /// Quit (one-shot, terminal)
    pub exit: bool,
}

/// What happened to the ball during one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutcome {
    /// Bumpers whose contact began during this step (indices into `bumpers`)
    pub bumper_hits: Vec<usize>,
    /// Flippers the ball touched
    pub flipper_hits: Vec<Side>,
    pub walls: WallHits,
    /// Ball passed the drain line
    pub lost: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::Exiting {
        return;
    }

    if input.exit {
        // The ball leaves with the session; no BallLost event
        state.ball = None;
        state.phase = GamePhase::Exiting;
        state.events.push(GameEvent::ExitRequested);
        return;
    }

    state.time_ticks += 1;

    // Flippers follow the held keys whether or not a ball is in play
    state.left_flipper.set_active(input.left_flipper);
    state.right_flipper.set_active(input.right_flipper);
    state.left_flipper.update(dt);
    state.right_flipper.update(dt);

    for bumper in &mut state.bumpers {
        bumper.flash = (bumper.flash - dt).max(0.0);
    }

    match state.phase {
        GamePhase::NoBall => {
            // The new ball starts moving on the next tick
            if input.launch {
                state.launch_ball();
            }
        }
        GamePhase::BallInPlay => {
            if input.launch {
                log::trace!("launch ignored: ball already in play");
            }

            let substeps = PHYSICS_SUBSTEPS.max(1);
            let sub_dt = dt / substeps as f32;
            for _ in 0..substeps {
                let GameState {
                    ball,
                    table,
                    left_flipper,
                    right_flipper,
                    bumpers,
                    ..
                } = state;
                let Some(ball) = ball.as_mut() else {
                    break;
                };

                let flippers = [&*left_flipper, &*right_flipper];
                let outcome = step_ball(ball, table, flippers, bumpers, sub_dt);
                score_hits(state, &outcome);

                if outcome.lost {
                    state.lose_ball();
                    break;
                }
            }
        }
        GamePhase::Exiting => {}
    }
}

/// Advance one ball by `dt`: integrate, then resolve flippers, bumpers and
/// walls, then check the drain
///
/// Bumper contact flags are updated here so a hit is only reported on the
/// first step of each contact episode.
pub fn step_ball(
    ball: &mut Ball,
    table: &Table,
    flippers: [&Flipper; 2],
    bumpers: &mut [Bumper],
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    // Integrate: gravity, drag, speed cap
    ball.vel.y += GRAVITY * dt;
    ball.vel *= (1.0 - AIR_DRAG * dt).max(0.0);
    ball.vel = ball.vel.clamp_length_max(BALL_MAX_SPEED);
    ball.pos += ball.vel * dt;

    for flipper in flippers {
        if collide_flipper(ball, flipper) && !outcome.flipper_hits.contains(&flipper.side) {
            outcome.flipper_hits.push(flipper.side);
        }
    }

    for (index, bumper) in bumpers.iter_mut().enumerate() {
        if collide_bumper(ball, bumper) {
            outcome.bumper_hits.push(index);
        }
    }

    // Walls last so the ball always ends the step inside the frame
    outcome.walls = resolve_walls(
        &mut ball.pos,
        &mut ball.vel,
        ball.radius,
        table,
        WALL_RESTITUTION,
    );

    outcome.lost = ball.pos.y > table.drain_line();
    outcome
}

/// Bounce the ball off a flipper. Returns true on contact.
///
/// The inbound normal velocity is reflected with flipper restitution. A
/// flipper that is swinging up also adds an impulse along the surface normal
/// proportional to its swing rate.
fn collide_flipper(ball: &mut Ball, flipper: &Flipper) -> bool {
    let hit = ball_segment_collision(
        ball.pos,
        ball.radius,
        flipper.pivot,
        flipper.tip(),
        flipper.width / 2.0,
    );
    if !hit.hit {
        return false;
    }

    let inbound = ball.vel.dot(hit.normal);
    if inbound < 0.0 {
        ball.vel -= (1.0 + FLIPPER_RESTITUTION) * inbound * hit.normal;
    }

    let swing = (flipper.angular_vel / FLIPPER_SPEED).clamp(0.0, 1.0);
    ball.vel += hit.normal * FLIPPER_IMPULSE * swing;
    ball.pos += hit.normal * hit.penetration;
    true
}

/// Bounce the ball off a bumper. Returns true when a new contact begins.
fn collide_bumper(ball: &mut Ball, bumper: &mut Bumper) -> bool {
    let hit = ball_circle_collision(ball.pos, ball.radius, bumper.pos, bumper.radius);

    if !hit.hit {
        let clear = bumper.radius + ball.radius + BUMPER_RELEASE_MARGIN;
        if bumper.in_contact && ball.pos.distance(bumper.pos) > clear {
            bumper.in_contact = false;
        }
        return false;
    }

    if ball.vel.dot(hit.normal) < 0.0 {
        ball.vel = super::collision::reflect_velocity(ball.vel, hit.normal);
    }
    ball.vel += hit.normal * BUMPER_FORCE * BUMPER_BOOST;
    ball.pos = bumper.pos + hit.normal * (bumper.radius + ball.radius + BUMPER_SEPARATION);

    if bumper.in_contact {
        return false;
    }
    bumper.in_contact = true;
    bumper.flash = BUMPER_FLASH_TIME;
    true
}

/// Award points for the bumper contacts in a step outcome
pub fn score_hits(state: &mut GameState, outcome: &StepOutcome) {
    for &index in &outcome.bumper_hits {
        let Some(bumper) = state.bumpers.get(index) else {
            continue;
        };
        let points = bumper.value;
        state.score = state.score.saturating_add(points);
        state.events.push(GameEvent::BumperHit { index, points });
    }
    for &side in &outcome.flipper_hits {
        state.events.push(GameEvent::FlipperHit { side });
    }
}

/// Place the ball at a position with a velocity (tests and demos)
pub fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
    state.ball = Some(Ball::new(pos, vel));
    state.phase = GamePhase::BallInPlay;
}
