//! Game loop core
//!
//! Owns the session state and the tick scheduler. The platform layer calls
//! [`Game::advance`] whenever it wakes up, renders, and then sleeps until the
//! returned deadline.

use std::time::Instant;

use crate::consts::{MAX_CATCHUP_TICKS, TICK_DT, TICK_RATE};
use crate::input::InputSource;
use crate::pacing::FramePacer;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// What the platform loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Render, then wait until `next_deadline`
    Continue { next_deadline: Instant, ticks: u32 },
    /// Exit requested; stop the loop
    Exit,
}

pub struct Game {
    pub state: GameState,
    pacer: FramePacer,
}

impl Game {
    /// Create a game whose first tick is due at `start`
    pub fn new(state: GameState, start: Instant) -> Self {
        log::info!("New session with seed {}", state.seed);
        Self {
            state,
            pacer: FramePacer::new(TICK_RATE, MAX_CATCHUP_TICKS, start),
        }
    }

    /// Run every tick that is due at `now`, polling input once per tick
    pub fn advance<I: InputSource + ?Sized>(&mut self, now: Instant, input: &mut I) -> LoopControl {
        let due = self.pacer.due_ticks(now);
        for _ in 0..due {
            if !self.step(input) {
                return LoopControl::Exit;
            }
        }
        LoopControl::Continue {
            next_deadline: self.pacer.deadline(),
            ticks: due,
        }
    }

    /// Run exactly one tick. Returns false once the game is exiting.
    pub fn step<I: InputSource + ?Sized>(&mut self, input: &mut I) -> bool {
        let tick_input = input.poll_input();
        tick(&mut self.state, &tick_input, TICK_DT);
        self.log_events();
        self.state.phase != GamePhase::Exiting
    }

    pub fn deadline(&self) -> Instant {
        self.pacer.deadline()
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::BallLaunched { pos, vel } => {
                    log::info!(
                        "Ball launched at ({:.0}, {:.0}) with velocity ({:.0}, {:.0})",
                        pos.x,
                        pos.y,
                        vel.x,
                        vel.y
                    );
                }
                GameEvent::BumperHit { index, points } => {
                    log::debug!("Bumper {} hit: +{} (score {})", index, points, self.state.score);
                }
                GameEvent::FlipperHit { side } => {
                    log::trace!("{:?} flipper contact", side);
                }
                GameEvent::BallLost => {
                    log::info!("Ball lost, score {}", self.state.score);
                }
                GameEvent::ExitRequested => {
                    log::info!("Exit requested, final score {}", self.state.score);
                }
            }
        }
    }
}
