use glam::Vec2;
use pinball::consts::TICK_DT;
use pinball::input::{InputSource, Key, KeyboardInput};
use pinball::sim::{GameEvent, GamePhase, GameState, Table, TickInput, place_ball, tick};

/// Ten simulated minutes; every scenario here finishes well before that
const MAX_TICKS: u32 = 60 * 600;

fn points_from_events(events: &[GameEvent]) -> u64 {
    events
        .iter()
        .map(|e| match e {
            GameEvent::BumperHit { points, .. } => *points,
            _ => 0,
        })
        .sum()
}

#[test]
fn launch_then_drain_without_bumpers() {
    let mut state = GameState::with_table(Table::empty(), 11);
    let mut keys = KeyboardInput::new();
    assert_eq!(state.phase, GamePhase::NoBall);
    assert_eq!(state.score, 0);

    keys.key_down(Key::Space);
    tick(&mut state, &keys.poll_input(), TICK_DT);
    keys.key_up(Key::Space);

    assert_eq!(state.phase, GamePhase::BallInPlay);
    let ball = state.ball.expect("ball launched");
    assert_eq!(ball.pos, state.table.launch_lane.spawn);
    assert!(ball.vel.y < 0.0, "launch moves the ball up");

    let mut drained = false;
    for _ in 0..MAX_TICKS {
        tick(&mut state, &keys.poll_input(), TICK_DT);
        if state.phase == GamePhase::NoBall {
            assert!(state.events.contains(&GameEvent::BallLost));
            drained = true;
            break;
        }
    }

    assert!(drained, "ball never drained");
    assert!(state.ball.is_none());
    assert_eq!(state.score, 0);
}

#[test]
fn score_matches_bumper_events_on_standard_table() {
    for seed in [1, 2, 3, 42] {
        let mut state = GameState::new(seed);
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &launch, TICK_DT);

        let mut total = 0;
        for _ in 0..MAX_TICKS {
            let before = state.score;
            tick(&mut state, &TickInput::default(), TICK_DT);
            let gained = points_from_events(&state.events);
            assert_eq!(state.score, before + gained);
            total += gained;
            if state.phase == GamePhase::NoBall {
                break;
            }
        }
        assert_eq!(state.score, total, "seed {seed}");
    }
}

#[test]
fn falling_ball_scores_center_bumper_once() {
    let mut state = GameState::new(5);
    let center = state
        .bumpers
        .iter()
        .position(|b| b.value == 250)
        .expect("center bumper");
    let above = state.bumpers[center].pos - Vec2::new(0.0, 80.0);
    place_ball(&mut state, above, Vec2::new(0.0, 300.0));

    let mut first_hit = None;
    for _ in 0..120 {
        tick(&mut state, &TickInput::default(), TICK_DT);
        if let Some(hit) = state.events.iter().find_map(|e| match e {
            GameEvent::BumperHit { index, points } => Some((*index, *points)),
            _ => None,
        }) {
            first_hit = Some(hit);
            break;
        }
    }

    assert_eq!(first_hit, Some((center, 250)));
    assert_eq!(state.score, 250);
    let ball = state.ball.expect("ball still in play");
    assert!(ball.vel.y < 0.0, "bumper sends the ball back up");
}

#[test]
fn launch_while_in_play_keeps_one_ball() {
    let mut state = GameState::new(9);
    let launch = TickInput {
        launch: true,
        ..Default::default()
    };
    tick(&mut state, &launch, TICK_DT);
    tick(&mut state, &TickInput::default(), TICK_DT);
    let pos = state.ball.expect("ball in play").pos;

    tick(&mut state, &launch, TICK_DT);
    assert_eq!(state.phase, GamePhase::BallInPlay);
    assert!(!state.events.iter().any(|e| matches!(e, GameEvent::BallLaunched { .. })));
    assert_ne!(state.ball.expect("ball in play").pos, state.table.launch_lane.spawn);
    assert_ne!(state.ball.expect("ball in play").pos, pos, "the ball kept moving");
}

#[test]
fn exit_is_terminal_from_every_phase() {
    let exit = TickInput {
        exit: true,
        ..Default::default()
    };
    let everything = TickInput {
        left_flipper: true,
        right_flipper: true,
        launch: true,
        exit: false,
    };

    let no_ball = GameState::new(1);
    let mut in_play = GameState::new(1);
    place_ball(&mut in_play, Vec2::new(400.0, 200.0), Vec2::ZERO);

    for mut state in [no_ball, in_play] {
        tick(&mut state, &exit, TICK_DT);
        assert_eq!(state.phase, GamePhase::Exiting);
        assert!(state.ball.is_none(), "exiting clears the ball");
        let ticks = state.time_ticks;
        let score = state.score;

        for _ in 0..30 {
            tick(&mut state, &everything, TICK_DT);
            assert_eq!(state.phase, GamePhase::Exiting);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, score);
        assert!(state.ball.is_none());
    }
}
