//! Pinball entry point
//!
//! Opens the window, sets up the GPU and runs the game loop on winit's event
//! loop: each wake-up runs the due ticks, draws a frame and sleeps until the
//! next tick deadline.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use pinball::consts::{TABLE_HEIGHT, TABLE_WIDTH};
use pinball::input::KeyboardInput;
use pinball::platform::map_key;
use pinball::renderer::{RenderState, scene};
use pinball::sim::GameState;
use pinball::{Game, LoopControl, Settings};

const WINDOW_TITLE: &str = "Pinball Arcade";
/// How often the FPS log line is written
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Frame rate over the last 60 presented frames
struct FpsCounter {
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    last_log: Instant,
}

impl FpsCounter {
    fn new(now: Instant) -> Self {
        Self {
            frame_times: [None; 60],
            frame_index: 0,
            last_log: now,
        }
    }

    fn frame(&mut self, now: Instant) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        if now.duration_since(self.last_log) < FPS_LOG_INTERVAL {
            return;
        }
        self.last_log = now;

        // Oldest entry is the one about to be overwritten
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                log::info!("{:.1} fps", (self.frame_times.len() - 1) as f64 / elapsed);
            }
        }
    }
}

/// Everything that exists once the window is up
struct Session {
    window: Arc<Window>,
    render: RenderState,
    game: Game,
}

struct App {
    settings: Settings,
    seed: u64,
    session: Option<Session>,
    input: KeyboardInput,
    fps: Option<FpsCounter>,
    /// Fatal error that stopped the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            session: None,
            input: KeyboardInput::new(),
            fps: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let scale = self.settings.window_scale;
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(WINDOW_TITLE)
                        .with_inner_size(LogicalSize::new(
                            TABLE_WIDTH * scale,
                            TABLE_HEIGHT * scale,
                        ))
                        .with_resizable(false),
                )
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(pinball::renderer::RenderError::from)
            .context("failed to set up rendering")?;
        let size = window.inner_size();
        let render = pollster::block_on(RenderState::new(
            &instance,
            surface,
            size.width,
            size.height,
            Vec2::new(TABLE_WIDTH, TABLE_HEIGHT),
        ))
        .context("failed to set up rendering")?;

        let now = Instant::now();
        let game = Game::new(GameState::new(self.seed), now);
        if self.settings.log_fps {
            self.fps = Some(FpsCounter::new(now));
        }

        log::info!("Controls: Left/A and Right/D flippers, Space launches, Esc/Q quits");
        Ok(Session { window, render, game })
    }

    /// Run due ticks, draw, and schedule the next wake-up
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let now = Instant::now();
        let next_deadline = match session.game.advance(now, &mut self.input) {
            LoopControl::Exit => {
                event_loop.exit();
                return;
            }
            LoopControl::Continue { next_deadline, ticks } => {
                if ticks > 0 {
                    session.window.request_redraw();
                }
                next_deadline
            }
        };
        event_loop.set_control_flow(ControlFlow::WaitUntil(next_deadline));
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let vertices = scene::build(&session.game.state, &self.settings);
        match session.render.render(&vertices) {
            Ok(()) => {
                if let Some(fps) = self.fps.as_mut() {
                    fps.frame(Instant::now());
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                session.render.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.error = Some(anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.frame(event_loop);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(session) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(session.game.deadline()));
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                // Handled like the quit key on the next tick
                self.input.request_exit();
            }

            WindowEvent::Focused(false) => {
                self.input.release_all();
            }

            WindowEvent::Resized(size) => {
                if let Some(session) = self.session.as_mut() {
                    session.render.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let Some(key) = map_key(&logical_key) else {
                    return;
                };
                match state {
                    ElementState::Pressed if !repeat => self.input.key_down(key),
                    ElementState::Pressed => {}
                    ElementState::Released => self.input.key_up(key),
                }
            }

            WindowEvent::RedrawRequested => {
                self.draw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Events can wake the loop before the deadline; keep the schedule
        if let Some(session) = &self.session {
            event_loop.set_control_flow(ControlFlow::WaitUntil(session.game.deadline()));
        }
    }
}

/// Session seed from the wall clock
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run() -> Result<()> {
    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(settings, seed);
    event_loop.run_app(&mut app).context("event loop error")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pinball starting...");

    match run() {
        Ok(()) => {
            log::info!("Goodbye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
