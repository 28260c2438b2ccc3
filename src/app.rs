use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::entities::GameEvent;
use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};

/// The main application which owns the game and the terminal-facing parts.
pub struct App {
    running: bool,
    game: Game,
    /// Frames info
    frame_time: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, input_manager: InputManager, audio_manager: AudioManager) -> Self {
        Self {
            running: true,
            frame_time: config.frame_time,
            game: Game::new(config),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        info!(audio = self.audio_manager.is_enabled(), "game loop started");

        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if dt.as_micros() > 0 {
                self.fps = (1_000_000 / dt.as_micros()) as u32;
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game.state,
                    player: &self.game.player,
                    projectiles: self.game.pool.as_slice(),
                    waves: &self.game.waves,
                    score: self.game.score,
                    wave_count: self.game.wave_count,
                    world_width: self.game.config().world_width,
                    world_height: self.game.config().world_height,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(self.game.state)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            let held = self.input_manager.held_keys(Instant::now());
            self.game.update(held, dt);

            for event in self.game.drain_events() {
                self.handle_event(&event);
            }

            // Sleep off the rest of the frame to hold the target rate
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }
        }

        info!(
            score = self.game.score,
            wave = self.game.wave_count,
            frames = self.game.frame_count(),
            "game loop finished"
        );
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause | InputAction::Resume => {
                    self.game.toggle_pause();
                }
                InputAction::Restart => {
                    self.game.restart();
                }
                InputAction::Fire => {
                    if !self.game.fire() {
                        debug!("no free projectile");
                    }
                }
            }
        }
    }

    fn handle_event(&self, event: &GameEvent) {
        match event {
            GameEvent::PlayerHit { lives_left } => debug!(lives_left, "player hit"),
            GameEvent::EnemyDestroyed { points } => debug!(points, "enemy destroyed"),
            _ => {}
        }
        self.audio_manager.play_event(event);
    }
}
