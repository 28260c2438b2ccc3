use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{FrameContext, GameEvent, GameState, HeldKeys, Player, ProjectilePool, Wave};

/// The whole simulation: player, projectile pool, waves and scoring.
/// Advanced one frame at a time by [`Game::update`].
pub struct Game {
    config: GameConfig,
    pub state: GameState,
    pub player: Player,
    pub pool: ProjectilePool,
    pub waves: Vec<Wave>,
    pub score: u32,
    pub wave_count: u32,
    /// Grid size the next wave grows from
    pub columns: u32,
    pub rows: u32,
    sprite_timer: Duration,
    sprite_update: bool,
    frame_count: u64,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl Game {
    /// Starts a game with the first wave already on its way in.
    /// `config` is assumed to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut game = Self {
            state: GameState::Playing,
            player: Player::new(&config),
            pool: ProjectilePool::from_config(&config),
            waves: Vec::new(),
            score: 0,
            wave_count: 1,
            columns: config.start_columns,
            rows: config.start_rows,
            sprite_timer: Duration::ZERO,
            sprite_update: false,
            frame_count: 0,
            events: Vec::new(),
            rng,
            config,
        };
        game.spawn_wave();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the last update advanced death animations
    pub fn is_sprite_frame(&self) -> bool {
        self.sprite_update
    }

    /// Enemies still on the field across all waves
    pub fn enemy_count(&self) -> usize {
        self.waves.iter().map(|w| w.enemies.len()).sum()
    }

    /// Takes the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fires from the player's ship if the pool has a free projectile
    pub fn fire(&mut self) -> bool {
        if self.state == GameState::Paused {
            return false;
        }
        let fired = self.player.shoot(&mut self.pool);
        if fired {
            self.events.push(GameEvent::ShotFired);
        }
        fired
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            GameState::GameOver => GameState::GameOver,
        };
        debug!(state = ?self.state, "pause toggled");
    }

    /// Starts over from the first wave. Only honored once the game is over.
    pub fn restart(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }

        self.player.restart(&self.config);
        self.pool.reset_all();
        self.columns = self.config.start_columns;
        self.rows = self.config.start_rows;
        self.waves.clear();
        self.spawn_wave();
        self.wave_count = 1;
        self.score = 0;
        self.sprite_timer = Duration::ZERO;
        self.sprite_update = false;
        self.events.clear();
        self.state = GameState::Playing;

        info!("game restarted");
        true
    }

    /// Advances the simulation one frame. `dt` is the wall time since the
    /// previous frame and only drives the death-animation clock.
    pub fn update(&mut self, held: HeldKeys, dt: Duration) {
        if self.state == GameState::Paused {
            return;
        }
        self.frame_count += 1;

        if self.sprite_timer > self.config.sprite_interval {
            self.sprite_update = true;
            self.sprite_timer = Duration::ZERO;
        } else {
            self.sprite_update = false;
            self.sprite_timer += dt;
        }

        self.player.update(held, self.config.world_width);
        self.pool.update();
        self.update_waves();
    }

    fn update_waves(&mut self) {
        let mut game_over = self.is_game_over();

        // Waves spawned during this pass are first updated next frame
        let existing = self.waves.len();
        for index in 0..existing {
            let lives_before = self.player.lives;
            let report = {
                let mut ctx = FrameContext {
                    pool: &mut self.pool,
                    player: &mut self.player,
                    score: &mut self.score,
                    game_over: &mut game_over,
                    sprite_update: self.sprite_update,
                    world_height: self.config.world_height,
                };
                self.waves[index].update(self.config.world_width, &mut ctx)
            };

            for _ in 0..report.hits {
                self.events.push(GameEvent::EnemyHit);
            }
            if report.destroyed > 0 {
                let each = report.points / report.destroyed;
                for _ in 0..report.destroyed {
                    self.events.push(GameEvent::EnemyDestroyed { points: each });
                }
            }
            // One event per ram, even once lives have bottomed out at zero
            for ram in 1..=report.rams {
                self.events.push(GameEvent::PlayerHit {
                    lives_left: lives_before.saturating_sub(ram),
                });
            }
            if report.landed > 0 {
                debug!(wave = index, landed = report.landed, "enemies reached the ground");
            }

            let wave = &self.waves[index];
            if wave.is_cleared() && !wave.next_wave_triggered && !game_over {
                self.waves[index].next_wave_triggered = true;
                self.next_wave();
            }
        }

        self.waves
            .retain(|wave| !(wave.is_cleared() && wave.next_wave_triggered));

        if game_over && !self.is_game_over() {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            info!(
                score = self.score,
                wave = self.wave_count,
                "game over"
            );
        }
    }

    fn next_wave(&mut self) {
        self.grow_grid();
        self.spawn_wave();
        self.wave_count += 1;
        self.player.gain_life();

        self.events.push(GameEvent::WaveCleared {
            next_wave: self.wave_count,
        });
        info!(
            wave = self.wave_count,
            columns = self.columns,
            rows = self.rows,
            lives = self.player.lives,
            "wave cleared"
        );
    }

    /// Widens the grid half the time, otherwise deepens it, within the
    /// share of the world a wave may occupy.
    fn grow_grid(&mut self) {
        let size = self.config.enemy_size;
        let can_widen = self.columns as f32 * size < self.config.world_width * 0.8;
        let can_deepen = self.rows as f32 * size < self.config.world_height * 0.6;

        if self.rng.random_bool(0.5) && can_widen {
            self.columns += 1;
        } else if can_deepen {
            self.rows += 1;
        }
    }

    fn spawn_wave(&mut self) {
        let wave = Wave::new(
            self.columns,
            self.rows,
            self.config.enemy_size,
            self.config.wave_speed,
            self.config.world_width,
            &mut self.rng,
        );
        debug!(
            columns = self.columns,
            rows = self.rows,
            direction = wave.speed_x,
            "wave spawned"
        );
        self.waves.push(wave);
    }
}
