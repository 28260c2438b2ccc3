// Library exports for the binary and for testing
pub use config::{ConfigError, GameConfig};
pub use entities::{
    Enemy, EnemyKind, EnemyOutcome, FrameContext, GameEvent, GameState, HeldKeys, Player,
    Projectile, ProjectilePool, Rect, Wave, WaveReport,
};
pub use game::Game;

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod terminal;
