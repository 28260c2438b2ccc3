mod bounds;
mod enemy;
mod game_state;
mod player;
mod projectile;
mod wave;

// Re-export all public types
pub use bounds::Rect;
pub use enemy::{Enemy, EnemyKind, EnemyOutcome, FrameContext};
pub use game_state::{GameEvent, GameState};
pub use player::{HeldKeys, Player};
pub use projectile::{Projectile, ProjectilePool};
pub use wave::{Wave, WaveReport};
