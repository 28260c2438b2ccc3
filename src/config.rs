use std::time::Duration;

use thiserror::Error;

/// Reasons a [`GameConfig`] cannot be used to start a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world must be at least 1x1, got {width}x{height}")]
    WorldTooSmall { width: f32, height: f32 },
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("projectile pool must hold at least one projectile")]
    EmptyPool,
    #[error("starting grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("starting grid is {grid_width} wide but the world is only {world_width}")]
    GridTooWide { grid_width: f32, world_width: f32 },
    #[error("player needs at least one life")]
    NoLives,
}

/// Every tunable number of a game session, in world pixels and frames.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Pixels per frame while a direction key is held
    pub player_speed: f32,
    pub player_lives: u32,

    pub pool_size: usize,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,

    pub enemy_size: f32,
    /// Grid size of the first wave (and after a restart)
    pub start_columns: u32,
    pub start_rows: u32,
    /// Horizontal pixels per frame a wave sweeps
    pub wave_speed: f32,

    /// How long a death-animation frame is held
    pub sprite_interval: Duration,
    /// Target duration of one update + draw pass
    pub frame_time: Duration,

    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 600.0,
            world_height: 800.0,
            player_width: 100.0,
            player_height: 100.0,
            player_speed: 5.0,
            player_lives: 10,
            pool_size: 10,
            projectile_width: 8.0,
            projectile_height: 40.0,
            projectile_speed: 15.0,
            enemy_size: 80.0,
            start_columns: 2,
            start_rows: 2,
            wave_speed: 1.0,
            sprite_interval: Duration::from_millis(140),
            frame_time: Duration::from_millis(16),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that the numbers describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width >= 1.0 && self.world_height >= 1.0) {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
            });
        }

        let positives = [
            ("player width", self.player_width),
            ("player height", self.player_height),
            ("player speed", self.player_speed),
            ("projectile width", self.projectile_width),
            ("projectile height", self.projectile_height),
            ("projectile speed", self.projectile_speed),
            ("enemy size", self.enemy_size),
            ("wave speed", self.wave_speed),
        ];
        for (what, value) in positives {
            // NaN fails this comparison too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.player_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.start_columns == 0 || self.start_rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.start_columns,
                rows: self.start_rows,
            });
        }

        let grid_width = self.start_columns as f32 * self.enemy_size;
        if grid_width > self.world_width {
            return Err(ConfigError::GridTooWide {
                grid_width,
                world_width: self.world_width,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_tiny_world() {
        let config = GameConfig {
            world_width: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WorldTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = GameConfig {
            projectile_speed: -3.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                what: "projectile speed",
                value: -3.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_size() {
        let config = GameConfig {
            enemy_size: f32::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { what: "enemy size", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_pool_and_grid() {
        let config = GameConfig {
            pool_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPool));

        let config = GameConfig {
            start_rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                columns: 2,
                rows: 0
            })
        );
    }

    #[test]
    fn test_rejects_grid_wider_than_world() {
        let config = GameConfig {
            start_columns: 8,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooWide {
                grid_width: 640.0,
                world_width: 600.0
            })
        );
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = ConfigError::EmptyGrid {
            columns: 0,
            rows: 3,
        };
        assert_eq!(
            err.to_string(),
            "starting grid must have at least one column and one row, got 0x3"
        );
    }
}
