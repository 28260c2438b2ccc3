use super::bounds::Rect;
use super::projectile::ProjectilePool;
use crate::config::GameConfig;

/// Direction keys currently held down, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub lives: u32,
    pub damage_flash_frames: u8,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let mut player = Self {
            x: 0.0,
            y: 0.0,
            width: config.player_width,
            height: config.player_height,
            speed: config.player_speed,
            lives: config.player_lives,
            damage_flash_frames: 0,
        };
        player.restart(config);
        player
    }

    /// Back to the bottom center with full lives
    pub fn restart(&mut self, config: &GameConfig) {
        self.x = config.world_width / 2.0 - self.width / 2.0;
        self.y = config.world_height - self.height;
        self.lives = config.player_lives;
        self.damage_flash_frames = 0;
    }

    /// Moves by held keys, then clamps so at most half the ship leaves the world
    pub fn update(&mut self, held: HeldKeys, world_width: f32) {
        if held.left {
            self.x -= self.speed;
        }
        if held.right {
            self.x += self.speed;
        }

        let half = self.width * 0.5;
        self.x = self.x.clamp(-half, world_width - half);

        if self.damage_flash_frames > 0 {
            self.damage_flash_frames -= 1;
        }
    }

    /// Launches a free projectile from the nose of the ship.
    /// Returns false when the pool has nothing to give.
    pub fn shoot(&self, pool: &mut ProjectilePool) -> bool {
        match pool.acquire() {
            Some(projectile) => {
                projectile.start(self.x + self.width * 0.5, self.y);
                true
            }
            None => false,
        }
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        // Flash for 10 frames (about 1/6 second at 60 FPS)
        self.damage_flash_frames = 10;
    }

    pub fn gain_life(&mut self) {
        self.lives += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.damage_flash_frames > 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: HeldKeys = HeldKeys {
        left: true,
        right: false,
    };
    const RIGHT: HeldKeys = HeldKeys {
        left: false,
        right: true,
    };

    #[test]
    fn test_player_new() {
        let player = Player::new(&GameConfig::default());
        assert_eq!(player.x, 250.0);
        assert_eq!(player.y, 700.0);
        assert_eq!(player.lives, 10);
        assert_eq!(player.speed, 5.0);
    }

    #[test]
    fn test_player_movement() {
        let mut player = Player::new(&GameConfig::default());
        player.update(LEFT, 600.0);
        assert_eq!(player.x, 245.0);

        player.update(RIGHT, 600.0);
        player.update(RIGHT, 600.0);
        assert_eq!(player.x, 255.0);
    }

    #[test]
    fn test_both_keys_cancel_out() {
        let mut player = Player::new(&GameConfig::default());
        player.update(
            HeldKeys {
                left: true,
                right: true,
            },
            600.0,
        );
        assert_eq!(player.x, 250.0);
    }

    #[test]
    fn test_player_clamped_half_off_left_edge() {
        let mut player = Player::new(&GameConfig::default());
        player.x = -48.0;
        player.update(LEFT, 600.0);
        assert_eq!(player.x, -50.0);
    }

    #[test]
    fn test_player_clamped_half_off_right_edge() {
        let mut player = Player::new(&GameConfig::default());
        player.x = 548.0;
        player.update(RIGHT, 600.0);
        assert_eq!(player.x, 550.0);
    }

    #[test]
    fn test_shoot_launches_from_ship_center() {
        let player = Player::new(&GameConfig::default());
        let mut pool = ProjectilePool::new(2, 8.0, 40.0, 15.0);

        assert!(player.shoot(&mut pool));
        let projectile = pool.iter().find(|p| p.is_active()).unwrap();
        assert_eq!(projectile.x, 296.0);
        assert_eq!(projectile.y, 700.0);
    }

    #[test]
    fn test_shoot_with_exhausted_pool() {
        let player = Player::new(&GameConfig::default());
        let mut pool = ProjectilePool::new(1, 8.0, 40.0, 15.0);
        assert!(player.shoot(&mut pool));
        assert!(!player.shoot(&mut pool));
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut player = Player::new(&GameConfig {
            player_lives: 1,
            ..GameConfig::default()
        });
        player.lose_life();
        assert!(!player.is_alive());
        player.lose_life();
        assert_eq!(player.lives, 0);
    }

    #[test]
    fn test_restart_recenters_and_restores_lives() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.x = 12.0;
        player.lose_life();
        player.lose_life();
        player.restart(&config);
        assert_eq!(player.x, 250.0);
        assert_eq!(player.lives, 10);
        assert!(!player.is_flashing());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_within_bounds(
                moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..400)
            ) {
                let config = GameConfig::default();
                let mut player = Player::new(&config);
                for (left, right) in moves {
                    player.update(HeldKeys { left, right }, config.world_width);
                    prop_assert!(player.x >= -player.width * 0.5);
                    prop_assert!(player.x <= config.world_width - player.width * 0.5);
                }
            }
        }
    }
}
