use rand::Rng;

use super::bounds::Rect;
use super::player::Player;
use super::projectile::ProjectilePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Beetlemorph,
}

impl EnemyKind {
    pub fn lives(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 1,
        }
    }

    /// Last death-animation frame; the enemy is removed once it is passed
    pub fn max_frame(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 2,
        }
    }

    /// Number of sprite rows (color variants) to pick from
    pub fn variants(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 4,
        }
    }
}

/// Mutable world state an enemy touches during its update
pub struct FrameContext<'a> {
    pub pool: &'a mut ProjectilePool,
    pub player: &'a mut Player,
    pub score: &'a mut u32,
    pub game_over: &'a mut bool,
    /// True on frames where the sprite timer elapsed
    pub sprite_update: bool,
    pub world_height: f32,
}

/// What happened to an enemy during one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyOutcome {
    /// Projectiles that struck this frame
    pub hits: u32,
    /// Points awarded when the death animation finished
    pub destroyed_for: Option<u32>,
    pub rammed_player: bool,
    pub reached_bottom: bool,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Offset inside the owning wave's grid
    pub offset_x: f32,
    pub offset_y: f32,
    pub lives: u32,
    pub max_lives: u32,
    /// Death-animation column
    pub frame_x: u32,
    /// Sprite row
    pub frame_y: u32,
    pub max_frame: u32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, size: f32, offset_x: f32, offset_y: f32, frame_y: u32) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            size,
            offset_x,
            offset_y,
            lives: kind.lives(),
            max_lives: kind.lives(),
            frame_x: 0,
            frame_y,
            max_frame: kind.max_frame(),
            marked_for_deletion: false,
        }
    }

    /// Same as [`Enemy::new`] with a random sprite row
    pub fn spawn(kind: EnemyKind, size: f32, offset_x: f32, offset_y: f32, rng: &mut impl Rng) -> Self {
        let frame_y = rng.random_range(0..kind.variants());
        Self::new(kind, size, offset_x, offset_y, frame_y)
    }

    pub fn update(&mut self, wave_x: f32, wave_y: f32, ctx: &mut FrameContext) -> EnemyOutcome {
        let mut outcome = EnemyOutcome::default();

        self.x = wave_x + self.offset_x;
        self.y = wave_y + self.offset_y;

        let bounds = self.bounds();
        for projectile in ctx.pool.iter_active_mut() {
            if self.lives > 0 && bounds.intersects(&projectile.bounds()) {
                self.hit(1);
                projectile.reset();
                outcome.hits += 1;
            }
        }

        if self.is_dying() && !self.marked_for_deletion {
            if ctx.sprite_update {
                self.frame_x += 1;
            }
            if self.frame_x > self.max_frame {
                self.marked_for_deletion = true;
                if !*ctx.game_over {
                    *ctx.score += self.max_lives;
                    outcome.destroyed_for = Some(self.max_lives);
                }
            }
        }

        if bounds.intersects(&ctx.player.bounds()) {
            self.marked_for_deletion = true;
            outcome.rammed_player = true;

            if !*ctx.game_over {
                *ctx.score = ctx.score.saturating_sub(1);
            }
            ctx.player.lose_life();
            if !ctx.player.is_alive() {
                *ctx.game_over = true;
            }
        }

        if bounds.bottom() > ctx.world_height {
            *ctx.game_over = true;
            self.marked_for_deletion = true;
            outcome.reached_bottom = true;
        }

        outcome
    }

    pub fn hit(&mut self, damage: u32) {
        self.lives = self.lives.saturating_sub(damage);
    }

    /// Out of lives and playing the death animation
    pub fn is_dying(&self) -> bool {
        self.lives == 0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}
