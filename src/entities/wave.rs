use rand::Rng;

use super::enemy::{Enemy, EnemyKind, EnemyOutcome, FrameContext};

/// Summary of one wave update, folded into the game's event log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveReport {
    pub hits: u32,
    pub destroyed: u32,
    pub points: u32,
    pub rams: u32,
    pub landed: u32,
}

impl WaveReport {
    fn absorb(&mut self, outcome: EnemyOutcome) {
        self.hits += outcome.hits;
        if let Some(points) = outcome.destroyed_for {
            self.destroyed += 1;
            self.points += points;
        }
        self.rams += u32::from(outcome.rammed_player);
        self.landed += u32::from(outcome.reached_bottom);
    }
}

/// A grid of enemies sweeping side to side as one block, stepping down
/// by one enemy size every time it touches a side of the world.
#[derive(Debug, Clone)]
pub struct Wave {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub enemy_size: f32,
    pub columns: u32,
    pub rows: u32,
    pub enemies: Vec<Enemy>,
    /// Set once this wave has spawned its successor
    pub next_wave_triggered: bool,
}

impl Wave {
    /// Builds a `columns` x `rows` grid centered horizontally and parked
    /// just above the top of the world, heading in a random direction.
    pub fn new(
        columns: u32,
        rows: u32,
        enemy_size: f32,
        speed: f32,
        world_width: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let width = columns as f32 * enemy_size;
        let height = rows as f32 * enemy_size;
        let speed_x = if rng.random_bool(0.5) { speed } else { -speed };

        let mut enemies = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                enemies.push(Enemy::spawn(
                    EnemyKind::Beetlemorph,
                    enemy_size,
                    column as f32 * enemy_size,
                    row as f32 * enemy_size,
                    rng,
                ));
            }
        }

        Self {
            x: world_width * 0.5 - width * 0.5,
            y: -height,
            width,
            height,
            speed_x,
            speed_y: 0.0,
            enemy_size,
            columns,
            rows,
            enemies,
            next_wave_triggered: false,
        }
    }

    /// Moves the block one frame
    pub fn advance(&mut self, world_width: f32) {
        // Glide in from above the screen
        if self.y < 0.0 {
            self.y += 1.0;
        }
        self.speed_y = 0.0;

        if self.x < 0.0 || self.x > world_width - self.width {
            self.speed_x = -self.speed_x;
            self.speed_y = self.enemy_size;
        }

        self.x += self.speed_x;
        self.y += self.speed_y;
    }

    /// Moves the block, updates every enemy against it and drops the ones
    /// that finished dying or were otherwise removed.
    pub fn update(&mut self, world_width: f32, ctx: &mut FrameContext) -> WaveReport {
        self.advance(world_width);

        let mut report = WaveReport::default();
        for enemy in &mut self.enemies {
            report.absorb(enemy.update(self.x, self.y, ctx));
        }
        self.enemies.retain(|enemy| !enemy.marked_for_deletion);

        report
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }
}
