use super::bounds::Rect;
use crate::config::GameConfig;

/// A player shot. Lives in a [`ProjectilePool`] and is recycled instead of dropped.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame, upward
    pub speed: f32,
    /// Free projectiles are parked in the pool and neither move nor collide
    pub free: bool,
}

impl Projectile {
    pub fn new(width: f32, height: f32, speed: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            speed,
            free: true,
        }
    }

    /// Launches the projectile centered on `x` with its top edge at `y`
    pub fn start(&mut self, x: f32, y: f32) {
        self.x = x - self.width * 0.5;
        self.y = y;
        self.free = false;
    }

    pub fn reset(&mut self) {
        self.free = true;
    }

    pub fn update(&mut self) {
        if !self.free {
            self.y -= self.speed;
        }
        if self.is_off_screen() {
            self.reset();
        }
    }

    /// Fully above the top edge of the world
    pub fn is_off_screen(&self) -> bool {
        self.y < -self.height
    }

    pub fn is_active(&self) -> bool {
        !self.free
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Fixed-size set of projectiles allocated once. Firing borrows a free slot;
/// an exhausted pool simply means no shot this time.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    projectiles: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(size: usize, width: f32, height: f32, speed: f32) -> Self {
        Self {
            projectiles: (0..size)
                .map(|_| Projectile::new(width, height, speed))
                .collect(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.pool_size,
            config.projectile_width,
            config.projectile_height,
            config.projectile_speed,
        )
    }

    /// First free projectile, if any
    pub fn acquire(&mut self) -> Option<&mut Projectile> {
        self.projectiles.iter_mut().find(|p| p.free)
    }

    pub fn update(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.update();
        }
    }

    /// Returns every projectile to the pool
    pub fn reset_all(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut().filter(|p| !p.free)
    }

    pub fn active_count(&self) -> usize {
        self.projectiles.iter().filter(|p| !p.free).count()
    }

    pub fn capacity(&self) -> usize {
        self.projectiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_starts_free() {
        let projectile = Projectile::new(8.0, 40.0, 15.0);
        assert!(projectile.free);
        assert!(!projectile.is_active());
    }

    #[test]
    fn test_start_centers_on_x() {
        let mut projectile = Projectile::new(8.0, 40.0, 15.0);
        projectile.start(300.0, 700.0);
        assert_eq!(projectile.x, 296.0);
        assert_eq!(projectile.y, 700.0);
        assert!(projectile.is_active());
    }

    #[test]
    fn test_active_projectile_moves_up() {
        let mut projectile = Projectile::new(8.0, 40.0, 15.0);
        projectile.start(300.0, 700.0);
        projectile.update();
        assert_eq!(projectile.y, 685.0);
    }

    #[test]
    fn test_free_projectile_stays_put() {
        let mut projectile = Projectile::new(8.0, 40.0, 15.0);
        projectile.y = 500.0;
        projectile.update();
        assert_eq!(projectile.y, 500.0);
    }

    #[test]
    fn test_projectile_recycled_after_leaving_top() {
        let mut projectile = Projectile::new(8.0, 40.0, 15.0);
        projectile.start(100.0, 20.0);

        // 20 -> 5 -> -10 -> -25 -> -40 (still touching) -> -55 (gone)
        for _ in 0..4 {
            projectile.update();
            assert!(projectile.is_active());
        }
        projectile.update();
        assert!(projectile.free);
    }

    #[test]
    fn test_pool_acquire_takes_first_free() {
        let mut pool = ProjectilePool::new(3, 8.0, 40.0, 15.0);
        pool.acquire().unwrap().start(10.0, 100.0);
        pool.acquire().unwrap().start(20.0, 100.0);
        assert_eq!(pool.active_count(), 2);

        pool.acquire().unwrap().start(30.0, 100.0);
        assert_eq!(pool.active_count(), 3);
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn test_pool_capacity_is_fixed() {
        let mut pool = ProjectilePool::new(2, 8.0, 40.0, 15.0);
        for _ in 0..10 {
            if let Some(projectile) = pool.acquire() {
                projectile.start(50.0, 400.0);
            }
            pool.update();
        }
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_pool_reset_all() {
        let mut pool = ProjectilePool::new(4, 8.0, 40.0, 15.0);
        while let Some(projectile) = pool.acquire() {
            projectile.start(50.0, 400.0);
        }
        assert_eq!(pool.active_count(), 4);
        pool.reset_all();
        assert_eq!(pool.active_count(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fired_projectile_always_returns_to_pool(
                start_x in 0.0f32..600.0,
                start_y in 0.0f32..800.0,
                speed in 1.0f32..30.0
            ) {
                let mut projectile = Projectile::new(8.0, 40.0, speed);
                projectile.start(start_x, start_y);

                let max_frames = ((start_y + 40.0) / speed).ceil() as usize + 2;
                let mut last_y = projectile.y;
                for _ in 0..max_frames {
                    if projectile.free {
                        break;
                    }
                    projectile.update();
                    prop_assert!(projectile.y < last_y);
                    last_y = projectile.y;
                }
                prop_assert!(projectile.free);
            }
        }
    }
}
