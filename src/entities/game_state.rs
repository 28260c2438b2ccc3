#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// Things that happened during a frame, for audio cues and logging.
/// The simulation never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    EnemyHit,
    EnemyDestroyed { points: u32 },
    PlayerHit { lives_left: u32 },
    WaveCleared { next_wave: u32 },
    GameOver { score: u32 },
}
