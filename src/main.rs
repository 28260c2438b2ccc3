use std::io::stdout;
use std::path::PathBuf;

use beetle_blaster::GameConfig;
use beetle_blaster::app::App;
use beetle_blaster::audio::AudioManager;
use beetle_blaster::input::InputManager;
use beetle_blaster::logging;
use beetle_blaster::terminal::TerminalGuard;
use clap::Parser;
use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "beetle-blaster")]
#[command(about = "Clear waves of beetle formations before they land", long_about = None)]
struct Cli {
    /// Seed for wave directions, sprites and growth (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// World width in pixels
    #[arg(long, default_value_t = 600.0)]
    width: f32,

    /// World height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,

    /// Starting lives
    #[arg(long, default_value_t = 10)]
    lives: u32,

    /// Projectiles that can be in flight at once
    #[arg(long, default_value_t = 10)]
    pool_size: usize,

    /// Columns of the first wave
    #[arg(long, default_value_t = 2)]
    columns: u32,

    /// Rows of the first wave
    #[arg(long, default_value_t = 2)]
    rows: u32,

    /// Disable sound
    #[arg(short, long)]
    mute: bool,

    /// Where to write the log
    #[arg(long, default_value = "beetle-blaster.log")]
    log_file: PathBuf,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.width,
            world_height: self.height,
            player_lives: self.lives,
            pool_size: self.pool_size,
            start_columns: self.columns,
            start_rows: self.rows,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let _log_guard = logging::init(&cli.log_file)?;

    let config = cli.config();
    config.validate()?;
    info!(?config, "starting");

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(supports_keyboard_enhancement, "terminal capabilities");

    let audio = AudioManager::open_or_silent(cli.mute);

    // Dropping the guard restores the terminal on every exit path
    let _terminal_guard = TerminalGuard::enter(supports_keyboard_enhancement)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let input = InputManager::new(supports_keyboard_enhancement);
    App::new(config, input, audio).run(&mut terminal)
}
