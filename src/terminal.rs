//! Raw-mode terminal session. The guard puts the terminal back however the
//! game exits, including early `?` returns during setup.

use std::io::{self, Write, stdout};

use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use tracing::warn;

/// Restores the terminal when dropped
pub struct TerminalGuard {
    /// Enhancement flags were pushed and must be popped
    keyboard_enhancement: bool,
}

impl TerminalGuard {
    /// Enables raw mode, enters the alternate screen and, when asked, turns on
    /// key release reporting.
    pub fn enter(keyboard_enhancement: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            keyboard_enhancement: false,
        };

        let mut out = stdout();
        execute!(out, EnterAlternateScreen)?;

        // Enable keyboard enhancement AFTER entering alternate screen
        if keyboard_enhancement {
            execute!(
                out,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            guard.keyboard_enhancement = true;
        }

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = write_restore(&mut stdout(), self.keyboard_enhancement) {
            warn!(%err, "failed to restore terminal screen");
        }
        if let Err(err) = disable_raw_mode() {
            warn!(%err, "failed to leave raw mode");
        }
    }
}

/// Writes the sequences that undo [`TerminalGuard::enter`]'s screen changes
pub fn write_restore<W: Write>(out: &mut W, keyboard_enhancement: bool) -> io::Result<()> {
    if keyboard_enhancement {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, LeaveAlternateScreen, Show)
}
