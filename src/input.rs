use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::entities::{GameState, HeldKeys};

/// How long a movement key counts as held after its last press when the
/// terminal cannot report releases
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(150);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Fire,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: Option<Instant>,
    right: Option<Instant>,
    /// Space is down and has already fired
    fire_latched: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Terminal reports key release events (keyboard enhancement active)
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state, Instant::now());
            }
        }

        Ok(())
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state, now),
            KeyEventKind::Repeat => self.refresh_held(key_event.code, now),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState, now: Instant) {
        // Check for quit keys first (works in any state)
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match key_event.code {
            KeyCode::Char('p') | KeyCode::Char('P') => match game_state {
                GameState::Playing => self.oneshot_actions.push(InputAction::Pause),
                GameState::Paused => self.oneshot_actions.push(InputAction::Resume),
                GameState::GameOver => {}
            },
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if game_state == GameState::GameOver {
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
            KeyCode::Char(' ') => {
                if !self.key_state.fire_latched {
                    self.oneshot_actions.push(InputAction::Fire);
                    // Without release events there is nothing to unlatch on
                    self.key_state.fire_latched = self.release_events;
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = Some(now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = Some(now);
            }
            _ => {}
        }
    }

    fn refresh_held(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = Some(now);
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = Some(now);
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = None;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = None;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire_latched = false;
            }
            _ => {}
        }
    }

    /// One-shot actions gathered by the last poll
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Direction keys held at `now`
    pub fn held_keys(&self, now: Instant) -> HeldKeys {
        let is_held = |pressed: Option<Instant>| match pressed {
            Some(at) => self.release_events || now.duration_since(at) <= HOLD_TIMEOUT,
            None => false,
        };
        HeldKeys {
            left: is_held(self.key_state.left),
            right: is_held(self.key_state.right),
        }
    }
}
