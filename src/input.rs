//! Keyboard state sampling.
//!
//! Terminals deliver key events, not key state.  `KeyTracker` records the
//! frame each key was last seen pressed (or repeated) and turns that into a
//! per-frame snapshot of held keys, so several directions plus fire can be
//! active in the same frame.
//!
//! Two classes of terminal are handled:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Release` events
//!   remove keys immediately.
//! * **Classic terminals**: only `Press` events, with OS key-repeat showing up
//!   as repeated presses.  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 60 FPS, 8 frames ≈ 133 ms, longer than the OS repeat interval.
pub const HOLD_WINDOW: u64 = 8;

/// The keys that matter for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    /// Window-close signal: Esc, `q` or Ctrl-C.
    pub quit: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen.
    key_frame: HashMap<KeyCode, u64>,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event observed during `frame`.
    pub fn handle(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(normalize(*code), frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(normalize(*code), frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&normalize(*code));
            }
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Sample the held keys as of `frame`.  Quit stays latched once seen.
    pub fn snapshot(&self, frame: u64) -> InputSnapshot {
        let held = |arrow: KeyCode, letter: char| {
            self.is_held(arrow, frame) || self.is_held(KeyCode::Char(letter), frame)
        };
        InputSnapshot {
            left: held(KeyCode::Left, 'a'),
            right: held(KeyCode::Right, 'd'),
            up: held(KeyCode::Up, 'w'),
            down: held(KeyCode::Down, 's'),
            fire: self.is_held(KeyCode::Char(' '), frame),
            quit: self.quit,
        }
    }
}

/// Fold upper-case letters onto lower-case so Shift/CapsLock don't matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
