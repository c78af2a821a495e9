//! Key-event routing.
//!
//! Translates terminal key events into engine operations, keyed by the
//! configured magic and blur keys. The router is a pure lookup: it never
//! touches the Hinter itself, it only names the operation for the caller to
//! execute.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::config::Settings;
use crate::error::{KeyhintError, KeyhintResult};
use crate::hinter::DehintOptions;

/// One operation the embedder should run against the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOp {
    /// Open a hint session (magic key while idle).
    AttachHints,
    /// Feed a typed character into the session.
    HitHint { ch: char, options: DehintOptions },
    /// Remove the last buffered character.
    Backspace,
    /// Cancel the session.
    RemoveHints { options: DehintOptions },
    /// Blur the active element (blur key while idle).
    Blur,
}

/// Parse a configured key name into a key code.
///
/// Accepts the named keys `Space`, `Escape`/`Esc`, `Enter`, `Tab` (case
/// insensitive) or any single character.
pub fn parse_key(name: &str) -> KeyhintResult<KeyCode> {
    match name.to_ascii_lowercase().as_str() {
        "space" => Ok(KeyCode::Char(' ')),
        "escape" | "esc" => Ok(KeyCode::Esc),
        "enter" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(KeyCode::Char(c.to_ascii_lowercase())),
                _ => Err(KeyhintError::UnknownKey {
                    name: name.to_string(),
                }),
            }
        }
    }
}

/// Maps key presses to engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRouter {
    magic: KeyCode,
    blur: Option<KeyCode>,
}

impl InputRouter {
    /// Build a router for the configured magic/blur keys.
    pub fn from_settings(settings: &Settings) -> KeyhintResult<Self> {
        let magic = parse_key(&settings.magic_key)?;
        let blur = settings
            .blur_key
            .as_deref()
            .map(parse_key)
            .transpose()?;
        Ok(Self { magic, blur })
    }

    /// Name the operation for a key event, given whether a session is
    /// active. `None` means the event is not the engine's to consume.
    pub fn route(&self, key: &KeyEvent, session_active: bool) -> Option<EngineOp> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let options = DehintOptions::from_modifiers(key.modifiers);

        if !session_active {
            if key.code == self.magic {
                return Some(EngineOp::AttachHints);
            }
            if self.blur == Some(key.code) {
                return Some(EngineOp::Blur);
            }
            return None;
        }

        // While hinting: cancel keys first, then the buffer edits. The
        // magic key does nothing until the session concludes.
        if key.code == KeyCode::Esc || self.blur == Some(key.code) {
            return Some(EngineOp::RemoveHints { options });
        }
        if key.code == self.magic {
            return None;
        }
        match key.code {
            KeyCode::Backspace => Some(EngineOp::Backspace),
            KeyCode::Char(ch) => Some(EngineOp::HitHint { ch, options }),
            _ => None,
        }
    }
}
