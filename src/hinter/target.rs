//! Targets and their per-session state.

use std::fmt;

use crossterm::event::KeyModifiers;

use crate::geom::{Point, Rect};
use crate::page::NodePath;
use crate::scanner::Actionability;

/// Identity of a target within its session: a dense index into the
/// session's target list. Stable for the session's lifetime, meaningless
/// outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a target currently stands against the typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// Not yet evaluated against any typed input.
    Init,
    /// Still matches the typed prefix.
    Candidate,
    /// Uniquely resolved.
    Hit,
    /// Eliminated: no longer matches, or another target became the hit.
    Disabled,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetState::Init => "init",
            TargetState::Candidate => "candidate",
            TargetState::Hit => "hit",
            TargetState::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

/// One actionable element inside a session, labeled and stateful.
///
/// Owned exclusively by the session; event subscribers only ever see
/// borrows and cannot keep a target past the event that delivered it.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: TargetId,
    /// Where the element lives in the page snapshot.
    pub node: NodePath,
    /// The assigned hint label, lowercase. Immutable for the session.
    pub hint: String,
    pub state: TargetState,
    /// Visible rects, viewport-relative.
    pub rects: Vec<Rect>,
    pub traits: Actionability,
}

impl Target {
    /// Union of the target's rects.
    pub fn bounding_rect(&self) -> Option<Rect> {
        crate::geom::bounding_rect(self.rects.iter())
    }

    /// Top-left of the first rect; the point label ordering ranks by.
    pub fn anchor(&self) -> Point {
        self.rects.first().map(Rect::origin).unwrap_or(Point::ZERO)
    }
}

/// One target's transition during a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetStateChange {
    pub target: TargetId,
    pub old: TargetState,
    pub new: TargetState,
}

/// What changed on one keystroke, ordered by target id. Never the full
/// state, only the targets whose state actually moved.
pub type TargetStateChanges = Vec<TargetStateChange>;

/// Modifier keys held at the moment a session resolved, carried through to
/// the action dispatcher so the synthesized interaction reflects intent
/// (e.g. ctrl-click opens in a new tab).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DehintOptions {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl DehintOptions {
    /// No modifiers held.
    pub fn none() -> Self {
        Self::default()
    }

    /// Capture the modifier flags of a terminal key event.
    pub fn from_modifiers(modifiers: KeyModifiers) -> Self {
        Self {
            ctrl: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
            meta: modifiers.contains(KeyModifiers::SUPER),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_state_display() {
        assert_eq!(TargetState::Init.to_string(), "init");
        assert_eq!(TargetState::Candidate.to_string(), "candidate");
        assert_eq!(TargetState::Hit.to_string(), "hit");
        assert_eq!(TargetState::Disabled.to_string(), "disabled");
    }

    #[test]
    fn test_target_id_display() {
        assert_eq!(TargetId(3).to_string(), "#3");
    }

    #[test]
    fn test_target_geometry_helpers() {
        let target = Target {
            id: TargetId(0),
            node: NodePath::root(),
            hint: "a".to_string(),
            state: TargetState::Init,
            rects: vec![
                Rect::new(10.0, 20.0, 30.0, 40.0),
                Rect::new(0.0, 40.0, 15.0, 50.0),
            ],
            traits: Actionability::default(),
        };
        assert_eq!(target.anchor(), Point::new(10.0, 20.0));
        assert_eq!(target.bounding_rect(), Some(Rect::new(0.0, 20.0, 30.0, 50.0)));
    }

    #[test]
    fn test_dehint_options_from_modifiers() {
        let opts =
            DehintOptions::from_modifiers(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(opts.ctrl);
        assert!(opts.shift);
        assert!(!opts.alt);
        assert!(!opts.meta);
    }

    #[test]
    fn test_dehint_options_builders() {
        let opts = DehintOptions::none().with_ctrl().with_meta();
        assert!(opts.ctrl && opts.meta);
        assert!(!opts.shift && !opts.alt);
        assert_eq!(DehintOptions::none(), DehintOptions::default());
    }
}
