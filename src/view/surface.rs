//! The drawing abstraction the views render through.

use crate::geom::{Point, Rect};
use crate::hinter::{TargetId, TargetState};

/// Handle to one mounted hint badge, issued by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadgeId(pub u64);

/// Handle to one in-progress blur flash, issued by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashId(pub u64);

/// One hint badge to draw: the label in a small box at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub target: TargetId,
    /// Display text, upper-cased.
    pub label: String,
    /// Top-left corner, document-absolute.
    pub origin: Point,
    pub z_index: i64,
}

/// What a renderer must be able to draw. All rectangles are
/// document-absolute.
///
/// Implementations own their drawing resources; the views only hold the
/// issued ids. `end_blur_flash` must tolerate an id whose flash already
/// completed on the surface side.
pub trait Surface {
    /// Install the session's style payload. Called once per mount.
    fn apply_style(&mut self, style: &str);

    /// Show (or move) the dimming overlay behind the hints.
    fn show_overlay(&mut self, rect: Rect);
    fn hide_overlay(&mut self);

    /// Show (or move) the highlight over the current hit target.
    fn show_active_overlay(&mut self, rect: Rect);
    fn hide_active_overlay(&mut self);

    /// Mount one hint badge and return its handle.
    fn place_badge(&mut self, badge: Badge) -> BadgeId;

    /// Restyle one mounted badge for a new target state.
    fn restyle_badge(&mut self, id: BadgeId, state: TargetState, z_index: i64);

    /// Unmount everything belonging to the hint session: badges, overlay,
    /// active overlay, and the installed style.
    fn clear(&mut self);

    /// Start a short-lived flash at `rect` (blur feedback). The flash stays
    /// up until `end_blur_flash` is called with the returned id.
    fn begin_blur_flash(&mut self, rect: Rect) -> FlashId;
    fn end_blur_flash(&mut self, id: FlashId);
}
