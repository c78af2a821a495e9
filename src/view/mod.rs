//! Presentation collaborators.
//!
//! The views are pure observers of the event bus: they consume session
//! lifecycle events and draw through the [`Surface`] trait, producing
//! nothing back into the Hinter. An embedder implements `Surface` for its
//! rendering target and shares one instance across both views.
//!
//! - [`HintsView`]: hint badges, the dimming overlay, and the hit
//!   highlight.
//! - [`BlurView`]: the blur-feedback flash.

mod blur;
mod hints;
mod surface;

pub use blur::BlurView;
pub use hints::{hint_z_index, HintsView, Z_INDEX_OFFSET};
pub use surface::{Badge, BadgeId, FlashId, Surface};
