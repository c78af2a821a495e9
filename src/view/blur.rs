//! Blur feedback rendering.
//!
//! Answers `Blured` with a short flash overlay at the blurred element's
//! rect. The flash is a scoped resource: begun on the surface, ended
//! explicitly when the embedder reports completion (or when a newer blur
//! supersedes it), never by ambient scheduling.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::events::{Event, EventBus, EventKind};

use super::surface::{FlashId, Surface};

struct FlashState<S> {
    surface: Rc<RefCell<S>>,
    active: Option<FlashId>,
}

/// Renders the blur flash. Subscribes itself on construction.
pub struct BlurView<S> {
    state: Rc<RefCell<FlashState<S>>>,
}

impl<S: Surface + 'static> BlurView<S> {
    pub fn new(bus: &mut EventBus, surface: Rc<RefCell<S>>) -> Self {
        let state = Rc::new(RefCell::new(FlashState {
            surface,
            active: None,
        }));

        let on_blured = Rc::clone(&state);
        bus.subscribe(EventKind::Blured, move |event| {
            if let Event::Blured { rect } = event {
                let mut state = on_blured.borrow_mut();
                state.end_active();
                if let Some(rect) = rect {
                    let id = state.surface.borrow_mut().begin_blur_flash(*rect);
                    state.active = Some(id);
                    debug!(flash = id.0, "blur flash started");
                }
            }
        });

        Self { state }
    }

    /// Report the active flash finished (completion or error); removes the
    /// overlay. Idempotent.
    pub fn finish_flash(&self) {
        self.state.borrow_mut().end_active();
    }

    /// Whether a flash is currently up.
    pub fn is_flashing(&self) -> bool {
        self.state.borrow().active.is_some()
    }
}

impl<S: Surface> FlashState<S> {
    fn end_active(&mut self) {
        if let Some(id) = self.active.take() {
            self.surface.borrow_mut().end_blur_flash(id);
        }
    }
}
