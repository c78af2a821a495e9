//! Hint badge and overlay rendering.
//!
//! `HintsView` is a pure observer: it subscribes to the session lifecycle
//! events and translates them into surface calls. All of its mutable state
//! lives in an explicit per-session struct; handlers share it through one
//! `Rc<RefCell<..>>`, never through loose captured variables.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::collections::ListMap;
use crate::events::{Event, EventBus, EventKind};
use crate::geom::{Point, Rect};
use crate::hinter::{HintContext, TargetId, TargetState, TargetStateChanges};

use super::surface::{Badge, BadgeId, Surface};

/// Base z-index for hint chrome; high enough to clear page content.
pub const Z_INDEX_OFFSET: i64 = 2_147_483_640;
const CANDIDATE_HINT_Z_INDEX: i64 = Z_INDEX_OFFSET + 1;
const HIT_HINT_Z_INDEX: i64 = Z_INDEX_OFFSET + 2;

/// Padding around the candidate bounding box, in pixels.
const OVERLAY_PADDING: f64 = 8.0;

/// The z-index tier a badge renders at in a given state.
pub fn hint_z_index(state: TargetState) -> i64 {
    match state {
        TargetState::Hit => HIT_HINT_Z_INDEX,
        TargetState::Candidate => CANDIDATE_HINT_Z_INDEX,
        TargetState::Init | TargetState::Disabled => Z_INDEX_OFFSET,
    }
}

/// Render state for one mounted session.
struct RenderSession {
    /// Badges per target; a target renders one badge per visible rect.
    badges: ListMap<TargetId, BadgeId>,
}

struct ViewState<S> {
    surface: Rc<RefCell<S>>,
    style: String,
    session: Option<RenderSession>,
}

/// The overlay/badge renderer. Subscribes itself on construction.
pub struct HintsView<S> {
    state: Rc<RefCell<ViewState<S>>>,
}

impl<S: Surface + 'static> HintsView<S> {
    /// Wire a view to `bus`, drawing on `surface` with `style` as the
    /// session style payload.
    pub fn new(bus: &mut EventBus, surface: Rc<RefCell<S>>, style: impl Into<String>) -> Self {
        let state = Rc::new(RefCell::new(ViewState {
            surface,
            style: style.into(),
            session: None,
        }));

        let on_hinted = Rc::clone(&state);
        bus.subscribe(EventKind::Hinted, move |event| {
            if let Event::Hinted { context } = event {
                on_hinted.borrow_mut().mount(context);
            }
        });

        let on_hit = Rc::clone(&state);
        bus.subscribe(EventKind::HintHit, move |event| {
            if let Event::HintHit { context, changes } = event {
                on_hit.borrow_mut().highlight(context, changes);
            }
        });

        let on_dehinted = Rc::clone(&state);
        bus.subscribe(EventKind::Dehinted, move |event| {
            if let Event::Dehinted { .. } = event {
                on_dehinted.borrow_mut().unmount();
            }
        });

        Self { state }
    }

    /// Whether a session is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().session.is_some()
    }
}

impl<S: Surface> ViewState<S> {
    fn mount(&mut self, context: &HintContext) {
        let mut surface = self.surface.borrow_mut();
        let scroll = context.page.scroll;

        surface.apply_style(&self.style);
        surface.show_overlay(context.page.viewport_rect());
        surface.hide_active_overlay();

        let mut badges = ListMap::new();
        for target in &context.targets {
            for rect in &target.rects {
                // Clamp into the viewport, then lift to absolute coordinates.
                let origin = Point::new(
                    rect.left.max(0.0) + scroll.x,
                    rect.top.max(0.0) + scroll.y,
                );
                let id = surface.place_badge(Badge {
                    target: target.id,
                    label: target.hint.to_uppercase(),
                    origin,
                    z_index: CANDIDATE_HINT_Z_INDEX,
                });
                badges.add(target.id, id);
            }
        }
        debug!(badges = badges.len(), "hints mounted");
        self.session = Some(RenderSession { badges });
    }

    fn highlight(&mut self, context: &HintContext, changes: &TargetStateChanges) {
        let Some(session) = &self.session else {
            panic!("illegal state: hint hit before hints were mounted");
        };
        let mut surface = self.surface.borrow_mut();

        for change in changes {
            for &badge in session.badges.get(&change.target) {
                surface.restyle_badge(badge, change.new, hint_z_index(change.new));
            }
        }

        let scroll = context.page.scroll;
        let live_rects = context
            .targets
            .iter()
            .filter(|t| t.state != TargetState::Disabled)
            .flat_map(|t| t.rects.iter());
        match crate::geom::bounding_rect(live_rects) {
            Some(bounds) => {
                let padded = bounds.translate(scroll).pad(OVERLAY_PADDING);
                surface.show_overlay(clamp_to_document(padded, context));
            }
            None => surface.hide_overlay(),
        }

        match context.hit().and_then(|t| t.bounding_rect()) {
            Some(bounds) => surface.show_active_overlay(bounds.translate(scroll)),
            None => surface.hide_active_overlay(),
        }
    }

    fn unmount(&mut self) {
        if self.session.is_none() {
            panic!("illegal state: dehinted before hints were mounted");
        }
        self.surface.borrow_mut().clear();
        self.session = None;
        debug!("hints unmounted");
    }
}

fn clamp_to_document(rect: Rect, context: &HintContext) -> Rect {
    let extent = context.page.scroll_size;
    Rect::new(
        rect.left.max(0.0),
        rect.top.max(0.0),
        rect.right.min(extent.width),
        rect.bottom.min(extent.height),
    )
}
