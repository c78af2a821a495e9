//! Shared fixtures and recording mocks for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use keyhint::action::{ActionSink, MouseEventType};
use keyhint::config::Settings;
use keyhint::geom::{Rect, Size};
use keyhint::hinter::{DehintOptions, TargetState};
use keyhint::page::{Document, Element, NodePath};
use keyhint::view::{Badge, BadgeId, FlashId, Surface};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Style,
    Overlay(Rect),
    OverlayHidden,
    ActiveOverlay(Rect),
    ActiveOverlayHidden,
    Badge(Badge),
    Restyle(BadgeId, TargetState),
    Clear,
    FlashBegin(Rect),
    FlashEnd(FlashId),
}

/// Surface that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
    pub badges: Vec<Badge>,
    next_badge: u64,
    next_flash: u64,
}

impl RecordingSurface {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn cleared(&self) -> bool {
        self.ops.last() == Some(&SurfaceOp::Clear)
    }

    pub fn restyles(&self) -> Vec<(BadgeId, TargetState)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Restyle(id, state) => Some((*id, *state)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn apply_style(&mut self, _style: &str) {
        self.ops.push(SurfaceOp::Style);
    }

    fn show_overlay(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::Overlay(rect));
    }

    fn hide_overlay(&mut self) {
        self.ops.push(SurfaceOp::OverlayHidden);
    }

    fn show_active_overlay(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::ActiveOverlay(rect));
    }

    fn hide_active_overlay(&mut self) {
        self.ops.push(SurfaceOp::ActiveOverlayHidden);
    }

    fn place_badge(&mut self, badge: Badge) -> BadgeId {
        let id = BadgeId(self.next_badge);
        self.next_badge += 1;
        self.ops.push(SurfaceOp::Badge(badge.clone()));
        self.badges.push(badge);
        id
    }

    fn restyle_badge(&mut self, id: BadgeId, state: TargetState, _z_index: i64) {
        self.ops.push(SurfaceOp::Restyle(id, state));
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn begin_blur_flash(&mut self, rect: Rect) -> FlashId {
        let id = FlashId(self.next_flash);
        self.next_flash += 1;
        self.ops.push(SurfaceOp::FlashBegin(rect));
        id
    }

    fn end_blur_flash(&mut self, id: FlashId) {
        self.ops.push(SurfaceOp::FlashEnd(id));
    }
}

/// Sink that records every interaction; one mouse step can be told to
/// report cancellation.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub focused: Vec<NodePath>,
    pub blurred: u32,
    pub mouse: Vec<(MouseEventType, NodePath, DehintOptions)>,
    pub cancel_at: Option<MouseEventType>,
    /// Rect reported for the element losing focus.
    pub focused_rect: Option<Rect>,
}

impl RecordingSink {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn mouse_steps(&self) -> Vec<MouseEventType> {
        self.mouse.iter().map(|(ev, _, _)| *ev).collect()
    }
}

impl ActionSink for RecordingSink {
    fn focus(&mut self, node: &NodePath) {
        self.focused.push(node.clone());
    }

    fn blur_active(&mut self) -> Option<Rect> {
        self.blurred += 1;
        self.focused_rect.take()
    }

    fn dispatch_mouse(
        &mut self,
        ev: MouseEventType,
        node: &NodePath,
        options: &DehintOptions,
    ) -> bool {
        self.mouse.push((ev, node.clone(), *options));
        self.cancel_at != Some(ev)
    }
}

/// Settings with a two-character alphabet, handy for small scenarios.
pub fn test_settings(alphabet: &str) -> Settings {
    Settings {
        alphabet: alphabet.to_string(),
        ..Settings::default()
    }
}

/// A page with three links stacked top to bottom, so reading order equals
/// document order and a two-character alphabet yields labels a / sa / ss.
pub fn three_link_document() -> Document {
    Document::new(
        Size::new(800.0, 600.0),
        Element::new("body").with_children(vec![
            link_at(10.0, "https://example.com/first"),
            link_at(40.0, "https://example.com/second"),
            link_at(70.0, "https://example.com/third"),
        ]),
    )
}

pub fn link_at(y: f64, href: &str) -> Element {
    Element::new("a")
        .with_href(href)
        .with_rect(Rect::new(10.0, y, 60.0, y + 15.0))
}

/// A page whose only target is a text input.
pub fn input_only_document() -> Document {
    Document::new(
        Size::new(800.0, 600.0),
        Element::new("body").with_children(vec![
            Element::new("input").with_rect(Rect::new(10.0, 10.0, 200.0, 40.0))
        ]),
    )
}
