//! Target discovery.
//!
//! Walks a page snapshot (and any readable nested frames) and produces the
//! ordered list of actionable elements visible in the viewport, each
//! normalized to one or more visible viewport-relative rectangles.
//!
//! The walk is a pure read: it never mutates the snapshot. A frame whose
//! content cannot be introspected is skipped, not an error.

use tracing::{debug, trace};

use crate::geom::{Point, Rect};
use crate::page::{Document, Element, FrameContent, NodePath};

/// Scrollability requires the scroll extent to exceed the client extent by
/// more than this many pixels on a scrollable-overflow axis.
const SCROLLABLE_SLACK: f64 = 10.0;

/// How an element can be acted upon, as derived by the scanner.
///
/// The flags are not mutually exclusive; the action dispatcher applies its
/// precedence (scrollable, editable, root, frame, then click).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actionability {
    /// Link, button, form control, or a click-handler contract (observed
    /// listener, pointer cursor, `role`, or non-negative `tabindex`).
    pub clickable: bool,
    /// Independently scrollable container.
    pub scrollable: bool,
    /// Text-entry control or `contenteditable`.
    pub editable: bool,
    /// The document body.
    pub root: bool,
    /// A frame element (focusable even when its content is opaque).
    pub frame: bool,
}

impl Actionability {
    /// Whether the element is a hinting target at all.
    pub fn qualifies(&self) -> bool {
        self.clickable || self.scrollable || self.editable || self.frame
    }
}

/// One actionable element found by a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedTarget {
    pub node: NodePath,
    /// Visible rects, viewport-relative to the top document, already clipped
    /// against the viewport and every clipping ancestor.
    pub rects: Vec<Rect>,
    pub traits: Actionability,
}

/// Scan a document for actionable elements, in document order.
pub fn scan(doc: &Document) -> Vec<ScannedTarget> {
    let viewport = Rect::from_origin_size(Point::ZERO, doc.viewport);
    let mut out = Vec::new();
    walk(&doc.root, NodePath::root(), Point::ZERO, viewport, &mut out);
    debug!(targets = out.len(), "scan complete");
    out
}

fn walk(el: &Element, path: NodePath, offset: Point, clip: Rect, out: &mut Vec<ScannedTarget>) {
    let rects: Vec<Rect> = el
        .rects
        .iter()
        .map(|r| r.translate(offset))
        .filter_map(|r| r.intersection(&clip))
        .collect();

    let traits = classify(el);
    if traits.qualifies() {
        if rects.is_empty() {
            trace!(%path, tag = %el.tag, "actionable element fully clipped, skipping");
        } else {
            out.push(ScannedTarget {
                node: path.clone(),
                rects,
                traits,
            });
        }
    }

    // Children of a clipping container are confined to its visible bounds.
    let mut child_clip = clip;
    if el.style.overflow_x.clips() || el.style.overflow_y.clips() {
        if let Some(bounds) = el.bounding_rect() {
            match bounds.translate(offset).intersection(&child_clip) {
                Some(c) => child_clip = c,
                None => {
                    trace!(%path, tag = %el.tag, "clipping container out of view, pruning subtree");
                    return;
                }
            }
        }
    }

    match &el.frame {
        Some(FrameContent::Document(sub)) => {
            if let Some(bounds) = el.bounding_rect() {
                let frame_rect = bounds.translate(offset);
                if let Some(frame_clip) = frame_rect.intersection(&child_clip) {
                    walk(
                        &sub.root,
                        path.child(0),
                        frame_rect.origin(),
                        frame_clip,
                        out,
                    );
                }
            }
        }
        Some(FrameContent::CrossOrigin) => {
            debug!(%path, "cross-origin frame, content not scanned");
        }
        None => {}
    }

    for (i, child) in el.children.iter().enumerate() {
        walk(child, path.child(i), offset, child_clip, out);
    }
}

fn classify(el: &Element) -> Actionability {
    let tag = el.tag.as_str();
    let link = tag == "a" && el.attrs.href.is_some();
    let form_control = matches!(tag, "button" | "input" | "select" | "textarea");
    let click_contract = el.has_click_handler
        || el.style.cursor_pointer
        || el.attrs.role.is_some()
        || el.attrs.tabindex.is_some_and(|t| t >= 0);

    Actionability {
        clickable: link || form_control || click_contract,
        scrollable: is_scrollable(el),
        editable: is_editable(el),
        root: tag == "body",
        frame: el.frame.is_some() || matches!(tag, "iframe" | "frame"),
    }
}

fn is_scrollable(el: &Element) -> bool {
    let vertical = el.scroll_size.height - el.client_size.height > SCROLLABLE_SLACK
        && el.style.overflow_y.scrolls();
    let horizontal = el.scroll_size.width - el.client_size.width > SCROLLABLE_SLACK
        && el.style.overflow_x.scrolls();
    vertical || horizontal
}

fn is_editable(el: &Element) -> bool {
    matches!(el.tag.as_str(), "input" | "textarea") || el.attrs.content_editable
}
