//! Page snapshot model.
//!
//! The engine does not read a live DOM; it reads an owned snapshot of the
//! layout state an embedder captured: a tree of elements with their tags,
//! relevant attributes, computed-style bits, client rectangles, and scroll
//! extents, plus nested frames. Rectangles are viewport-relative, exactly as
//! a client-rect read reports them (the snapshot's `scroll` offset converts
//! them to document-absolute coordinates).
//!
//! The whole model derives serde traits so snapshots can be stored as JSON
//! fixtures and fed to the demo binary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect, Size};

/// Overflow behavior of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether content beyond the element's bounds is clipped away.
    pub fn clips(&self) -> bool {
        !matches!(self, Overflow::Visible)
    }

    /// Whether the element can be scrolled on this axis.
    pub fn scrolls(&self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

/// The subset of computed style the scanner cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    /// `cursor: pointer`, a strong hint of a click contract.
    pub cursor_pointer: bool,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

/// The subset of attributes the scanner cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub role: Option<String>,
    pub tabindex: Option<i32>,
    pub href: Option<String>,
    pub content_editable: bool,
}

/// Content of a frame element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameContent {
    /// A same-origin subdocument whose layout is readable.
    Document(Box<Document>),
    /// An isolated frame whose content cannot be introspected.
    CrossOrigin,
}

/// One element in the snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub attrs: Attributes,
    #[serde(default)]
    pub style: ComputedStyle,
    /// Viewport-relative client rects. Wrapped inline content may have
    /// several; wrapper elements may have none.
    #[serde(default)]
    pub rects: Vec<Rect>,
    /// Scrollable content extent (scrollWidth/scrollHeight).
    #[serde(default)]
    pub scroll_size: Size,
    /// Inner box extent (clientWidth/clientHeight).
    #[serde(default)]
    pub client_size: Size,
    /// The embedder observed a click listener on this element.
    #[serde(default)]
    pub has_click_handler: bool,
    /// Present on `iframe`/`frame` elements.
    #[serde(default)]
    pub frame: Option<FrameContent>,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attributes::default(),
            style: ComputedStyle::default(),
            rects: Vec::new(),
            scroll_size: Size::default(),
            client_size: Size::default(),
            has_click_handler: false,
            frame: None,
            children: Vec::new(),
        }
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn with_rects(mut self, rects: Vec<Rect>) -> Self {
        self.rects = rects;
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.attrs.href = Some(href.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.attrs.role = Some(role.into());
        self
    }

    pub fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.attrs.tabindex = Some(tabindex);
        self
    }

    pub fn with_content_editable(mut self) -> Self {
        self.attrs.content_editable = true;
        self
    }

    pub fn with_click_handler(mut self) -> Self {
        self.has_click_handler = true;
        self
    }

    pub fn with_cursor_pointer(mut self) -> Self {
        self.style.cursor_pointer = true;
        self
    }

    pub fn with_overflow(mut self, x: Overflow, y: Overflow) -> Self {
        self.style.overflow_x = x;
        self.style.overflow_y = y;
        self
    }

    /// Set scroll and client extents together (what scrollability compares).
    pub fn with_scroll_extent(mut self, scroll: Size, client: Size) -> Self {
        self.scroll_size = scroll;
        self.client_size = client;
        self
    }

    pub fn with_frame(mut self, content: FrameContent) -> Self {
        self.frame = Some(content);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Union of the element's client rects.
    pub fn bounding_rect(&self) -> Option<Rect> {
        crate::geom::bounding_rect(self.rects.iter())
    }
}

/// A captured document: viewport, scroll state, and the element tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Visual viewport size.
    pub viewport: Size,
    /// Current scroll offset (scrollX/scrollY).
    #[serde(default)]
    pub scroll: Point,
    /// Full scrollable extent of the document.
    #[serde(default)]
    pub scroll_size: Size,
    /// The root (body) element.
    pub root: Element,
}

impl Document {
    pub fn new(viewport: Size, root: Element) -> Self {
        Self {
            viewport,
            scroll: Point::ZERO,
            scroll_size: viewport,
            root,
        }
    }

    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_scroll_size(mut self, scroll_size: Size) -> Self {
        self.scroll_size = scroll_size;
        self
    }

    /// The scroll/viewport numbers a view needs for coordinate conversion.
    pub fn metrics(&self) -> PageMetrics {
        PageMetrics {
            viewport: self.viewport,
            scroll: self.scroll,
            scroll_size: self.scroll_size,
        }
    }

    /// Look up an element by path. Paths cross into same-origin frame
    /// documents; a path into a cross-origin frame resolves to `None`.
    pub fn resolve(&self, path: &NodePath) -> Option<&Element> {
        let mut segments = path.0.iter();
        if *segments.next()? != 0 {
            return None;
        }
        let mut current = &self.root;
        for &idx in segments {
            if let Some(FrameContent::Document(doc)) = &current.frame {
                // Inside a frame the next segment addresses the subdocument
                // root (always 0), not a child of the frame element.
                if idx != 0 {
                    return None;
                }
                current = &doc.root;
            } else {
                current = current.children.get(idx)?;
            }
        }
        Some(current)
    }
}

/// Scroll and viewport metrics captured with a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub viewport: Size,
    pub scroll: Point,
    pub scroll_size: Size,
}

impl PageMetrics {
    /// The viewport rectangle in document-absolute coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_origin_size(self.scroll, self.viewport)
    }
}

/// Identity of an element within a snapshot: the child-index path from the
/// document root, crossing into frame subdocuments (a frame's content root
/// is addressed as its segment `0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(vec![0])
    }

    pub fn child(&self, idx: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(idx);
        NodePath(segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.0 {
            write!(f, "/{}", seg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Document {
        let link = Element::new("a")
            .with_href("https://example.com")
            .with_rect(Rect::new(0.0, 0.0, 50.0, 20.0));
        let button = Element::new("button").with_rect(Rect::new(0.0, 30.0, 40.0, 50.0));
        let body = Element::new("body").with_children(vec![link, button]);
        Document::new(Size::new(800.0, 600.0), body)
    }

    #[test]
    fn test_resolve_root() {
        let doc = sample_doc();
        let root = doc.resolve(&NodePath::root()).expect("root resolves");
        assert_eq!(root.tag, "body");
    }

    #[test]
    fn test_resolve_child_path() {
        let doc = sample_doc();
        let link = doc
            .resolve(&NodePath(vec![0, 0]))
            .expect("first child resolves");
        assert_eq!(link.tag, "a");
        let button = doc.resolve(&NodePath(vec![0, 1])).expect("second child");
        assert_eq!(button.tag, "button");
    }

    #[test]
    fn test_resolve_out_of_range() {
        let doc = sample_doc();
        assert!(doc.resolve(&NodePath(vec![0, 5])).is_none());
        assert!(doc.resolve(&NodePath(vec![1])).is_none());
        assert!(doc.resolve(&NodePath(vec![])).is_none());
    }

    #[test]
    fn test_resolve_into_frame() {
        let inner_link = Element::new("a")
            .with_href("#")
            .with_rect(Rect::new(5.0, 5.0, 25.0, 15.0));
        let inner_doc = Document::new(
            Size::new(200.0, 100.0),
            Element::new("body").with_children(vec![inner_link]),
        );
        let frame = Element::new("iframe")
            .with_rect(Rect::new(100.0, 100.0, 300.0, 200.0))
            .with_frame(FrameContent::Document(Box::new(inner_doc)));
        let doc = Document::new(
            Size::new(800.0, 600.0),
            Element::new("body").with_children(vec![frame]),
        );

        // /0/0 is the frame, /0/0/0 its content root, /0/0/0/0 the link.
        assert_eq!(doc.resolve(&NodePath(vec![0, 0])).map(|e| e.tag.as_str()), Some("iframe"));
        assert_eq!(
            doc.resolve(&NodePath(vec![0, 0, 0])).map(|e| e.tag.as_str()),
            Some("body")
        );
        assert_eq!(
            doc.resolve(&NodePath(vec![0, 0, 0, 0])).map(|e| e.tag.as_str()),
            Some("a")
        );
    }

    #[test]
    fn test_resolve_cross_origin_frame_content_is_none() {
        let frame = Element::new("iframe")
            .with_rect(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_frame(FrameContent::CrossOrigin);
        let doc = Document::new(
            Size::new(800.0, 600.0),
            Element::new("body").with_children(vec![frame]),
        );
        assert!(doc.resolve(&NodePath(vec![0, 0])).is_some());
        assert!(doc.resolve(&NodePath(vec![0, 0, 0])).is_none());
    }

    #[test]
    fn test_node_path_display() {
        assert_eq!(NodePath(vec![0, 2, 1]).to_string(), "/0/2/1");
    }

    #[test]
    fn test_metrics_viewport_rect() {
        let doc = sample_doc().with_scroll(Point::new(0.0, 250.0));
        let m = doc.metrics();
        assert_eq!(m.viewport_rect(), Rect::new(0.0, 250.0, 800.0, 850.0));
    }

    #[test]
    fn test_document_json_round_trip() {
        let doc = sample_doc();
        let json = serde_json::to_string_pretty(&doc).expect("serialize");
        let back: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(doc, back);
    }

    #[test]
    fn test_document_deserializes_with_defaults() {
        let json = r#"{
            "viewport": { "width": 1024.0, "height": 768.0 },
            "root": { "tag": "body" }
        }"#;
        let doc: Document = serde_json::from_str(json).expect("minimal document parses");
        assert_eq!(doc.scroll, Point::ZERO);
        assert!(doc.root.children.is_empty());
        assert!(!doc.root.has_click_handler);
    }
}
