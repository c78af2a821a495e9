//! Body-level focus dropping.
//!
//! The blurer is usable outside a hint session: it asks the sink to blur
//! whatever holds focus and announces `Blured` with the blurred element's
//! document-absolute rect so the view can flash it.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::action::ActionSink;
use crate::events::{Event, EventBus};
use crate::page::PageMetrics;

pub struct Blurer<A> {
    bus: Rc<RefCell<EventBus>>,
    sink: Rc<RefCell<A>>,
}

impl<A: ActionSink> Blurer<A> {
    pub fn new(bus: Rc<RefCell<EventBus>>, sink: Rc<RefCell<A>>) -> Self {
        Self { bus, sink }
    }

    /// Blur the active element and publish `Blured`. The rect is `None`
    /// when nothing held focus.
    pub fn blur(&self, metrics: &PageMetrics) {
        let rect = self
            .sink
            .borrow_mut()
            .blur_active()
            .map(|r| r.translate(metrics.scroll));
        debug!(blurred = rect.is_some(), "blur requested");
        self.bus.borrow_mut().publish(&Event::Blured { rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MouseEventType;
    use crate::events::EventKind;
    use crate::geom::{Point, Rect, Size};
    use crate::hinter::DehintOptions;
    use crate::page::NodePath;

    struct FocusedSink {
        rect: Option<Rect>,
    }

    impl ActionSink for FocusedSink {
        fn focus(&mut self, _node: &NodePath) {}

        fn blur_active(&mut self) -> Option<Rect> {
            self.rect.take()
        }

        fn dispatch_mouse(
            &mut self,
            _ev: MouseEventType,
            _node: &NodePath,
            _options: &DehintOptions,
        ) -> bool {
            true
        }
    }

    fn metrics() -> PageMetrics {
        PageMetrics {
            viewport: Size::new(800.0, 600.0),
            scroll: Point::new(0.0, 100.0),
            scroll_size: Size::new(800.0, 2000.0),
        }
    }

    fn recorded_blurs(bus: &Rc<RefCell<EventBus>>) -> Rc<RefCell<Vec<Option<Rect>>>> {
        let log: Rc<RefCell<Vec<Option<Rect>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        bus.borrow_mut().subscribe(EventKind::Blured, move |event| {
            if let Event::Blured { rect } = event {
                sink.borrow_mut().push(*rect);
            }
        });
        log
    }

    #[test]
    fn test_blur_publishes_absolute_rect() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let log = recorded_blurs(&bus);
        let sink = Rc::new(RefCell::new(FocusedSink {
            rect: Some(Rect::new(10.0, 20.0, 50.0, 40.0)),
        }));

        Blurer::new(Rc::clone(&bus), sink).blur(&metrics());

        // Viewport rect lifted by the scroll offset.
        assert_eq!(
            *log.borrow(),
            vec![Some(Rect::new(10.0, 120.0, 50.0, 140.0))]
        );
    }

    #[test]
    fn test_blur_with_nothing_focused_publishes_none() {
        let bus = Rc::new(RefCell::new(EventBus::new()));
        let log = recorded_blurs(&bus);
        let sink = Rc::new(RefCell::new(FocusedSink { rect: None }));

        Blurer::new(Rc::clone(&bus), sink).blur(&metrics());

        assert_eq!(*log.borrow(), vec![None]);
    }
}
