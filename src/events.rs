//! Synchronous publish/subscribe channel.
//!
//! The bus is an explicitly owned object injected into whatever publishes
//! on it: created with the engine wiring and torn down with it; there
//! is no process-wide channel. Handlers for one event kind run synchronously
//! in subscription order; no ordering holds across different kinds.
//!
//! Event payloads borrow session data. A handler receives `&Event<'_>` and
//! cannot move targets out of it, which enforces the session-lifetime rule:
//! nothing outlives the `Dehinted` event it arrived in.

use crate::collections::ListMap;
use crate::geom::Rect;
use crate::hinter::{DehintOptions, HintContext, TargetStateChanges};

/// Names of the events the engine publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A session opened: all targets are labeled and ready to render.
    Hinted,
    /// A keystroke changed at least one target's state.
    HintHit,
    /// The session concluded, with or without a hit.
    Dehinted,
    /// The active element was blurred outside a session.
    Blured,
}

/// An engine event. Borrowed payloads keep subscribers from retaining
/// session data past delivery.
#[derive(Debug)]
pub enum Event<'a> {
    Hinted {
        context: &'a HintContext,
    },
    HintHit {
        context: &'a HintContext,
        changes: &'a TargetStateChanges,
    },
    Dehinted {
        context: &'a HintContext,
        options: DehintOptions,
    },
    Blured {
        /// Document-absolute rect of the element that lost focus.
        rect: Option<Rect>,
    },
}

impl Event<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Hinted { .. } => EventKind::Hinted,
            Event::HintHit { .. } => EventKind::HintHit,
            Event::Dehinted { .. } => EventKind::Dehinted,
            Event::Blured { .. } => EventKind::Blured,
        }
    }
}

type Handler = Box<dyn FnMut(&Event<'_>)>;

/// The event channel connecting the Hinter to its observers.
#[derive(Default)]
pub struct EventBus {
    handlers: ListMap<EventKind, Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: ListMap::new(),
        }
    }

    /// Register a handler for one event kind. Handlers fire synchronously,
    /// in subscription order.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        self.handlers.add(kind, Box::new(handler));
    }

    /// Deliver an event to every handler subscribed to its kind.
    pub fn publish(&mut self, event: &Event<'_>) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_fire_in_subscription_order() {
        let mut bus = EventBus::new();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        bus.subscribe(EventKind::Blured, move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        bus.subscribe(EventKind::Blured, move |_| {
            second.borrow_mut().push("second")
        });

        bus.publish(&Event::Blured { rect: None });
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_no_cross_kind_delivery() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        bus.subscribe(EventKind::Hinted, move |_| *counter.borrow_mut() += 1);

        bus.publish(&Event::Blured { rect: None });
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let mut bus = EventBus::new();
        bus.publish(&Event::Blured {
            rect: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
        });
        assert_eq!(bus.handler_count(EventKind::Blured), 0);
    }

    #[test]
    fn test_handler_sees_payload() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&seen);
        bus.subscribe(EventKind::Blured, move |event| {
            if let Event::Blured { rect } = event {
                *sink.borrow_mut() = *rect;
            }
        });

        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        bus.publish(&Event::Blured { rect: Some(rect) });
        assert_eq!(*seen.borrow(), Some(rect));
    }

    #[test]
    fn test_handler_count() {
        let mut bus = EventBus::new();
        assert_eq!(bus.handler_count(EventKind::HintHit), 0);
        bus.subscribe(EventKind::HintHit, |_| {});
        bus.subscribe(EventKind::HintHit, |_| {});
        assert_eq!(bus.handler_count(EventKind::HintHit), 2);
    }
}
