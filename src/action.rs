//! Action dispatch: performing the real interaction for a resolved target.
//!
//! The dispatcher observes `Dehinted` and acts through an [`ActionSink`]
//! the embedder supplies. Precedence mirrors how the kinds of target are
//! actually used: a scrollable container or editable field wants focus, the
//! body wants the current focus dropped, a frame wants focus, and anything
//! else gets a synthesized pointer sequence.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info};

use crate::events::{Event, EventBus, EventKind};
use crate::geom::Rect;
use crate::hinter::{DehintOptions, Target};
use crate::page::NodePath;

/// Steps of the synthesized pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventType {
    Over,
    Down,
    Up,
    Click,
}

impl fmt::Display for MouseEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseEventType::Over => "mouseover",
            MouseEventType::Down => "mousedown",
            MouseEventType::Up => "mouseup",
            MouseEventType::Click => "click",
        };
        f.write_str(name)
    }
}

/// What the embedder can do to the page on the engine's behalf.
pub trait ActionSink {
    /// Give keyboard focus to an element. For a scrollable container the
    /// sink is expected to make it focusable first (the transient
    /// `tabindex="-1"` trick) so it scrolls from the keyboard.
    fn focus(&mut self, node: &NodePath);

    /// Drop focus from the active element. Returns the blurred element's
    /// viewport rect, or `None` when nothing was focused.
    fn blur_active(&mut self) -> Option<Rect>;

    /// Dispatch one synthesized mouse event. Returns `false` when the page
    /// canceled it (standard event-cancellation semantics).
    fn dispatch_mouse(&mut self, ev: MouseEventType, node: &NodePath, options: &DehintOptions)
        -> bool;
}

/// How a dispatch concluded. A canceled click is a normal outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Focused,
    ActiveBlurred,
    Clicked,
    /// The page canceled this step; no click was performed.
    ClickCanceled(MouseEventType),
}

/// Performs the resolved interaction. Subscribes itself on construction.
pub struct Dispatcher<A> {
    sink: Rc<RefCell<A>>,
    last: Rc<RefCell<Option<DispatchOutcome>>>,
}

impl<A: ActionSink + 'static> Dispatcher<A> {
    pub fn new(bus: &mut EventBus, sink: Rc<RefCell<A>>) -> Self {
        let last: Rc<RefCell<Option<DispatchOutcome>>> = Rc::new(RefCell::new(None));

        let handler_sink = Rc::clone(&sink);
        let handler_last = Rc::clone(&last);
        bus.subscribe(EventKind::Dehinted, move |event| {
            if let Event::Dehinted { context, options } = event {
                let outcome = context
                    .hit()
                    .map(|target| dispatch(&mut *handler_sink.borrow_mut(), target, options));
                *handler_last.borrow_mut() = outcome;
            }
        });

        Self { sink, last }
    }

    /// The sink this dispatcher acts through.
    pub fn sink(&self) -> &Rc<RefCell<A>> {
        &self.sink
    }

    /// Outcome of the most recent `Dehinted` with a hit target; `None`
    /// after a cancel.
    pub fn last_outcome(&self) -> Option<DispatchOutcome> {
        *self.last.borrow()
    }
}

fn dispatch<A: ActionSink>(
    sink: &mut A,
    target: &Target,
    options: &DehintOptions,
) -> DispatchOutcome {
    info!(target = %target.id, node = %target.node, "hit");

    if target.traits.scrollable {
        debug!("focus as a scrollable element");
        sink.focus(&target.node);
        return DispatchOutcome::Focused;
    }
    if target.traits.editable {
        debug!("focus as an editable element");
        sink.focus(&target.node);
        return DispatchOutcome::Focused;
    }
    if target.traits.root {
        debug!("blur the active element");
        sink.blur_active();
        return DispatchOutcome::ActiveBlurred;
    }
    if target.traits.frame {
        debug!("focus as a frame");
        sink.focus(&target.node);
        return DispatchOutcome::Focused;
    }

    simulate_click(sink, &target.node, options)
}

fn simulate_click<A: ActionSink>(
    sink: &mut A,
    node: &NodePath,
    options: &DehintOptions,
) -> DispatchOutcome {
    // Ctrl implies meta on the click events so "open in new tab" works on
    // every platform.
    let options = DehintOptions {
        meta: options.meta || options.ctrl,
        ..*options
    };

    // Cancellation of the hover step is not meaningful.
    sink.dispatch_mouse(MouseEventType::Over, node, &options);

    for ev in [
        MouseEventType::Down,
        MouseEventType::Up,
        MouseEventType::Click,
    ] {
        if !sink.dispatch_mouse(ev, node, &options) {
            debug!(step = %ev, "canceled");
            return DispatchOutcome::ClickCanceled(ev);
        }
    }
    debug!("click");
    DispatchOutcome::Clicked
}
