//! The hinting state machine.
//!
//! The `Hinter` owns the active session and is the only component that
//! mutates it. It moves between three states:
//!
//! ```text
//! Idle --attach_hints--> Active --resolve/cancel--> Resolved --> Idle
//! ```
//!
//! `attach_hints` scans the page and labels the targets; each accepted
//! keystroke narrows the candidate set; the session ends when the buffer
//! uniquely resolves a target, when it matches nothing, or on explicit
//! cancel. Every transition is announced on the injected event bus:
//! `Hinted` on open, `HintHit` per effective keystroke (including the
//! resolving one), `Dehinted` on close.
//!
//! Session-lifetime policies (deterministic by design):
//! - starting while a session is active is ignored, not an error;
//! - keystroke operations without a session are invalid-state errors;
//! - a session never expires on its own.

mod session;
mod target;

pub use session::HintContext;
pub use target::{
    DehintOptions, Target, TargetId, TargetState, TargetStateChange, TargetStateChanges,
};

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::error::{KeyhintError, KeyhintResult};
use crate::events::{Event, EventBus};
use crate::labels::{self, Alphabet};
use crate::page::Document;
use crate::scanner;

/// The keystroke-driven hint engine.
pub struct Hinter {
    bus: Rc<RefCell<EventBus>>,
    session: Option<HintContext>,
}

impl Hinter {
    /// Create a hinter publishing on `bus`. The bus lives exactly as long
    /// as the wiring that owns it; the hinter never stashes a global.
    pub fn new(bus: Rc<RefCell<EventBus>>) -> Self {
        Self { bus, session: None }
    }

    /// The event channel this hinter publishes on.
    pub fn bus(&self) -> &Rc<RefCell<EventBus>> {
        &self.bus
    }

    /// Whether a session is currently open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    pub fn context(&self) -> Option<&HintContext> {
        self.session.as_ref()
    }

    /// Open a session: scan `doc`, label every target, and emit `Hinted`.
    ///
    /// With zero discoverable targets no session opens and no event fires.
    /// Invoked while a session is already active, the call is ignored (the
    /// magic key does nothing until the session concludes).
    pub fn attach_hints(&mut self, doc: &Document, settings: &Settings) -> KeyhintResult<()> {
        if self.session.is_some() {
            debug!("hint session already active, start ignored");
            return Ok(());
        }

        let alphabet = Alphabet::new(&settings.alphabet)?;
        let scanned = scanner::scan(doc);
        if scanned.is_empty() {
            debug!("no actionable targets, session not opened");
            return Ok(());
        }

        let anchors: Vec<_> = scanned
            .iter()
            .map(|t| {
                t.rects
                    .first()
                    .map(|r| r.origin())
                    .unwrap_or(crate::geom::Point::ZERO)
            })
            .collect();
        let hints = labels::assign(&anchors, &alphabet, settings.label_order);

        let targets: Vec<Target> = scanned
            .into_iter()
            .zip(hints)
            .enumerate()
            .map(|(i, (scanned, hint))| Target {
                id: TargetId(i),
                node: scanned.node,
                hint,
                state: TargetState::Init,
                rects: scanned.rects,
                traits: scanned.traits,
            })
            .collect();

        info!(targets = targets.len(), "hint session opened");
        let session = self
            .session
            .insert(HintContext::new(targets, alphabet, doc.metrics()));
        self.bus
            .borrow_mut()
            .publish(&Event::Hinted { context: session });
        Ok(())
    }

    /// Feed one typed character into the open session.
    ///
    /// Characters outside the alphabet are ignored without an event, so
    /// unrelated shortcuts keep working while hints are up. An alphabet
    /// character narrows the candidate set and emits `HintHit` when any
    /// state changed; a unique full match resolves the session, an emptied
    /// candidate set cancels it; both emit `Dehinted` carrying `options`.
    pub fn hit_hint(&mut self, ch: char, options: DehintOptions) -> KeyhintResult<()> {
        let (changes, resolved, exhausted) = {
            let session = self
                .session
                .as_mut()
                .ok_or_else(|| invalid_state("hit_hint"))?;
            let Some(c) = session.alphabet.normalize(ch) else {
                trace!(character = %ch, "character outside alphabet ignored");
                return Ok(());
            };
            session.input.push(c);
            let changes = session.recompute();
            (
                changes,
                session.hit_target.is_some(),
                session.remaining_count() == 0,
            )
        };

        if !changes.is_empty() {
            if let Some(session) = self.session.as_ref() {
                self.bus.borrow_mut().publish(&Event::HintHit {
                    context: session,
                    changes: &changes,
                });
            }
        }

        if resolved {
            self.finish(options);
        } else if exhausted {
            debug!("typed input matches no hint, session canceled");
            self.finish(options);
        }
        Ok(())
    }

    /// Remove the last buffered character and widen the candidate set
    /// symmetrically. A backspace with an empty buffer is a no-op.
    pub fn backspace(&mut self) -> KeyhintResult<()> {
        let changes = {
            let session = self
                .session
                .as_mut()
                .ok_or_else(|| invalid_state("backspace"))?;
            if session.input.pop().is_none() {
                trace!("backspace with empty buffer ignored");
                return Ok(());
            }
            session.recompute()
        };

        if !changes.is_empty() {
            if let Some(session) = self.session.as_ref() {
                self.bus.borrow_mut().publish(&Event::HintHit {
                    context: session,
                    changes: &changes,
                });
            }
        }
        Ok(())
    }

    /// Cancel the open session explicitly (blur key). Emits `Dehinted` with
    /// no hit target and returns the machine to idle.
    pub fn remove_hints(&mut self, options: DehintOptions) -> KeyhintResult<()> {
        if self.session.is_none() {
            return Err(invalid_state("remove_hints"));
        }
        self.finish(options);
        Ok(())
    }

    /// Conclude the session: emit `Dehinted` and drop all session data.
    fn finish(&mut self, options: DehintOptions) {
        if let Some(session) = self.session.take() {
            info!(hit = ?session.hit_target.map(|t| t.0), "hint session closed");
            self.bus.borrow_mut().publish(&Event::Dehinted {
                context: &session,
                options,
            });
        }
    }
}

impl std::fmt::Debug for Hinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hinter")
            .field("active", &self.is_active())
            .finish()
    }
}

fn invalid_state(operation: &'static str) -> KeyhintError {
    KeyhintError::InvalidState {
        operation,
        expected: "active session",
        actual: "idle",
    }
}
