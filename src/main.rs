//! Interactive demo: hint a page snapshot from the terminal.
//!
//! Loads a snapshot (a JSON file given as the first argument, or the
//! bundled sample page), wires the engine to console-printing collaborators
//! and runs a raw-mode key loop. Press the magic key (Space by default) to
//! hint, type a label to activate a target, Escape to cancel, Ctrl+C to
//! quit.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use color_eyre::Result;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing_subscriber::EnvFilter;

use keyhint::action::{ActionSink, Dispatcher, MouseEventType};
use keyhint::blurer::Blurer;
use keyhint::config::SettingsStore;
use keyhint::events::EventBus;
use keyhint::geom::Rect;
use keyhint::hinter::{DehintOptions, Hinter, TargetState};
use keyhint::input::{EngineOp, InputRouter};
use keyhint::page::{Document, NodePath};
use keyhint::view::{Badge, BadgeId, BlurView, FlashId, HintsView, Surface};

const SAMPLE_PAGE: &str = include_str!("../demos/sample_page.json");

/// Raw mode needs explicit carriage returns.
fn say(line: impl AsRef<str>) {
    print!("{}\r\n", line.as_ref());
    let _ = std::io::stdout().flush();
}

/// Surface that narrates every drawing operation.
#[derive(Default)]
struct ConsoleSurface {
    next_badge: u64,
    next_flash: u64,
}

impl Surface for ConsoleSurface {
    fn apply_style(&mut self, style: &str) {
        say(format!("[surface] style installed ({} bytes)", style.len()));
    }

    fn show_overlay(&mut self, rect: Rect) {
        say(format!(
            "[surface] overlay at ({:.0},{:.0}) {:.0}x{:.0}",
            rect.left,
            rect.top,
            rect.width(),
            rect.height()
        ));
    }

    fn hide_overlay(&mut self) {
        say("[surface] overlay hidden");
    }

    fn show_active_overlay(&mut self, rect: Rect) {
        say(format!(
            "[surface] active overlay at ({:.0},{:.0}) {:.0}x{:.0}",
            rect.left,
            rect.top,
            rect.width(),
            rect.height()
        ));
    }

    fn hide_active_overlay(&mut self) {
        say("[surface] active overlay hidden");
    }

    fn place_badge(&mut self, badge: Badge) -> BadgeId {
        say(format!(
            "[surface] hint {:<4} at ({:.0},{:.0})",
            badge.label, badge.origin.x, badge.origin.y
        ));
        let id = BadgeId(self.next_badge);
        self.next_badge += 1;
        id
    }

    fn restyle_badge(&mut self, id: BadgeId, state: TargetState, _z_index: i64) {
        say(format!("[surface] badge {} -> {}", id.0, state));
    }

    fn clear(&mut self) {
        say("[surface] cleared");
    }

    fn begin_blur_flash(&mut self, rect: Rect) -> FlashId {
        say(format!(
            "[surface] blur flash at ({:.0},{:.0})",
            rect.left, rect.top
        ));
        let id = FlashId(self.next_flash);
        self.next_flash += 1;
        id
    }

    fn end_blur_flash(&mut self, id: FlashId) {
        say(format!("[surface] blur flash {} removed", id.0));
    }
}

/// Sink that narrates the real-world effect instead of performing it.
struct ConsoleSink;

impl ActionSink for ConsoleSink {
    fn focus(&mut self, node: &NodePath) {
        say(format!("[action] focus {}", node));
    }

    fn blur_active(&mut self) -> Option<Rect> {
        say("[action] blur active element");
        None
    }

    fn dispatch_mouse(
        &mut self,
        ev: MouseEventType,
        node: &NodePath,
        options: &DehintOptions,
    ) -> bool {
        let mods = [
            (options.ctrl, "ctrl"),
            (options.shift, "shift"),
            (options.alt, "alt"),
            (options.meta, "meta"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join("+");
        say(format!(
            "[action] {} on {}{}",
            ev,
            node,
            if mods.is_empty() {
                String::new()
            } else {
                format!(" ({})", mods)
            }
        ));
        true
    }
}

fn load_document() -> Result<Document> {
    let doc = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        None => serde_json::from_str(SAMPLE_PAGE)?,
    };
    Ok(doc)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let doc = load_document()?;
    let store = SettingsStore::new()?;
    let settings = store.load_or_seed()?;

    let bus = Rc::new(RefCell::new(EventBus::new()));
    let surface = Rc::new(RefCell::new(ConsoleSurface::default()));
    let sink = Rc::new(RefCell::new(ConsoleSink));

    let _hints_view = HintsView::new(
        &mut bus.borrow_mut(),
        Rc::clone(&surface),
        settings.style.clone(),
    );
    let _blur_view = BlurView::new(&mut bus.borrow_mut(), Rc::clone(&surface));
    let _dispatcher = Dispatcher::new(&mut bus.borrow_mut(), Rc::clone(&sink));
    let blurer = Blurer::new(Rc::clone(&bus), sink);
    let mut hinter = Hinter::new(bus);
    let mut router = InputRouter::from_settings(&settings)?;

    say(format!(
        "keyhint demo - magic key: {}, alphabet: {}, Ctrl+C quits",
        settings.magic_key, settings.alphabet
    ));

    enable_raw_mode()?;
    let result = run(&store, &doc, &mut hinter, &blurer, &mut router);
    disable_raw_mode()?;
    result
}

fn run(
    store: &SettingsStore,
    doc: &Document,
    hinter: &mut Hinter,
    blurer: &Blurer<ConsoleSink>,
    router: &mut InputRouter,
) -> Result<()> {
    loop {
        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            say("bye");
            return Ok(());
        }

        let Some(op) = router.route(&key, hinter.is_active()) else {
            continue;
        };
        match op {
            EngineOp::AttachHints => {
                // Settings are re-read once per session start.
                let settings = store.load_or_seed()?;
                *router = InputRouter::from_settings(&settings)?;
                hinter.attach_hints(doc, &settings)?;
                if !hinter.is_active() {
                    say("no targets to hint");
                }
            }
            EngineOp::HitHint { ch, options } => {
                hinter.hit_hint(ch, options)?;
                if let Some(context) = hinter.context() {
                    say(format!("buffer: {:?}", context.input));
                }
            }
            EngineOp::Backspace => hinter.backspace()?,
            EngineOp::RemoveHints { options } => hinter.remove_hints(options)?,
            EngineOp::Blur => blurer.blur(&doc.metrics()),
        }
    }
}
