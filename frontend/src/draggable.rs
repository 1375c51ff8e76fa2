//! Mouse-driven dragging with a ghost placeholder
//!
//! Data flows: mousedown on proto → ghost shown, document listeners attached
//! → mousemove moves ghost → mouseup reports ghost rect, ghost removed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared::{DragConfig, DragTracker, Rect};
use web_sys::{HtmlElement, MouseEvent};

use crate::dataflow::Relay;
use crate::dom::{self, EventListener};
use crate::error::DragError;
use crate::ghost::{Ghost, GhostParams};
use crate::logging::{Throttle, log_critical, log_info};

type DropCallback = Rc<dyn Fn(Rect)>;
type DragCallback = Rc<dyn Fn()>;

pub struct DraggableParams {
    container: Option<HtmlElement>,
    on_drop: DropCallback,
    on_drag: DragCallback,
    config: DragConfig,
}

impl Default for DraggableParams {
    fn default() -> Self {
        Self {
            container: None,
            on_drop: Rc::new(|_| {}),
            on_drag: Rc::new(|| {}),
            config: DragConfig::default(),
        }
    }
}

impl DraggableParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element the ghost lives in during a drag; `document.body` when unset
    pub fn container(mut self, container: HtmlElement) -> Self {
        self.container = Some(container);
        self
    }

    pub fn on_drop(mut self, on_drop: impl Fn(Rect) + 'static) -> Self {
        self.on_drop = Rc::new(on_drop);
        self
    }

    pub fn on_drag(mut self, on_drag: impl Fn() + 'static) -> Self {
        self.on_drag = Rc::new(on_drag);
        self
    }

    pub fn config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes both callbacks into relays
    pub fn with_relays(self, drag_started_relay: Relay<()>, dropped_relay: Relay<Rect>) -> Self {
        self.on_drag(move || drag_started_relay.send(()))
            .on_drop(move |rect| dropped_relay.send(rect))
    }
}

struct DragCore {
    proto: HtmlElement,
    ghost: Ghost,
    tracker: DragTracker,
    on_drop: DropCallback,
    on_drag: DragCallback,
    move_throttle: Throttle,
    trace_moves: bool,
    // Document listeners, attached only while a drag is active
    move_listener: Option<EventListener>,
    release_listener: Option<EventListener>,
}

impl DragCore {
    fn attach_document_listeners(&mut self) {
        for listener in [&mut self.move_listener, &mut self.release_listener].into_iter().flatten() {
            listener.attach();
        }
    }

    fn detach_document_listeners(&mut self) {
        for listener in [&mut self.move_listener, &mut self.release_listener].into_iter().flatten() {
            listener.detach();
        }
    }

    fn start_drag(&mut self, event: &MouseEvent) -> Result<(), DragError> {
        let started = self.begin_drag(event);
        self.rollback_on_error(started)
    }

    fn begin_drag(&mut self, event: &MouseEvent) -> Result<(), DragError> {
        self.ghost.attach()?;
        let target_rect = dom::client_rect(&self.proto);
        let start = self.tracker.begin(dom::pointer_position(event), target_rect);

        self.ghost.set_size(start.ghost_size)?;
        self.ghost.place(start.ghost_origin)?;
        self.attach_document_listeners();
        Ok(())
    }

    fn track(&mut self, event: &MouseEvent) -> Result<(), DragError> {
        let Some(origin) = self.tracker.ghost_origin(dom::pointer_position(event)) else {
            return Ok(());
        };
        self.ghost.place(origin)?;
        if self.trace_moves {
            self.move_throttle
                .log(&format!("ghost at ({}, {})", origin.x, origin.y));
        }
        Ok(())
    }

    /// Returns the ghost rect to report, `None` when no drag was active
    fn finish_drag(&mut self) -> Option<Rect> {
        if !self.tracker.release() {
            return None;
        }
        self.detach_document_listeners();
        Some(self.ghost.relative_rect())
    }

    /// Leaves the idle state behind: no drag point, no document listeners,
    /// no ghost in the container
    fn abandon_drag(&mut self) -> Result<(), DragError> {
        self.tracker.reset();
        self.detach_document_listeners();
        self.ghost.detach()
    }

    fn rollback_on_error<T>(&mut self, result: Result<T, DragError>) -> Result<T, DragError> {
        if result.is_err() {
            if let Err(error) = self.abandon_drag() {
                log_critical(&format!("drag rollback failed: {error}"));
            }
        }
        result
    }
}

/// Makes `proto` draggable. Dropping the value detaches everything.
pub struct Draggable {
    core: Rc<RefCell<DragCore>>,
    press_listener: EventListener,
}

impl Draggable {
    pub fn new(proto: HtmlElement, params: DraggableParams) -> Result<Self, DragError> {
        let DraggableParams { container, on_drop, on_drag, config } = params;
        config.validate()?;

        let container = match container {
            Some(container) => container,
            None => dom::body()?,
        };
        let ghost = Ghost::new(
            GhostParams::new(proto.clone(), container).style(config.ghost.clone()),
        )?;
        let document = dom::document()?;

        let core = Rc::new(RefCell::new(DragCore {
            proto: proto.clone(),
            ghost,
            tracker: DragTracker::new(),
            on_drop,
            on_drag,
            move_throttle: Throttle::from_config(&config.logging),
            trace_moves: config.logging.trace_moves,
            move_listener: None,
            release_listener: None,
        }));

        let move_listener = EventListener::new(document.clone(), "mousemove", {
            let core = Rc::downgrade(&core);
            move |event: &MouseEvent| on_mouse_move(&core, event)
        });
        let release_listener = EventListener::new(document, "mouseup", {
            let core = Rc::downgrade(&core);
            move |_event: &MouseEvent| on_mouse_up(&core)
        });
        {
            let mut core = core.borrow_mut();
            core.move_listener = Some(move_listener);
            core.release_listener = Some(release_listener);
        }

        let mut press_listener = EventListener::new(proto, "mousedown", {
            let core = Rc::downgrade(&core);
            move |event: &MouseEvent| on_mouse_down(&core, event)
        });
        press_listener.attach();

        Ok(Self { core, press_listener })
    }

    pub fn is_dragging(&self) -> bool {
        self.core.borrow().tracker.is_dragging()
    }

    pub fn ghost_element(&self) -> HtmlElement {
        self.core.borrow().ghost.el().clone()
    }

    /// Stops listening for presses and abandons any drag in progress
    /// without reporting a drop. Safe to call more than once.
    pub fn destroy(&mut self) -> Result<(), DragError> {
        self.press_listener.detach();
        self.core.borrow_mut().abandon_drag()
    }
}

impl Drop for Draggable {
    fn drop(&mut self) {
        // Core still borrowed by a running handler; its listeners go away with it
        if self.core.try_borrow_mut().is_err() {
            return;
        }
        if let Err(error) = self.destroy() {
            log_critical(&format!("failed to destroy draggable: {error}"));
        }
    }
}

// ===== EVENT HANDLERS =====
// Handlers keep a strong reference for their whole run, so a callback that
// drops the `Draggable` cannot free the closure that is executing.

fn on_mouse_down(core: &Weak<RefCell<DragCore>>, event: &MouseEvent) {
    let Some(core) = core.upgrade() else { return };
    let started = core.borrow_mut().start_drag(event);
    match started {
        Ok(()) => {
            let on_drag = core.borrow().on_drag.clone();
            on_drag();
        }
        Err(error) => log_critical(&format!("drag start failed, ghost removed: {error}")),
    }
}

fn on_mouse_move(core: &Weak<RefCell<DragCore>>, event: &MouseEvent) {
    let Some(core) = core.upgrade() else { return };
    let mut core = core.borrow_mut();
    let tracked = core.track(event);
    if let Err(error) = core.rollback_on_error(tracked) {
        log_critical(&format!("ghost placement failed, drag abandoned: {error}"));
    }
}

fn on_mouse_up(core: &Weak<RefCell<DragCore>>) {
    let Some(core) = core.upgrade() else { return };
    let Some(rect) = core.borrow_mut().finish_drag() else { return };

    let on_drop = core.borrow().on_drop.clone();
    on_drop(rect);

    let core = core.borrow();
    if let Err(error) = core.ghost.detach() {
        log_critical(&format!("ghost removal failed: {error}"));
    }
    if core.trace_moves {
        log_info(&format!("dropped at {rect:?}"));
    }
}
