//! Thin helpers over `web_sys` used by the ghost and the draggable

use shared::{Point, Rect};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MouseEvent};

use crate::error::{DomResultExt, DragError};

pub fn window() -> Result<web_sys::Window, DragError> {
    web_sys::window().ok_or(DragError::MissingWindow)
}

pub fn document() -> Result<Document, DragError> {
    window()?.document().ok_or(DragError::MissingDocument)
}

pub fn body() -> Result<HtmlElement, DragError> {
    document()?.body().ok_or(DragError::MissingBody)
}

pub fn client_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn pointer_position(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), DragError> {
    element.style().set_property(property, value).dom_context("style.setProperty")
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

// ===== EVENT LISTENER =====

/// A mouse listener bound to one target and event type that can be switched
/// on and off.
///
/// Attaching twice is a no-op, and so is detaching an unattached listener.
/// The underlying `gloo_events::EventListener` removes itself when dropped.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    handler: Rc<dyn Fn(&MouseEvent)>,
    active: Option<gloo_events::EventListener>,
}

impl EventListener {
    pub fn new(
        target: impl Into<EventTarget>,
        event_type: &'static str,
        handler: impl Fn(&MouseEvent) + 'static,
    ) -> Self {
        Self {
            target: target.into(),
            event_type,
            handler: Rc::new(handler),
            active: None,
        }
    }

    pub fn attach(&mut self) {
        if self.active.is_some() {
            return;
        }
        let handler = self.handler.clone();
        self.active = Some(gloo_events::EventListener::new(
            &self.target,
            self.event_type,
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                handler(event);
            },
        ));
    }

    pub fn detach(&mut self) {
        self.active = None;
    }

    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }
}
