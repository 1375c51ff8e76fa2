//! Demo application: one draggable card on a dashed board

use std::rc::Rc;

use futures::{StreamExt, select};
use gloo_timers::future::TimeoutFuture;
use ghostdrag::dataflow::{Relay, relay};
use ghostdrag::logging::{log_critical, log_info};
use ghostdrag::{DragConfig, Draggable, DraggableParams, Rect};
use wasm_bindgen::JsCast;
use zoon::*;

use crate::test_api::DraggableSlot;

const CONFIG_TOML: &str = include_str!("../ghostdrag.toml");
const STATUS_CLEAR_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStatus {
    Idle,
    Dragging,
    Dropped(Rect),
}

impl DragStatus {
    fn label(&self) -> String {
        match self {
            DragStatus::Idle => "Drag the card anywhere on the board".to_string(),
            DragStatus::Dragging => "Dragging…".to_string(),
            DragStatus::Dropped(rect) => format!(
                "Dropped at left {:.0}, top {:.0} ({:.0}×{:.0})",
                rect.left, rect.top, rect.width, rect.height
            ),
        }
    }
}

/// Reactive state shared by the view and the test API
#[derive(Clone)]
pub struct DemoState {
    pub status: Mutable<DragStatus>,
    pub last_drop: Mutable<Option<Rect>>,
    pub drop_count: Mutable<u32>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            status: Mutable::new(DragStatus::Idle),
            last_drop: Mutable::new(None),
            drop_count: Mutable::new(0),
        }
    }
}

impl DemoState {
    /// Records a drop and returns its generation, the new drop count
    pub fn record_drop(&self, rect: Rect) -> u32 {
        self.status.set(DragStatus::Dropped(rect));
        self.last_drop.set(Some(rect));
        let generation = self.drop_count.get() + 1;
        self.drop_count.set(generation);
        generation
    }

    /// Back to idle, unless a later drop or drag replaced the status
    pub fn clear_if_current(&self, generation: u32) {
        let is_current = self.drop_count.get() == generation
            && matches!(self.status.get(), DragStatus::Dropped(_));
        if is_current {
            self.status.set(DragStatus::Idle);
        }
    }
}

pub struct DemoApp {
    pub state: DemoState,
    pub config: DragConfig,
    card_drag_started_relay: Relay<()>,
    card_dropped_relay: Relay<Rect>,
}

impl DemoApp {
    pub fn new() -> Self {
        let config = load_config();
        let state = DemoState::default();

        let (card_drag_started_relay, mut card_drag_started_stream) = relay::<()>();
        let (card_dropped_relay, mut card_dropped_stream) = relay::<Rect>();

        Task::start({
            let state = state.clone();
            async move {
                loop {
                    select! {
                        started = card_drag_started_stream.next() => {
                            match started {
                                Some(()) => state.status.set(DragStatus::Dragging),
                                None => break,
                            }
                        }
                        dropped = card_dropped_stream.next() => {
                            match dropped {
                                Some(rect) => {
                                    log_info(&format!(
                                        "card dropped: {}",
                                        serde_json::to_string(&rect).unwrap_or_default()
                                    ));
                                    let generation = state.record_drop(rect);
                                    Task::start(clear_status_later(state.clone(), generation));
                                }
                                None => break,
                            }
                        }
                    }
                }
            }
        });

        Self {
            state,
            config,
            card_drag_started_relay,
            card_dropped_relay,
        }
    }

    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Height::screen())
            .s(Padding::all(24))
            .s(Gap::new().y(16))
            .s(Background::new().color("oklch(97% 0.025 255)"))
            .item(self.status_line())
            .item(self.board())
    }

    fn status_line(&self) -> impl Element {
        El::new()
            .s(Font::new().size(14).color("oklch(45% 0.025 255)"))
            .child_signal(self.state.status.signal().map(|status| Text::new(status.label())))
    }

    fn board(&self) -> impl Element {
        El::new()
            .s(Width::exact(640))
            .s(Height::exact(400))
            .s(RoundedCorners::all(12))
            .update_raw_el(|raw_el| {
                raw_el
                    .style("border", "2px dashed oklch(65% 0.13 250)")
                    .style("position", "relative")
            })
            .child(self.card())
    }

    fn card(&self) -> impl Element {
        // Lives as long as the card is in the DOM
        let draggable_slot: DraggableSlot = Rc::default();
        crate::test_api::store_card_slot(draggable_slot.clone());

        El::new()
            .s(Width::exact(160))
            .s(Height::exact(90))
            .s(Align::center())
            .s(RoundedCorners::all(8))
            .s(Background::new().color("oklch(55% 0.13 250)"))
            .s(Font::new().color("oklch(97% 0.025 255)").size(15))
            .s(Cursor::new(CursorIcon::Grab))
            .update_raw_el(|raw_el| raw_el.style("user-select", "none"))
            .child(El::new().s(Align::center()).child("Drag me"))
            .after_insert({
                let draggable_slot = draggable_slot.clone();
                let config = self.config.clone();
                let card_drag_started_relay = self.card_drag_started_relay.clone();
                let card_dropped_relay = self.card_dropped_relay.clone();
                move |card: web_sys::HtmlElement| {
                    let board = card
                        .parent_element()
                        .and_then(|parent| parent.dyn_into::<web_sys::HtmlElement>().ok());
                    let mut params = DraggableParams::new()
                        .config(config)
                        .with_relays(card_drag_started_relay, card_dropped_relay);
                    if let Some(board) = board {
                        params = params.container(board);
                    }
                    match Draggable::new(card, params) {
                        Ok(draggable) => *draggable_slot.borrow_mut() = Some(draggable),
                        Err(error) => log_critical(&format!("card is not draggable: {error}")),
                    }
                }
            })
            .after_remove(move |_| {
                drop(draggable_slot.borrow_mut().take());
            })
    }
}

/// Resets the status line unless another drop happened meanwhile
async fn clear_status_later(state: DemoState, generation: u32) {
    TimeoutFuture::new(STATUS_CLEAR_MS).await;
    state.clear_if_current(generation);
}

fn load_config() -> DragConfig {
    match DragConfig::from_toml_str(CONFIG_TOML) {
        Ok(config) => config,
        Err(error) => {
            log_critical(&format!("invalid ghostdrag.toml, using defaults: {error}"));
            DragConfig::default()
        }
    }
}
