//! `window.ghostdragTestApi` for browser-driven end-to-end checks

use std::cell::RefCell;
use std::rc::Rc;

use ghostdrag::Draggable;
use wasm_bindgen::prelude::*;

use crate::app::DemoState;

pub type DraggableSlot = Rc<RefCell<Option<Draggable>>>;

thread_local! {
    static TEST_API_STATE: RefCell<Option<DemoState>> = const { RefCell::new(None) };
    static CARD_SLOT: RefCell<Option<DraggableSlot>> = const { RefCell::new(None) };
}

pub fn store_test_api_state(state: DemoState) {
    TEST_API_STATE.with(|cell| {
        *cell.borrow_mut() = Some(state);
    });
}

/// Registers the card's draggable so `isDragging` reads its drag state
pub fn store_card_slot(slot: DraggableSlot) {
    CARD_SLOT.with(|cell| {
        *cell.borrow_mut() = Some(slot);
    });
}

fn card_is_dragging() -> bool {
    CARD_SLOT.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|slot| slot.borrow().as_ref().is_some_and(Draggable::is_dragging))
    })
}

fn with_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&DemoState) -> R,
{
    TEST_API_STATE.with(|cell| cell.borrow().as_ref().map(f))
}

fn set_function(api: &js_sys::Object, name: &str, function: Box<dyn Fn() -> JsValue>) {
    let closure = Closure::wrap(function);
    js_sys::Reflect::set(api, &name.into(), closure.as_ref().unchecked_ref()).ok();
    closure.forget();
}

#[wasm_bindgen]
pub fn expose_ghostdrag_test_api() {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };

    let api = js_sys::Object::new();
    set_function(&api, "getLastDrop", Box::new(get_last_drop_impl));
    set_function(&api, "getDropCount", Box::new(get_drop_count_impl));
    set_function(&api, "isDragging", Box::new(is_dragging_impl));

    js_sys::Reflect::set(&window, &"ghostdragTestApi".into(), &api).ok();

    zoon::println!("[ghostdrag] Test API exposed on window.ghostdragTestApi");
}

/// `{ left, top, width, height }` or `null` before the first drop
fn get_last_drop_impl() -> JsValue {
    with_state(|state| state.last_drop.get())
        .flatten()
        .and_then(|rect| match serde_wasm_bindgen::to_value(&rect) {
            Ok(value) => Some(value),
            Err(error) => {
                zoon::eprintln!("[Test API] Failed to serialize drop rect: {error}");
                None
            }
        })
        .unwrap_or(JsValue::NULL)
}

fn get_drop_count_impl() -> JsValue {
    with_state(|state| JsValue::from(state.drop_count.get())).unwrap_or(JsValue::NULL)
}

fn is_dragging_impl() -> JsValue {
    JsValue::from_bool(card_is_dragging())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use ghostdrag::DraggableParams;
    use ghostdrag::dom;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, MouseEvent, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn press(card: &HtmlElement) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(5);
        init.set_client_y(5);
        let event = MouseEvent::new_with_mouse_event_init_dict("mousedown", &init).unwrap();
        card.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn is_dragging_follows_the_card_draggable() {
        let card = dom::document()
            .unwrap()
            .create_element("div")
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap();
        dom::body().unwrap().append_child(&card).unwrap();

        let slot: DraggableSlot = Rc::default();
        *slot.borrow_mut() = Some(Draggable::new(card.clone(), DraggableParams::new()).unwrap());
        store_card_slot(slot.clone());
        assert_eq!(is_dragging_impl(), JsValue::FALSE);

        // No relay round trip: the answer is current right after the press
        press(&card);
        assert_eq!(is_dragging_impl(), JsValue::TRUE);

        drop(slot.borrow_mut().take());
        assert_eq!(is_dragging_impl(), JsValue::FALSE);
        card.remove();
    }
}
