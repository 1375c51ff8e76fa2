//! Floating placeholder that follows the pointer while a drag is active

use shared::{GhostSection, Point, Rect, Size};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom::{self, px, set_style};
use crate::error::{DomResultExt, DragError};

pub struct GhostParams {
    /// Element the ghost stands in for
    pub proto: HtmlElement,
    /// Element the ghost is attached to; `relative_rect` is measured against it
    pub container: HtmlElement,
    pub style: GhostSection,
}

impl GhostParams {
    pub fn new(proto: HtmlElement, container: HtmlElement) -> Self {
        Self {
            proto,
            container,
            style: GhostSection::default(),
        }
    }

    pub fn style(mut self, style: GhostSection) -> Self {
        self.style = style;
        self
    }
}

pub struct Ghost {
    el: HtmlElement,
    container: HtmlElement,
    min_size: Size,
    /// Client-space top-left, as last passed to `place`
    position: Point,
    size: Size,
}

impl Ghost {
    /// Builds the ghost element. It is not attached anywhere yet.
    pub fn new(params: GhostParams) -> Result<Self, DragError> {
        let GhostParams { proto, container, style } = params;
        let min_size = style.min_size();

        let el: HtmlElement = if style.clone_content {
            let copy = proto
                .clone_node_with_deep(true)
                .dom_context("cloneNode")?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DragError::Dom {
                    operation: "cloneNode",
                    message: "clone is not an HtmlElement".to_string(),
                })?;
            strip_ids(&copy)?;
            copy
        } else {
            dom::document()?
                .create_element("div")
                .dom_context("createElement")?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DragError::Dom {
                    operation: "createElement",
                    message: "div is not an HtmlElement".to_string(),
                })?
        };

        el.class_list().add_1(&style.class_name).dom_context("classList.add")?;
        set_style(&el, "position", "fixed")?;
        set_style(&el, "pointer-events", "none")?;
        set_style(&el, "box-sizing", "border-box")?;
        set_style(&el, "margin", "0")?;
        set_style(&el, "opacity", &style.opacity.to_string())?;
        set_style(&el, "z-index", &style.z_index.to_string())?;

        let mut ghost = Self {
            el,
            container,
            min_size,
            position: Point::default(),
            size: Size::default(),
        };
        ghost.set_size(min_size)?;
        ghost.place(Point::default())?;
        Ok(ghost)
    }

    pub fn el(&self) -> &HtmlElement {
        &self.el
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Resizes the ghost, never below its minimum size
    pub fn set_size(&mut self, size: Size) -> Result<(), DragError> {
        let size = size.at_least(self.min_size);
        set_style(&self.el, "width", &px(size.width))?;
        set_style(&self.el, "height", &px(size.height))?;
        self.size = size;
        Ok(())
    }

    /// Moves the ghost's top-left corner to `origin` (client coordinates)
    pub fn place(&mut self, origin: Point) -> Result<(), DragError> {
        set_style(&self.el, "left", &px(origin.x))?;
        set_style(&self.el, "top", &px(origin.y))?;
        self.position = origin;
        Ok(())
    }

    /// Ghost rect in the container's content coordinates (inside its border,
    /// including the container's scroll offset)
    pub fn relative_rect(&self) -> Rect {
        let container_rect = dom::client_rect(&self.container);
        let content_origin = Point::new(
            container_rect.left + self.container.client_left() as f64 - self.container.scroll_left() as f64,
            container_rect.top + self.container.client_top() as f64 - self.container.scroll_top() as f64,
        );
        Rect::from_origin(self.position, self.size).relative_to(content_origin)
    }

    pub fn is_attached(&self) -> bool {
        self.el
            .parent_node()
            .is_some_and(|parent| parent.is_same_node(Some(self.container.as_ref())))
    }

    pub fn attach(&self) -> Result<(), DragError> {
        self.container.append_child(&self.el).dom_context("appendChild")?;
        Ok(())
    }

    pub fn detach(&self) -> Result<(), DragError> {
        if self.is_attached() {
            self.container.remove_child(&self.el).dom_context("removeChild")?;
        }
        Ok(())
    }
}

/// Ids must stay unique in the document, so the copy keeps none of them
fn strip_ids(copy: &HtmlElement) -> Result<(), DragError> {
    copy.remove_attribute("id").dom_context("removeAttribute")?;
    let with_ids = copy.query_selector_all("[id]").dom_context("querySelectorAll")?;
    for index in 0..with_ids.length() {
        let Some(element) = with_ids.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        element.remove_attribute("id").dom_context("removeAttribute")?;
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element(tag: &str) -> HtmlElement {
        dom::document()
            .unwrap()
            .create_element(tag)
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
    }

    fn fixture() -> (HtmlElement, HtmlElement) {
        let body = dom::body().unwrap();
        let container = element("div");
        container.style().set_property("position", "absolute").unwrap();
        container.style().set_property("left", "40px").unwrap();
        container.style().set_property("top", "30px").unwrap();
        container.style().set_property("width", "400px").unwrap();
        container.style().set_property("height", "300px").unwrap();
        body.append_child(&container).unwrap();

        let proto = element("div");
        proto.set_id("card");
        let label = element("span");
        label.set_id("card-label");
        label.set_text_content(Some("card"));
        proto.append_child(&label).unwrap();
        container.append_child(&proto).unwrap();
        (proto, container)
    }

    #[wasm_bindgen_test]
    fn clone_drops_id_and_gets_ghost_class() {
        let (proto, container) = fixture();
        let ghost = Ghost::new(GhostParams::new(proto, container.clone())).unwrap();

        assert_eq!(ghost.el().id(), "");
        assert!(ghost.el().query_selector("[id]").unwrap().is_none());
        assert_eq!(ghost.el().text_content().as_deref(), Some("card"));
        assert!(ghost.el().class_list().contains("ghost"));
        assert!(!ghost.is_attached());
        container.remove();
    }

    #[wasm_bindgen_test]
    fn size_is_clamped_to_minimum() {
        let (proto, container) = fixture();
        let mut ghost = Ghost::new(GhostParams::new(proto, container.clone())).unwrap();

        ghost.set_size(Size::new(0.0, 0.0)).unwrap();
        assert_eq!(ghost.size(), Size::new(1.0, 1.0));
        assert_eq!(ghost.el().style().get_property_value("width").unwrap(), "1px");

        ghost.set_size(Size::new(120.0, 60.0)).unwrap();
        assert_eq!(ghost.size(), Size::new(120.0, 60.0));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn relative_rect_is_measured_from_container() {
        let (proto, container) = fixture();
        let mut ghost = Ghost::new(GhostParams::new(proto, container.clone())).unwrap();
        ghost.attach().unwrap();
        ghost.set_size(Size::new(50.0, 20.0)).unwrap();

        let container_rect = dom::client_rect(&container);
        ghost
            .place(Point::new(container_rect.left + 10.0, container_rect.top + 15.0))
            .unwrap();

        assert_eq!(ghost.position(), Point::new(container_rect.left + 10.0, container_rect.top + 15.0));
        assert_eq!(ghost.relative_rect(), Rect::new(10.0, 15.0, 50.0, 20.0));
        ghost.detach().unwrap();
        assert!(!ghost.is_attached());
        container.remove();
    }

    #[wasm_bindgen_test]
    fn relative_rect_accounts_for_border_and_scroll() {
        let (proto, container) = fixture();
        container.style().set_property("border", "5px solid black").unwrap();
        container.style().set_property("overflow", "auto").unwrap();
        let filler = element("div");
        filler.style().set_property("height", "1000px").unwrap();
        container.append_child(&filler).unwrap();
        container.set_scroll_top(120);
        assert_eq!(container.scroll_top(), 120);

        let mut ghost = Ghost::new(GhostParams::new(proto, container.clone())).unwrap();
        ghost.attach().unwrap();
        ghost.set_size(Size::new(50.0, 20.0)).unwrap();

        // 10px right and 15px below the inner edge of the border
        let container_rect = dom::client_rect(&container);
        ghost
            .place(Point::new(container_rect.left + 5.0 + 10.0, container_rect.top + 5.0 + 15.0))
            .unwrap();

        assert_eq!(ghost.relative_rect(), Rect::new(10.0, 135.0, 50.0, 20.0));
        ghost.detach().unwrap();
        container.remove();
    }
}
