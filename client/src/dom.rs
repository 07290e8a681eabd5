use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, PointerEvent, SvgElement};

use lasso_shared::{ItemGeometry, Point, PointerKind, PointerSample, ScreenRect};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A lassoable DOM element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementItem(pub Element);

impl ItemGeometry for ElementItem {
    fn screen_rect(&self) -> Option<ScreenRect> {
        let rect = self.0.get_bounding_client_rect();
        let rect = ScreenRect::new(rect.left(), rect.top(), rect.width(), rect.height());
        if rect.left.is_finite() && rect.top.is_finite() {
            Some(rect)
        } else {
            None
        }
    }
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("Missing window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))
}

pub fn create_svg(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element_ns(Some(SVG_NS), tag)?;
    element.set_attribute("class", class)?;
    Ok(element)
}

pub fn set_touch_action(element: &Element, value: &str) {
    let style = if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style()
    } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
        svg.style()
    } else {
        return;
    };
    let _ = style.set_property("touch-action", value);
}

pub fn pointer_kind(event: &PointerEvent) -> PointerKind {
    match event.pointer_type().as_str() {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

/// Screen position from the client coordinates, drawing position relative to
/// the target area's box.
pub fn event_to_sample(target: &Element, event: &PointerEvent) -> PointerSample {
    let rect = target.get_bounding_client_rect();
    let x = event.client_x() as f64;
    let y = event.client_y() as f64;
    PointerSample::new(
        Point::new(x, y),
        Point::new(x - rect.left(), y - rect.top()),
        pointer_kind(event),
    )
}

/// Primary button without ctrl, the same filter a drag behaviour applies.
pub fn starts_drag(event: &PointerEvent) -> bool {
    event.button() == 0 && !event.ctrl_key()
}
