use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, PointerEvent};

use lasso_shared::{LassoConfig, LassoError, LassoEvent, ViewTransform};

use crate::dom::{self, event_to_sample, set_touch_action, starts_drag, ElementItem};
use crate::logging;
use crate::state::{Listener, State};

type Shared = Rc<RefCell<State>>;

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let search = window.location().search().unwrap_or_default();
    logging::init(logging::level_from_query(&search));
    Ok(())
}

fn to_js(error: LassoError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn to_array<'a>(items: impl IntoIterator<Item = &'a ElementItem>) -> Array {
    items.into_iter().map(|item| item.0.clone()).collect()
}

/// Calls the JS hook for `event` with no borrow held, so the hook may query
/// the lasso.
fn dispatch(shared: &Shared, event: Option<LassoEvent>) {
    let Some(event) = event else {
        return;
    };
    let callback = shared.borrow().hooks.get(event);
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            log::error!("lasso {event} hook threw: {err:?}");
        }
    }
}

fn hook_event(kind: &str) -> Option<LassoEvent> {
    match kind.parse::<LassoEvent>() {
        Ok(event) => Some(event),
        Err(_) => {
            log::debug!("ignoring lasso hook for unknown event {kind:?}");
            None
        }
    }
}

fn pointer_closure(shared: &Shared, handler: fn(&Shared, PointerEvent)) -> Closure<dyn FnMut(Event)> {
    let weak = Rc::downgrade(shared);
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        if shared.try_borrow_mut().is_err() {
            log::warn!("pointer event re-entered the lasso from a hook, ignoring it");
            return;
        }
        if let Ok(event) = event.dyn_into::<PointerEvent>() {
            handler(&shared, event);
        }
    })
}

fn attach_drag(shared: &Shared) -> Result<(), JsValue> {
    let mut state = shared.borrow_mut();
    state.drag_listeners.clear();
    if !state.lasso.enabled() {
        return Ok(());
    }
    let Some(target) = state.target.clone() else {
        return Ok(());
    };
    set_touch_action(&target, "none");
    let window: EventTarget = state.window.clone().into();
    state.drag_listeners = vec![
        Listener::attach(&target, "pointerdown", pointer_closure(shared, on_pointer_down))?,
        Listener::attach(&window, "pointermove", pointer_closure(shared, on_pointer_move))?,
        Listener::attach(&window, "pointerup", pointer_closure(shared, on_pointer_up))?,
        Listener::attach(&window, "pointercancel", pointer_closure(shared, on_pointer_up))?,
    ];
    log::debug!("lasso listening on {}", target.tag_name());
    Ok(())
}

fn attach_hover(shared: &Shared, state: &mut State) {
    let mut listeners = Vec::with_capacity(state.lasso.items().len());
    for (id, item, _) in state.lasso.items().iter() {
        let weak = Rc::downgrade(shared);
        let onover = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Ok(mut state) = shared.try_borrow_mut() {
                state.lasso.hover(id);
            };
        });
        match Listener::attach(&item.0, "mouseover", onover) {
            Ok(listener) => listeners.push(listener),
            Err(err) => log::warn!("could not track hover on lasso item {}: {err:?}", id.0),
        }
    }
    state.hover_listeners = listeners;
}

fn on_pointer_down(shared: &Shared, event: PointerEvent) {
    let fired = {
        let mut state = shared.borrow_mut();
        if state.active_pointer.is_some() || !starts_drag(&event) {
            return;
        }
        let fired = state.lasso.start();
        if fired.is_some() {
            state.active_pointer = Some(event.pointer_id());
            if state.lasso.hover_select() {
                attach_hover(shared, &mut state);
            }
            event.prevent_default();
        }
        fired
    };
    dispatch(shared, fired);
}

fn on_pointer_move(shared: &Shared, event: PointerEvent) {
    let fired = {
        let mut state = shared.borrow_mut();
        if !state.is_active_pointer(&event) {
            return;
        }
        let Some(target) = state.target.clone() else {
            return;
        };
        state.lasso.move_to(event_to_sample(&target, &event))
    };
    dispatch(shared, fired);
}

fn on_pointer_up(shared: &Shared, event: PointerEvent) {
    let fired = {
        let mut state = shared.borrow_mut();
        if !state.is_active_pointer(&event) {
            return;
        }
        state.stop_drag();
        state.lasso.end()
    };
    dispatch(shared, fired);
}

/// Browser-facing lasso bound to an SVG surface and DOM pointer events.
#[wasm_bindgen]
pub struct Lasso {
    state: Shared,
}

#[wasm_bindgen]
impl Lasso {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Lasso, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
        Ok(Self {
            state: Rc::new(RefCell::new(State::new(window))),
        })
    }

    /// Creates the lasso shapes inside `parent` (usually an `svg` or `g`).
    pub fn attach(&self, parent: &Element) -> Result<(), JsValue> {
        let document = dom::document()?;
        self.state
            .borrow_mut()
            .lasso
            .surface_mut()
            .attach(&document, parent)
    }

    pub fn group(&self) -> Option<Element> {
        self.state.borrow().lasso.surface().group().cloned()
    }

    #[wasm_bindgen(js_name = setItems)]
    pub fn set_items(&self, items: &Array) -> Result<(), JsValue> {
        let elements: Vec<ElementItem> = items
            .iter()
            .filter_map(|value| match value.dyn_into::<Element>() {
                Ok(element) => Some(ElementItem(element)),
                Err(other) => {
                    log::warn!("ignoring lasso item that is not an element: {other:?}");
                    None
                }
            })
            .collect();
        self.state
            .borrow_mut()
            .lasso
            .set_items(elements)
            .map_err(to_js)
    }

    pub fn items(&self) -> Array {
        to_array(self.state.borrow().lasso.items().handles())
    }

    #[wasm_bindgen(js_name = possibleItems)]
    pub fn possible_items(&self) -> Array {
        to_array(self.state.borrow().lasso.possible_items())
    }

    #[wasm_bindgen(js_name = selectedItems)]
    pub fn selected_items(&self) -> Array {
        to_array(self.state.borrow().lasso.selected_items())
    }

    #[wasm_bindgen(js_name = notPossibleItems)]
    pub fn not_possible_items(&self) -> Array {
        to_array(self.state.borrow().lasso.not_possible_items())
    }

    #[wasm_bindgen(js_name = notSelectedItems)]
    pub fn not_selected_items(&self) -> Array {
        to_array(self.state.borrow().lasso.not_selected_items())
    }

    #[wasm_bindgen(js_name = closePathDistance)]
    pub fn close_path_distance(&self) -> f64 {
        self.state.borrow().lasso.close_path_distance()
    }

    #[wasm_bindgen(js_name = setClosePathDistance)]
    pub fn set_close_path_distance(&self, distance: f64) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .lasso
            .set_close_path_distance(distance)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = closePathSelect)]
    pub fn close_path_select(&self) -> bool {
        self.state.borrow().lasso.close_path_select()
    }

    #[wasm_bindgen(js_name = setClosePathSelect)]
    pub fn set_close_path_select(&self, enabled: bool) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .lasso
            .set_close_path_select(enabled)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = hoverSelect)]
    pub fn hover_select(&self) -> bool {
        self.state.borrow().lasso.hover_select()
    }

    #[wasm_bindgen(js_name = setHoverSelect)]
    pub fn set_hover_select(&self, enabled: bool) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .lasso
            .set_hover_select(enabled)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = isPathClosed)]
    pub fn is_path_closed(&self) -> bool {
        self.state.borrow().lasso.is_path_closed()
    }

    #[wasm_bindgen(js_name = targetArea)]
    pub fn target_area(&self) -> Option<Element> {
        self.state.borrow().target.clone()
    }

    #[wasm_bindgen(js_name = setTargetArea)]
    pub fn set_target_area(&self, target: Element) -> Result<(), JsValue> {
        {
            let mut state = self.state.borrow_mut();
            if state.active_pointer.is_some() {
                return Err(to_js(LassoError::DragInProgress));
            }
            state.target = Some(target);
        }
        attach_drag(&self.state)
    }

    pub fn enabled(&self) -> bool {
        self.state.borrow().lasso.enabled()
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) -> Result<(), JsValue> {
        {
            let mut state = self.state.borrow_mut();
            if !enabled {
                state.stop_drag();
            }
            state.lasso.set_enabled(enabled);
        }
        attach_drag(&self.state)
    }

    #[wasm_bindgen(js_name = zoomTransform)]
    pub fn zoom_transform(&self) -> Result<Object, JsValue> {
        let transform = self.state.borrow().lasso.view_transform();
        let object = Object::new();
        Reflect::set(&object, &"k".into(), &transform.k.into())?;
        Reflect::set(&object, &"x".into(), &transform.x.into())?;
        Reflect::set(&object, &"y".into(), &transform.y.into())?;
        Ok(object)
    }

    #[wasm_bindgen(js_name = setZoomTransform)]
    pub fn set_zoom_transform(&self, k: f64, x: f64, y: f64) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .lasso
            .set_view_transform(ViewTransform::new(k, x, y))
            .map_err(to_js)
    }

    /// Applies a JSON options object such as `{"closePathDistance": 50}`.
    pub fn configure(&self, json: &str) -> Result<(), JsValue> {
        let config = LassoConfig::from_json(json).map_err(to_js)?;
        self.state
            .borrow_mut()
            .lasso
            .configure(config)
            .map_err(to_js)?;
        attach_drag(&self.state)
    }

    pub fn config(&self) -> Result<String, JsValue> {
        self.state.borrow().lasso.config().to_json().map_err(to_js)
    }

    /// Registers (or with `undefined`, removes) the `start`, `draw` or `end`
    /// hook. Other names are ignored.
    pub fn on(&self, kind: &str, callback: Option<Function>) {
        if let Some(event) = hook_event(kind) {
            self.state.borrow_mut().hooks.set(event, callback);
        }
    }

    /// The hook registered for `start`, `draw` or `end`, if any.
    pub fn hook(&self, kind: &str) -> Option<Function> {
        let event = hook_event(kind)?;
        self.state.borrow().hooks.get(event)
    }

    pub fn clear(&self) {
        let fired = self.state.borrow_mut().lasso.clear();
        dispatch(&self.state, Some(fired));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_names_map_to_events() {
        assert_eq!(hook_event("start"), Some(LassoEvent::Start));
        assert_eq!(hook_event("draw"), Some(LassoEvent::Draw));
        assert_eq!(hook_event("end"), Some(LassoEvent::End));
        assert_eq!(hook_event("mouseover"), None);
    }
}
