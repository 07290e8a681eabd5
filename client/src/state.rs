use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, PointerEvent, Window};

use lasso_shared::{Lasso, LassoEvent};

use crate::dom::ElementItem;
use crate::render::SvgSurface;

pub type CoreLasso = Lasso<ElementItem, SvgSurface>;

/// JS callbacks registered with `on(type, fn)`.
#[derive(Default)]
pub struct JsHooks {
    start: Option<Function>,
    draw: Option<Function>,
    end: Option<Function>,
}

impl JsHooks {
    fn slot(&mut self, event: LassoEvent) -> &mut Option<Function> {
        match event {
            LassoEvent::Start => &mut self.start,
            LassoEvent::Draw => &mut self.draw,
            LassoEvent::End => &mut self.end,
        }
    }

    pub fn set(&mut self, event: LassoEvent, callback: Option<Function>) {
        *self.slot(event) = callback;
    }

    pub fn get(&self, event: LassoEvent) -> Option<Function> {
        match event {
            LassoEvent::Start => self.start.clone(),
            LassoEvent::Draw => self.draw.clone(),
            LassoEvent::End => self.end.clone(),
        }
    }
}

/// A listener attached to a DOM target; removed again on drop.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

pub struct State {
    pub lasso: CoreLasso,
    pub hooks: JsHooks,
    pub window: Window,
    pub target: Option<Element>,
    /// `pointerdown` on the target plus `pointermove`/`pointerup` on the window.
    pub drag_listeners: Vec<Listener>,
    /// `mouseover` per item, only while a drag runs with hover select on.
    pub hover_listeners: Vec<Listener>,
    pub active_pointer: Option<i32>,
}

impl State {
    pub fn new(window: Window) -> Self {
        Self {
            lasso: CoreLasso::default(),
            hooks: JsHooks::default(),
            window,
            target: None,
            drag_listeners: Vec::new(),
            hover_listeners: Vec::new(),
            active_pointer: None,
        }
    }

    pub fn is_active_pointer(&self, event: &PointerEvent) -> bool {
        self.active_pointer == Some(event.pointer_id())
    }

    pub fn stop_drag(&mut self) {
        self.active_pointer = None;
        self.hover_listeners.clear();
    }
}
