use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use lasso_shared::{LassoSurface, Point};

use crate::dom::create_svg;

struct Shapes {
    group: Element,
    drawn: Element,
    loop_close: Element,
    origin: Element,
}

/// SVG rendering of the lasso: a `g.lasso` group holding `path.drawn`,
/// `path.loop_close` and `circle.origin`.
#[derive(Default)]
pub struct SvgSurface {
    shapes: Option<Shapes>,
}

impl SvgSurface {
    pub fn attach(&mut self, document: &Document, parent: &Element) -> Result<(), JsValue> {
        self.detach();
        let group = create_svg(document, "g", "lasso")?;
        let drawn = create_svg(document, "path", "drawn")?;
        let loop_close = create_svg(document, "path", "loop_close")?;
        let origin = create_svg(document, "circle", "origin")?;
        group.append_child(&drawn)?;
        group.append_child(&loop_close)?;
        group.append_child(&origin)?;
        parent.append_child(&group)?;
        self.shapes = Some(Shapes {
            group,
            drawn,
            loop_close,
            origin,
        });
        Ok(())
    }

    pub fn detach(&mut self) {
        if let Some(shapes) = self.shapes.take() {
            shapes.group.remove();
        }
    }

    pub fn group(&self) -> Option<&Element> {
        self.shapes.as_ref().map(|shapes| &shapes.group)
    }
}

fn set_path(element: &Element, data: Option<&str>) {
    let _ = match data {
        Some(data) => element.set_attribute("d", data),
        None => element.remove_attribute("d"),
    };
}

fn set_visible(element: &Element, visible: bool) {
    let _ = if visible {
        element.remove_attribute("display")
    } else {
        element.set_attribute("display", "none")
    };
}

impl LassoSurface for SvgSurface {
    fn set_drawn_path(&mut self, data: Option<&str>) {
        if let Some(shapes) = &self.shapes {
            set_path(&shapes.drawn, data);
        }
    }

    fn set_closing_path(&mut self, data: Option<&str>) {
        if let Some(shapes) = &self.shapes {
            set_path(&shapes.loop_close, data);
        }
    }

    fn set_closing_visible(&mut self, visible: bool) {
        if let Some(shapes) = &self.shapes {
            set_visible(&shapes.loop_close, visible);
        }
    }

    fn show_origin(&mut self, center: Point, radius: f64) {
        if let Some(shapes) = &self.shapes {
            let origin = &shapes.origin;
            let _ = origin.set_attribute("cx", &center.x.to_string());
            let _ = origin.set_attribute("cy", &center.y.to_string());
            let _ = origin.set_attribute("r", &radius.to_string());
            set_visible(origin, true);
        }
    }

    fn hide_origin(&mut self) {
        if let Some(shapes) = &self.shapes {
            set_visible(&shapes.origin, false);
        }
    }
}
