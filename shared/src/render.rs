//! Rendering directives handed to the host surface.
//!
//! The lasso never draws anything itself. It builds SVG path strings in drawing
//! space and tells a [`LassoSurface`] which of its three shapes to show.

use std::fmt::Write;

use crate::geometry::Point;

pub const ORIGIN_RADIUS: f64 = 3.0;

/// Incrementally built SVG path (`M x y L x y ...`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    data: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn move_to(&mut self, point: Point) {
        let _ = write!(self.data, "M {} {}", point.x, point.y);
    }

    pub fn line_to(&mut self, point: Point) {
        let _ = write!(self.data, " L {} {}", point.x, point.y);
    }

    /// Extends the path to `point`, starting it if empty.
    pub fn push(&mut self, point: Point) {
        if self.data.is_empty() {
            self.move_to(point);
        } else {
            self.line_to(point);
        }
    }

    pub fn segment(from: Point, to: Point) -> Self {
        let mut path = Self::new();
        path.move_to(from);
        path.line_to(to);
        path
    }

    pub fn closed(&self) -> String {
        format!("{}Z", self.data)
    }
}

/// The three shapes a host renders for the lasso: the freehand path, the
/// segment that would close it, and a marker at the drag origin.
pub trait LassoSurface {
    fn set_drawn_path(&mut self, data: Option<&str>);
    fn set_closing_path(&mut self, data: Option<&str>);
    fn set_closing_visible(&mut self, visible: bool);
    fn show_origin(&mut self, center: Point, radius: f64);
    fn hide_origin(&mut self);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl LassoSurface for NullSurface {
    fn set_drawn_path(&mut self, _data: Option<&str>) {}
    fn set_closing_path(&mut self, _data: Option<&str>) {}
    fn set_closing_visible(&mut self, _visible: bool) {}
    fn show_origin(&mut self, _center: Point, _radius: f64) {}
    fn hide_origin(&mut self) {}
}

/// Keeps the latest directive for every shape; useful for headless hosts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    pub drawn_path: Option<String>,
    pub closing_path: Option<String>,
    pub closing_visible: bool,
    pub origin: Option<(Point, f64)>,
}

impl LassoSurface for RecordingSurface {
    fn set_drawn_path(&mut self, data: Option<&str>) {
        self.drawn_path = data.map(str::to_string);
    }

    fn set_closing_path(&mut self, data: Option<&str>) {
        self.closing_path = data.map(str::to_string);
    }

    fn set_closing_visible(&mut self, visible: bool) {
        self.closing_visible = visible;
    }

    fn show_origin(&mut self, center: Point, radius: f64) {
        self.origin = Some((center, radius));
    }

    fn hide_origin(&mut self) {
        self.origin = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_move_then_line_commands() {
        let mut path = PathData::new();
        path.push(Point::new(1.0, 2.0));
        path.push(Point::new(3.5, 4.0));
        assert_eq!(path.as_str(), "M 1 2 L 3.5 4");
        assert_eq!(path.closed(), "M 1 2 L 3.5 4Z");
    }

    #[test]
    fn closing_segment_runs_back_to_origin() {
        let path = PathData::segment(Point::new(10.0, 0.0), Point::new(0.0, 0.0));
        assert_eq!(path.as_str(), "M 10 0 L 0 0");
    }

    #[test]
    fn clear_empties_the_path() {
        let mut path = PathData::new();
        path.push(Point::new(1.0, 1.0));
        path.clear();
        assert!(path.is_empty());
        path.push(Point::new(2.0, 2.0));
        assert_eq!(path.as_str(), "M 2 2");
    }
}
