use serde::{Deserialize, Serialize};

const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Result of testing a point against a drawn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Inside,
    OnBoundary,
    Outside,
}

impl Classification {
    /// Boundary points count as enclosed.
    pub fn is_enclosing(self) -> bool {
        matches!(self, Classification::Inside | Classification::OnBoundary)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

fn point_on_segment(point: Point, a: Point, b: Point) -> bool {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let apx = point.x - a.x;
    let apy = point.y - a.y;
    let ab_len_sq = abx * abx + aby * aby;
    if ab_len_sq <= BOUNDARY_EPSILON {
        return apx.abs() <= BOUNDARY_EPSILON && apy.abs() <= BOUNDARY_EPSILON;
    }
    let cross = abx * apy - aby * apx;
    if cross.abs() > BOUNDARY_EPSILON * ab_len_sq.sqrt() {
        return false;
    }
    let dot = apx * abx + apy * aby;
    (0.0..=ab_len_sq).contains(&dot)
}

/// Classifies `point` against `polygon`, treating the last vertex as joined to
/// the first. Polygons with fewer than three vertices enclose nothing.
pub fn classify(polygon: &[Point], point: Point) -> Classification {
    if polygon.len() < 3 || !point.is_finite() {
        return Classification::Outside;
    }

    let mut inside = false;
    let mut previous = polygon[polygon.len() - 1];
    for &current in polygon {
        if point_on_segment(point, previous, current) {
            return Classification::OnBoundary;
        }
        if (current.y > point.y) != (previous.y > point.y) {
            let x_at = (previous.x - current.x) * (point.y - current.y)
                / (previous.y - current.y)
                + current.x;
            if point.x < x_at {
                inside = !inside;
            }
        }
        previous = current;
    }

    if inside {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

pub fn enclosing(polygon: &[Point], point: Point) -> bool {
    classify(polygon, point).is_enclosing()
}

/// Axis-aligned box in screen coordinates, as reported by the host for an item.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre of the box snapped to whole screen units (halves round up).
    pub fn center(&self) -> Point {
        Point {
            x: round_half_up(self.left + self.width / 2.0),
            y: round_half_up(self.top + self.height / 2.0),
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Pan/zoom transform between drawing space and the rendered group.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn is_invertible(&self) -> bool {
        self.k.is_finite() && self.k != 0.0 && self.x.is_finite() && self.y.is_finite()
    }

    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: point.x * self.k + self.x,
            y: point.y * self.k + self.y,
        }
    }

    pub fn invert(&self, point: Point) -> Point {
        Point {
            x: (point.x - self.x) / self.k,
            y: (point.y - self.y) / self.k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn square_loop_encloses_center_but_not_far_point() {
        let polygon = square();
        assert_eq!(classify(&polygon, Point::new(5.0, 5.0)), Classification::Inside);
        assert_eq!(classify(&polygon, Point::new(20.0, 20.0)), Classification::Outside);
    }

    #[test]
    fn repeated_closing_vertex_does_not_capture_other_points() {
        let polygon = square();
        assert_eq!(classify(&polygon, Point::new(-3.0, 4.0)), Classification::Outside);
    }

    #[test]
    fn edge_and_vertex_points_are_on_boundary() {
        let polygon = square();
        assert_eq!(classify(&polygon, Point::new(0.0, 5.0)), Classification::OnBoundary);
        assert_eq!(classify(&polygon, Point::new(10.0, 10.0)), Classification::OnBoundary);
        assert!(enclosing(&polygon, Point::new(5.0, 10.0)));
    }

    #[test]
    fn implicit_closing_edge_is_part_of_boundary() {
        let open = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert_eq!(classify(&open, Point::new(5.0, 5.0)), Classification::OnBoundary);
        assert_eq!(classify(&open, Point::new(8.0, 2.0)), Classification::Inside);
        assert_eq!(classify(&open, Point::new(2.0, 8.0)), Classification::Outside);
    }

    #[test]
    fn degenerate_polygons_enclose_nothing() {
        let point = Point::new(1.0, 1.0);
        assert_eq!(classify(&[], point), Classification::Outside);
        assert_eq!(classify(&[point], point), Classification::Outside);
        assert_eq!(
            classify(&[Point::new(0.0, 0.0), Point::new(2.0, 2.0)], point),
            Classification::Outside
        );
    }

    #[test]
    fn concave_loop_excludes_the_notch() {
        let polygon = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(5.0, 4.0),
            Point::new(0.0, 10.0),
        ];
        assert!(enclosing(&polygon, Point::new(5.0, 2.0)));
        assert!(!enclosing(&polygon, Point::new(5.0, 8.0)));
    }

    #[test]
    fn rect_center_rounds_half_up() {
        let rect = ScreenRect::new(10.0, 20.0, 5.0, 3.0);
        assert_eq!(rect.center(), Point::new(13.0, 22.0));
        let negative = ScreenRect::new(-5.0, -5.0, 5.0, 5.0);
        assert_eq!(negative.center(), Point::new(-2.0, -2.0));
    }

    #[test]
    fn view_transform_inverts_apply() {
        let transform = ViewTransform::new(2.0, 30.0, -10.0);
        let point = Point::new(7.0, 11.0);
        let round_trip = transform.invert(transform.apply(point));
        assert_relative_eq!(round_trip.x, point.x);
        assert_relative_eq!(round_trip.y, point.y);
        assert_eq!(transform.invert(Point::new(50.0, 10.0)), Point::new(10.0, 10.0));
        assert!(!ViewTransform::new(0.0, 0.0, 0.0).is_invertible());
    }

    #[test]
    fn distance_is_euclidean() {
        assert_relative_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }
}
