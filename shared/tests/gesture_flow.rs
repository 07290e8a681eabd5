use std::cell::RefCell;
use std::rc::Rc;

use lasso_shared::{
    GesturePhase, ItemGeometry, ItemId, Lasso, LassoConfig, PointerKind, PointerSample,
    RecordingSurface, ScreenRect, ViewTransform,
};

#[derive(Debug, Clone, PartialEq)]
struct Dot {
    name: &'static str,
    rect: ScreenRect,
}

impl ItemGeometry for Dot {
    fn screen_rect(&self) -> Option<ScreenRect> {
        Some(self.rect)
    }
}

fn dot(name: &'static str, cx: f64, cy: f64) -> Dot {
    Dot {
        name,
        rect: ScreenRect::new(cx - 4.0, cy - 4.0, 8.0, 8.0),
    }
}

fn scatter() -> Vec<Dot> {
    vec![
        dot("a", 120.0, 120.0),
        dot("b", 180.0, 140.0),
        dot("c", 150.0, 260.0),
        dot("d", 400.0, 400.0),
    ]
}

fn circle(cx: f64, cy: f64, radius: f64, steps: usize) -> Vec<(f64, f64)> {
    (0..=steps)
        .map(|step| {
            let angle = step as f64 / steps as f64 * std::f64::consts::TAU;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

fn names(items: Vec<&Dot>) -> Vec<&'static str> {
    items.into_iter().map(|item| item.name).collect()
}

#[test]
fn circular_lasso_selects_the_enclosed_cluster() {
    let mut lasso: Lasso<Dot, RecordingSurface> = Lasso::default();
    lasso.set_items(scatter()).unwrap();

    let draws = Rc::new(RefCell::new(Vec::new()));
    let seen = draws.clone();
    lasso.on_draw(move |items| seen.borrow_mut().push(items.possible_ids().len()));

    lasso.start();
    for (x, y) in circle(150.0, 130.0, 70.0, 48) {
        lasso.move_to(PointerSample::mouse(x, y));
    }
    assert!(lasso.is_path_closed());
    assert_eq!(names(lasso.possible_items()), vec!["a", "b"]);

    lasso.end();
    assert_eq!(lasso.phase(), GesturePhase::Ended);
    assert_eq!(names(lasso.selected_items()), vec!["a", "b"]);
    assert_eq!(names(lasso.not_selected_items()), vec!["c", "d"]);
    assert_eq!(names(lasso.not_possible_items()), vec!["a", "b", "c", "d"]);
    assert!(lasso
        .surface()
        .drawn_path
        .as_deref()
        .is_some_and(|path| path.starts_with("M ") && path.ends_with('Z')));

    let draws = draws.borrow();
    assert_eq!(draws.len(), 49);
    assert_eq!(draws.last(), Some(&2));
}

#[test]
fn loop_leaving_the_origin_drops_its_enclosure() {
    let mut lasso: Lasso<Dot, RecordingSurface> = Lasso::default();
    lasso.set_items(scatter()).unwrap();
    lasso.set_hover_select(false).unwrap();

    lasso.start();
    for (x, y) in circle(150.0, 130.0, 70.0, 48) {
        lasso.move_to(PointerSample::mouse(x, y));
    }
    assert_eq!(lasso.possible_items().len(), 2);

    // drag away from the origin: the loop reopens and nothing stays possible
    lasso.move_to(PointerSample::mouse(600.0, 600.0));
    assert!(!lasso.is_path_closed());
    assert!(lasso.possible_items().is_empty());

    lasso.end();
    assert!(lasso.selected_items().is_empty());
    assert_eq!(lasso.surface(), &RecordingSurface::default());
}

#[test]
fn hover_and_loop_combine() {
    let mut lasso: Lasso<Dot, RecordingSurface> = Lasso::default();
    lasso.set_items(scatter()).unwrap();

    lasso.start();
    let d = lasso.items().find(&dot("d", 400.0, 400.0)).unwrap();
    assert_eq!(d, ItemId(3));
    lasso.hover(d);
    for (x, y) in circle(150.0, 130.0, 70.0, 32) {
        lasso.move_to(PointerSample::mouse(x, y));
    }
    lasso.end();
    assert_eq!(names(lasso.selected_items()), vec!["a", "b", "d"]);
}

#[test]
fn json_config_drives_the_gesture() {
    let config = LassoConfig::from_json(
        r#"{"closePathDistance": 10, "hoverSelect": false, "zoomTransform": {"k": 2, "x": 0, "y": 0}}"#,
    )
    .unwrap();
    let mut lasso: Lasso<Dot, RecordingSurface> =
        Lasso::with_config(config, RecordingSurface::default()).unwrap();
    lasso.set_items(scatter()).unwrap();
    assert_eq!(lasso.view_transform(), ViewTransform::new(2.0, 0.0, 0.0));

    lasso.start();
    let path = circle(150.0, 130.0, 70.0, 48);
    for &(x, y) in &path[..path.len() - 4] {
        lasso.move_to(PointerSample::new(
            (x, y).into(),
            (x * 2.0, y * 2.0).into(),
            PointerKind::Touch,
        ));
    }
    // the last sample is still farther than 10px from the origin
    assert!(!lasso.is_path_closed());
    assert!(lasso.possible_items().is_empty());
    assert_eq!(lasso.surface().origin.map(|(center, _)| center), lasso.origin());
}
