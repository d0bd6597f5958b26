//! Integration tests for container orientation and element placement.
//!
//! These tests verify that:
//! - Every element's margin box stays inside its container, in both orientations
//! - Toggling keeps element count, labels and order, and undoes itself
//! - A secondary press toggles instead of dragging

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sortboard::{
    layout::{Container, FixedOracle, Orientation, PaletteAllocator, Rect},
    ContainerId, Diagram, LayoutConfig, OracleNode, Point, PointerButton, PressOutcome, Size,
    Sort,
};

fn diagram_with(processes: &[&str], size: Option<Size>) -> Diagram {
    let sorts = vec![Sort::with_process_names("s", processes.iter().copied())];
    let mut node = OracleNode::new("s", Point::new(100.0, 100.0));
    if let Some(size) = size {
        node = node.with_size(size);
    }
    Diagram::build(
        &sorts,
        &FixedOracle::new().with_node(node),
        LayoutConfig::default(),
        &mut PaletteAllocator::default(),
    )
    .expect("diagram should build")
}

fn encloses(outer: &Rect, inner: &Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.right() <= outer.right()
        && inner.bottom() <= outer.bottom()
}

fn names(container: &Container) -> Vec<String> {
    container.elements().iter().map(|e| e.name().to_string()).collect()
}

fn assert_contained(container: &Container) {
    for element in container.elements() {
        assert!(
            encloses(&container.rect(), &element.margin_box()),
            "{} escapes {} ({:?})",
            element.name(),
            container.name(),
            container.orientation()
        );
    }
}

#[test]
fn test_inferred_size_contains_every_element() {
    for count in 0..6 {
        let processes: Vec<String> = (0..count).map(|i| format!("p{}", i)).collect();
        let processes: Vec<&str> = processes.iter().map(String::as_str).collect();
        let mut diagram = diagram_with(&processes, None);

        assert_contained(&diagram.containers()[0]);
        diagram.toggle_orientation(ContainerId(0));
        assert_contained(&diagram.containers()[0]);
    }
}

#[test]
fn test_margin_boxes_do_not_overlap() {
    let diagram = diagram_with(&["p0", "p1", "p2", "p3"], None);
    let boxes: Vec<Rect> = diagram.containers()[0]
        .elements()
        .iter()
        .map(|e| e.margin_box())
        .collect();
    for (i, a) in boxes.iter().enumerate() {
        for b in &boxes[i + 1..] {
            assert!(!a.intersects(b));
        }
    }
}

#[test]
fn test_toggle_three_elements() {
    let mut diagram = diagram_with(&["p0", "p1", "p2"], Some(Size::new(60.0, 180.0)));
    let before_names = names(&diagram.containers()[0]);

    assert!(diagram.toggle_orientation(ContainerId(0)));

    let c = &diagram.containers()[0];
    assert_eq!(c.orientation(), Orientation::Horizontal);
    assert_eq!(c.center(), Point::new(100.0, 100.0));
    assert_eq!(names(c), before_names);
    let xs: Vec<f64> = c.elements().iter().map(|e| e.center().x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert!(c.elements().iter().all(|e| e.center().y == 100.0));
    assert_contained(c);

    insta::assert_snapshot!(diagram.describe(), @r"
    s [horizontal] center=(100, 100) size=180x60
      p0 (40, 100)
      p1 (100, 100)
      p2 (160, 100)
    ");
}

#[test]
fn test_toggle_twice_restores_everything() {
    let mut diagram = diagram_with(&["p0", "p1", "p2"], Some(Size::new(70.0, 200.0)));
    let snapshot = diagram.containers()[0].snapshot();
    let label = diagram.containers()[0].label().clone();
    let element_labels: Vec<_> = diagram.containers()[0]
        .elements()
        .iter()
        .map(|e| e.label().clone())
        .collect();

    diagram.toggle_orientation(ContainerId(0));
    diagram.toggle_orientation(ContainerId(0));

    let c = &diagram.containers()[0];
    assert_eq!(c.snapshot(), snapshot);
    assert_eq!(c.label(), &label);
    let after: Vec<_> = c.elements().iter().map(|e| e.label().clone()).collect();
    assert_eq!(after, element_labels);
}

#[test]
fn test_secondary_press_toggles() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut diagram =
        diagram_with(&["p0", "p1"], None).with_observer(move || counter.set(counter.get() + 1));

    let outcome = diagram.press(ContainerId(0), Point::new(100.0, 100.0), PointerButton::Secondary);

    assert_eq!(outcome, PressOutcome::Toggled);
    assert!(!diagram.is_dragging());
    assert_eq!(calls.get(), 1);
    assert_eq!(diagram.containers()[0].size(), Size::new(120.0, 60.0));
}

#[test]
fn test_toggle_unknown_container() {
    let mut diagram = diagram_with(&["p0"], None);
    assert!(!diagram.toggle_orientation(ContainerId(3)));
}

#[test]
fn test_label_stays_above_after_toggle() {
    let mut diagram = diagram_with(&["p0", "p1"], None);
    diagram.toggle_orientation(ContainerId(0));
    let c = &diagram.containers()[0];
    assert_eq!(c.label().bounds.bottom(), c.rect().y);
    assert!((c.label().bounds.center().x - c.center().x).abs() < 1e-9);
}
