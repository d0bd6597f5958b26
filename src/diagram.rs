//! The diagram: every container of a scene plus the interaction state
//!
//! `Diagram` owns the containers and is the only way to mutate them. The
//! event layer forwards pointer events here; the diagram lends its
//! containers, validator and observer to the drag controller for each step.

use std::collections::HashSet;
use std::rc::Rc;

use log::info;

use crate::interaction::{
    CollisionValidator, DragContext, DragController, DropOutcome, GeometryObserver, NullObserver,
    PointerButton, PressOutcome,
};
use crate::layout::{
    find_similar, Container, DiagramError, Element, LayoutConfig, LayoutOracle, Orientation,
    PaletteAllocator, Point,
};
use crate::model::{ContainerId, ElementHandle, Sort};

pub struct Diagram {
    containers: Vec<Container>,
    config: LayoutConfig,
    validator: CollisionValidator,
    controller: DragController,
    observer: Box<dyn GeometryObserver>,
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("containers", &self.containers)
            .field("config", &self.config)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl Diagram {
    /// Build one container per sort, in order, placed by `oracle`
    pub fn build<O>(
        sorts: &[Rc<Sort>],
        oracle: &O,
        config: LayoutConfig,
        palette: &mut PaletteAllocator,
    ) -> Result<Self, DiagramError>
    where
        O: LayoutOracle + ?Sized,
    {
        let mut seen = HashSet::new();
        let mut containers = Vec::with_capacity(sorts.len());

        for sort in sorts {
            if !seen.insert(sort.name()) {
                return Err(DiagramError::duplicate(sort.name()));
            }
            let node = oracle
                .node(sort.name())
                .ok_or_else(|| DiagramError::missing_node(sort.name()))?;
            let size = node
                .size
                .unwrap_or_else(|| config.inferred_container_size(sort.processes().len()));
            let id = ContainerId(containers.len());
            containers.push(Container::new(
                id,
                Rc::clone(sort),
                &node,
                size,
                &config,
                palette,
            ));
        }

        info!(containers = containers.len(); "diagram built");
        Ok(Self {
            containers,
            validator: CollisionValidator::new(config.safety_distance),
            config,
            controller: DragController::new(),
            observer: Box::new(NullObserver),
        })
    }

    /// Install the hook called after every geometry change
    pub fn with_observer(mut self, observer: impl GeometryObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn validator(&self) -> &CollisionValidator {
        &self.validator
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0)
    }

    /// Look a container up by sort name, suggesting close names on a miss
    pub fn container_by_name(&self, name: &str) -> Result<&Container, DiagramError> {
        self.containers
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| {
                let suggestions = find_similar(self.containers.iter().map(Container::name), name, 2);
                DiagramError::unknown(name, suggestions)
            })
    }

    /// Resolve a process back-reference
    pub fn element(&self, handle: ElementHandle) -> Option<&Element> {
        self.container(handle.container)?.element(handle.index)
    }

    /// Topmost visible container under `point`; later containers are drawn on top
    pub fn container_at(&self, point: Point) -> Option<ContainerId> {
        self.containers
            .iter()
            .rev()
            .find(|c| c.is_visible() && c.rect().contains(point))
            .map(Container::id)
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn press(&mut self, target: ContainerId, pointer: Point, button: PointerButton) -> PressOutcome {
        let mut ctx = DragContext {
            containers: &mut self.containers,
            validator: &self.validator,
            observer: self.observer.as_mut(),
        };
        self.controller.press(&mut ctx, target, pointer, button)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let mut ctx = DragContext {
            containers: &mut self.containers,
            validator: &self.validator,
            observer: self.observer.as_mut(),
        };
        self.controller.pointer_move(&mut ctx, pointer)
    }

    pub fn release(&mut self, pointer: Point, button: PointerButton) -> DropOutcome {
        let mut ctx = DragContext {
            containers: &mut self.containers,
            validator: &self.validator,
            observer: self.observer.as_mut(),
        };
        self.controller.release(&mut ctx, pointer, button)
    }

    /// Toggle a container's orientation outside of any pointer gesture
    ///
    /// Works in any state; toggling the container being dragged keeps the
    /// drag going.
    pub fn toggle_orientation(&mut self, target: ContainerId) -> bool {
        let mut ctx = DragContext {
            containers: &mut self.containers,
            validator: &self.validator,
            observer: self.observer.as_mut(),
        };
        self.controller.toggle(&mut ctx, target)
    }

    /// Hide or show a container; returns whether anything changed
    pub fn set_visible(&mut self, target: ContainerId, visible: bool) -> bool {
        let Some(container) = self.containers.get_mut(target.0) else {
            return false;
        };
        if container.is_visible() == visible {
            return false;
        }
        if visible {
            container.show();
        } else {
            container.hide();
        }
        self.observer.on_geometry_changed();
        true
    }

    /// One line per container and per element, for logs and tests
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for c in &self.containers {
            let orientation = match c.orientation() {
                Orientation::Vertical => "vertical",
                Orientation::Horizontal => "horizontal",
            };
            let hidden = if c.is_visible() { "" } else { " hidden" };
            out.push_str(&format!(
                "{} [{}]{} center=({}, {}) size={}x{}\n",
                c.name(),
                orientation,
                hidden,
                c.center().x,
                c.center().y,
                c.size().width,
                c.size().height
            ));
            for e in c.elements() {
                out.push_str(&format!("  {} ({}, {})\n", e.name(), e.center().x, e.center().y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FixedOracle, OracleNode, Size};
    use std::cell::Cell;

    fn two_sorts() -> (Vec<Rc<Sort>>, FixedOracle) {
        let sorts = vec![
            Sort::with_process_names("a", ["a0", "a1"]),
            Sort::with_process_names("b", ["b0"]),
        ];
        let oracle = FixedOracle::new()
            .with_node(OracleNode::new("a", Point::new(100.0, 100.0)).with_size(Size::new(60.0, 150.0)))
            .with_node(OracleNode::new("b", Point::new(400.0, 100.0)));
        (sorts, oracle)
    }

    fn build(sorts: &[Rc<Sort>], oracle: &FixedOracle) -> Diagram {
        Diagram::build(
            sorts,
            oracle,
            LayoutConfig::default(),
            &mut PaletteAllocator::default(),
        )
        .expect("diagram should build")
    }

    #[test]
    fn test_build_infers_missing_size() {
        let (sorts, oracle) = two_sorts();
        let diagram = build(&sorts, &oracle);
        assert_eq!(diagram.containers()[0].size(), Size::new(60.0, 150.0));
        assert_eq!(diagram.containers()[1].size(), Size::new(60.0, 60.0));
    }

    #[test]
    fn test_build_missing_node() {
        let (sorts, _) = two_sorts();
        let oracle = FixedOracle::new().with_node(OracleNode::new("a", Point::origin()));
        let err = Diagram::build(
            &sorts,
            &oracle,
            LayoutConfig::default(),
            &mut PaletteAllocator::default(),
        )
        .unwrap_err();
        assert_eq!(err, DiagramError::missing_node("b"));
    }

    #[test]
    fn test_build_duplicate_sort() {
        let sorts = vec![
            Sort::with_process_names("a", ["x"]),
            Sort::with_process_names("a", ["y"]),
        ];
        let oracle = FixedOracle::new().with_node(OracleNode::new("a", Point::origin()));
        let err = Diagram::build(
            &sorts,
            &oracle,
            LayoutConfig::default(),
            &mut PaletteAllocator::default(),
        )
        .unwrap_err();
        assert_eq!(err, DiagramError::duplicate("a"));
    }

    #[test]
    fn test_back_references_resolve() {
        let (sorts, oracle) = two_sorts();
        let diagram = build(&sorts, &oracle);
        let process = &sorts[0].processes()[1];
        let handle = process.element().expect("process should be bound");
        let element = diagram.element(handle).expect("handle should resolve");
        assert_eq!(element.name(), "a1");

        drop(diagram);
        assert_eq!(process.element(), None);
    }

    #[test]
    fn test_container_lookup_suggests() {
        let (sorts, oracle) = two_sorts();
        let diagram = build(&sorts, &oracle);
        assert_eq!(diagram.container_by_name("b").map(Container::id), Ok(ContainerId(1)));
        let err = diagram.container_by_name("bb").unwrap_err();
        assert_eq!(err.suggestions(), Some(&["b".to_string(), "a".to_string()][..]));
    }

    #[test]
    fn test_container_at() {
        let (sorts, oracle) = two_sorts();
        let diagram = build(&sorts, &oracle);
        assert_eq!(diagram.container_at(Point::new(100.0, 100.0)), Some(ContainerId(0)));
        assert_eq!(diagram.container_at(Point::new(400.0, 80.0)), Some(ContainerId(1)));
        assert_eq!(diagram.container_at(Point::new(250.0, 100.0)), None);
    }

    #[test]
    fn test_hidden_container_is_not_hit() {
        let (sorts, oracle) = two_sorts();
        let mut diagram = build(&sorts, &oracle);
        assert!(diagram.set_visible(ContainerId(1), false));
        assert!(!diagram.set_visible(ContainerId(1), false));
        assert_eq!(diagram.container_at(Point::new(400.0, 80.0)), None);
        assert_eq!(
            diagram.press(ContainerId(1), Point::new(400.0, 100.0), PointerButton::Primary),
            PressOutcome::Ignored
        );
        assert!(!diagram.is_dragging());

        assert!(diagram.set_visible(ContainerId(1), true));
        assert_eq!(diagram.container_at(Point::new(400.0, 80.0)), Some(ContainerId(1)));
        assert!(!diagram.set_visible(ContainerId(7), false));
    }

    #[test]
    fn test_observer_sees_every_step() {
        let (sorts, oracle) = two_sorts();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut diagram = build(&sorts, &oracle).with_observer(move || counter.set(counter.get() + 1));

        diagram.press(ContainerId(0), Point::new(100.0, 100.0), PointerButton::Primary);
        diagram.pointer_move(Point::new(110.0, 100.0));
        diagram.pointer_move(Point::new(120.0, 100.0));
        assert_eq!(calls.get(), 2);

        assert_eq!(diagram.release(Point::new(120.0, 100.0), PointerButton::Primary), DropOutcome::Accepted);
        assert_eq!(calls.get(), 2);

        assert!(diagram.toggle_orientation(ContainerId(1)));
        assert_eq!(calls.get(), 3);

        assert!(diagram.set_visible(ContainerId(1), false));
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn test_describe() {
        let (sorts, oracle) = two_sorts();
        let diagram = build(&sorts, &oracle);
        insta::assert_snapshot!(diagram.describe(), @r"
        a [vertical] center=(100, 100) size=60x150
          a0 (100, 55)
          a1 (100, 115)
        b [vertical] center=(400, 100) size=60x60
          b0 (400, 100)
        ");
    }

    #[test]
    fn test_describe_marks_hidden() {
        let (sorts, oracle) = two_sorts();
        let mut diagram = build(&sorts, &oracle);
        diagram.set_visible(ContainerId(0), false);
        assert!(diagram.describe().starts_with("a [vertical] hidden center=(100, 100)"));
    }
}
