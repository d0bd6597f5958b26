//! Containers: the draggable groups of a diagram
//!
//! A container is positioned by its center (the oracle anchor) and owns the
//! geometry of its elements. Elements are laid out in list order along the
//! container's orientation axis:
//!
//! ```text
//! first slot    = leading edge + margin + element_size / 2
//! next slot     = previous slot + 2 * margin + element_size
//! cross axis    = cross edge + margin + element_size / 2
//! ```

use std::rc::Rc;

use log::{debug, trace};

use crate::model::{ContainerId, ElementHandle, Sort};

use super::config::LayoutConfig;
use super::element::Element;
use super::oracle::OracleNode;
use super::palette::{Color, PaletteAllocator};
use super::types::{Label, Orientation, Point, Rect, Size, Vector};

/// Saved geometry of a container, enough to put it back exactly
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    pub center: Point,
    pub size: Size,
    pub orientation: Orientation,
    pub element_centers: Vec<Point>,
}

/// A named group of elements, drawn as a rectangle
#[derive(Debug)]
pub struct Container {
    id: ContainerId,
    sort: Rc<Sort>,
    center: Point,
    size: Size,
    orientation: Orientation,
    elements: Vec<Element>,
    label: Label,
    color: Color,
    visible: bool,
    config: LayoutConfig,
}

impl Container {
    /// Build the container for `sort` around the oracle anchor
    ///
    /// Takes the next palette color, lays the processes out vertically and
    /// points every process back at the element created for it.
    pub fn new(
        id: ContainerId,
        sort: Rc<Sort>,
        node: &OracleNode,
        size: Size,
        config: &LayoutConfig,
        palette: &mut PaletteAllocator,
    ) -> Self {
        let color = palette.next_color();
        let text = format!("sort {}", sort.name());
        let label = Label::above(text.as_str(), Point::origin(), config.text_size(&text));

        let elements = sort
            .processes()
            .iter()
            .map(|p| Element::new(Rc::clone(p), node.anchor, config))
            .collect();

        let mut container = Self {
            id,
            sort,
            center: node.anchor,
            size,
            orientation: Orientation::Vertical,
            elements,
            label,
            color,
            visible: true,
            config: config.clone(),
        };
        container.reflow();

        for (index, element) in container.elements.iter().enumerate() {
            element
                .process()
                .bind_element(ElementHandle { container: id, index });
        }

        debug!(
            sort = container.name(),
            elements = container.elements.len(),
            color = container.color.to_hex().as_str();
            "container built"
        );
        container
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.sort.name()
    }

    pub fn sort(&self) -> &Rc<Sort> {
        &self.sort
    }

    /// Center of the container, i.e. the oracle anchor after any moves
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn top_left(&self) -> Point {
        self.rect().top_left()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_and_size(self.center, self.size)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Hidden containers are neither drawn nor hit by the pointer, but
    /// keep their place for collision checks
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
        debug!(sort = self.name(); "container hidden");
    }

    pub fn show(&mut self) {
        self.visible = true;
        debug!(sort = self.name(); "container shown");
    }

    /// Move the container and all of its elements rigidly
    pub fn translate(&mut self, delta: Vector) {
        self.center += delta;
        for element in &mut self.elements {
            element.translate(delta);
        }
        self.place_label();
        trace!(sort = self.name(), dx = delta.dx, dy = delta.dy; "container translated");
    }

    /// Swap width and height around the unchanged center and lay the
    /// elements out along the other axis
    ///
    /// Applying it twice gives back the original geometry. Element order is
    /// never touched.
    pub fn toggle_orientation(&mut self) {
        self.size = self.size.transpose();
        self.orientation = self.orientation.flipped();
        self.reflow();
        debug!(
            sort = self.name(),
            orientation = format!("{:?}", self.orientation).as_str();
            "orientation toggled"
        );
    }

    /// Center of the element slot `index` for the current orientation
    pub fn slot_center(&self, index: usize) -> Point {
        self.slot_center_around(self.center, index)
    }

    fn slot_center_around(&self, center: Point, index: usize) -> Point {
        let top_left = Rect::from_center_and_size(center, self.size).top_left();
        let lead = self.config.first_slot_offset();
        let along = lead + index as f64 * self.config.element_spacing();
        match self.orientation {
            Orientation::Vertical => Point::new(top_left.x + lead, top_left.y + along),
            Orientation::Horizontal => Point::new(top_left.x + along, top_left.y + lead),
        }
    }

    pub fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot {
            center: self.center,
            size: self.size,
            orientation: self.orientation,
            element_centers: self.elements.iter().map(Element::center).collect(),
        }
    }

    /// Geometry this container would have if it were laid out around
    /// `center` with its current size and orientation
    pub fn snapshot_at(&self, center: Point) -> ContainerSnapshot {
        ContainerSnapshot {
            center,
            size: self.size,
            orientation: self.orientation,
            element_centers: (0..self.elements.len())
                .map(|index| self.slot_center_around(center, index))
                .collect(),
        }
    }

    /// Put back geometry saved by [`Container::snapshot`]
    pub fn restore(&mut self, snapshot: &ContainerSnapshot) {
        self.center = snapshot.center;
        self.size = snapshot.size;
        self.orientation = snapshot.orientation;
        for (element, &center) in self.elements.iter_mut().zip(&snapshot.element_centers) {
            element.set_center(center);
        }
        self.place_label();
    }

    fn reflow(&mut self) {
        for index in 0..self.elements.len() {
            let center = self.slot_center(index);
            self.elements[index].set_center(center);
        }
        self.place_label();
    }

    fn place_label(&mut self) {
        let text_size = self.label.bounds.size();
        let text = std::mem::take(&mut self.label.text);
        self.label = Label::above(text, self.rect().top_center(), text_size);
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        for element in &self.elements {
            element.process().release_element(self.id);
        }
    }
}
