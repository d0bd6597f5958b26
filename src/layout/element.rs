//! Drawable leaf of a container

use std::rc::Rc;

use crate::model::Process;

use super::config::LayoutConfig;
use super::types::{Label, Point, Rect, Size, Vector};

/// One process drawn inside a container
///
/// Every derived rectangle (margin box, label) is recomputed from `center`,
/// so restoring a center restores the whole element exactly.
#[derive(Debug)]
pub struct Element {
    process: Rc<Process>,
    center: Point,
    size: Size,
    margin: f64,
    margin_box: Rect,
    label: Label,
}

impl Element {
    pub fn new(process: Rc<Process>, center: Point, config: &LayoutConfig) -> Self {
        let size = Size::square(config.element_size);
        let text_size = config.text_size(process.name());
        let label = Label::centered_on(process.name(), center, text_size);
        Self {
            margin_box: Rect::from_center_and_size(center, size.grown(config.margin)),
            process,
            center,
            size,
            margin: config.margin,
            label,
        }
    }

    pub fn process(&self) -> &Rc<Process> {
        &self.process
    }

    pub fn name(&self) -> &str {
        self.process.name()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Bounds of the ellipse drawing this element
    pub fn rect(&self) -> Rect {
        Rect::from_center_and_size(self.center, self.size)
    }

    /// Exclusion zone around the element; neighbouring zones touch but never overlap
    pub fn margin_box(&self) -> Rect {
        self.margin_box
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub(crate) fn set_center(&mut self, center: Point) {
        self.center = center;
        self.margin_box = Rect::from_center_and_size(center, self.size.grown(self.margin));
        self.label.bounds = Rect::from_center_and_size(center, self.label.bounds.size());
    }

    pub(crate) fn translate(&mut self, delta: Vector) {
        self.set_center(self.center + delta);
    }
}
