//! Configuration for the layout engine

use super::types::Size;

/// Layout constants shared by every container of a diagram
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Gap between a container edge and its elements, and half the gap
    /// between two neighbouring elements
    pub margin: f64,

    /// Side of the square every element is drawn in
    pub element_size: f64,

    /// Minimum clearance enforced between two containers on drop
    pub safety_distance: f64,

    /// Font size used to estimate label extents
    pub label_font_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            element_size: 40.0,
            safety_distance: 15.0,
            label_font_size: 14.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element margin
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the element size
    pub fn with_element_size(mut self, size: f64) -> Self {
        self.element_size = size;
        self
    }

    /// Set the safety distance between containers
    pub fn with_safety_distance(mut self, distance: f64) -> Self {
        self.safety_distance = distance;
        self
    }

    /// Set the label font size
    pub fn with_label_font_size(mut self, font_size: f64) -> Self {
        self.label_font_size = font_size;
        self
    }

    /// Distance between the centers of two consecutive elements
    pub fn element_spacing(&self) -> f64 {
        2.0 * self.margin + self.element_size
    }

    /// Offset of the first element center from the container's leading
    /// edges, on both axes
    pub fn first_slot_offset(&self) -> f64 {
        self.margin + self.element_size / 2.0
    }

    /// Size of a container holding `count` elements in a vertical run, used
    /// when the oracle gives no explicit size
    pub fn inferred_container_size(&self, count: usize) -> Size {
        let slot = self.element_spacing();
        Size::new(slot, count.max(1) as f64 * slot)
    }

    /// Rough extent of `text` rendered at the label font size
    ///
    /// Approximate width: ~0.6 * font_size per character.
    pub fn text_size(&self, text: &str) -> Size {
        let chars = text.chars().count() as f64;
        Size::new(chars * self.label_font_size * 0.6, self.label_font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.margin, 10.0);
        assert_eq!(config.element_size, 40.0);
        assert_eq!(config.safety_distance, 15.0);
        assert_eq!(config.label_font_size, 14.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_margin(5.0)
            .with_element_size(20.0)
            .with_safety_distance(30.0);

        assert_eq!(config.margin, 5.0);
        assert_eq!(config.element_size, 20.0);
        assert_eq!(config.safety_distance, 30.0);
        assert_eq!(config.element_spacing(), 30.0);
        assert_eq!(config.first_slot_offset(), 15.0);
    }

    #[test]
    fn test_inferred_size() {
        let config = LayoutConfig::default();
        assert_eq!(config.inferred_container_size(0), Size::new(60.0, 60.0));
        assert_eq!(config.inferred_container_size(3), Size::new(60.0, 180.0));
    }

    #[test]
    fn test_text_size_estimate() {
        let config = LayoutConfig::default().with_label_font_size(10.0);
        assert_eq!(config.text_size("abcd"), Size::new(24.0, 10.0));
        assert_eq!(config.text_size(""), Size::new(0.0, 10.0));
    }
}
