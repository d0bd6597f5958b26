//! Output options for SVG snapshots

/// How a diagram snapshot is written out
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Space left around the union of containers and labels
    pub viewbox_padding: f64,

    /// Emit the `<?xml ...?>` declaration
    pub standalone: bool,

    /// One tag per line, indented by group depth
    pub pretty_print: bool,

    /// Prepended to every CSS class; empty for bare class names
    pub class_prefix: String,

    /// Stroke width of container outlines
    pub container_stroke_width: f64,

    /// Fill of element ellipses
    pub element_fill: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: "sb-".to_string(),
            container_stroke_width: 2.0,
            element_fill: "#ffffff".to_string(),
        }
    }
}

impl SvgConfig {
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Class name with the configured prefix
    pub fn class(&self, name: &str) -> String {
        format!("{}{}", self.class_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(SvgConfig::default().class("sort"), "sb-sort");
        assert_eq!(SvgConfig::default().with_class_prefix("").class("sort"), "sort");
    }
}
