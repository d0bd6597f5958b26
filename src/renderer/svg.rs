//! SVG snapshot of a diagram's current geometry

use crate::diagram::Diagram;
use crate::layout::{Container, Label, Rect};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, rect: &Rect, class: &str, styles: &str) {
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            self.config.class(class),
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            styles
        ));
    }

    /// Add an ellipse inscribed in `rect`
    pub fn add_ellipse(&mut self, rect: &Rect, class: &str, styles: &str) {
        let center = rect.center();
        self.elements.push(format!(
            r#"{}<ellipse class="{}" cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            self.indent_str(),
            self.config.class(class),
            center.x,
            center.y,
            rect.width / 2.0,
            rect.height / 2.0,
            styles
        ));
    }

    /// Add a label, centered in its bounds
    pub fn add_label(&mut self, label: &Label, styles: &str) {
        let center = label.bounds.center();
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle"{}>{}</text>"#,
            self.indent_str(),
            self.config.class("label"),
            center.x,
            center.y,
            styles,
            escape_xml(&label.text)
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render the current geometry of `diagram` to an SVG string
///
/// Containers are drawn in build order, so later containers cover earlier
/// ones, matching [`Diagram::container_at`]. Hidden containers are left out.
pub fn render_svg(diagram: &Diagram, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let visible: Vec<&Container> = diagram.containers().iter().filter(|c| c.is_visible()).collect();

    for container in &visible {
        render_container(container, config, &mut builder);
    }

    builder.build(bounds(&visible))
}

fn render_container(container: &Container, config: &SvgConfig, builder: &mut SvgBuilder) {
    let color = container.color().to_hex();
    let orientation = format!("{:?}", container.orientation()).to_lowercase();

    builder.start_group(
        Some(container.name()),
        &[config.class("sort"), config.class(&orientation)],
    );
    builder.add_rect(
        &container.rect(),
        "container",
        &format!(
            r#" fill="none" stroke="{}" stroke-width="{}""#,
            color, config.container_stroke_width
        ),
    );
    builder.add_label(container.label(), &format!(r#" fill="{}""#, color));

    for element in container.elements() {
        builder.add_ellipse(
            &element.rect(),
            "process",
            &format!(r#" fill="{}" stroke="{}""#, config.element_fill, color),
        );
        builder.add_label(element.label(), "");
    }
    builder.end_group();
}

/// Union of every container rectangle and label
fn bounds(containers: &[&Container]) -> Rect {
    containers
        .iter()
        .map(|c| c.rect().union(&c.label().bounds))
        .reduce(|acc, r| acc.union(&r))
        .unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FixedOracle, LayoutConfig, OracleNode, PaletteAllocator, Point, Size};
    use crate::model::{ContainerId, Sort};

    fn diagram() -> Diagram {
        let sorts = vec![
            Sort::with_process_names("a", ["a0", "a1"]),
            Sort::with_process_names("b&c", ["x"]),
        ];
        let oracle = FixedOracle::new()
            .with_node(OracleNode::new("a", Point::new(100.0, 100.0)).with_size(Size::new(60.0, 150.0)))
            .with_node(OracleNode::new("b&c", Point::new(300.0, 100.0)));
        Diagram::build(
            &sorts,
            &oracle,
            LayoutConfig::default(),
            &mut PaletteAllocator::default(),
        )
        .expect("diagram should build")
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_containers_and_elements() {
        let svg = render_svg(&diagram(), &SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"<g id="a" class="sb-sort sb-vertical">"#));
        assert!(svg.contains(r#"class="sb-container" x="70" y="25" width="60" height="150""#));
        assert!(svg.contains(r##"stroke="#dc322f""##));
        assert_eq!(svg.matches("<ellipse").count(), 3);
        assert!(svg.contains(r#"cx="100" cy="55" rx="20" ry="20""#));
        assert!(svg.contains(">sort a</text>"));
        assert!(svg.contains(">a1</text>"));
        assert!(svg.contains(r#"id="b&amp;c""#));
        assert!(svg.contains(">sort b&amp;c</text>"));
    }

    #[test]
    fn test_viewbox_covers_labels() {
        let config = SvgConfig::default().with_viewbox_padding(0.0);
        let d = diagram();
        let svg = render_svg(&d, &config);
        let label_top = d.containers()[0].label().bounds.y;
        assert!(svg.contains(&format!(r#"viewBox="70 {} "#, label_top)));
    }

    #[test]
    fn test_hidden_containers_are_left_out() {
        let mut d = diagram();
        d.set_visible(ContainerId(1), false);
        let config = SvgConfig::default().with_viewbox_padding(0.0);
        let svg = render_svg(&d, &config);
        assert!(!svg.contains("b&amp;c"));
        assert_eq!(svg.matches("<ellipse").count(), 2);
        assert!(svg.contains(r#" width="60" height=""#));
        // viewBox ends at a's right edge
        let rect = d.containers()[0].rect().union(&d.containers()[0].label().bounds);
        assert!(svg.contains(&format!(r#" {} {}">"#, rect.width, rect.height)));
    }

    #[test]
    fn test_compact_output_without_prefix() {
        let config = SvgConfig::default()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("");
        let svg = render_svg(&diagram(), &config);
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"<g id="a" class="sort vertical">"#));
        assert!(svg.contains(r#"<rect class="container" "#));
    }

    #[test]
    fn test_empty_diagram() {
        let d = Diagram::build(
            &[],
            &FixedOracle::new(),
            LayoutConfig::default(),
            &mut PaletteAllocator::default(),
        )
        .expect("empty diagram should build");
        let svg = render_svg(&d, &SvgConfig::default().with_standalone(false));
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-20 -20 40 40">"#));
    }
}
