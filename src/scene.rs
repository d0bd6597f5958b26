//! Scene files: the sorts of a diagram and where they start
//!
//! ```toml
//! [layout]
//! margin = 10
//! safety_distance = 15
//!
//! [palette]
//! colors = ["#b58900", "#dc322f"]
//!
//! [[sorts]]
//! name = "kinase"
//! processes = ["inactive", "active"]
//! anchor = [100, 100]
//! size = [60, 150]
//!
//! [[sorts]]
//! name = "ligand"
//! processes = ["free", "bound"]
//! ```
//!
//! Sorts without an anchor are lined up in a row below the anchored ones.

use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::diagram::Diagram;
use crate::layout::{
    Color, ColorParseError, DiagramError, FixedOracle, LayoutConfig, OracleError, OracleNode,
    PaletteAllocator, Point, RowOracle, Size,
};
use crate::model::Sort;

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("duplicate sort '{0}' in scene")]
    DuplicateSort(String),
    #[error("invalid palette: {0}")]
    InvalidColor(#[from] ColorParseError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

/// A loaded scene, ready to be built into a [`Diagram`]
#[derive(Debug)]
pub struct Scene {
    pub config: LayoutConfig,
    pub palette: Vec<Color>,
    pub sorts: Vec<Rc<Sort>>,
    pub oracle: FixedOracle,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlScene {
    #[serde(default)]
    layout: TomlLayout,
    #[serde(default)]
    palette: TomlPalette,
    #[serde(default)]
    sorts: Vec<TomlSort>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlLayout {
    margin: Option<f64>,
    element_size: Option<f64>,
    safety_distance: Option<f64>,
    label_font_size: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlPalette {
    #[serde(default)]
    colors: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlSort {
    name: String,
    #[serde(default)]
    processes: Vec<String>,
    anchor: Option<[f64; 2]>,
    size: Option<[f64; 2]>,
}

impl TomlLayout {
    fn into_config(self) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        if let Some(margin) = self.margin {
            config = config.with_margin(margin);
        }
        if let Some(size) = self.element_size {
            config = config.with_element_size(size);
        }
        if let Some(distance) = self.safety_distance {
            config = config.with_safety_distance(distance);
        }
        if let Some(font_size) = self.label_font_size {
            config = config.with_label_font_size(font_size);
        }
        config
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;
        let config = parsed.layout.into_config();

        let palette = parsed
            .palette
            .colors
            .iter()
            .map(|c| c.parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for sort in &parsed.sorts {
            if !seen.insert(sort.name.as_str()) {
                return Err(SceneError::DuplicateSort(sort.name.clone()));
            }
        }

        let oracle = place_sorts(&parsed.sorts, &config)?;
        let sorts = parsed
            .sorts
            .into_iter()
            .map(|s| Sort::with_process_names(s.name, s.processes))
            .collect::<Vec<_>>();

        debug!(sorts = sorts.len(), colors = palette.len(); "scene loaded");
        Ok(Scene {
            config,
            palette,
            sorts,
            oracle,
        })
    }

    /// Fresh palette allocator over the scene's colors
    pub fn palette_allocator(&self) -> PaletteAllocator {
        PaletteAllocator::new(self.palette.clone())
    }

    /// Build the diagram for this scene
    pub fn build_diagram(&self) -> Result<Diagram, SceneError> {
        let mut palette = self.palette_allocator();
        let diagram = Diagram::build(&self.sorts, &self.oracle, self.config.clone(), &mut palette)?;
        Ok(diagram)
    }
}

/// Explicit anchors as given, the remaining sorts on a row below them
fn place_sorts(sorts: &[TomlSort], config: &LayoutConfig) -> Result<FixedOracle, OracleError> {
    let size_of = |sort: &TomlSort| match sort.size {
        Some([w, h]) => Size::new(w, h),
        None => config.inferred_container_size(sort.processes.len()),
    };

    let mut oracle = FixedOracle::new();
    let mut left: Option<f64> = None;
    let mut bottom: Option<f64> = None;
    let mut floating = Vec::new();

    for sort in sorts {
        let size = size_of(sort);
        match sort.anchor {
            Some([x, y]) => {
                let mut node = OracleNode::new(sort.name.clone(), Point::new(x, y));
                if sort.size.is_some() {
                    node = node.with_size(size);
                }
                let edge = x - size.width / 2.0;
                left = Some(left.map_or(edge, |l| l.min(edge)));
                let edge = y + size.height / 2.0;
                bottom = Some(bottom.map_or(edge, |b| b.max(edge)));
                oracle.insert(node);
            }
            None => floating.push((sort.name.clone(), size)),
        }
    }

    if !floating.is_empty() {
        let origin = Point::new(
            left.unwrap_or(0.0),
            bottom.map_or(0.0, |b| b + config.safety_distance),
        );
        let row = RowOracle::place(&floating, origin, config.safety_distance)?;
        oracle.extend(row.into_nodes());
    }

    Ok(oracle)
}
