//! Sortboard - interactive layout for sort/process diagrams
//!
//! A diagram shows each *sort* as a colored rectangle (a container) holding
//! its *processes* as small labeled elements. Containers start where a layout
//! oracle puts them; afterwards they can be dragged with the pointer, and a
//! drop too close to another container is undone. A secondary click flips a
//! container between a vertical and a horizontal element run.
//!
//! # Example
//!
//! ```rust
//! use sortboard::render;
//!
//! let svg = render(r#"
//! [[sorts]]
//! name = "kinase"
//! processes = ["inactive", "active"]
//! anchor = [100, 100]
//! "#).unwrap();
//! assert!(svg.contains("sort kinase"));
//! ```

pub mod diagram;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod renderer;
pub mod scene;
pub mod script;

pub use diagram::Diagram;
pub use error::ScriptError;
pub use interaction::{
    CollisionValidator, DropOutcome, GeometryObserver, PointerButton, PressOutcome,
};
pub use layout::{DiagramError, LayoutConfig, LayoutOracle, OracleNode, Point, Size, Vector};
pub use model::{ContainerId, ElementHandle, Process, Sort};
pub use renderer::{render_svg, SvgConfig};
pub use scene::{Scene, SceneError};
pub use script::{parse, replay, ReplayError, Script, StepOutcome};

use log::info;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum SessionError {
    /// Error loading the scene
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Error parsing the gesture script
    #[error("script errors: {}", format_script_errors(.0))]
    Script(Vec<ScriptError>),

    /// Error replaying the gesture script
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),
}

impl From<Vec<ScriptError>> for SessionError {
    fn from(errors: Vec<ScriptError>) -> Self {
        SessionError::Script(errors)
    }
}

impl SessionError {
    /// Format script and replay errors against the script source with
    /// ariadne; other errors fall back to their message
    pub fn format(&self, script: &str, filename: &str) -> String {
        match self {
            SessionError::Script(errors) => errors
                .iter()
                .map(|e| e.format(script, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            SessionError::Replay(err) => err.format(script, filename),
            SessionError::Scene(_) => self.to_string(),
        }
    }
}

fn format_script_errors(errors: &[ScriptError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// What the pipeline produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// SVG snapshot of the final geometry
    #[default]
    Svg,
    /// One text line per container and element
    Summary,
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Output format
    pub output: OutputFormat,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}

/// Render a scene to SVG with default configuration and no gestures
pub fn render(scene: &str) -> Result<String, SessionError> {
    render_with_config(scene, None, &RenderConfig::default())
}

/// Load a scene, replay an optional gesture script on it and render the
/// resulting geometry
///
/// # Example
///
/// ```rust
/// use sortboard::{render_with_config, OutputFormat, RenderConfig};
///
/// let scene = r#"
/// [[sorts]]
/// name = "a"
/// processes = ["a0"]
/// anchor = [100, 100]
/// "#;
/// let config = RenderConfig::new().with_output(OutputFormat::Summary);
/// let summary = render_with_config(scene, Some("drag a by 10, 0"), &config).unwrap();
/// assert!(summary.starts_with("a [vertical] center=(110, 100)"));
/// ```
pub fn render_with_config(
    scene: &str,
    script: Option<&str>,
    config: &RenderConfig,
) -> Result<String, SessionError> {
    let scene = Scene::from_str(scene)?;
    let mut diagram = scene.build_diagram()?;

    if let Some(source) = script {
        let script = parse(source)?;
        let outcomes = replay(&mut diagram, &script)?;
        info!(gestures = outcomes.len(); "script replayed");
    }

    Ok(match config.output {
        OutputFormat::Svg => render_svg(&diagram, &config.svg),
        OutputFormat::Summary => diagram.describe(),
    })
}
