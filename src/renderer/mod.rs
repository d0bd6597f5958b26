//! SVG renderer for diagram snapshots
//!
//! Reads container and element geometry straight from a [`crate::Diagram`];
//! render again after any gesture to see the new positions.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::render_svg;
