//! Pointer interaction: dragging containers and validating drops

pub mod collision;
pub mod drag;

pub use collision::CollisionValidator;
pub use drag::{DragContext, DragController, DragState, DropOutcome, PressOutcome};

/// Pointer button that started or ended a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Drags containers
    #[default]
    Primary,
    /// Toggles container orientation
    Secondary,
}

/// Notified after every step that changes container geometry
///
/// Anything drawn from container positions (relations between sorts, for
/// instance) must re-read them on notification instead of caching.
pub trait GeometryObserver {
    fn on_geometry_changed(&mut self);
}

impl<F: FnMut()> GeometryObserver for F {
    fn on_geometry_changed(&mut self) {
        self()
    }
}

/// Observer that ignores notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GeometryObserver for NullObserver {
    fn on_geometry_changed(&mut self) {}
}
