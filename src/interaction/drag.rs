//! Drag state machine
//!
//! ```text
//! Idle --press(primary)--> Dragging --release(primary)--> Idle
//! any --press(secondary)--> [toggle orientation] --> same state
//! ```
//!
//! During a drag the container follows the pointer step by step. On
//! release the collision validator sees the final position; a rejected drop
//! puts the container back exactly where the press found it. A toggle in
//! the middle of a drag is kept: the saved geometry is re-laid around the
//! drag anchor so a revert only undoes the motion.

use log::{debug, info, trace};

use crate::layout::{Container, ContainerSnapshot, Point};
use crate::model::ContainerId;

use super::{CollisionValidator, GeometryObserver, PointerButton};

/// What a drag step operates on, lent by the diagram for one call
pub struct DragContext<'a> {
    pub containers: &'a mut [Container],
    pub validator: &'a CollisionValidator,
    pub observer: &'a mut dyn GeometryObserver,
}

/// An in-progress drag of one container
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub container: ContainerId,
    /// Container center when the drag started
    pub drag_anchor: Point,
    /// Last pointer position seen
    pub last_pointer: Point,
    snapshot: ContainerSnapshot,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    DragStarted,
    Toggled,
    Ignored,
}

/// Result of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The container stays where it was dropped
    Accepted,
    /// The drop collided with `conflict`; the container went back
    Rejected { conflict: String },
    /// Press and release without any net movement
    Unmoved,
    /// Nothing was being dragged, or the button does not end drags
    Ignored,
}

/// Drives press/move/release for the containers of one diagram
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer-down on `target`
    pub fn press(
        &mut self,
        ctx: &mut DragContext<'_>,
        target: ContainerId,
        pointer: Point,
        button: PointerButton,
    ) -> PressOutcome {
        if !ctx.containers.get(target.0).is_some_and(Container::is_visible) {
            return PressOutcome::Ignored;
        }
        if button == PointerButton::Secondary {
            self.toggle(ctx, target);
            return PressOutcome::Toggled;
        }
        if let DragState::Dragging(session) = &self.state {
            debug!(
                dragging = session.container.0,
                pressed = target.0;
                "press ignored while a drag is in progress"
            );
            return PressOutcome::Ignored;
        }
        let Some(container) = ctx.containers.get(target.0) else {
            return PressOutcome::Ignored;
        };

        debug!(sort = container.name(), x = pointer.x, y = pointer.y; "drag started");
        self.state = DragState::Dragging(DragSession {
            container: target,
            drag_anchor: container.center(),
            last_pointer: pointer,
            snapshot: container.snapshot(),
        });
        PressOutcome::DragStarted
    }

    /// Flip the orientation of `target`, in any state
    ///
    /// When `target` is being dragged, the geometry a rejected drop goes
    /// back to takes the new orientation too.
    pub fn toggle(&mut self, ctx: &mut DragContext<'_>, target: ContainerId) -> bool {
        let Some(container) = ctx.containers.get_mut(target.0) else {
            return false;
        };
        container.toggle_orientation();
        if let DragState::Dragging(session) = &mut self.state {
            if session.container == target {
                session.snapshot = container.snapshot_at(session.drag_anchor);
            }
        }
        ctx.observer.on_geometry_changed();
        true
    }

    /// Pointer motion; returns whether a container moved
    pub fn pointer_move(&mut self, ctx: &mut DragContext<'_>, pointer: Point) -> bool {
        let DragState::Dragging(session) = &mut self.state else {
            return false;
        };
        let Some(container) = ctx.containers.get_mut(session.container.0) else {
            return false;
        };

        let delta = pointer - session.last_pointer;
        container.translate(delta);
        session.last_pointer = pointer;
        ctx.observer.on_geometry_changed();
        true
    }

    /// Pointer-up; a primary release ends the drag and validates the drop
    pub fn release(
        &mut self,
        ctx: &mut DragContext<'_>,
        pointer: Point,
        button: PointerButton,
    ) -> DropOutcome {
        if button != PointerButton::Primary {
            return DropOutcome::Ignored;
        }
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::Ignored;
        };
        trace!(x = pointer.x, y = pointer.y; "release");

        let index = session.container.0;
        let Some(container) = ctx.containers.get(index) else {
            return DropOutcome::Ignored;
        };
        if container.center() == session.drag_anchor {
            return DropOutcome::Unmoved;
        }

        let conflict = ctx
            .validator
            .check(ctx.containers, container)
            .map(|other| other.name().to_string());

        match conflict {
            None => {
                debug!(sort = container.name(); "drop accepted");
                DropOutcome::Accepted
            }
            Some(conflict) => {
                info!(sort = container.name(), conflict = conflict.as_str(); "drop rejected, reverting");
                ctx.containers[index].restore(&session.snapshot);
                ctx.observer.on_geometry_changed();
                DropOutcome::Rejected { conflict }
            }
        }
    }
}
