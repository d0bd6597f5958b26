//! Replaying a parsed script against a diagram

use log::debug;
use thiserror::Error;

use crate::diagram::Diagram;
use crate::error::report;
use crate::interaction::{DropOutcome, PointerButton, PressOutcome};
use crate::layout::{DiagramError, Point, Vector};
use crate::model::ContainerId;

use super::ast::{Gesture, Script, Span, Spanned};

/// What one gesture did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Pressed(PressOutcome),
    /// Whether a container followed the pointer
    Moved(bool),
    Released(DropOutcome),
    Toggled,
    /// Whether a `hide`/`show` changed the container's visibility
    Visibility(bool),
    /// Outcome of the release closing a `drag` gesture
    Dragged(DropOutcome),
}

#[derive(Debug, Error, PartialEq)]
pub enum ReplayError {
    #[error("{error}")]
    Lookup { span: Span, error: DiagramError },
}

impl ReplayError {
    pub fn span(&self) -> Span {
        match self {
            ReplayError::Lookup { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ReplayError::Lookup { span, error } => {
                let message = error.to_string();
                report(source, filename, span.clone(), &message, &message)
            }
        }
    }
}

/// Run every gesture of `script` in order
///
/// Stops at the first gesture naming a sort the diagram does not have;
/// gestures before it have already been applied.
pub fn replay(diagram: &mut Diagram, script: &Script) -> Result<Vec<StepOutcome>, ReplayError> {
    script
        .gestures
        .iter()
        .map(|gesture| {
            let outcome = step(diagram, &gesture.node)?;
            debug!(gesture = format!("{:?}", outcome).as_str(); "gesture replayed");
            Ok(outcome)
        })
        .collect()
}

/// Container named by `sort`, with its current center
fn resolve(diagram: &Diagram, sort: &Spanned<String>) -> Result<(ContainerId, Point), ReplayError> {
    diagram
        .container_by_name(&sort.node)
        .map(|c| (c.id(), c.center()))
        .map_err(|error| ReplayError::Lookup {
            span: sort.span.clone(),
            error,
        })
}

fn step(diagram: &mut Diagram, gesture: &Gesture) -> Result<StepOutcome, ReplayError> {
    let outcome = match gesture {
        Gesture::Press { sort, at, button } => {
            let (target, _) = resolve(diagram, sort)?;
            StepOutcome::Pressed(diagram.press(target, *at, *button))
        }
        Gesture::Move { to } => StepOutcome::Moved(diagram.pointer_move(*to)),
        Gesture::Release { at, button } => StepOutcome::Released(diagram.release(*at, *button)),
        Gesture::Toggle { sort } => {
            let (target, _) = resolve(diagram, sort)?;
            diagram.toggle_orientation(target);
            StepOutcome::Toggled
        }
        Gesture::Hide { sort } => {
            let (target, _) = resolve(diagram, sort)?;
            StepOutcome::Visibility(diagram.set_visible(target, false))
        }
        Gesture::Show { sort } => {
            let (target, _) = resolve(diagram, sort)?;
            StepOutcome::Visibility(diagram.set_visible(target, true))
        }
        Gesture::Drag { sort, by, steps } => {
            let (target, start) = resolve(diagram, sort)?;
            if diagram.press(target, start, PointerButton::Primary) != PressOutcome::DragStarted {
                return Ok(StepOutcome::Dragged(DropOutcome::Ignored));
            }

            let n = f64::from((*steps).max(1));
            let mut pointer = start;
            for i in 1..=(*steps).max(1) {
                let k = f64::from(i);
                pointer = start + Vector::new(by.dx * k / n, by.dy * k / n);
                diagram.pointer_move(pointer);
            }
            StepOutcome::Dragged(diagram.release(pointer, PointerButton::Primary))
        }
    };
    Ok(outcome)
}
