use std::str::FromStr;

use thiserror::Error;

use crate::crop::{DragHandle, UnknownHandle};
use crate::geometry::{DisplayPoint, DisplayRect};
use crate::input::{parse_coordinate, FieldKey};
use crate::state::{CropController, CropView, GestureEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptParseError {
    #[error("expected NAME:VALUE, got {0:?}")]
    MissingSeparator(String),
    #[error(transparent)]
    UnknownHandle(#[from] UnknownHandle),
    #[error("unknown crop field: {0:?}")]
    UnknownField(String),
    #[error("expected DX,DY offset, got {0:?}")]
    InvalidOffset(String),
}

/// One scripted gesture: grab `handle` and move the pointer by `dx, dy`
/// display pixels. Written as `se:20,20` or `move:-5,3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStep {
    pub handle: DragHandle,
    pub dx: f64,
    pub dy: f64,
}

impl FromStr for DragStep {
    type Err = ScriptParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (handle, offset) = value
            .split_once(':')
            .ok_or_else(|| ScriptParseError::MissingSeparator(value.to_string()))?;
        let handle = handle.parse::<DragHandle>()?;
        let invalid = || ScriptParseError::InvalidOffset(offset.to_string());
        let (dx, dy) = offset.split_once(',').ok_or_else(invalid)?;
        let dx = dx.trim().parse::<f64>().map_err(|_| invalid())?;
        let dy = dy.trim().parse::<f64>().map_err(|_| invalid())?;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(invalid());
        }
        Ok(Self { handle, dx, dy })
    }
}

/// A stepper press on one field, written as `x2:+10` or `y1:-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNudge {
    pub key: FieldKey,
    pub delta: i32,
}

impl FromStr for FieldNudge {
    type Err = ScriptParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, delta) = value
            .split_once(':')
            .ok_or_else(|| ScriptParseError::MissingSeparator(value.to_string()))?;
        let key = FieldKey::from_name(name.trim())
            .ok_or_else(|| ScriptParseError::UnknownField(name.to_string()))?;
        Ok(Self {
            key,
            delta: parse_coordinate(delta),
        })
    }
}

/// Where a pointer would press to grab `handle` on the overlay.
pub fn handle_anchor(rect: DisplayRect, handle: DragHandle) -> DisplayPoint {
    let edges = handle.edges();
    let mid_x = (rect.x1 + rect.x2) / 2.0;
    let mid_y = (rect.y1 + rect.y2) / 2.0;
    let x = if edges.west {
        rect.x1
    } else if edges.east {
        rect.x2
    } else {
        mid_x
    };
    let y = if edges.north {
        rect.y1
    } else if edges.south {
        rect.y2
    } else {
        mid_y
    };
    DisplayPoint::new(x, y)
}

/// Replays `step` as a start, move and end gesture. Does nothing before an
/// image is loaded.
pub fn run_drag<V: CropView>(controller: &mut CropController<V>, step: DragStep) {
    let Some(overlay) = controller.overlay_rect() else {
        return;
    };
    let start = handle_anchor(overlay, step.handle);
    let end = DisplayPoint::new(start.x + step.dx, start.y + step.dy);
    controller.handle_gesture_event(GestureEvent::Start {
        handle: step.handle,
        position: start,
    });
    controller.handle_gesture_event(GestureEvent::Move { position: end });
    controller.handle_gesture_event(GestureEvent::End);
}
