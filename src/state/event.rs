use crate::crop::DragHandle;
use crate::geometry::DisplayPoint;
use crate::input::PointerInput;

/// Pointer gesture in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start {
        handle: DragHandle,
        position: DisplayPoint,
    },
    Move {
        position: DisplayPoint,
    },
    End,
}

impl GestureEvent {
    /// Builds a start event from the element that was pressed. Returns `None`
    /// when the pointer carries no position (a touch list without points).
    pub fn start(handle_id: Option<&str>, pointer: &PointerInput) -> Option<Self> {
        let position = pointer.position()?;
        Some(Self::Start {
            handle: DragHandle::from_element_id(handle_id),
            position,
        })
    }

    pub fn moved(pointer: &PointerInput) -> Option<Self> {
        pointer.position().map(|position| Self::Move { position })
    }
}
