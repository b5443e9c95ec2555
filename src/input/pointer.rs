use crate::geometry::DisplayPoint;

/// Raw pointer sample from either a mouse or a touch screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse(DisplayPoint),
    /// Active touch points; only the first one drives a gesture.
    Touch(Vec<DisplayPoint>),
}

impl PointerInput {
    pub fn position(&self) -> Option<DisplayPoint> {
        match self {
            Self::Mouse(point) => Some(*point),
            Self::Touch(points) => points.first().copied(),
        }
    }
}
