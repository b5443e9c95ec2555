use std::str::FromStr;

use thiserror::Error;

use crate::geometry::{display_delta_to_natural, CropRect, DisplayPoint, ImageGeometry};

/// Which part of the crop overlay a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragHandle {
    Move,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Edges a resize handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Edges {
    pub const fn is_empty(&self) -> bool {
        !(self.north || self.south || self.east || self.west)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drag handle id: {0:?}")]
pub struct UnknownHandle(pub String);

impl DragHandle {
    pub const ALL: [DragHandle; 9] = [
        Self::Move,
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    /// Resolves the element that started a gesture. Anything that is not a
    /// known resize handle grabs the rectangle body.
    pub fn from_element_id(id: Option<&str>) -> Self {
        match id {
            None => Self::Move,
            Some(id) => id.parse().unwrap_or_else(|err: UnknownHandle| {
                tracing::warn!(%err, "treating unrecognized handle as move");
                Self::Move
            }),
        }
    }

    pub const fn edges(self) -> Edges {
        let (north, south, east, west) = match self {
            Self::Move => (false, false, false, false),
            Self::North => (true, false, false, false),
            Self::South => (false, true, false, false),
            Self::East => (false, false, true, false),
            Self::West => (false, false, false, true),
            Self::NorthEast => (true, false, true, false),
            Self::NorthWest => (true, false, false, true),
            Self::SouthEast => (false, true, true, false),
            Self::SouthWest => (false, true, false, true),
        };
        Edges {
            north,
            south,
            east,
            west,
        }
    }

    pub const fn is_move(self) -> bool {
        matches!(self, Self::Move)
    }
}

impl FromStr for DragHandle {
    type Err = UnknownHandle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|handle| handle.id() == normalized)
            .ok_or_else(|| UnknownHandle(value.to_string()))
    }
}

/// Snapshot taken when a gesture starts. Every pointer update is resolved
/// against the snapshot, never against the previous update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    handle: DragHandle,
    start_pointer: DisplayPoint,
    start_crop: CropRect,
}

impl DragSession {
    pub const fn new(handle: DragHandle, start_pointer: DisplayPoint, start_crop: CropRect) -> Self {
        Self {
            handle,
            start_pointer,
            start_crop,
        }
    }

    pub const fn handle(&self) -> DragHandle {
        self.handle
    }

    pub const fn start_pointer(&self) -> DisplayPoint {
        self.start_pointer
    }

    pub const fn start_crop(&self) -> CropRect {
        self.start_crop
    }

    /// Crop rectangle for the pointer at `pointer`. `start_crop` must already
    /// lie inside `geometry`.
    pub fn crop_at(&self, pointer: DisplayPoint, geometry: &ImageGeometry) -> CropRect {
        let delta = display_delta_to_natural(self.start_pointer, pointer, geometry.scale());
        if self.handle.is_move() {
            translate_within(self.start_crop, delta.x, delta.y, geometry)
        } else {
            resize_edges(self.start_crop, self.handle.edges(), delta.x, delta.y, geometry)
        }
    }
}

fn translate_within(start: CropRect, delta_x: i32, delta_y: i32, geometry: &ImageGeometry) -> CropRect {
    let width = start.width();
    let height = start.height();
    let limit_x = geometry.max_x().saturating_sub(width).max(0);
    let limit_y = geometry.max_y().saturating_sub(height).max(0);
    let x1 = start.x1.saturating_add(delta_x).clamp(0, limit_x);
    let y1 = start.y1.saturating_add(delta_y).clamp(0, limit_y);
    CropRect::new(x1, y1, x1 + width, y1 + height)
}

fn resize_edges(
    start: CropRect,
    edges: Edges,
    delta_x: i32,
    delta_y: i32,
    geometry: &ImageGeometry,
) -> CropRect {
    let mut crop = start;
    if edges.west {
        crop.x1 = start.x1.saturating_add(delta_x).min(start.x2 - 1).max(0);
    }
    if edges.east {
        crop.x2 = start
            .x2
            .saturating_add(delta_x)
            .max(start.x1 + 1)
            .min(geometry.max_x());
    }
    if edges.north {
        crop.y1 = start.y1.saturating_add(delta_y).min(start.y2 - 1).max(0);
    }
    if edges.south {
        crop.y2 = start
            .y2
            .saturating_add(delta_y)
            .max(start.y1 + 1)
            .min(geometry.max_y());
    }
    crop
}
