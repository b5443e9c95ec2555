mod drag;
mod query;

pub use crate::geometry::{CropRect, DisplayPoint, DisplayRect, ImageGeometry, NaturalPoint};
pub use drag::{DragHandle, DragSession, Edges, UnknownHandle};
pub use query::{apply_query_params, encode_query, parse_query, to_query_params};

use crate::input::FieldKey;

/// Default crop used until a configuration or query string says otherwise.
pub const DEFAULT_CROP: CropRect = CropRect::new(0, 0, 800, 600);

/// Subset of crop fields coming from the numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropPatch {
    pub x1: Option<i32>,
    pub y1: Option<i32>,
    pub x2: Option<i32>,
    pub y2: Option<i32>,
}

impl CropPatch {
    pub fn single(key: FieldKey, value: i32) -> Self {
        let mut patch = Self {
            x1: None,
            y1: None,
            x2: None,
            y2: None,
        };
        match key {
            FieldKey::X1 => patch.x1 = Some(value),
            FieldKey::Y1 => patch.y1 = Some(value),
            FieldKey::X2 => patch.x2 = Some(value),
            FieldKey::Y2 => patch.y2 = Some(value),
        }
        patch
    }

    pub fn apply_to(self, mut crop: CropRect) -> CropRect {
        if let Some(x1) = self.x1 {
            crop.x1 = x1;
        }
        if let Some(y1) = self.y1 {
            crop.y1 = y1;
        }
        if let Some(x2) = self.x2 {
            crop.x2 = x2;
        }
        if let Some(y2) = self.y2 {
            crop.y2 = y2;
        }
        crop
    }
}

pub fn field_value(crop: &CropRect, key: FieldKey) -> i32 {
    match key {
        FieldKey::X1 => crop.x1,
        FieldKey::Y1 => crop.y1,
        FieldKey::X2 => crop.x2,
        FieldKey::Y2 => crop.y2,
    }
}

/// Clamps every coordinate into the image, swaps inverted pairs and widens a
/// collapsed axis to one pixel, so the result always satisfies
/// `0 <= x1 < x2 <= width` and `0 <= y1 < y2 <= height`.
pub fn normalize(crop: CropRect, geometry: &ImageGeometry) -> CropRect {
    let (x1, x2) = normalize_axis(crop.x1, crop.x2, geometry.max_x());
    let (y1, y2) = normalize_axis(crop.y1, crop.y2, geometry.max_y());
    CropRect::new(x1, y1, x2, y2)
}

fn normalize_axis(start: i32, end: i32, max: i32) -> (i32, i32) {
    let max = max.max(1);
    let start = start.clamp(0, max);
    let end = end.clamp(0, max);
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    if start < end {
        (start, end)
    } else if end < max {
        (start, end + 1)
    } else {
        (start - 1, end)
    }
}
