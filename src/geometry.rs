//! Coordinate primitives shared by the controller, the crop algorithms and the exporter.
//!
//! Two coordinate spaces exist: natural pixels (the decoded image) and display
//! pixels (the on-screen rendering). They only meet through [`ImageGeometry::scale`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CropRect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1)
    }

    pub const fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1)
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalPoint {
    pub x: i32,
    pub y: i32,
}

impl NaturalPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A crop rectangle projected into display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl DisplayRect {
    pub fn left(&self) -> f64 {
        self.x1
    }

    pub fn top(&self) -> f64 {
        self.y1
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    natural_width: u32,
    natural_height: u32,
    scale: f64,
}

impl ImageGeometry {
    /// Returns `None` for zero-sized images; a usable display width is required
    /// for the scale, otherwise it falls back to 1.0.
    pub fn new(natural_width: u32, natural_height: u32, display_width: f64) -> Option<Self> {
        if natural_width == 0 || natural_height == 0 {
            return None;
        }
        let mut geometry = Self {
            natural_width,
            natural_height,
            scale: 1.0,
        };
        geometry.set_display_width(display_width);
        Some(geometry)
    }

    pub const fn natural_width(&self) -> u32 {
        self.natural_width
    }

    pub const fn natural_height(&self) -> u32 {
        self.natural_height
    }

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    pub fn max_x(&self) -> i32 {
        i32::try_from(self.natural_width).unwrap_or(i32::MAX)
    }

    pub fn max_y(&self) -> i32 {
        i32::try_from(self.natural_height).unwrap_or(i32::MAX)
    }

    /// Recomputes the scale from a new displayed width. Returns whether the
    /// width was usable.
    pub fn set_display_width(&mut self, display_width: f64) -> bool {
        if !display_width.is_finite() || display_width <= 0.0 {
            return false;
        }
        self.scale = display_width / f64::from(self.natural_width);
        true
    }
}

pub fn to_display(rect: CropRect, scale: f64) -> DisplayRect {
    DisplayRect {
        x1: f64::from(rect.x1) * scale,
        y1: f64::from(rect.y1) * scale,
        x2: f64::from(rect.x2) * scale,
        y2: f64::from(rect.y2) * scale,
    }
}

/// Converts a display-space pointer offset into whole natural pixels.
pub fn display_delta_to_natural(from: DisplayPoint, to: DisplayPoint, scale: f64) -> NaturalPoint {
    NaturalPoint::new(
        round_half_up((to.x - from.x) / scale),
        round_half_up((to.y - from.y) / scale),
    )
}

// Halves round toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i32 {
    let rounded = (value + 0.5).floor();
    if rounded >= f64::from(i32::MAX) {
        i32::MAX
    } else if rounded <= f64::from(i32::MIN) {
        i32::MIN
    } else {
        rounded as i32
    }
}
