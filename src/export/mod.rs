//! Rasterizes the crop rectangle out of the decoded source image.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::geometry::CropRect;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode cropped image as png: {0}")]
    Encode(#[from] image::ImageError),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Encoded result of an export, ready for a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Copies the pixels under `crop` one to one. Returns `None` when the region
/// has no area inside the image.
pub fn crop_region(source: &DynamicImage, crop: CropRect) -> Option<RgbaImage> {
    let (x, y, width, height) = bounded_region(crop, source.width(), source.height())?;
    Some(source.crop_imm(x, y, width, height).to_rgba8())
}

pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn export_crop(source: &DynamicImage, crop: CropRect) -> ExportResult<Option<ExportPayload>> {
    let Some(region) = crop_region(source, crop) else {
        tracing::debug!(?crop, "export skipped: empty crop region");
        return Ok(None);
    };
    let png = encode_png(&region)?;
    tracing::info!(
        width = region.width(),
        height = region.height(),
        bytes = png.len(),
        "exported crop"
    );
    Ok(Some(ExportPayload {
        width: region.width(),
        height: region.height(),
        png,
    }))
}

fn bounded_region(crop: CropRect, source_width: u32, source_height: u32) -> Option<(u32, u32, u32, u32)> {
    if crop.is_empty() {
        return None;
    }
    let max_x = i64::from(source_width);
    let max_y = i64::from(source_height);
    let left = i64::from(crop.x1).clamp(0, max_x);
    let top = i64::from(crop.y1).clamp(0, max_y);
    let right = i64::from(crop.x2).clamp(0, max_x);
    let bottom = i64::from(crop.y2).clamp(0, max_y);
    if right <= left || bottom <= top {
        return None;
    }
    Some((
        u32::try_from(left).ok()?,
        u32::try_from(top).ok()?,
        u32::try_from(right - left).ok()?,
        u32::try_from(bottom - top).ok()?,
    ))
}
