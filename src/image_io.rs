//! Decoding of the source image handed to the crop session.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

pub type ImageIoResult<T> = std::result::Result<T, ImageIoError>;

pub fn load_image(path: &Path) -> ImageIoResult<DynamicImage> {
    let image = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ImageIoError::Empty {
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded source image"
    );
    Ok(image)
}
