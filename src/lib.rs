pub mod app;
pub mod clipboard;
pub mod config;
pub mod crop;
pub mod error;
pub mod export;
pub mod geometry;
pub mod image_io;
pub mod input;
pub mod logging;
pub mod notification;
pub mod share;
pub mod state;
pub mod storage;
pub use error::{AppError, AppResult};
