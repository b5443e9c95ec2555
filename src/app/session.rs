use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::clipboard::ClipboardBackend;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::export::{self, ExportPayload};
use crate::image_io;
use crate::notification::Notifier;
use crate::state::CropController;
use crate::storage::ExportSink;

use super::SessionView;

pub const NOTICE_COPIED: &str = "Copied!";
pub const NOTICE_COPY_FAILED: &str = "Failed to copy";

pub struct CropSession<S, C, N> {
    controller: CropController<SessionView>,
    source: Option<DynamicImage>,
    last_export: Option<ExportPayload>,
    share_base_url: String,
    sink: S,
    clipboard: C,
    notifier: N,
}

impl<S: ExportSink, C: ClipboardBackend, N: Notifier> CropSession<S, C, N> {
    pub fn new(config: &AppConfig, sink: S, clipboard: C, notifier: N) -> Self {
        Self {
            controller: CropController::with_view(config.default_crop, SessionView::default()),
            source: None,
            last_export: None,
            share_base_url: config.share_base_url.clone(),
            sink,
            clipboard,
            notifier,
        }
    }

    pub fn controller(&self) -> &CropController<SessionView> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CropController<SessionView> {
        &mut self.controller
    }

    pub fn last_export(&self) -> Option<&ExportPayload> {
        self.last_export.as_ref()
    }

    /// Decodes `path` and hands its dimensions to the controller. Without a
    /// display width the image is shown at natural size.
    pub fn open_image(&mut self, path: &Path, display_width: Option<f64>) -> AppResult<()> {
        let image = image_io::load_image(path)?;
        self.set_image(image, display_width);
        Ok(())
    }

    pub fn set_image(&mut self, image: DynamicImage, display_width: Option<f64>) -> bool {
        let display_width = display_width.unwrap_or_else(|| f64::from(image.width()));
        if !self
            .controller
            .load_image(image.width(), image.height(), display_width)
        {
            return false;
        }
        self.source = Some(image);
        self.last_export = None;
        true
    }

    pub fn share_url(&self) -> Option<String> {
        self.controller.share_url(&self.share_base_url)
    }

    /// Rasterizes the current crop. `None` when no image is loaded or the
    /// region is empty.
    pub fn execute(&mut self) -> AppResult<Option<&ExportPayload>> {
        let Some(source) = self.source.as_ref() else {
            return Ok(None);
        };
        self.last_export = export::export_crop(source, self.controller.crop())?;
        Ok(self.last_export.as_ref())
    }

    /// Saves the last export through the sink. Without an export this does
    /// nothing.
    pub fn download(&self) -> AppResult<Option<PathBuf>> {
        let Some(payload) = self.last_export.as_ref() else {
            return Ok(None);
        };
        Ok(Some(self.sink.save_export(payload)?))
    }

    /// Copies the share URL. Failures only produce a notice.
    pub fn copy_share_url(&self) -> bool {
        let Some(url) = self.share_url() else {
            return false;
        };
        match self.clipboard.copy_text(&url) {
            Ok(()) => {
                self.notifier.notify(NOTICE_COPIED);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "failed to copy share url");
                self.notifier.notify(NOTICE_COPY_FAILED);
                false
            }
        }
    }
}
