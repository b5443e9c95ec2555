use crate::geometry::{CropRect, DisplayRect};
use crate::input::FieldKey;
use crate::state::CropView;

/// Mirror of what the page shows: the overlay box and the four numeric fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    overlay: Option<DisplayRect>,
    fields: [String; 4],
}

impl SessionView {
    pub fn overlay(&self) -> Option<DisplayRect> {
        self.overlay
    }

    pub fn field_text(&self, key: FieldKey) -> &str {
        let index = FieldKey::ALL
            .iter()
            .position(|candidate| *candidate == key)
            .unwrap_or_default();
        &self.fields[index]
    }
}

impl CropView for SessionView {
    fn render_overlay(&mut self, rect: DisplayRect) {
        tracing::trace!(
            left = rect.left(),
            top = rect.top(),
            width = rect.width(),
            height = rect.height(),
            "overlay"
        );
        self.overlay = Some(rect);
    }

    fn sync_fields(&mut self, crop: CropRect) {
        self.fields = [
            crop.x1.to_string(),
            crop.y1.to_string(),
            crop.x2.to_string(),
            crop.y2.to_string(),
        ];
    }
}
