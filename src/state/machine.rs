use crate::crop::{self, CropPatch, DragHandle, DragSession};
use crate::geometry::{to_display, CropRect, DisplayPoint, DisplayRect, ImageGeometry};
use crate::input::{parse_coordinate, FieldKey};
use crate::share;

use super::{GestureEvent, GestureState, ImageState};

/// Receives every crop change. The overlay is only rendered once an image is
/// loaded; fields are synced in both image states.
pub trait CropView {
    fn render_overlay(&mut self, _rect: DisplayRect) {}
    fn sync_fields(&mut self, _crop: CropRect) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopView;

impl CropView for NoopView {}

/// Owns the crop rectangle, the image geometry and the active drag session.
#[derive(Debug)]
pub struct CropController<V: CropView = NoopView> {
    crop: CropRect,
    default_crop: CropRect,
    geometry: Option<ImageGeometry>,
    drag: Option<DragSession>,
    view: V,
}

impl CropController<NoopView> {
    pub fn new(default_crop: CropRect) -> Self {
        Self::with_view(default_crop, NoopView)
    }
}

impl Default for CropController<NoopView> {
    fn default() -> Self {
        Self::new(crop::DEFAULT_CROP)
    }
}

impl<V: CropView> CropController<V> {
    pub fn with_view(default_crop: CropRect, view: V) -> Self {
        Self {
            crop: default_crop,
            default_crop,
            geometry: None,
            drag: None,
            view,
        }
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    pub fn geometry(&self) -> Option<&ImageGeometry> {
        self.geometry.as_ref()
    }

    pub fn image_state(&self) -> ImageState {
        if self.geometry.is_some() {
            ImageState::ImageLoaded
        } else {
            ImageState::NoImage
        }
    }

    pub fn gesture_state(&self) -> GestureState {
        if self.drag.is_some() {
            GestureState::Dragging
        } else {
            GestureState::Idle
        }
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Accepts the decoded dimensions of a new image. A second image resets the
    /// crop to the configured default before it is fitted to the new bounds.
    /// Zero-sized images are refused and leave the controller untouched.
    pub fn load_image(&mut self, natural_width: u32, natural_height: u32, display_width: f64) -> bool {
        let Some(geometry) = ImageGeometry::new(natural_width, natural_height, display_width)
        else {
            tracing::warn!(natural_width, natural_height, "refusing zero-sized image");
            return false;
        };

        if self.geometry.is_some() {
            self.crop = self.default_crop;
        }
        self.geometry = Some(geometry);
        self.drag = None;
        tracing::debug!(
            natural_width,
            natural_height,
            scale = geometry.scale(),
            "image loaded"
        );
        self.commit(self.crop);
        true
    }

    /// Recomputes the display scale after a layout change.
    pub fn resize_display(&mut self, display_width: f64) {
        let Some(geometry) = self.geometry.as_mut() else {
            return;
        };
        if !geometry.set_display_width(display_width) {
            tracing::debug!(display_width, "ignoring unusable display width");
            return;
        }
        self.render();
    }

    pub fn set_crop_from_inputs(&mut self, patch: CropPatch) {
        self.commit(patch.apply_to(self.crop));
    }

    /// Applies the raw text of one numeric field.
    pub fn set_field_text(&mut self, key: FieldKey, text: &str) {
        self.set_crop_from_inputs(CropPatch::single(key, parse_coordinate(text)));
    }

    /// Stepper button: moves one field by `delta` pixels.
    pub fn adjust_field(&mut self, key: FieldKey, delta: i32) {
        let value = crop::field_value(&self.crop, key).saturating_add(delta);
        self.set_crop_from_inputs(CropPatch::single(key, value));
    }

    /// Projects `rect` with the current scale. `None` until an image is loaded.
    pub fn convert_to_display(&self, rect: CropRect) -> Option<DisplayRect> {
        self.geometry
            .as_ref()
            .map(|geometry| to_display(rect, geometry.scale()))
    }

    pub fn overlay_rect(&self) -> Option<DisplayRect> {
        self.convert_to_display(self.crop)
    }

    /// Starts a gesture, replacing any gesture already in progress.
    pub fn begin_drag(&mut self, handle: DragHandle, pointer: DisplayPoint) {
        if self.geometry.is_none() {
            return;
        }
        if self.drag.is_some() {
            tracing::debug!("new gesture replaces the active one");
        }
        tracing::debug!(handle = handle.id(), x = pointer.x, y = pointer.y, "drag started");
        self.drag = Some(DragSession::new(handle, pointer, self.crop));
    }

    pub fn update_drag(&mut self, pointer: DisplayPoint) {
        let (Some(session), Some(geometry)) = (self.drag, self.geometry) else {
            return;
        };
        self.commit(session.crop_at(pointer, &geometry));
    }

    pub fn end_drag(&mut self) {
        if let Some(session) = self.drag.take() {
            tracing::debug!(handle = session.handle().id(), crop = ?self.crop, "drag finished");
        }
    }

    pub fn handle_gesture_event(&mut self, event: GestureEvent) -> GestureState {
        match event {
            GestureEvent::Start { handle, position } => self.begin_drag(handle, position),
            GestureEvent::Move { position } => self.update_drag(position),
            GestureEvent::End => self.end_drag(),
        }
        self.gesture_state()
    }

    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        crop::to_query_params(self.crop)
    }

    pub fn apply_query_params<I, K, Val>(&mut self, params: I)
    where
        I: IntoIterator<Item = (K, Val)>,
        K: AsRef<str>,
        Val: AsRef<str>,
    {
        self.commit(crop::apply_query_params(self.crop, params));
    }

    pub fn apply_query_string(&mut self, query: &str) {
        self.apply_query_params(crop::parse_query(query));
    }

    /// Shareable link for the current crop. Only available once an image is
    /// loaded.
    pub fn share_url(&self, base_url: &str) -> Option<String> {
        self.geometry.as_ref()?;
        Some(share::share_url(base_url, self.crop))
    }

    fn commit(&mut self, crop: CropRect) {
        self.crop = match self.geometry.as_ref() {
            Some(geometry) => crop::normalize(crop, geometry),
            None => crop,
        };
        self.render();
        self.view.sync_fields(self.crop);
    }

    fn render(&mut self) {
        if let Some(rect) = self.overlay_rect() {
            self.view.render_overlay(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingView {
        overlays: Vec<DisplayRect>,
        fields: Vec<CropRect>,
    }

    impl CropView for RecordingView {
        fn render_overlay(&mut self, rect: DisplayRect) {
            self.overlays.push(rect);
        }

        fn sync_fields(&mut self, crop: CropRect) {
            self.fields.push(crop);
        }
    }

    fn controller_with_image(
        crop: CropRect,
        width: u32,
        height: u32,
        scale: f64,
    ) -> CropController<RecordingView> {
        let mut controller = CropController::with_view(crop, RecordingView::default());
        assert!(controller.load_image(width, height, f64::from(width) * scale));
        controller
    }

    fn assert_within(controller: &CropController<RecordingView>) {
        let crop = controller.crop();
        let geometry = controller.geometry().expect("image loaded");
        let max_x = geometry.max_x();
        let max_y = geometry.max_y();
        assert!(0 <= crop.x1 && crop.x1 < crop.x2 && crop.x2 <= max_x, "{crop:?}");
        assert!(0 <= crop.y1 && crop.y1 < crop.y2 && crop.y2 <= max_y, "{crop:?}");
    }

    #[test]
    fn controller_starts_idle_without_image() {
        let controller = CropController::default();
        assert_eq!(controller.image_state(), ImageState::NoImage);
        assert_eq!(controller.gesture_state(), GestureState::Idle);
        assert_eq!(controller.crop(), crop::DEFAULT_CROP);
        assert_eq!(controller.overlay_rect(), None);
        assert_eq!(controller.share_url("https://example.test/"), None);
    }

    #[test]
    fn gestures_are_ignored_before_an_image_loads() {
        let mut controller = CropController::default();
        let state = controller.handle_gesture_event(GestureEvent::Start {
            handle: DragHandle::Move,
            position: DisplayPoint::new(0.0, 0.0),
        });
        assert_eq!(state, GestureState::Idle);
        controller.update_drag(DisplayPoint::new(50.0, 50.0));
        assert_eq!(controller.crop(), crop::DEFAULT_CROP);
    }

    #[test]
    fn zero_sized_image_is_refused() {
        let mut controller = CropController::default();
        assert!(!controller.load_image(0, 100, 100.0));
        assert_eq!(controller.image_state(), ImageState::NoImage);
    }

    #[test]
    fn query_crop_is_kept_when_it_fits_the_loaded_image() {
        let mut controller = CropController::with_view(crop::DEFAULT_CROP, RecordingView::default());
        controller.apply_query_string("?x1=50&y1=50&x2=250&y2=200");
        assert!(controller.load_image(300, 300, 300.0));
        assert_eq!(controller.crop(), CropRect::new(50, 50, 250, 200));
    }

    #[test]
    fn loading_normalizes_default_crop_against_smaller_image() {
        let controller = controller_with_image(crop::DEFAULT_CROP, 320, 240, 1.0);
        assert_eq!(controller.crop(), CropRect::new(0, 0, 320, 240));
    }

    #[test]
    fn second_image_resets_crop_to_default() {
        let mut controller = controller_with_image(crop::DEFAULT_CROP, 1000, 1000, 1.0);
        controller.set_crop_from_inputs(CropPatch {
            x1: Some(100),
            y1: Some(100),
            ..CropPatch::default()
        });
        assert_eq!(controller.crop(), CropRect::new(100, 100, 800, 600));

        assert!(controller.load_image(2000, 2000, 1000.0));
        assert_eq!(controller.crop(), crop::DEFAULT_CROP);
    }

    #[test]
    fn field_edits_before_load_are_recorded_and_normalized_later() {
        let mut controller = CropController::with_view(crop::DEFAULT_CROP, RecordingView::default());
        controller.set_field_text(FieldKey::X2, "5000");
        assert_eq!(controller.crop().x2, 5000);
        assert!(controller.view().overlays.is_empty());
        assert_eq!(controller.view().fields.len(), 1);

        assert!(controller.load_image(1024, 768, 512.0));
        assert_eq!(controller.crop(), CropRect::new(0, 0, 1024, 600));
    }

    #[test]
    fn inputs_are_clamped_and_swapped_silently() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 20, 20), 100, 100, 1.0);
        controller.set_crop_from_inputs(CropPatch {
            x1: Some(150),
            y1: Some(-40),
            x2: Some(30),
            y2: None,
        });
        assert_eq!(controller.crop(), CropRect::new(30, 0, 100, 20));
        assert_within(&controller);
    }

    #[test]
    fn field_text_parses_leniently() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 20, 20), 100, 100, 1.0);
        controller.set_field_text(FieldKey::X1, "abc");
        assert_eq!(controller.crop().x1, 0);
        controller.set_field_text(FieldKey::Y2, "64px");
        assert_eq!(controller.crop().y2, 64);
    }

    #[test]
    fn stepper_adjusts_one_field_and_respects_bounds() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 99, 20), 100, 100, 1.0);
        controller.adjust_field(FieldKey::X2, 1);
        assert_eq!(controller.crop().x2, 100);
        controller.adjust_field(FieldKey::X2, 1);
        assert_eq!(controller.crop().x2, 100);
        controller.adjust_field(FieldKey::Y1, -1);
        assert_eq!(controller.crop().y1, 9);
    }

    #[test]
    fn every_mutation_renders_overlay_and_syncs_fields() {
        let mut controller = controller_with_image(CropRect::new(0, 0, 100, 100), 400, 400, 0.5);
        let overlays_before = controller.view().overlays.len();
        let fields_before = controller.view().fields.len();

        controller.adjust_field(FieldKey::X1, 10);
        assert_eq!(controller.view().overlays.len(), overlays_before + 1);
        assert_eq!(controller.view().fields.len(), fields_before + 1);
        assert_eq!(
            controller.view().overlays.last(),
            Some(&DisplayRect {
                x1: 5.0,
                y1: 0.0,
                x2: 50.0,
                y2: 50.0
            })
        );
        assert_eq!(
            controller.view().fields.last(),
            Some(&CropRect::new(10, 0, 100, 100))
        );
    }

    #[test]
    fn resize_display_rescales_the_overlay() {
        let mut controller = controller_with_image(CropRect::new(0, 0, 100, 100), 400, 400, 1.0);
        controller.resize_display(200.0);
        assert_eq!(controller.geometry().map(ImageGeometry::scale), Some(0.5));
        assert_eq!(
            controller.view().overlays.last(),
            Some(&DisplayRect {
                x1: 0.0,
                y1: 0.0,
                x2: 50.0,
                y2: 50.0
            })
        );
    }

    #[test]
    fn full_image_move_is_pinned_at_the_boundary() {
        let mut controller = controller_with_image(CropRect::new(0, 0, 800, 600), 800, 600, 0.5);
        controller.begin_drag(DragHandle::Move, DisplayPoint::new(100.0, 100.0));
        controller.update_drag(DisplayPoint::new(150.0, 130.0));
        assert_eq!(controller.crop(), CropRect::new(0, 0, 800, 600));
    }

    #[test]
    fn southeast_drag_grows_the_crop() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 110, 110), 500, 500, 1.0);
        controller.handle_gesture_event(GestureEvent::Start {
            handle: DragHandle::SouthEast,
            position: DisplayPoint::new(110.0, 110.0),
        });
        let state = controller.handle_gesture_event(GestureEvent::Move {
            position: DisplayPoint::new(130.0, 130.0),
        });
        assert_eq!(state, GestureState::Dragging);
        assert_eq!(controller.crop(), CropRect::new(10, 10, 130, 130));

        assert_eq!(
            controller.handle_gesture_event(GestureEvent::End),
            GestureState::Idle
        );
        controller.update_drag(DisplayPoint::new(300.0, 300.0));
        assert_eq!(controller.crop(), CropRect::new(10, 10, 130, 130));
    }

    #[test]
    fn end_drag_is_idempotent() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 50, 50), 100, 100, 1.0);
        controller.end_drag();
        controller.begin_drag(DragHandle::North, DisplayPoint::new(0.0, 0.0));
        controller.end_drag();
        controller.end_drag();
        assert_eq!(controller.gesture_state(), GestureState::Idle);
        assert_eq!(controller.drag_session(), None);
    }

    #[test]
    fn new_gesture_replaces_active_session() {
        let mut controller = controller_with_image(CropRect::new(10, 10, 50, 50), 100, 100, 1.0);
        controller.begin_drag(DragHandle::East, DisplayPoint::new(0.0, 0.0));
        controller.update_drag(DisplayPoint::new(10.0, 0.0));
        assert_eq!(controller.crop(), CropRect::new(10, 10, 60, 50));

        controller.begin_drag(DragHandle::Move, DisplayPoint::new(0.0, 0.0));
        controller.update_drag(DisplayPoint::new(5.0, 5.0));
        assert_eq!(controller.crop(), CropRect::new(15, 15, 65, 55));
        assert_eq!(
            controller.drag_session().map(DragSession::handle),
            Some(DragHandle::Move)
        );
    }

    #[test]
    fn west_drag_past_east_edge_leaves_one_pixel() {
        let mut controller = controller_with_image(CropRect::new(20, 20, 60, 60), 100, 100, 1.0);
        controller.begin_drag(DragHandle::West, DisplayPoint::new(20.0, 40.0));
        controller.update_drag(DisplayPoint::new(95.0, 40.0));
        assert_eq!(controller.crop(), CropRect::new(59, 20, 60, 60));
    }

    #[test]
    fn mixed_operations_keep_the_crop_valid() {
        let mut controller = controller_with_image(CropRect::new(5, 5, 40, 30), 64, 48, 0.75);
        let handles = DragHandle::ALL;
        let offsets = [-200.0, -13.0, -1.0, 0.4, 7.0, 33.0, 500.0];
        for (index, handle) in handles.into_iter().enumerate() {
            for &dx in &offsets {
                for &dy in &offsets {
                    controller.begin_drag(handle, DisplayPoint::new(10.0, 10.0));
                    controller.update_drag(DisplayPoint::new(10.0 + dx, 10.0 + dy));
                    assert_within(&controller);
                    controller.end_drag();
                }
            }
            let key = FieldKey::ALL[index % FieldKey::ALL.len()];
            controller.adjust_field(key, if index % 2 == 0 { 90 } else { -90 });
            assert_within(&controller);
        }
    }

    #[test]
    fn query_params_round_trip_through_the_controller() {
        let source = controller_with_image(CropRect::new(12, 34, 56, 78), 100, 100, 1.0);
        let mut target = controller_with_image(crop::DEFAULT_CROP, 100, 100, 1.0);
        target.apply_query_params(source.to_query_params());
        assert_eq!(target.crop(), source.crop());
    }

    #[test]
    fn share_url_reflects_current_crop_once_loaded() {
        let controller = controller_with_image(CropRect::new(1, 2, 3, 4), 10, 10, 1.0);
        assert_eq!(
            controller.share_url("https://crop.example/app"),
            Some("https://crop.example/app?x1=1&y1=2&x2=3&y2=4".to_string())
        );
    }
}
