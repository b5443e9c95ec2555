pub mod event;
pub mod machine;
pub mod model;

pub use event::GestureEvent;
pub use machine::{CropController, CropView, NoopView};
pub use model::{GestureState, ImageState};
