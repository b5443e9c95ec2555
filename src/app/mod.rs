//! Headless crop session: the controller plus the image, export, download,
//! clipboard and notice collaborators around it.

mod script;
mod session;
mod view;

pub use script::{handle_anchor, run_drag, DragStep, FieldNudge, ScriptParseError};
pub use session::{CropSession, NOTICE_COPIED, NOTICE_COPY_FAILED};
pub use view::SessionView;
