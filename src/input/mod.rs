mod fields;
mod pointer;

pub use fields::{parse_coordinate, FieldKey};
pub use pointer::PointerInput;
