pub mod speed;
pub mod track;

pub use speed::SpeedRamp;
pub use track::{Track, SECTION_TAG};
