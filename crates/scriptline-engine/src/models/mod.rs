pub mod screenplay_file;

pub use screenplay_file::{SCREENPLAY_EXTENSION, ScreenplayFile};
