pub mod editing;
pub mod export;
pub mod io;
pub mod models;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    CaretRequest, Classification, Cmd, Document, EditError, Editor, EditorKey, EditorSettings,
    Geometry, KeyOutcome, Line, PageBreakSet, Patch, RenderSurface, Snapshot,
};
pub use io::*;
pub use models::screenplay_file::*;
