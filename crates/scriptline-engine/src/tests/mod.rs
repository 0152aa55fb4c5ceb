use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::editing::{CaretRequest, Classification, PageBreakSet, RenderSurface};

/// Create a temporary screenplay directory
pub fn create_test_screenplay_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with raw content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Caret(CaretRequest),
    Class(Classification),
    Breaks(Vec<usize>),
}

/// Surface that records every notification in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn carets(&self) -> Vec<CaretRequest> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Caret(request) => Some(*request),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn place_caret(&mut self, request: CaretRequest) {
        self.events.push(SurfaceEvent::Caret(request));
    }

    fn active_classification_changed(&mut self, classification: Classification) {
        self.events.push(SurfaceEvent::Class(classification));
    }

    fn page_breaks_changed(&mut self, breaks: &PageBreakSet) {
        self.events.push(SurfaceEvent::Breaks(breaks.as_slice().to_vec()));
    }
}
