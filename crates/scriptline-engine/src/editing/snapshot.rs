use crate::editing::Line;

/// Owned copy of the screenplay taken for save or export.
///
/// Nothing here is shared with the editor; changing a snapshot never
/// affects the document it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Document version the copy was taken at
    pub version: u64,
    pub lines: Vec<Line>,
}

impl Snapshot {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
