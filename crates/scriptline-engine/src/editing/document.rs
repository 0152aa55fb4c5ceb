use serde::{Deserialize, Serialize};

use crate::editing::Classification;

/// Errors raised by edit operations. Both indicate a caller bug; the
/// document is left untouched when either is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Line index {index} out of range for document of {len} lines")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

/// A single screenplay line
///
/// Lines have no identity beyond their position in the [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    #[serde(rename = "class")]
    pub classification: Classification,
    pub content: String,
}

impl Line {
    pub fn new(classification: Classification, content: impl Into<String>) -> Self {
        Self {
            classification,
            content: content.into(),
        }
    }

    pub fn empty(classification: Classification) -> Self {
        Self::new(classification, String::new())
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Ordered sequence of classified lines, never empty
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Line::empty(Classification::SceneHeading)],
        }
    }
}

impl Document {
    /// Create a document from loaded lines.
    ///
    /// An empty input becomes a single empty scene heading.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let mut doc = Self::default();
        doc.replace_all(lines);
        doc
    }

    pub fn get(&self, index: usize) -> Result<&Line, EditError> {
        self.check_index(index)?;
        Ok(&self.lines[index])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; present for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn replace_all(&mut self, lines: Vec<Line>) {
        if lines.is_empty() {
            self.lines = vec![Line::empty(Classification::SceneHeading)];
        } else {
            self.lines = lines;
        }
    }

    /// Insert `line` so that it ends up at `index`. `index == len()` appends.
    pub fn splice_insert(&mut self, index: usize, line: Line) -> Result<(), EditError> {
        if index > self.lines.len() {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        self.lines.insert(index, line);
        Ok(())
    }

    pub fn splice_remove(&mut self, index: usize) -> Result<Line, EditError> {
        self.check_index(index)?;
        if self.lines.len() == 1 {
            return Err(EditError::InvariantViolation(
                "cannot remove the last remaining line",
            ));
        }
        Ok(self.lines.remove(index))
    }

    /// Overwrite the content of a line, returning whether it changed
    pub fn set_content(&mut self, index: usize, text: impl Into<String>) -> Result<bool, EditError> {
        self.check_index(index)?;
        let text = text.into();
        let line = &mut self.lines[index];
        if line.content == text {
            return Ok(false);
        }
        line.content = text;
        Ok(true)
    }

    /// Change the class of a line, returning whether it changed
    pub fn set_classification(
        &mut self,
        index: usize,
        classification: Classification,
    ) -> Result<bool, EditError> {
        self.check_index(index)?;
        let line = &mut self.lines[index];
        if line.classification == classification {
            return Ok(false);
        }
        line.classification = classification;
        Ok(true)
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            })
        }
    }
}
