use std::ops::Range;

use crate::editing::{CaretRequest, Classification, Document, EditError, Line, Patch};

/// Commands that can be applied to the screenplay
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Overwrite the text of a line
    MutateContent { index: usize, text: String },
    /// Insert an empty line after `index`, classed by the split rules
    Split { index: usize },
    /// Remove an empty line and return focus to the line above
    MergeBack { index: usize },
    /// Advance a line's class through the cycle order
    Reclassify { index: usize },
    /// Set the active line's class from the external selector
    SetClassFromExternal { class: Classification },
    /// Make a line active, e.g. after a click
    Focus { index: usize, caret_at_end: bool },
}

/// Structural keys the engine interprets. Everything else is plain typing
/// handled by the rendering layer and reported back as [`Cmd::MutateContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Enter
    NewLine,
    /// Backspace
    DeleteBackward,
    /// Tab
    CycleClass,
}

impl EditorKey {
    /// Command this key issues against the line at `active_index`
    pub fn command(self, active_index: usize) -> Cmd {
        match self {
            EditorKey::NewLine => Cmd::Split {
                index: active_index,
            },
            EditorKey::DeleteBackward => Cmd::MergeBack {
                index: active_index,
            },
            EditorKey::CycleClass => Cmd::Reclassify {
                index: active_index,
            },
        }
    }
}

/// Result of a key press
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// The engine consumed the key; suppress the default behaviour
    Handled(Patch),
    /// Nothing changed; let the rendering layer do its default
    PassThrough,
}

impl KeyOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyOutcome::Handled(_))
    }
}

/// What a command did to the document, before version and focus bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Edit {
    pub changed: Range<usize>,
    pub structural: bool,
    pub focus: Option<CaretRequest>,
}

impl Edit {
    fn touched(index: usize) -> Self {
        Self {
            changed: index..index + 1,
            structural: false,
            focus: None,
        }
    }

    /// Whether the document itself changed, as opposed to focus only
    pub fn modified(&self) -> bool {
        self.structural || !self.changed.is_empty()
    }
}

/// Apply a command to the document.
///
/// Returns `Ok(None)` for the defined no-ops (merging a non-empty line,
/// selecting the class a line already has). Errors leave the document as it was.
pub(crate) fn execute(
    doc: &mut Document,
    active_index: usize,
    cmd: &Cmd,
) -> Result<Option<Edit>, EditError> {
    match cmd {
        Cmd::MutateContent { index, text } => {
            let changed = doc.set_content(*index, text.as_str())?;
            Ok(changed.then(|| Edit::touched(*index)))
        }
        Cmd::Split { index } => {
            let class = doc.get(*index)?.classification.next_on_split();
            let new_index = index + 1;
            doc.splice_insert(new_index, Line::empty(class))?;
            Ok(Some(Edit {
                changed: new_index..new_index + 1,
                structural: true,
                focus: Some(CaretRequest {
                    line: new_index,
                    at_end: false,
                }),
            }))
        }
        Cmd::MergeBack { index } => {
            let line = doc.get(*index)?;
            if !line.is_blank() || doc.len() == 1 {
                return Ok(None);
            }
            doc.splice_remove(*index)?;
            Ok(Some(Edit {
                changed: *index..*index,
                structural: true,
                focus: Some(CaretRequest {
                    line: index.saturating_sub(1),
                    at_end: true,
                }),
            }))
        }
        Cmd::Reclassify { index } => {
            let class = doc.get(*index)?.classification.next_in_cycle();
            doc.set_classification(*index, class)?;
            Ok(Some(Edit::touched(*index)))
        }
        Cmd::SetClassFromExternal { class } => {
            let changed = doc.set_classification(active_index, *class)?;
            Ok(changed.then(|| Edit::touched(active_index)))
        }
        Cmd::Focus {
            index,
            caret_at_end,
        } => {
            doc.get(*index)?;
            if *index == active_index {
                return Ok(None);
            }
            Ok(Some(Edit {
                changed: *index..*index,
                structural: false,
                focus: Some(CaretRequest {
                    line: *index,
                    at_end: *caret_at_end,
                }),
            }))
        }
    }
}
