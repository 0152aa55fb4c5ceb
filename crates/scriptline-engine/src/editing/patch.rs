use crate::editing::CaretRequest;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Lines touched by the edit, in post-edit indices. Empty for a pure
    /// removal or a focus change.
    pub changed: std::ops::Range<usize>,
    /// Lines were inserted or removed, so everything after `changed.start` shifted
    pub structural: bool,
    /// New focus, when the command moved it
    pub focus: Option<CaretRequest>,
    pub version: u64,
}

impl Patch {
    pub(crate) fn unchanged(version: u64) -> Self {
        Self {
            changed: 0..0,
            structural: false,
            focus: None,
            version,
        }
    }

    /// The command had no effect at all
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && !self.structural && self.focus.is_none()
    }
}
