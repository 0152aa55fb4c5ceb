use crate::editing::Classification;

/// Where the rendering layer should put the caret once it has painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretRequest {
    pub line: usize,
    /// Collapse the caret to the end of the line rather than the start
    pub at_end: bool,
}

/// Tracks the active line and the state pushed to the class indicator.
///
/// The active index is the single source of truth: the external class
/// selector only ever receives values from here and only ever sends
/// commands back through the editor.
#[derive(Debug, Clone)]
pub struct FocusController {
    active_index: usize,
    caret_at_end: bool,
    /// Caret request waiting for the next paint. A newer request replaces it.
    pending_caret: Option<CaretRequest>,
    /// Last classification pushed to the indicator
    indicated: Option<Classification>,
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusController {
    /// Focus starts on the first line with a caret request already queued
    pub fn new() -> Self {
        Self {
            active_index: 0,
            caret_at_end: false,
            pending_caret: Some(CaretRequest {
                line: 0,
                at_end: false,
            }),
            indicated: None,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret_at_end
    }

    /// Make `request.line` active and queue exactly one caret placement for it
    pub fn move_to(&mut self, request: CaretRequest) {
        self.active_index = request.line;
        self.caret_at_end = request.at_end;
        self.pending_caret = Some(request);
    }

    /// Return to the first line, as after loading a new screenplay
    pub fn reset(&mut self) {
        self.move_to(CaretRequest {
            line: 0,
            at_end: false,
        });
    }

    /// Keep the active index inside a document of `len` lines
    pub fn clamp(&mut self, len: usize) {
        let last = len.saturating_sub(1);
        if self.active_index > last {
            self.move_to(CaretRequest {
                line: last,
                at_end: true,
            });
        }
        if let Some(pending) = self.pending_caret
            && pending.line > last
        {
            self.pending_caret = Some(CaretRequest {
                line: last,
                at_end: true,
            });
        }
    }

    /// Hand the pending caret request to the painter, if any
    pub fn take_caret_request(&mut self) -> Option<CaretRequest> {
        self.pending_caret.take()
    }

    pub fn pending_caret(&self) -> Option<CaretRequest> {
        self.pending_caret
    }

    /// Record the active line's classification.
    ///
    /// Returns the value to notify when it differs from what the indicator
    /// last received, `None` otherwise.
    pub fn sync_indicator(&mut self, classification: Classification) -> Option<Classification> {
        if self.indicated == Some(classification) {
            return None;
        }
        self.indicated = Some(classification);
        Some(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_queues_caret_on_first_line() {
        let mut focus = FocusController::new();
        assert_eq!(focus.active_index(), 0);
        assert_eq!(
            focus.take_caret_request(),
            Some(CaretRequest {
                line: 0,
                at_end: false
            })
        );
        assert_eq!(focus.take_caret_request(), None);
    }

    #[test]
    fn test_latest_request_supersedes_pending_one() {
        let mut focus = FocusController::new();
        focus.move_to(CaretRequest {
            line: 3,
            at_end: false,
        });
        focus.move_to(CaretRequest {
            line: 2,
            at_end: true,
        });

        assert_eq!(
            focus.take_caret_request(),
            Some(CaretRequest {
                line: 2,
                at_end: true
            })
        );
        assert_eq!(focus.active_index(), 2);
        assert!(focus.caret_at_end());
    }

    #[test]
    fn test_clamp_pulls_active_index_into_range() {
        let mut focus = FocusController::new();
        focus.move_to(CaretRequest {
            line: 4,
            at_end: false,
        });
        focus.take_caret_request();

        focus.clamp(2);

        assert_eq!(focus.active_index(), 1);
        assert!(focus.caret_at_end());
        assert_eq!(
            focus.pending_caret(),
            Some(CaretRequest {
                line: 1,
                at_end: true
            })
        );
    }

    #[test]
    fn test_clamp_within_range_is_noop() {
        let mut focus = FocusController::new();
        focus.move_to(CaretRequest {
            line: 1,
            at_end: false,
        });
        focus.take_caret_request();

        focus.clamp(5);

        assert_eq!(focus.active_index(), 1);
        assert_eq!(focus.pending_caret(), None);
    }

    #[test]
    fn test_indicator_only_notifies_on_change() {
        let mut focus = FocusController::new();
        assert_eq!(
            focus.sync_indicator(Classification::Action),
            Some(Classification::Action)
        );
        assert_eq!(focus.sync_indicator(Classification::Action), None);
        assert_eq!(
            focus.sync_indicator(Classification::Dialogue),
            Some(Classification::Dialogue)
        );
    }
}
