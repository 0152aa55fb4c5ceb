use crate::editing::{CaretRequest, Classification, PageBreakSet};

/// Capabilities the engine needs from whatever paints the screenplay.
///
/// All calls are one-way notifications; the surface never mutates the
/// document directly and sends changes back as commands instead.
pub trait RenderSurface {
    /// Put the caret on a line. Called at paint time, after the line exists on screen.
    fn place_caret(&mut self, request: CaretRequest);

    /// The active line's classification changed
    fn active_classification_changed(&mut self, classification: Classification);

    /// The set of page breaks changed
    fn page_breaks_changed(&mut self, breaks: &PageBreakSet);
}

/// Headless surface that ignores every notification
impl RenderSurface for () {
    fn place_caret(&mut self, _request: CaretRequest) {}

    fn active_classification_changed(&mut self, _classification: Classification) {}

    fn page_breaks_changed(&mut self, _breaks: &PageBreakSet) {}
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn place_caret(&mut self, request: CaretRequest) {
        (**self).place_caret(request);
    }

    fn active_classification_changed(&mut self, classification: Classification) {
        (**self).active_classification_changed(classification);
    }

    fn page_breaks_changed(&mut self, breaks: &PageBreakSet) {
        (**self).page_breaks_changed(breaks);
    }
}
