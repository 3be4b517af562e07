use hypr_explanation::{EvidenceCitation, Resolution, resolve};
use hypr_highlight::HighlightController;
use hypr_transcript::TurnRecord;

/// Brings the rendered turn with `turn_index` into view, smoothly and centered.
pub trait ScrollTarget {
    fn scroll_into_view(&self, turn_index: usize);
}

impl<T: ScrollTarget + ?Sized> ScrollTarget for &T {
    fn scroll_into_view(&self, turn_index: usize) {
        (**self).scroll_into_view(turn_index);
    }
}

/// Evidence click handler: resolve, scroll, highlight.
pub struct NavigationBridge<S> {
    scroll: S,
    highlight: HighlightController,
}

impl<S: ScrollTarget> NavigationBridge<S> {
    pub fn new(scroll: S, highlight: HighlightController) -> Self {
        Self { scroll, highlight }
    }

    pub fn highlight(&self) -> &HighlightController {
        &self.highlight
    }

    /// Jump to the turn a citation points at. Returns the turn index that was
    /// scrolled to, or `None` when the transcript is empty (nothing happens).
    pub fn jump_to(
        &mut self,
        citation: &EvidenceCitation,
        turns: &[TurnRecord],
    ) -> Option<usize> {
        let resolution = resolve(citation, turns);
        let index = resolution.index()?;

        if let Resolution::Default(_) = resolution {
            tracing::debug!(
                label = %citation.line_label(),
                index,
                "evidence_jump_defaulted"
            );
        }

        self.scroll.scroll_into_view(index);
        self.highlight.activate(index);
        Some(index)
    }
}
