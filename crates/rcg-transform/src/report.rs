//! Outcome of a transform run.

/// What a [`CodeGroupTransform::transform`](crate::CodeGroupTransform::transform)
/// call did to the document.
///
/// Markers that could not be matched never fail the transform; they are left
/// in place and counted here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Matched marker pairs rewritten into group elements.
    pub groups_rewritten: usize,
    /// `:::` paragraphs with no open group in the same parent.
    pub unmatched_end_markers: usize,
    /// Start markers that were never closed (or lost their group to a
    /// misplaced end marker).
    pub unclosed_start_markers: usize,
    /// Whether the stylesheet and script were added to the document.
    pub assets_injected: bool,
    /// Human-readable descriptions of every problem found.
    pub warnings: Vec<String>,
}

impl TransformReport {
    /// Whether at least one group was rewritten.
    #[must_use]
    pub fn found_any(&self) -> bool {
        self.groups_rewritten > 0
    }

    /// Whether every marker was matched.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unmatched_end_markers == 0 && self.unclosed_start_markers == 0
    }
}
