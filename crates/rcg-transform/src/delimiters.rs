//! Start and end marker recognition.
//!
//! Markers are paragraphs whose whole trimmed text is either
//! `::: code-group labels=[A,B]` or `:::`. Matching runs on flattened text,
//! so inline markup inside the paragraph does not matter.

use std::sync::LazyLock;

use rcg_dom::{Document, NodeId};
use regex::Regex;

/// Text of an end marker.
pub const END_DELIMITER: &str = ":::";

/// Tag a marker must have.
const MARKER_TAG: &str = "p";

static START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^::: code-group labels=\[([^\]]*)\]$").unwrap());

/// A recognized marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// Opens a group with the given tab labels.
    Start(Vec<String>),
    /// Closes the innermost open group.
    End,
}

impl Delimiter {
    /// Classify `node`, returning `None` for anything that is not a marker.
    #[must_use]
    pub fn classify(doc: &Document, node: NodeId) -> Option<Self> {
        if !doc.is_element_named(node, MARKER_TAG) {
            return None;
        }
        let text = doc.text_content(node);
        let text = text.trim();
        if text == END_DELIMITER {
            return Some(Self::End);
        }
        parse_labels(text).map(Self::Start)
    }
}

/// Labels of a start marker node.
#[must_use]
pub fn start_labels(doc: &Document, node: NodeId) -> Option<Vec<String>> {
    match Delimiter::classify(doc, node)? {
        Delimiter::Start(labels) => Some(labels),
        Delimiter::End => None,
    }
}

/// Whether `node` is an end marker.
#[must_use]
pub fn is_end(doc: &Document, node: NodeId) -> bool {
    matches!(Delimiter::classify(doc, node), Some(Delimiter::End))
}

/// Parse the label list out of trimmed start-marker text.
fn parse_labels(text: &str) -> Option<Vec<String>> {
    let captures = START_RE.captures(text)?;
    let list = captures.get(1).map_or("", |m| m.as_str());
    if list.trim().is_empty() {
        return Some(Vec::new());
    }
    Some(list.split(',').map(|label| label.trim().to_owned()).collect())
}
