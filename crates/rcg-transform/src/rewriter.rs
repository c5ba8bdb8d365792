//! Single-pass marker matching and splicing.
//!
//! Open groups live on a stack. An end marker closes the innermost open group
//! only when both markers share the same parent node, so nested groups are
//! rewritten inside out: by the time the outer end marker is reached, the
//! inner group is already an ordinary element between the outer markers.

use rcg_dom::{Document, NodeId, Visit, walk};

use crate::class_names::ClassNames;
use crate::delimiters::Delimiter;
use crate::elements::{GroupIds, build_group};
use crate::report::TransformReport;

/// A start marker waiting for its end marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenGroup {
    /// Parent of the start marker.
    pub parent: NodeId,
    /// The start marker itself.
    pub start: NodeId,
    /// Position of the start marker among `parent`'s children.
    pub start_index: usize,
    /// Tab labels in order.
    pub labels: Vec<String>,
}

/// Walk state for one transform run.
pub(crate) struct GroupRewriter<'a> {
    class_names: &'a ClassNames,
    ids: GroupIds,
    stack: Vec<OpenGroup>,
    report: TransformReport,
}

impl<'a> GroupRewriter<'a> {
    pub(crate) fn new(class_names: &'a ClassNames, ids: GroupIds) -> Self {
        Self {
            class_names,
            ids,
            stack: Vec::new(),
            report: TransformReport::default(),
        }
    }

    /// Rewrite every matched marker pair in `doc`.
    pub(crate) fn run(mut self, doc: &mut Document) -> TransformReport {
        walk(doc, |doc, node, index, parent| self.visit(doc, node, index, parent));

        for group in std::mem::take(&mut self.stack) {
            self.unclosed(&group);
        }
        self.report
    }

    fn visit(&mut self, doc: &mut Document, node: NodeId, index: usize, parent: NodeId) -> Visit {
        match Delimiter::classify(doc, node) {
            Some(Delimiter::Start(labels)) => {
                self.stack.push(OpenGroup {
                    parent,
                    start: node,
                    start_index: index,
                    labels,
                });
                Visit::SkipChildren
            }
            Some(Delimiter::End) => match self.stack.pop() {
                Some(group) if group.parent == parent => self.splice(doc, &group, index),
                Some(group) => {
                    self.unmatched_end(index);
                    self.unclosed(&group);
                    Visit::Continue
                }
                None => {
                    self.unmatched_end(index);
                    Visit::Continue
                }
            },
            None => Visit::Continue,
        }
    }

    /// Replace children `[group.start_index, end_index]` of the group's parent
    /// with a single group element.
    fn splice(&mut self, doc: &mut Document, group: &OpenGroup, end_index: usize) -> Visit {
        let span: Vec<NodeId> = doc
            .children(group.parent)
            .skip(group.start_index)
            .take(end_index + 1 - group.start_index)
            .collect();

        let group_id = self.ids.next_id();
        let container = build_group(doc, group, end_index, self.class_names, &group_id);
        doc.insert_before(group.start, container);

        for node in span {
            if doc.parent(node) == Some(group.parent) {
                doc.remove(node);
            }
        }

        let panels = doc.children(container).count().saturating_sub(1);
        tracing::debug!(
            group_id = %group_id,
            labels = group.labels.len(),
            panels,
            "Rewrote code group"
        );
        if panels != group.labels.len() {
            let message = format!(
                "code group {group_id}: {} labels for {panels} blocks",
                group.labels.len()
            );
            tracing::warn!(group_id = %group_id, "{message}");
            self.report.warnings.push(message);
        }

        self.report.groups_rewritten += 1;
        Visit::ResumeAfter(container)
    }

    fn unmatched_end(&mut self, index: usize) {
        tracing::warn!(index, "Unmatched ::: with no open code group in the same parent");
        self.report.unmatched_end_markers += 1;
        self.report.warnings.push(format!(
            "child {index}: stray ::: with no open code group, leaving it in place"
        ));
    }

    fn unclosed(&mut self, group: &OpenGroup) {
        tracing::warn!(
            index = group.start_index,
            labels = ?group.labels,
            "Unclosed code group"
        );
        self.report.unclosed_start_markers += 1;
        self.report.warnings.push(format!(
            "child {}: unclosed ::: code-group (missing closing :::), leaving it in place",
            group.start_index
        ));
    }
}
