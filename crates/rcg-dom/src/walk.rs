//! Document-order traversal with skip and resume control.

use indextree::NodeId;

use crate::document::Document;

/// Traversal control returned by a [`walk`] visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the visited node's children, then continue with its next sibling.
    Continue,
    /// Do not descend; continue with the next sibling.
    SkipChildren,
    /// The visitor spliced the visited node's parent. Continue with the
    /// sibling following the given node, without visiting the node itself
    /// or its descendants.
    ResumeAfter(NodeId),
}

/// One level of the traversal: the parent being iterated, the next child to
/// visit, and that child's index.
struct Frame {
    parent: NodeId,
    next: Option<NodeId>,
    index: usize,
}

/// Visit every element in document order (pre-order, left to right).
///
/// The visitor receives the document, the element, its index among its
/// parent's children (counting non-element siblings too) and its parent. The
/// root itself is never visited. Non-element nodes are stepped over.
///
/// The traversal is iterative, so deeply nested trees do not grow the call
/// stack. A visitor returning [`Visit::Continue`] must only mutate the visited
/// node's own subtree; structural changes to the parent require
/// [`Visit::ResumeAfter`].
///
/// # Example
///
/// ```
/// use rcg_dom::{Document, Visit, walk};
///
/// let mut doc = Document::from_markdown("# Title\n\nText *here*.");
/// let mut tags = Vec::new();
/// walk(&mut doc, |doc, node, _index, _parent| {
///     tags.push(doc.tag_name(node).unwrap_or_default().to_owned());
///     Visit::Continue
/// });
/// assert_eq!(tags, vec!["h1", "p", "em"]);
/// ```
pub fn walk<F>(doc: &mut Document, mut visitor: F)
where
    F: FnMut(&mut Document, NodeId, usize, NodeId) -> Visit,
{
    let root = doc.root();
    let mut stack = vec![Frame {
        parent: root,
        next: doc.first_child(root),
        index: 0,
    }];

    while let Some(Frame {
        parent,
        next,
        index,
    }) = stack.pop()
    {
        let Some(node) = next else {
            continue;
        };

        if !doc.is_element(node) {
            stack.push(Frame {
                parent,
                next: doc.next_sibling(node),
                index: index + 1,
            });
            continue;
        }

        match visitor(doc, node, index, parent) {
            Visit::Continue => {
                stack.push(Frame {
                    parent,
                    next: doc.next_sibling(node),
                    index: index + 1,
                });
                stack.push(Frame {
                    parent: node,
                    next: doc.first_child(node),
                    index: 0,
                });
            }
            Visit::SkipChildren => {
                stack.push(Frame {
                    parent,
                    next: doc.next_sibling(node),
                    index: index + 1,
                });
            }
            Visit::ResumeAfter(anchor) => {
                let index = doc.index_in_parent(anchor).map_or(index, |i| i + 1);
                stack.push(Frame {
                    parent: doc.parent(anchor).unwrap_or(parent),
                    next: doc.next_sibling(anchor),
                    index,
                });
            }
        }
    }
}
