//! Document tree and structural operations.

use indextree::{Arena, NodeId};

use crate::node::{Element, NodeData};

/// A rooted, ordered document tree.
///
/// Children are exclusively owned by their parent. Structural operations move
/// nodes rather than copy them, and detached or removed nodes stay in the
/// arena until the document is dropped.
#[derive(Clone, Debug)]
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Root);
        Self { arena, root }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node payload.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Mutable node payload.
    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.arena[id].get_mut()
    }

    /// Element payload, if `id` is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).as_element()
    }

    /// Mutable element payload, if `id` is an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.get_mut(id).as_element_mut()
    }

    /// Whether `id` is an element node.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Whether `id` is an element with the given tag name.
    #[must_use]
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id) == Some(tag)
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    /// Allocate a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        self.arena.new_node(data)
    }

    /// Allocate a detached element node.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.create(NodeData::Element(element))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create(NodeData::Text(text.into()))
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.prepend(child, &mut self.arena);
    }

    /// Move `new_sibling` directly before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_sibling: NodeId) {
        new_sibling.detach(&mut self.arena);
        sibling.insert_before(new_sibling, &mut self.arena);
    }

    /// Append text to `parent`, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last = self.arena[parent].last_child();
        if let Some(last) = last
            && let NodeData::Text(existing) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }
        let node = self.create_text(text);
        self.append(parent, node);
    }

    /// Unlink a node (and its subtree) from its parent without freeing it.
    pub fn detach(&mut self, id: NodeId) {
        id.detach(&mut self.arena);
    }

    /// Remove a node and its whole subtree from the document.
    pub fn remove(&mut self, id: NodeId) {
        id.remove_subtree(&mut self.arena);
    }

    /// Parent of a node, `None` for the root or detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// First child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].first_child()
    }

    /// Next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].next_sibling()
    }

    /// Iterate the children of a node in order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Child of `parent` at `index`.
    #[must_use]
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).nth(index)
    }

    /// Position of a node among its parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).position(|child| child == id)
    }

    /// Iterate a node and all of its descendants in document order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.descendants(&self.arena)
    }

    /// First element with the given tag in document order.
    #[must_use]
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&id| self.is_element_named(id, tag))
    }

    /// Flattened text content of a node: the concatenation of every
    /// descendant text node, markup ignored.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for node in self.descendants(id) {
            if let NodeData::Text(value) = self.get(node) {
                text.push_str(value);
            }
        }
        text
    }

    /// Wrap the current fragment in a full HTML document.
    ///
    /// The root's children are moved into `<body>`; a `<head>` with a UTF-8
    /// charset declaration (and an optional `<title>`) is created.
    #[must_use]
    pub fn into_standalone(mut self, title: Option<&str>) -> Self {
        let root = self.root;
        let content: Vec<NodeId> = self.children(root).collect();

        let doctype = self.create(NodeData::Doctype("html".to_owned()));
        let html = self.create_element(Element::new("html"));
        let head = self.create_element(Element::new("head"));
        let meta = self.create_element(Element::new("meta").with_attr("charset", "utf-8"));
        let body = self.create_element(Element::new("body"));

        self.append(root, doctype);
        self.append(root, html);
        self.append(html, head);
        self.append(head, meta);
        if let Some(title) = title {
            let title_element = self.create_element(Element::new("title"));
            self.append_text(title_element, title);
            self.append(head, title_element);
        }
        self.append(html, body);

        for node in content {
            self.append(body, node);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, text: &str) -> NodeId {
        let p = doc.create_element(Element::new("p"));
        doc.append_text(p, text);
        p
    }

    #[test]
    fn test_new_document_has_only_root() {
        let doc = Document::new();
        assert_eq!(doc.get(doc.root()), &NodeData::Root);
        assert_eq!(doc.children(doc.root()).count(), 0);
    }

    #[test]
    fn test_append_and_index() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = paragraph(&mut doc, "a");
        let b = paragraph(&mut doc, "b");
        doc.append(root, a);
        doc.append(root, b);

        assert_eq!(doc.child_at(root, 0), Some(a));
        assert_eq!(doc.child_at(root, 1), Some(b));
        assert_eq!(doc.child_at(root, 2), None);
        assert_eq!(doc.index_in_parent(b), Some(1));
        assert_eq!(doc.parent(a), Some(root));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(Element::new("div"));
        let p = paragraph(&mut doc, "moved");
        doc.append(root, p);
        doc.append(root, div);

        doc.append(div, p);

        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![div]);
        assert_eq!(doc.parent(p), Some(div));
    }

    #[test]
    fn test_insert_before_and_prepend() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = paragraph(&mut doc, "a");
        let b = paragraph(&mut doc, "b");
        let c = paragraph(&mut doc, "c");
        doc.append(root, b);
        doc.insert_before(b, a);
        doc.prepend(root, c);

        assert_eq!(doc.children(root).collect::<Vec<_>>(), vec![c, a, b]);
    }

    #[test]
    fn test_append_text_merges() {
        let mut doc = Document::new();
        let p = doc.create_element(Element::new("p"));
        doc.append_text(p, "::: code-group labels=");
        doc.append_text(p, "[A,B]");

        assert_eq!(doc.children(p).count(), 1);
        assert_eq!(doc.text_content(p), "::: code-group labels=[A,B]");
    }

    #[test]
    fn test_text_content_flattens_markup() {
        let mut doc = Document::new();
        let p = doc.create_element(Element::new("p"));
        let em = doc.create_element(Element::new("em"));
        doc.append_text(p, "a ");
        doc.append(p, em);
        doc.append_text(em, "b");
        let tail = doc.create_text(" c");
        doc.append(p, tail);

        assert_eq!(doc.text_content(p), "a b c");
    }

    #[test]
    fn test_remove_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = paragraph(&mut doc, "gone");
        doc.append(root, p);
        doc.remove(p);

        assert_eq!(doc.children(root).count(), 0);
    }

    #[test]
    fn test_find_element_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.create_element(Element::new("div"));
        let first = doc.create_element(Element::new("head"));
        let second = doc.create_element(Element::new("head"));
        doc.append(root, outer);
        doc.append(outer, first);
        doc.append(root, second);

        assert_eq!(doc.find_element("head"), Some(first));
        assert_eq!(doc.find_element("html"), None);
    }

    #[test]
    fn test_into_standalone_moves_content_into_body() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = paragraph(&mut doc, "hi");
        doc.append(root, p);

        let doc = doc.into_standalone(Some("Title"));

        let body = doc.find_element("body").expect("body");
        assert_eq!(doc.children(body).collect::<Vec<_>>(), vec![p]);
        let head = doc.find_element("head").expect("head");
        assert_eq!(doc.children(head).count(), 2);
        assert!(matches!(doc.get(doc.child_at(root, 0).expect("doctype")), NodeData::Doctype(_)));
    }
}
