//! Deterministic HTML serialization.

use std::fmt::Write;

use indextree::NodeId;

use crate::document::Document;
use crate::node::NodeData;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Escape text content (`&`, `<`, `>`).
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value (`&`, `"`).
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Document {
    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.node_to_html(self.root())
    }

    /// Serialize a single node and its subtree.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees serialize without
    /// growing the call stack.
    #[must_use]
    pub fn node_to_html(&self, id: NodeId) -> String {
        let mut out = String::with_capacity(1024);
        let mut stack = vec![Step::Open { id, raw_text: false }];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open { id, raw_text } => self.open_node(id, raw_text, &mut out, &mut stack),
                Step::Close(id) => {
                    if let Some(element) = self.element(id) {
                        let _ = write!(out, "</{}>", element.tag());
                    }
                }
            }
        }
        out
    }

    /// Write the opening part of a node and schedule its children and
    /// closing tag.
    fn open_node(&self, id: NodeId, raw_text: bool, out: &mut String, stack: &mut Vec<Step>) {
        match self.get(id) {
            NodeData::Root => self.push_children(id, false, stack),
            NodeData::Doctype(name) => {
                let _ = write!(out, "<!DOCTYPE {name}>");
            }
            NodeData::Element(element) => {
                let tag = element.tag();
                out.push('<');
                out.push_str(tag);
                for (name, value) in element.attrs() {
                    if value.is_empty() {
                        let _ = write!(out, " {name}");
                    } else {
                        let _ = write!(out, r#" {name}="{}""#, escape_attr(value));
                    }
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                stack.push(Step::Close(id));
                self.push_children(id, RAW_TEXT_ELEMENTS.contains(&tag), stack);
            }
            NodeData::Text(text) => {
                if raw_text {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            NodeData::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeData::Raw(html) => out.push_str(html),
        }
    }

    /// Push children in reverse so the first child is popped first.
    fn push_children(&self, id: NodeId, raw_text: bool, stack: &mut Vec<Step>) {
        let start = stack.len();
        stack.extend(self.children(id).map(|id| Step::Open { id, raw_text }));
        stack[start..].reverse();
    }
}

/// Pending serialization work.
enum Step {
    Open { id: NodeId, raw_text: bool },
    Close(NodeId),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::Element;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
        assert_eq!(escape_attr("<x>"), "<x>");
    }

    #[test]
    fn test_element_attributes_and_short_form() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element(
            Element::new("div")
                .with_attr("class", "rcg-block")
                .with_attr("hidden", ""),
        );
        doc.append(root, div);
        doc.append_text(div, "x");

        assert_eq!(doc.to_html(), r#"<div class="rcg-block" hidden>x</div>"#);
    }

    #[test]
    fn test_void_elements() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.create_element(Element::new("p"));
        let br = doc.create_element(Element::new("br"));
        doc.append(root, p);
        doc.append_text(p, "a");
        doc.append(p, br);
        doc.append_text(p, "b");

        assert_eq!(doc.to_html(), "<p>a<br>b</p>");
    }

    #[test]
    fn test_script_and_style_are_not_escaped() {
        let mut doc = Document::new();
        let root = doc.root();
        let script = doc.create_element(Element::new("script"));
        let style = doc.create_element(Element::new("style"));
        doc.append(root, style);
        doc.append(root, script);
        doc.append_text(style, ".a > .b {}");
        doc.append_text(script, "if (a < b && c) {}");

        assert_eq!(
            doc.to_html(),
            "<style>.a > .b {}</style><script>if (a < b && c) {}</script>"
        );
    }

    #[test]
    fn test_doctype_comment_and_raw() {
        let mut doc = Document::new();
        let root = doc.root();
        let doctype = doc.create(NodeData::Doctype("html".to_owned()));
        let comment = doc.create(NodeData::Comment(" note ".to_owned()));
        let raw = doc.create(NodeData::Raw("<kbd>Ctrl</kbd>".to_owned()));
        doc.append(root, doctype);
        doc.append(root, comment);
        doc.append(root, raw);

        assert_eq!(doc.to_html(), "<!DOCTYPE html><!-- note --><kbd>Ctrl</kbd>");
    }

    #[test]
    fn test_deeply_nested_tree() {
        const DEPTH: usize = 100_000;
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..DEPTH {
            let div = doc.create_element(Element::new("div"));
            doc.append(parent, div);
            parent = div;
        }
        doc.append_text(parent, "x");

        let html = doc.to_html();

        assert_eq!(html.len(), DEPTH * "<div></div>".len() + 1);
        assert!(html.starts_with("<div><div>"));
        assert!(html.contains("<div>x</div>"));
        assert!(html.ends_with("</div></div>"));
    }

    #[test]
    fn test_node_to_html_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.create_element(Element::new("section"));
        let inner = doc.create_element(Element::new("p"));
        doc.append(root, outer);
        doc.append(outer, inner);
        doc.append_text(inner, "1 < 2");

        assert_eq!(doc.node_to_html(inner), "<p>1 &lt; 2</p>");
    }
}
