//! Markdown to document tree conversion.
//!
//! Builds a fragment (block elements directly under the root) from
//! `pulldown-cmark` events, mirroring the element mapping of a regular
//! Markdown-to-HTML renderer.

use indextree::NodeId;
use pulldown_cmark::{
    Alignment, BlockQuoteKind, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::document::Document;
use crate::node::{Element, NodeData};

impl Document {
    /// Parse Markdown (GFM tables, strikethrough and task lists enabled) into
    /// a fragment document.
    ///
    /// Raw HTML in the source is kept verbatim as [`NodeData::Raw`] nodes.
    ///
    /// # Example
    ///
    /// ```
    /// use rcg_dom::Document;
    ///
    /// let doc = Document::from_markdown("```rust\nfn main() {}\n```");
    /// assert_eq!(
    ///     doc.to_html(),
    ///     "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
    /// );
    /// ```
    #[must_use]
    pub fn from_markdown(markdown: &str) -> Self {
        let mut builder = TreeBuilder::new();
        for event in Parser::new_ext(markdown, parser_options()) {
            builder.event(event);
        }
        builder.doc
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Per-table state: alignments and position within the current row.
struct TableState {
    node: NodeId,
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

/// Event sink that grows a [`Document`].
///
/// `open` mirrors the start/end nesting of the event stream. Tags that do not
/// produce an element (HTML blocks, footnote definitions) push `None` so every
/// end event pops exactly one entry.
struct TreeBuilder {
    doc: Document,
    open: Vec<Option<NodeId>>,
    tables: Vec<TableState>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            open: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Innermost open element, or the root.
    fn current(&self) -> NodeId {
        self.open
            .iter()
            .rev()
            .find_map(|entry| *entry)
            .unwrap_or_else(|| self.doc.root())
    }

    /// Append a new element to the current node and return it.
    fn append_element(&mut self, element: Element) -> NodeId {
        let parent = self.current();
        let node = self.doc.create_element(element);
        self.doc.append(parent, node);
        node
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                let parent = self.current();
                self.doc.append_text(parent, &text);
            }
            Event::Code(code) => {
                let node = self.append_element(Element::new("code"));
                self.doc.append_text(node, &code);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => {
                let parent = self.current();
                self.doc.append_text(parent, "\n");
            }
            Event::HardBreak => {
                self.append_element(Element::new("br"));
            }
            Event::Rule => {
                self.append_element(Element::new("hr"));
            }
            Event::TaskListMarker(checked) => {
                let mut input = Element::new("input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if checked {
                    input.set_attr("checked", "");
                }
                self.append_element(input);
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn raw_html(&mut self, html: &str) {
        let parent = self.current();
        let last = self.doc.children(parent).last();
        if let Some(last) = last
            && let NodeData::Raw(existing) = self.doc.get_mut(last)
        {
            existing.push_str(html);
            return;
        }
        let node = self.doc.create(NodeData::Raw(html.to_owned()));
        self.doc.append(parent, node);
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let entry = match tag {
            Tag::Paragraph => Some(self.append_element(Element::new("p"))),
            Tag::Heading { level, id, classes, .. } => {
                let mut heading = Element::new(heading_tag(level));
                if let Some(id) = id {
                    heading.set_attr("id", id.to_string());
                }
                if !classes.is_empty() {
                    let classes: Vec<String> = classes.iter().map(ToString::to_string).collect();
                    heading.set_attr("class", classes.join(" "));
                }
                Some(self.append_element(heading))
            }
            Tag::BlockQuote(kind) => {
                let mut quote = Element::new("blockquote");
                if let Some(kind) = kind {
                    quote.set_attr("class", format!("alert alert-{}", alert_name(kind)));
                }
                Some(self.append_element(quote))
            }
            Tag::CodeBlock(kind) => {
                let pre = self.append_element(Element::new("pre"));
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind
                    && let Some(lang) = info.split_whitespace().next()
                {
                    code.set_attr("class", format!("language-{lang}"));
                }
                let code = self.doc.create_element(code);
                self.doc.append(pre, code);
                Some(code)
            }
            Tag::List(start) => {
                let list = match start {
                    Some(1) => Element::new("ol"),
                    Some(n) => Element::new("ol").with_attr("start", n.to_string()),
                    None => Element::new("ul"),
                };
                Some(self.append_element(list))
            }
            Tag::Item => Some(self.append_element(Element::new("li"))),
            Tag::DefinitionList => Some(self.append_element(Element::new("dl"))),
            Tag::DefinitionListTitle => Some(self.append_element(Element::new("dt"))),
            Tag::DefinitionListDefinition => Some(self.append_element(Element::new("dd"))),
            Tag::Table(alignments) => {
                let node = self.append_element(Element::new("table"));
                self.tables.push(TableState {
                    node,
                    alignments,
                    in_head: false,
                    cell: 0,
                });
                Some(node)
            }
            Tag::TableHead => {
                let thead = self.append_element(Element::new("thead"));
                let row = self.doc.create_element(Element::new("tr"));
                self.doc.append(thead, row);
                if let Some(table) = self.tables.last_mut() {
                    table.in_head = true;
                    table.cell = 0;
                }
                Some(row)
            }
            Tag::TableRow => Some(self.start_body_row()),
            Tag::TableCell => Some(self.start_cell()),
            Tag::Emphasis => Some(self.append_element(Element::new("em"))),
            Tag::Strong => Some(self.append_element(Element::new("strong"))),
            Tag::Strikethrough => Some(self.append_element(Element::new("del"))),
            Tag::Superscript => Some(self.append_element(Element::new("sup"))),
            Tag::Subscript => Some(self.append_element(Element::new("sub"))),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = Element::new("a").with_attr("href", dest_url.to_string());
                if !title.is_empty() {
                    link.set_attr("title", title.to_string());
                }
                Some(self.append_element(link))
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected from the children and moved into the
                // attribute when the image closes.
                let mut image = Element::new("img")
                    .with_attr("src", dest_url.to_string())
                    .with_attr("alt", "");
                if !title.is_empty() {
                    image.set_attr("title", title.to_string());
                }
                Some(self.append_element(image))
            }
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => None,
        };
        self.open.push(entry);
    }

    fn start_body_row(&mut self) -> NodeId {
        let Some(table) = self.tables.last_mut() else {
            return self.append_element(Element::new("tr"));
        };
        table.cell = 0;
        let table_node = table.node;

        let last = self.doc.children(table_node).last();
        let body = match last {
            Some(node) if self.doc.is_element_named(node, "tbody") => node,
            _ => {
                let body = self.doc.create_element(Element::new("tbody"));
                self.doc.append(table_node, body);
                body
            }
        };
        let row = self.doc.create_element(Element::new("tr"));
        self.doc.append(body, row);
        row
    }

    fn start_cell(&mut self) -> NodeId {
        let (tag, alignment) = match self.tables.last_mut() {
            Some(table) => {
                let alignment = table.alignments.get(table.cell).copied();
                table.cell += 1;
                (if table.in_head { "th" } else { "td" }, alignment)
            }
            None => ("td", None),
        };

        let mut cell = Element::new(tag);
        if let Some(align) = alignment.and_then(alignment_style) {
            cell.set_attr("style", align);
        }
        self.append_element(cell)
    }

    fn end_tag(&mut self, tag: TagEnd) {
        let entry = self.open.pop().flatten();

        match tag {
            TagEnd::TableHead => {
                if let Some(table) = self.tables.last_mut() {
                    table.in_head = false;
                }
            }
            TagEnd::Table => {
                self.tables.pop();
            }
            TagEnd::Image => {
                if let Some(image) = entry {
                    self.finish_image(image);
                }
            }
            _ => {}
        }
    }

    fn finish_image(&mut self, image: NodeId) {
        let alt = self.doc.text_content(image);
        let children: Vec<NodeId> = self.doc.children(image).collect();
        for child in children {
            self.doc.remove(child);
        }
        if let Some(element) = self.doc.element_mut(image) {
            element.set_attr("alt", alt);
        }
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn alert_name(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}

fn alignment_style(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::None => None,
        Alignment::Left => Some("text-align: left"),
        Alignment::Center => Some("text-align: center"),
        Alignment::Right => Some("text-align: right"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> String {
        Document::from_markdown(markdown).to_html()
    }

    #[test]
    fn test_paragraphs_and_inline() {
        assert_eq!(
            render("Hello **bold** and *em* and `code`.\n\nSecond ~~gone~~."),
            "<p>Hello <strong>bold</strong> and <em>em</em> and <code>code</code>.</p><p>Second <del>gone</del>.</p>"
        );
    }

    #[test]
    fn test_headings() {
        assert_eq!(render("# One\n\n### Three"), "<h1>One</h1><h3>Three</h3>");
    }

    #[test]
    fn test_code_blocks() {
        assert_eq!(
            render("```js\nconsole.log(1 < 2);\n```\n\n    indented\n"),
            "<pre><code class=\"language-js\">console.log(1 &lt; 2);\n</code></pre><pre><code>indented\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_info_attributes_ignored() {
        assert_eq!(
            render("```rust title=\"main.rs\"\nfn main() {}\n```"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(render("1. x\n2. y"), "<ol><li>x</li><li>y</li></ol>");
        assert_eq!(
            render("3. x\n4. y"),
            "<ol start=\"3\"><li>x</li><li>y</li></ol>"
        );
    }

    #[test]
    fn test_task_list() {
        let html = render("- [x] done\n- [ ] open");
        assert!(html.starts_with("<ul><li><input type=\"checkbox\" disabled checked>"));
        assert!(html.contains("<li><input type=\"checkbox\" disabled>"));
        assert!(html.contains("done"));
        assert!(html.contains("open"));
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(
            render("[docs](https://example.com \"Docs\") ![a *cat*](cat.png)"),
            "<p><a href=\"https://example.com\" title=\"Docs\">docs</a> <img src=\"cat.png\" alt=\"a cat\"></p>"
        );
    }

    #[test]
    fn test_table() {
        assert_eq!(
            render("| a | b |\n|:--|--:|\n| 1 | 2 |\n| 3 | 4 |"),
            concat!(
                "<table><thead><tr>",
                "<th style=\"text-align: left\">a</th><th style=\"text-align: right\">b</th>",
                "</tr></thead><tbody>",
                "<tr><td style=\"text-align: left\">1</td><td style=\"text-align: right\">2</td></tr>",
                "<tr><td style=\"text-align: left\">3</td><td style=\"text-align: right\">4</td></tr>",
                "</tbody></table>"
            )
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(
            render("> quoted\n\n---\n\nline  \nbreak"),
            "<blockquote><p>quoted</p></blockquote><hr><p>line<br>break</p>"
        );
    }

    #[test]
    fn test_raw_html_passthrough() {
        assert_eq!(
            render("<div class=\"note\">\nhi\n</div>\n\nPress <kbd>K</kbd>."),
            "<div class=\"note\">\nhi\n</div>\n<p>Press <kbd>K</kbd>.</p>"
        );
    }

    #[test]
    fn test_marker_paragraph_text_is_merged() {
        let doc = Document::from_markdown("::: code-group labels=[npm,yarn]");
        let root = doc.root();
        let p = doc.child_at(root, 0).expect("paragraph");
        assert_eq!(doc.children(p).count(), 1);
        assert_eq!(doc.text_content(p), "::: code-group labels=[npm,yarn]");
    }

    #[test]
    fn test_soft_break_kept_as_text() {
        assert_eq!(render("a\nb"), "<p>a\nb</p>");
    }
}
