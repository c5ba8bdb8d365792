//! Node payloads stored in the document arena.

use indexmap::IndexMap;

/// Payload of a single tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    /// Document root. Exactly one per [`Document`](crate::Document).
    Root,
    /// `<!DOCTYPE ...>` declaration.
    Doctype(String),
    /// Markup element with tag name and attributes.
    Element(Element),
    /// Plain text, escaped on serialization.
    Text(String),
    /// `<!-- ... -->` comment.
    Comment(String),
    /// Verbatim markup passed through from the source (e.g. inline HTML in Markdown).
    Raw(String),
}

impl NodeData {
    /// Element payload, if this node is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutable element payload, if this node is an element.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A markup element: tag name plus attributes in insertion order.
///
/// Insertion order is kept so serialization is byte-stable across runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
        }
    }

    /// Set an attribute, builder style.
    ///
    /// An empty value serializes in short form, e.g. `hidden`.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute. Replacing an existing attribute keeps its position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    /// Iterate attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check whether the space-separated `class` attribute contains `token`.
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == token))
    }
}
