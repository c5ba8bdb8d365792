//! Arena-backed document tree for code-group rewriting.
//!
//! Nodes live in an [`indextree`] arena and are addressed by [`NodeId`]
//! handles, so two nodes compare by identity rather than by content. The tree
//! is the shared surface between the document pipeline and the transform:
//!
//! - [`Document::from_markdown`] builds a fragment from `pulldown-cmark` events
//! - [`walk`] visits elements in document order with skip/resume control
//! - [`Document::to_html`] serializes deterministically
//!
//! # Example
//!
//! ```
//! use rcg_dom::Document;
//!
//! let doc = Document::from_markdown("Some *emphasis* here.");
//! assert_eq!(doc.to_html(), "<p>Some <em>emphasis</em> here.</p>");
//! ```

mod document;
mod markdown;
mod node;
mod serialize;
mod walk;

pub use document::Document;
pub use indextree::NodeId;
pub use node::{Element, NodeData};
pub use serialize::{escape_attr, escape_text};
pub use walk::{Visit, walk};
