//! Code-group rewriting for document trees.
//!
//! Finds paragraphs acting as delimiters and turns the blocks between them
//! into an accessible tabbed widget:
//!
//! ````markdown
//! ::: code-group labels=[npm, yarn]
//!
//! ```sh
//! npm install
//! ```
//!
//! ```sh
//! yarn add
//! ```
//!
//! :::
//! ````
//!
//! becomes a group container holding a tab bar with one button per label and
//! one panel per enclosed block. The first tab and panel are active. When at
//! least one group is rewritten, a stylesheet and a small click handler are
//! added to the document head.
//!
//! Unmatched markers are left in place and reported through
//! [`TransformReport`]; the transform itself never fails.
//!
//! # Example
//!
//! ```
//! use rcg_dom::Document;
//! use rcg_transform::{CodeGroupOptions, CodeGroupTransform};
//!
//! let mut doc = Document::from_markdown(
//!     "::: code-group labels=[A,B]\n\n```\nx\n```\n\n```\ny\n```\n\n:::",
//! );
//! let report = CodeGroupTransform::new(&CodeGroupOptions::default()).transform(&mut doc);
//!
//! assert_eq!(report.groups_rewritten, 1);
//! assert!(report.assets_injected);
//! assert!(doc.to_html().contains(r#"<button class="rcg-tab active""#));
//! ```

mod assets;
mod class_names;
mod delimiters;
mod elements;
mod inject;
mod report;
mod rewriter;

pub use assets::{script, stylesheet};
pub use class_names::{
    ClassNameOverrides, ClassNames, DEFAULT_ACTIVE_BLOCK_CLASS, DEFAULT_ACTIVE_TAB_CLASS,
    DEFAULT_BLOCK_CONTAINER_CLASS, DEFAULT_CODE_GROUP_CLASS, DEFAULT_TAB_CLASS,
    DEFAULT_TAB_CONTAINER_CLASS,
};
pub use delimiters::{Delimiter, END_DELIMITER, is_end, start_labels};
pub use elements::{
    GROUP_ID_PREFIX, GroupIds, build_group, build_panel, build_script, build_style, build_tab_bar,
};
pub use inject::inject_assets;
pub use report::TransformReport;
pub use rewriter::OpenGroup;

use rcg_dom::Document;

use crate::rewriter::GroupRewriter;

/// Options for [`CodeGroupTransform`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodeGroupOptions {
    /// Extra classes appended to the built-in ones.
    #[cfg_attr(feature = "serde", serde(alias = "classNames"))]
    pub class_names: ClassNameOverrides,
    /// Add the stylesheet and script to the document head. Disable when the
    /// page already ships [`stylesheet`] and [`script`] itself.
    #[cfg_attr(feature = "serde", serde(alias = "injectAssets"))]
    pub inject_assets: bool,
}

impl Default for CodeGroupOptions {
    fn default() -> Self {
        Self {
            class_names: ClassNameOverrides::default(),
            inject_assets: true,
        }
    }
}

/// Rewrites code-group markers in a [`Document`].
///
/// Holds only resolved configuration; every [`transform`](Self::transform)
/// call starts with a fresh stack of open groups and its own id counter.
#[derive(Clone, Debug)]
pub struct CodeGroupTransform {
    class_names: ClassNames,
    inject_assets: bool,
}

impl CodeGroupTransform {
    /// Resolve class names once for all runs.
    #[must_use]
    pub fn new(options: &CodeGroupOptions) -> Self {
        Self {
            class_names: ClassNames::resolve(&options.class_names),
            inject_assets: options.inject_assets,
        }
    }

    /// Resolved class names.
    #[must_use]
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Rewrite every matched marker pair in `doc`, then inject assets if any
    /// group was rewritten.
    pub fn transform(&self, doc: &mut Document) -> TransformReport {
        let ids = GroupIds::for_document(doc);
        let mut report = GroupRewriter::new(&self.class_names, ids).run(doc);

        if self.inject_assets {
            report.assets_injected = inject_assets(doc, &self.class_names, report.found_any());
        }

        tracing::debug!(
            groups = report.groups_rewritten,
            warnings = report.warnings.len(),
            assets_injected = report.assets_injected,
            "Code group transform finished"
        );
        report
    }
}

impl Default for CodeGroupTransform {
    fn default() -> Self {
        Self::new(&CodeGroupOptions::default())
    }
}

/// Run a transform with `options` over `doc`.
pub fn transform(doc: &mut Document, options: &CodeGroupOptions) -> TransformReport {
    CodeGroupTransform::new(options).transform(doc)
}
