//! Element factory for rewritten code groups.
//!
//! Builds detached subtrees; attaching them to the document is up to the
//! caller.
//!
//! # Output Structure
//!
//! ```html
//! <div class="rehype-code-group">
//!   <div class="rcg-tab-container" role="tablist">
//!     <button class="rcg-tab active" role="tab" aria-selected="true"
//!             aria-controls="rcg-0-block-0" id="rcg-0-tab-0">npm</button>
//!     <button class="rcg-tab" role="tab" aria-selected="false"
//!             aria-controls="rcg-0-block-1" id="rcg-0-tab-1">yarn</button>
//!   </div>
//!   <div class="rcg-block active" role="tabpanel"
//!        aria-labelledby="rcg-0-tab-0" id="rcg-0-block-0"><!-- node --></div>
//!   <div class="rcg-block" role="tabpanel"
//!        aria-labelledby="rcg-0-tab-1" id="rcg-0-block-1" hidden><!-- node --></div>
//! </div>
//! ```

use rcg_dom::{Document, Element, NodeId};

use crate::assets;
use crate::class_names::ClassNames;
use crate::rewriter::OpenGroup;

/// Tag used for the group container, tab bar and panels.
const CONTAINER_TAG: &str = "div";

/// Prefix of generated group identifiers.
pub const GROUP_ID_PREFIX: &str = "rcg-";

/// Allocates group identifiers (`rcg-0`, `rcg-1`, ...) for one transform run.
///
/// Identifiers are only unique within the allocator that produced them; use
/// [`GroupIds::for_document`] when the document may already contain groups
/// from an earlier run.
#[derive(Debug, Default)]
pub struct GroupIds {
    next: usize,
}

impl GroupIds {
    /// Start counting from zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after the highest group number already used by a tab
    /// or panel `id` in `doc`.
    #[must_use]
    pub fn for_document(doc: &Document) -> Self {
        let next = doc
            .descendants(doc.root())
            .filter_map(|node| doc.element(node)?.attr("id"))
            .filter_map(parse_group_number)
            .max()
            .map_or(0, |highest| highest + 1);
        Self { next }
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = format!("{GROUP_ID_PREFIX}{}", self.next);
        self.next += 1;
        id
    }
}

/// Extract `n` from `rcg-{n}-tab-{i}` or `rcg-{n}-block-{i}`.
fn parse_group_number(id: &str) -> Option<usize> {
    let rest = id.strip_prefix(GROUP_ID_PREFIX)?;
    let (number, role) = rest.split_once('-')?;
    if !(role.starts_with("tab-") || role.starts_with("block-")) {
        return None;
    }
    number.parse().ok()
}

fn tab_id(group_id: &str, position: usize) -> String {
    format!("{group_id}-tab-{position}")
}

fn panel_id(group_id: &str, position: usize) -> String {
    format!("{group_id}-block-{position}")
}

fn with_active(base: &str, active: &str, is_active: bool) -> String {
    if is_active {
        format!("{base} {active}")
    } else {
        base.to_owned()
    }
}

/// Build the tab bar: one button per label, the first one active.
pub fn build_tab_bar(
    doc: &mut Document,
    labels: &[String],
    class_names: &ClassNames,
    group_id: &str,
) -> NodeId {
    let bar = doc.create_element(
        Element::new(CONTAINER_TAG)
            .with_attr("class", &class_names.tab_container_class)
            .with_attr("role", "tablist"),
    );

    for (position, label) in labels.iter().enumerate() {
        let is_active = position == 0;
        let button = doc.create_element(
            Element::new("button")
                .with_attr(
                    "class",
                    with_active(
                        &class_names.tab_class,
                        &class_names.active_tab_class,
                        is_active,
                    ),
                )
                .with_attr("role", "tab")
                .with_attr("aria-selected", if is_active { "true" } else { "false" })
                .with_attr("aria-controls", panel_id(group_id, position))
                .with_attr("id", tab_id(group_id, position)),
        );
        if !label.is_empty() {
            doc.append_text(button, label);
        }
        doc.append(bar, button);
    }

    bar
}

/// Wrap `child` in a panel. The panel at position 0 is active; every other
/// panel carries the `hidden` attribute instead of the active class.
///
/// `child` is moved into the panel.
pub fn build_panel(
    doc: &mut Document,
    child: NodeId,
    class_names: &ClassNames,
    group_id: &str,
    position: usize,
) -> NodeId {
    let is_active = position == 0;
    let mut panel = Element::new(CONTAINER_TAG)
        .with_attr(
            "class",
            with_active(
                &class_names.block_container_class,
                &class_names.active_block_class,
                is_active,
            ),
        )
        .with_attr("role", "tabpanel")
        .with_attr("aria-labelledby", tab_id(group_id, position))
        .with_attr("id", panel_id(group_id, position));
    if !is_active {
        panel.set_attr("hidden", "");
    }

    let panel = doc.create_element(panel);
    doc.append(panel, child);
    panel
}

/// Build the group container for `group`, closed by the end marker at
/// `end_index` in the same parent.
///
/// Element children strictly between the two markers are moved into panels
/// in encounter order; any other node in the span (whitespace text, comments)
/// stays where it is. The returned container is detached.
pub fn build_group(
    doc: &mut Document,
    group: &OpenGroup,
    end_index: usize,
    class_names: &ClassNames,
    group_id: &str,
) -> NodeId {
    let enclosed: Vec<NodeId> = doc
        .children(group.parent)
        .enumerate()
        .skip(group.start_index + 1)
        .take_while(|&(index, _)| index < end_index)
        .map(|(_, node)| node)
        .filter(|&node| doc.is_element(node))
        .collect();

    let container = doc.create_element(
        Element::new(CONTAINER_TAG).with_attr("class", &class_names.code_group_class),
    );
    let tab_bar = build_tab_bar(doc, &group.labels, class_names, group_id);
    doc.append(container, tab_bar);

    for (position, child) in enclosed.into_iter().enumerate() {
        let panel = build_panel(doc, child, class_names, group_id, position);
        doc.append(container, panel);
    }

    container
}

/// Build the `<style>` node.
pub fn build_style(doc: &mut Document) -> NodeId {
    let style = doc.create_element(Element::new("style"));
    doc.append_text(style, assets::stylesheet());
    style
}

/// Build the `<script>` node for the given class names.
pub fn build_script(doc: &mut Document, class_names: &ClassNames) -> NodeId {
    let script = doc.create_element(Element::new("script").with_attr("type", "text/javascript"));
    doc.append_text(script, &assets::script(class_names));
    script
}
