//! Stylesheet and script injection into the document head.

use rcg_dom::{Document, Element, NodeId};

use crate::class_names::ClassNames;
use crate::elements::{build_script, build_style};

/// Add one `<style>` and one `<script>` to the document head.
///
/// Does nothing unless `found_any` is set. The head is located in this order:
///
/// 1. the first `<head>` element: the style goes before its first existing
///    `<style>` child (or at the end), the script always at the end
/// 2. the first `<html>` element: a new `<head>` becomes its first child
/// 3. otherwise a new `<head>` is prepended under the document root
///
/// Returns whether anything was inserted.
pub fn inject_assets(doc: &mut Document, class_names: &ClassNames, found_any: bool) -> bool {
    if !found_any {
        return false;
    }

    let style = build_style(doc);
    let script = build_script(doc, class_names);

    if let Some(head) = doc.find_element("head") {
        match first_style_child(doc, head) {
            Some(existing) => doc.insert_before(existing, style),
            None => doc.append(head, style),
        }
        doc.append(head, script);
        tracing::debug!("Injected code group assets into existing head");
        return true;
    }

    let head = doc.create_element(Element::new("head"));
    doc.append(head, style);
    doc.append(head, script);

    if let Some(html) = doc.find_element("html") {
        doc.prepend(html, head);
        tracing::debug!("Injected code group assets into new head under html");
    } else {
        let root = doc.root();
        doc.prepend(root, head);
        tracing::debug!("Injected code group assets into new head under root");
    }
    true
}

fn first_style_child(doc: &Document, head: NodeId) -> Option<NodeId> {
    doc.children(head).find(|&child| doc.is_element_named(child, "style"))
}
