//! Stylesheet and interaction script shipped with rewritten groups.
//!
//! Both payloads select groups by the built-in class names, which every
//! resolved class list starts with. Only the active-state classes vary with
//! configuration and are substituted into the script.

use crate::class_names::ClassNames;

const STYLESHEET: &str = include_str!("assets/code-group.css");
const SCRIPT_TEMPLATE: &str = include_str!("assets/code-group.js");

/// The stylesheet injected alongside rewritten groups.
#[must_use]
pub fn stylesheet() -> &'static str {
    STYLESHEET
}

/// The interaction script for the given class names.
///
/// On click of a tab button the script removes the resolved active classes
/// from the previously active tab/panel pair, sets `aria-selected="false"`
/// and `hidden` on them, then applies the reverse to the clicked tab and its
/// panel.
///
/// Active classes are passed to the script as a list of plain strings and
/// checked with `classList`, so tokens that are not valid CSS identifiers
/// (`md:font-bold`, `w-1.5`) work too.
#[must_use]
pub fn script(class_names: &ClassNames) -> String {
    SCRIPT_TEMPLATE
        .replace(
            "__ACTIVE_TAB_TOKENS__",
            &string_list(class_names.active_tab_tokens()),
        )
        .replace(
            "__ACTIVE_BLOCK_TOKENS__",
            &string_list(class_names.active_block_tokens()),
        )
}

/// Comma-separated JS string literals, e.g. `"active", "custom"`.
fn string_list<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens
        .map(|token| format!("\"{}\"", js_escape(token)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape a token for use inside a double-quoted JS string in a `<script>`.
fn js_escape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\u003c"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_names::{
        ClassNameOverrides, DEFAULT_BLOCK_CONTAINER_CLASS, DEFAULT_CODE_GROUP_CLASS,
        DEFAULT_TAB_CLASS, DEFAULT_TAB_CONTAINER_CLASS,
    };

    #[test]
    fn test_script_with_default_class_names() {
        let script = script(&ClassNames::default());

        assert!(script.contains(r#"const activeTabClasses = ["active"];"#));
        assert!(script.contains(r#"const activeBlockClasses = ["active"];"#));
        assert!(script.contains("activeTab.classList.remove(...activeTabClasses);"));
        assert!(script.contains("tab.classList.add(...activeTabClasses);"));
        assert!(!script.contains("__"));
    }

    #[test]
    fn test_script_uses_all_resolved_tokens() {
        let class_names = ClassNames::resolve(&ClassNameOverrides {
            active_tab_class: Some("custom".to_owned()),
            active_block_class: Some("shown open".to_owned()),
            ..ClassNameOverrides::default()
        });
        let script = script(&class_names);

        assert!(script.contains(r#"const activeTabClasses = ["active", "custom"];"#));
        assert!(script.contains(r#"const activeBlockClasses = ["active", "shown", "open"];"#));
    }

    #[test]
    fn test_script_never_builds_selectors_from_class_names() {
        let class_names = ClassNames::resolve(&ClassNameOverrides {
            active_tab_class: Some("md:font-bold".to_owned()),
            active_block_class: Some("w-1.5".to_owned()),
            ..ClassNameOverrides::default()
        });
        let script = script(&class_names);

        assert!(script.contains(r#"const activeTabClasses = ["active", "md:font-bold"];"#));
        assert!(script.contains(r#"const activeBlockClasses = ["active", "w-1.5"];"#));
        assert!(!script.contains(".md:font-bold"));
        assert!(!script.contains(".w-1.5"));
        assert!(!script.contains(".matches("));
    }

    #[test]
    fn test_script_toggles_aria_state_with_class() {
        let script = script(&ClassNames::default());

        assert!(script.contains(r#"activeTab.setAttribute("aria-selected", "false");"#));
        assert!(script.contains(r#"tab.setAttribute("aria-selected", "true");"#));
        assert!(script.contains(r#"activeBlock.setAttribute("hidden", "");"#));
        assert!(script.contains(r#"activeBlock.removeAttribute("hidden");"#));
    }

    #[test]
    fn test_payloads_select_default_classes() {
        let script = script(&ClassNames::default());
        for class in [
            DEFAULT_CODE_GROUP_CLASS,
            DEFAULT_TAB_CONTAINER_CLASS,
            DEFAULT_TAB_CLASS,
            DEFAULT_BLOCK_CONTAINER_CLASS,
        ] {
            assert!(script.contains(&format!(".{class}")), "script misses {class}");
            assert!(stylesheet().contains(&format!(".{class}")), "css misses {class}");
        }
    }

    #[test]
    fn test_js_escape() {
        assert_eq!(js_escape(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(js_escape("</script>"), "\\u003c/script>");
    }
}
