//! Class names applied to emitted code-group elements.

/// Built-in class for the active tab button.
pub const DEFAULT_ACTIVE_TAB_CLASS: &str = "active";
/// Built-in class for the active panel.
pub const DEFAULT_ACTIVE_BLOCK_CLASS: &str = "active";
/// Built-in class for every tab button.
pub const DEFAULT_TAB_CLASS: &str = "rcg-tab";
/// Built-in class for the tab bar.
pub const DEFAULT_TAB_CONTAINER_CLASS: &str = "rcg-tab-container";
/// Built-in class for every panel.
pub const DEFAULT_BLOCK_CONTAINER_CLASS: &str = "rcg-block";
/// Built-in class for the group container.
pub const DEFAULT_CODE_GROUP_CLASS: &str = "rehype-code-group";

/// User-supplied class names, appended after the built-in defaults.
///
/// Every field is optional; unset or empty fields keep only the default.
/// With the `serde` feature, fields deserialize from `snake_case` keys and
/// also accept `camelCase` aliases (`activeTabClass`, ...). Unknown keys are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassNameOverrides {
    /// Extra class for the active tab button.
    #[cfg_attr(feature = "serde", serde(alias = "activeTabClass"))]
    pub active_tab_class: Option<String>,
    /// Extra class for the active panel.
    #[cfg_attr(feature = "serde", serde(alias = "activeBlockClass"))]
    pub active_block_class: Option<String>,
    /// Extra class for every tab button.
    #[cfg_attr(feature = "serde", serde(alias = "tabClass"))]
    pub tab_class: Option<String>,
    /// Extra class for the tab bar.
    #[cfg_attr(feature = "serde", serde(alias = "tabContainerClass"))]
    pub tab_container_class: Option<String>,
    /// Extra class for every panel.
    #[cfg_attr(feature = "serde", serde(alias = "blockContainerClass"))]
    pub block_container_class: Option<String>,
    /// Extra class for the group container.
    #[cfg_attr(feature = "serde", serde(alias = "codeGroupClass"))]
    pub code_group_class: Option<String>,
}

impl ClassNameOverrides {
    /// Iterate `(field, value)` pairs of the overrides that are set.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("active_tab_class", &self.active_tab_class),
            ("active_block_class", &self.active_block_class),
            ("tab_class", &self.tab_class),
            ("tab_container_class", &self.tab_container_class),
            ("block_container_class", &self.block_container_class),
            ("code_group_class", &self.code_group_class),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }
}

/// Resolved class names for one transform run.
///
/// Each field is a space-separated class list that always starts with the
/// built-in default, so default selectors keep matching when a custom class
/// is added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// Active tab button.
    pub active_tab_class: String,
    /// Active panel.
    pub active_block_class: String,
    /// Every tab button.
    pub tab_class: String,
    /// Tab bar.
    pub tab_container_class: String,
    /// Every panel.
    pub block_container_class: String,
    /// Group container.
    pub code_group_class: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::resolve(&ClassNameOverrides::default())
    }
}

impl ClassNames {
    /// Merge overrides with the defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use rcg_transform::{ClassNameOverrides, ClassNames};
    ///
    /// let class_names = ClassNames::resolve(&ClassNameOverrides {
    ///     active_tab_class: Some("my-active-tab".to_owned()),
    ///     ..ClassNameOverrides::default()
    /// });
    /// assert_eq!(class_names.active_tab_class, "active my-active-tab");
    /// assert_eq!(class_names.tab_class, "rcg-tab");
    /// ```
    #[must_use]
    pub fn resolve(overrides: &ClassNameOverrides) -> Self {
        Self {
            active_tab_class: merge(DEFAULT_ACTIVE_TAB_CLASS, overrides.active_tab_class.as_deref()),
            active_block_class: merge(
                DEFAULT_ACTIVE_BLOCK_CLASS,
                overrides.active_block_class.as_deref(),
            ),
            tab_class: merge(DEFAULT_TAB_CLASS, overrides.tab_class.as_deref()),
            tab_container_class: merge(
                DEFAULT_TAB_CONTAINER_CLASS,
                overrides.tab_container_class.as_deref(),
            ),
            block_container_class: merge(
                DEFAULT_BLOCK_CONTAINER_CLASS,
                overrides.block_container_class.as_deref(),
            ),
            code_group_class: merge(DEFAULT_CODE_GROUP_CLASS, overrides.code_group_class.as_deref()),
        }
    }

    /// Individual tokens of the active tab class list.
    pub fn active_tab_tokens(&self) -> impl Iterator<Item = &str> {
        self.active_tab_class.split_whitespace()
    }

    /// Individual tokens of the active panel class list.
    pub fn active_block_tokens(&self) -> impl Iterator<Item = &str> {
        self.active_block_class.split_whitespace()
    }
}

fn merge(default: &str, custom: Option<&str>) -> String {
    match custom.map(str::trim) {
        Some(custom) if !custom.is_empty() => format!("{default} {custom}"),
        _ => default.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let class_names = ClassNames::default();
        assert_eq!(class_names.active_tab_class, "active");
        assert_eq!(class_names.active_block_class, "active");
        assert_eq!(class_names.tab_class, "rcg-tab");
        assert_eq!(class_names.tab_container_class, "rcg-tab-container");
        assert_eq!(class_names.block_container_class, "rcg-block");
        assert_eq!(class_names.code_group_class, "rehype-code-group");
    }

    #[test]
    fn test_override_is_appended_after_default() {
        let class_names = ClassNames::resolve(&ClassNameOverrides {
            active_tab_class: Some("custom".to_owned()),
            code_group_class: Some("my-group wide".to_owned()),
            ..ClassNameOverrides::default()
        });

        assert_eq!(class_names.active_tab_class, "active custom");
        assert_eq!(class_names.code_group_class, "rehype-code-group my-group wide");
        assert_eq!(class_names.active_block_class, "active");
    }

    #[test]
    fn test_empty_override_keeps_default() {
        let class_names = ClassNames::resolve(&ClassNameOverrides {
            tab_class: Some(String::new()),
            block_container_class: Some("   ".to_owned()),
            ..ClassNameOverrides::default()
        });

        assert_eq!(class_names.tab_class, "rcg-tab");
        assert_eq!(class_names.block_container_class, "rcg-block");
    }

    #[test]
    fn test_active_tokens() {
        let class_names = ClassNames::resolve(&ClassNameOverrides {
            active_block_class: Some("is-shown  visible".to_owned()),
            ..ClassNameOverrides::default()
        });

        assert_eq!(
            class_names.active_block_tokens().collect::<Vec<_>>(),
            vec!["active", "is-shown", "visible"]
        );
        assert_eq!(class_names.active_tab_tokens().collect::<Vec<_>>(), vec!["active"]);
    }

    #[test]
    fn test_overrides_iter_skips_unset() {
        let overrides = ClassNameOverrides {
            tab_class: Some("t".to_owned()),
            code_group_class: Some("g".to_owned()),
            ..ClassNameOverrides::default()
        };

        assert_eq!(
            overrides.iter().collect::<Vec<_>>(),
            vec![("tab_class", "t"), ("code_group_class", "g")]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_accepts_both_spellings() {
        let overrides: ClassNameOverrides = serde_json::from_str(
            r#"{"active_tab_class": "a", "blockContainerClass": "b", "unknown": "ignored"}"#,
        )
        .unwrap();

        assert_eq!(overrides.active_tab_class.as_deref(), Some("a"));
        assert_eq!(overrides.block_container_class.as_deref(), Some("b"));
        assert_eq!(overrides.tab_class, None);
    }
}
