//! Inline CSS declarations (`style="..."`) as ordered maps.

use std::collections::BTreeMap;

pub type StyleMap = BTreeMap<String, String>;

/// Parse `color: red; font-size: 13px` into a map.
///
/// Declarations without a colon or with an empty property are skipped.
/// Values keep any further colons (`url(http://...)`).
pub fn parse_inline_style(css: &str) -> StyleMap {
    css.split(';')
        .filter_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((css_property(key), value.trim().to_string()))
        })
        .collect()
}

/// Format a map as `key: value` declarations joined by `;`.
pub fn format_inline_style(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Normalize a property name to kebab case (`fontFamily` -> `font-family`).
pub fn css_property(key: &str) -> String {
    let mut formatted = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            formatted.push('-');
            formatted.push(ch.to_ascii_lowercase());
        } else {
            formatted.push(ch);
        }
    }
    formatted
}
