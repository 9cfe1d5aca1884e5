//! Padding resolution shared by the editor surface and the compiler.

use crate::attributes::Attributes;

/// `[top, right, bottom, left]`, CSS shorthand order.
pub type Padding = [String; 4];

pub const PADDING_KEYS: [&str; 4] = ["padding-top", "padding-right", "padding-bottom", "padding-left"];

/// Resolve the four padding sides of an element.
///
/// `defaults` is `(vertical, horizontal)`; sides with neither an attribute
/// nor a default resolve to `0px`.
pub fn compute_padding(attributes: &Attributes, defaults: Option<(&str, &str)>) -> Padding {
    PADDING_KEYS.map(|key| {
        attributes.text(key).unwrap_or_else(|| {
            let fallback = defaults.map(|(vertical, horizontal)| match key {
                "padding-top" | "padding-bottom" => vertical,
                _ => horizontal,
            });
            fallback.unwrap_or("0px").to_string()
        })
    })
}

/// Turn free-form user input into a whole, non-negative pixel value.
///
/// Reads the leading integer the way a number field does: `"12.7"` and
/// `"12px"` both become `12px`; input without digits becomes `0px`.
pub fn sanitize_padding(input: &str) -> String {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value = if negative { 0 } else { leading.parse::<u64>().unwrap_or(0) };
    format!("{}px", value)
}

/// Attribute patch that writes all four padding sides.
pub fn padding_attributes(padding: &Padding) -> Attributes {
    PADDING_KEYS
        .iter()
        .zip(padding.iter())
        .map(|(key, value)| (key.to_string(), value.as_str().into()))
        .collect()
}
