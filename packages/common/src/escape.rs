//! HTML escaping and entity decoding.

/// Escape `& < > " '` for use in markup text or attribute values.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut safe = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        push_escaped(&mut safe, ch);
    }
    safe
}

/// Escape rich-text content.
///
/// A lone space stays a space; non-breaking spaces and every space after
/// the first in a run become `&nbsp;`.
pub fn escape_text(unsafe_text: &str) -> String {
    let mut safe = String::with_capacity(unsafe_text.len());
    let mut previous_space = false;
    for ch in unsafe_text.chars() {
        match ch {
            '\u{a0}' => {
                safe.push_str("&nbsp;");
                previous_space = true;
            }
            ' ' if previous_space => safe.push_str("&nbsp;"),
            ' ' => {
                safe.push(' ');
                previous_space = true;
            }
            _ => {
                push_escaped(&mut safe, ch);
                previous_space = false;
            }
        }
    }
    safe
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#039;"),
        _ => out.push(ch),
    }
}

/// Decode named (`&amp;`, `&nbsp;`, ...) and numeric character references.
///
/// Unknown or malformed references are kept verbatim.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match candidate.find(';').filter(|end| *end <= 12) {
            Some(end) => match decode_reference(&candidate[1..end]) {
                Some(ch) => {
                    decoded.push(ch);
                    rest = &candidate[end + 1..];
                }
                None => {
                    decoded.push('&');
                    rest = &candidate[1..];
                }
            },
            None => {
                decoded.push('&');
                rest = &candidate[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
