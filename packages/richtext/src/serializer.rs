//! Rich-text AST → HTML

use crate::ast::{BlockKind, ElementNode, Format, Node, TextNode};
use std::collections::BTreeMap;
use woosh_common::{escape_html, escape_text, format_inline_style};

/// Serialize nodes to an HTML fragment.
///
/// A lone blank text serializes to `&nbsp;`, at any depth, so an empty
/// line keeps its height in the rendered email.
pub fn serialize(nodes: &[Node]) -> String {
    let mut output = String::new();
    serialize_nodes(nodes, &mut output);
    output
}

fn serialize_nodes(nodes: &[Node], output: &mut String) {
    if let [Node::Text(text)] = nodes {
        if text.is_blank() {
            output.push_str("&nbsp;");
            return;
        }
    }

    for node in nodes {
        match node {
            Node::Element(element) => serialize_element(element, output),
            Node::Text(text) => serialize_text(text, output),
        }
    }
}

fn serialize_element(element: &ElementNode, output: &mut String) {
    let tag = element.kind.tag();

    let mut attributes: BTreeMap<&str, String> = element
        .attributes
        .iter()
        .map(|(key, value)| (key.as_str(), value.clone()))
        .collect();
    if let Some(align) = element.align {
        attributes.insert("align", align.as_str().to_string());
    }
    if let Some(style) = element.style.as_ref().filter(|style| !style.is_empty()) {
        attributes.insert("style", format_inline_style(style));
    }

    output.push('<');
    output.push_str(tag);
    for (key, value) in &attributes {
        output.push_str(&format!(" {}=\"{}\"", key, escape_html(value)));
    }
    output.push('>');

    if element.kind == BlockKind::CodeBlock {
        output.push_str("<code>");
        serialize_nodes(&element.children, output);
        output.push_str("</code>");
    } else {
        serialize_nodes(&element.children, output);
    }

    output.push_str(&format!("</{}>", tag));
}

fn serialize_text(text: &TextNode, output: &mut String) {
    let mut html = escape_text(&text.text);

    for format in Format::ORDER {
        if text.marks.get(format) {
            html = format!("<{tag}>{}</{tag}>", html, tag = format.tag());
        }
    }

    match text.style.as_ref().filter(|style| !style.is_empty()) {
        Some(style) => {
            output.push_str(&format!(
                "<span style=\"{}\">{}</span>",
                escape_html(&format_inline_style(style)),
                html
            ));
        }
        None => output.push_str(&html),
    }
}
