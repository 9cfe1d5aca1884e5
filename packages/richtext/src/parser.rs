//! HTML → rich-text AST
//!
//! Parsing happens in two steps: the token stream is assembled into a
//! forgiving HTML tree (stray close tags are ignored, unclosed tags are
//! closed at the end), then the tree is mapped onto the AST.

use crate::ast::{normalize, Align, BlockKind, ElementNode, Format, Node, TextNode};
use crate::tokenizer::{parse_tag, tokenize, Token};
use tracing::{debug, warn};
use woosh_common::{decode_entities, parse_inline_style, StyleMap};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Tags whose content is never rich text
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "title", "textarea"];

#[derive(Debug, Clone, PartialEq)]
enum HtmlNode {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<HtmlNode>,
    },
    Text(String),
}

struct Frame {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

impl Frame {
    fn close(self) -> HtmlNode {
        HtmlNode::Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn build_tree(source: &str) -> Vec<HtmlNode> {
    let mut root: Vec<HtmlNode> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut skip_until: Option<String> = None;

    fn push(root: &mut Vec<HtmlNode>, stack: &mut [Frame], node: HtmlNode) {
        match stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => root.push(node),
        }
    }

    for (token, _) in tokenize(source) {
        if let Some(raw) = &skip_until {
            if matches!(token, Token::CloseTag(name) if name.eq_ignore_ascii_case(raw)) {
                skip_until = None;
            }
            continue;
        }

        match token {
            Token::Comment | Token::Declaration => {}
            Token::Text(text) => push(&mut root, &mut stack, HtmlNode::Text(decode_entities(text))),
            Token::Lt => push(&mut root, &mut stack, HtmlNode::Text("<".to_string())),
            Token::OpenTag(raw_tag) => {
                let tag = parse_tag(raw_tag);
                if RAW_TEXT_TAGS.contains(&tag.name.as_str()) {
                    debug!(tag = %tag.name, "dropping raw text element");
                    if !tag.self_closing {
                        skip_until = Some(tag.name);
                    }
                } else if tag.self_closing || VOID_TAGS.contains(&tag.name.as_str()) {
                    let node = HtmlNode::Element {
                        name: tag.name,
                        attributes: tag.attributes,
                        children: Vec::new(),
                    };
                    push(&mut root, &mut stack, node);
                } else {
                    stack.push(Frame {
                        name: tag.name,
                        attributes: tag.attributes,
                        children: Vec::new(),
                    });
                }
            }
            Token::CloseTag(name) => {
                let name = name.to_ascii_lowercase();
                let Some(open) = stack.iter().rposition(|frame| frame.name == name) else {
                    debug!(tag = %name, "ignoring stray close tag");
                    continue;
                };
                while stack.len() > open {
                    if let Some(frame) = stack.pop() {
                        let node = frame.close();
                        push(&mut root, &mut stack, node);
                    }
                }
            }
        }
    }

    while let Some(frame) = stack.pop() {
        let node = frame.close();
        push(&mut root, &mut stack, node);
    }
    root
}

/// Parse an HTML fragment into normalized rich-text nodes
pub fn deserialize(html: &str) -> Vec<Node> {
    let tree = build_tree(html);
    normalize(tree.iter().flat_map(convert).collect())
}

fn convert(node: &HtmlNode) -> Vec<Node> {
    let (name, attributes, children) = match node {
        HtmlNode::Text(text) => return vec![Node::text(text.as_str())],
        HtmlNode::Element {
            name,
            attributes,
            children,
        } => (name.as_str(), attributes, children),
    };

    if name == "br" {
        return vec![Node::text("\n")];
    }

    // <pre><code>…</code></pre> is one code block
    let source_children = match (name, children.first()) {
        ("pre", Some(HtmlNode::Element { name: inner, children, .. })) if inner == "code" => children,
        _ => children,
    };

    let mut converted: Vec<Node> = source_children.iter().flat_map(convert).collect();
    if converted.is_empty() {
        converted.push(Node::text(""));
    }

    if let Some(kind) = BlockKind::from_tag(name) {
        return element(kind, attributes, converted);
    }

    if let Some(format) = Format::from_tag(name) {
        for child in &mut converted {
            set_mark(child, format);
        }
        return converted;
    }

    if !VOID_TAGS.contains(&name) {
        warn!(tag = name, "flattening unsupported tag");
    }
    converted
}

fn set_mark(node: &mut Node, format: Format) {
    match node {
        Node::Text(text) => text.marks.set(format, true),
        Node::Element(element) => {
            for child in &mut element.children {
                set_mark(child, format);
            }
        }
    }
}

fn element(kind: BlockKind, attributes: &[(String, String)], children: Vec<Node>) -> Vec<Node> {
    let mut element = ElementNode::new(kind, children);

    for (key, value) in attributes {
        match key.as_str() {
            "style" => {
                let style = parse_inline_style(value);
                element.style = (!style.is_empty()).then_some(style);
            }
            "align" => match value.parse::<Align>() {
                Ok(align) => element.align = Some(align),
                Err(_) => {
                    element.attributes.insert(key.clone(), value.clone());
                }
            },
            _ => {
                element.attributes.insert(key.clone(), value.clone());
            }
        }
    }

    match fold_span(&element) {
        Some(texts) => texts,
        None => vec![Node::Element(element)],
    }
}

/// A bare `<span style="…">` around texts is how text styles serialize, so
/// it folds back into the texts.
fn fold_span(element: &ElementNode) -> Option<Vec<Node>> {
    if element.kind != BlockKind::Span || element.align.is_some() || !element.attributes.is_empty() {
        return None;
    }
    let style = element.style.as_ref()?;
    element
        .children
        .iter()
        .map(|child| {
            let text = child.as_text()?;
            Some(Node::Text(TextNode {
                style: Some(merge_styles(style, text.style.as_ref())),
                ..text.clone()
            }))
        })
        .collect()
}

/// Inner declarations win over the span's
fn merge_styles(outer: &StyleMap, inner: Option<&StyleMap>) -> StyleMap {
    let mut merged = outer.clone();
    if let Some(inner) = inner {
        merged.extend(inner.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Marks;

    fn paragraph(children: Vec<Node>) -> Node {
        Node::element(BlockKind::Paragraph, children)
    }

    #[test]
    fn test_paragraph_with_bold() {
        let nodes = deserialize("<p>Hello <strong>world</strong></p>");

        assert_eq!(
            nodes,
            vec![paragraph(vec![
                Node::text("Hello "),
                Node::Text(TextNode::new("world").with(Format::Bold)),
            ])]
        );
    }

    #[test]
    fn test_nested_formats_combine() {
        let nodes = deserialize("<em><u>x</u></em>");
        let text = nodes[0].as_text().unwrap();
        assert_eq!(
            text.marks,
            Marks {
                italic: true,
                underline: true,
                ..Marks::default()
            }
        );
    }

    #[test]
    fn test_b_is_flattened() {
        assert_eq!(deserialize("<b>bold?</b>"), vec![Node::text("bold?")]);
    }

    #[test]
    fn test_unknown_tags_are_flattened() {
        let nodes = deserialize("<table><tr><td>cell</td></tr></table>");
        assert_eq!(nodes, vec![Node::text("cell")]);
    }

    #[test]
    fn test_script_and_comments_are_dropped() {
        let nodes = deserialize("<p>a<!-- note --><script>if (a < b) {}</script>b</p>");
        assert_eq!(nodes, vec![paragraph(vec![Node::text("ab")])]);
    }

    #[test]
    fn test_line_break() {
        let nodes = deserialize("<p>one<br>two</p>");
        assert_eq!(nodes, vec![paragraph(vec![Node::text("one\ntwo")])]);
    }

    #[test]
    fn test_empty_element_gets_empty_text() {
        let nodes = deserialize("<p></p>");
        assert_eq!(nodes, vec![paragraph(vec![Node::text("")])]);
    }

    #[test]
    fn test_attributes_and_style() {
        let nodes = deserialize(r#"<p align="center" class="intro" style="color: red; fontSize: 14px">x</p>"#);
        let element = nodes[0].as_element().unwrap();

        assert_eq!(element.align, Some(Align::Center));
        assert_eq!(element.attributes.get("class").map(String::as_str), Some("intro"));
        let style = element.style.as_ref().unwrap();
        assert_eq!(style.get("color").map(String::as_str), Some("red"));
        assert_eq!(style.get("font-size").map(String::as_str), Some("14px"));
    }

    #[test]
    fn test_styled_span_folds_into_text() {
        let nodes = deserialize(r#"<p><span style="color: red">red</span> plain</p>"#);
        let texts: Vec<_> = nodes[0].children().iter().filter_map(Node::as_text).collect();

        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].style.as_ref().and_then(|s| s.get("color")).map(String::as_str), Some("red"));
        assert!(texts[1].style.is_none());
    }

    #[test]
    fn test_span_with_other_attributes_stays() {
        let nodes = deserialize(r#"<span class="x" style="color: red">y</span>"#);
        assert_eq!(nodes[0].as_element().map(|e| e.kind), Some(BlockKind::Span));
    }

    #[test]
    fn test_pre_code_is_unwrapped() {
        let nodes = deserialize("<pre><code>let x = 1;</code></pre>");
        let element = nodes[0].as_element().unwrap();

        assert_eq!(element.kind, BlockKind::CodeBlock);
        assert_eq!(element.children, vec![Node::text("let x = 1;")]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let nodes = deserialize("<p>Fish &amp; chips&nbsp;&#39;n&#x27; more</p>");
        assert_eq!(nodes[0].plain_text(), "Fish & chips\u{a0}'n' more");
    }

    #[test]
    fn test_unclosed_and_stray_tags() {
        let nodes = deserialize("<p>open</div><strong>bold");
        let paragraph = nodes[0].as_element().unwrap();

        assert_eq!(paragraph.children.len(), 2);
        assert!(paragraph.children[1].as_text().unwrap().marks.bold);
    }

    #[test]
    fn test_unterminated_attribute_keeps_remaining_text() {
        let nodes = deserialize(r#"<p>keep <a title="x>this text</a> end</p>"#);

        assert_eq!(nodes, vec![paragraph(vec![Node::text(r#"keep <a title="x>this text end"#)])]);
    }

    #[test]
    fn test_lists() {
        let nodes = deserialize("<ul><li>one</li><li>two</li></ul>");
        let list = nodes[0].as_element().unwrap();

        assert_eq!(list.kind, BlockKind::BulletedList);
        assert_eq!(list.children.len(), 2);
        assert_eq!(list.children[1].plain_text(), "two");
    }
}
