use crate::{compile, compile_with, unknown_tags, CompileError, CompileOptions, ElementKind, ElementRegistry};
use serde_json::json;
use woosh_schema::{Attributes, Element, Root, StackMode};

fn column(width: Option<&str>) -> Element {
    let mut attributes = Attributes::new();
    if let Some(width) = width {
        attributes.insert("width", width);
    }
    Element::container("mj-column", attributes, vec![])
}

fn section(stack: Option<StackMode>, columns: Vec<Element>) -> Element {
    let mut element = Element::container("mj-section", Attributes::new(), vec![]).with_children(columns);
    if let Element::Container(container) = &mut element {
        container.stack = stack;
    }
    element
}

fn root_with(children: Vec<Element>) -> Element {
    let mut root = Root::new("Title");
    root.children = children.into_iter().map(Into::into).collect();
    Element::Root(root)
}

#[test]
fn test_compile_empty_root() {
    let markup = compile(&root_with(vec![])).unwrap();
    assert_eq!(
        markup,
        "<mjml><mj-head><mj-title>Title</mj-title></mj-head><mj-body></mj-body></mjml>"
    );
    assert!(!markup.contains("mj-section"));
}

#[test]
fn test_compile_two_column_section() {
    let tree = root_with(vec![section(None, vec![column(Some("50%")), column(Some("50%"))])]);
    let markup = compile(&tree).unwrap();

    assert_eq!(markup.matches("<mj-section>").count(), 1);
    assert_eq!(markup.matches("<mj-column width=\"50%\">").count(), 2);
    assert!(markup.contains(
        "<mj-body><mj-section><mj-column width=\"50%\"></mj-column><mj-column width=\"50%\"></mj-column></mj-section></mj-body>"
    ));
}

#[test]
fn test_compile_is_deterministic() {
    let tree = root_with(vec![section(
        Some(StackMode::TwoByTwo),
        vec![column(None), column(None), column(None), column(None)],
    )]);
    let first = compile(&tree).unwrap();
    let second = compile(&tree).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stack_no_wraps_columns_in_one_group() {
    let markup = compile(&section(Some(StackMode::No), vec![column(None), column(None)])).unwrap();
    assert_eq!(
        markup,
        "<mj-section><mj-group><mj-column></mj-column><mj-column></mj-column></mj-group></mj-section>"
    );
}

#[test]
fn test_stack_no_with_single_column_has_no_group() {
    let markup = compile(&section(Some(StackMode::No), vec![column(None)])).unwrap();
    assert_eq!(markup, "<mj-section><mj-column></mj-column></mj-section>");
}

#[test]
fn test_two_by_two_renders_two_groups() {
    let columns = (1..=4).map(|i| column(Some(format!("{}%", i).as_str()))).collect();
    let markup = compile(&section(Some(StackMode::TwoByTwo), columns)).unwrap();
    assert_eq!(
        markup,
        concat!(
            "<mj-section>",
            "<mj-group><mj-column width=\"1%\"></mj-column><mj-column width=\"2%\"></mj-column></mj-group>",
            "<mj-group><mj-column width=\"3%\"></mj-column><mj-column width=\"4%\"></mj-column></mj-group>",
            "</mj-section>"
        )
    );
}

#[test]
fn test_two_by_two_with_three_columns_is_plain() {
    let markup = compile(&section(Some(StackMode::TwoByTwo), vec![column(None), column(None), column(None)])).unwrap();
    assert!(!markup.contains("mj-group"));
}

#[test]
fn test_content_elements() {
    let tree = Element::container("mj-column", Attributes::new(), vec![]).with_children(vec![
        Element::content("mj-text", Attributes::from_pairs(&[("align", "center")]), "<p>Hi</p>"),
        Element::content("mj-button", Attributes::new(), "<span>Go</span>"),
        Element::content("mj-image", Attributes::from_pairs(&[("src", "a.png")]), ""),
        Element::content("mj-raw", Attributes::new(), "<b>raw</b>"),
        Element::leaf("mj-divider", Attributes::new()),
        Element::leaf("mj-spacer", Attributes::from_pairs(&[("height", "10px")])),
    ]);

    let markup = compile(&tree).unwrap();
    assert_eq!(
        markup,
        concat!(
            "<mj-column>",
            "<mj-text align=\"center\"><p>Hi</p></mj-text>",
            "<mj-button><span>Go</span></mj-button>",
            "<mj-image src=\"a.png\"/>",
            "<mj-text><b>raw</b></mj-text>",
            "<mj-divider/>",
            "<mj-spacer height=\"10px\" />",
            "</mj-column>"
        )
    );
}

#[test]
fn test_unknown_tags_compile_to_nothing() {
    let tree = Element::container("mj-column", Attributes::new(), vec![]).with_children(vec![
        Element::leaf("mj-carousel", Attributes::new()),
        Element::content("mj-text", Attributes::new(), "x"),
    ]);
    let markup = compile(&tree).unwrap();
    assert_eq!(markup, "<mj-column><mj-text>x</mj-text></mj-column>");
}

#[test]
fn test_unknown_tags_are_listed() {
    let tree = root_with(vec![
        Element::leaf("mj-hero", Attributes::new()),
        section(None, vec![column(None).with_children(vec![Element::leaf("mj-social", Attributes::new())])]),
        Element::leaf("mj-hero", Attributes::new()),
    ]);
    assert_eq!(unknown_tags(ElementRegistry::shared(), &tree), vec!["mj-hero", "mj-social"]);
}

#[test]
fn test_attribute_values_are_escaped() {
    let tree = Element::leaf("mj-divider", Attributes::from_pairs(&[("css-class", "a\"b")]));
    assert_eq!(compile(&tree).unwrap(), "<mj-divider css-class=\"a&quot;b\"/>");
}

#[test]
fn test_numeric_attributes() {
    let raw = ElementRegistry::shared().default_schema("mj-raw").unwrap();
    let markup = compile(&raw).unwrap();
    assert!(markup.starts_with("<mj-text align=\"left\" padding=\"0\">"));
}

#[test]
fn test_head_metadata() {
    let element: Element = serde_json::from_value(json!({
        "tagName": "mjml",
        "attributes": {},
        "wooshVersion": 1,
        "title": "Tom & Jerry",
        "previewLine": "See <this>",
        "fonts": ["Arial", "Ubuntu", "Wingdings"],
        "children": []
    }))
    .unwrap();

    let markup = compile(&element).unwrap();
    assert_eq!(
        markup,
        concat!(
            "<mjml><mj-head>",
            "<mj-font name=\"Ubuntu\" href=\"https://fonts.googleapis.com/css?family=Ubuntu:400,700\" />",
            "<mj-title>Tom &amp; Jerry</mj-title>",
            "<mj-preview>See &lt;this&gt;</mj-preview>",
            "</mj-head><mj-body></mj-body></mjml>"
        )
    );
}

#[test]
fn test_pretty_output() {
    let tree = section(None, vec![column(None)]);
    let markup = compile_with(ElementRegistry::shared(), &tree, CompileOptions::pretty()).unwrap();
    assert_eq!(markup, "<mj-section>\n  <mj-column>\n  </mj-column>\n</mj-section>\n");
}

#[test]
fn test_shape_mismatch() {
    let tree = Element::leaf("mj-column", Attributes::new());
    assert_eq!(
        compile(&tree),
        Err(CompileError::ShapeMismatch {
            tag: "mj-column".to_string(),
            expected: ElementKind::Container,
        })
    );
}
