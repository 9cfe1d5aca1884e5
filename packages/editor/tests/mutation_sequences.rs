//! Tests for longer mutation sequences
//!
//! This tests:
//! - Column count changes back and forth
//! - Removal and splicing through paths
//! - Document integrity after rejected mutations

use std::sync::Arc;
use woosh_editor::{Document, EditError, EditorError, Mutation, MutationError, NodePath, Replacement};
use woosh_schema::{Attributes, Element, Root, StackMode};

fn document_with_section(columns: usize) -> Document {
    let mut doc = Document::new(Root::new("Title"));
    doc.apply(Mutation::AddSection { columns, preset: None }).unwrap();
    doc
}

#[test]
fn test_grow_then_shrink_keeps_existing_columns() {
    let mut doc = document_with_section(2);
    doc.apply(Mutation::InsertElement {
        parent: NodePath(vec![0, 0]),
        index: 0,
        tag_name: "mj-button".to_string(),
    })
    .unwrap();

    doc.apply(Mutation::SetColumnCount {
        section: NodePath(vec![0]),
        count: 4,
        preset: None,
    })
    .unwrap();
    doc.apply(Mutation::SetColumnCount {
        section: NodePath(vec![0]),
        count: 2,
        preset: None,
    })
    .unwrap();

    let section = &doc.root().children()[0];
    assert_eq!(section.column_count(), 2);
    assert_eq!(section.children()[0].children()[0].tag_name(), "mj-button");
}

#[test]
fn test_four_column_two_by_two_then_shrink() {
    let mut doc = document_with_section(4);
    doc.apply(Mutation::SetStack {
        section: NodePath(vec![0]),
        stack: StackMode::TwoByTwo,
    })
    .unwrap();
    assert_eq!(doc.compile().unwrap().matches("<mj-group>").count(), 2);

    doc.apply(Mutation::SetColumnCount {
        section: NodePath(vec![0]),
        count: 3,
        preset: Some(1),
    })
    .unwrap();

    let section = &doc.root().children()[0];
    assert_eq!(section.stack(), Some(StackMode::Yes));
    assert!(!doc.compile().unwrap().contains("mj-group"));
}

#[test]
fn test_replace_child_splice_and_remove() {
    let mut doc = document_with_section(1);
    let column = NodePath(vec![0, 0]);
    let text = |html: &str| Element::content("mj-text", Attributes::new(), html);

    doc.apply(Mutation::ReplaceChild {
        parent: column.clone(),
        index: 0,
        value: Replacement::Single(text("a")),
    })
    .unwrap();
    doc.apply(Mutation::ReplaceChild {
        parent: column.clone(),
        index: 0,
        value: Replacement::Many(vec![text("b"), text("c")]),
    })
    .unwrap();
    assert_eq!(doc.root().children()[0].children()[0].children().len(), 2);

    doc.apply(Mutation::RemoveElement {
        path: NodePath(vec![0, 0, 1]),
    })
    .unwrap();
    let contents: Vec<_> = doc.root().children()[0].children()[0]
        .children()
        .iter()
        .filter_map(|child| child.content_html().map(str::to_string))
        .collect();
    assert_eq!(contents, vec!["b"]);
}

#[test]
fn test_rejected_mutation_leaves_document_untouched() {
    let mut doc = document_with_section(2);
    let before = doc.snapshot();

    let result = doc.apply(Mutation::ReplaceChild {
        parent: NodePath(vec![0]),
        index: 7,
        value: Replacement::Remove,
    });

    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::Edit(EditError::IndexOutOfRange { index: 7, len: 2 })))
    ));
    assert!(Arc::ptr_eq(&before, &doc.snapshot()));
    assert_eq!(doc.version, 1);
}

#[test]
fn test_edits_share_untouched_sections() {
    let mut doc = document_with_section(1);
    doc.apply(Mutation::AddSection { columns: 2, preset: None }).unwrap();
    let before = doc.snapshot();

    doc.apply(Mutation::MergeAttributes {
        path: NodePath(vec![1]),
        attributes: [("background-color".to_string(), Some("#eee".into()))].into_iter().collect(),
    })
    .unwrap();

    let after = doc.snapshot();
    assert!(Arc::ptr_eq(&before.children()[0], &after.children()[0]));
    assert!(!Arc::ptr_eq(&before.children()[1], &after.children()[1]));
}
