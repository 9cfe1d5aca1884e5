use woosh_schema::element::{Container, Content, Element, Leaf, Root};

/// Visitor pattern for traversing layout elements immutably
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_element(&mut self, element: &Element) {
        walk_element(self, element);
    }

    fn visit_root(&mut self, root: &Root) {
        walk_root(self, root);
    }

    fn visit_container(&mut self, container: &Container) {
        walk_container(self, container);
    }

    fn visit_content(&mut self, _content: &Content) {
        // Leaf node, no children to walk
    }

    fn visit_leaf(&mut self, _leaf: &Leaf) {
        // Leaf node, no children to walk
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element) {
    match element {
        Element::Root(root) => visitor.visit_root(root),
        Element::Container(container) => visitor.visit_container(container),
        Element::Content(content) => visitor.visit_content(content),
        Element::Leaf(leaf) => visitor.visit_leaf(leaf),
    }
}

pub fn walk_root<V: Visitor>(visitor: &mut V, root: &Root) {
    for child in &root.children {
        visitor.visit_element(child);
    }
}

pub fn walk_container<V: Visitor>(visitor: &mut V, container: &Container) {
    for child in &container.children {
        visitor.visit_element(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use woosh_schema::{Attributes, Root};

    #[derive(Default)]
    struct TagCollector {
        tags: Vec<String>,
    }

    impl Visitor for TagCollector {
        fn visit_element(&mut self, element: &Element) {
            self.tags.push(element.tag_name().to_string());
            walk_element(self, element);
        }
    }

    #[test]
    fn test_walks_in_document_order() {
        let mut root = Root::new("Title");
        let column = Element::container("mj-column", Attributes::new(), vec![])
            .with_children(vec![
                Element::content("mj-text", Attributes::new(), "<p>a</p>"),
                Element::leaf("mj-spacer", Attributes::new()),
            ]);
        let section = Element::container("mj-section", Attributes::new(), vec![]).with_children(vec![column]);
        root.children.push(section.into());

        let mut collector = TagCollector::default();
        collector.visit_element(&Element::Root(root));

        assert_eq!(
            collector.tags,
            vec!["mjml", "mj-section", "mj-column", "mj-text", "mj-spacer"]
        );
    }

    #[test]
    fn test_override_skips_subtree() {
        struct SectionsOnly(usize);
        impl Visitor for SectionsOnly {
            fn visit_container(&mut self, _container: &Container) {
                self.0 += 1;
            }
        }

        let mut root = Root::new("Title");
        for _ in 0..2 {
            let section = Element::container("mj-section", Attributes::new(), vec![])
                .with_children(vec![Element::container("mj-column", Attributes::new(), vec![])]);
            root.children.push(section.into());
        }

        let mut visitor = SectionsOnly(0);
        visitor.visit_root(&root);
        assert_eq!(visitor.0, 2);
    }
}
