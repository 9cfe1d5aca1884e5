//! Element types known to the builder.
//!
//! Each tag maps to an [`ElementType`] that knows its default schema and
//! how to emit itself as markup. The registry is built once and shared.

use crate::compiler::{CompileError, CompileResult, Compiler};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use woosh_schema::{Attributes, Element, StackMode, COLUMN_TAG, SECTION_TAG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Container,
    Content,
    Leaf,
}

impl ElementKind {
    pub fn of(element: &Element) -> Option<ElementKind> {
        match element {
            Element::Root(_) => None,
            Element::Container(_) => Some(ElementKind::Container),
            Element::Content(_) => Some(ElementKind::Content),
            Element::Leaf(_) => Some(ElementKind::Leaf),
        }
    }
}

pub trait ElementType: Send + Sync {
    fn tag_name(&self) -> &'static str;

    /// Label shown in the element picker.
    fn human_name(&self) -> &'static str;

    fn kind(&self) -> ElementKind;

    /// Fresh element inserted when the user adds one of these.
    fn default_schema(&self) -> Element;

    /// `(vertical, horizontal)` padding used when the attributes leave a
    /// side unset.
    fn padding_defaults(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()>;
}

pub struct ElementRegistry {
    types: BTreeMap<&'static str, Arc<dyn ElementType>>,
    order: Vec<&'static str>,
}

impl ElementRegistry {
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Section));
        registry.register(Arc::new(Column));
        registry.register(Arc::new(HtmlContent::TEXT));
        registry.register(Arc::new(HtmlContent::BUTTON));
        registry.register(Arc::new(Image));
        registry.register(Arc::new(HtmlContent::RAW));
        registry.register(Arc::new(SelfClosing::DIVIDER));
        registry.register(Arc::new(SelfClosing::SPACER));
        registry
    }

    /// Process-wide builtin registry.
    pub fn shared() -> &'static ElementRegistry {
        static REGISTRY: OnceLock<ElementRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ElementRegistry::builtin)
    }

    /// Register a type, replacing any previous registration for its tag.
    pub fn register(&mut self, element_type: Arc<dyn ElementType>) {
        let tag = element_type.tag_name();
        if self.types.insert(tag, element_type).is_none() {
            self.order.push(tag);
        }
    }

    pub fn get(&self, tag_name: &str) -> Option<&dyn ElementType> {
        self.types.get(tag_name).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, tag_name: &str) -> bool {
        self.types.contains_key(tag_name)
    }

    pub fn default_schema(&self, tag_name: &str) -> Option<Element> {
        self.get(tag_name).map(|entry| entry.default_schema())
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ElementType> + '_ {
        self.order.iter().filter_map(move |tag| self.get(tag))
    }

    /// Types a user can drop into a column.
    pub fn content_types(&self) -> impl Iterator<Item = &dyn ElementType> + '_ {
        self.iter().filter(|entry| entry.kind() != ElementKind::Container)
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn expect_kind(element_type: &dyn ElementType, element: &Element) -> CompileResult<()> {
    if ElementKind::of(element) == Some(element_type.kind()) {
        Ok(())
    } else {
        Err(CompileError::ShapeMismatch {
            tag: element.tag_name().to_string(),
            expected: element_type.kind(),
        })
    }
}

struct Section;

impl ElementType for Section {
    fn tag_name(&self) -> &'static str {
        SECTION_TAG
    }

    fn human_name(&self) -> &'static str {
        "Section"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Container
    }

    fn default_schema(&self) -> Element {
        Element::container(
            SECTION_TAG,
            Attributes::from_pairs(&[
                ("padding-top", "20px"),
                ("padding-bottom", "20px"),
                ("padding-left", "0px"),
                ("padding-right", "0px"),
            ]),
            Vec::new(),
        )
    }

    fn padding_defaults(&self) -> Option<(&'static str, &'static str)> {
        Some(("20px", "0px"))
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()> {
        expect_kind(self, element)?;

        let columns: Vec<&Element> = element
            .children()
            .iter()
            .map(|child| child.as_ref())
            .filter(|child| child.tag_name() == COLUMN_TAG)
            .collect();

        compiler.open_tag(SECTION_TAG, element.attributes());
        match element.stack() {
            Some(StackMode::No) if columns.len() != 1 => {
                compiler.open_tag("mj-group", &Attributes::new());
                compiler.compile_children(element.children())?;
                compiler.close_tag("mj-group");
            }
            Some(StackMode::TwoByTwo) if columns.len() == 4 => {
                for pair in columns.chunks(2) {
                    compiler.open_tag("mj-group", &Attributes::new());
                    for column in pair {
                        compiler.compile_element(column)?;
                    }
                    compiler.close_tag("mj-group");
                }
            }
            _ => compiler.compile_children(element.children())?,
        }
        compiler.close_tag(SECTION_TAG);
        Ok(())
    }
}

struct Column;

impl ElementType for Column {
    fn tag_name(&self) -> &'static str {
        COLUMN_TAG
    }

    fn human_name(&self) -> &'static str {
        "Column"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Container
    }

    fn default_schema(&self) -> Element {
        Element::container(
            COLUMN_TAG,
            Attributes::from_pairs(&[("vertical-align", "middle")]),
            Vec::new(),
        )
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()> {
        expect_kind(self, element)?;
        compiler.open_tag(COLUMN_TAG, element.attributes());
        compiler.compile_children(element.children())?;
        compiler.close_tag(COLUMN_TAG);
        Ok(())
    }
}

/// Content block whose HTML is emitted verbatim inside an output tag.
struct HtmlContent {
    tag: &'static str,
    output_tag: &'static str,
    human_name: &'static str,
    default_content: &'static str,
    default_attributes: &'static [(&'static str, &'static str)],
    numeric_attributes: &'static [(&'static str, f64)],
}

impl HtmlContent {
    const TEXT: HtmlContent = HtmlContent {
        tag: "mj-text",
        output_tag: "mj-text",
        human_name: "Text",
        default_content: "<p>Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.</p>",
        default_attributes: &[],
        numeric_attributes: &[],
    };

    const BUTTON: HtmlContent = HtmlContent {
        tag: "mj-button",
        output_tag: "mj-button",
        human_name: "Button",
        default_content: "<span>Click Here</span>",
        default_attributes: &[],
        numeric_attributes: &[],
    };

    // Raw HTML renders through mj-text so it still gets column padding.
    const RAW: HtmlContent = HtmlContent {
        tag: "mj-raw",
        output_tag: "mj-text",
        human_name: "HTML",
        default_content: "<p style=\"color: slategray\">Your html here...</p>",
        default_attributes: &[("align", "left")],
        numeric_attributes: &[("padding", 0.0)],
    };
}

impl ElementType for HtmlContent {
    fn tag_name(&self) -> &'static str {
        self.tag
    }

    fn human_name(&self) -> &'static str {
        self.human_name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Content
    }

    fn default_schema(&self) -> Element {
        let mut attributes = Attributes::from_pairs(self.default_attributes);
        for (key, value) in self.numeric_attributes {
            attributes.insert(*key, *value);
        }
        Element::content(self.tag, attributes, self.default_content)
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()> {
        expect_kind(self, element)?;
        let content = element.content_html().unwrap_or_default();
        compiler.inline_tag(self.output_tag, element.attributes(), content);
        Ok(())
    }
}

struct Image;

impl ElementType for Image {
    fn tag_name(&self) -> &'static str {
        "mj-image"
    }

    fn human_name(&self) -> &'static str {
        "Image"
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Content
    }

    fn default_schema(&self) -> Element {
        Element::content(
            "mj-image",
            Attributes::from_pairs(&[("src", "https://create-rust-app.dev/img/cra-logo-rust.svg")]),
            "",
        )
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()> {
        expect_kind(self, element)?;
        compiler.void_tag("mj-image", element.attributes(), false);
        Ok(())
    }
}

/// Leaf rendered as a self-closing tag.
struct SelfClosing {
    tag: &'static str,
    human_name: &'static str,
    spaced: bool,
}

impl SelfClosing {
    const DIVIDER: SelfClosing = SelfClosing {
        tag: "mj-divider",
        human_name: "Divider",
        spaced: false,
    };

    const SPACER: SelfClosing = SelfClosing {
        tag: "mj-spacer",
        human_name: "Space",
        spaced: true,
    };
}

impl ElementType for SelfClosing {
    fn tag_name(&self) -> &'static str {
        self.tag
    }

    fn human_name(&self) -> &'static str {
        self.human_name
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Leaf
    }

    fn default_schema(&self) -> Element {
        Element::leaf(self.tag, Attributes::new())
    }

    fn to_markup(&self, compiler: &mut Compiler<'_>, element: &Element) -> CompileResult<()> {
        expect_kind(self, element)?;
        compiler.void_tag(self.tag, element.attributes(), self.spaced);
        Ok(())
    }
}
