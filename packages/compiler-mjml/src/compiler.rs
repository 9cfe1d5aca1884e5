use crate::registry::{ElementKind, ElementRegistry};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use woosh_common::{escape_html, walk_element, Visitor};
use woosh_schema::{find_font, AttrValue, Attributes, Element, Root};

/// Errors that can occur during markup compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Element '{tag}' is registered as {expected:?} but has a different shape")]
    ShapeMismatch { tag: String, expected: ElementKind },
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Options for markup compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Put each tag on its own indented line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Output buffer handed to each [`ElementType`](crate::ElementType).
pub struct Compiler<'a> {
    registry: &'a ElementRegistry,
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Compiler<'a> {
    pub fn new(registry: &'a ElementRegistry, options: CompileOptions) -> Self {
        Self {
            registry,
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn open_tag(&mut self, tag: &str, attributes: &Attributes) {
        self.add_line(&format!("<{}{}>", tag, render_attributes(attributes)));
        self.indent();
    }

    pub fn close_tag(&mut self, tag: &str) {
        self.dedent();
        self.add_line(&format!("</{}>", tag));
    }

    /// `<tag attrs>inner</tag>` on one line; `inner` is emitted as is.
    pub fn inline_tag(&mut self, tag: &str, attributes: &Attributes, inner: &str) {
        self.add_line(&format!("<{tag}{}>{inner}</{tag}>", render_attributes(attributes)));
    }

    /// Self-closing tag. `spaced` puts a space before `/>`.
    pub fn void_tag(&mut self, tag: &str, attributes: &Attributes, spaced: bool) {
        let close = if spaced { " />" } else { "/>" };
        self.add_line(&format!("<{}{}{}", tag, render_attributes(attributes), close));
    }

    pub fn compile_children(&mut self, children: &[Arc<Element>]) -> CompileResult<()> {
        for child in children {
            self.compile_element(child)?;
        }
        Ok(())
    }

    /// Dispatch on tag name. Unregistered tags produce no output.
    pub fn compile_element(&mut self, element: &Element) -> CompileResult<()> {
        if let Element::Root(root) = element {
            return self.compile_root(root);
        }

        let registry = self.registry;
        match registry.get(element.tag_name()) {
            Some(element_type) => {
                debug!(tag = element.tag_name(), "compiling element");
                element_type.to_markup(self, element)
            }
            None => {
                warn!(tag = element.tag_name(), "skipping unknown element");
                Ok(())
            }
        }
    }

    fn compile_root(&mut self, root: &Root) -> CompileResult<()> {
        self.open_tag("mjml", &Attributes::new());
        self.open_tag("mj-head", &Attributes::new());

        for name in &root.fonts {
            match find_font(name) {
                Some(font) => {
                    if let Some(href) = font.href {
                        self.add_line(&format!(
                            "<mj-font name=\"{}\" href=\"{}\" />",
                            escape_html(font.name),
                            escape_html(href)
                        ));
                    }
                }
                None => warn!(font = name.as_str(), "skipping unknown font"),
            }
        }

        self.add_line(&format!("<mj-title>{}</mj-title>", escape_html(&root.title)));
        if let Some(preview) = root.preview() {
            self.add_line(&format!("<mj-preview>{}</mj-preview>", escape_html(preview)));
        }

        self.close_tag("mj-head");
        self.open_tag("mj-body", &Attributes::new());
        self.compile_children(&root.children)?;
        self.close_tag("mj-body");
        self.close_tag("mjml");
        Ok(())
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}

/// ` key="value"` for each attribute, values escaped.
fn render_attributes(attributes: &Attributes) -> String {
    let mut rendered = String::new();
    for (key, value) in attributes.iter() {
        rendered.push(' ');
        rendered.push_str(key);
        rendered.push_str("=\"");
        match value {
            AttrValue::Text(text) => rendered.push_str(&escape_html(text)),
            AttrValue::Number(_) => rendered.push_str(&value.to_string()),
        }
        rendered.push('"');
    }
    rendered
}

/// Compile a template with the builtin registry and default options.
pub fn compile(element: &Element) -> CompileResult<String> {
    compile_with(ElementRegistry::shared(), element, CompileOptions::default())
}

#[instrument(skip_all, fields(tag = element.tag_name(), pretty = options.pretty))]
pub fn compile_with(
    registry: &ElementRegistry,
    element: &Element,
    options: CompileOptions,
) -> CompileResult<String> {
    info!("compiling template");
    let mut compiler = Compiler::new(registry, options);
    compiler.compile_element(element)?;
    let output = compiler.get_output();
    info!(bytes = output.len(), "compiled template");
    Ok(output)
}

struct UnknownTags<'a> {
    registry: &'a ElementRegistry,
    found: BTreeSet<String>,
}

impl Visitor for UnknownTags<'_> {
    fn visit_element(&mut self, element: &Element) {
        if !matches!(element, Element::Root(_)) && !self.registry.contains(element.tag_name()) {
            self.found.insert(element.tag_name().to_string());
        }
        walk_element(self, element);
    }
}

/// Every tag in the tree without a registration, sorted.
pub fn unknown_tags(registry: &ElementRegistry, element: &Element) -> Vec<String> {
    let mut visitor = UnknownTags {
        registry,
        found: BTreeSet::new(),
    };
    visitor.visit_element(element);
    visitor.found.into_iter().collect()
}
