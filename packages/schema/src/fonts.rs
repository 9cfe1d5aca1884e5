//! Fonts offered by the builder.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
}

impl GenericFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Serif => "serif",
            GenericFamily::Monospace => "monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontResource {
    pub name: &'static str,
    /// Stylesheet to import; system fonts have none.
    pub href: Option<&'static str>,
    pub fallback: &'static [&'static str],
    pub family: GenericFamily,
}

pub const FONTS: &[FontResource] = &[
    FontResource { name: "Arial", href: None, fallback: &["Helvetica"], family: GenericFamily::SansSerif },
    FontResource { name: "Helvetica", href: None, fallback: &["Arial"], family: GenericFamily::SansSerif },
    FontResource { name: "Times New Roman", href: None, fallback: &["Times"], family: GenericFamily::Serif },
    FontResource { name: "Times", href: None, fallback: &["Times New Roman"], family: GenericFamily::Serif },
    FontResource { name: "Courier New", href: None, fallback: &["Courier"], family: GenericFamily::Monospace },
    FontResource {
        name: "Open Sans",
        href: Some("https://fonts.googleapis.com/css?family=Open+Sans:400,700"),
        fallback: &[],
        family: GenericFamily::SansSerif,
    },
    FontResource {
        name: "Roboto",
        href: Some("https://fonts.googleapis.com/css?family=Roboto:400,700"),
        fallback: &[],
        family: GenericFamily::SansSerif,
    },
    FontResource {
        name: "Ubuntu",
        href: Some("https://fonts.googleapis.com/css?family=Ubuntu:400,700"),
        fallback: &[],
        family: GenericFamily::SansSerif,
    },
    FontResource {
        name: "Montserrat",
        href: Some("https://fonts.googleapis.com/css?family=Montserrat:400,700"),
        fallback: &[],
        family: GenericFamily::SansSerif,
    },
    FontResource {
        name: "Lato",
        href: Some("https://fonts.googleapis.com/css?family=Lato:400,700"),
        fallback: &[],
        family: GenericFamily::SansSerif,
    },
    FontResource {
        name: "Lora",
        href: Some("https://fonts.googleapis.com/css?family=Lora:400,700"),
        fallback: &[],
        family: GenericFamily::Serif,
    },
    FontResource {
        name: "Source Serif Pro",
        href: Some("https://fonts.googleapis.com/css?family=Source+Serif+Pro:400,700"),
        fallback: &[],
        family: GenericFamily::Serif,
    },
];

pub const DEFAULT_FONT: &str = "Ubuntu";
pub const DEFAULT_FONT_SIZE: u32 = 13;

pub fn find_font(name: &str) -> Option<&'static FontResource> {
    FONTS.iter().find(|font| font.name == name)
}

/// CSS `font-family` value: the font, its fallbacks, then the generic family.
pub fn font_stack(font: &FontResource) -> String {
    std::iter::once(font.name)
        .chain(font.fallback.iter().copied())
        .chain(std::iter::once(font.family.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_stack_includes_fallbacks() {
        let arial = find_font("Arial").unwrap();
        assert_eq!(font_stack(arial), "Arial, Helvetica, sans-serif");

        let lora = find_font("Lora").unwrap();
        assert_eq!(font_stack(lora), "Lora, serif");
    }

    #[test]
    fn test_default_font_is_registered() {
        let font = find_font(DEFAULT_FONT).unwrap();
        assert!(font.href.is_some());
    }

    #[test]
    fn test_unknown_font() {
        assert!(find_font("Comic Sans MS").is_none());
    }
}
