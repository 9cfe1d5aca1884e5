//! HTML tokenizer using logos
//!
//! Rich-text fragments are small and come from our own serializer or from
//! pasted markup, so the tokenizer only separates tags, comments and text.
//! Attribute lists are lexed by a second, smaller lexer over the tag body.

use logos::{Lexer, Logos};
use std::fmt;
use std::ops::Range;
use tracing::warn;
use woosh_common::decode_entities;

/// Token types for an HTML fragment
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[token("<!--", comment)]
    Comment,

    // <!DOCTYPE html>, <?xml ...?>
    #[regex(r"<![a-zA-Z][^>]*>")]
    #[regex(r"<\?[^>]*>")]
    Declaration,

    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n]*>", |lex| {
        let s = lex.slice();
        s[2..s.len() - 1].trim_end()
    })]
    CloseTag(&'src str),

    #[regex(r#"<[a-zA-Z][a-zA-Z0-9-]*([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    OpenTag(&'src str),

    // A `<` that does not start a tag is plain text
    #[token("<")]
    Lt,

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),
}

fn comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> bool {
    let end = lex
        .remainder()
        .find("-->")
        .map(|index| index + 3)
        .unwrap_or(lex.remainder().len());
    lex.bump(end);
    true
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Comment => write!(f, "<!-- -->"),
            Token::Declaration => write!(f, "<!...>"),
            Token::CloseTag(name) => write!(f, "</{}>", name),
            Token::OpenTag(tag) => write!(f, "{}", tag),
            Token::Lt => write!(f, "<"),
            Token::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Tokenize an HTML fragment.
///
/// Input the lexer rejects, such as a tag with an unterminated quote, does
/// not swallow the rest of the fragment: its first character becomes text
/// and lexing resumes right after it.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    'resume: while offset < source.len() {
        let mut lexer = Token::lexer(&source[offset..]);
        while let Some(result) = lexer.next() {
            let span = offset + lexer.span().start..offset + lexer.span().end;
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    let start = span.start;
                    let len = source[start..].chars().next().map_or(1, char::len_utf8);
                    warn!(at = start, "unterminated markup, keeping it as text");
                    let token = match &source[start..start + len] {
                        "<" => Token::Lt,
                        text => Token::Text(text),
                    };
                    tokens.push((token, start..start + len));
                    offset = start + len;
                    continue 'resume;
                }
            }
        }
        break;
    }
    tokens
}

/// Tokens inside an opening tag, after the tag name
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum AttrToken<'src> {
    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    Quoted(&'src str),

    #[regex(r#"[^ \t\r\n\f"'=<>`]+"#, |lex| lex.slice())]
    Word(&'src str),
}

/// A parsed opening tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Lowercased tag name
    pub name: String,
    /// Attributes in source order, names lowercased and values decoded
    pub attributes: Vec<(String, String)>,
    pub self_closing: bool,
}

impl Tag {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Split an [`Token::OpenTag`] slice (`<a href="x">`) into name and attributes.
pub fn parse_tag(source: &str) -> Tag {
    let inner = source.trim_start_matches('<').trim_end_matches('>');
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (inner, false),
    };

    let name_end = inner
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '-'))
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();

    let mut attributes = Vec::new();
    let mut tokens = AttrToken::lexer(&inner[name_end..]).filter_map(Result::ok).peekable();

    while let Some(token) = tokens.next() {
        let AttrToken::Word(key) = token else {
            continue;
        };
        let value = if tokens.peek() == Some(&AttrToken::Eq) {
            tokens.next();
            match tokens.next() {
                Some(AttrToken::Quoted(value)) | Some(AttrToken::Word(value)) => decode_entities(value),
                _ => String::new(),
            }
        } else {
            String::new()
        };
        attributes.push((key.to_ascii_lowercase(), value));
    }

    Tag {
        name,
        attributes,
        self_closing,
    }
}
