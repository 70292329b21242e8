//! Lexical tokens produced by the scanner.

/// Byte span of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

/// One attribute of a start tag.
///
/// The value is the raw text between the quotes: entity references are kept
/// untouched so the formatter never alters document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A start or empty-element tag: name plus ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Full tag name, including any namespace prefix.
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// The lexical units the scanner recognizes.
///
/// Raw-payload kinds (text, comment, CDATA, PI, XML declaration, DOCTYPE)
/// carry the exact source slice; tags are parsed into name and attributes
/// because the line composer re-renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    StartTag(Tag),
    EmptyTag(Tag),
    EndTag { name: String },
    Text { raw: String },
    Comment { raw: String },
    Cdata { raw: String },
    Pi { raw: String },
    Decl { raw: String },
    Doctype { raw: String },
}

/// A token: kind plus its raw span in the source.
///
/// Tokens are produced and consumed within a single `format` call and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
