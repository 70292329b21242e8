//! Pull-based lexical scanner over raw XML text.
//!
//! Wraps [`quick_xml::Reader`] and yields a finite, non-restartable
//! sequence of [`ScanEvent`]s in document order: tokens interleaved with
//! malformedness diagnostics. End-tag matching is *not* checked here
//! (`check_end_names` off, `allow_unmatched_ends` on): tag balance is the
//! indentation engine's job, so the validation policy can decide what
//! unbalance means.
//!
//! DOCTYPE declarations are tokenized as opaque spans; nothing in this
//! crate resolves external subsets or touches the filesystem or network.

use crate::token::{Attribute, Span, Tag, Token, TokenKind};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::VecDeque;
use xmlfmt_report::{Diagnostic, offset_to_location};

/// One step of the scan: either a token or a malformedness diagnostic.
///
/// Diagnostics are ordered before the token they were discovered in, so a
/// `Fail`-policy consumer stops before emitting anything for the bad
/// construct.
#[derive(Debug)]
pub enum ScanEvent {
    Token(Token),
    Malformed(Diagnostic),
}

/// Lazy scanner over the full source text.
///
/// After a lexical error the scanner resumes past the next `>` following
/// the error position, so best-effort consumers still see the tokens the
/// rest of the document yields.
pub struct Scanner<'src> {
    source: &'src str,
    reader: Reader<&'src [u8]>,
    /// Offset of the current reader slice within `source`.
    base: usize,
    /// Events discovered but not yet handed out.
    queue: VecDeque<ScanEvent>,
    done: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            reader: reader_at(source, 0),
            base: 0,
            queue: VecDeque::new(),
            done: false,
        }
    }

    /// Read one quick-xml event and queue the resulting scan events.
    fn scan_step(&mut self) {
        let start = self.base + self.reader.buffer_position() as usize;
        let event = self.reader.read_event();
        let end = self.base + self.reader.buffer_position() as usize;
        let span = Span { start, end };

        match event {
            Ok(Event::Start(e)) => {
                let tag = self.read_tag(&e, span);
                self.push_token(TokenKind::StartTag(tag), span);
            }
            Ok(Event::Empty(e)) => {
                let tag = self.read_tag(&e, span);
                self.push_token(TokenKind::EmptyTag(tag), span);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                self.push_token(TokenKind::EndTag { name }, span);
            }
            Ok(Event::Text(_)) => self.push_raw(|raw| TokenKind::Text { raw }, span),
            Ok(Event::CData(_)) => self.push_raw(|raw| TokenKind::Cdata { raw }, span),
            Ok(Event::Comment(_)) => self.push_raw(|raw| TokenKind::Comment { raw }, span),
            Ok(Event::PI(_)) => self.push_raw(|raw| TokenKind::Pi { raw }, span),
            Ok(Event::Decl(_)) => self.push_raw(|raw| TokenKind::Decl { raw }, span),
            Ok(Event::DocType(_)) => self.push_raw(|raw| TokenKind::Doctype { raw }, span),
            Ok(Event::Eof) => self.done = true,
            Err(err) => {
                let at = (self.base + self.reader.error_position() as usize).min(self.source.len());
                let diagnostic = Diagnostic::error(format!("malformed XML: {err}"))
                    .at(offset_to_location(self.source, at))
                    .build();
                self.queue.push_back(ScanEvent::Malformed(diagnostic));
                self.resume_after(at);
            }
        }
    }

    fn push_token(&mut self, kind: TokenKind, span: Span) {
        self.queue.push_back(ScanEvent::Token(Token { kind, span }));
    }

    /// Queue a raw-payload token, slicing the payload from the span.
    fn push_raw(&mut self, make: fn(String) -> TokenKind, span: Span) {
        let raw = self.source[span.start..span.end].to_string();
        self.push_token(make(raw), span);
    }

    /// Parse the name and attributes of a start or empty tag.
    ///
    /// A malformed attribute (bad quoting, missing `=`) is reported once
    /// and ends attribute parsing for the tag; attributes parsed before
    /// the error are kept, so the tag still formats.
    fn read_tag(&mut self, e: &BytesStart<'_>, span: Span) -> Tag {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attributes = Vec::new();

        for attr in e.attributes() {
            match attr {
                Ok(attr) => {
                    attributes.push(Attribute {
                        name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                        value: String::from_utf8_lossy(&attr.value).into_owned(),
                    });
                }
                Err(err) => {
                    let diagnostic =
                        Diagnostic::error(format!("malformed attribute in <{name}>: {err}"))
                            .at(offset_to_location(self.source, span.start))
                            .build();
                    self.queue.push_back(ScanEvent::Malformed(diagnostic));
                    break;
                }
            }
        }

        Tag { name, attributes }
    }

    /// Re-seed the reader past the next `>` after a lexical error.
    /// Always makes forward progress; with no `>` left, scanning ends.
    fn resume_after(&mut self, error_at: usize) {
        let floor = (self.base + self.reader.buffer_position() as usize).max(self.base + 1);
        let from = error_at.max(floor).min(self.source.len());

        match self.source.as_bytes()[from..].iter().position(|&b| b == b'>') {
            Some(i) => {
                self.base = from + i + 1;
                self.reader = reader_at(self.source, self.base);
            }
            None => self.done = true,
        }
    }
}

fn reader_at(source: &str, base: usize) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(&source[base..]);
    let config = reader.config_mut();
    config.trim_text_start = false;
    config.trim_text_end = false;
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

impl Iterator for Scanner<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(event);
            }
            if self.done {
                return None;
            }
            self.scan_step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();
        for event in Scanner::new(source) {
            match event {
                ScanEvent::Token(token) => tokens.push(token),
                ScanEvent::Malformed(diagnostic) => diagnostics.push(diagnostic),
            }
        }
        (tokens, diagnostics)
    }

    #[test]
    fn test_scan_simple_document() {
        let (tokens, diagnostics) = tokens("<root a=\"1\"><child/>text</root>");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 4);

        match &tokens[0].kind {
            TokenKind::StartTag(tag) => {
                assert_eq!(tag.name, "root");
                assert_eq!(tag.attributes.len(), 1);
                assert_eq!(tag.attributes[0].name, "a");
                assert_eq!(tag.attributes[0].value, "1");
            }
            other => panic!("expected start tag, got {other:?}"),
        }
        assert!(matches!(&tokens[1].kind, TokenKind::EmptyTag(tag) if tag.name == "child"));
        assert!(matches!(&tokens[2].kind, TokenKind::Text { raw } if raw == "text"));
        assert!(matches!(&tokens[3].kind, TokenKind::EndTag { name } if name == "root"));
    }

    #[test]
    fn test_spans_cover_the_source() {
        let source = "<a>hi</a>";
        let (tokens, _) = tokens(source);
        assert_eq!(tokens[0].span, Span { start: 0, end: 3 });
        assert_eq!(tokens[1].span, Span { start: 3, end: 5 });
        assert_eq!(tokens[2].span, Span { start: 5, end: 9 });
    }

    #[test]
    fn test_doctype_is_an_opaque_span() {
        let source = "<!DOCTYPE note SYSTEM \"note.dtd\">\n<note/>";
        let (tokens, diagnostics) = tokens(source);
        assert!(diagnostics.is_empty());
        assert!(matches!(
            &tokens[0].kind,
            TokenKind::Doctype { raw } if raw == "<!DOCTYPE note SYSTEM \"note.dtd\">"
        ));
    }

    #[test]
    fn test_attribute_values_keep_entities_raw() {
        let (tokens, _) = tokens("<a title=\"x &amp; y\">&lt;</a>");
        match &tokens[0].kind {
            TokenKind::StartTag(tag) => assert_eq!(tag.attributes[0].value, "x &amp; y"),
            other => panic!("expected start tag, got {other:?}"),
        }
        assert!(matches!(&tokens[1].kind, TokenKind::Text { raw } if raw == "&lt;"));
    }

    #[test]
    fn test_malformed_attribute_reports_and_keeps_earlier_attrs() {
        let (tokens, diagnostics) = tokens("<a good=\"yes\" bad=unquoted><b/></a>");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());

        // The diagnostic precedes the tag; the tag keeps what parsed.
        match &tokens[0].kind {
            TokenKind::StartTag(tag) => {
                assert_eq!(tag.name, "a");
                assert_eq!(tag.attributes.len(), 1);
                assert_eq!(tag.attributes[0].name, "good");
            }
            other => panic!("expected start tag, got {other:?}"),
        }
        // Scanning continued past the bad tag.
        assert!(
            tokens
                .iter()
                .any(|t| matches!(&t.kind, TokenKind::EmptyTag(tag) if tag.name == "b"))
        );
    }

    #[test]
    fn test_unterminated_construct_ends_scan_with_diagnostic() {
        let (tokens, diagnostics) = tokens("<a/><!-- never closed");
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(&tokens[0].kind, TokenKind::EmptyTag(_)));
    }

    #[test]
    fn test_mismatched_end_tag_is_not_a_scanner_concern() {
        // Tag balance is checked by the indentation engine, not here.
        let (tokens, diagnostics) = tokens("<a></b>");
        assert!(diagnostics.is_empty());
        assert!(matches!(&tokens[1].kind, TokenKind::EndTag { name } if name == "b"));
    }

    #[test]
    fn test_end_tag_without_open_element_is_still_a_token() {
        // An extra closing tag must reach the engine as a token, not be
        // swallowed here as a lexical error.
        let (tokens, diagnostics) = tokens("<a></a></a>");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[2].kind, TokenKind::EndTag { name } if name == "a"));

        let (tokens, diagnostics) = self::tokens("</lone>");
        assert!(diagnostics.is_empty());
        assert!(matches!(&tokens[0].kind, TokenKind::EndTag { name } if name == "lone"));
    }
}
