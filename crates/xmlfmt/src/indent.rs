//! Depth tracking and line-oriented emission.
//!
//! The engine consumes the token stream in order and rebuilds the
//! document text with normalized indentation. Line structure follows the
//! input: a token moves to a fresh indented line exactly when the input
//! had a line break in the whitespace before it, so inline content like
//! `<name>value</name>` stays inline.

use crate::compose::compose_start_tag;
use crate::error::FormatError;
use crate::prefs::FormattingPreferences;
use crate::token::{Tag, Token, TokenKind};
use crate::validate::Validator;
use xmlfmt_report::{Diagnostic, offset_to_location};

/// Pending inter-token separation, driven by whitespace runs in the input.
#[derive(Debug)]
enum Pending {
    /// Nothing emitted yet; whitespace before the first token is dropped.
    AtStart,
    /// Last emission ended mid-line, no spacing seen since.
    None,
    /// Whitespace without a line break, emitted verbatim before the next
    /// token.
    Inline(String),
    /// At least one line break; `blank_lines` extra empty lines were in
    /// the input.
    Break { blank_lines: usize },
}

/// Per-call formatting state: output buffer, nesting stack, separation.
///
/// All of this is local to one `format` invocation, so a formatter reused
/// after unbalanced input starts the next call from a clean slate.
pub(crate) struct IndentationEngine<'a> {
    source: &'a str,
    prefs: &'a FormattingPreferences,
    line_separator: &'a str,
    out: String,
    stack: Vec<String>,
    pending: Pending,
    top_level_elements: usize,
}

impl<'a> IndentationEngine<'a> {
    pub fn new(source: &'a str, prefs: &'a FormattingPreferences, line_separator: &'a str) -> Self {
        Self {
            source,
            prefs,
            line_separator,
            out: String::with_capacity(source.len()),
            stack: Vec::new(),
            pending: Pending::AtStart,
            top_level_elements: 0,
        }
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn handle(
        &mut self,
        token: Token,
        validator: &mut Validator<'_>,
    ) -> Result<(), FormatError> {
        let span = token.span;
        match token.kind {
            TokenKind::StartTag(tag) => {
                if self.stack.is_empty() {
                    self.top_level_elements += 1;
                }
                self.emit_tag(&tag, false);
                self.stack.push(tag.name);
                Ok(())
            }
            TokenKind::EmptyTag(tag) => {
                if self.stack.is_empty() {
                    self.top_level_elements += 1;
                }
                self.emit_tag(&tag, true);
                Ok(())
            }
            TokenKind::EndTag { name } => {
                match self.stack.pop() {
                    None => {
                        // Extra closing tag: depth stays untouched, the
                        // diagnostic is the only observable effect.
                        validator.report(
                            Diagnostic::error(format!(
                                "unbalanced end tags: </{name}> has no matching start tag"
                            ))
                            .at(offset_to_location(self.source, span.start))
                            .build(),
                        )?;
                    }
                    Some(opened) if opened != name => {
                        validator.report(
                            Diagnostic::error(format!(
                                "mismatched end tag: expected </{opened}>, found </{name}>"
                            ))
                            .at(offset_to_location(self.source, span.start))
                            .build(),
                        )?;
                    }
                    Some(_) => {}
                }
                // The closing tag aligns with its opening tag.
                self.flush_separation(self.depth());
                self.out.push('<');
                self.out.push('/');
                self.out.push_str(&name);
                self.out.push('>');
                self.pending = Pending::None;
                Ok(())
            }
            TokenKind::Text { raw } => self.handle_text(&raw, span.start, validator),
            TokenKind::Comment { raw }
            | TokenKind::Cdata { raw }
            | TokenKind::Pi { raw }
            | TokenKind::Decl { raw }
            | TokenKind::Doctype { raw } => {
                // Indented at the current depth, never changes it.
                self.flush_separation(self.depth());
                self.emit_verbatim(&raw);
                self.pending = Pending::None;
                Ok(())
            }
        }
    }

    /// Close out the stream: unbalance and root-element accounting, plus
    /// the trailing line break when the input ended with one.
    pub fn finish(mut self, validator: &mut Validator<'_>) -> Result<String, FormatError> {
        if let Some(open) = self.stack.last() {
            validator.report(
                Diagnostic::error(format!("unbalanced end tags: <{open}> is never closed"))
                    .build(),
            )?;
        }
        if self.top_level_elements == 0 {
            validator.report(Diagnostic::warning("no root element in document").build())?;
        } else if self.top_level_elements > 1 {
            validator.report(
                Diagnostic::warning("multiple root elements in document").build(),
            )?;
        }

        if let Pending::Break { blank_lines } = self.pending {
            self.out.push_str(self.line_separator);
            if !self.prefs.delete_blank_lines {
                for _ in 0..blank_lines {
                    self.out.push_str(self.line_separator);
                }
            }
        }
        Ok(self.out)
    }

    fn emit_tag(&mut self, tag: &Tag, self_closing: bool) {
        self.flush_separation(self.depth());
        let indent = self.prefs.indent_for(self.depth());
        let lines = compose_start_tag(tag, self_closing, &indent, self.prefs);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.out.push_str(self.line_separator);
            }
            self.out.push_str(line);
        }
        self.pending = Pending::None;
    }

    fn handle_text(
        &mut self,
        raw: &str,
        offset: usize,
        validator: &mut Validator<'_>,
    ) -> Result<(), FormatError> {
        let Some(first) = raw.find(|c: char| !c.is_whitespace()) else {
            // Whitespace-only run between markup.
            self.note_whitespace(raw);
            return Ok(());
        };
        let last = raw.rfind(|c: char| !c.is_whitespace()).unwrap_or(first);
        let last_end = last + raw[last..].chars().next().map_or(1, char::len_utf8);

        let (leading, rest) = raw.split_at(first);
        let (core, trailing) = rest.split_at(last_end - first);

        self.note_whitespace(leading);
        if self.stack.is_empty() {
            validator.report(
                Diagnostic::warning("content outside of root element")
                    .at(offset_to_location(self.source, offset + first))
                    .build(),
            )?;
        }
        self.flush_separation(self.depth());
        self.emit_verbatim(core);
        self.pending = Pending::None;
        self.note_whitespace(trailing);
        Ok(())
    }

    /// Record an inter-token whitespace run without emitting anything yet.
    fn note_whitespace(&mut self, ws: &str) {
        if ws.is_empty() {
            return;
        }
        let breaks = count_line_breaks(ws);
        if breaks == 0 {
            match &mut self.pending {
                // Spaces after a line break are old indentation, dropped.
                Pending::AtStart | Pending::Break { .. } => {}
                Pending::None => self.pending = Pending::Inline(ws.to_string()),
                Pending::Inline(spacing) => spacing.push_str(ws),
            }
        } else {
            self.pending = match &self.pending {
                Pending::AtStart => Pending::AtStart,
                Pending::Break { blank_lines } => Pending::Break {
                    blank_lines: blank_lines + breaks,
                },
                _ => Pending::Break {
                    blank_lines: breaks - 1,
                },
            };
        }
    }

    /// Emit the recorded separation before a token at the given depth.
    fn flush_separation(&mut self, depth: usize) {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::AtStart | Pending::None => {}
            Pending::Inline(spacing) => self.out.push_str(&spacing),
            Pending::Break { blank_lines } => {
                self.out.push_str(self.line_separator);
                if !self.prefs.delete_blank_lines {
                    for _ in 0..blank_lines {
                        self.out.push_str(self.line_separator);
                    }
                }
                let indent = self.prefs.indent_for(depth);
                self.out.push_str(&indent);
            }
        }
    }

    /// Append raw payload, normalizing interior line breaks to the
    /// configured separator and leaving everything else untouched.
    fn emit_verbatim(&mut self, raw: &str) {
        let mut rest = raw;
        while let Some(i) = rest.find(['\r', '\n']) {
            self.out.push_str(&rest[..i]);
            self.out.push_str(self.line_separator);
            let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[i + skip..];
        }
        self.out.push_str(rest);
    }
}

/// Count line breaks, treating `\r\n` as one.
fn count_line_breaks(ws: &str) -> usize {
    let bytes = ws.as_bytes();
    let mut breaks = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                breaks += 1;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => breaks += 1,
            _ => {}
        }
        i += 1;
    }
    breaks
}
