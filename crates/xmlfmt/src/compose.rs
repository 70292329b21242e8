//! Start-tag rendering: attribute layout and long-line wrapping.

use crate::prefs::FormattingPreferences;
use crate::token::{Attribute, Tag};

/// Render a start or empty-element tag as one or more lines.
///
/// The first line is returned without its indent (the caller has already
/// written it); continuation lines carry their own indent. The two layout
/// toggles compose with splitting taking precedence: split output is never
/// rewrapped.
pub(crate) fn compose_start_tag(
    tag: &Tag,
    self_closing: bool,
    indent: &str,
    prefs: &FormattingPreferences,
) -> Vec<String> {
    let close = if self_closing { "/>" } else { ">" };

    if prefs.split_multi_attrs && tag.attributes.len() > 1 {
        let unit = prefs.indent_unit();
        let mut lines = Vec::with_capacity(tag.attributes.len() + 2);
        lines.push(format!("<{}", tag.name));
        for attr in &tag.attributes {
            lines.push(format!("{indent}{unit}{}", render_attribute(attr)));
        }
        lines.push(format!("{indent}{close}"));
        return lines;
    }

    let inline = render_inline(tag, close);
    if prefs.wrap_long_lines
        && tag.attributes.len() > 1
        && visual_width(indent, prefs) + visual_width(&inline, prefs) > prefs.max_line_width
    {
        return wrap_tag(tag, close, indent, prefs);
    }

    vec![inline]
}

fn render_inline(tag: &Tag, close: &str) -> String {
    let mut out = format!("<{}", tag.name);
    for attr in &tag.attributes {
        out.push(' ');
        out.push_str(&render_attribute(attr));
    }
    out.push_str(close);
    out
}

/// Greedy rewrap at attribute boundaries.
///
/// Continuation lines sit two indent units deeper than the opening line,
/// visually distinct from child indentation. Every line keeps at least
/// one attribute, so an attribute that alone exceeds the threshold is
/// left overlong rather than broken inside its value.
fn wrap_tag(
    tag: &Tag,
    close: &str,
    indent: &str,
    prefs: &FormattingPreferences,
) -> Vec<String> {
    let unit = prefs.indent_unit();
    let continuation = format!("{indent}{unit}{unit}");
    let mut lines = Vec::new();

    let mut line = format!("<{}", tag.name);
    let mut width = visual_width(indent, prefs) + visual_width(&line, prefs);
    let mut attrs_on_line = 0;

    for attr in &tag.attributes {
        let rendered = render_attribute(attr);
        let added = 1 + visual_width(&rendered, prefs);
        if attrs_on_line > 0 && width + added > prefs.max_line_width {
            lines.push(line);
            line = format!("{continuation}{rendered}");
            width = visual_width(&line, prefs);
            attrs_on_line = 1;
        } else {
            line.push(' ');
            line.push_str(&rendered);
            width += added;
            attrs_on_line += 1;
        }
    }

    line.push_str(close);
    lines.push(line);
    lines
}

/// Normalized attribute rendering: double quotes, or single quotes when
/// the raw value itself contains a double quote.
fn render_attribute(attr: &Attribute) -> String {
    if attr.value.contains('"') {
        format!("{}='{}'", attr.name, attr.value)
    } else {
        format!("{}=\"{}\"", attr.name, attr.value)
    }
}

/// Line width in columns, counting a tab as one indent level.
fn visual_width(s: &str, prefs: &FormattingPreferences) -> usize {
    s.chars()
        .map(|c| if c == '\t' { prefs.indent_width.max(1) } else { 1 })
        .sum()
}
