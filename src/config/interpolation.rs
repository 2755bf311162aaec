//! Placeholder interpolation for profile templates.
//!
//! Profile templates reference environment values using `${NAME}` syntax.
//! Resolution is a single pass: substituted values are never rescanned, and a
//! placeholder whose variable is not set is left in the output verbatim so
//! the downstream tool can report it in its own terms.
//!
//! # Quoting
//!
//! Profiles are consumed as YAML by the transform tool, and a bare `5432`
//! substituted into `port: ${WAREHOUSE_PORT}` would type as an integer there.
//! Values that parse exactly as a floating-point number are therefore wrapped
//! in double quotes on substitution; everything else is substituted raw, so
//! an already-quoted value passes through with its quotes intact. Embedded
//! quotes and braces inside values are not escaped.

use std::collections::HashSet;

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Placeholder reference: ${NAME}
    Placeholder(String),
}

/// Parse a template into literal and placeholder segments.
///
/// Only well-formed `${NAME}` tokens with a non-empty name and a closing
/// brace become placeholders; a dangling `${NAME` or an empty `${}` stays
/// literal text.
pub fn parse_segments(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume {

            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }

            if closed && !name.is_empty() {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name));
            } else {
                // Malformed token, keep the consumed text as-is
                literal.push_str("${");
                literal.push_str(&name);
                if closed {
                    literal.push('}');
                }
            }
        } else {
            literal.push(c);
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Extract the unique placeholder names referenced by a template.
pub fn placeholder_names(input: &str) -> HashSet<String> {
    parse_segments(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Resolve every placeholder in a template through a lookup function.
///
/// Missing variables keep their literal `${NAME}` text. Resolution never
/// fails and is deterministic for a fixed lookup.
pub fn resolve_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(template.len());

    for segment in parse_segments(template) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Placeholder(name) => match lookup(&name) {
                Some(value) => result.push_str(&substituted(&value)),
                None => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            },
        }
    }

    result
}

/// Render a resolved value for substitution into YAML text.
///
/// Float-parseable values get wrapped in double quotes so the downstream
/// YAML reader keeps them as strings; anything else is substituted raw.
fn substituted(value: &str) -> String {
    if value.parse::<f64>().is_ok() {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
