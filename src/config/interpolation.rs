//! `${tag}` interpolation of command lines from the execution context.
//!
//! # Syntax
//!
//! - `${tag}` - replaced with the string stored under `tag`
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - an unterminated `${name` is kept as literal text
//!
//! # Example
//!
//! ```
//! use phasegraph::config::resolve_string;
//! use phasegraph::ExecutionContext;
//!
//! let ctx = ExecutionContext::new();
//! ctx.set("sha", "abc123".to_string());
//! let command = resolve_string("git checkout ${sha} # $${sha}", &ctx).unwrap();
//! assert_eq!(command, "git checkout abc123 # ${sha}");
//! ```

use crate::context::ExecutionContext;
use crate::error::{PhaseError, Result};
use std::collections::HashSet;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Tag reference: ${name}
    Variable(String),
}

/// Parse a string containing `${tag}` references.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    // unterminated: keep the text as written
                    current_literal.push_str("${");
                    current_literal.push_str(&name);
                    continue;
                }
                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                segments.push(Segment::Variable(name));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all tag names referenced by a string.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Replace every `${tag}` in `input` with the string stored under `tag`.
///
/// # Errors
///
/// Returns `MissingValue` if a referenced tag is absent and `TypeMismatch`
/// if it holds something other than a string.
pub fn resolve_string(input: &str, ctx: &ExecutionContext) -> Result<String> {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value = ctx
                    .get(&name)
                    .ok_or_else(|| PhaseError::MissingValue { tag: name.clone() })?;
                let text = if let Some(s) = value.downcast_ref::<String>() {
                    s.as_str()
                } else if let Some(s) = value.downcast_ref::<&'static str>() {
                    *s
                } else {
                    return Err(PhaseError::TypeMismatch {
                        tag: name,
                        expected: "string",
                    });
                };
                result.push_str(text);
            }
        }
    }

    Ok(result)
}
