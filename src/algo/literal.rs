//! Parser for serialized string-list literals such as `['drama', "crime"]`.
//!
//! Catalog exports store multi-valued columns (genres, cast) in this form.
//! Anything other than a bracketed list of quoted strings is rejected.

use std::iter::Peekable;
use std::str::Chars;

/// Parse a list literal of quoted strings. Returns `None` if the input is not
/// a well-formed list (unbalanced brackets, unquoted items, trailing garbage).
pub fn parse_string_list(text: &str) -> Option<Vec<String>> {
    let mut chars = text.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }
    let mut items = Vec::new();
    loop {
        skip_ws(&mut chars);
        match chars.peek()? {
            ']' => {
                chars.next();
                break;
            }
            '\'' | '"' => {
                items.push(parse_quoted(&mut chars)?);
                skip_ws(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }
    skip_ws(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

/// Lenient splitter for display facets: strips brackets and quotes and
/// splits on `", "`. Never fails; empty input yields an empty list.
pub fn split_loose(text: &str) -> Vec<String> {
    let inner = text.trim().trim_start_matches('[').trim_end_matches(']');
    let inner: String = inner.chars().filter(|&c| c != '\'' && c != '"').collect();
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner.split(", ").map(|s| s.trim().to_string()).collect()
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                c @ ('\\' | '\'' | '"') => out.push(c),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}
