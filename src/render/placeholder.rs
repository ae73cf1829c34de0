//! Permissive handling of undefined template variables
//!
//! Tera refuses to print a variable missing from its context. Scenarios rely
//! on unfilled placeholders surviving into the output, so template sources
//! are rewritten before tera parses them:
//!
//! - `{{ name }}` (optionally filtered) prints the variable when it is
//!   defined and its own placeholder, through the same filters, otherwise.
//! - `{% for x in name %}` iterates an empty list when `name` is undefined.
//!
//! Conditions and a leading `default` filter are left to tera, which already
//! treats an undefined variable as falsy and as a candidate for the default.
//! Dotted lookups, calls and operator expressions are never rewritten.

use std::error::Error as StdError;
use std::fmt;

/// Placeholder text for a variable the scenario did not supply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unfilled {
    name: String,
}

impl Unfilled {
    /// Create a placeholder for a top-level variable name
    ///
    /// Returns `None` for dotted or indexed lookups, which cannot be
    /// tested as a single name.
    pub fn for_name(name: &str) -> Option<Self> {
        is_identifier(name).then(|| Self {
            name: name.to_string(),
        })
    }

    /// Name of the missing variable
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder text in its original delimiter syntax
    pub fn literal(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Unfilled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{ {} }}}}", self.name)
    }
}

/// Rewrite a template source so unfilled variables survive rendering
///
/// Only whole blocks are replaced and no line breaks are added, so tera's
/// error positions still match the file on disk. Comments and `raw`
/// sections are copied unchanged. An unterminated block ends the rewrite and
/// the remainder is left for tera to reject.
pub fn keep_unfilled(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some((start, delim)) = next_block(rest) {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let Some(end) = block_end(rest, delim) else {
            break;
        };
        let text = &rest[..end];
        let block = Block::split(text);

        match delim {
            Delim::Print => match rewrite_print(&block) {
                Some(rewritten) => out.push_str(&rewritten),
                None => out.push_str(text),
            },
            Delim::Tag if block.inner == "raw" => {
                let raw_len = end + raw_end(&rest[end..]).unwrap_or(rest.len() - end);
                out.push_str(&rest[..raw_len]);
                rest = &rest[raw_len..];
                continue;
            }
            Delim::Tag => match rewrite_for(&block) {
                Some(rewritten) => out.push_str(&rewritten),
                None => out.push_str(text),
            },
            Delim::Comment => out.push_str(text),
        }
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// Flatten a tera error and its sources into one line
pub fn describe(err: &tera::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    Print,
    Tag,
    Comment,
}

/// A delimited block split into whitespace-control markers and body
struct Block<'a> {
    lead: &'a str,
    inner: &'a str,
    trail: &'a str,
}

impl<'a> Block<'a> {
    fn split(text: &'a str) -> Self {
        let body = &text[2..text.len() - 2];
        let (lead, body) = match body.strip_prefix('-') {
            Some(body) => ("-", body),
            None => ("", body),
        };
        let (trail, body) = match body.strip_suffix('-') {
            Some(body) => ("-", body),
            None => ("", body),
        };
        Self {
            lead,
            inner: body.trim(),
            trail,
        }
    }
}

fn next_block(text: &str) -> Option<(usize, Delim)> {
    text.match_indices('{').find_map(|(i, _)| {
        let delim = match text.as_bytes().get(i + 1)? {
            b'{' => Delim::Print,
            b'%' => Delim::Tag,
            b'#' => Delim::Comment,
            _ => return None,
        };
        Some((i, delim))
    })
}

/// Length of the block starting at `text`, including both delimiters
///
/// Quoted strings inside print and tag blocks may contain the closing
/// delimiter.
fn block_end(text: &str, delim: Delim) -> Option<usize> {
    let close = match delim {
        Delim::Comment => return text[2..].find("#}").map(|i| i + 4),
        Delim::Print => b'}',
        Delim::Tag => b'%',
    };

    let bytes = text.as_bytes();
    let mut i = 2;
    while i + 1 < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'' | b'`') => {
                i += 1 + text[i + 1..].find(quote as char)?;
            }
            b if b == close && bytes[i + 1] == b'}' => return Some(i + 2),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Length of a raw section body up to and including its `endraw` tag
fn raw_end(text: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find("{%") {
        let start = offset + pos;
        match block_end(&text[start..], Delim::Tag) {
            Some(len) if Block::split(&text[start..start + len]).inner == "endraw" => {
                return Some(start + len);
            }
            Some(len) => offset = start + len,
            None => offset = start + 2,
        }
    }
    None
}

fn rewrite_print(block: &Block<'_>) -> Option<String> {
    let (root, filters) = split_root(block.inner)?;
    if first_filter(filters) == Some("default") {
        return None;
    }
    let unfilled = Unfilled::for_name(root)?;
    Some(format!(
        "{{%{lead} if {root} is defined %}}{{{{ {expr} }}}}{{% else %}}{{{{ \"{literal}\"{sep}{filters} }}}}{{% endif {trail}%}}",
        lead = block.lead,
        root = root,
        expr = block.inner,
        literal = unfilled.literal(),
        sep = separator(filters),
        filters = filters,
        trail = block.trail,
    ))
}

fn rewrite_for(block: &Block<'_>) -> Option<String> {
    let rest = block.inner.strip_prefix("for")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let (value, rest) = rest.split_at(identifier_len(rest));
    Unfilled::for_name(value)?;

    // `for key, value in ...` leaves `,` here and is not rewritten
    let container = rest.trim_start().strip_prefix("in")?;
    if !container.starts_with(char::is_whitespace) {
        return None;
    }
    let (root, filters) = split_root(container.trim())?;
    if first_filter(filters) == Some("default") {
        return None;
    }

    Some(format!(
        "{{%{lead} for {value} in {root} | default(value=[]){sep}{filters} {trail}%}}",
        lead = block.lead,
        value = value,
        root = root,
        sep = separator(filters),
        filters = filters,
        trail = block.trail,
    ))
}

/// Split `name | filters...` into the variable name and its filter chain
fn split_root(expr: &str) -> Option<(&str, &str)> {
    let (root, rest) = expr.split_at(identifier_len(expr));
    let rest = rest.trim_start();
    if !is_identifier(root) || matches!(root, "true" | "false" | "True" | "False") {
        return None;
    }
    if !rest.is_empty() && !rest.starts_with('|') {
        return None;
    }
    Some((root, rest))
}

fn first_filter(filters: &str) -> Option<&str> {
    let rest = filters.strip_prefix('|')?.trim_start();
    Some(&rest[..identifier_len(rest)])
}

fn separator(filters: &str) -> &'static str {
    if filters.is_empty() {
        ""
    } else {
        " "
    }
}

fn identifier_len(text: &str) -> usize {
    text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
