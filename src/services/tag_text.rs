//! Helpers for the `#name` tag tokens embedded in note content.
//!
//! Note text is the source of truth for tag membership, so every tag mutation
//! is a rewrite of that text. Token matches stop at a token boundary without
//! consuming it: renaming `#work` must not touch `#workout`, and back-to-back
//! tokens like `#work#work` are each rewritten.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters allowed inside a token after the leading `#`. Slashes allow
/// hierarchical tags like `#work/projects`.
static TAG_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([\p{L}\p{N}_][\p{L}\p{N}_\-/]*)").unwrap());

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '/')
}

/// Byte ranges of every `#name` occurrence followed by a token boundary (or
/// end of input). Matching is a literal scan, so names carrying regex
/// metacharacters like `c++` need no escaping.
fn token_ranges(content: &str, name: &str) -> Vec<(usize, usize)> {
    let needle = format!("#{name}");
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(offset) = content[from..].find(&needle) {
        let start = from + offset;
        let end = start + needle.len();
        let at_boundary = content[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_token_char(c));
        if at_boundary {
            ranges.push((start, end));
            from = end;
        } else {
            from = start + 1;
        }
    }
    ranges
}

/// Replaces every bounded `#name` occurrence with `replacement`.
fn rewrite_tokens(content: &str, name: &str, replacement: &str) -> String {
    let ranges = token_ranges(content, name);
    if ranges.is_empty() {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for (start, end) in ranges {
        out.push_str(&content[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&content[last..]);
    out
}

/// All distinct tag names referenced by `content`, in order of first mention.
pub fn extract_tag_tokens(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TAG_TOKEN_RE.captures_iter(content) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

pub fn contains_tag_token(content: &str, name: &str) -> bool {
    !token_ranges(content, name).is_empty()
}

/// Appends a `#name` token, separated by a single space.
pub fn append_tag_token(content: &str, name: &str) -> String {
    format!("{content} #{name}")
}

/// Rewrites every `#old` token to `#new`, leaving longer tokens that merely
/// start with `old` untouched.
pub fn rename_tag_token(content: &str, old: &str, new: &str) -> String {
    rewrite_tokens(content, old, &format!("#{new}"))
}

/// Removes every `#name` token. Surrounding whitespace is left as the note
/// author wrote it.
pub fn strip_tag_token(content: &str, name: &str) -> String {
    rewrite_tokens(content, name, "")
}
