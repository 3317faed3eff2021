//! Import directive detection
//!
//! An import directive is a line holding nothing but an image link,
//! `![alt](Target)` or `![alt](<Target>)`.

use std::sync::OnceLock;

use regex::Regex;

/// A detected import directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Alt text, ignored by the resolver
    pub alt: &'a str,
    /// Target exactly as written, without wrapping angle brackets
    pub target: &'a str,
}

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*!\[(?P<alt>[^\]]*)\]\(<*(?P<target>[^<>]+?)>*\)\s*$")
            .expect("import directive pattern is valid")
    })
}

/// Match a single line (without its terminator) against the directive syntax
pub fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let caps = directive_regex().captures(line)?;
    let alt = caps.name("alt")?.as_str();
    let target = caps.name("target")?.as_str();

    Some(Directive { alt, target })
}

/// Strip wrapping angle brackets from a captured target
pub fn strip_angle_brackets(target: &str) -> &str {
    target.trim_start_matches('<').trim_end_matches('>')
}

/// A line of a document split from its terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub body: &'a str,
    /// `"\n"`, `"\r\n"` or `""` for a final unterminated line
    pub terminator: &'a str,
}

/// Split content into lines, keeping each terminator so the text can be
/// reassembled byte for byte
pub fn split_lines(content: &str) -> impl Iterator<Item = Line<'_>> {
    content.split_inclusive('\n').map(|raw| {
        if let Some(body) = raw.strip_suffix("\r\n") {
            Line { body, terminator: "\r\n" }
        } else if let Some(body) = raw.strip_suffix('\n') {
            Line { body, terminator: "\n" }
        } else {
            Line { body: raw, terminator: "" }
        }
    })
}
