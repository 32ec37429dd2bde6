//! Icon link extraction from raw HTML.
//!
//! This is a tolerant text scanner rather than an HTML parser. It looks for
//! `<link ...>` shaped substrings and reads their attributes with a small
//! cursor, so broken markup never causes an error: anything that cannot be
//! read is skipped.

use crate::candidate::IconCandidate;

/// Relation values that declare an icon, compared case-insensitively.
pub const ICON_RELATIONS: &[&str] = &[
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
];

const LINK_OPEN: &[u8] = b"<link";

/// Extracts every icon declaration from `html`, in document order.
#[must_use]
pub fn extract_icon_links(html: &str) -> Vec<IconCandidate> {
    let candidates: Vec<IconCandidate> = IconLinks::new(html).collect();
    tracing::trace!(count = candidates.len(), "Extracted icon links");
    candidates
}

/// Iterator over the icon declarations in a document.
#[derive(Debug, Clone)]
pub struct IconLinks<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> IconLinks<'a> {
    /// Creates an iterator positioned at the start of `html`.
    #[must_use]
    pub const fn new(html: &'a str) -> Self {
        Self { html, pos: 0 }
    }

    /// Returns the attribute text of the next `<link>` element, without the
    /// tag name and closing `>`.
    fn next_link_tag(&mut self) -> Option<&'a str> {
        let bytes = self.html.as_bytes();

        loop {
            let start = find_ascii_ci(bytes, LINK_OPEN, self.pos)?;
            let attrs_start = start + LINK_OPEN.len();

            // `<linkfoo>` is some other element.
            match bytes.get(attrs_start) {
                Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => {}
                _ => {
                    self.pos = attrs_start;
                    continue;
                }
            }

            let Some(end) = find_byte(bytes, b'>', attrs_start) else {
                self.pos = bytes.len();
                return None;
            };

            self.pos = end + 1;
            return Some(&self.html[attrs_start..end]);
        }
    }
}

impl Iterator for IconLinks<'_> {
    type Item = IconCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(tag) = self.next_link_tag() {
            if let Some(candidate) = parse_link_tag(tag) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Builds a candidate from a link tag's attribute text, if it declares an icon.
fn parse_link_tag(tag: &str) -> Option<IconCandidate> {
    let mut rel = None;
    let mut href = None;
    let mut mime_type = None;
    let mut sizes = None;

    for (name, value) in Attributes::new(tag) {
        let slot = if name.eq_ignore_ascii_case("rel") {
            &mut rel
        } else if name.eq_ignore_ascii_case("href") {
            &mut href
        } else if name.eq_ignore_ascii_case("type") {
            &mut mime_type
        } else if name.eq_ignore_ascii_case("sizes") {
            &mut sizes
        } else {
            continue;
        };

        // First occurrence wins, as in browsers.
        if slot.is_none() {
            *slot = Some(value.map(str::trim).filter(|v| !v.is_empty()));
        }
    }

    if !rel.flatten().is_some_and(is_icon_relation) {
        return None;
    }

    let href = href.flatten()?;
    Some(IconCandidate {
        href: href.to_string(),
        mime_type: mime_type.flatten().map(str::to_string),
        size_spec: sizes.flatten().map(str::to_string),
    })
}

fn is_icon_relation(rel: &str) -> bool {
    let normalized = rel
        .split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase();
    ICON_RELATIONS.contains(&normalized.as_str())
}

/// Cursor over `name[=value]` pairs in a tag's attribute text.
///
/// Values may be double-quoted, single-quoted or bare. An unterminated quote
/// runs to the end of the tag.
struct Attributes<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Attributes<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
    }

    fn read_value(&mut self) -> &'a str {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                let start = self.pos + 1;
                let end = find_byte(self.input.as_bytes(), quote, start).unwrap_or(self.input.len());
                self.pos = (end + 1).min(self.input.len());
                &self.input[start..end]
            }
            _ => {
                let start = self.pos;
                self.skip_while(|b| !b.is_ascii_whitespace());
                &self.input[start..self.pos]
            }
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.skip_while(|b| b.is_ascii_whitespace() || b == b'/');
            self.peek()?;

            let start = self.pos;
            self.skip_while(|b| !b.is_ascii_whitespace() && b != b'=' && b != b'/');
            if self.pos == start {
                // Stray `=` with no name.
                self.pos += 1;
                continue;
            }
            let name = &self.input[start..self.pos];

            self.skip_while(|b| b.is_ascii_whitespace());
            if self.peek() != Some(b'=') {
                return Some((name, None));
            }
            self.pos += 1;
            self.skip_while(|b| b.is_ascii_whitespace());

            return Some((name, Some(self.read_value())));
        }
    }
}

fn find_byte(haystack: &[u8], needle: u8, from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| from + i)
}

fn find_ascii_ci(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}
