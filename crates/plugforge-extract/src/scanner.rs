// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delimiter-balanced region scanner.
//!
//! Finds the span from an opening delimiter to its matching closer in
//! descriptor source text. The scanner is not a parser: it only tracks
//! nesting depth, whether it is inside a quoted span (`"`, `'` or a
//! backtick template), escapes inside those spans, and `//` / `/* */`
//! comments. Delimiters inside quotes or comments are not counted.
//!
//! The scan is single-pass and never backtracks. An unterminated quote,
//! comment or region yields `None`; callers fall back to a synthesized
//! default instead of failing.

use regex::Regex;

/// Delimiter pairs the scanner can balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{` `}`
    Brace,
    /// `[` `]`
    Bracket,
    /// `(` `)`
    Paren,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Delimiter::Brace => '{',
            Delimiter::Bracket => '[',
            Delimiter::Paren => '(',
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::Brace => '}',
            Delimiter::Bracket => ']',
            Delimiter::Paren => ')',
        }
    }

    /// The pair whose opening character is `c`.
    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '{' => Some(Delimiter::Brace),
            '[' => Some(Delimiter::Bracket),
            '(' => Some(Delimiter::Paren),
            _ => None,
        }
    }
}

const QUOTE_MARKERS: [char; 3] = ['"', '\'', '`'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comment {
    Line,
    Block,
}

/// Return the balanced region that starts at byte offset `start`.
///
/// `start` must point at `delimiter.open()`. The returned slice includes
/// both the opening and the matching closing delimiter.
pub fn balanced_region(source: &str, start: usize, delimiter: Delimiter) -> Option<&str> {
    let rest = source.get(start..)?;
    if !rest.starts_with(delimiter.open()) {
        return None;
    }

    let (open, close) = (delimiter.open(), delimiter.close());
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut comment: Option<Comment> = None;

    let mut chars = rest.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        if let Some(marker) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == marker {
                quote = None;
            }
            continue;
        }

        match comment {
            Some(Comment::Line) => {
                if c == '\n' {
                    comment = None;
                }
                continue;
            }
            Some(Comment::Block) => {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    comment = None;
                }
                continue;
            }
            None => {}
        }

        if QUOTE_MARKERS.contains(&c) {
            quote = Some(c);
        } else if c == '/' && matches!(chars.peek(), Some((_, '/'))) {
            chars.next();
            comment = Some(Comment::Line);
        } else if c == '/' && matches!(chars.peek(), Some((_, '*'))) {
            chars.next();
            comment = Some(Comment::Block);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&rest[..offset + c.len_utf8()]);
            }
        }
    }

    None
}

/// Find `anchor` in `source` and return the balanced region of the first
/// opening delimiter that ends or follows the anchor match.
///
/// Returns `None` when the anchor is absent, no opening delimiter follows
/// it, or the region never balances before end of input.
pub fn extract_balanced<'a>(source: &'a str, anchor: &Regex, delimiter: Delimiter) -> Option<&'a str> {
    let found = anchor.find(source)?;
    let open = delimiter.open();

    let start = if found.as_str().ends_with(open) {
        found.end() - open.len_utf8()
    } else {
        found.end() + source[found.end()..].find(open)?
    };

    balanced_region(source, start, delimiter)
}

/// Strip the outer delimiters from a region returned by the scanner.
pub fn inner(region: &str) -> &str {
    let mut chars = region.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => "",
    }
}
