// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Callback extraction.
//!
//! Locates the `detect` / `install` / `configure` function of a descriptor
//! and returns its parameter list and body text verbatim. Method
//! (`async install(ctx): Promise<..> {`), property (`install: async (ctx) => {`)
//! and `function` forms are recognised. Neither the parameters nor the body
//! are interpreted; the generated builder re-emits both unchanged.

use std::sync::LazyLock;

use plugforge_core::CallbackRole;
use regex::Regex;

use crate::scanner::{self, Delimiter};

static DETECT: LazyLock<Regex> = LazyLock::new(|| signature_pattern("detect"));
static INSTALL: LazyLock<Regex> = LazyLock::new(|| signature_pattern("install"));
static CONFIGURE: LazyLock<Regex> = LazyLock::new(|| signature_pattern("configure"));

/// Signature anchor for a role-named function, ending at the `(` of its
/// parameter list. Member calls like `this.install(ctx)` never match.
fn signature_pattern(role: &str) -> Regex {
    Regex::new(&format!(
        r"(?:^|[^\w.$])(?:async\s+)?{role}\s*(?::\s*(?:async\s+)?(?:function\s*)?)?\("
    ))
    .unwrap()
}

fn anchor(role: CallbackRole) -> &'static Regex {
    match role {
        CallbackRole::Detect => &DETECT,
        CallbackRole::Install => &INSTALL,
        CallbackRole::Configure => &CONFIGURE,
    }
}

/// One located callback: its parameter list and body, both without their
/// outer delimiters and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedCallback {
    pub params: String,
    pub body: String,
}

impl ExtractedCallback {
    pub fn new(params: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            params: params.into(),
            body: body.into(),
        }
    }
}

/// The extracted callback per role. `None` means the role's function
/// was not found or never closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackBodies {
    pub detect: Option<ExtractedCallback>,
    pub install: Option<ExtractedCallback>,
    pub configure: Option<ExtractedCallback>,
}

impl CallbackBodies {
    pub fn get(&self, role: CallbackRole) -> Option<&ExtractedCallback> {
        match role {
            CallbackRole::Detect => self.detect.as_ref(),
            CallbackRole::Install => self.install.as_ref(),
            CallbackRole::Configure => self.configure.as_ref(),
        }
    }

    pub fn set(&mut self, role: CallbackRole, callback: Option<ExtractedCallback>) {
        match role {
            CallbackRole::Detect => self.detect = callback,
            CallbackRole::Install => self.install = callback,
            CallbackRole::Configure => self.configure = callback,
        }
    }

    /// Roles that have an extracted body.
    pub fn present(&self) -> Vec<CallbackRole> {
        CallbackRole::all()
            .into_iter()
            .filter(|role| self.get(*role).is_some())
            .collect()
    }
}

/// Extract one callback role: its parameters and its body, without the
/// signature or outer braces.
///
/// Every signature-shaped match is tried in order. A match whose parameter
/// list is not followed by an optional return type and then `{` or `=> {`
/// (a call site such as `await install(ctx);`) is skipped.
pub fn extract_callback(source: &str, role: CallbackRole) -> Option<ExtractedCallback> {
    anchor(role)
        .find_iter(source)
        .find_map(|found| callback_at(source, found.end() - 1))
}

/// Extract all three callback roles.
pub fn extract_callbacks(source: &str) -> CallbackBodies {
    let mut bodies = CallbackBodies::default();
    for role in CallbackRole::all() {
        let callback = extract_callback(source, role);
        if callback.is_none() {
            tracing::trace!(%role, "callback not found, default will be synthesized");
        }
        bodies.set(role, callback);
    }
    bodies
}

/// Parse from the `(` at `open` through the matching body brace.
fn callback_at(source: &str, open: usize) -> Option<ExtractedCallback> {
    let params = scanner::balanced_region(source, open, Delimiter::Paren)?;
    let mut cursor = skip_whitespace(source, open + params.len());

    if source[cursor..].starts_with(':') {
        cursor = skip_whitespace(source, return_type_end(source, cursor + 1)?);
    }
    if source[cursor..].starts_with("=>") {
        cursor = skip_whitespace(source, cursor + 2);
    }

    let body = scanner::balanced_region(source, cursor, Delimiter::Brace)?;
    Some(ExtractedCallback::new(
        scanner::inner(params).trim(),
        scanner::inner(body).trim(),
    ))
}

fn skip_whitespace(source: &str, from: usize) -> usize {
    let rest = &source[from..];
    from + (rest.len() - rest.trim_start().len())
}

/// Byte offset where a return type annotation starting at `from` ends:
/// the body `{` or the arrow `=>` that follows it.
///
/// A `{`, `(` or `[` in operand position (after `:`, `<`, `|`, `&` or `,`)
/// opens part of the type, as in `Promise<{ success: boolean }>`, and is
/// skipped as a balanced group. `=>` nested inside `<..>` belongs to a
/// function type. A bare `;` or `=` means this was a declaration, not a
/// definition.
fn return_type_end(source: &str, from: usize) -> Option<usize> {
    let mut angle: usize = 0;
    let mut operand = true;
    let mut cursor = from;

    while let Some(c) = source[cursor..].chars().next() {
        let rest = &source[cursor..];
        match c {
            _ if c.is_whitespace() => {}
            '=' if rest.starts_with("=>") => {
                if angle == 0 {
                    return Some(cursor);
                }
                cursor += 2;
                operand = true;
                continue;
            }
            '{' if !operand && angle == 0 => return Some(cursor),
            '{' | '(' | '[' => {
                let delimiter = Delimiter::from_open(c)?;
                cursor += scanner::balanced_region(source, cursor, delimiter)?.len();
                operand = false;
                continue;
            }
            '<' => {
                angle += 1;
                operand = true;
            }
            '>' => {
                angle = angle.checked_sub(1)?;
                operand = false;
            }
            '|' | '&' | ',' | '.' => operand = true,
            '\'' | '"' | '`' => {
                let close = rest[1..].find(c)?;
                cursor += close + 2;
                operand = false;
                continue;
            }
            ';' | '=' | '}' | ')' | ']' => return None,
            _ => operand = false,
        }
        cursor += c.len_utf8();
    }

    None
}
