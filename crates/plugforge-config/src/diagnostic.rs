// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment errors are mapped onto the section table in [`SECTIONS`]. An
//! unknown key is checked against its own section first (a typo), then
//! against the other sections (a key written under the wrong header), and
//! an unknown header against the section names. When the offending file is
//! at hand the diagnostic points at the key's line.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::loader::env_var;
use crate::model::{SECTIONS, section_keys};

/// Minimum Jaro-Winkler similarity for a spelling suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Where an unknown key most likely belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// A close spelling: `pipeline.skip` for `[pipeline] skp`, or the
    /// section `pipeline` for a `[pipline]` header.
    Typo(String),
    /// The key exists verbatim under another header: `pipeline.skip` for
    /// `[codegen] skip`.
    WrongSection(String),
}

impl Correction {
    /// The suggested dotted path.
    pub fn path(&self) -> &str {
        match self {
            Correction::Typo(path) | Correction::WrongSection(path) => path,
        }
    }
}

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{}`", qualify(.section.as_deref(), .key))]
    #[diagnostic(
        code(plugforge::config::unknown_key),
        help("{}", unknown_key_help(section.as_deref(), key, correction.as_ref()))
    )]
    UnknownKey {
        /// The key as written.
        key: String,
        /// Header the key appeared under; `None` at the top level.
        section: Option<String>,
        correction: Option<Correction>,
        #[label("not a plugforge setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(plugforge::config::invalid_type), help("`{key}` expects {expected}"))]
    InvalidType {
        /// Dotted path of the key.
        key: String,
        found: String,
        expected: String,
    },

    /// A value that parsed but is not usable.
    #[error("invalid `{key}`: {message}")]
    #[diagnostic(
        code(plugforge::config::validation),
        help("set `{key}` in plugforge.toml or through {}", env_var(key))
    )]
    Validation { key: String, message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(plugforge::config::other))]
    Other(String),
}

impl ConfigError {
    pub(crate) fn validation(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// A configuration file's text, kept so diagnostics can quote it.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path as given to the loader, or `<inline>`.
    pub name: String,
    pub text: String,
}

impl ConfigSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read `path`, or `None` when it does not exist.
    pub fn read(path: &Path) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        Some(Self::new(path.display().to_string(), text))
    }
}

fn qualify(section: Option<&str>, key: &str) -> String {
    match section {
        Some(section) => format!("{section}.{key}"),
        None => key.to_string(),
    }
}

fn unknown_key_help(section: Option<&str>, key: &str, correction: Option<&Correction>) -> String {
    let listing = match section.and_then(section_keys) {
        Some(keys) => format!("keys in [{}]: {}", section.unwrap_or_default(), keys.join(", ")),
        None => {
            let names: Vec<&str> = SECTIONS.iter().map(|(name, _)| *name).collect();
            format!("sections: {}", names.join(", "))
        }
    };

    match (section, correction) {
        (_, Some(Correction::WrongSection(path))) => {
            let header = path.split('.').next().unwrap_or_default();
            format!("`{key}` belongs under [{header}]; write it as `{path}`")
        }
        (None, Some(Correction::Typo(name))) => format!("did you mean [{name}]? {listing}"),
        (Some(_), Some(Correction::Typo(path))) => format!("did you mean `{path}`? {listing}"),
        (_, None) => listing,
    }
}

/// Suggest where an unknown `key` under `section` was meant to go.
///
/// `section` is `None` for a top-level name, which is either a misspelled
/// header or a key written above every header.
pub fn correct_key(section: Option<&str>, key: &str) -> Option<Correction> {
    let home = SECTIONS
        .iter()
        .find(|(name, keys)| Some(*name) != section && keys.contains(&key));
    if let Some((name, _)) = home {
        return Some(Correction::WrongSection(format!("{name}.{key}")));
    }

    match section {
        None => closest(key, SECTIONS.iter().map(|(name, _)| *name))
            .map(|name| Correction::Typo(name.to_string())),
        Some(section) => closest(key, section_keys(section)?.iter().copied())
            .map(|found| Correction::Typo(format!("{section}.{found}"))),
    }
}

fn closest<'a>(unknown: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate)
}

/// Convert a `figment::Error` into one diagnostic per contained error.
pub fn figment_to_config_errors(err: figment::Error, sources: &[ConfigSource]) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, _) => {
                let section = error.path.first().cloned();
                let correction = correct_key(section.as_deref(), field);
                let (span, src) = source_of(&error, sources)
                    .and_then(|source| {
                        let offset = locate_key(&source.text, section.as_deref(), field)?;
                        Some((
                            SourceSpan::new(offset.into(), field.len()),
                            NamedSource::new(&source.name, source.text.clone()),
                        ))
                    })
                    .unzip();

                ConfigError::UnknownKey {
                    key: field.clone(),
                    section,
                    correction,
                    span,
                    src,
                }
            }
            Kind::InvalidType(found, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                found: found.to_string(),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// The source an error came from: the file named in its metadata, matched
/// exactly or by path suffix, or the sole source for inline text.
fn source_of<'a>(error: &figment::Error, sources: &'a [ConfigSource]) -> Option<&'a ConfigSource> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.source.as_ref())
        .and_then(|source| source.file_path());

    match file {
        Some(file) => sources
            .iter()
            .find(|source| Path::new(&source.name) == file)
            .or_else(|| sources.iter().find(|source| file.ends_with(&source.name))),
        None if sources.len() == 1 => sources.first(),
        None => None,
    }
}

/// Byte offset of `key` in TOML `text`.
///
/// With a `section`, only lines under that `[section]` header are searched.
/// Without one, `key` is either an unknown header (the offset of its name
/// inside the brackets) or a key above the first header.
pub fn locate_key(text: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            let name = header.trim();
            if section.is_none() && name == key {
                return Some(offset + indent + 1 + (header.len() - header.trim_start().len()));
            }
            current = Some(name);
        } else if current == section
            && trimmed
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            return Some(offset + indent);
        }

        offset += line.len();
    }

    None
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
