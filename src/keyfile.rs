//! Reader for the sectioned `key=value` text format used by the data files.
//!
//! ```text
//! # Comments run to the end of the line
//! [Device]
//! Name=Intuos4 6x9
//! Styli=0x802;0x80a;
//!
//! [Features]
//! Stylus=true
//! Buttons=9
//! ```
//!
//! Sections keep the order they first appear in. A section header that appears twice merges
//! into the first, and a key that appears twice within a section keeps the last value.
//! Values are read lazily through the typed getters, so a malformed value only fails the
//! key that holds it and never the whole file.

use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum KeyFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// A line that is neither blank, a comment, a section header nor a `key=value` pair.
    #[error("line {line}: malformed entry {text:?}")]
    Malformed { line: usize, text: String },
    /// A `key=value` pair before the first section header.
    #[error("line {line}: key {key:?} is not in any section")]
    NoSection { line: usize, key: String },
    #[error("no section [{0}]")]
    MissingSection(String),
    #[error("no key {key:?} in section [{section}]")]
    MissingKey { section: String, key: String },
    #[error("value {value:?} of key {key:?} in [{section}] is not a valid {expected}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl KeyFileError {
    /// Whether this error only means the key (or its whole section) is absent.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingSection(_) | Self::MissingKey { .. })
    }
}

#[derive(Debug, Default)]
struct Section {
    name: String,
    entries: HashMap<String, String>,
}

/// A parsed document. Immutable once loaded.
#[derive(Debug, Default)]
pub struct KeyFile {
    sections: Vec<Section>,
}

impl KeyFile {
    /// Read and parse the file at `path`.
    #[allow(clippy::missing_errors_doc)]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyFileError> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)?;
        text.parse()
    }

    /// Section names, in order of first appearance.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    #[must_use]
    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// The value exactly as written, with surrounding whitespace removed and no unescaping.
    #[allow(clippy::missing_errors_doc)]
    pub fn raw(&self, section: &str, key: &str) -> Result<&str, KeyFileError> {
        let entries = &self
            .section(section)
            .ok_or_else(|| KeyFileError::MissingSection(section.to_owned()))?
            .entries;
        entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| KeyFileError::MissingKey {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    /// A string value with `\s`, `\n`, `\t`, `\r` and `\\` escapes resolved.
    #[allow(clippy::missing_errors_doc)]
    pub fn string(&self, section: &str, key: &str) -> Result<String, KeyFileError> {
        let raw = self.raw(section, key)?;
        unescape(raw, None)
            .and_then(|mut items| items.pop())
            .ok_or_else(|| invalid(section, key, raw, "string"))
    }

    /// A `;`-separated list. A trailing separator is allowed, and `\;` is a literal semicolon.
    #[allow(clippy::missing_errors_doc)]
    pub fn string_list(&self, section: &str, key: &str) -> Result<Vec<String>, KeyFileError> {
        let raw = self.raw(section, key)?;
        unescape(raw, Some(';')).ok_or_else(|| invalid(section, key, raw, "string list"))
    }

    /// `true`/`1` or `false`/`0`.
    #[allow(clippy::missing_errors_doc)]
    pub fn boolean(&self, section: &str, key: &str) -> Result<bool, KeyFileError> {
        let raw = self.raw(section, key)?;
        match raw {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(section, key, raw, "boolean")),
        }
    }

    /// A base 10 integer.
    #[allow(clippy::missing_errors_doc)]
    pub fn integer(&self, section: &str, key: &str) -> Result<i32, KeyFileError> {
        let raw = self.raw(section, key)?;
        raw.parse()
            .map_err(|_| invalid(section, key, raw, "integer"))
    }
}

fn invalid(section: &str, key: &str, value: &str, expected: &'static str) -> KeyFileError {
    KeyFileError::InvalidValue {
        section: section.to_owned(),
        key: key.to_owned(),
        value: value.to_owned(),
        expected,
    }
}

/// Resolve escapes, splitting on `separator` if given. `None` on a dangling or unknown escape.
fn unescape(raw: &str, separator: Option<char>) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => current.push(match chars.next()? {
                's' => ' ',
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '\\' => '\\',
                escaped if Some(escaped) == separator => escaped,
                _ => return None,
            }),
            c if Some(c) == separator => items.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    // Lists may end in a separator, which doesn't start another (empty) item.
    if separator.is_none() || !current.is_empty() {
        items.push(current);
    }
    Some(items)
}

impl std::str::FromStr for KeyFile {
    type Err = KeyFileError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut file = KeyFile::default();
        // Index into `file.sections` of the section currently being filled.
        let mut current: Option<usize> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .filter(|name| !name.is_empty() && !name.contains(['[', ']']))
                    .ok_or_else(|| KeyFileError::Malformed {
                        line: line_no,
                        text: line.to_owned(),
                    })?;
                let position = file.sections.iter().position(|s| s.name == name);
                current = Some(position.unwrap_or_else(|| {
                    file.sections.push(Section {
                        name: name.to_owned(),
                        entries: HashMap::new(),
                    });
                    file.sections.len() - 1
                }));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(KeyFileError::Malformed {
                    line: line_no,
                    text: line.to_owned(),
                });
            };
            let key = key.trim_end();
            if key.is_empty() {
                return Err(KeyFileError::Malformed {
                    line: line_no,
                    text: line.to_owned(),
                });
            }
            let Some(section) = current else {
                return Err(KeyFileError::NoSection {
                    line: line_no,
                    key: key.to_owned(),
                });
            };
            file.sections[section]
                .entries
                .insert(key.to_owned(), value.trim_start().to_owned());
        }

        Ok(file)
    }
}
