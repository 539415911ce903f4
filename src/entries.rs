//! Name and role lists
//!
//! Names and roles live in two plain text files, one item per line, matched
//! by line number. Every entry is printed twice in a row so the sheet can be
//! folded into a double-sided tag.

use std::fs;
use std::path::Path;
use crate::error::{Error, Result};

/// One name tag: a name and the role printed beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub role: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// How to treat a roles file whose length differs from the names file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolePolicy {
    /// Refuse to pair lists of different lengths
    #[default]
    Strict,
    /// Give names without a role a blank one and drop surplus roles
    PadBlank,
}

/// Read a UTF-8 text file into its lines, keeping blank lines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    Ok(split_lines(text))
}

/// Unicode line boundaries, including lone `\r` and the separators editors
/// sometimes leave behind
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}'..='\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line boundary; `\r\n` counts once and a trailing break
/// does not add an empty line
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(at) = rest.find(is_line_break) else {
            lines.push(rest.to_string());
            break;
        };
        lines.push(rest[..at].to_string());

        let tail = &rest[at..];
        let skip = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[skip..];
    }

    lines
}

/// Pair names with roles by line number
pub fn pair_entries(
    names: Vec<String>,
    roles: Vec<String>,
    policy: RolePolicy,
) -> Result<Vec<Entry>> {
    if names.len() != roles.len() {
        match policy {
            RolePolicy::Strict => {
                return Err(Error::RoleMismatch {
                    names: names.len(),
                    roles: roles.len(),
                });
            }
            RolePolicy::PadBlank if roles.len() > names.len() => {
                log::warn!(
                    "Ignoring {} roles without a matching name",
                    roles.len() - names.len()
                );
            }
            RolePolicy::PadBlank => {
                log::debug!("Padding {} missing roles", names.len() - roles.len());
            }
        }
    }

    let mut roles = roles.into_iter();
    Ok(names
        .into_iter()
        .map(|name| Entry {
            name,
            role: roles.next().unwrap_or_default(),
        })
        .collect())
}

/// Load and pair the names and roles files
///
/// Entries are returned once each; see [`duplicate_for_folding`].
pub fn load_entries(names_path: &Path, roles_path: &Path, policy: RolePolicy) -> Result<Vec<Entry>> {
    let names = read_lines(names_path)?;
    let roles = read_lines(roles_path)?;

    if names.is_empty() {
        return Err(Error::NoEntries(names_path.to_path_buf()));
    }

    log::info!(
        "Read {} names from {} and {} roles from {}",
        names.len(),
        names_path.display(),
        roles.len(),
        roles_path.display()
    );

    pair_entries(names, roles, policy)
}

/// Build the working sequence: entry `k` lands at indices `2k` and `2k + 1`
pub fn duplicate_for_folding(entries: &[Entry]) -> Vec<Entry> {
    entries
        .iter()
        .flat_map(|entry| [entry.clone(), entry.clone()])
        .collect()
}
