//! The translation resource document.
//!
//! A resource file is a single flat JSON object. Plain keys map to translation
//! strings; keys starting with `@` hold placeholder metadata for their sibling:
//!
//! ```json
//! {
//!   "greeting": "Hello {name}",
//!   "@greeting": { "placeholders": { "name": {} } }
//! }
//! ```
//!
//! Key order is preserved from load through write (serde_json `preserve_order`).

use std::{fmt, fs, io::Write, path::Path};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{ExtractError, Result};
use crate::placeholders::template_names;

/// Prefix of metadata keys.
pub const METADATA_PREFIX: char = '@';

/// Field of a metadata entry that lists placeholder names.
pub const PLACEHOLDERS_FIELD: &str = "placeholders";

/// Returns true for `@`-prefixed metadata keys (including `@@` global attributes).
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// The metadata key that belongs to a plain key.
pub fn metadata_key(key: &str) -> String {
    format!("{}{}", METADATA_PREFIX, key)
}

/// Action taken on a key by [`ResourceDocument::insert_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

/// In-memory translation resource, owned by one extraction at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDocument {
    entries: Map<String, Value>,
}

/// Reads and parses the resource file at `path`.
pub fn load_resource(path: &Path) -> Result<ResourceDocument> {
    ResourceDocument::load(path)
}

impl ResourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a resource file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), entries = doc.entries.len(), "loaded resource");
        Ok(doc)
    }

    /// Parses resource content; `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|err| ExtractError::parse(origin, err.to_string()))?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(ExtractError::parse(
                origin,
                format!("root must be a JSON object, found {}", json_type_name(&other)),
            )),
        }
    }

    /// Whether a plain entry with exactly this key exists. Metadata keys never match.
    pub fn find_duplicate_by_key(&self, key: &str) -> bool {
        !is_metadata_key(key) && self.entries.contains_key(key)
    }

    /// First plain entry whose value equals `value` ignoring case, in document order.
    ///
    /// Plain entries holding something other than a string are logged and skipped.
    pub fn find_duplicate_by_value(&self, value: &str) -> Option<&str> {
        let needle = value.to_lowercase();

        for (key, existing) in self.plain_entries() {
            match existing {
                Value::String(text) => {
                    if text.to_lowercase() == needle {
                        return Some(key);
                    }
                }
                other => {
                    tracing::warn!(
                        key = %key,
                        found = json_type_name(other),
                        "skipping entry with non-string value"
                    );
                }
            }
        }
        None
    }

    /// Sets `key` to `value`, overwriting any previous value.
    ///
    /// Callers that must not overwrite check [`Self::find_duplicate_by_key`] first.
    pub fn insert_entry(&mut self, key: &str, value: &str) -> Result<KeyAction> {
        if is_metadata_key(key) {
            return Err(ExtractError::KeyReserved(key.to_string()));
        }
        let action = if self.entries.contains_key(key) {
            KeyAction::Updated
        } else {
            KeyAction::Added
        };
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(action)
    }

    /// Sets `@key` to `{ "placeholders": { name: {} } }`.
    pub fn insert_placeholder_entry<S: AsRef<str>>(&mut self, key: &str, names: &[S]) {
        let placeholders: Map<String, Value> = names
            .iter()
            .map(|name| (name.as_ref().to_string(), Value::Object(Map::new())))
            .collect();

        let mut meta = Map::new();
        meta.insert(PLACEHOLDERS_FIELD.to_string(), Value::Object(placeholders));
        self.entries.insert(metadata_key(key), Value::Object(meta));
    }

    /// Writes the document to `path`, replacing the previous content wholesale.
    ///
    /// The content goes to a temporary file in the same directory which is then
    /// renamed over `path`; on failure the original file is untouched. An existing
    /// file's permissions carry over to the new one.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let content = self.to_pretty_string()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|err| ExtractError::write(path, err))?;
        // The temp file is created owner-only; keep the mode of the file it replaces.
        if let Ok(metadata) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|err| ExtractError::write(path, err))?;
        }
        tmp.write_all(content.as_bytes())
            .map_err(|err| ExtractError::write(path, err))?;
        tmp.as_file()
            .sync_all()
            .map_err(|err| ExtractError::write(path, err))?;
        tmp.persist(path)
            .map_err(|err| ExtractError::write(path, err.error))?;

        tracing::debug!(path = %path.display(), entries = self.entries.len(), "persisted resource");
        Ok(())
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| ExtractError::write("<memory>", err))?;
        Ok(format!("{}\n", content))
    }

    /// The string value of a plain entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        if is_metadata_key(key) {
            return None;
        }
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Placeholder names declared in the metadata entry of `key`.
    pub fn placeholders_of(&self, key: &str) -> Option<Vec<&str>> {
        self.entries
            .get(&metadata_key(key))?
            .get(PLACEHOLDERS_FIELD)?
            .as_object()
            .map(|names| names.keys().map(String::as_str).collect())
    }

    /// Plain entries in document order.
    pub fn plain_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter(|(key, _)| !is_metadata_key(key))
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of plain entries.
    pub fn entry_count(&self) -> usize {
        self.plain_entries().count()
    }

    /// Number of entries of any kind.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Inconsistencies between plain entries and their metadata, in document order.
    ///
    /// `@@` global attributes are ignored. Metadata that declares names absent
    /// from the value is tolerated, since bare references (`$name`) are inlined
    /// without braces.
    pub fn placeholder_issues(&self) -> Vec<PlaceholderIssue> {
        let mut issues = Vec::new();

        for (key, value) in &self.entries {
            if key.starts_with("@@") {
                continue;
            }

            if let Some(plain_key) = key.strip_prefix(METADATA_PREFIX) {
                let Value::Object(meta) = value else {
                    issues.push(PlaceholderIssue::Malformed {
                        key: key.clone(),
                        reason: "metadata entry is not an object",
                    });
                    continue;
                };
                if meta
                    .get(PLACEHOLDERS_FIELD)
                    .is_some_and(|placeholders| !placeholders.is_object())
                {
                    issues.push(PlaceholderIssue::Malformed {
                        key: key.clone(),
                        reason: "'placeholders' is not an object",
                    });
                    continue;
                }
                if !self.entries.contains_key(plain_key) {
                    issues.push(PlaceholderIssue::OrphanMetadata { key: key.clone() });
                }
                continue;
            }

            let Value::String(text) = value else {
                issues.push(PlaceholderIssue::Malformed {
                    key: key.clone(),
                    reason: "value is not a string",
                });
                continue;
            };

            let names = template_names(text);
            if names.is_empty() {
                continue;
            }

            match self.placeholders_of(key) {
                None => issues.push(PlaceholderIssue::MissingMetadata {
                    key: key.clone(),
                    names,
                }),
                Some(declared) => {
                    let undeclared: Vec<String> = names
                        .into_iter()
                        .filter(|name| !declared.contains(&name.as_str()))
                        .collect();
                    if !undeclared.is_empty() {
                        issues.push(PlaceholderIssue::Undeclared {
                            key: key.clone(),
                            names: undeclared,
                        });
                    }
                }
            }
        }

        issues
    }
}

/// A consistency problem between the plain and metadata namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderIssue {
    /// `@key` exists but `key` does not.
    OrphanMetadata { key: String },
    /// The value uses `{name}` tokens but has no metadata entry.
    MissingMetadata { key: String, names: Vec<String> },
    /// The value uses `{name}` tokens its metadata does not declare.
    Undeclared { key: String, names: Vec<String> },
    /// The entry does not have the expected shape.
    Malformed { key: String, reason: &'static str },
}

impl PlaceholderIssue {
    pub fn key(&self) -> &str {
        match self {
            PlaceholderIssue::OrphanMetadata { key }
            | PlaceholderIssue::MissingMetadata { key, .. }
            | PlaceholderIssue::Undeclared { key, .. }
            | PlaceholderIssue::Malformed { key, .. } => key,
        }
    }

    pub fn rule(&self) -> &'static str {
        match self {
            PlaceholderIssue::OrphanMetadata { .. } => "orphan-metadata",
            PlaceholderIssue::MissingMetadata { .. } => "missing-metadata",
            PlaceholderIssue::Undeclared { .. } => "undeclared-placeholder",
            PlaceholderIssue::Malformed { .. } => "malformed-entry",
        }
    }
}

impl fmt::Display for PlaceholderIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderIssue::OrphanMetadata { key } => {
                write!(f, "\"{}\" has no matching translation entry", key)
            }
            PlaceholderIssue::MissingMetadata { key, names } => write!(
                f,
                "\"{}\" uses {} but has no placeholder metadata",
                key,
                format_names(names)
            ),
            PlaceholderIssue::Undeclared { key, names } => write!(
                f,
                "\"{}\" uses {} not declared in its placeholder metadata",
                key,
                format_names(names)
            ),
            PlaceholderIssue::Malformed { key, reason } => write!(f, "\"{}\": {}", key, reason),
        }
    }
}

fn format_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{{{}}}", name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
