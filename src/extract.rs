//! Extraction of one selected string into the resource file.
//!
//! ```text
//! raw text ─ unwrap quotes ─┬─ plain ──────────── key (name+context | phrase)
//!                           └─ contains '$' ───── placeholders ─ key (phrase) ─ canonical value
//!                                                        │
//!            existing key? ─ existing value? ─ insert ─ persist ─ code generation
//! ```
//!
//! Duplicate keys and values short-circuit with the existing key and leave the
//! resource file untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::codegen::{CodeGenerator, CodegenStatus, NoCodegen};
use crate::error::{ExtractError, Result};
use crate::keys::{derive_key_from_name_and_context, derive_key_from_phrase};
use crate::placeholders::{
    PlaceholderToken, canonicalize, contains_interpolation, extract_placeholders,
    placeholder_names, unescape_sigils,
};
use crate::resource::{ResourceDocument, is_metadata_key};
use crate::utils::unwrap_quotes;

/// Default accessor used to build replacement text.
pub const DEFAULT_LOOKUP_PREFIX: &str = "S.current";

/// How an extraction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// A new entry was written.
    Inserted,
    /// The key already existed; nothing was written.
    ExistingKey,
    /// The same text (ignoring case) already existed under another key; nothing was written.
    ExistingValue,
}

/// What the caller needs to rewrite the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub key: String,
    /// Text to splice over the selected literal.
    pub replacement_text: String,
    /// Call arguments for parameterized strings, one per reference, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
    pub outcome: Outcome,
    /// Human-readable note for duplicate short-circuits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub codegen: CodegenStatus,
}

impl ExtractionResult {
    pub fn is_inserted(&self) -> bool {
        self.outcome == Outcome::Inserted
    }
}

/// Runs extractions against one resource file.
pub struct Extractor {
    resource_path: PathBuf,
    lookup_prefix: String,
    codegen: Box<dyn CodeGenerator>,
}

impl Extractor {
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            lookup_prefix: DEFAULT_LOOKUP_PREFIX.to_string(),
            codegen: Box::new(NoCodegen),
        }
    }

    pub fn with_lookup_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.lookup_prefix = prefix.into();
        self
    }

    pub fn with_codegen(mut self, codegen: Box<dyn CodeGenerator>) -> Self {
        self.codegen = codegen;
        self
    }

    pub fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    /// Loads the resource file, extracts `raw_text` into it and returns the key.
    ///
    /// `key_name` and `context_label` only apply to plain strings; parameterized
    /// strings always get a key derived from their text.
    pub fn extract(
        &self,
        raw_text: &str,
        key_name: Option<&str>,
        context_label: Option<&str>,
    ) -> Result<ExtractionResult> {
        let mut doc = ResourceDocument::load(&self.resource_path)?;
        self.extract_into(&mut doc, raw_text, key_name, context_label)
    }

    /// Like [`Self::extract`] with an already loaded document.
    ///
    /// `doc` is only updated once the write succeeded.
    pub fn extract_into(
        &self,
        doc: &mut ResourceDocument,
        raw_text: &str,
        key_name: Option<&str>,
        context_label: Option<&str>,
    ) -> Result<ExtractionResult> {
        let text = unwrap_quotes(raw_text);
        if text.is_empty() {
            return Err(ExtractError::missing_input("no text to extract"));
        }

        if contains_interpolation(text) {
            if key_name.is_some_and(|name| !name.trim().is_empty()) {
                tracing::debug!("ignoring key name for parameterized string");
            }
            self.extract_parameterized(doc, text)
        } else {
            self.extract_plain(doc, text, key_name, context_label)
        }
    }

    fn extract_plain(
        &self,
        doc: &mut ResourceDocument,
        text: &str,
        key_name: Option<&str>,
        context_label: Option<&str>,
    ) -> Result<ExtractionResult> {
        let key = match key_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) if is_metadata_key(name) => {
                return Err(ExtractError::KeyReserved(name.to_string()));
            }
            Some(name) => derive_key_from_name_and_context(name, context_label.unwrap_or("")),
            None => derive_key_from_phrase(text),
        };
        let key = non_empty_key(key, text)?;
        tracing::debug!(%key, "resolved key for plain string");

        let value = unescape_sigils(text);
        if let Some(result) = self.short_circuit(doc, &key, &value, None) {
            return Ok(result);
        }

        let mut next = doc.clone();
        let action = next.insert_entry(&key, &value)?;
        tracing::debug!(%key, action = action.as_str(), "staged plain entry");
        let codegen = self.commit(doc, next)?;

        Ok(ExtractionResult {
            replacement_text: self.render(&key, None),
            key,
            arguments: None,
            outcome: Outcome::Inserted,
            notice: None,
            codegen,
        })
    }

    fn extract_parameterized(
        &self,
        doc: &mut ResourceDocument,
        text: &str,
    ) -> Result<ExtractionResult> {
        let tokens = extract_placeholders(text)?;
        let arguments = call_arguments(&tokens);

        let key = non_empty_key(derive_key_from_phrase(text), text)?;
        tracing::debug!(%key, placeholders = tokens.len(), "resolved key for parameterized string");

        let canonical = canonicalize(text, &tokens);

        if let Some(result) =
            self.short_circuit(doc, &key, &canonical, Some(arguments.as_slice()))
        {
            return Ok(result);
        }

        let mut next = doc.clone();
        let action = next.insert_entry(&key, &canonical)?;
        tracing::debug!(%key, action = action.as_str(), "staged parameterized entry");
        next.insert_placeholder_entry(&key, &placeholder_names(&tokens));
        let codegen = self.commit(doc, next)?;

        Ok(ExtractionResult {
            replacement_text: self.render(&key, Some(arguments.as_slice())),
            key,
            arguments: Some(arguments),
            outcome: Outcome::Inserted,
            notice: None,
            codegen,
        })
    }

    /// Returns the existing key when `key` or `value` is already present.
    fn short_circuit(
        &self,
        doc: &ResourceDocument,
        key: &str,
        value: &str,
        arguments: Option<&[String]>,
    ) -> Option<ExtractionResult> {
        let (existing, outcome, notice) = if doc.find_duplicate_by_key(key) {
            (
                key.to_string(),
                Outcome::ExistingKey,
                format!("Key '{}' already exists, reusing it", key),
            )
        } else if let Some(existing) = doc.find_duplicate_by_value(value) {
            (
                existing.to_string(),
                Outcome::ExistingValue,
                format!("\"{}\" already exists as '{}'", value, existing),
            )
        } else {
            return None;
        };

        tracing::info!(key = %existing, ?outcome, "duplicate found, resource unchanged");

        Some(ExtractionResult {
            replacement_text: self.render(&existing, arguments),
            key: existing,
            arguments: arguments.map(<[String]>::to_vec),
            outcome,
            notice: Some(notice),
            codegen: CodegenStatus::Skipped,
        })
    }

    /// Persists `next`, then swaps it into `doc` and runs code generation.
    fn commit(&self, doc: &mut ResourceDocument, next: ResourceDocument) -> Result<CodegenStatus> {
        next.persist(&self.resource_path)?;
        *doc = next;
        Ok(CodegenStatus::after_persist(self.codegen.as_ref()))
    }

    fn render(&self, key: &str, arguments: Option<&[String]>) -> String {
        let access = if self.lookup_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.lookup_prefix, key)
        };
        match arguments {
            Some(args) => format!("{}({})", access, args.join(", ")),
            None => access,
        }
    }
}

/// One call argument per reference, duplicates kept.
fn call_arguments(tokens: &[PlaceholderToken]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| token.expression().to_string())
        .collect()
}

fn non_empty_key(key: String, text: &str) -> Result<String> {
    if key.is_empty() {
        return Err(ExtractError::missing_input(format!(
            "cannot derive a key from \"{}\"; supply a key name",
            text
        )));
    }
    Ok(key)
}
