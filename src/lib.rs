//! arbx - move UI strings into an ARB translation resource file
//!
//! arbx takes a string literal selected in source code, derives a translation
//! key for it, stores it in a flat JSON resource file (with placeholder
//! metadata for interpolated strings) and returns the lookup expression that
//! replaces the literal.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (extract, scan, check, init)
//! - `codegen`: Code generation hook run after the resource file changes
//! - `config`: Configuration file loading and parsing
//! - `error`: Extraction error type
//! - `extract`: The extraction workflow
//! - `keys`: Translation key derivation
//! - `placeholders`: Interpolation parsing and canonical template rendering
//! - `resource`: Resource file document model and persistence
//! - `scan`: Bulk search for marker-tagged literals
//! - `utils`: Shared utility functions

pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod extract;
pub mod keys;
pub mod placeholders;
pub mod resource;
pub mod scan;
pub mod utils;

pub use error::ExtractError;
pub use extract::{ExtractionResult, Extractor, Outcome};
pub use resource::ResourceDocument;
