//! Schema discovery and parsing.
//!
//! Walks an input directory for `.json` files and exposes them as a lazy
//! stream of parse results. A file that fails to read, parse, or validate
//! as a self-describing schema yields an error item; the stream itself
//! never aborts once discovery has succeeded.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde_json::{json, Value};

use crate::error::{ParseError, PushError};
use crate::types::SchemaKey;

/// A parsed self-describing schema, ready to be pushed.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub path: PathBuf,
    pub key: SchemaKey,
    pub content: Value,
}

/// Lazy stream of per-file parse results over a discovered schema set.
///
/// Discovery (directory walking) happens eagerly so that I/O errors on the
/// input tree are fatal before any file is processed; reading and parsing
/// individual files happens one item at a time.
#[derive(Debug)]
pub struct SchemaStream {
    files: std::vec::IntoIter<PathBuf>,
}

impl SchemaStream {
    /// Discover all `.json` files under `root`.
    ///
    /// # Errors
    ///
    /// Returns `PushError::InputNotFound` if `root` does not exist, or
    /// `PushError::DiscoveryError` if any directory cannot be enumerated.
    pub fn discover(root: &Path) -> Result<Self, PushError> {
        if !root.exists() {
            return Err(PushError::InputNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        if root.is_file() {
            if is_json_file(root) {
                files.push(root.to_path_buf());
            }
        } else {
            collect_json_files(root, &mut files)?;
        }

        Ok(SchemaStream {
            files: files.into_iter(),
        })
    }

    /// Number of files not yet yielded.
    pub fn remaining(&self) -> usize {
        self.files.len()
    }
}

impl Iterator for SchemaStream {
    type Item = Result<SchemaFile, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.files.next().map(|path| parse_schema_file(&path))
    }
}

fn is_json_file(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

// Enumeration order is whatever the filesystem yields; deliberately not sorted.
fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), PushError> {
    let entries = std::fs::read_dir(dir).map_err(|source| PushError::DiscoveryError {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| PushError::DiscoveryError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if is_json_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Read and parse a single schema file.
///
/// # Errors
///
/// Returns `ParseError::ReadError` if the file cannot be read,
/// `ParseError::InvalidJson` if it is not JSON, or
/// `ParseError::NotSelfDescribing` if the `self` envelope is missing
/// or malformed.
pub fn parse_schema_file(path: &Path) -> Result<SchemaFile, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_json::from_str(&content).map_err(|source| ParseError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let key = extract_key(&document).map_err(|reasons| ParseError::NotSelfDescribing {
        path: path.to_path_buf(),
        reasons,
    })?;

    Ok(SchemaFile {
        path: path.to_path_buf(),
        key,
        content: document,
    })
}

/// Validate the self-describing envelope and extract the schema's identity.
fn extract_key(document: &Value) -> Result<SchemaKey, Vec<String>> {
    let reasons: Vec<String> = envelope_validator()
        .iter_errors(document)
        .map(|e| {
            if e.instance_path.to_string().is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", e.instance_path, e)
            }
        })
        .collect();

    if !reasons.is_empty() {
        return Err(reasons);
    }

    // Envelope validated above, so `self` deserializes cleanly.
    serde_json::from_value(document["self"].clone()).map_err(|e| vec![e.to_string()])
}

/// Meta-schema for the self-describing envelope: a `self` object carrying
/// vendor, name, format, and a SchemaVer version (`MODEL-REVISION-ADDITION`).
fn envelope_validator() -> &'static jsonschema::Validator {
    static VALIDATOR: OnceLock<jsonschema::Validator> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        let envelope = json!({
            "type": "object",
            "required": ["self"],
            "properties": {
                "self": {
                    "type": "object",
                    "required": ["vendor", "name", "format", "version"],
                    "properties": {
                        "vendor": { "type": "string", "pattern": "^[a-zA-Z0-9-_.]+$" },
                        "name": { "type": "string", "pattern": "^[a-zA-Z0-9-_]+$" },
                        "format": { "type": "string", "pattern": "^[a-zA-Z0-9-_]+$" },
                        "version": { "type": "string", "pattern": "^[0-9]+-[0-9]+-[0-9]+$" }
                    }
                }
            }
        });
        jsonschema::validator_for(&envelope).expect("embedded envelope meta-schema is valid")
    })
}
