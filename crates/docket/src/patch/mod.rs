//! Patch operations and the applier contract for event corrections.
//!
//! A correction is a sequence of add/replace/remove operations against the
//! event's opaque payload. The workflow never interprets payloads itself;
//! it hands the operation list to a [`PatchApplier`] and persists whatever
//! payload comes back. [`JsonPatchApplier`] is the reference applier for
//! JSON payloads; richer grammars plug in behind the same trait.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DocketError, Result};

/// One operation against an event payload.
///
/// Paths use JSON Pointer syntax (`/field`, `/authors/0`). `add` appends to
/// an array when the last path segment is `-`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    /// Insert a value at a path that need not exist yet.
    Add { path: String, value: Value },
    /// Overwrite the value at an existing path.
    Replace { path: String, value: Value },
    /// Delete the value at an existing path.
    Remove { path: String },
}

impl PatchOperation {
    /// Create an add operation.
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self::Add {
            path: path.into(),
            value,
        }
    }

    /// Create a replace operation.
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self::Replace {
            path: path.into(),
            value,
        }
    }

    /// Create a remove operation.
    pub fn remove(path: impl Into<String>) -> Self {
        Self::Remove { path: path.into() }
    }

    /// The path this operation touches.
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Replace { path, .. } | Self::Remove { path } => path,
        }
    }
}

/// Capability that turns a payload plus operations into a new payload.
///
/// Implementations must be pure with respect to the input payload: on any
/// error the caller keeps the original, so a failed patch leaves no partial
/// state behind.
pub trait PatchApplier: Send + Sync {
    /// Apply every operation in order, or fail with `InvalidPatch`.
    fn apply(&self, payload: &Value, operations: &[PatchOperation]) -> Result<Value>;
}

/// Reference applier for JSON payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPatchApplier;

impl JsonPatchApplier {
    /// Create a new applier.
    pub fn new() -> Self {
        Self
    }
}

impl PatchApplier for JsonPatchApplier {
    fn apply(&self, payload: &Value, operations: &[PatchOperation]) -> Result<Value> {
        let mut patched = payload.clone();
        for operation in operations {
            apply_one(&mut patched, operation)?;
        }
        Ok(patched)
    }
}

fn apply_one(payload: &mut Value, operation: &PatchOperation) -> Result<()> {
    let (parent_path, leaf) = split_path(operation.path())?;

    let parent = payload
        .pointer_mut(parent_path)
        .ok_or_else(|| invalid(format!("no value at '{}'", parent_path)))?;

    match operation {
        PatchOperation::Add { value, .. } => add(parent, leaf, value.clone()),
        PatchOperation::Replace { value, .. } => replace(parent, leaf, value.clone()),
        PatchOperation::Remove { .. } => remove(parent, leaf),
    }
}

fn add(parent: &mut Value, leaf: &str, value: Value) -> Result<()> {
    match parent {
        Value::Object(map) => {
            map.insert(leaf.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            if leaf == "-" {
                items.push(value);
                return Ok(());
            }
            let index = parse_index(leaf)?;
            if index > items.len() {
                return Err(invalid(format!(
                    "index {} out of bounds for array of {}",
                    index,
                    items.len()
                )));
            }
            items.insert(index, value);
            Ok(())
        }
        _ => Err(invalid(format!("cannot add '{}' to a scalar", leaf))),
    }
}

fn replace(parent: &mut Value, leaf: &str, value: Value) -> Result<()> {
    match parent {
        Value::Object(map) => match map.get_mut(leaf) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(invalid(format!("no member '{}' to replace", leaf))),
        },
        Value::Array(items) => {
            let index = parse_index(leaf)?;
            match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                }
                None => Err(invalid(format!("no element {} to replace", index))),
            }
        }
        _ => Err(invalid(format!("cannot replace '{}' in a scalar", leaf))),
    }
}

fn remove(parent: &mut Value, leaf: &str) -> Result<()> {
    match parent {
        Value::Object(map) => map
            .remove(leaf)
            .map(|_| ())
            .ok_or_else(|| invalid(format!("no member '{}' to remove", leaf))),
        Value::Array(items) => {
            let index = parse_index(leaf)?;
            if index >= items.len() {
                return Err(invalid(format!("no element {} to remove", index)));
            }
            items.remove(index);
            Ok(())
        }
        _ => Err(invalid(format!("cannot remove '{}' from a scalar", leaf))),
    }
}

/// Split a pointer into its parent pointer and final segment.
fn split_path(path: &str) -> Result<(&str, &str)> {
    if !path.starts_with('/') {
        return Err(invalid(format!("path '{}' must start with '/'", path)));
    }
    let cut = path.rfind('/').unwrap_or(0);
    let leaf = &path[cut + 1..];
    if leaf.is_empty() {
        return Err(invalid(format!("path '{}' has an empty final segment", path)));
    }
    Ok((&path[..cut], leaf))
}

fn parse_index(leaf: &str) -> Result<usize> {
    leaf.parse()
        .map_err(|_| invalid(format!("'{}' is not an array index", leaf)))
}

fn invalid(message: String) -> DocketError {
    DocketError::InvalidPatch(message)
}
