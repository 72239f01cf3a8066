use std::path::{Path, PathBuf};
use std::sync::Arc;

use callout_shared::models::{Callout, CalloutDocument, Difficulty};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid map name: {0:?}")]
    InvalidKey(String),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed document {}: {reason}", path.display())]
    Shape { path: PathBuf, reason: &'static str },

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One JSON document per map and difficulty under a root directory.
///
/// Documents are handled as raw JSON so fields this service does not know about survive a rewrite.
/// Appends are read-modify-write with no locking: two concurrent appends to the same document can
/// lose one of them.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn open(root: &Path) -> Arc<Self> {
        Arc::new(Storage {
            root: root.to_path_buf(),
        })
    }

    /// `<root>/<map>/<difficulty>.json`, refusing map names that could escape the root.
    pub fn document_path(&self, map: &str, difficulty: Difficulty) -> Result<PathBuf, StoreError> {
        if !is_valid_key(map) {
            return Err(StoreError::InvalidKey(map.to_string()));
        }
        Ok(self
            .root
            .join(map)
            .join(format!("{}.json", difficulty.as_str())))
    }

    pub fn load(&self, map: &str, difficulty: Difficulty) -> Result<Option<Value>, StoreError> {
        let path = self.document_path(map, difficulty)?;
        read_document(&path)
    }

    /// Append one callout, creating the directory and document on first use. Returns how many
    /// callouts the document holds afterwards.
    pub fn append(
        &self,
        map: &str,
        difficulty: Difficulty,
        callout: Callout,
    ) -> Result<usize, StoreError> {
        let path = self.document_path(map, difficulty)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut doc = match read_document(&path)? {
            Some(doc) => doc,
            None => serde_json::to_value(CalloutDocument::empty(difficulty))?,
        };
        let entry = serde_json::to_value(callout)?;
        let total = push_callout(&mut doc, entry).map_err(|reason| StoreError::Shape {
            path: path.clone(),
            reason,
        })?;

        let text = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&path, text).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(total)
    }
}

/// Push onto the document's `callouts` array, starting one if it is missing or null.
fn push_callout(doc: &mut Value, entry: Value) -> Result<usize, &'static str> {
    let fields = doc.as_object_mut().ok_or("not a JSON object")?;
    let callouts = fields
        .entry("callouts")
        .or_insert_with(|| Value::Array(Vec::new()));
    if callouts.is_null() {
        *callouts = Value::Array(Vec::new());
    }
    let list = callouts.as_array_mut().ok_or("callouts is not an array")?;
    list.push(entry);
    Ok(list.len())
}

fn read_document(path: &Path) -> Result<Option<Value>, StoreError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Map names become directory names: ASCII alphanumerics, `-` and `_` only.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
