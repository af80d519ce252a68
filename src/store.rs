//! Immutable document store loaded once at start-up.
//!
//! Documents come from a TOML fixture made of `[[documents]]` tables, either
//! the bundled `data/documents.toml` or a user-supplied file. The store never
//! changes after loading.

use std::collections::HashSet;
use std::path::Path;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::model::Document;

/// Errors from loading the document fixture.
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to read document fixture: {path}")]
    #[diagnostic(
        code(lumina::store::read),
        help("Check that the file exists and is readable, or drop `library.documents` to use the bundled set.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document fixture {origin}: {message}")]
    #[diagnostic(
        code(lumina::store::parse),
        help(
            "The fixture must be TOML with one `[[documents]]` table per document. \
             Required keys: id, title, category, date, summary, content."
        )
    )]
    Parse { origin: String, message: String },

    #[error("duplicate document id \"{id}\" in {origin}")]
    #[diagnostic(
        code(lumina::store::duplicate_id),
        help("Every document needs a distinct `id`.")
    )]
    DuplicateId { id: String, origin: String },

    #[error("document with empty id in {origin}")]
    #[diagnostic(code(lumina::store::empty_id), help("Give the document a non-empty `id`."))]
    EmptyId { origin: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

const BUNDLED_DOCUMENTS: &str = include_str!("../data/documents.toml");

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    documents: Vec<Document>,
}

/// Ordered, read-only sequence of documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Build a store from already-constructed documents, rejecting empty or duplicate ids.
    pub fn new(documents: Vec<Document>) -> StoreResult<Self> {
        Self::validated(documents, "(inline)")
    }

    /// The bundled fixture shipped with the binary.
    pub fn bundled() -> StoreResult<Self> {
        Self::from_toml(BUNDLED_DOCUMENTS, "(bundled)")
    }

    /// Load a fixture file from disk.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse a TOML fixture. `origin` names the source in diagnostics.
    pub fn from_toml(toml_str: &str, origin: &str) -> StoreResult<Self> {
        let fixture: Fixture = toml::from_str(toml_str).map_err(|e| StoreError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        let store = Self::validated(fixture.documents, origin)?;
        tracing::debug!(origin, count = store.len(), "loaded document fixture");
        Ok(store)
    }

    fn validated(documents: Vec<Document>, origin: &str) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if doc.id.is_empty() {
                return Err(StoreError::EmptyId {
                    origin: origin.to_string(),
                });
            }
            if !seen.insert(doc.id.as_str()) {
                return Err(StoreError::DuplicateId {
                    id: doc.id.clone(),
                    origin: origin.to_string(),
                });
            }
        }
        Ok(Self { documents })
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// All documents in fixture order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
