//! Subledger document store.
//!
//! Producers register their documents here; status flips to the posted
//! state happen only through the posting coordinator's atomic unit.

use std::collections::HashMap;

use tokio::sync::RwLock;

use reckon_core::subledger::{Document, NewDocument};
use reckon_shared::types::DocumentId;

/// In-memory subledger document store.
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<HashMap<DocumentId, Document>>,
}

impl DocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a draft document.
    pub async fn register(&self, input: NewDocument) -> Document {
        let document = Document::draft(input);
        self.inner
            .write()
            .await
            .insert(document.id, document.clone());
        document
    }

    /// Returns a document by id.
    pub async fn get(&self, id: DocumentId) -> Option<Document> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Returns all documents.
    pub async fn list(&self) -> Vec<Document> {
        self.inner.read().await.values().cloned().collect()
    }

    /// Replaces a document with its staged, committed state.
    ///
    /// Only the posting coordinator calls this, under the document lock.
    pub(crate) async fn replace(&self, document: Document) {
        self.inner.write().await.insert(document.id, document);
    }
}
