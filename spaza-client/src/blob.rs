//! Opaque document storage
//!
//! Applications attach verification documents (licences, proof of address,
//! selfies) as opaque byte buffers. The store is content-addressable: a
//! buffer maps to a stable reference plus a retrievable URL. The core never
//! inspects blob contents; size/type pre-checks are the caller's job.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;

/// Reference to a stored document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    /// Content-addressed id (SHA-256 of the bytes, hex encoded)
    pub id: String,
    /// Retrievable URL for the stored bytes
    pub url: String,
}

/// An opaque document handed to the client for upload
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl DocumentUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

/// Content-addressable blob store seam
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a buffer and return its reference. Storing the same bytes twice
    /// returns the same reference.
    async fn put(&self, bytes: &[u8], content_type: &str) -> ClientResult<BlobRef>;
}

/// In-memory content-addressable store for tests and offline development
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blobs held
    pub fn len(&self) -> usize {
        self.blobs.read().expect("blob store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, bytes: &[u8], content_type: &str) -> ClientResult<BlobRef> {
        if bytes.is_empty() {
            return Err(ClientError::Validation("document is empty".into()));
        }
        let id = hex::encode(Sha256::digest(bytes));
        self.blobs
            .write()
            .expect("blob store lock poisoned")
            .entry(id.clone())
            .or_insert_with(|| bytes.to_vec());
        tracing::debug!(blob = %id, content_type = %content_type, size = bytes.len(), "Stored document");
        Ok(BlobRef {
            url: format!("blob://{}", id),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_is_content_addressed() {
        let store = MemoryBlobStore::new();
        let a = store.put(b"licence scan", "image/jpeg").await.unwrap();
        let b = store.put(b"licence scan", "image/jpeg").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
        assert!(a.url.starts_with("blob://"));
        assert_eq!(a.id.len(), 64);
    }

    #[tokio::test]
    async fn test_empty_document_rejected() {
        let store = MemoryBlobStore::new();
        let err = store.put(b"", "image/jpeg").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(store.is_empty());
    }
}
