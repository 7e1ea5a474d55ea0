use std::{
    collections::HashMap,
    fmt::Display,
    sync::{Arc, RwLock},
};

use bytes::Bytes;
use tracing::debug;

use crate::error::CacheError;

pub trait Cache {
    /// Drops everything cached; the next fetch goes to the remote service.
    fn clear(&self) -> Result<(), CacheError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Stash { league: String, tab_index: usize },
    Characters,
    Inventory { character: String },
    Image { url: String },
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Stash { league, tab_index } => {
                write!(f, "stash tab {} in {}", tab_index, league)
            }
            CacheKey::Characters => f.write_str("character list"),
            CacheKey::Inventory { character } => write!(f, "inventory of {}", character),
            CacheKey::Image { url } => write!(f, "image {}", url),
        }
    }
}

/// In-memory store of raw documents for a single identity.
///
/// Clones share the same storage, so the transport that fills the cache and the model
/// that clears it can each hold a handle.
#[derive(Debug, Clone, Default)]
pub struct DocumentCache {
    identity: String,
    inner: Arc<RwLock<HashMap<CacheKey, Bytes>>>,
}

impl DocumentCache {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            inner: Default::default(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn get(&self, key: &CacheKey) -> Result<Option<Bytes>, CacheError> {
        let inner = self.inner.read().map_err(|_| CacheError::Poisoned)?;
        Ok(inner.get(key).cloned())
    }

    pub fn insert(&self, key: CacheKey, document: Bytes) -> Result<(), CacheError> {
        let mut inner = self.inner.write().map_err(|_| CacheError::Poisoned)?;
        inner.insert(key, document);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, CacheError> {
        Ok(self.inner.read().map_err(|_| CacheError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}

impl Cache for DocumentCache {
    fn clear(&self) -> Result<(), CacheError> {
        let mut inner = self.inner.write().map_err(|_| CacheError::Poisoned)?;
        debug!("Clearing {} cached documents of {}", inner.len(), self.identity);
        inner.clear();
        Ok(())
    }
}
