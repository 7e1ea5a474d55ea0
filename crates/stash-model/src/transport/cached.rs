use bytes::Bytes;
use stash_common::{league::League, secret::SecretString};
use tracing::debug;

use crate::{
    cache::{CacheKey, DocumentCache},
    error::TransportError,
};

use super::Transport;

/// Serves documents from a [`DocumentCache`] and only asks the wrapped transport on a miss.
///
/// Offline, the wrapped transport is never contacted and misses are errors.
#[derive(Debug)]
pub struct CachedTransport<T> {
    inner: T,
    cache: DocumentCache,
    offline: bool,
}

impl<T: Transport> CachedTransport<T> {
    pub fn new(inner: T, cache: DocumentCache) -> Self {
        Self {
            inner,
            cache,
            offline: false,
        }
    }

    pub fn offline(inner: T, cache: DocumentCache) -> Self {
        Self {
            inner,
            cache,
            offline: true,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn cached<F>(
        &mut self,
        key: CacheKey,
        force_refresh: bool,
        fetch: F,
    ) -> Result<Bytes, TransportError>
    where
        F: FnOnce(&mut T) -> Result<Bytes, TransportError>,
    {
        if !force_refresh || self.offline {
            if let Some(document) = self.cache.get(&key)? {
                debug!("Serving {} from cache", key);
                return Ok(document);
            }
        }

        if self.offline {
            return Err(TransportError::Offline {
                resource: key.to_string(),
            });
        }

        let document = fetch(&mut self.inner)?;
        self.cache.insert(key, document.clone())?;
        Ok(document)
    }
}

impl<T: Transport> Transport for CachedTransport<T> {
    fn authenticate(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), TransportError> {
        if self.offline {
            return Ok(());
        }
        self.inner.authenticate(identity, secret)
    }

    fn stash_document(
        &mut self,
        tab_index: usize,
        league: &League,
        force_refresh: bool,
    ) -> Result<Bytes, TransportError> {
        let key = CacheKey::Stash {
            league: league.to_string(),
            tab_index,
        };
        self.cached(key, force_refresh, |inner| {
            inner.stash_document(tab_index, league, force_refresh)
        })
    }

    fn characters_document(&mut self) -> Result<Bytes, TransportError> {
        self.cached(CacheKey::Characters, false, |inner| inner.characters_document())
    }

    fn inventory_document(&mut self, character: &str) -> Result<Bytes, TransportError> {
        let key = CacheKey::Inventory {
            character: character.to_owned(),
        };
        self.cached(key, false, |inner| inner.inventory_document(character))
    }

    fn image(&mut self, url: &str) -> Result<Bytes, TransportError> {
        let key = CacheKey::Image {
            url: url.to_owned(),
        };
        self.cached(key, false, |inner| inner.image(url))
    }
}
