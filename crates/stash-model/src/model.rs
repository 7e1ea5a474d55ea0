use bytes::Bytes;
use serde::de::DeserializeOwned;
use stash_common::{league::League, secret::SecretString};
use tracing::{debug, error, info};

use crate::{
    cache::Cache,
    character::Character,
    diagnostics::log_raw_document,
    error::ModelError,
    events::{EventState, ModelEvent, Observers, SubscriptionId},
    item::{distinct_images, Item},
    mapper,
    protocol::{ApiError, CharacterDescriptor, InventoryDocument, StashDocument},
    stash::{Stash, Tab},
    transport::Transport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated { offline: bool },
}

/// Drives authentication and every fetch of a session. Holds no item data itself: each
/// call returns freshly built values.
#[derive(Debug)]
pub struct Model<T, C> {
    transport: T,
    cache: C,
    state: SessionState,
    observers: Observers,
}

impl<T: Transport, C: Cache> Model<T, C> {
    pub fn new(transport: T, cache: C) -> Self {
        Self {
            transport,
            cache,
            state: SessionState::Unauthenticated,
            observers: Observers::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_offline(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { offline: true })
    }

    /// Registers an observer for progress notifications. Observers run synchronously on
    /// the thread that issued the call being reported.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ModelEvent) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Establishes the session. Offline sessions never contact the remote service.
    ///
    /// The secret is consumed and wiped when this call returns, whatever the outcome.
    #[tracing::instrument(skip(self, secret))]
    pub fn authenticate(
        &mut self,
        identity: &str,
        secret: SecretString,
        offline: bool,
    ) -> Result<(), ModelError> {
        if offline {
            info!("Starting offline session for {}", identity);
            self.state = SessionState::Authenticated { offline: true };
            return Ok(());
        }

        self.state = SessionState::Authenticating;
        self.notify(ModelEvent::Authenticating {
            identity: identity.to_owned(),
            state: EventState::Before,
        });

        if let Err(e) = self.transport.authenticate(identity, &secret) {
            error!("Authenticating {} failed: {}", identity, e);
            self.state = SessionState::Unauthenticated;
            return Err(e.into());
        }

        self.state = SessionState::Authenticated { offline: false };
        self.notify(ModelEvent::Authenticating {
            identity: identity.to_owned(),
            state: EventState::After,
        });

        Ok(())
    }

    /// Drops all cached documents; the next fetch of each goes to the remote service.
    pub fn force_refresh(&mut self) -> Result<(), ModelError> {
        self.cache.clear()?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn get_single_tab(
        &mut self,
        index: usize,
        league: &League,
        force_refresh: bool,
    ) -> Result<Stash, ModelError> {
        self.ensure_authenticated()?;

        self.notify(ModelEvent::StashLoading {
            index,
            number_of_tabs: None,
            state: EventState::Before,
        });

        let bytes = self.transport.stash_document(index, league, force_refresh)?;
        let document: StashDocument = parse_document(&bytes, "reading a stash tab")?;
        check_api_error(document.error.as_ref())?;

        debug!(
            "Read tab {} of {} with {} items",
            index,
            document.num_tabs,
            document.items.as_ref().map_or(0, Vec::len)
        );

        self.notify(ModelEvent::StashLoading {
            index,
            number_of_tabs: Some(document.num_tabs),
            state: EventState::After,
        });

        Ok(Stash::from_document(document))
    }

    /// Fetches tab 0 to learn the number of tabs, then every further tab in order.
    #[tracing::instrument(skip(self))]
    pub fn get_full_stash(&mut self, league: &League) -> Result<Stash, ModelError> {
        let mut stash = self.get_single_tab(0, league, false)?;

        for index in 1..stash.number_of_tabs() {
            let tab = self.get_single_tab(index, league, false)?;
            stash.add(tab);
        }

        info!(
            "Loaded {} items from {} tabs",
            stash.items().len(),
            stash.number_of_tabs()
        );

        Ok(stash)
    }

    /// Replaces the contents of one tab of `stash` with a freshly fetched copy.
    pub fn refresh_tab(
        &mut self,
        stash: &mut Stash,
        league: &League,
        tab_id: usize,
    ) -> Result<(), ModelError> {
        stash.refresh_tab(tab_id, |index| self.get_single_tab(index, league, true))
    }

    #[tracing::instrument(skip(self))]
    pub fn get_characters(&mut self) -> Result<Vec<Character>, ModelError> {
        self.ensure_authenticated()?;

        let bytes = self.transport.characters_document()?;
        let characters: Vec<CharacterDescriptor> =
            parse_document(&bytes, "reading the character list")?;

        Ok(characters.into_iter().map(mapper::character).collect())
    }

    #[tracing::instrument(skip(self))]
    pub fn get_inventory(&mut self, character_name: &str) -> Result<Vec<Item>, ModelError> {
        self.ensure_authenticated()?;

        let bytes = self.transport.inventory_document(character_name)?;
        let document: InventoryDocument = parse_document(&bytes, "reading an inventory")?;
        check_api_error(document.error.as_ref())?;

        Ok(document
            .items
            .map(|items| mapper::items(&items))
            .unwrap_or_default())
    }

    /// Downloads one image per distinct item icon, then the icon of every tab.
    pub fn get_stash_images(&mut self, stash: &Stash) -> Result<(), ModelError> {
        self.get_item_images(stash.items())?;

        for tab in stash.tabs() {
            if tab.icon_url.is_empty() {
                debug!("Tab {} has no icon", tab.index);
                continue;
            }
            self.fetch_image(format!("Tab Icon {}", tab.index), &tab.icon_url)?;
        }

        Ok(())
    }

    pub fn get_item_images(&mut self, items: &[Item]) -> Result<(), ModelError> {
        self.ensure_authenticated()?;

        for item in distinct_images(items) {
            self.fetch_image(item.base().display_name().to_owned(), item.icon_url())?;
        }

        Ok(())
    }

    pub fn get_image(&mut self, item: &Item) -> Result<Bytes, ModelError> {
        self.ensure_authenticated()?;
        self.fetch_image(item.base().display_name().to_owned(), item.icon_url())
    }

    pub fn get_tab_image(&mut self, tab: &Tab) -> Result<Bytes, ModelError> {
        self.ensure_authenticated()?;
        self.fetch_image(tab.name.clone(), &tab.icon_url)
    }

    fn fetch_image(&mut self, name: String, url: &str) -> Result<Bytes, ModelError> {
        self.notify(ModelEvent::ImageLoading {
            name: name.clone(),
            state: EventState::Before,
        });

        let image = self.transport.image(url)?;

        self.notify(ModelEvent::ImageLoading {
            name,
            state: EventState::After,
        });

        Ok(image)
    }

    fn ensure_authenticated(&self) -> Result<(), ModelError> {
        match self.state {
            SessionState::Authenticated { .. } => Ok(()),
            _ => Err(ModelError::NotAuthenticated),
        }
    }

    fn notify(&mut self, event: ModelEvent) {
        self.observers.notify(&event);
    }
}

/// Deserializes a raw document. Unreadable and `null` documents are logged in full for
/// later diagnosis and reported as [`ModelError::MalformedResponse`].
fn parse_document<D: DeserializeOwned>(bytes: &[u8], context: &str) -> Result<D, ModelError> {
    match serde_json::from_slice::<Option<D>>(bytes) {
        Ok(Some(document)) => Ok(document),
        Ok(None) => {
            log_raw_document("Proxy was null", bytes);
            Err(ModelError::MalformedResponse {
                context: context.to_owned(),
                source: None,
            })
        }
        Err(e) => {
            error!("Deserializing document failed while {}: {}", context, e);
            log_raw_document("JSON Serialization Failed", bytes);
            Err(ModelError::MalformedResponse {
                context: context.to_owned(),
                source: Some(e),
            })
        }
    }
}

fn check_api_error(error: Option<&ApiError>) -> Result<(), ModelError> {
    match error {
        Some(e) => Err(ModelError::Api {
            code: e.code,
            message: e.message.clone(),
        }),
        None => Ok(()),
    }
}
