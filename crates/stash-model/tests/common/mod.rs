#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{mpsc::Receiver, Arc, Mutex},
};

use bytes::Bytes;
use serde_json::{json, Value};
use stash_common::{league::League, secret::SecretString};
use stash_model::{
    cache::DocumentCache, events::ModelEvent, Model, TransportError, Transport,
};

/// A transport answering from canned documents and recording every request.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTransport {
    pub stash: HashMap<usize, String>,
    pub characters: Option<String>,
    pub inventories: HashMap<String, String>,
    pub reject_authentication: bool,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn with_tab(mut self, index: usize, document: Value) -> Self {
        self.stash.insert(index, document.to_string());
        self
    }

    pub fn with_raw_tab(mut self, index: usize, document: &str) -> Self {
        self.stash.insert(index, document.to_owned());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

impl Transport for ScriptedTransport {
    fn authenticate(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), TransportError> {
        self.record(format!("authenticate {} {}", identity, secret.expose()));
        if self.reject_authentication {
            return Err(TransportError::Unauthorized { status: 401 });
        }
        Ok(())
    }

    fn stash_document(
        &mut self,
        tab_index: usize,
        league: &League,
        force_refresh: bool,
    ) -> Result<Bytes, TransportError> {
        self.record(format!("stash {} {} {}", league, tab_index, force_refresh));
        self.stash
            .get(&tab_index)
            .map(|d| Bytes::from(d.clone()))
            .ok_or(TransportError::Http { status: 404 })
    }

    fn characters_document(&mut self) -> Result<Bytes, TransportError> {
        self.record("characters".into());
        self.characters
            .clone()
            .map(Bytes::from)
            .ok_or(TransportError::Http { status: 404 })
    }

    fn inventory_document(&mut self, character: &str) -> Result<Bytes, TransportError> {
        self.record(format!("inventory {}", character));
        self.inventories
            .get(character)
            .map(|d| Bytes::from(d.clone()))
            .ok_or(TransportError::Http { status: 404 })
    }

    fn image(&mut self, url: &str) -> Result<Bytes, TransportError> {
        self.record(format!("image {}", url));
        Ok(Bytes::from(url.to_owned()))
    }
}

pub fn item(name: &str, tab_index: usize, w: u32, h: u32, frame_type: u8, icon: &str) -> Value {
    json!({
        "w": w,
        "h": h,
        "name": name,
        "typeLine": "Vaal Regalia",
        "frameType": frame_type,
        "identified": true,
        "ilvl": 80,
        "icon": icon,
        "inventoryId": format!("Stash{}", tab_index + 1),
    })
}

pub fn tab_document(num_tabs: usize, items: Vec<Value>) -> Value {
    let tabs: Vec<Value> = (0..num_tabs)
        .map(|i| {
            json!({
                "i": i,
                "n": format!("Tab {}", i + 1),
                "src": format!("https://web.poecdn.com/tabs/{}.png", i),
                "hidden": false,
                "colour": {"r": 124, "g": 84, "b": 54}
            })
        })
        .collect();

    json!({ "numTabs": num_tabs, "tabs": tabs, "items": items })
}

pub fn authenticated(transport: ScriptedTransport) -> Model<ScriptedTransport, DocumentCache> {
    let mut model = Model::new(transport, DocumentCache::new("account"));
    model
        .authenticate("account", SecretString::from("session-id"), false)
        .expect("authenticate");
    model
}

pub fn subscribe(model: &mut Model<ScriptedTransport, DocumentCache>) -> Receiver<ModelEvent> {
    let (tx, rx) = std::sync::mpsc::channel();
    model.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });
    rx
}
