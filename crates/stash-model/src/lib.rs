pub mod cache;
pub mod character;
pub mod currency;
mod diagnostics;
pub mod error;
pub mod events;
pub mod factory;
pub mod item;
pub mod mapper;
pub mod model;
pub mod protocol;
pub mod stash;
pub mod transport;

pub use cache::{Cache, CacheKey, DocumentCache};
pub use character::Character;
pub use currency::{CurrencyRates, OrbType};
pub use error::{CacheError, ModelError, TransportError};
pub use events::{EventState, ModelEvent, SubscriptionId};
pub use item::{Card, Currency, Gear, Gem, Item, ItemBase, ItemKind, Map, Rarity};
pub use model::{Model, SessionState};
pub use stash::{Stash, Tab, TabColour};
pub use transport::{cached::CachedTransport, http::HttpTransport, Transport};
