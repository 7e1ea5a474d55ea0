//! Internal types that model what the documents coming from the character-window API
//! look like. Everything here is deserialized as-is and mapped into domain types by
//! [`crate::mapper`] and [`crate::factory`].
use serde::Deserialize;

/// A single stash tab page.
///
/// `items` is `null` when the account has nothing to show for the requested league, in
/// which case `tabs` carries no meaning.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct StashDocument {
    pub items: Option<Vec<serde_json::Value>>,
    #[serde(rename(deserialize = "numTabs"))]
    pub num_tabs: usize,
    pub tabs: Option<Vec<TabDescriptor>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct TabDescriptor {
    pub i: usize,
    pub n: String,
    pub src: String,
    pub hidden: bool,
    pub colour: Option<TabColourDescriptor>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabColourDescriptor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The error envelope the service sends instead of a payload, e.g. for private profiles.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ItemDescriptor {
    pub id: Option<String>,
    pub w: u32,
    pub h: u32,
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub icon: String,
    pub league: Option<String>,
    pub name: String,
    #[serde(rename(deserialize = "typeLine"))]
    pub type_line: String,
    pub identified: bool,
    pub ilvl: u32,
    pub corrupted: bool,
    pub support: Option<bool>,
    /// 0 normal, 1 magic, 2 rare, 3 unique, 4 gem, 5 currency, 6 divination card,
    /// 7 quest, 8 prophecy, 9 relic
    #[serde(rename(deserialize = "frameType"))]
    pub frame_type: Option<u8>,
    /// Normal, Magic, Rare, or Unique
    pub rarity: Option<String>,
    #[serde(rename(deserialize = "stackSize"))]
    pub stack_size: Option<u32>,
    #[serde(rename(deserialize = "maxStackSize"))]
    pub max_stack_size: Option<u32>,
    pub properties: Vec<ItemProperty>,
    #[serde(rename(deserialize = "implicitMods"))]
    pub implicit_mods: Vec<String>,
    #[serde(rename(deserialize = "explicitMods"))]
    pub explicit_mods: Vec<String>,
    #[serde(rename(deserialize = "craftedMods"))]
    pub crafted_mods: Vec<String>,
    pub sockets: Vec<serde_json::Value>,
    #[serde(rename(deserialize = "descrText"))]
    pub descr_text: Option<String>,
    #[serde(rename(deserialize = "inventoryId"))]
    pub inventory_id: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ItemProperty {
    pub name: String,
    /// Pairs of `[display value, display style]`.
    pub values: Vec<serde_json::Value>,
    #[serde(rename(deserialize = "displayMode"))]
    pub display_mode: Option<u8>,
}

impl ItemProperty {
    /// The display string of the first value pair, e.g. `"+20%"` for a quality property.
    pub fn first_value(&self) -> Option<&str> {
        self.values
            .first()
            .and_then(|pair| pair.get(0))
            .and_then(|v| v.as_str())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CharacterDescriptor {
    pub name: String,
    pub league: String,
    pub class: String,
    pub level: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct InventoryDocument {
    pub items: Option<Vec<serde_json::Value>>,
    pub character: Option<CharacterDescriptor>,
    pub error: Option<ApiError>,
}
