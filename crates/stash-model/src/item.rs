use std::collections::HashSet;

use crate::currency::OrbType;

/// Rarity or, for non-equipment, the kind of frame the service draws around an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Unique,
    Gem,
    Currency,
    DivinationCard,
    Quest,
    Prophecy,
    Relic,
    #[default]
    Unknown,
}

impl Rarity {
    /// Classifies by `frameType`, falling back to the textual `rarity` field newer
    /// documents carry.
    pub fn classify(frame_type: Option<u8>, rarity: Option<&str>) -> Self {
        match frame_type {
            Some(0) => Rarity::Normal,
            Some(1) => Rarity::Magic,
            Some(2) => Rarity::Rare,
            Some(3) => Rarity::Unique,
            Some(4) => Rarity::Gem,
            Some(5) => Rarity::Currency,
            Some(6) => Rarity::DivinationCard,
            Some(7) => Rarity::Quest,
            Some(8) => Rarity::Prophecy,
            Some(9) => Rarity::Relic,
            Some(_) => Rarity::Unknown,
            None => match rarity {
                Some("Normal") => Rarity::Normal,
                Some("Magic") => Rarity::Magic,
                Some("Rare") => Rarity::Rare,
                Some("Unique") => Rarity::Unique,
                _ => Rarity::Unknown,
            },
        }
    }

    pub fn is_equipment(&self) -> bool {
        matches!(
            self,
            Rarity::Normal | Rarity::Magic | Rarity::Rare | Rarity::Unique | Rarity::Relic
        )
    }
}

/// Fields every item carries regardless of its variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemBase {
    pub id: Option<String>,
    pub w: u32,
    pub h: u32,
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub name: String,
    pub type_line: String,
    /// Location tag, `Stash1`.. for stash tabs or a character slot like `MainInventory`.
    pub inventory_id: String,
    pub icon_url: String,
    pub league: Option<String>,
    pub rarity: Rarity,
}

impl ItemBase {
    /// Number of stash cells the item covers.
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Name shown to users: the item's name, or its type line for unnamed items.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.type_line
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gear {
    pub base: ItemBase,
    pub item_level: u32,
    pub identified: bool,
    pub corrupted: bool,
    pub implicit_mods: Vec<String>,
    pub explicit_mods: Vec<String>,
    pub sockets: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub base: ItemBase,
    pub orb: OrbType,
    pub stack_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub base: ItemBase,
    pub tier: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gem {
    pub base: ItemBase,
    pub level: Option<u32>,
    pub quality: u32,
    pub support: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub base: ItemBase,
    pub stack_size: u32,
    pub max_stack_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Gear(Gear),
    Currency(Currency),
    Map(Map),
    Gem(Gem),
    Card(Card),
    Generic(ItemBase),
}

impl Item {
    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Gear(gear) => &gear.base,
            Item::Currency(currency) => &currency.base,
            Item::Map(map) => &map.base,
            Item::Gem(gem) => &gem.base,
            Item::Card(card) => &card.base,
            Item::Generic(base) => base,
        }
    }

    pub fn inventory_id(&self) -> &str {
        &self.base().inventory_id
    }

    pub fn icon_url(&self) -> &str {
        &self.base().icon_url
    }
}

/// Projection of an [`Item`] onto one of its variants, used to filter collections by
/// variant.
pub trait ItemKind {
    fn project(item: &Item) -> Option<&Self>;
}

impl ItemKind for Item {
    fn project(item: &Item) -> Option<&Self> {
        Some(item)
    }
}

impl ItemKind for Gear {
    fn project(item: &Item) -> Option<&Self> {
        match item {
            Item::Gear(gear) => Some(gear),
            _ => None,
        }
    }
}

impl ItemKind for Currency {
    fn project(item: &Item) -> Option<&Self> {
        match item {
            Item::Currency(currency) => Some(currency),
            _ => None,
        }
    }
}

impl ItemKind for Map {
    fn project(item: &Item) -> Option<&Self> {
        match item {
            Item::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl ItemKind for Gem {
    fn project(item: &Item) -> Option<&Self> {
        match item {
            Item::Gem(gem) => Some(gem),
            _ => None,
        }
    }
}

impl ItemKind for Card {
    fn project(item: &Item) -> Option<&Self> {
        match item {
            Item::Card(card) => Some(card),
            _ => None,
        }
    }
}

/// Keeps the first item of every distinct icon, preserving order.
pub fn distinct_images<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.icon_url()))
        .collect()
}
