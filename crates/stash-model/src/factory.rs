//! Turns raw item descriptors into typed [`Item`] variants.
//!
//! Building an item never fails: descriptors that do not match the expected shape are
//! salvaged into [`Item::Generic`] with whatever fields could be read.
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map as JsonObject, Value};
use tracing::warn;

use crate::{
    currency::OrbType,
    item::{Card, Currency, Gear, Gem, Item, ItemBase, Map, Rarity},
    protocol::{ItemDescriptor, ItemProperty},
};

const MAP_TIER_PROPERTY: &str = "Map Tier";
const MAP_DESCRIPTION: &str = "Travel to this Map";

pub fn get(descriptor: &Value) -> Item {
    match ItemDescriptor::deserialize(descriptor) {
        Ok(descriptor) => from_descriptor(descriptor),
        Err(e) => {
            warn!("Salvaging unexpected item descriptor: {}", e);
            Item::Generic(salvage(descriptor))
        }
    }
}

pub fn from_descriptor(descriptor: ItemDescriptor) -> Item {
    let rarity = Rarity::classify(descriptor.frame_type, descriptor.rarity.as_deref());

    if is_map(&descriptor) {
        let tier = find_property(&descriptor.properties, MAP_TIER_PROPERTY)
            .and_then(leading_number);
        return Item::Map(Map {
            base: base(&descriptor, rarity),
            tier,
        });
    }

    match rarity {
        Rarity::Gem => Item::Gem(Gem {
            level: find_property(&descriptor.properties, "Level").and_then(leading_number),
            quality: find_property(&descriptor.properties, "Quality")
                .and_then(leading_number)
                .unwrap_or(0),
            support: descriptor.support.unwrap_or(false),
            base: base(&descriptor, rarity),
        }),
        Rarity::Currency => Item::Currency(Currency {
            orb: OrbType::from_type_line(&clean(&descriptor.type_line)),
            stack_size: stack_size(&descriptor),
            base: base(&descriptor, rarity),
        }),
        Rarity::DivinationCard => Item::Card(Card {
            stack_size: stack_size(&descriptor),
            max_stack_size: descriptor.max_stack_size,
            base: base(&descriptor, rarity),
        }),
        r if r.is_equipment() => Item::Gear(Gear {
            item_level: descriptor.ilvl,
            identified: descriptor.identified,
            corrupted: descriptor.corrupted,
            implicit_mods: descriptor.implicit_mods.clone(),
            explicit_mods: descriptor
                .explicit_mods
                .iter()
                .chain(descriptor.crafted_mods.iter())
                .cloned()
                .collect(),
            sockets: descriptor.sockets.len(),
            base: base(&descriptor, rarity),
        }),
        _ => Item::Generic(base(&descriptor, rarity)),
    }
}

fn base(descriptor: &ItemDescriptor, rarity: Rarity) -> ItemBase {
    ItemBase {
        id: descriptor.id.clone(),
        w: descriptor.w,
        h: descriptor.h,
        x: descriptor.x,
        y: descriptor.y,
        name: clean(&descriptor.name),
        type_line: clean(&descriptor.type_line),
        inventory_id: descriptor.inventory_id.clone(),
        icon_url: descriptor.icon.clone(),
        league: descriptor.league.clone(),
        rarity,
    }
}

fn is_map(descriptor: &ItemDescriptor) -> bool {
    find_property(&descriptor.properties, MAP_TIER_PROPERTY).is_some()
        || descriptor
            .descr_text
            .as_deref()
            .is_some_and(|text| text.contains(MAP_DESCRIPTION))
}

fn find_property<'a>(properties: &'a [ItemProperty], name: &str) -> Option<&'a str> {
    properties
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.first_value())
}

fn stack_size(descriptor: &ItemDescriptor) -> u32 {
    descriptor
        .stack_size
        .or_else(|| find_property(&descriptor.properties, "Stack Size").and_then(leading_number))
        .unwrap_or(1)
}

/// Reads the number a property value starts with: `"+20%"` → 20, `"3/10"` → 3.
fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start_matches('+')
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn markup() -> &'static Regex {
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    MARKUP.get_or_init(|| Regex::new(r"<<[^>]*>>").expect("valid markup regex"))
}

/// Strips the `<<set:MS>>` style markup the service prefixes names with.
fn clean(text: &str) -> String {
    markup().replace_all(text, "").into_owned()
}

fn salvage(descriptor: &Value) -> ItemBase {
    let Some(object) = descriptor.as_object() else {
        return ItemBase::default();
    };

    ItemBase {
        id: str_field(object, "id").map(str::to_owned),
        w: u32_field(object, "w").unwrap_or(0),
        h: u32_field(object, "h").unwrap_or(0),
        x: u32_field(object, "x"),
        y: u32_field(object, "y"),
        name: str_field(object, "name").map(clean).unwrap_or_default(),
        type_line: str_field(object, "typeLine").map(clean).unwrap_or_default(),
        inventory_id: str_field(object, "inventoryId")
            .unwrap_or_default()
            .to_owned(),
        icon_url: str_field(object, "icon").unwrap_or_default().to_owned(),
        league: str_field(object, "league").map(str::to_owned),
        rarity: Rarity::classify(
            u32_field(object, "frameType").and_then(|f| u8::try_from(f).ok()),
            str_field(object, "rarity"),
        ),
    }
}

fn str_field<'a>(object: &'a JsonObject<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn u32_field(object: &JsonObject<String, Value>, key: &str) -> Option<u32> {
    object
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::currency::OrbType;
    use crate::item::{Item, Rarity};

    use super::get;

    #[test]
    fn test_rare_gear() {
        let item = get(&json!({
            "w": 2, "h": 4, "ilvl": 84, "identified": true, "frameType": 2,
            "name": "<<set:MS>><<set:M>><<set:S>>Doom Bane", "typeLine": "Vaal Regalia",
            "icon": "https://web.poecdn.com/regalia.png", "inventoryId": "Stash2",
            "explicitMods": ["+90 to maximum Life"],
            "craftedMods": ["+1 to Level of Socketed Gems"],
            "sockets": [{"group": 0}, {"group": 0}]
        }));

        let Item::Gear(gear) = item else {
            panic!("expected gear, got {:?}", item);
        };
        assert_eq!(gear.base.name, "Doom Bane");
        assert_eq!(gear.base.rarity, Rarity::Rare);
        assert_eq!(gear.base.area(), 8);
        assert_eq!(gear.item_level, 84);
        assert_eq!(gear.explicit_mods.len(), 2);
        assert_eq!(gear.sockets, 2);
    }

    #[test]
    fn test_currency_stack() {
        let item = get(&json!({
            "w": 1, "h": 1, "frameType": 5, "typeLine": "Chaos Orb", "stackSize": 17,
            "inventoryId": "Stash1"
        }));

        let Item::Currency(currency) = item else {
            panic!("expected currency, got {:?}", item);
        };
        assert_eq!(currency.orb, OrbType::Chaos);
        assert_eq!(currency.stack_size, 17);
    }

    #[test]
    fn test_currency_stack_from_property() {
        let item = get(&json!({
            "frameType": 5, "typeLine": "Orb of Fusing",
            "properties": [{"name": "Stack Size", "values": [["3/20", 0]], "displayMode": 0}]
        }));

        let Item::Currency(currency) = item else {
            panic!("expected currency, got {:?}", item);
        };
        assert_eq!(currency.orb, OrbType::Fusing);
        assert_eq!(currency.stack_size, 3);
    }

    #[test]
    fn test_map_detected_by_tier_property() {
        let item = get(&json!({
            "w": 1, "h": 1, "frameType": 1, "typeLine": "Strand Map",
            "properties": [{"name": "Map Tier", "values": [["14", 0]], "displayMode": 0}]
        }));

        let Item::Map(map) = item else {
            panic!("expected map, got {:?}", item);
        };
        assert_eq!(map.tier, Some(14));
        assert_eq!(map.base.rarity, Rarity::Magic);
    }

    #[test]
    fn test_gem_level_and_quality() {
        let item = get(&json!({
            "frameType": 4, "typeLine": "Added Fire Damage Support", "support": true,
            "properties": [
                {"name": "Level", "values": [["20 (Max)", 0]], "displayMode": 0},
                {"name": "Quality", "values": [["+23%", 1]], "displayMode": 0}
            ]
        }));

        let Item::Gem(gem) = item else {
            panic!("expected gem, got {:?}", item);
        };
        assert_eq!(gem.level, Some(20));
        assert_eq!(gem.quality, 23);
        assert!(gem.support);
    }

    #[test]
    fn test_divination_card() {
        let item = get(&json!({
            "frameType": 6, "typeLine": "The Doctor", "stackSize": 2, "maxStackSize": 8
        }));

        let Item::Card(card) = item else {
            panic!("expected card, got {:?}", item);
        };
        assert_eq!(card.stack_size, 2);
        assert_eq!(card.max_stack_size, Some(8));
    }

    #[test]
    fn test_unknown_frame_is_generic() {
        let item = get(&json!({"frameType": 7, "typeLine": "Medicine Chest", "w": 1, "h": 2}));
        assert!(matches!(item, Item::Generic(ref base) if base.area() == 2));
    }

    #[test]
    fn test_malformed_descriptor_is_salvaged() {
        let item = get(&json!({
            "w": 2, "h": 2, "name": "Odd", "typeLine": 12, "inventoryId": "Stash3"
        }));

        let Item::Generic(base) = item else {
            panic!("expected generic, got {:?}", item);
        };
        assert_eq!(base.name, "Odd");
        assert_eq!(base.type_line, "");
        assert_eq!(base.inventory_id, "Stash3");
        assert_eq!(base.area(), 4);
    }

    #[test]
    fn test_non_object_descriptor_is_empty_generic() {
        let item = get(&json!("not an item"));
        assert_eq!(item, Item::Generic(Default::default()));
    }
}
