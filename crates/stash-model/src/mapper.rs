//! Maps raw documents from [`crate::protocol`] into domain values and owns the naming
//! scheme that ties items to stash tabs.
use serde_json::Value;

use crate::{
    character::Character,
    factory,
    item::Item,
    protocol::{CharacterDescriptor, TabDescriptor},
    stash::{Tab, TabColour},
};

pub const STASH: &str = "Stash";

/// Inventory id carried by items in the tab with the 0-based `tab_index`.
pub fn inventory_id(tab_index: usize) -> String {
    format!("{}{}", STASH, tab_index + 1)
}

pub fn items(descriptors: &[Value]) -> Vec<Item> {
    descriptors.iter().map(factory::get).collect()
}

pub fn tabs(descriptors: Vec<TabDescriptor>) -> Vec<Tab> {
    descriptors.into_iter().map(tab).collect()
}

pub fn tab(descriptor: TabDescriptor) -> Tab {
    Tab {
        index: descriptor.i,
        name: descriptor.n,
        icon_url: descriptor.src,
        hidden: descriptor.hidden,
        colour: descriptor.colour.map(|c| TabColour {
            r: c.r,
            g: c.g,
            b: c.b,
        }),
    }
}

pub fn character(descriptor: CharacterDescriptor) -> Character {
    Character {
        name: descriptor.name,
        league: descriptor.league,
        class: descriptor.class,
        level: descriptor.level,
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{TabColourDescriptor, TabDescriptor};

    use super::{inventory_id, tab};

    #[test]
    fn test_inventory_id_is_one_based() {
        assert_eq!(inventory_id(0), "Stash1");
        assert_eq!(inventory_id(11), "Stash12");
    }

    #[test]
    fn test_tab() {
        let mapped = tab(TabDescriptor {
            i: 3,
            n: "Currency".into(),
            src: "https://web.poecdn.com/tab.png".into(),
            hidden: false,
            colour: Some(TabColourDescriptor { r: 124, g: 84, b: 54 }),
        });

        assert_eq!(mapped.index, 3);
        assert_eq!(mapped.name, "Currency");
        assert_eq!(mapped.icon_url, "https://web.poecdn.com/tab.png");
        assert_eq!(mapped.colour.map(|c| c.r), Some(124));
    }
}
