use std::collections::{BTreeMap, HashMap};

use crate::{
    currency::{CurrencyRates, OrbType},
    item::{Currency, Gear, Item, ItemKind, Rarity},
    mapper,
    protocol::StashDocument,
};

/// Number of cells in a single stash tab.
pub const TAB_SIZE: u32 = 144;

/// Key of the whole-stash entry in [`Stash::calculate_free_space`].
pub const ALL_TABS: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub index: usize,
    pub name: String,
    pub icon_url: String,
    pub hidden: bool,
    pub colour: Option<TabColour>,
}

/// Items of one or more stash tabs together with the tab metadata of the account.
///
/// Every item is expected to carry the inventory id of the tab it was fetched from, see
/// [`mapper::inventory_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stash {
    items: Vec<Item>,
    tabs: Vec<Tab>,
    number_of_tabs: usize,
}

impl Stash {
    pub fn new(items: Vec<Item>, tabs: Vec<Tab>, number_of_tabs: usize) -> Self {
        Self {
            items,
            tabs,
            number_of_tabs,
        }
    }

    /// A stash with no tabs and no items.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(document: StashDocument) -> Self {
        let Some(items) = document.items else {
            return Self::empty();
        };

        Self {
            items: mapper::items(&items),
            tabs: mapper::tabs(document.tabs.unwrap_or_default()),
            number_of_tabs: document.num_tabs,
        }
    }

    pub fn number_of_tabs(&self) -> usize {
        self.number_of_tabs
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends the items of `other`. Tab metadata of `other` is not taken over.
    pub fn add(&mut self, other: Stash) {
        self.items.extend(other.items);
    }

    /// Replaces the contents of `tab_id` with a fresh copy obtained from `fetch`.
    ///
    /// The fetch happens first, so a failing fetch leaves the stash untouched.
    pub fn refresh_tab<F, E>(&mut self, tab_id: usize, fetch: F) -> Result<(), E>
    where
        F: FnOnce(usize) -> Result<Stash, E>,
    {
        let fresh = fetch(tab_id)?;
        let inventory_id = mapper::inventory_id(tab_id);

        self.items.retain(|item| item.inventory_id() != inventory_id);
        self.add(fresh);

        Ok(())
    }

    pub fn items_by_tab(&self, tab_id: usize) -> Vec<&Item> {
        let inventory_id = mapper::inventory_id(tab_id);
        self.items
            .iter()
            .filter(|item| item.inventory_id() == inventory_id)
            .collect()
    }

    /// All items of variant `T`, e.g. `stash.get_of_type::<Gear>()`.
    pub fn get_of_type<T: ItemKind>(&self) -> Vec<&T> {
        self.items.iter().filter_map(T::project).collect()
    }

    pub fn get_of_type_matching<T, P>(&self, predicate: P) -> Vec<&T>
    where
        T: ItemKind,
        P: Fn(&T) -> bool,
    {
        self.items
            .iter()
            .filter_map(T::project)
            .filter(|item| predicate(*item))
            .collect()
    }

    pub fn total_currency_value(&self, rates: &CurrencyRates) -> f64 {
        rates.total_value(self.get_of_type::<Currency>())
    }

    pub fn currency_value_distribution(&self, rates: &CurrencyRates) -> HashMap<OrbType, f64> {
        rates.value_distribution(self.get_of_type::<Currency>())
    }

    /// Named rares that occur more than once, grouped by name in stash order.
    pub fn duplicate_rares(&self) -> BTreeMap<String, Vec<&Gear>> {
        let mut groups: BTreeMap<String, Vec<&Gear>> = BTreeMap::new();

        for gear in self.get_of_type_matching::<Gear, _>(|g| {
            g.base.rarity == Rarity::Rare && !g.base.name.is_empty()
        }) {
            groups.entry(gear.base.name.clone()).or_default().push(gear);
        }

        groups.retain(|_, group| group.len() > 1);
        groups
    }

    /// Percentage of capacity covered by items, for the whole stash under [`ALL_TABS`]
    /// and per inventory id. Values above 100 are passed through as-is.
    pub fn calculate_free_space(&self) -> BTreeMap<String, f64> {
        let mut used_by_inventory: BTreeMap<String, u64> = BTreeMap::new();
        let mut used_total: u64 = 0;

        for item in &self.items {
            let area = item.base().area();
            used_total += area;
            *used_by_inventory
                .entry(item.inventory_id().to_owned())
                .or_default() += area;
        }

        let capacity = self.number_of_tabs as f64 * f64::from(TAB_SIZE);
        let all = if capacity > 0.0 {
            used_total as f64 / capacity * 100.0
        } else {
            0.0
        };

        let mut free_space: BTreeMap<String, f64> = used_by_inventory
            .into_iter()
            .map(|(inventory_id, used)| {
                (inventory_id, used as f64 / f64::from(TAB_SIZE) * 100.0)
            })
            .collect();
        free_space.insert(ALL_TABS.to_owned(), all);

        free_space
    }
}
