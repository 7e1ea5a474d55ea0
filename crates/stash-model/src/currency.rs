use std::collections::HashMap;
use std::str::FromStr;

use strum::{Display, EnumString};

use crate::item::Currency;

/// Kinds of currency the valuation knows about, parsed from an item's type line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display)]
pub enum OrbType {
    #[strum(serialize = "Mirror of Kalandra")]
    Mirror,
    #[strum(serialize = "Divine Orb")]
    Divine,
    #[strum(serialize = "Exalted Orb")]
    Exalted,
    #[strum(serialize = "Eternal Orb")]
    Eternal,
    #[strum(serialize = "Gemcutter's Prism")]
    GemCutterPrism,
    #[strum(serialize = "Regal Orb")]
    Regal,
    #[strum(serialize = "Orb of Regret")]
    Regret,
    #[strum(serialize = "Vaal Orb")]
    Vaal,
    #[strum(serialize = "Chaos Orb")]
    Chaos,
    #[strum(serialize = "Blessed Orb")]
    Blessed,
    #[strum(serialize = "Orb of Scouring")]
    Scouring,
    #[strum(serialize = "Orb of Fusing")]
    Fusing,
    #[strum(serialize = "Orb of Alchemy")]
    Alchemy,
    #[strum(serialize = "Cartographer's Chisel")]
    Chisel,
    #[strum(serialize = "Jeweller's Orb")]
    Jewelers,
    #[strum(serialize = "Chromatic Orb")]
    Chromatic,
    #[strum(serialize = "Orb of Chance")]
    Chance,
    #[strum(serialize = "Orb of Alteration")]
    Alteration,
    #[strum(serialize = "Glassblower's Bauble")]
    GlassblowersBauble,
    #[strum(serialize = "Orb of Augmentation")]
    Augmentation,
    #[strum(serialize = "Orb of Transmutation")]
    Transmutation,
    #[strum(serialize = "Armourer's Scrap")]
    ArmourersScrap,
    #[strum(serialize = "Blacksmith's Whetstone")]
    BlacksmithsWhetstone,
    #[strum(serialize = "Portal Scroll")]
    PortalScroll,
    #[strum(serialize = "Scroll of Wisdom")]
    ScrollOfWisdom,
    Unknown,
}

impl OrbType {
    pub fn from_type_line(type_line: &str) -> Self {
        OrbType::from_str(type_line.trim()).unwrap_or(OrbType::Unknown)
    }
}

/// Exchange rates of every known orb, expressed in units of a base orb.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyRates {
    base: OrbType,
    rates: HashMap<OrbType, f64>,
}

impl CurrencyRates {
    pub fn new(base: OrbType) -> Self {
        Self {
            base,
            rates: HashMap::from([(base, 1.0)]),
        }
    }

    pub fn with_rate(mut self, orb: OrbType, rate: f64) -> Self {
        self.rates.insert(orb, rate);
        self
    }

    pub fn base(&self) -> OrbType {
        self.base
    }

    pub fn rate(&self, orb: OrbType) -> Option<f64> {
        self.rates.get(&orb).copied()
    }

    /// Value of all stacks in base units. Currency without a rate is worth nothing.
    pub fn total_value<'a>(&self, items: impl IntoIterator<Item = &'a Currency>) -> f64 {
        self.value_distribution(items).values().sum()
    }

    pub fn value_distribution<'a>(
        &self,
        items: impl IntoIterator<Item = &'a Currency>,
    ) -> HashMap<OrbType, f64> {
        let mut distribution = HashMap::new();

        for currency in items {
            if let Some(rate) = self.rate(currency.orb) {
                *distribution.entry(currency.orb).or_insert(0.0) +=
                    f64::from(currency.stack_size) * rate;
            }
        }

        distribution
    }
}

impl Default for CurrencyRates {
    fn default() -> Self {
        CurrencyRates::new(OrbType::Chaos)
            .with_rate(OrbType::Mirror, 40_000.0)
            .with_rate(OrbType::Divine, 180.0)
            .with_rate(OrbType::Exalted, 12.0)
            .with_rate(OrbType::Eternal, 10.0)
            .with_rate(OrbType::GemCutterPrism, 1.0)
            .with_rate(OrbType::Regal, 0.5)
            .with_rate(OrbType::Regret, 0.25)
            .with_rate(OrbType::Vaal, 0.5)
            .with_rate(OrbType::Blessed, 0.2)
            .with_rate(OrbType::Scouring, 0.5)
            .with_rate(OrbType::Fusing, 0.5)
            .with_rate(OrbType::Alchemy, 0.25)
            .with_rate(OrbType::Chisel, 0.5)
            .with_rate(OrbType::Jewelers, 0.1)
            .with_rate(OrbType::Chromatic, 0.1)
            .with_rate(OrbType::Chance, 0.1)
            .with_rate(OrbType::Alteration, 0.1)
            .with_rate(OrbType::GlassblowersBauble, 0.1)
            .with_rate(OrbType::Augmentation, 0.02)
            .with_rate(OrbType::Transmutation, 0.01)
    }
}
