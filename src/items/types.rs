use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Probability tier of a drop table. `Always` is applied unconditionally;
/// the other four are each gated and rolled once per kill, in order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DropTier {
    Always,
    Common,
    Uncommon,
    Rare,
    VeryRare,
}

impl DropTier {
    /// Gated tiers in roll order.
    pub const GATED: [DropTier; 4] = [
        DropTier::Common,
        DropTier::Uncommon,
        DropTier::Rare,
        DropTier::VeryRare,
    ];
}

/// One entry of a drop table tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableItem {
    pub item_id: String,
    #[serde(default = "one")]
    pub min: u32,
    #[serde(default = "one")]
    pub max: u32,
    /// Selection weight relative to the other entries of the same tier.
    #[serde(default = "one")]
    pub weight: u32,
    /// Chance the selected entry is actually awarded, before modifiers.
    #[serde(default = "certain")]
    pub rarity: f64,
}

fn one() -> u32 {
    1
}

fn certain() -> f64 {
    1.0
}

impl DropTableItem {
    pub fn new(item_id: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            item_id: item_id.into(),
            min,
            max,
            weight: 1,
            rarity: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_rarity(mut self, rarity: f64) -> Self {
        self.rarity = rarity;
        self
    }
}

/// A monster's loot table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DropTable {
    pub always: Vec<DropTableItem>,
    pub common: Vec<DropTableItem>,
    pub uncommon: Vec<DropTableItem>,
    pub rare: Vec<DropTableItem>,
    pub very_rare: Vec<DropTableItem>,
}

impl DropTable {
    pub fn tier(&self, tier: DropTier) -> &[DropTableItem] {
        match tier {
            DropTier::Always => &self.always,
            DropTier::Common => &self.common,
            DropTier::Uncommon => &self.uncommon,
            DropTier::Rare => &self.rare,
            DropTier::VeryRare => &self.very_rare,
        }
    }

    /// Every entry with the tier it belongs to.
    pub fn entries(&self) -> impl Iterator<Item = (DropTier, &DropTableItem)> {
        [DropTier::Always]
            .into_iter()
            .chain(DropTier::GATED)
            .flat_map(move |tier| self.tier(tier).iter().map(move |item| (tier, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// An awarded item stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemDrop {
    pub item_id: String,
    pub quantity: u32,
}

impl ItemDrop {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaults_from_json() {
        let item: DropTableItem = serde_json::from_str(r#"{"item_id": "bones"}"#).unwrap();
        assert_eq!(item, DropTableItem::new("bones", 1, 1));
    }

    #[test]
    fn test_entries_visit_tiers_in_order() {
        let table = DropTable {
            always: vec![DropTableItem::new("bones", 1, 1)],
            rare: vec![DropTableItem::new("rune_sword", 1, 1)],
            common: vec![DropTableItem::new("coins", 10, 50)],
            ..Default::default()
        };
        let tiers: Vec<DropTier> = table.entries().map(|(tier, _)| tier).collect();
        assert_eq!(tiers, vec![DropTier::Always, DropTier::Common, DropTier::Rare]);
        assert!(!table.is_empty());
        assert!(DropTable::default().is_empty());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(DropTier::VeryRare.to_string(), "very_rare");
    }
}
