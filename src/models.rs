//! Tracker Models
//!
//! Plain data shared by every layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// DOM id of an item node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which list currently owns an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Active,
    Finished,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Active => "active",
            Category::Finished => "finished",
        }
    }

    /// Text on the switch button of an item in this list
    pub fn switch_label(&self) -> &'static str {
        match self {
            Category::Active => "Finish",
            Category::Finished => "Activate",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Category::Active => Category::Finished,
            Category::Finished => Category::Active,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tooltip lifecycle of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipState {
    #[default]
    Closed,
    Open,
}

/// Ids held by each list, in display order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub active: Vec<ItemId>,
    pub finished: Vec<ItemId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_labels() {
        assert_eq!(Category::Active.switch_label(), "Finish");
        assert_eq!(Category::Finished.switch_label(), "Activate");
    }

    #[test]
    fn test_opposite_is_involution() {
        for category in [Category::Active, Category::Finished] {
            assert_ne!(category.opposite(), category);
            assert_eq!(category.opposite().opposite(), category);
        }
    }

    #[test]
    fn test_snapshot_serializes_ids_as_strings() {
        let snapshot = TrackerSnapshot {
            active: vec![ItemId::from("p2")],
            finished: vec![ItemId::from("p1")],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"active":["p2"],"finished":["p1"]}"#);
    }
}
