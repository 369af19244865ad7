//! Tracker Configuration
//!
//! Every field has a default matching the stock page markup, so an empty
//! object (or no config at all) is valid.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::dom::{InsertPosition, OverlayHost, ScrollMode};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    pub active: ListConfig,
    pub finished: ListConfig,
    pub tooltip: TooltipConfig,
    pub scroll: ScrollMode,
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            active: ListConfig::new("active-projects"),
            finished: ListConfig::new("finished-projects"),
            tooltip: TooltipConfig::default(),
            scroll: ScrollMode::Smooth,
            log_level: "info".to_string(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config object handed over from JavaScript.
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> TrackerResult<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        for category in [Category::Active, Category::Finished] {
            if self.list(category).container_id.trim().is_empty() {
                return Err(TrackerError::Config(format!(
                    "{} list has an empty container id",
                    category
                )));
            }
        }
        if self.active.container_id == self.finished.container_id {
            return Err(TrackerError::Config(format!(
                "both lists use container {}",
                self.active.container_id
            )));
        }
        if let Some(host) = &self.tooltip.host_id {
            if host.trim().is_empty() {
                return Err(TrackerError::Config("tooltip host id is empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn list(&self, category: Category) -> &ListConfig {
        match category {
            Category::Active => &self.active,
            Category::Finished => &self.finished,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Where one category's items live in the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListConfig {
    pub container_id: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new("")
    }
}

impl ListConfig {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    /// Selector matching every item node of the list
    pub fn item_selector(&self) -> String {
        format!("#{} li", self.container_id)
    }

    /// Selector of the node items get appended to
    pub fn list_selector(&self) -> String {
        format!("#{} ul", self.container_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    /// Element id to attach overlays to; the body when unset
    pub host_id: Option<String>,
    pub position: InsertPosition,
    pub class_name: String,
    pub text: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            host_id: None,
            position: InsertPosition::Append,
            class_name: "card".to_string(),
            text: "DUMMY!".to_string(),
        }
    }
}

impl TooltipConfig {
    pub fn host(&self) -> OverlayHost {
        match &self.host_id {
            Some(id) => OverlayHost::Element(id.clone()),
            None => OverlayHost::Body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_match_page_markup() {
        let config = TrackerConfig::default();
        assert_eq!(config.active.item_selector(), "#active-projects li");
        assert_eq!(config.finished.list_selector(), "#finished-projects ul");
        assert_eq!(config.tooltip.host(), OverlayHost::Body);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TrackerConfig::from_json(
            r#"{"tooltip": {"hostId": "active-projects", "position": "prepend"}, "scroll": "instant"}"#,
        )
        .unwrap();
        assert_eq!(config.active.container_id, "active-projects");
        assert_eq!(config.tooltip.position, InsertPosition::Prepend);
        assert_eq!(config.tooltip.text, "DUMMY!");
        assert_eq!(config.scroll, ScrollMode::Instant);
        assert_eq!(
            config.tooltip.host(),
            OverlayHost::Element("active-projects".to_string())
        );
    }

    #[test]
    fn test_same_container_rejected() {
        let err = TrackerConfig::from_json(
            r#"{"active": {"containerId": "x"}, "finished": {"containerId": "x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = TrackerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TrackerError::ConfigParse(_)));
    }

    #[test]
    fn test_log_level_falls_back_to_info() {
        let mut config = TrackerConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
