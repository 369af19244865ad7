//! Tracker Errors
//!
//! Every fallible operation returns `TrackerResult`. Event handlers cannot
//! hand errors back to the document, so they log them instead.

use crate::models::{Category, ItemId};

/// Common result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Move-out asked for an id the collection does not own
    #[error("Item {id} is not in the {category} list")]
    NotFound { id: ItemId, category: Category },

    #[error("Item {id} is already in the {category} list")]
    Duplicate { id: ItemId, category: Category },

    #[error("The {0} list has no peer list to move items into")]
    PeerMissing(Category),

    #[error("No element matches {0}")]
    MissingElement(String),

    #[error("No container matches selector {0}")]
    MissingContainer(String),

    #[error("No document available")]
    NoDocument,

    /// A callback outlived the collection it was bound to
    #[error("The {0} list has been dropped")]
    Detached(Category),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for TrackerError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        TrackerError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_item_and_list() {
        let err = TrackerError::NotFound {
            id: ItemId::from("p9"),
            category: Category::Finished,
        };
        assert_eq!(err.to_string(), "Item p9 is not in the finished list");
    }

    #[test]
    fn test_config_parse_converts_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrackerError = parse.into();
        assert!(matches!(err, TrackerError::ConfigParse(_)));
    }
}
