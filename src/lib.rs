//! Project Tracker
//!
//! Two lists of projects ("active", "finished") wired so that each item's
//! switch button moves it to the other list, plus a click-to-dismiss
//! tooltip per item. All document access goes through the `Dom` trait.

pub mod collection;
pub mod config;
pub mod coordinator;
pub mod dom;
pub mod error;
pub mod item;
pub mod logging;
pub mod models;
pub mod relocator;
pub mod tooltip;


pub use collection::{Inserter, ItemCollection};
pub use config::{ListConfig, TooltipConfig, TrackerConfig};
pub use coordinator::Coordinator;
pub use dom::{Dom, MemoryDom, Trigger, WebDom};
pub use error::{TrackerError, TrackerResult};
pub use item::{ListItem, MoveOutHandler};
pub use models::{Category, ItemId, TooltipState, TrackerSnapshot};
pub use relocator::ElementRelocator;
pub use tooltip::TooltipController;

/// Global the page may set to override the defaults
pub const PAGE_CONFIG_KEY: &str = "projectTrackerConfig";

/// Read `window.projectTrackerConfig`, falling back to defaults when absent
pub fn page_config() -> TrackerResult<TrackerConfig> {
    let Some(window) = web_sys::window() else {
        return Err(TrackerError::NoDocument);
    };
    let value = js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(PAGE_CONFIG_KEY))?;
    TrackerConfig::from_js(value)
}
