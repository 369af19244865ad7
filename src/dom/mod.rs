//! Document Access
//!
//! The primitive document operations the tracker is built on.
//! `WebDom` talks to the browser; `MemoryDom` keeps an in-memory tree with
//! the same behavior for tests and headless use.

mod memory;
mod web;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::models::ItemId;

pub use memory::MemoryDom;
pub use web::WebDom;

/// Click callback registered on a document node
pub type Callback = Rc<dyn Fn()>;

/// Actionable buttons of an item node.
/// `MoreInfo` is the first button, `Switch` the last; they are the same
/// element when the node has only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    MoreInfo,
    Switch,
}

impl Trigger {
    pub fn selector(&self) -> &'static str {
        match self {
            Trigger::MoreInfo => "button:first-of-type",
            Trigger::Switch => "button:last-of-type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    #[default]
    Smooth,
    Instant,
}

/// Where an overlay goes inside its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Last child (`beforeend`)
    #[default]
    Append,
    /// First child (`afterbegin`)
    Prepend,
}

impl InsertPosition {
    pub fn as_adjacent(&self) -> &'static str {
        match self {
            InsertPosition::Append => "beforeend",
            InsertPosition::Prepend => "afterbegin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayHost {
    Body,
    Element(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    pub host: OverlayHost,
    pub position: InsertPosition,
    pub class_name: String,
    pub text: String,
}

/// Handle of a mounted overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

/// Document operations used by the tracker.
///
/// Methods take `&self`; implementations keep their own interior state so
/// callbacks can call back into the document while it dispatches a click.
pub trait Dom {
    /// Ids of the nodes matching `selector`, in document order
    fn item_ids(&self, selector: &str) -> TrackerResult<Vec<ItemId>>;

    /// Move node `id` to the end of the node matching `selector`
    fn append_to(&self, id: &ItemId, selector: &str) -> TrackerResult<()>;

    fn scroll_into_view(&self, id: &ItemId, mode: ScrollMode) -> TrackerResult<()>;

    fn set_label(&self, id: &ItemId, trigger: Trigger, label: &str) -> TrackerResult<()>;

    fn listen(&self, id: &ItemId, trigger: Trigger, callback: Callback) -> TrackerResult<()>;

    /// Drop every click listener on the trigger element
    fn clear_listeners(&self, id: &ItemId, trigger: Trigger) -> TrackerResult<()>;

    fn mount_overlay(&self, spec: &OverlaySpec, on_click: Callback) -> TrackerResult<OverlayId>;

    fn remove_overlay(&self, overlay: OverlayId) -> TrackerResult<()>;
}
