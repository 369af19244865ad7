//! In-memory document
//!
//! Lists of item nodes addressed by the same selectors the page uses,
//! with click dispatch for driving handlers without a browser.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{Callback, Dom, OverlayHost, OverlayId, OverlaySpec, ScrollMode, Trigger};
use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, ItemId};

struct MemoryButton {
    label: String,
    listeners: Vec<Callback>,
}

struct MemoryNode {
    buttons: Vec<MemoryButton>,
}

impl MemoryNode {
    fn button_index(&self, trigger: Trigger) -> Option<usize> {
        match trigger {
            _ if self.buttons.is_empty() => None,
            Trigger::MoreInfo => Some(0),
            Trigger::Switch => Some(self.buttons.len() - 1),
        }
    }
}

struct MemoryList {
    item_selector: String,
    list_selector: String,
    items: Vec<ItemId>,
}

struct MemoryOverlay {
    id: OverlayId,
    spec: OverlaySpec,
    listeners: Vec<Callback>,
}

#[derive(Default)]
struct MemoryState {
    lists: Vec<MemoryList>,
    nodes: HashMap<ItemId, MemoryNode>,
    hosts: Vec<String>,
    overlays: Vec<MemoryOverlay>,
    next_overlay: u64,
    last_scroll: Option<(ItemId, ScrollMode)>,
}

impl MemoryState {
    fn node(&self, id: &ItemId) -> TrackerResult<&MemoryNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| TrackerError::MissingElement(format!("#{}", id)))
    }

    fn button_mut(&mut self, id: &ItemId, trigger: Trigger) -> TrackerResult<&mut MemoryButton> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| TrackerError::MissingElement(format!("#{}", id)))?;
        let index = node
            .button_index(trigger)
            .ok_or_else(|| TrackerError::MissingElement(format!("#{} {}", id, trigger.selector())))?;
        Ok(&mut node.buttons[index])
    }
}

/// Document kept entirely in memory
#[derive(Default)]
pub struct MemoryDom {
    state: RefCell<MemoryState>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with both configured lists, each item carrying a
    /// "More Info" button and a switch button.
    pub fn with_lists(config: &TrackerConfig, active: &[&str], finished: &[&str]) -> Self {
        let dom = Self::new();
        for (category, ids) in [(Category::Active, active), (Category::Finished, finished)] {
            let list = config.list(category);
            dom.add_list(&list.item_selector(), &list.list_selector());
            dom.add_host(&list.container_id);
            for id in ids {
                // The list was registered just above.
                let _ = dom.add_item(
                    &list.list_selector(),
                    id,
                    &["More Info", category.switch_label()],
                );
            }
        }
        dom
    }

    pub fn add_list(&self, item_selector: &str, list_selector: &str) {
        self.state.borrow_mut().lists.push(MemoryList {
            item_selector: item_selector.to_string(),
            list_selector: list_selector.to_string(),
            items: Vec::new(),
        });
    }

    /// Element that overlays may be attached to by id
    pub fn add_host(&self, id: &str) {
        self.state.borrow_mut().hosts.push(id.to_string());
    }

    pub fn add_item(&self, list_selector: &str, id: &str, labels: &[&str]) -> TrackerResult<()> {
        let mut state = self.state.borrow_mut();
        let id = ItemId::from(id);
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.list_selector == list_selector)
            .ok_or_else(|| TrackerError::MissingContainer(list_selector.to_string()))?;
        list.items.push(id.clone());
        let buttons = labels
            .iter()
            .map(|label| MemoryButton {
                label: label.to_string(),
                listeners: Vec::new(),
            })
            .collect();
        state.nodes.insert(id, MemoryNode { buttons });
        Ok(())
    }

    /// Ids under the list node, in order
    pub fn list_items(&self, list_selector: &str) -> Vec<ItemId> {
        self.state
            .borrow()
            .lists
            .iter()
            .find(|l| l.list_selector == list_selector)
            .map(|l| l.items.clone())
            .unwrap_or_default()
    }

    pub fn label(&self, id: &ItemId, trigger: Trigger) -> Option<String> {
        let state = self.state.borrow();
        let node = state.nodes.get(id)?;
        node.button_index(trigger).map(|i| node.buttons[i].label.clone())
    }

    pub fn listener_count(&self, id: &ItemId, trigger: Trigger) -> usize {
        let state = self.state.borrow();
        state
            .nodes
            .get(id)
            .and_then(|node| node.button_index(trigger).map(|i| node.buttons[i].listeners.len()))
            .unwrap_or(0)
    }

    /// Mounted overlays in document order
    pub fn overlays(&self) -> Vec<OverlayId> {
        self.state.borrow().overlays.iter().map(|o| o.id).collect()
    }

    pub fn overlay_spec(&self, overlay: OverlayId) -> Option<OverlaySpec> {
        self.state
            .borrow()
            .overlays
            .iter()
            .find(|o| o.id == overlay)
            .map(|o| o.spec.clone())
    }

    pub fn last_scroll(&self) -> Option<(ItemId, ScrollMode)> {
        self.state.borrow().last_scroll.clone()
    }

    /// Fire every listener on the trigger, like a user click
    pub fn click(&self, id: &ItemId, trigger: Trigger) -> TrackerResult<()> {
        // Listeners may re-enter the document, so no borrow is held while they run.
        let listeners = self.state.borrow_mut().button_mut(id, trigger)?.listeners.clone();
        for listener in listeners {
            listener();
        }
        Ok(())
    }

    pub fn click_overlay(&self, overlay: OverlayId) -> TrackerResult<()> {
        let listeners = self
            .state
            .borrow()
            .overlays
            .iter()
            .find(|o| o.id == overlay)
            .map(|o| o.listeners.clone())
            .ok_or_else(|| TrackerError::MissingElement(format!("overlay {}", overlay.0)))?;
        for listener in listeners {
            listener();
        }
        Ok(())
    }
}

impl Dom for MemoryDom {
    fn item_ids(&self, selector: &str) -> TrackerResult<Vec<ItemId>> {
        Ok(self
            .state
            .borrow()
            .lists
            .iter()
            .filter(|l| l.item_selector == selector)
            .flat_map(|l| l.items.iter().cloned())
            .collect())
    }

    fn append_to(&self, id: &ItemId, selector: &str) -> TrackerResult<()> {
        let mut state = self.state.borrow_mut();
        state.node(id)?;
        let target = state
            .lists
            .iter()
            .position(|l| l.list_selector == selector)
            .ok_or_else(|| TrackerError::MissingContainer(selector.to_string()))?;
        for list in state.lists.iter_mut() {
            list.items.retain(|item| item != id);
        }
        state.lists[target].items.push(id.clone());
        Ok(())
    }

    fn scroll_into_view(&self, id: &ItemId, mode: ScrollMode) -> TrackerResult<()> {
        let mut state = self.state.borrow_mut();
        state.node(id)?;
        state.last_scroll = Some((id.clone(), mode));
        Ok(())
    }

    fn set_label(&self, id: &ItemId, trigger: Trigger, label: &str) -> TrackerResult<()> {
        self.state.borrow_mut().button_mut(id, trigger)?.label = label.to_string();
        Ok(())
    }

    fn listen(&self, id: &ItemId, trigger: Trigger, callback: Callback) -> TrackerResult<()> {
        self.state
            .borrow_mut()
            .button_mut(id, trigger)?
            .listeners
            .push(callback);
        Ok(())
    }

    fn clear_listeners(&self, id: &ItemId, trigger: Trigger) -> TrackerResult<()> {
        self.state.borrow_mut().button_mut(id, trigger)?.listeners.clear();
        Ok(())
    }

    fn mount_overlay(&self, spec: &OverlaySpec, on_click: Callback) -> TrackerResult<OverlayId> {
        let mut state = self.state.borrow_mut();
        if let OverlayHost::Element(host) = &spec.host {
            if !state.hosts.contains(host) {
                return Err(TrackerError::MissingElement(format!("#{}", host)));
            }
        }
        state.next_overlay += 1;
        let overlay = MemoryOverlay {
            id: OverlayId(state.next_overlay),
            spec: spec.clone(),
            listeners: vec![on_click],
        };
        let id = overlay.id;
        match spec.position {
            super::InsertPosition::Append => state.overlays.push(overlay),
            super::InsertPosition::Prepend => {
                let first = state
                    .overlays
                    .iter()
                    .position(|o| o.spec.host == spec.host)
                    .unwrap_or(state.overlays.len());
                state.overlays.insert(first, overlay);
            }
        }
        Ok(id)
    }

    fn remove_overlay(&self, overlay: OverlayId) -> TrackerResult<()> {
        let mut state = self.state.borrow_mut();
        let index = state
            .overlays
            .iter()
            .position(|o| o.id == overlay)
            .ok_or_else(|| TrackerError::MissingElement(format!("overlay {}", overlay.0)))?;
        state.overlays.remove(index);
        Ok(())
    }
}
