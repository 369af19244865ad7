//! Item Collection
//!
//! The ordered items of one list. Items leave through `move_out`, which hands
//! them by value to the peer list's inserter.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{ListConfig, TrackerConfig};
use crate::dom::{Dom, ScrollMode};
use crate::error::{TrackerError, TrackerResult};
use crate::item::{ListItem, MoveOutHandler};
use crate::models::{Category, ItemId};
use crate::relocator::ElementRelocator;
use crate::tooltip::TooltipController;

/// Receives an item leaving the other list
pub type Inserter = Rc<dyn Fn(ListItem) -> TrackerResult<()>>;

pub struct ItemCollection {
    category: Category,
    list: ListConfig,
    scroll: ScrollMode,
    dom: Rc<dyn Dom>,
    items: Vec<ListItem>,
    peer: Option<Inserter>,
    this: Weak<RefCell<ItemCollection>>,
}

impl ItemCollection {
    /// Build the collection from the item nodes already in the page
    pub fn new(
        dom: Rc<dyn Dom>,
        tooltips: &Rc<TooltipController>,
        config: &TrackerConfig,
        category: Category,
    ) -> TrackerResult<Rc<RefCell<Self>>> {
        let list = config.list(category).clone();
        let collection = Rc::new_cyclic(|this| {
            RefCell::new(Self {
                category,
                list: list.clone(),
                scroll: config.scroll,
                dom: dom.clone(),
                items: Vec::new(),
                peer: None,
                this: this.clone(),
            })
        });

        let handler = collection.borrow().move_out_handler();
        for id in dom.item_ids(&list.item_selector())? {
            if collection.borrow().contains(&id) {
                log::warn!("[{}] duplicate item {} in markup, skipping", category, id);
                continue;
            }
            let item = ListItem::new(&dom, tooltips, id, handler.clone(), category)?;
            collection.borrow_mut().items.push(item);
        }
        log::info!("[{}] loaded {} items", category, collection.borrow().len());
        Ok(collection)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    /// Register where items leaving this list go
    pub fn set_peer_inserter(&mut self, inserter: Inserter) {
        self.peer = Some(inserter);
    }

    /// Inserter handing items to `collection`, for the peer list to call
    pub fn inserter(collection: &Rc<RefCell<Self>>) -> Inserter {
        let weak = Rc::downgrade(collection);
        let category = collection.borrow().category;
        Rc::new(move |item: ListItem| {
            let collection = weak.upgrade().ok_or(TrackerError::Detached(category))?;
            let result = collection.borrow_mut().insert(item);
            result
        })
    }

    /// Take ownership of an item from the other list: append it, move its
    /// node under this list and point its switch button here.
    pub fn insert(&mut self, item: ListItem) -> TrackerResult<()> {
        if self.contains(item.id()) {
            return Err(TrackerError::Duplicate {
                id: item.id().clone(),
                category: self.category,
            });
        }
        let handler = self.move_out_handler();
        let dom = self.dom.clone();
        let destination = self.list.list_selector();
        let category = self.category;
        let scroll = self.scroll;

        self.items.push(item);
        let Some(item) = self.items.last_mut() else {
            return Ok(());
        };
        ElementRelocator::relocate(&*dom, item.id(), &destination, scroll)?;
        item.rebind(&*dom, handler, category)
    }

    /// Remove `id` from this list and hand it to the peer list.
    ///
    /// The item leaves this list before the peer sees it, so it is owned by
    /// exactly one list at every point.
    pub fn move_out(collection: &Rc<RefCell<Self>>, id: &ItemId) -> TrackerResult<()> {
        let (item, peer, category) = {
            let mut this = collection.borrow_mut();
            let category = this.category;
            let index = this
                .items
                .iter()
                .position(|item| item.id() == id)
                .ok_or_else(|| TrackerError::NotFound {
                    id: id.clone(),
                    category,
                })?;
            let peer = this.peer.clone().ok_or(TrackerError::PeerMissing(category))?;
            (this.items.remove(index), peer, category)
        };
        peer(item)?;
        log::info!("[{}] moved {} to {}", category, id, category.opposite());
        Ok(())
    }

    fn move_out_handler(&self) -> MoveOutHandler {
        let weak = self.this.clone();
        let category = self.category;
        Rc::new(move |id: &ItemId| {
            let Some(collection) = weak.upgrade() else {
                log::error!("[{}] switch clicked for {} after the list was dropped", category, id);
                return;
            };
            if let Err(err) = ItemCollection::move_out(&collection, id) {
                log::error!("[{}] switch failed: {}", category, err);
            }
        })
    }
}
