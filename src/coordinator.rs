//! Coordinator
//!
//! Owns both lists and cross-wires them: each list's move-out feeds the
//! other list's inserter. After `initialize` everything is driven by clicks.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::collection::ItemCollection;
use crate::config::TrackerConfig;
use crate::dom::Dom;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, ItemId, TrackerSnapshot};
use crate::tooltip::TooltipController;

pub struct Coordinator {
    active: Rc<RefCell<ItemCollection>>,
    finished: Rc<RefCell<ItemCollection>>,
}

impl Coordinator {
    pub fn initialize(dom: Rc<dyn Dom>, config: &TrackerConfig) -> TrackerResult<Self> {
        config.validate()?;
        let tooltips = Rc::new(TooltipController::new(&config.tooltip));
        let active = ItemCollection::new(dom.clone(), &tooltips, config, Category::Active)?;
        let finished = ItemCollection::new(dom, &tooltips, config, Category::Finished)?;

        active
            .borrow_mut()
            .set_peer_inserter(ItemCollection::inserter(&finished));
        finished
            .borrow_mut()
            .set_peer_inserter(ItemCollection::inserter(&active));

        Ok(Self { active, finished })
    }

    fn cell(&self, category: Category) -> &Rc<RefCell<ItemCollection>> {
        match category {
            Category::Active => &self.active,
            Category::Finished => &self.finished,
        }
    }

    pub fn collection(&self, category: Category) -> Ref<'_, ItemCollection> {
        self.cell(category).borrow()
    }

    /// Which list currently owns `id`
    pub fn category_of(&self, id: &ItemId) -> Option<Category> {
        [Category::Active, Category::Finished]
            .into_iter()
            .find(|category| self.collection(*category).contains(id))
    }

    /// Move `id` to the other list, as its switch button would
    pub fn switch(&self, id: &ItemId) -> TrackerResult<Category> {
        let from = self.category_of(id).ok_or_else(|| TrackerError::NotFound {
            id: id.clone(),
            category: Category::Active,
        })?;
        ItemCollection::move_out(self.cell(from), id)?;
        Ok(from.opposite())
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            active: self.active.borrow().ids(),
            finished: self.finished.borrow().ids(),
        }
    }
}
