//! List Item
//!
//! One tracked project node with a "more info" and a "switch" button.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Callback, Dom, Trigger};
use crate::error::TrackerResult;
use crate::models::{Category, ItemId, TooltipState};
use crate::relocator::ElementRelocator;
use crate::tooltip::TooltipController;

/// Called with the item's id when its switch button is clicked
pub type MoveOutHandler = Rc<dyn Fn(&ItemId)>;

pub struct ListItem {
    id: ItemId,
    category: Category,
    tooltip: Rc<Cell<TooltipState>>,
    move_out: MoveOutHandler,
}

impl std::fmt::Debug for ListItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListItem")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("tooltip", &self.tooltip.get())
            .finish()
    }
}

impl ListItem {
    /// Wrap an existing node and bind both of its buttons
    pub fn new(
        dom: &Rc<dyn Dom>,
        tooltips: &Rc<TooltipController>,
        id: ItemId,
        move_out: MoveOutHandler,
        category: Category,
    ) -> TrackerResult<Self> {
        let item = Self {
            id,
            category,
            tooltip: Rc::new(Cell::new(TooltipState::Closed)),
            move_out,
        };
        item.connect_more_info(dom, tooltips)?;
        item.connect_switch(&**dom)?;
        Ok(item)
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip.get()
    }

    /// Point the switch button at a new list
    pub fn rebind(&mut self, dom: &dyn Dom, move_out: MoveOutHandler, category: Category) -> TrackerResult<()> {
        self.move_out = move_out;
        self.category = category;
        self.connect_switch(dom)
    }

    fn connect_more_info(&self, dom: &Rc<dyn Dom>, tooltips: &Rc<TooltipController>) -> TrackerResult<()> {
        let weak_dom = Rc::downgrade(dom);
        let tooltips = tooltips.clone();
        let state = self.tooltip.clone();
        let id = self.id.clone();
        let on_click: Callback = Rc::new(move || {
            if let Some(dom) = weak_dom.upgrade() {
                show_more_info(&dom, &tooltips, &state, &id);
            }
        });
        dom.listen(&self.id, Trigger::MoreInfo, on_click)
    }

    fn connect_switch(&self, dom: &dyn Dom) -> TrackerResult<()> {
        ElementRelocator::strip_handlers(dom, &self.id, Trigger::Switch)?;
        dom.set_label(&self.id, Trigger::Switch, self.category.switch_label())?;
        let id = self.id.clone();
        let move_out = self.move_out.clone();
        dom.listen(&self.id, Trigger::Switch, Rc::new(move || move_out(&id)))
    }
}

fn show_more_info(
    dom: &Rc<dyn Dom>,
    tooltips: &TooltipController,
    state: &Rc<Cell<TooltipState>>,
    id: &ItemId,
) {
    if state.get() == TooltipState::Open {
        return;
    }
    let closed = state.clone();
    match tooltips.open(dom, Rc::new(move || closed.set(TooltipState::Closed))) {
        Ok(_) => state.set(TooltipState::Open),
        Err(err) => log::error!("[{}] could not open tooltip: {}", id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TooltipConfig, TrackerConfig};
    use crate::dom::MemoryDom;
    use std::cell::RefCell;

    struct Fixture {
        memory: Rc<MemoryDom>,
        dom: Rc<dyn Dom>,
        tooltips: Rc<TooltipController>,
        moved: Rc<RefCell<Vec<ItemId>>>,
    }

    impl Fixture {
        fn new() -> Self {
            let memory = Rc::new(MemoryDom::with_lists(&TrackerConfig::default(), &["p1"], &[]));
            let dom: Rc<dyn Dom> = memory.clone();
            Self {
                memory,
                dom,
                tooltips: Rc::new(TooltipController::new(&TooltipConfig::default())),
                moved: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn recorder(&self) -> MoveOutHandler {
            let moved = self.moved.clone();
            Rc::new(move |id: &ItemId| moved.borrow_mut().push(id.clone()))
        }

        fn item(&self) -> ListItem {
            ListItem::new(&self.dom, &self.tooltips, ItemId::from("p1"), self.recorder(), Category::Active)
                .unwrap()
        }
    }

    #[test]
    fn test_new_binds_switch_with_label() {
        let fx = Fixture::new();
        let item = fx.item();
        assert_eq!(fx.memory.label(item.id(), Trigger::Switch).as_deref(), Some("Finish"));

        fx.memory.click(item.id(), Trigger::Switch).unwrap();
        assert_eq!(*fx.moved.borrow(), vec![ItemId::from("p1")]);
    }

    #[test]
    fn test_rebind_replaces_previous_handler() {
        let fx = Fixture::new();
        let mut item = fx.item();
        let other = Rc::new(Cell::new(0));
        let counter = other.clone();
        item.rebind(
            &*fx.dom,
            Rc::new(move |_: &ItemId| counter.set(counter.get() + 1)),
            Category::Finished,
        )
        .unwrap();

        fx.memory.click(item.id(), Trigger::Switch).unwrap();
        assert_eq!(other.get(), 1);
        assert!(fx.moved.borrow().is_empty());
        assert_eq!(item.category(), Category::Finished);
        assert_eq!(fx.memory.label(item.id(), Trigger::Switch).as_deref(), Some("Activate"));
        assert_eq!(fx.memory.listener_count(item.id(), Trigger::Switch), 1);
    }

    #[test]
    fn test_more_info_opens_single_tooltip() {
        let fx = Fixture::new();
        let item = fx.item();
        fx.memory.click(item.id(), Trigger::MoreInfo).unwrap();
        fx.memory.click(item.id(), Trigger::MoreInfo).unwrap();

        assert_eq!(fx.memory.overlays().len(), 1);
        assert_eq!(item.tooltip_state(), TooltipState::Open);
    }

    #[test]
    fn test_dismiss_allows_reopen() {
        let fx = Fixture::new();
        let item = fx.item();
        fx.memory.click(item.id(), Trigger::MoreInfo).unwrap();
        let first = fx.memory.overlays()[0];

        fx.memory.click_overlay(first).unwrap();
        assert_eq!(item.tooltip_state(), TooltipState::Closed);
        assert!(fx.memory.overlays().is_empty());

        fx.memory.click(item.id(), Trigger::MoreInfo).unwrap();
        let reopened = fx.memory.overlays();
        assert_eq!(reopened.len(), 1);
        assert_ne!(reopened[0], first);
    }

    #[test]
    fn test_missing_node_fails_construction() {
        let fx = Fixture::new();
        let result = ListItem::new(
            &fx.dom,
            &fx.tooltips,
            ItemId::from("ghost"),
            fx.recorder(),
            Category::Active,
        );
        assert!(result.is_err());
    }
}
