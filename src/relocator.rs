//! Element Relocator
//!
//! Moves item nodes between lists and clears stale listeners.

use crate::dom::{Dom, ScrollMode, Trigger};
use crate::error::TrackerResult;
use crate::models::ItemId;

pub struct ElementRelocator;

impl ElementRelocator {
    /// Append node `id` as the last child of `destination` and scroll it into view.
    /// The node is moved, not recreated.
    pub fn relocate(dom: &dyn Dom, id: &ItemId, destination: &str, mode: ScrollMode) -> TrackerResult<()> {
        dom.append_to(id, destination)?;
        dom.scroll_into_view(id, mode)
    }

    /// Remove every listener from the trigger so the next bind is the only one
    pub fn strip_handlers(dom: &dyn Dom, id: &ItemId, trigger: Trigger) -> TrackerResult<()> {
        dom.clear_listeners(id, trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;
    use crate::dom::MemoryDom;
    use crate::error::TrackerError;
    use std::rc::Rc;

    #[test]
    fn test_relocate_appends_and_scrolls() {
        let dom = MemoryDom::with_lists(&TrackerConfig::default(), &["p1"], &["p2"]);
        let id = ItemId::from("p1");
        ElementRelocator::relocate(&dom, &id, "#finished-projects ul", ScrollMode::Smooth).unwrap();
        assert_eq!(
            dom.list_items("#finished-projects ul"),
            vec![ItemId::from("p2"), id.clone()]
        );
        assert_eq!(dom.last_scroll(), Some((id, ScrollMode::Smooth)));
    }

    #[test]
    fn test_relocate_to_missing_container_does_not_scroll() {
        let dom = MemoryDom::with_lists(&TrackerConfig::default(), &["p1"], &[]);
        let err = ElementRelocator::relocate(&dom, &ItemId::from("p1"), "#archive ul", ScrollMode::Smooth)
            .unwrap_err();
        assert!(matches!(err, TrackerError::MissingContainer(_)));
        assert_eq!(dom.last_scroll(), None);
    }

    #[test]
    fn test_strip_handlers_leaves_more_info_alone() {
        let dom = MemoryDom::with_lists(&TrackerConfig::default(), &["p1"], &[]);
        let id = ItemId::from("p1");
        dom.listen(&id, Trigger::MoreInfo, Rc::new(|| {})).unwrap();
        dom.listen(&id, Trigger::Switch, Rc::new(|| {})).unwrap();
        dom.listen(&id, Trigger::Switch, Rc::new(|| {})).unwrap();

        ElementRelocator::strip_handlers(&dom, &id, Trigger::Switch).unwrap();
        assert_eq!(dom.listener_count(&id, Trigger::Switch), 0);
        assert_eq!(dom.listener_count(&id, Trigger::MoreInfo), 1);
    }
}
