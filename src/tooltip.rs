//! Tooltip Controller
//!
//! Mounts a click-to-dismiss overlay and reports the dismissal once.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::TooltipConfig;
use crate::dom::{Callback, Dom, OverlayId, OverlaySpec};
use crate::error::TrackerResult;

#[derive(Debug, Clone)]
pub struct TooltipController {
    spec: OverlaySpec,
}

impl TooltipController {
    pub fn new(config: &TooltipConfig) -> Self {
        Self {
            spec: OverlaySpec {
                host: config.host(),
                position: config.position,
                class_name: config.class_name.clone(),
                text: config.text.clone(),
            },
        }
    }

    pub fn spec(&self) -> &OverlaySpec {
        &self.spec
    }

    /// Attach a new overlay. Clicking it removes it and calls `on_dismiss`;
    /// later clicks do nothing.
    pub fn open(&self, dom: &Rc<dyn Dom>, on_dismiss: Callback) -> TrackerResult<OverlayId> {
        let slot: Rc<Cell<Option<OverlayId>>> = Rc::new(Cell::new(None));
        let weak_dom = Rc::downgrade(dom);
        let on_click: Callback = {
            let slot = slot.clone();
            Rc::new(move || {
                let Some(overlay) = slot.take() else { return };
                if let Some(dom) = weak_dom.upgrade() {
                    if let Err(err) = dom.remove_overlay(overlay) {
                        log::error!("failed to detach tooltip: {}", err);
                    }
                }
                on_dismiss();
            })
        };
        let overlay = dom.mount_overlay(&self.spec, on_click)?;
        slot.set(Some(overlay));
        log::debug!("tooltip {} opened", overlay.0);
        Ok(overlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackerConfig;
    use crate::dom::{InsertPosition, MemoryDom, OverlayHost};

    fn setup() -> (Rc<MemoryDom>, Rc<dyn Dom>) {
        let memory = Rc::new(MemoryDom::with_lists(&TrackerConfig::default(), &["p1"], &[]));
        let dom: Rc<dyn Dom> = memory.clone();
        (memory, dom)
    }

    #[test]
    fn test_open_mounts_configured_overlay() {
        let (memory, dom) = setup();
        let tooltips = TooltipController::new(&TooltipConfig::default());
        let overlay = tooltips.open(&dom, Rc::new(|| {})).unwrap();

        let spec = memory.overlay_spec(overlay).unwrap();
        assert_eq!(spec.host, OverlayHost::Body);
        assert_eq!(spec.position, InsertPosition::Append);
        assert_eq!(spec.class_name, "card");
        assert_eq!(spec.text, "DUMMY!");
    }

    #[test]
    fn test_click_detaches_and_notifies_once() {
        let (memory, dom) = setup();
        let dismissed = Rc::new(Cell::new(0));
        let tooltips = TooltipController::new(&TooltipConfig::default());
        let counter = dismissed.clone();
        let overlay = tooltips
            .open(&dom, Rc::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        memory.click_overlay(overlay).unwrap();
        assert!(memory.overlays().is_empty());
        assert_eq!(dismissed.get(), 1);

        // Already gone from the document.
        assert!(memory.click_overlay(overlay).is_err());
        assert_eq!(dismissed.get(), 1);
    }

    #[test]
    fn test_missing_host_is_reported() {
        let (_memory, dom) = setup();
        let config = TooltipConfig {
            host_id: Some("sidebar".to_string()),
            ..TooltipConfig::default()
        };
        let tooltips = TooltipController::new(&config);
        assert!(tooltips.open(&dom, Rc::new(|| {})).is_err());
    }
}
