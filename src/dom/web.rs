//! Browser document via web-sys

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::{Callback, Dom, OverlayHost, OverlayId, OverlaySpec, ScrollMode, Trigger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::ItemId;

type ClickClosure = Closure<dyn FnMut()>;

#[derive(Default)]
struct Registry {
    /// Listeners per button element; kept so they can be removed later
    listeners: Vec<(Element, ClickClosure)>,
    overlays: HashMap<OverlayId, (Element, ClickClosure)>,
    next_overlay: u64,
}

/// The live page document
pub struct WebDom {
    document: Document,
    registry: RefCell<Registry>,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            registry: RefCell::new(Registry::default()),
        }
    }

    pub fn from_window() -> TrackerResult<Self> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or(TrackerError::NoDocument)?;
        Ok(Self::new(document))
    }

    fn element(&self, id: &ItemId) -> TrackerResult<Element> {
        self.document
            .get_element_by_id(id.as_str())
            .ok_or_else(|| TrackerError::MissingElement(format!("#{}", id)))
    }

    fn button(&self, id: &ItemId, trigger: Trigger) -> TrackerResult<Element> {
        self.element(id)?
            .query_selector(trigger.selector())?
            .ok_or_else(|| TrackerError::MissingElement(format!("#{} {}", id, trigger.selector())))
    }

    fn host(&self, host: &OverlayHost) -> TrackerResult<Element> {
        match host {
            OverlayHost::Body => self
                .document
                .body()
                .map(Element::from)
                .ok_or(TrackerError::NoDocument),
            OverlayHost::Element(id) => self
                .document
                .get_element_by_id(id)
                .ok_or_else(|| TrackerError::MissingElement(format!("#{}", id))),
        }
    }
}

fn click_closure(callback: Callback) -> ClickClosure {
    Closure::<dyn FnMut()>::new(move || callback())
}

/// Free closures on the next tick.
/// A listener can remove itself while it runs; dropping it right away
/// would invalidate the closure mid-call.
fn retire(closures: Vec<ClickClosure>) {
    if closures.is_empty() {
        return;
    }
    gloo_timers::callback::Timeout::new(0, move || drop(closures)).forget();
}

impl Dom for WebDom {
    fn item_ids(&self, selector: &str) -> TrackerResult<Vec<ItemId>> {
        let nodes = self.document.query_selector_all(selector)?;
        let mut ids = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let id = element.id();
            if id.is_empty() {
                log::warn!("skipping item without id under {}", selector);
                continue;
            }
            ids.push(ItemId::from(id));
        }
        Ok(ids)
    }

    fn append_to(&self, id: &ItemId, selector: &str) -> TrackerResult<()> {
        let element = self.element(id)?;
        let destination = self
            .document
            .query_selector(selector)?
            .ok_or_else(|| TrackerError::MissingContainer(selector.to_string()))?;
        destination.append_with_node_1(&element)?;
        Ok(())
    }

    fn scroll_into_view(&self, id: &ItemId, mode: ScrollMode) -> TrackerResult<()> {
        let element = self.element(id)?;
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(match mode {
            ScrollMode::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollMode::Instant => web_sys::ScrollBehavior::Instant,
        });
        element.scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }

    fn set_label(&self, id: &ItemId, trigger: Trigger, label: &str) -> TrackerResult<()> {
        self.button(id, trigger)?.set_text_content(Some(label));
        Ok(())
    }

    fn listen(&self, id: &ItemId, trigger: Trigger, callback: Callback) -> TrackerResult<()> {
        let button = self.button(id, trigger)?;
        let closure = click_closure(callback);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        self.registry.borrow_mut().listeners.push((button, closure));
        Ok(())
    }

    fn clear_listeners(&self, id: &ItemId, trigger: Trigger) -> TrackerResult<()> {
        let button = self.button(id, trigger)?;
        let mut removed = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            let mut kept = Vec::with_capacity(registry.listeners.len());
            for (element, closure) in registry.listeners.drain(..) {
                if element == button {
                    removed.push(closure);
                } else {
                    kept.push((element, closure));
                }
            }
            registry.listeners = kept;
        }
        for closure in &removed {
            button.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        }
        retire(removed);
        Ok(())
    }

    fn mount_overlay(&self, spec: &OverlaySpec, on_click: Callback) -> TrackerResult<OverlayId> {
        let host = self.host(&spec.host)?;
        let element = self.document.create_element("div")?;
        element.set_class_name(&spec.class_name);
        element.set_text_content(Some(&spec.text));
        let closure = click_closure(on_click);
        element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        host.insert_adjacent_element(spec.position.as_adjacent(), &element)?;

        let mut registry = self.registry.borrow_mut();
        registry.next_overlay += 1;
        let id = OverlayId(registry.next_overlay);
        registry.overlays.insert(id, (element, closure));
        Ok(id)
    }

    fn remove_overlay(&self, overlay: OverlayId) -> TrackerResult<()> {
        let (element, closure) = self
            .registry
            .borrow_mut()
            .overlays
            .remove(&overlay)
            .ok_or_else(|| TrackerError::MissingElement(format!("overlay {}", overlay.0)))?;
        element.remove();
        retire(vec![closure]);
        Ok(())
    }
}
