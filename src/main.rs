//! Project Tracker Frontend Entry Point

use std::rc::Rc;

use project_tracker::{logging, page_config, Coordinator, Dom, TrackerConfig, WebDom};

fn main() {
    console_error_panic_hook::set_once();

    let config = match page_config() {
        Ok(config) => config,
        Err(err) => {
            logging::init(log::LevelFilter::Info);
            log::warn!("ignoring page config: {}", err);
            TrackerConfig::default()
        }
    };
    logging::init(config.log_level());

    let dom: Rc<dyn Dom> = match WebDom::from_window() {
        Ok(dom) => Rc::new(dom),
        Err(err) => {
            log::error!("tracker not started: {}", err);
            return;
        }
    };

    match Coordinator::initialize(dom, &config) {
        Ok(tracker) => {
            log::info!("tracker ready: {:?}", tracker.snapshot());
            // Handlers reference the lists weakly; keep them for the page lifetime.
            std::mem::forget(tracker);
        }
        Err(err) => log::error!("tracker not started: {}", err),
    }
}
