use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Window};

use crate::config::HEADER_SCROLL_THRESHOLD;
use crate::dom;

pub fn is_scrolled(offset: f64) -> bool {
    offset > HEADER_SCROLL_THRESHOLD
}

/// Coalesces bursts of events into one update per animation frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: Cell<bool>,
}

impl FrameGate {
    /// True when the caller should request a frame; false while one is
    /// already queued.
    pub fn schedule(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn complete(&self) {
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

struct HeaderWatcher {
    header: Element,
    window: Window,
    gate: FrameGate,
}

impl HeaderWatcher {
    fn update(&self) {
        let offset = self.window.scroll_y().unwrap_or(0.0);
        dom::set_class(&self.header, "is-scrolled", is_scrolled(offset));
        self.gate.complete();
    }
}

pub fn init() {
    let Some(header) = dom::by_id("header") else {
        debug!("No #header on page, skipping scroll watcher");
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let watcher = Rc::new(HeaderWatcher {
        header,
        window: window.clone(),
        gate: FrameGate::default(),
    });

    let frame = {
        let watcher = Rc::clone(&watcher);
        Closure::<dyn FnMut()>::new(move || watcher.update())
    };

    {
        let watcher = Rc::clone(&watcher);
        let target = window.clone();
        dom::listen_passive(&target, "scroll", move |_: Event| {
            if watcher.gate.schedule()
                && window
                    .request_animation_frame(frame.as_ref().unchecked_ref())
                    .is_err()
            {
                watcher.gate.complete();
            }
        });
    }

    // Page may load already scrolled via an anchor link.
    watcher.update();
    info!("Header scroll watcher ready");
}
