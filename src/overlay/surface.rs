use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};

use super::{Closed, OverlayKind, OverlayStack};
use crate::dom;

/// Something the coordinator can reveal and dismiss.
pub trait OverlaySurface {
    fn show(&self);
    fn hide(&self);
}

/// Page-level scroll suppression. Remembers the body's own `overflow`
/// value so releasing the lock puts it back exactly.
#[derive(Default)]
pub struct ScrollLock {
    saved_overflow: RefCell<Option<String>>,
}

impl ScrollLock {
    pub fn is_engaged(&self) -> bool {
        self.saved_overflow.borrow().is_some()
    }

    pub fn engage(&self) {
        if self.is_engaged() {
            return;
        }
        let Some(body) = dom::document().and_then(|doc| doc.body()) else {
            return;
        };
        let style = body.style();
        let previous = style.get_property_value("overflow").unwrap_or_default();
        let _ = style.set_property("overflow", "hidden");
        *self.saved_overflow.borrow_mut() = Some(previous);
    }

    pub fn release(&self) {
        let Some(previous) = self.saved_overflow.borrow_mut().take() else {
            return;
        };
        let Some(body) = dom::document().and_then(|doc| doc.body()) else {
            return;
        };
        let style = body.style();
        let _ = if previous.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", &previous)
        };
    }
}

/// A server-rendered modal: `hidden` while closed, `is-open` while shown.
pub struct ModalSurface {
    root: Element,
    opener: RefCell<Option<HtmlElement>>,
    on_hide: Option<Box<dyn Fn()>>,
}

impl ModalSurface {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            opener: RefCell::new(None),
            on_hide: None,
        }
    }

    /// Runs after the modal is hidden, e.g. to drop rendered content.
    pub fn on_hide(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_hide = Some(Box::new(hook));
        self
    }
}

impl OverlaySurface for ModalSurface {
    fn show(&self) {
        *self.opener.borrow_mut() = dom::document()
            .and_then(|doc| doc.active_element())
            .and_then(|active| active.dyn_into::<HtmlElement>().ok());

        let _ = self.root.remove_attribute("hidden");
        let _ = self.root.set_attribute("aria-hidden", "false");
        dom::set_class(&self.root, "is-open", true);

        if let Some(close) = dom::find(&self.root, "[data-modal-close]") {
            dom::focus(&close);
        }
    }

    fn hide(&self) {
        dom::set_class(&self.root, "is-open", false);
        let _ = self.root.set_attribute("aria-hidden", "true");
        let _ = self.root.set_attribute("hidden", "");

        if let Some(hook) = &self.on_hide {
            hook();
        }
        if let Some(opener) = self.opener.borrow_mut().take() {
            let _ = opener.focus();
        }
    }
}

/// The mobile navigation drawer.
pub struct MenuSurface {
    pub container: Element,
    pub toggle: Element,
    pub menu: Element,
}

impl OverlaySurface for MenuSurface {
    fn show(&self) {
        dom::set_class(&self.container, "is-menu-open", true);
        let _ = self.toggle.set_attribute("aria-expanded", "true");
        let _ = self.menu.set_attribute("aria-hidden", "false");
    }

    fn hide(&self) {
        dom::set_class(&self.container, "is-menu-open", false);
        let _ = self.toggle.set_attribute("aria-expanded", "false");
        let _ = self.menu.set_attribute("aria-hidden", "true");
    }
}

/// Owns the overlay stack, the surfaces behind it and the scroll lock.
#[derive(Default)]
pub struct Overlays {
    stack: RefCell<OverlayStack>,
    surfaces: RefCell<HashMap<OverlayKind, Rc<dyn OverlaySurface>>>,
    lock: ScrollLock,
}

impl Overlays {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn register(&self, kind: OverlayKind, surface: Rc<dyn OverlaySurface>) {
        self.surfaces.borrow_mut().insert(kind, surface);
    }

    fn surface(&self, kind: OverlayKind) -> Option<Rc<dyn OverlaySurface>> {
        self.surfaces.borrow().get(&kind).cloned()
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.stack.borrow().is_open(kind)
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_engaged()
    }

    pub fn open(&self, kind: OverlayKind) {
        let opened = self.stack.borrow_mut().open(kind);
        if opened.newly_opened {
            debug!("Opening {:?}", kind);
            if let Some(surface) = self.surface(kind) {
                surface.show();
            }
        }
        if opened.lock_acquired {
            self.lock.engage();
        }
    }

    pub fn close(&self, kind: OverlayKind) {
        let closed = self.stack.borrow_mut().close(kind);
        self.finish(closed);
    }

    pub fn close_topmost(&self) -> bool {
        let closed = self.stack.borrow_mut().close_topmost();
        let any = !closed.closed.is_empty();
        self.finish(closed);
        any
    }

    pub fn toggle(&self, kind: OverlayKind) {
        if self.is_open(kind) {
            self.close(kind);
        } else {
            self.open(kind);
        }
    }

    fn finish(&self, closed: Closed) {
        for kind in closed.closed {
            debug!("Closing {:?}", kind);
            if let Some(surface) = self.surface(kind) {
                surface.hide();
            }
        }
        if closed.lock_released {
            self.lock.release();
        }
    }

    /// Escape dismisses whatever sits on top.
    pub fn listen_for_escape(self: &Rc<Self>) {
        let Some(document) = dom::document() else {
            return;
        };
        let overlays = Rc::clone(self);
        dom::listen(&document, "keydown", move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "Escape" | "Esc") && overlays.close_topmost() {
                event.prevent_default();
            }
        });
    }

    /// Close buttons and the backdrop inside `root` dismiss `kind` only.
    pub fn bind_dismissal(self: &Rc<Self>, kind: OverlayKind, root: &Element) {
        for control in dom::find_all(root, "[data-modal-close], .modal__backdrop") {
            let overlays = Rc::clone(self);
            dom::listen(&control, "click", move |event: MouseEvent| {
                event.prevent_default();
                overlays.close(kind);
            });
        }
    }
}
