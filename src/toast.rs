use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::Element;

use crate::config::{TOAST_HIDE_TRANSITION_MS, TOAST_VISIBLE_MS};
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class_name(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success is-visible",
            ToastKind::Error => "toast toast--error is-visible",
        }
    }
}

/// Tracks which toast currently owns the slot. Timers started for an older
/// toast see a stale generation and leave the newer one alone.
#[derive(Debug, Default)]
pub struct ToastSlot {
    generation: Cell<u64>,
}

impl ToastSlot {
    pub fn begin(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}

/// The single notification banner at the bottom of the page.
pub struct Toast {
    elements: Option<(Element, Element)>,
    slot: ToastSlot,
}

impl Toast {
    pub fn attach() -> Rc<Self> {
        let elements = dom::by_id("toast").and_then(|root| {
            let message = dom::find(&root, ".toast__message")?;
            Some((root, message))
        });
        if elements.is_none() {
            debug!("No toast markup, notifications are disabled");
        }
        Rc::new(Self {
            elements,
            slot: ToastSlot::default(),
        })
    }

    /// Shows `message`, replacing whatever toast is up.
    pub fn show(self: &Rc<Self>, message: &str, kind: ToastKind) {
        let Some((root, text)) = &self.elements else {
            return;
        };
        let generation = self.slot.begin();

        root.set_class_name(kind.class_name());
        text.set_text_content(Some(message));
        let _ = root.remove_attribute("hidden");

        let toast = Rc::clone(self);
        Timeout::new(TOAST_VISIBLE_MS, move || toast.fade(generation)).forget();
    }

    fn fade(self: Rc<Self>, generation: u64) {
        let Some((root, _)) = &self.elements else {
            return;
        };
        if !self.slot.is_current(generation) {
            return;
        }
        dom::set_class(root, "is-visible", false);

        let toast = Rc::clone(&self);
        Timeout::new(TOAST_HIDE_TRANSITION_MS, move || {
            if let Some((root, _)) = &toast.elements {
                if toast.slot.is_current(generation) {
                    let _ = root.set_attribute("hidden", "");
                }
            }
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_toast_invalidates_older_timers() {
        let slot = ToastSlot::default();
        let first = slot.begin();
        assert!(slot.is_current(first));

        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn kind_maps_to_css_modifier() {
        assert_eq!(ToastKind::Error.class_name(), "toast toast--error is-visible");
        assert!(ToastKind::Success.class_name().contains("toast--success"));
    }
}
