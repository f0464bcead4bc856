//! Small web-sys helpers shared by the page behaviors.
//!
//! Every lookup returns `Option` so a behavior whose markup is missing from
//! the page simply does nothing.

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn find(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn find_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Queries the whole document, starting from `<html>`.
pub fn find_in_document(selector: &str) -> Vec<Element> {
    document()
        .and_then(|doc| doc.document_element())
        .map(|root| find_all(&root, selector))
        .unwrap_or_default()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn focus(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.focus();
    }
}

/// Attaches `handler` for the lifetime of the page.
///
/// The listener is never removed, so the closure is leaked on purpose.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    register(target, event, handler, false);
}

pub fn listen_passive<E, F>(target: &EventTarget, event: &str, handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    register(target, event, handler, true);
}

fn register<E, F>(target: &EventTarget, event: &str, mut handler: F, passive: bool)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });

    let registered = if passive {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )
    } else {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    };

    if registered.is_err() {
        warn!("Could not register {} listener", event);
    }
    callback.forget();
}

/// Runs `init` once the document is interactive.
pub fn on_ready<F>(init: F)
where
    F: FnOnce() + 'static,
{
    let Some(document) = document() else {
        return;
    };
    if document.ready_state() != "loading" {
        init();
        return;
    }

    let mut init = Some(init);
    listen(&document, "DOMContentLoaded", move |_: Event| {
        if let Some(init) = init.take() {
            init();
        }
    });
}
