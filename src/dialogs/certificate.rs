use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, MouseEvent};

use crate::dom;
use crate::overlay::{ModalSurface, OverlayKind, Overlays};

pub fn init(overlays: &Rc<Overlays>) {
    let Some(modal) = dom::by_id("cert-modal") else {
        debug!("No certificate lightbox on page");
        return;
    };
    let Some(image) = dom::find(&modal, "#cert-modal-img")
        .and_then(|image| image.dyn_into::<HtmlImageElement>().ok())
    else {
        return;
    };

    overlays.register(OverlayKind::Certificate, Rc::new(ModalSurface::new(modal.clone())));
    overlays.bind_dismissal(OverlayKind::Certificate, &modal);

    for trigger in dom::find_in_document("[data-cert-src]") {
        let overlays = Rc::clone(overlays);
        let image = image.clone();
        let target = trigger.clone();
        dom::listen(&target, "click", move |event: MouseEvent| {
            let Some(src) = trigger.get_attribute("data-cert-src").filter(|src| !src.is_empty()) else {
                return;
            };
            event.prevent_default();
            image.set_src(&src);
            overlays.open(OverlayKind::Certificate);
        });
    }
}
