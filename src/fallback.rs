use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement};

use crate::dom;

/// Points `image` at its `data-fallback` source. The attribute is dropped
/// first so a broken fallback cannot loop.
pub fn swap_to_fallback(image: &HtmlImageElement) -> bool {
    let Some(fallback) = image
        .get_attribute("data-fallback")
        .filter(|fallback| !fallback.is_empty())
    else {
        return false;
    };
    let _ = image.remove_attribute("data-fallback");
    image.set_src(&fallback);
    true
}

fn already_broken(image: &HtmlImageElement) -> bool {
    image.complete() && image.natural_width() == 0 && !image.src().is_empty()
}

pub fn init() {
    for image in dom::find_in_document("img[data-fallback]") {
        let Ok(image) = image.dyn_into::<HtmlImageElement>() else {
            continue;
        };

        // The error may have fired before this module was loaded.
        if already_broken(&image) {
            debug!("Image {} failed before init, using fallback", image.src());
            swap_to_fallback(&image);
            continue;
        }

        let target = image.clone();
        dom::listen(&target, "error", move |_: Event| {
            swap_to_fallback(&image);
        });
    }
}
