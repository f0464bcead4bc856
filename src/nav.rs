use std::rc::Rc;

use log::{debug, info};
use web_sys::MouseEvent;

use crate::dom;
use crate::overlay::{MenuSurface, OverlayKind, Overlays};

/// Burger toggle for the mobile menu. Open/closed state and the scroll lock
/// live in the shared overlay stack; Escape is handled there as well.
pub fn init(overlays: &Rc<Overlays>) {
    let (Some(container), Some(toggle), Some(menu)) = (
        dom::by_id("header"),
        dom::by_id("nav-toggle"),
        dom::by_id("mobile-menu"),
    ) else {
        debug!("Mobile menu markup missing, skipping");
        return;
    };

    let _ = toggle.set_attribute("aria-expanded", "false");
    let _ = menu.set_attribute("aria-hidden", "true");

    let links = dom::find_all(&menu, "a");
    overlays.register(
        OverlayKind::MobileMenu,
        Rc::new(MenuSurface {
            container,
            toggle: toggle.clone(),
            menu,
        }),
    );

    {
        let overlays = Rc::clone(overlays);
        dom::listen(&toggle, "click", move |event: MouseEvent| {
            event.prevent_default();
            overlays.toggle(OverlayKind::MobileMenu);
        });
    }

    // Nav, phone and CTA links all leave the menu.
    for link in links {
        let overlays = Rc::clone(overlays);
        dom::listen(&link, "click", move |_: MouseEvent| {
            overlays.close(OverlayKind::MobileMenu);
        });
    }

    info!("Mobile menu ready");
}
