//! Page behaviors for the agency landing page: sticky header, mobile menu,
//! gallery likes, contact form, modals and image fallbacks.
//!
//! The markup is rendered by the server; this crate only attaches to it.

use log::info;

pub mod config;
pub mod dialogs;
pub mod dom;
pub mod error;
pub mod fallback;
pub mod header;
pub mod lead;
pub mod likes;
pub mod nav;
pub mod overlay;
pub mod toast;

use overlay::Overlays;
use toast::Toast;

/// Wires every behavior once the document is interactive.
pub fn start() {
    dom::on_ready(|| {
        info!("Attaching landing page behaviors");
        header::init();

        let overlays = Overlays::new();
        overlays.listen_for_escape();
        nav::init(&overlays);
        dialogs::init(&overlays);

        likes::init();
        lead::init(Toast::attach());
        fallback::init();
    });
}
