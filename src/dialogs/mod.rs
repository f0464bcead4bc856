use std::rc::Rc;

use crate::dom;
use crate::overlay::Overlays;

pub mod before_after;
pub mod certificate;
pub mod news;
pub mod projects;

pub fn init(overlays: &Rc<Overlays>) {
    if let Some(root) = dom::document().and_then(|doc| doc.document_element()) {
        before_after::bind(&root);
    }
    certificate::init(overlays);
    news::init(overlays);
    projects::init(overlays);
}
