//! Project category modal and the project detail modal stacked inside it.
//!
//! The detail modal is declared a child of the category modal in the overlay
//! stack, so closing the category also closes the detail, and closing only
//! the detail leaves the page locked.

use std::rc::Rc;

use log::{debug, info};
use web_sys::{Element, MouseEvent};

use super::before_after;
use crate::config::BEFORE_AFTER_CATEGORY;
use crate::dom;
use crate::overlay::{ModalSurface, OverlayKind, Overlays};

/// What the category modal shows for one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryContent {
    pub title: String,
    pub lead: String,
    pub show_before_after: bool,
}

impl CategoryContent {
    pub fn new(category: &str, title: String, lead: String) -> Self {
        Self {
            title,
            lead,
            show_before_after: category == BEFORE_AFTER_CATEGORY,
        }
    }

    fn from_trigger(trigger: &Element) -> Option<Self> {
        let category = trigger.get_attribute("data-project-category")?;
        Some(Self::new(
            &category,
            trigger.get_attribute("data-project-title").unwrap_or_default(),
            trigger.get_attribute("data-project-lead").unwrap_or_default(),
        ))
    }
}

pub fn content_block_id(project: &str) -> String {
    format!("project-content-{}", project)
}

struct CategoryDialog {
    title: Option<Element>,
    lead: Option<Element>,
    before_after: Option<Element>,
}

impl CategoryDialog {
    fn render(&self, content: &CategoryContent) {
        if let Some(title) = &self.title {
            title.set_text_content(Some(&content.title));
        }
        if let Some(lead) = &self.lead {
            lead.set_text_content(Some(&content.lead));
        }
        if let Some(section) = &self.before_after {
            let _ = if content.show_before_after {
                section.remove_attribute("hidden")
            } else {
                section.set_attribute("hidden", "")
            };
        }
    }
}

struct DetailDialog {
    title: Option<Element>,
    body: Element,
}

impl DetailDialog {
    /// Copies the hidden content block for `project` into the modal body.
    /// Returns false when the page has no such block.
    fn render(&self, project: &str, caption: &str) -> bool {
        let Some(block) = dom::by_id(&content_block_id(project)) else {
            debug!("No content block for project {}", project);
            return false;
        };
        self.body.set_inner_html(&block.inner_html());
        before_after::bind(&self.body);
        if let Some(title) = &self.title {
            title.set_text_content(Some(caption));
        }
        true
    }
}

fn caption_of(trigger: &Element) -> String {
    dom::find(trigger, ".project__caption")
        .and_then(|caption| caption.text_content())
        .or_else(|| trigger.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

pub fn init(overlays: &Rc<Overlays>) {
    init_category(overlays);
    init_detail(overlays);
}

fn init_category(overlays: &Rc<Overlays>) {
    let Some(modal) = dom::by_id("project-category-modal") else {
        debug!("No project category modal on page");
        return;
    };
    let dialog = Rc::new(CategoryDialog {
        title: dom::find(&modal, "#project-category-title"),
        lead: dom::find(&modal, "#project-category-lead"),
        before_after: dom::find(&modal, "#project-category-before-after"),
    });

    overlays.register(
        OverlayKind::ProjectCategory,
        Rc::new(ModalSurface::new(modal.clone())),
    );
    overlays.bind_dismissal(OverlayKind::ProjectCategory, &modal);

    for trigger in dom::find_in_document("[data-project-category]") {
        let overlays = Rc::clone(overlays);
        let dialog = Rc::clone(&dialog);
        let target = trigger.clone();
        dom::listen(&target, "click", move |event: MouseEvent| {
            let Some(content) = CategoryContent::from_trigger(&trigger) else {
                return;
            };
            event.prevent_default();
            dialog.render(&content);
            overlays.open(OverlayKind::ProjectCategory);
        });
    }
    info!("Project category modal ready");
}

fn init_detail(overlays: &Rc<Overlays>) {
    let Some(modal) = dom::by_id("project-detail-modal") else {
        debug!("No project detail modal on page");
        return;
    };
    let Some(body) = dom::find(&modal, "#project-detail-body") else {
        return;
    };
    let dialog = Rc::new(DetailDialog {
        title: dom::find(&modal, "#project-detail-title"),
        body: body.clone(),
    });

    let surface = ModalSurface::new(modal.clone()).on_hide(move || body.set_inner_html(""));
    overlays.register(OverlayKind::ProjectDetail, Rc::new(surface));
    overlays.bind_dismissal(OverlayKind::ProjectDetail, &modal);

    for trigger in dom::find_in_document("[data-project-detail]") {
        let overlays = Rc::clone(overlays);
        let dialog = Rc::clone(&dialog);
        let target = trigger.clone();
        dom::listen(&target, "click", move |event: MouseEvent| {
            let Some(project) = trigger
                .get_attribute("data-project-detail")
                .filter(|project| !project.is_empty())
            else {
                return;
            };
            event.prevent_default();
            if dialog.render(&project, &caption_of(&trigger)) {
                overlays.open(OverlayKind::ProjectDetail);
            }
        });
    }
    info!("Project detail modal ready");
}
