use log::debug;
use web_sys::{Element, MouseEvent};

use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

impl Side {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "before" => Some(Side::Before),
            "after" => Some(Side::After),
            _ => None,
        }
    }

    fn of(button: &Element) -> Option<Self> {
        button
            .get_attribute("data-ba")
            .and_then(|value| Side::from_attr(&value))
    }
}

/// Activates `side` in `group` and flags the group so CSS shows the matching photo.
pub fn select(group: &Element, side: Side) {
    for button in dom::find_all(group, "[data-ba]") {
        let active = Side::of(&button) == Some(side);
        dom::set_class(&button, "is-active", active);
        let _ = button.set_attribute("aria-pressed", if active { "true" } else { "false" });
    }
    dom::set_class(group, "is-after", side == Side::After);
}

/// Wires every before/after group under `root`. Safe to call on freshly
/// inserted content; clones carry no listeners.
pub fn bind(root: &Element) {
    let groups = dom::find_all(root, ".before-after");
    for group in &groups {
        for button in dom::find_all(group, "[data-ba]") {
            let Some(side) = Side::of(&button) else {
                continue;
            };
            let group = group.clone();
            dom::listen(&button, "click", move |event: MouseEvent| {
                event.prevent_default();
                select(&group, side);
            });
        }
    }
    if !groups.is_empty() {
        debug!("Bound {} before/after groups", groups.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sides_only() {
        assert_eq!(Side::from_attr("before"), Some(Side::Before));
        assert_eq!(Side::from_attr("after"), Some(Side::After));
        assert_eq!(Side::from_attr("After"), None);
        assert_eq!(Side::from_attr(""), None);
    }
}
