use std::cell::RefCell;
use std::cmp::Reverse;
use std::rc::Rc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use log::{debug, info};
use web_sys::{Element, MouseEvent};
use yew::prelude::*;
use yew::AppHandle;

use crate::config::NEWS_UTC_OFFSET_SECS;
use crate::dom;
use crate::overlay::{ModalSurface, OverlayKind, Overlays};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub sort_key: String,
    pub body: String,
    pub image: Option<String>,
}

impl NewsItem {
    pub fn from_card(card: &Element) -> Self {
        let attr = |name: &str| card.get_attribute(name).unwrap_or_default();
        Self {
            title: attr("data-news-title"),
            date: attr("data-news-date"),
            sort_key: attr("data-news-sort"),
            body: attr("data-news-body"),
            image: card
                .get_attribute("data-news-image")
                .filter(|src| !src.is_empty()),
        }
    }
}

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Wall-clock keys without an offset, down to `YYYY-MM`.
fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    for format in LOCAL_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let (year, month) = raw.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?.and_hms_opt(0, 0, 0)
}

/// Keys with an offset are taken as is; keys without one are in the site's zone.
fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    let zone = FixedOffset::east_opt(NEWS_UTC_OFFSET_SECS)?;
    parse_local(raw)?
        .and_local_timezone(zone)
        .single()
        .map(|stamp| stamp.naive_utc())
}

/// Readable dates become fixed-width UTC text, so every key compares as a
/// string: zero-padded ISO keys keep their textual order and anything else
/// is compared verbatim.
fn sort_key(raw: &str) -> String {
    let raw = raw.trim();
    match parse_instant(raw) {
        Some(stamp) => stamp.format(CANONICAL_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Newest first. Items with equal keys keep their page order.
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by_cached_key(|item| Reverse(sort_key(&item.sort_key)));
}

/// Reads every news card currently under `root`.
pub fn collect(root: &Element) -> Vec<NewsItem> {
    let mut items: Vec<NewsItem> = dom::find_all(root, ".news__card[data-news-title]")
        .iter()
        .map(NewsItem::from_card)
        .collect();
    sort_newest_first(&mut items);
    items
}

#[derive(Properties, PartialEq)]
pub struct NewsListProps {
    pub items: Vec<NewsItem>,
}

#[function_component(NewsList)]
pub fn news_list(props: &NewsListProps) -> Html {
    html! {
        <>
            { for props.items.iter().map(|item| html! {
                <li class="news-modal__item">
                    {
                        if let Some(src) = &item.image {
                            html! {
                                <img class="news-modal__image" src={src.clone()} alt={item.title.clone()} loading="lazy" />
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div class="news-modal__content">
                        <time class="news-modal__date" datetime={item.sort_key.clone()}>{ item.date.clone() }</time>
                        <h3 class="news-modal__title">{ item.title.clone() }</h3>
                        <p class="news-modal__text">{ item.body.clone() }</p>
                    </div>
                </li>
            }) }
        </>
    }
}

struct NewsDialog {
    list: Element,
    rendered: RefCell<Option<AppHandle<NewsList>>>,
}

impl NewsDialog {
    /// Cards can change between opens, so they are read again every time.
    fn open(&self, overlays: &Overlays) {
        let items = dom::document()
            .and_then(|doc| doc.document_element())
            .map(|root| collect(&root))
            .unwrap_or_default();
        debug!("Rendering {} news items", items.len());

        // The first render replaces whatever placeholder the server left in the list.
        match self.rendered.borrow_mut().take() {
            Some(previous) => previous.destroy(),
            None => self.list.set_inner_html(""),
        }
        let handle = yew::Renderer::<NewsList>::with_root_and_props(
            self.list.clone(),
            NewsListProps { items },
        )
        .render();
        *self.rendered.borrow_mut() = Some(handle);

        overlays.open(OverlayKind::News);
    }
}

pub fn init(overlays: &Rc<Overlays>) {
    let Some(modal) = dom::by_id("news-modal") else {
        debug!("No news modal on page");
        return;
    };
    let Some(list) = dom::find(&modal, "#news-modal-list") else {
        return;
    };

    overlays.register(OverlayKind::News, Rc::new(ModalSurface::new(modal.clone())));
    overlays.bind_dismissal(OverlayKind::News, &modal);

    let dialog = Rc::new(NewsDialog {
        list,
        rendered: RefCell::new(None),
    });
    for trigger in dom::find_in_document("[data-news-open]") {
        let overlays = Rc::clone(overlays);
        let dialog = Rc::clone(&dialog);
        dom::listen(&trigger, "click", move |event: MouseEvent| {
            event.prevent_default();
            dialog.open(&overlays);
        });
    }
    info!("News modal ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, sort_key: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            date: String::new(),
            sort_key: sort_key.to_string(),
            body: String::new(),
            image: None,
        }
    }

    fn titles(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|item| item.title.as_str()).collect()
    }

    #[test]
    fn iso_dates_sort_newest_first() {
        let mut items = vec![
            item("march", "2025-03-01"),
            item("december", "2024-12-15"),
            item("june", "2025-06-30"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["june", "march", "december"]);
    }

    #[test]
    fn time_of_day_breaks_same_day_ties() {
        let mut items = vec![
            item("morning", "2025-05-01T09:00:00"),
            item("midnight", "2025-05-01"),
            item("evening", "2025-05-01T19:30:00+03:00"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["evening", "morning", "midnight"]);
    }

    #[test]
    fn other_iso_shapes_keep_newest_first_order() {
        let mut items = vec![
            item("old", "2019-01-01"),
            item("fractional", "2025-05-01T09:00:00.500"),
            item("space_no_secs", "2025-04-01 10:00"),
            item("month", "2024-11"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["fractional", "space_no_secs", "month", "old"]);
    }

    #[test]
    fn fraction_orders_within_the_same_second() {
        let mut items = vec![
            item("whole", "2025-05-01T09:00:00"),
            item("later", "2025-05-01T09:00:00.250"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["later", "whole"]);
    }

    #[test]
    fn offset_and_local_keys_share_one_clock() {
        // 12:30 at the site equals 09:30Z, which is later than 09:00Z.
        let mut items = vec![
            item("utc", "2025-05-01T09:00:00Z"),
            item("local", "2025-05-01T12:30:00"),
            item("earlier_local", "2025-05-01T11:59:00"),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["local", "utc", "earlier_local"]);
    }

    #[test]
    fn non_date_keys_compare_as_text() {
        let mut items = vec![
            item("b", "spring"),
            item("dated", "2020-01-01"),
            item("a", "autumn"),
            item("empty", ""),
        ];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["b", "a", "dated", "empty"]);
    }

    #[test]
    fn equal_keys_keep_page_order() {
        let mut items = vec![item("first", "2025-01-01"), item("second", "2025-01-01")];
        sort_newest_first(&mut items);
        assert_eq!(titles(&items), ["first", "second"]);
    }
}
