use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use web_sys::{Element, MouseEvent};

use crate::config::LIKED_STORAGE_KEY;
use crate::dom;
use crate::error::StorageError;

/// Gallery ids the visitor has liked, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikedSet {
    ids: Vec<String>,
}

impl LikedSet {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for id in ids {
            let id = id.into();
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }

    /// Anything unreadable counts as "nothing liked yet".
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(ids) => Self::from_ids(ids),
            Err(e) => {
                debug!("Ignoring malformed liked ids: {}", e);
                Self::default()
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|liked| liked == id)
    }

    /// Returns whether `id` is liked afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(index) = self.ids.iter().position(|liked| liked == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

pub trait LikeRepository {
    fn load(&self) -> LikedSet;
    fn save(&self, liked: &LikedSet) -> Result<(), StorageError>;
}

pub struct LocalStorageRepository {
    key: &'static str,
}

impl LocalStorageRepository {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl Default for LocalStorageRepository {
    fn default() -> Self {
        Self::new(LIKED_STORAGE_KEY)
    }
}

impl LikeRepository for LocalStorageRepository {
    fn load(&self) -> LikedSet {
        Self::storage()
            .and_then(|storage| storage.get_item(self.key).ok().flatten())
            .map(|raw| LikedSet::decode(&raw))
            .unwrap_or_default()
    }

    fn save(&self, liked: &LikedSet) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        let raw = liked.encode()?;
        storage
            .set_item(self.key, &raw)
            .map_err(|_| StorageError::WriteRejected)
    }
}

/// In-memory liked set backed by a repository. The session state stays
/// correct even when the repository refuses to persist it.
pub struct LikeTracker<R> {
    repository: R,
    liked: RefCell<LikedSet>,
}

impl<R: LikeRepository> LikeTracker<R> {
    pub fn new(repository: R) -> Self {
        let liked = repository.load();
        Self {
            repository,
            liked: RefCell::new(liked),
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.borrow().contains(id)
    }

    pub fn toggle(&self, id: &str) -> bool {
        let liked = self.liked.borrow_mut().toggle(id);
        if let Err(e) = self.repository.save(&self.liked.borrow()) {
            debug!("Liked ids not persisted: {}", e);
        }
        liked
    }

    pub fn snapshot(&self) -> LikedSet {
        self.liked.borrow().clone()
    }
}

fn item_id(button: &Element) -> Option<String> {
    button.get_attribute("data-id").filter(|id| !id.is_empty())
}

pub fn init() {
    bind(LocalStorageRepository::default());
}

pub fn bind<R: LikeRepository + 'static>(repository: R) {
    let buttons = dom::find_in_document(".gallery__card-like");
    if buttons.is_empty() {
        return;
    }

    let tracker = Rc::new(LikeTracker::new(repository));
    for button in buttons {
        if let Some(id) = item_id(&button) {
            dom::set_class(&button, "is-liked", tracker.is_liked(&id));
        }

        let tracker = Rc::clone(&tracker);
        let target = button.clone();
        dom::listen(&target, "click", move |_: MouseEvent| {
            let Some(id) = item_id(&button) else {
                return;
            };
            let liked = tracker.toggle(&id);
            dom::set_class(&button, "is-liked", liked);
        });
    }
    info!("Gallery likes ready");
}
