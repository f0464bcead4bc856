//! Overlay bookkeeping shared by the mobile menu and every modal on the page.
//!
//! `OverlayStack` is plain data: it knows which overlays are open, in which
//! order, and which one owns which. The page is scroll-locked iff the stack is
//! non-empty, so nested overlays never release the lock early.

mod surface;

pub use surface::{MenuSurface, ModalSurface, OverlaySurface, Overlays, ScrollLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    MobileMenu,
    Certificate,
    News,
    ProjectCategory,
    ProjectDetail,
}

impl OverlayKind {
    /// The overlay this one is stacked inside, if any. Closing the parent
    /// closes the child too.
    pub fn parent(self) -> Option<OverlayKind> {
        match self {
            OverlayKind::ProjectDetail => Some(OverlayKind::ProjectCategory),
            _ => None,
        }
    }

    fn descends_from(self, ancestor: OverlayKind) -> bool {
        let mut current = self.parent();
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opened {
    /// False when the overlay was already open.
    pub newly_opened: bool,
    pub lock_acquired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Closed {
    /// Overlays that went away, innermost first.
    pub closed: Vec<OverlayKind>,
    pub lock_released: bool,
}

#[derive(Debug, Default)]
pub struct OverlayStack {
    open: Vec<OverlayKind>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.open.contains(&kind)
    }

    pub fn is_locked(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn topmost(&self) -> Option<OverlayKind> {
        self.open.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn open(&mut self, kind: OverlayKind) -> Opened {
        if self.is_open(kind) {
            return Opened {
                newly_opened: false,
                lock_acquired: false,
            };
        }
        let lock_acquired = self.open.is_empty();
        self.open.push(kind);
        Opened {
            newly_opened: true,
            lock_acquired,
        }
    }

    /// Closes `kind` and every overlay stacked inside it.
    pub fn close(&mut self, kind: OverlayKind) -> Closed {
        if !self.is_open(kind) {
            return Closed::default();
        }
        let was_locked = self.is_locked();

        let mut closed: Vec<OverlayKind> = self
            .open
            .iter()
            .rev()
            .copied()
            .filter(|open| open.descends_from(kind))
            .collect();
        closed.push(kind);
        self.open.retain(|open| !closed.contains(open));

        Closed {
            closed,
            lock_released: was_locked && !self.is_locked(),
        }
    }

    pub fn close_topmost(&mut self) -> Closed {
        match self.topmost() {
            Some(kind) => self.close(kind),
            None => Closed::default(),
        }
    }

    /// Flips `kind`; returns whether it is open afterwards.
    pub fn toggle(&mut self, kind: OverlayKind) -> bool {
        if self.is_open(kind) {
            self.close(kind);
            false
        } else {
            self.open(kind);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_open_acquires_the_lock() {
        let mut stack = OverlayStack::new();
        let opened = stack.open(OverlayKind::Certificate);
        assert!(opened.newly_opened);
        assert!(opened.lock_acquired);
        assert!(stack.is_locked());
    }

    #[test]
    fn reopening_is_a_no_op() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::News);
        let again = stack.open(OverlayKind::News);
        assert!(!again.newly_opened);
        assert!(!again.lock_acquired);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn closing_detail_keeps_category_lock() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::ProjectCategory);
        let nested = stack.open(OverlayKind::ProjectDetail);
        assert!(!nested.lock_acquired);

        let closed = stack.close(OverlayKind::ProjectDetail);
        assert_eq!(closed.closed, vec![OverlayKind::ProjectDetail]);
        assert!(!closed.lock_released);
        assert!(stack.is_locked());

        let closed = stack.close(OverlayKind::ProjectCategory);
        assert_eq!(closed.closed, vec![OverlayKind::ProjectCategory]);
        assert!(closed.lock_released);
        assert!(!stack.is_locked());
    }

    #[test]
    fn closing_category_cascades_to_detail() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::ProjectCategory);
        stack.open(OverlayKind::ProjectDetail);

        let closed = stack.close(OverlayKind::ProjectCategory);
        assert_eq!(
            closed.closed,
            vec![OverlayKind::ProjectDetail, OverlayKind::ProjectCategory]
        );
        assert!(closed.lock_released);
        assert!(!stack.is_open(OverlayKind::ProjectDetail));
    }

    #[test]
    fn escape_closes_only_the_topmost() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::ProjectCategory);
        stack.open(OverlayKind::ProjectDetail);

        let closed = stack.close_topmost();
        assert_eq!(closed.closed, vec![OverlayKind::ProjectDetail]);
        assert_eq!(stack.topmost(), Some(OverlayKind::ProjectCategory));

        let closed = stack.close_topmost();
        assert_eq!(closed.closed, vec![OverlayKind::ProjectCategory]);
        assert!(stack.close_topmost().closed.is_empty());
    }

    #[test]
    fn unrelated_overlays_survive_a_close() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::MobileMenu);
        stack.open(OverlayKind::Certificate);

        let closed = stack.close(OverlayKind::MobileMenu);
        assert_eq!(closed.closed, vec![OverlayKind::MobileMenu]);
        assert!(!closed.lock_released);
        assert_eq!(stack.topmost(), Some(OverlayKind::Certificate));
    }

    #[test]
    fn closing_something_not_open_changes_nothing() {
        let mut stack = OverlayStack::new();
        stack.open(OverlayKind::News);
        let closed = stack.close(OverlayKind::Certificate);
        assert_eq!(closed, Closed::default());
        assert!(stack.is_locked());
    }

    #[test]
    fn toggle_flips_the_menu() {
        let mut stack = OverlayStack::new();
        assert!(stack.toggle(OverlayKind::MobileMenu));
        assert!(stack.is_locked());
        assert!(!stack.toggle(OverlayKind::MobileMenu));
        assert!(!stack.is_locked());
    }
}
