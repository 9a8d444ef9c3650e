//! Page-wide UI services: the loading overlay and error reporting.
//!
//! Controllers receive a [`UiService`] instead of reaching for page globals.
//! The overlay is driven through [`LoadingTracker`], which counts in-flight
//! requests so that one request finishing never hides the overlay while
//! another is still pending.

use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

use crate::page::{ids, Page};

pub trait UiService {
    fn show_loading(&self);
    fn hide_loading(&self);
    /// Tell the user an action failed. `message` is shown after `Error: `.
    fn report_error(&self, message: &str);
}

/// [`UiService`] backed by the page's `loadingOverlay` element and `alert`.
pub struct PageUi<P: Page> {
    page: Rc<P>,
}

impl<P: Page> PageUi<P> {
    pub fn new(page: Rc<P>) -> Self {
        Self { page }
    }
}

impl<P: Page> UiService for PageUi<P> {
    fn show_loading(&self) {
        self.page.remove_class(ids::LOADING_OVERLAY, ids::HIDDEN);
    }

    fn hide_loading(&self) {
        self.page.add_class(ids::LOADING_OVERLAY, ids::HIDDEN);
    }

    fn report_error(&self, message: &str) {
        self.page.alert(&format!("Error: {message}"));
    }
}

/// Reference-counted owner of the loading overlay.
pub struct LoadingTracker<U: UiService> {
    ui: Rc<U>,
    pending: Cell<usize>,
}

impl<U: UiService> LoadingTracker<U> {
    pub fn new(ui: Rc<U>) -> Self {
        Self {
            ui,
            pending: Cell::new(0),
        }
    }

    /// Mark one unit of work as started. The overlay shows on the first
    /// start and hides when the last guard is dropped.
    pub fn begin(&self) -> LoadingGuard<'_, U> {
        let before = self.pending.get();
        self.pending.set(before + 1);
        if before == 0 {
            debug!("loading overlay shown");
            self.ui.show_loading();
        }
        LoadingGuard { tracker: self }
    }

    /// Work items currently in flight.
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    fn finish(&self) {
        let after = self.pending.get().saturating_sub(1);
        self.pending.set(after);
        if after == 0 {
            debug!("loading overlay hidden");
            self.ui.hide_loading();
        }
    }
}

/// Keeps the overlay up while alive; released on every exit path.
#[must_use = "the overlay hides as soon as the guard is dropped"]
pub struct LoadingGuard<'a, U: UiService> {
    tracker: &'a LoadingTracker<U>,
}

impl<U: UiService> Drop for LoadingGuard<'_, U> {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingUi {
        calls: RefCell<Vec<String>>,
    }

    impl UiService for RecordingUi {
        fn show_loading(&self) {
            self.calls.borrow_mut().push("show".into());
        }
        fn hide_loading(&self) {
            self.calls.borrow_mut().push("hide".into());
        }
        fn report_error(&self, message: &str) {
            self.calls.borrow_mut().push(format!("error:{message}"));
        }
    }

    #[test]
    fn test_single_guard_shows_then_hides() {
        let ui = Rc::new(RecordingUi::default());
        let tracker = LoadingTracker::new(Rc::clone(&ui));
        {
            let _g = tracker.begin();
            assert_eq!(tracker.pending(), 1);
        }
        assert_eq!(tracker.pending(), 0);
        assert_eq!(*ui.calls.borrow(), vec!["show", "hide"]);
    }

    #[test]
    fn test_overlapping_guards_hide_only_after_last() {
        let ui = Rc::new(RecordingUi::default());
        let tracker = LoadingTracker::new(Rc::clone(&ui));
        let first = tracker.begin();
        let second = tracker.begin();
        drop(first);
        assert_eq!(*ui.calls.borrow(), vec!["show"]);
        drop(second);
        assert_eq!(*ui.calls.borrow(), vec!["show", "hide"]);
    }

    #[test]
    fn test_page_ui_toggles_overlay_and_alerts() {
        let page = Rc::new(MemoryPage::with_layout());
        let ui = PageUi::new(Rc::clone(&page));
        ui.show_loading();
        assert!(!page.has_class(ids::LOADING_OVERLAY, ids::HIDDEN));
        ui.hide_loading();
        assert!(page.has_class(ids::LOADING_OVERLAY, ids::HIDDEN));
        ui.report_error("bad file");
        assert_eq!(page.alerts(), vec!["Error: bad file"]);
    }
}
