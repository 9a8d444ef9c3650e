//! Tab bar over the four analysis sections.

use std::rc::Rc;
use tracing::debug;

use crate::error::UiError;
use crate::page::{ids, Page};

pub struct TabSwitcher<P: Page> {
    page: Rc<P>,
    tabs: Vec<(String, String)>,
}

impl<P: Page> TabSwitcher<P> {
    /// Switcher over the page's standard tabs.
    pub fn new(page: Rc<P>) -> Self {
        Self::with_tabs(page, ids::TABS)
    }

    /// Switcher over `(button id, content id)` pairs.
    pub fn with_tabs(page: Rc<P>, tabs: &[(&str, &str)]) -> Self {
        Self {
            page,
            tabs: tabs
                .iter()
                .map(|(b, c)| ((*b).to_string(), (*c).to_string()))
                .collect(),
        }
    }

    /// Deactivate every tab, then activate the one behind `button_id`.
    pub fn activate(&self, button_id: &str) -> Result<(), UiError> {
        let (button, content) = self
            .tabs
            .iter()
            .find(|(b, _)| b == button_id)
            .ok_or_else(|| UiError::MissingElement(button_id.to_string()))?;
        for (b, c) in &self.tabs {
            self.page.remove_class(b, ids::ACTIVE);
            self.page.remove_class(c, ids::ACTIVE);
        }
        self.page.add_class(button, ids::ACTIVE);
        self.page.add_class(content, ids::ACTIVE);
        debug!(tab = %content, "tab activated");
        Ok(())
    }

    /// Button id of the active tab.
    pub fn active(&self) -> Option<&str> {
        self.tabs
            .iter()
            .find(|(b, _)| self.page.has_class(b, ids::ACTIVE))
            .map(|(b, _)| b.as_str())
    }

    pub fn button_ids(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|(b, _)| b.as_str())
    }
}
