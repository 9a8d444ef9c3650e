//! The document the controllers drive.
//!
//! [`Page`] is the seam between the controllers and a concrete DOM. The
//! browser build implements it over `web-sys` (`crate::browser::DomPage`);
//! [`MemoryPage`] implements it in memory for tests and the terminal client.
//! Every method addresses an element by id. Operations on an id that does
//! not exist are no-ops; controllers check the ids they need up front.

use async_trait::async_trait;

use crate::api::Upload;
use crate::error::UiError;

pub mod ids;
pub mod layout;
pub mod memory;

pub use memory::{MemoryElement, MemoryPage, PageEvent};

/// Metadata of the file currently selected in a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

/// A child element to append under an existing element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: Option<String>,
    pub class: String,
    pub html: String,
}

impl Node {
    pub fn new(class: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: None,
            class: class.into(),
            html: html.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[async_trait(?Send)]
pub trait Page {
    /// True when an element with this id is in the document.
    fn contains(&self, id: &str) -> bool;

    /// Current value of an input or textarea.
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&self, id: &str, value: &str);

    fn inner_html(&self, id: &str) -> Option<String>;
    /// Replace the element's children with raw markup. No escaping is applied.
    fn set_inner_html(&self, id: &str, html: &str);
    fn set_text(&self, id: &str, text: &str);

    fn add_class(&self, id: &str, class: &str);
    fn remove_class(&self, id: &str, class: &str);
    /// Flip a class, returning whether it is now present.
    fn toggle_class(&self, id: &str, class: &str) -> bool;
    fn has_class(&self, id: &str, class: &str) -> bool;

    fn set_attribute(&self, id: &str, name: &str, value: &str);
    /// Hide through inline style (`display: none`), independent of classes.
    fn hide(&self, id: &str);

    fn focus(&self, id: &str);
    fn scroll_into_view(&self, id: &str);
    fn scroll_to_bottom(&self, id: &str);

    fn append_node(&self, parent: &str, node: Node);
    /// Remove an element; returns false when it was not present.
    fn remove(&self, id: &str) -> bool;

    /// Blocking notification shown to the user.
    fn alert(&self, message: &str);

    /// The file currently selected in a file input, if any.
    fn selected_file(&self, input_id: &str) -> Option<FileSelection>;
    /// Read the selected file's contents.
    async fn read_file(&self, input_id: &str) -> Result<Upload, UiError>;
}

/// Ensure every id in `required` is present.
pub fn require_elements<P: Page + ?Sized>(page: &P, required: &[&str]) -> Result<(), UiError> {
    match required.iter().find(|id| !page.contains(id)) {
        Some(missing) => Err(UiError::MissingElement((*missing).to_string())),
        None => Ok(()),
    }
}
