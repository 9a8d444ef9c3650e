//! In-memory [`Page`] used by tests and the terminal client.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use super::{ids, FileSelection, Node, Page};
use crate::api::Upload;
use crate::error::UiError;

/// State of one registered element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub classes: BTreeSet<String>,
    pub value: String,
    pub inner_html: String,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    /// Set by [`Page::hide`].
    pub style_hidden: bool,
    pub focused: bool,
    pub scroll_into_view_count: u32,
    pub scrolled_to_bottom: u32,
    /// Nodes appended with [`Page::append_node`], in order.
    pub children: Vec<Node>,
    pub file: Option<Upload>,
}

/// Structural mutations, recorded in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Appended { parent: String, node: Node },
    Removed { id: String },
    ClassAdded { id: String, class: String },
    ClassRemoved { id: String, class: String },
    Alert(String),
}

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<String, MemoryElement>,
    journal: Vec<PageEvent>,
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    inner: Mutex<Inner>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page containing exactly these ids, all empty.
    pub fn with_elements(element_ids: &[&str]) -> Self {
        let page = Self::new();
        {
            let mut inner = page.lock();
            for id in element_ids {
                inner.elements.insert((*id).to_string(), MemoryElement::default());
            }
        }
        page
    }

    /// A page with every id of the fixed analysis document, in its initial state.
    pub fn with_layout() -> Self {
        let page = Self::with_elements(&ids::all());
        {
            let mut inner = page.lock();
            for id in ids::INITIALLY_HIDDEN {
                if let Some(el) = inner.elements.get_mut(*id) {
                    el.classes.insert(ids::HIDDEN.to_string());
                }
            }
            if let Some((button, content)) = ids::TABS.first() {
                for id in [button, content] {
                    if let Some(el) = inner.elements.get_mut(*id) {
                        el.classes.insert(ids::ACTIVE.to_string());
                    }
                }
            }
        }
        page
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panicking test may poison the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn with_el<R>(&self, id: &str, f: impl FnOnce(&mut MemoryElement) -> R) -> Option<R> {
        let mut inner = self.lock();
        inner.elements.get_mut(id).map(f)
    }

    /// Snapshot of a registered element.
    pub fn element(&self, id: &str) -> Option<MemoryElement> {
        self.lock().elements.get(id).cloned()
    }

    /// Children appended under `parent`.
    pub fn children(&self, parent: &str) -> Vec<Node> {
        self.element(parent).map(|e| e.children).unwrap_or_default()
    }

    pub fn journal(&self) -> Vec<PageEvent> {
        self.lock().journal.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock()
            .journal
            .iter()
            .filter_map(|e| match e {
                PageEvent::Alert(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Simulate the user picking a file in a file input.
    pub fn select_file(&self, input_id: &str, upload: Upload) {
        self.with_el(input_id, |el| {
            el.value = upload.file_name.clone();
            el.file = Some(upload);
        });
    }

    pub fn clear_file(&self, input_id: &str) {
        self.with_el(input_id, |el| {
            el.value.clear();
            el.file = None;
        });
    }
}

#[async_trait(?Send)]
impl Page for MemoryPage {
    fn contains(&self, id: &str) -> bool {
        let inner = self.lock();
        inner.elements.contains_key(id)
            || inner
                .elements
                .values()
                .any(|el| el.children.iter().any(|n| n.id.as_deref() == Some(id)))
    }

    fn value(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|el| el.value.clone())
    }

    fn set_value(&self, id: &str, value: &str) {
        self.with_el(id, |el| el.value = value.to_string());
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|el| el.inner_html.clone())
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        self.with_el(id, |el| {
            el.inner_html = html.to_string();
            el.children.clear();
        });
    }

    fn set_text(&self, id: &str, text: &str) {
        self.with_el(id, |el| {
            el.text = text.to_string();
            el.inner_html = text.to_string();
        });
    }

    fn add_class(&self, id: &str, class: &str) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if let Some(el) = inner.elements.get_mut(id) {
            if el.classes.insert(class.to_string()) {
                inner.journal.push(PageEvent::ClassAdded {
                    id: id.to_string(),
                    class: class.to_string(),
                });
            }
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if let Some(el) = inner.elements.get_mut(id) {
            if el.classes.remove(class) {
                inner.journal.push(PageEvent::ClassRemoved {
                    id: id.to_string(),
                    class: class.to_string(),
                });
            }
        }
    }

    fn toggle_class(&self, id: &str, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            self.has_class(id, class)
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.lock()
            .elements
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        self.with_el(id, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn hide(&self, id: &str) {
        self.with_el(id, |el| el.style_hidden = true);
    }

    fn focus(&self, id: &str) {
        let mut inner = self.lock();
        for el in inner.elements.values_mut() {
            el.focused = false;
        }
        if let Some(el) = inner.elements.get_mut(id) {
            el.focused = true;
        }
    }

    fn scroll_into_view(&self, id: &str) {
        self.with_el(id, |el| el.scroll_into_view_count += 1);
    }

    fn scroll_to_bottom(&self, id: &str) {
        self.with_el(id, |el| el.scrolled_to_bottom += 1);
    }

    fn append_node(&self, parent: &str, node: Node) {
        let mut guard = self.lock();
        let inner = &mut *guard;
        if let Some(el) = inner.elements.get_mut(parent) {
            el.children.push(node.clone());
            inner.journal.push(PageEvent::Appended {
                parent: parent.to_string(),
                node,
            });
        }
    }

    fn remove(&self, id: &str) -> bool {
        let mut inner = self.lock();
        let mut removed = inner.elements.remove(id).is_some();
        if !removed {
            for el in inner.elements.values_mut() {
                if let Some(pos) = el.children.iter().position(|n| n.id.as_deref() == Some(id)) {
                    el.children.remove(pos);
                    removed = true;
                    break;
                }
            }
        }
        if removed {
            inner.journal.push(PageEvent::Removed { id: id.to_string() });
        }
        removed
    }

    fn alert(&self, message: &str) {
        self.lock().journal.push(PageEvent::Alert(message.to_string()));
    }

    fn selected_file(&self, input_id: &str) -> Option<FileSelection> {
        self.lock()
            .elements
            .get(input_id)
            .and_then(|el| el.file.as_ref())
            .map(|f| FileSelection {
                name: f.file_name.clone(),
                mime: f.mime.clone(),
                size: f.bytes.len() as u64,
            })
    }

    async fn read_file(&self, input_id: &str) -> Result<Upload, UiError> {
        self.lock()
            .elements
            .get(input_id)
            .and_then(|el| el.file.clone())
            .ok_or_else(|| UiError::File {
                name: input_id.to_string(),
                detail: "no file selected".to_string(),
            })
    }
}
