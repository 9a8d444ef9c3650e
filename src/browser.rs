//! Browser entry point: `web-sys` implementations of [`Page`] and
//! [`KeyValueStore`], and the event wiring that connects the page's
//! controls to the controllers.

use async_trait::async_trait;
use std::rc::Rc;
use tracing::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, File, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Storage, Window,
};

use crate::api::Upload;
use crate::chat::{is_send_key, ChatWidget};
use crate::client::HttpClient;
use crate::error::UiError;
use crate::forms::AnalysisForms;
use crate::page::{ids, FileSelection, Node, Page};
use crate::storage::KeyValueStore;
use crate::tabs::TabSwitcher;
use crate::ui::PageUi;

fn js_detail(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// ---------------------------------------------------------------------------
// DomPage
// ---------------------------------------------------------------------------

pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window) -> Result<Self, UiError> {
        let document = window
            .document()
            .ok_or_else(|| UiError::MissingElement("document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn file(&self, input_id: &str) -> Option<File> {
        self.element(input_id)?
            .dyn_into::<HtmlInputElement>()
            .ok()?
            .files()?
            .get(0)
    }
}

#[async_trait(?Send)]
impl Page for DomPage {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn value(&self, id: &str) -> Option<String> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        el.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())
    }

    fn set_value(&self, id: &str, value: &str) {
        let Some(el) = self.element(id) else { return };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(el) = self.element(id) {
            el.set_inner_html(html);
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn add_class(&self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(&self, id: &str, class: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.class_list().remove_1(class);
        }
    }

    fn toggle_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .and_then(|el| el.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.element(id) {
            let _ = el.set_attribute(name, value);
        }
    }

    fn hide(&self, id: &str) {
        if let Some(el) = self.html_element(id) {
            let _ = el.style().set_property("display", "none");
        }
    }

    fn focus(&self, id: &str) {
        if let Some(el) = self.html_element(id) {
            let _ = el.focus();
        }
    }

    fn scroll_into_view(&self, id: &str) {
        if let Some(el) = self.element(id) {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Nearest);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    }

    fn scroll_to_bottom(&self, id: &str) {
        if let Some(el) = self.element(id) {
            el.set_scroll_top(el.scroll_height());
        }
    }

    fn append_node(&self, parent: &str, node: Node) {
        let Some(parent) = self.element(parent) else { return };
        let child = match self.document.create_element("div") {
            Ok(c) => c,
            Err(e) => {
                error!(detail = %js_detail(&e), "create_element failed");
                return;
            }
        };
        child.set_class_name(&node.class);
        if let Some(id) = &node.id {
            child.set_id(id);
        }
        child.set_inner_html(&node.html);
        if let Err(e) = parent.append_child(&child) {
            error!(detail = %js_detail(&e), "append_child failed");
        }
    }

    fn remove(&self, id: &str) -> bool {
        match self.element(id) {
            Some(el) => {
                el.remove();
                true
            }
            None => false,
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn selected_file(&self, input_id: &str) -> Option<FileSelection> {
        self.file(input_id).map(|f| FileSelection {
            name: f.name(),
            mime: f.type_(),
            size: f.size() as u64,
        })
    }

    async fn read_file(&self, input_id: &str) -> Result<Upload, UiError> {
        let file = self.file(input_id).ok_or_else(|| UiError::File {
            name: input_id.to_string(),
            detail: "no file selected".to_string(),
        })?;
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| UiError::File {
                name: file.name(),
                detail: js_detail(&e),
            })?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(Upload::new(file.name(), file.type_(), bytes))
    }
}

// ---------------------------------------------------------------------------
// LocalStorageStore
// ---------------------------------------------------------------------------

/// `window.localStorage`. When storage is disabled every read misses and
/// every write fails.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            warn!("localStorage unavailable; chat session will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| UiError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| UiError::Storage(js_detail(&e)))
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

type Chat = ChatWidget<DomPage, HttpClient, LocalStorageStore>;
type Forms = AnalysisForms<DomPage, HttpClient, PageUi<DomPage>>;

/// Attach `handler` to `event` on `target`. Listeners live as long as the page.
fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        error!(event, detail = %js_detail(&e), "add_event_listener failed");
    }
    closure.forget();
}

fn listen_id(page: &DomPage, id: &str, event: &str, handler: impl FnMut(Event) + 'static) {
    match page.element(id) {
        Some(el) => listen(&el, event, handler),
        None => debug!(id, "no element to listen on"),
    }
}

fn wire_chat(page: &DomPage, chat: Rc<Chat>) {
    let c = Rc::clone(&chat);
    listen_id(page, ids::CHATBOT_TOGGLE, "click", move |_| c.toggle());
    let c = Rc::clone(&chat);
    listen_id(page, ids::CHATBOT_CLOSE, "click", move |_| c.close());
    let c = Rc::clone(&chat);
    listen_id(page, ids::CHATBOT_MINIMIZE, "click", move |_| c.minimize());

    let c = Rc::clone(&chat);
    listen_id(page, ids::CHATBOT_SEND, "click", move |_| {
        let c = Rc::clone(&c);
        spawn_local(async move {
            c.send_message().await;
        });
    });

    let c = Rc::clone(&chat);
    listen_id(page, ids::CHATBOT_INPUT, "keypress", move |event| {
        let key = event.dyn_ref::<KeyboardEvent>().map(|k| k.key());
        if key.as_deref().is_some_and(is_send_key) {
            let c = Rc::clone(&c);
            spawn_local(async move {
                c.send_message().await;
            });
        }
    });

    let buttons = match page
        .document()
        .query_selector_all(&format!(".{}", ids::SUGGESTION_BUTTON))
    {
        Ok(list) => list,
        Err(e) => {
            error!(detail = %js_detail(&e), "suggestion lookup failed");
            return;
        }
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let c = Rc::clone(&chat);
        let source = button.clone();
        listen(&button, "click", move |event| {
            let Some(message) = claim_suggestion_click(&event, &source) else {
                return;
            };
            let c = Rc::clone(&c);
            spawn_local(async move {
                c.send_suggestion(&message).await;
            });
        });
    }
}

/// Keep a suggestion click from reaching the page and return the message
/// the button carries.
fn claim_suggestion_click(event: &Event, button: &Element) -> Option<String> {
    event.prevent_default();
    event.stop_propagation();
    button.get_attribute("data-message")
}

fn wire_forms(page: &DomPage, forms: Rc<Forms>) {
    let f = Rc::clone(&forms);
    listen_id(page, ids::FORM_TEXT, "submit", move |event| {
        event.prevent_default();
        let f = Rc::clone(&f);
        spawn_local(async move {
            f.submit_text().await;
        });
    });
    let f = Rc::clone(&forms);
    listen_id(page, ids::FORM_AUDIO, "submit", move |event| {
        event.prevent_default();
        let f = Rc::clone(&f);
        spawn_local(async move {
            f.submit_audio().await;
        });
    });
    let f = Rc::clone(&forms);
    listen_id(page, ids::FORM_IMAGE, "submit", move |event| {
        event.prevent_default();
        let f = Rc::clone(&f);
        spawn_local(async move {
            f.submit_image().await;
        });
    });
    let f = Rc::clone(&forms);
    listen_id(page, ids::FORM_MULTIMODAL, "submit", move |event| {
        event.prevent_default();
        let f = Rc::clone(&f);
        spawn_local(async move {
            f.submit_multimodal().await;
        });
    });

    let f = Rc::clone(&forms);
    listen_id(page, ids::INPUT_AUDIO, "change", move |_| f.on_audio_selected());
    let f = Rc::clone(&forms);
    listen_id(page, ids::INPUT_AUDIO_MULTI, "change", move |_| {
        f.on_multimodal_audio_selected()
    });
    let f = Rc::clone(&forms);
    listen_id(page, ids::INPUT_IMAGE, "change", move |_| {
        let f = Rc::clone(&f);
        spawn_local(async move {
            if let Err(e) = f.on_image_selected().await {
                warn!(error = %e, "image preview failed");
            }
        });
    });
    let f = Rc::clone(&forms);
    listen_id(page, ids::INPUT_IMAGE_MULTI, "change", move |_| {
        let f = Rc::clone(&f);
        spawn_local(async move {
            if let Err(e) = f.on_multimodal_image_selected().await {
                warn!(error = %e, "image preview failed");
            }
        });
    });
}

fn wire_tabs(page: &DomPage, tabs: Rc<TabSwitcher<DomPage>>) {
    let buttons: Vec<String> = tabs.button_ids().map(str::to_string).collect();
    for button in buttons {
        let t = Rc::clone(&tabs);
        let id = button.clone();
        listen_id(page, &button, "click", move |_| {
            if let Err(e) = t.activate(&id) {
                warn!(error = %e, "tab switch failed");
            }
        });
    }
}

/// Send panics and `tracing` events to the browser console. Safe to call
/// more than once.
fn init_logging() {
    console_error_panic_hook::set_once();
    if tracing_wasm::try_set_as_global_default().is_err() {
        debug!("tracing subscriber already installed");
    }
}

/// Runs when the module is instantiated. Each part of the page is wired
/// independently; a part whose elements are missing is skipped and logged.
#[wasm_bindgen(start)]
pub fn boot() -> Result<(), JsValue> {
    init_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let origin = window.location().origin()?;
    let store = LocalStorageStore::new(&window);
    let page = Rc::new(DomPage::new(window).map_err(|e| JsValue::from_str(&e.to_string()))?);
    let client = HttpClient::new(origin);

    match ChatWidget::new(Rc::clone(&page), client.clone(), store) {
        Ok(chat) => wire_chat(&page, Rc::new(chat)),
        Err(e) => error!(error = %e, "chat widget disabled"),
    }

    let ui = Rc::new(PageUi::new(Rc::clone(&page)));
    match AnalysisForms::new(Rc::clone(&page), client, ui) {
        Ok(forms) => wire_forms(&page, Rc::new(forms)),
        Err(e) => error!(error = %e, "analysis forms disabled"),
    }

    wire_tabs(&page, Rc::new(TabSwitcher::new(Rc::clone(&page))));
    Ok(())
}
