//! Floating chat widget.
//!
//! The panel is `Closed`, `Open` or `Minimized` (a sub-state of open).
//! Sending appends a user bubble, clears the input, shows a typing
//! placeholder, relays the text with the session id and then swaps the
//! placeholder for the bot's reply. Failures of any kind end in one fixed
//! fallback bubble; the cause is only logged.

use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::client::ChatApi;
use crate::format::format_message;
use crate::page::{ids, require_elements, Node, Page};
use crate::storage::{self, KeyValueStore};

/// Bot text shown when the messaging endpoint fails.
pub const CHAT_FALLBACK_MESSAGE: &str = "Lo siento, hubo un error. Por favor intenta de nuevo.";

/// Elements without which the widget cannot work.
pub const REQUIRED_ELEMENTS: &[&str] = &[
    ids::CHATBOT_CONTAINER,
    ids::CHATBOT_MESSAGES,
    ids::CHATBOT_INPUT,
    ids::CHATBOT_SEND,
    ids::CHATBOT_TOGGLE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    fn class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Sender::User => "fa-user",
            Sender::Bot => "fa-robot",
        }
    }
}

/// What a send attempt ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Trimmed input was empty; nothing happened.
    Empty,
    /// The bot replied with this text.
    Replied(String),
    /// The request failed and the fallback bubble was shown.
    Fallback,
}

/// Markup inside one message bubble.
pub fn bubble_html(text: &str, sender: Sender) -> String {
    format!(
        r#"<div class="message-avatar"><i class="fas {}"></i></div><div class="message-content"><p>{}</p></div>"#,
        sender.icon(),
        format_message(text)
    )
}

const TYPING_HTML: &str = r#"<div class="message-avatar"><i class="fas fa-robot"></i></div><div class="message-content"><div class="typing-indicator"><span></span><span></span><span></span></div></div>"#;

pub struct ChatWidget<P: Page, A: ChatApi, S: KeyValueStore> {
    page: Rc<P>,
    api: A,
    store: S,
    state: Cell<PanelState>,
    badge_dismissed: Cell<bool>,
    /// Replies still outstanding; the typing placeholder lives while > 0.
    awaiting: Cell<usize>,
}

impl<P: Page, A: ChatApi, S: KeyValueStore> ChatWidget<P, A, S> {
    /// Bind to the page. Fails when a required element is missing.
    pub fn new(page: Rc<P>, api: A, store: S) -> Result<Self, crate::error::UiError> {
        require_elements(page.as_ref(), REQUIRED_ELEMENTS)?;
        info!("chat widget ready");
        Ok(Self {
            page,
            api,
            store,
            state: Cell::new(PanelState::Closed),
            badge_dismissed: Cell::new(false),
            awaiting: Cell::new(0),
        })
    }

    pub fn state(&self) -> PanelState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get() != PanelState::Closed
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Reveal the panel, clear the minimized flag, focus the input and
    /// dismiss the "new" badge for good.
    pub fn open(&self) {
        debug!("chat panel opened");
        self.page.remove_class(ids::CHATBOT_CONTAINER, ids::HIDDEN);
        self.page.remove_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED);
        self.state.set(PanelState::Open);
        self.page.focus(ids::CHATBOT_INPUT);
        if !self.badge_dismissed.replace(true) {
            self.page.hide(ids::CHATBOT_BADGE);
        }
    }

    /// Hide the panel. Message history is kept.
    pub fn close(&self) {
        debug!("chat panel closed");
        self.page.add_class(ids::CHATBOT_CONTAINER, ids::HIDDEN);
        self.state.set(PanelState::Closed);
    }

    /// Flip between open and minimized. Ignored while closed.
    pub fn minimize(&self) {
        let next = match self.state.get() {
            PanelState::Closed => {
                debug!("minimize ignored while closed");
                return;
            }
            PanelState::Open => PanelState::Minimized,
            PanelState::Minimized => PanelState::Open,
        };
        self.page.toggle_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED);
        self.state.set(next);
    }

    /// Send whatever is in the input field.
    pub async fn send_message(&self) -> SendOutcome {
        let raw = self.page.value(ids::CHATBOT_INPUT).unwrap_or_default();
        let message = raw.trim();
        if message.is_empty() {
            debug!("empty chat message ignored");
            return SendOutcome::Empty;
        }

        self.add_message(message, Sender::User);
        self.page.set_value(ids::CHATBOT_INPUT, "");
        self.show_typing();

        let session = storage::session_id(&self.store);
        info!(chars = message.len(), "sending chat message");
        let result = self.api.send_message(message, &session).await;
        self.hide_typing();

        match result {
            Ok(reply) => {
                self.add_message(&reply, Sender::Bot);
                SendOutcome::Replied(reply)
            }
            Err(e) => {
                warn!(error = %e, "chat message failed");
                self.add_message(CHAT_FALLBACK_MESSAGE, Sender::Bot);
                SendOutcome::Fallback
            }
        }
    }

    /// Canned suggestion: pre-fill the input and send immediately.
    pub async fn send_suggestion(&self, message: &str) -> SendOutcome {
        self.page.set_value(ids::CHATBOT_INPUT, message);
        self.send_message().await
    }

    fn add_message(&self, text: &str, sender: Sender) {
        let class = format!("chatbot-message {}-message", sender.class());
        self.page
            .append_node(ids::CHATBOT_MESSAGES, Node::new(class, bubble_html(text, sender)));
        self.page.scroll_to_bottom(ids::CHATBOT_MESSAGES);
    }

    /// Overlapping sends share one typing placeholder: it is added by the
    /// first pending send and removed by `hide_typing` when the last settles.
    fn show_typing(&self) {
        let before = self.awaiting.get();
        self.awaiting.set(before + 1);
        if before == 0 {
            self.page.append_node(
                ids::CHATBOT_MESSAGES,
                Node::new("chatbot-message bot-message", TYPING_HTML).with_id(ids::TYPING_INDICATOR),
            );
            self.page.scroll_to_bottom(ids::CHATBOT_MESSAGES);
        }
    }

    fn hide_typing(&self) {
        let after = self.awaiting.get().saturating_sub(1);
        self.awaiting.set(after);
        if after == 0 {
            self.page.remove(ids::TYPING_INDICATOR);
        }
    }
}

/// True for the key that submits the chat input.
pub fn is_send_key(key: &str) -> bool {
    key == "Enter"
}
