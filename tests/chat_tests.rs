//! Chat widget behaviour against an in-memory page and a fixture API.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

use feedback_lens::chat::{ChatWidget, PanelState, SendOutcome, CHAT_FALLBACK_MESSAGE};
use feedback_lens::client::ChatApi;
use feedback_lens::page::{ids, MemoryPage, Page, PageEvent};
use feedback_lens::storage::{KeyValueStore, MemoryStore, SESSION_KEY};
use feedback_lens::UiError;

/// Replies queued up front, or handed over through gates while a send is
/// in flight.
#[derive(Default)]
struct FixtureChat {
    replies: RefCell<VecDeque<Result<String, UiError>>>,
    gates: RefCell<VecDeque<oneshot::Receiver<Result<String, UiError>>>>,
    calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl FixtureChat {
    fn replying(replies: Vec<Result<String, UiError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            ..Self::default()
        }
    }

    fn gated(gates: Vec<oneshot::Receiver<Result<String, UiError>>>) -> Self {
        Self {
            gates: RefCell::new(gates.into()),
            ..Self::default()
        }
    }

    /// Handle on the `(message, session_id)` pairs the widget sent.
    fn calls(&self) -> Rc<RefCell<Vec<(String, String)>>> {
        Rc::clone(&self.calls)
    }
}

#[async_trait(?Send)]
impl ChatApi for FixtureChat {
    async fn send_message(&self, message: &str, session_id: &str) -> Result<String, UiError> {
        self.calls
            .borrow_mut()
            .push((message.to_string(), session_id.to_string()));
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            return gate.await.unwrap_or_else(|_| {
                Err(UiError::Transport {
                    url: "gate".into(),
                    detail: "dropped".into(),
                })
            });
        }
        let next = self.replies.borrow_mut().pop_front();
        next.unwrap_or_else(|| Ok("ok".to_string()))
    }
}

fn widget(api: FixtureChat) -> (Rc<MemoryPage>, ChatWidget<MemoryPage, FixtureChat, MemoryStore>) {
    let page = Rc::new(MemoryPage::with_layout());
    let widget = ChatWidget::new(Rc::clone(&page), api, MemoryStore::new()).expect("widget");
    (page, widget)
}

/// Appends and removals under the message list, as short labels.
fn message_events(page: &MemoryPage) -> Vec<String> {
    page.journal()
        .into_iter()
        .filter_map(|e| match e {
            PageEvent::Appended { parent, node } if parent == ids::CHATBOT_MESSAGES => {
                if node.id.as_deref() == Some(ids::TYPING_INDICATOR) {
                    Some("typing".to_string())
                } else if node.class.contains("user-message") {
                    Some("user".to_string())
                } else {
                    Some("bot".to_string())
                }
            }
            PageEvent::Removed { id } if id == ids::TYPING_INDICATOR => Some("untyping".to_string()),
            _ => None,
        })
        .collect()
}

// -- send / receive --

#[tokio::test]
async fn test_send_appends_user_typing_then_bot() {
    let (page, widget) = widget(FixtureChat::replying(vec![Ok("Hola, ¿en qué te ayudo?".into())]));
    page.set_value(ids::CHATBOT_INPUT, "  hola  ");

    let outcome = widget.send_message().await;

    assert_eq!(outcome, SendOutcome::Replied("Hola, ¿en qué te ayudo?".into()));
    assert_eq!(message_events(&page), vec!["user", "typing", "untyping", "bot"]);
    assert_eq!(page.value(ids::CHATBOT_INPUT).as_deref(), Some(""));

    let children = page.children(ids::CHATBOT_MESSAGES);
    assert_eq!(children.len(), 2);
    assert!(children[0].html.contains("<p>hola</p>"));
    assert!(children[1].html.contains("fa-robot"));
    assert!(!page.contains(ids::TYPING_INDICATOR));
}

#[tokio::test]
async fn test_empty_input_does_nothing() {
    let (page, widget) = widget(FixtureChat::default());
    page.set_value(ids::CHATBOT_INPUT, "   \n ");

    assert_eq!(widget.send_message().await, SendOutcome::Empty);
    assert!(message_events(&page).is_empty());
    assert!(page.children(ids::CHATBOT_MESSAGES).is_empty());
}

#[tokio::test]
async fn test_empty_input_issues_no_request() {
    let api = FixtureChat::default();
    let calls = api.calls();
    let (page, widget) = widget(api);
    page.set_value(ids::CHATBOT_INPUT, "  ");
    widget.send_message().await;
    assert!(calls.borrow().is_empty());
    assert!(widget.store().get(SESSION_KEY).is_none());
}

#[tokio::test]
async fn test_failure_shows_fallback_bubble() {
    let (page, widget) = widget(FixtureChat::replying(vec![Err(UiError::Server {
        status: 500,
        detail: "boom".into(),
    })]));
    page.set_value(ids::CHATBOT_INPUT, "hola");

    assert_eq!(widget.send_message().await, SendOutcome::Fallback);
    assert_eq!(message_events(&page), vec!["user", "typing", "untyping", "bot"]);
    let bot = page.children(ids::CHATBOT_MESSAGES).pop().expect("bot bubble");
    assert!(bot.html.contains(CHAT_FALLBACK_MESSAGE));
    assert!(!bot.html.contains("boom"));
    assert!(page.alerts().is_empty());
}

#[tokio::test]
async fn test_reply_markup_is_formatted() {
    let (page, widget) = widget(FixtureChat::replying(vec![Ok("a\n**b**\n*c*".into())]));
    page.set_value(ids::CHATBOT_INPUT, "x");
    widget.send_message().await;
    let bot = page.children(ids::CHATBOT_MESSAGES).pop().expect("bot bubble");
    assert!(bot.html.contains("a<br><strong>b</strong><br><em>c</em>"));
}

#[tokio::test]
async fn test_session_id_created_once_and_reused() {
    let api = FixtureChat::default();
    let calls = api.calls();
    let (page, widget) = widget(api);
    for text in ["uno", "dos", "tres"] {
        page.set_value(ids::CHATBOT_INPUT, text);
        widget.send_message().await;
    }
    let stored = widget.store().get(SESSION_KEY).expect("session persisted");
    assert!(stored.starts_with("session_"));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(_, session)| *session == stored));
}

#[tokio::test]
async fn test_messages_carry_stable_session_id() {
    let api = FixtureChat::default();
    let calls = api.calls();
    let page = Rc::new(MemoryPage::with_layout());
    let store = MemoryStore::new();
    store.set(SESSION_KEY, "session_42_abcdefghi").expect("seed");
    let widget = ChatWidget::new(Rc::clone(&page), api, store).expect("widget");

    page.set_value(ids::CHATBOT_INPUT, "  hola  ");
    widget.send_message().await;
    page.set_value(ids::CHATBOT_INPUT, "dos");
    widget.send_message().await;

    let id = "session_42_abcdefghi".to_string();
    assert_eq!(widget.store().get(SESSION_KEY).as_deref(), Some(id.as_str()));
    assert_eq!(
        *calls.borrow(),
        vec![("hola".to_string(), id.clone()), ("dos".to_string(), id)]
    );
}

#[tokio::test]
async fn test_suggestion_fills_input_and_sends() {
    let api = FixtureChat::replying(vec![Ok("Claro".into())]);
    let calls = api.calls();
    let (page, widget) = widget(api);
    let outcome = widget.send_suggestion("¿Qué puedes hacer?").await;
    assert_eq!(outcome, SendOutcome::Replied("Claro".into()));
    let user = &page.children(ids::CHATBOT_MESSAGES)[0];
    assert!(user.class.contains("user-message"));
    assert!(user.html.contains("¿Qué puedes hacer?"));
    assert_eq!(page.value(ids::CHATBOT_INPUT).as_deref(), Some(""));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "¿Qué puedes hacer?");
}

#[tokio::test]
async fn test_concurrent_sends_share_one_typing_placeholder() {
    let (tx1, rx1) = oneshot::channel();
    let (tx2, rx2) = oneshot::channel();
    let (page, widget) = widget(FixtureChat::gated(vec![rx1, rx2]));

    let first = async {
        page.set_value(ids::CHATBOT_INPUT, "uno");
        widget.send_message().await
    };
    let second = async {
        page.set_value(ids::CHATBOT_INPUT, "dos");
        widget.send_message().await
    };
    let driver = async {
        let _ = tx1.send(Ok("r1".to_string()));
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(page.contains(ids::TYPING_INDICATOR));
        let _ = tx2.send(Ok("r2".to_string()));
    };
    let (a, b, ()) = tokio::join!(first, second, driver);

    assert_eq!(a, SendOutcome::Replied("r1".into()));
    assert_eq!(b, SendOutcome::Replied("r2".into()));
    let events = message_events(&page);
    assert_eq!(events.iter().filter(|e| *e == "typing").count(), 1);
    assert_eq!(events.iter().filter(|e| *e == "untyping").count(), 1);
    assert_eq!(events.last().map(String::as_str), Some("bot"));
    assert!(!page.contains(ids::TYPING_INDICATOR));
}

// -- panel state --

#[test]
fn test_toggle_opens_and_closes() {
    let (page, widget) = widget(FixtureChat::default());
    assert_eq!(widget.state(), PanelState::Closed);

    widget.toggle();
    assert_eq!(widget.state(), PanelState::Open);
    assert!(!page.has_class(ids::CHATBOT_CONTAINER, ids::HIDDEN));
    assert!(page.element(ids::CHATBOT_INPUT).expect("input").focused);

    widget.toggle();
    assert_eq!(widget.state(), PanelState::Closed);
    assert!(page.has_class(ids::CHATBOT_CONTAINER, ids::HIDDEN));
}

#[test]
fn test_open_hides_badge() {
    let (page, widget) = widget(FixtureChat::default());
    assert!(!page.element(ids::CHATBOT_BADGE).expect("badge").style_hidden);
    widget.open();
    assert!(page.element(ids::CHATBOT_BADGE).expect("badge").style_hidden);
}

#[test]
fn test_minimize_flips_and_reopen_clears_it() {
    let (page, widget) = widget(FixtureChat::default());
    widget.open();
    widget.minimize();
    assert_eq!(widget.state(), PanelState::Minimized);
    assert!(page.has_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED));

    widget.minimize();
    assert_eq!(widget.state(), PanelState::Open);
    assert!(!page.has_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED));

    widget.minimize();
    widget.close();
    widget.open();
    assert_eq!(widget.state(), PanelState::Open);
    assert!(!page.has_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED));
}

#[test]
fn test_minimize_while_closed_is_ignored() {
    let (page, widget) = widget(FixtureChat::default());
    widget.minimize();
    assert_eq!(widget.state(), PanelState::Closed);
    assert!(!page.has_class(ids::CHATBOT_CONTAINER, ids::MINIMIZED));
}

#[tokio::test]
async fn test_close_keeps_history() {
    let (page, widget) = widget(FixtureChat::default());
    widget.open();
    page.set_value(ids::CHATBOT_INPUT, "hola");
    widget.send_message().await;
    widget.close();
    widget.open();
    assert_eq!(page.children(ids::CHATBOT_MESSAGES).len(), 2);
}

#[test]
fn test_missing_elements_fail_init() {
    let page = Rc::new(MemoryPage::with_elements(&[
        ids::CHATBOT_CONTAINER,
        ids::CHATBOT_MESSAGES,
    ]));
    match ChatWidget::new(page, FixtureChat::default(), MemoryStore::new()) {
        Err(UiError::MissingElement(id)) => assert_eq!(id, ids::CHATBOT_INPUT),
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("widget should not bind"),
    }
}
