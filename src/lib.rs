//! Feedback Lens: the chat widget and analysis forms of the feedback
//! analysis page.
//!
//! The controllers ([`chat::ChatWidget`], [`forms::AnalysisForms`],
//! [`tabs::TabSwitcher`]) are generic over a [`page::Page`], the API client
//! traits in [`client`] and a [`storage::KeyValueStore`]. Compiled for
//! `wasm32` with the `wasm` feature, the `browser` module binds them to the live DOM;
//! natively they run against [`page::MemoryPage`] for tests and the
//! `feedback-lens` terminal client.

pub mod api;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod page;
pub mod render;
pub mod storage;
pub mod tabs;
pub mod ui;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod browser;

pub use error::UiError;
