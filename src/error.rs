//! Crate-level error type.
//!
//! Every fallible operation in the crate returns [`UiError`]. The `Display`
//! text of a variant is exactly what the page surfaces to the user (prefixed
//! with `Error: ` by [`crate::ui::PageUi`]), so variants that come from the
//! server carry the server's own wording.

use thiserror::Error;

/// Message surfaced when an analysis endpoint fails without a `detail` field.
pub const ANALYSIS_FALLBACK_DETAIL: &str = "Error en el análisis";

/// Message surfaced when the chat endpoint fails without a `detail` field.
pub const CHAT_FALLBACK_DETAIL: &str = "Error en la respuesta del servidor";

#[derive(Debug, Error)]
pub enum UiError {
    /// A client-side precondition failed; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a readable response.
    #[error("{detail}")]
    Transport { url: String, detail: String },

    /// The server answered with a non-2xx status.
    #[error("{detail}")]
    Server { status: u16, detail: String },

    /// A 2xx body did not have the shape the renderer needs.
    #[error("respuesta inválida de {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },

    /// The page does not contain an element the controller depends on.
    #[error("elemento no encontrado: #{0}")]
    MissingElement(String),

    /// A selected file could not be read.
    #[error("no se pudo leer {name}: {detail}")]
    File { name: String, detail: String },

    #[error("almacenamiento: {0}")]
    Storage(String),

    #[error("configuración: {0}")]
    Config(String),
}

impl UiError {
    /// True for errors raised before any request left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, UiError::Validation(_))
    }

    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            UiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
