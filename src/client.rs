//! HTTP client for the feedback analysis API.
//!
//! The controllers never talk to `reqwest` directly: they are generic over
//! [`ChatApi`] and [`AnalysisApi`], so tests drive them with fixture doubles
//! and the browser build plugs in the same [`HttpClient`] compiled for wasm.
//! All requests are multipart `POST`s with a JSON response; there is no
//! retry and no cancellation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{
    guess_mime, AudioAnalysis, ChatReply, ErrorBody, Health, ImageAnalysis, MultimodalAnalysis,
    MultimodalRequest, TextAnalysis, Upload, AUDIO_PATH, CHAT_PATH, HEALTH_PATH, IMAGE_PATH,
    MULTIMODAL_PATH, TEXT_PATH,
};
use crate::config::ClientConfig;
use crate::error::{UiError, ANALYSIS_FALLBACK_DETAIL, CHAT_FALLBACK_DETAIL};

/// The messaging endpoint used by the chat widget.
#[async_trait(?Send)]
pub trait ChatApi {
    /// Send one user message and return the bot's reply text.
    async fn send_message(&self, message: &str, session_id: &str) -> Result<String, UiError>;
}

/// The four analysis endpoints used by the forms.
#[async_trait(?Send)]
pub trait AnalysisApi {
    async fn analyze_text(&self, text: &str) -> Result<TextAnalysis, UiError>;
    async fn analyze_audio(&self, file: Upload) -> Result<AudioAnalysis, UiError>;
    async fn analyze_image(&self, file: Upload) -> Result<ImageAnalysis, UiError>;
    async fn analyze_multimodal(
        &self,
        request: MultimodalRequest,
    ) -> Result<MultimodalAnalysis, UiError>;
}

/// `reqwest`-backed implementation of both API traits.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Client with no request timeout, aimed at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Client built from a loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        #[allow(unused_mut)]
        let mut builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        // Building only fails in broken TLS environments; fall back to defaults there.
        let client = builder.build().unwrap_or_default();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Query `/api/health`.
    pub async fn health(&self) -> Result<Health, UiError> {
        let url = self.url(HEALTH_PATH);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UiError::Transport {
                url: url.clone(),
                detail: e.to_string(),
            })?;
        read_json(resp, &url, HEALTH_PATH, ANALYSIS_FALLBACK_DETAIL).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        fallback: &str,
    ) -> Result<T, UiError> {
        let url = self.url(path);
        info!(%url, "POST");
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UiError::Transport {
                url: url.clone(),
                detail: e.to_string(),
            })?;
        read_json(resp, &url, path, fallback).await
    }
}

/// Turn a response into `T`, or into the error the page should surface.
async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    url: &str,
    endpoint: &str,
    fallback: &str,
) -> Result<T, UiError> {
    let status = resp.status();
    let bytes = resp.bytes().await.map_err(|e| UiError::Transport {
        url: url.to_string(),
        detail: e.to_string(),
    })?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.detail)
            .unwrap_or_else(|| fallback.to_string());
        warn!(status = status.as_u16(), %url, %detail, "server rejected request");
        return Err(UiError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_slice::<T>(&bytes).map_err(|e| UiError::Decode {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })
}

/// Multipart part for a file. An empty MIME type is guessed from the name.
fn file_part(upload: Upload) -> Result<Part, UiError> {
    let name = upload.file_name.clone();
    let mime = if upload.mime.is_empty() {
        guess_mime(&upload.file_name).to_string()
    } else {
        upload.mime
    };
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&mime)
        .map_err(|e| UiError::File {
            name,
            detail: e.to_string(),
        })
}

#[async_trait(?Send)]
impl ChatApi for HttpClient {
    async fn send_message(&self, message: &str, session_id: &str) -> Result<String, UiError> {
        let form = Form::new()
            .text("message", message.to_string())
            .text("session_id", session_id.to_string());
        let reply: ChatReply = self.post_form(CHAT_PATH, form, CHAT_FALLBACK_DETAIL).await?;
        Ok(reply.response)
    }
}

#[async_trait(?Send)]
impl AnalysisApi for HttpClient {
    async fn analyze_text(&self, text: &str) -> Result<TextAnalysis, UiError> {
        let form = Form::new().text("text", text.to_string());
        self.post_form(TEXT_PATH, form, ANALYSIS_FALLBACK_DETAIL).await
    }

    async fn analyze_audio(&self, file: Upload) -> Result<AudioAnalysis, UiError> {
        let form = Form::new().part("file", file_part(file)?);
        self.post_form(AUDIO_PATH, form, ANALYSIS_FALLBACK_DETAIL).await
    }

    async fn analyze_image(&self, file: Upload) -> Result<ImageAnalysis, UiError> {
        let form = Form::new().part("file", file_part(file)?);
        self.post_form(IMAGE_PATH, form, ANALYSIS_FALLBACK_DETAIL).await
    }

    async fn analyze_multimodal(
        &self,
        request: MultimodalRequest,
    ) -> Result<MultimodalAnalysis, UiError> {
        let mut form = Form::new();
        if let Some(text) = request.text {
            form = form.text("text", text);
        }
        if let Some(audio) = request.audio {
            form = form.part("audio_file", file_part(audio)?);
        }
        if let Some(image) = request.image {
            form = form.part("image_file", file_part(image)?);
        }
        self.post_form(MULTIMODAL_PATH, form, ANALYSIS_FALLBACK_DETAIL)
            .await
    }
}
