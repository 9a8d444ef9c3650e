//! The four analysis forms and their file-input previews.
//!
//! Every submit follows the same protocol: validate the minimum input
//! (rejecting with an alert and no request), raise the loading overlay,
//! call the endpoint, render the typed result into the form's panel or
//! report the error, and drop the overlay on every exit path.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::future::Future;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::api::{MultimodalRequest, Upload};
use crate::client::AnalysisApi;
use crate::error::UiError;
use crate::page::{ids, require_elements, Page};
use crate::render;
use crate::ui::{LoadingTracker, UiService};

pub const TEXT_REQUIRED: &str = "Por favor escribe algún texto";
pub const AUDIO_REQUIRED: &str = "Por favor selecciona un archivo de audio";
pub const IMAGE_REQUIRED: &str = "Por favor selecciona una imagen";
pub const MULTIMODAL_REQUIRED: &str = "Debes proporcionar al menos texto, audio o imagen";

/// Elements the four forms read from or render into.
pub const REQUIRED_ELEMENTS: &[&str] = &[
    ids::INPUT_TEXT,
    ids::RESULT_TEXT,
    ids::INPUT_AUDIO,
    ids::RESULT_AUDIO,
    ids::INPUT_IMAGE,
    ids::RESULT_IMAGE,
    ids::INPUT_TEXT_MULTI,
    ids::INPUT_AUDIO_MULTI,
    ids::INPUT_IMAGE_MULTI,
    ids::RESULT_MULTIMODAL,
    ids::LOADING_OVERLAY,
];

/// What one submission ended in.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The result panel was filled and revealed.
    Rendered,
    /// Input validation failed; no request was sent.
    Rejected(&'static str),
    /// The request or file read failed; the error was reported.
    Failed(UiError),
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered)
    }
}

/// `data:` URL of a file, as a browser `FileReader` would produce.
pub fn data_url(upload: &Upload) -> String {
    let mime = if upload.mime.is_empty() {
        "application/octet-stream"
    } else {
        upload.mime.as_str()
    };
    format!("data:{mime};base64,{}", STANDARD.encode(&upload.bytes))
}

const CHECK_ICON: &str = r#"<i class="fas fa-check-circle"></i>"#;

pub struct AnalysisForms<P: Page, A: AnalysisApi, U: UiService> {
    page: Rc<P>,
    api: A,
    loading: LoadingTracker<U>,
}

impl<P: Page, A: AnalysisApi, U: UiService> AnalysisForms<P, A, U> {
    /// Bind to the page. Fails when a required element is missing.
    pub fn new(page: Rc<P>, api: A, ui: Rc<U>) -> Result<Self, UiError> {
        require_elements(page.as_ref(), REQUIRED_ELEMENTS)?;
        info!("analysis forms ready");
        Ok(Self {
            page,
            api,
            loading: LoadingTracker::new(ui),
        })
    }

    pub fn loading(&self) -> &LoadingTracker<U> {
        &self.loading
    }

    // -----------------------------------------------------------------------
    // Submissions
    // -----------------------------------------------------------------------

    pub async fn submit_text(&self) -> SubmitOutcome {
        let text = self.page.value(ids::INPUT_TEXT).unwrap_or_default();
        if text.trim().is_empty() {
            return self.reject(TEXT_REQUIRED);
        }
        self.run(ids::RESULT_TEXT, async {
            let data = self.api.analyze_text(&text).await?;
            Ok(render::render_text(&data))
        })
        .await
    }

    pub async fn submit_audio(&self) -> SubmitOutcome {
        if self.page.selected_file(ids::INPUT_AUDIO).is_none() {
            return self.reject(AUDIO_REQUIRED);
        }
        self.run(ids::RESULT_AUDIO, async {
            let file = self.page.read_file(ids::INPUT_AUDIO).await?;
            let data = self.api.analyze_audio(file).await?;
            Ok(render::render_audio(&data))
        })
        .await
    }

    pub async fn submit_image(&self) -> SubmitOutcome {
        if self.page.selected_file(ids::INPUT_IMAGE).is_none() {
            return self.reject(IMAGE_REQUIRED);
        }
        self.run(ids::RESULT_IMAGE, async {
            let file = self.page.read_file(ids::INPUT_IMAGE).await?;
            let data = self.api.analyze_image(file).await?;
            Ok(render::render_image(&data))
        })
        .await
    }

    pub async fn submit_multimodal(&self) -> SubmitOutcome {
        let text = self.page.value(ids::INPUT_TEXT_MULTI).unwrap_or_default();
        let has_text = !text.trim().is_empty();
        let has_audio = self.page.selected_file(ids::INPUT_AUDIO_MULTI).is_some();
        let has_image = self.page.selected_file(ids::INPUT_IMAGE_MULTI).is_some();
        if !has_text && !has_audio && !has_image {
            return self.reject(MULTIMODAL_REQUIRED);
        }
        self.run(ids::RESULT_MULTIMODAL, async {
            let mut request = MultimodalRequest::default();
            if has_text {
                request.text = Some(text.clone());
            }
            if has_audio {
                request.audio = Some(self.page.read_file(ids::INPUT_AUDIO_MULTI).await?);
            }
            if has_image {
                request.image = Some(self.page.read_file(ids::INPUT_IMAGE_MULTI).await?);
            }
            let data = self.api.analyze_multimodal(request).await?;
            Ok(render::render_multimodal(&data))
        })
        .await
    }

    fn reject(&self, message: &'static str) -> SubmitOutcome {
        debug!(reason = message, "form rejected before submit");
        self.loading.ui().report_error(message);
        SubmitOutcome::Rejected(message)
    }

    /// Shared protocol: overlay up, await `work`, render or report, overlay down.
    async fn run<F>(&self, target: &str, work: F) -> SubmitOutcome
    where
        F: Future<Output = Result<String, UiError>>,
    {
        let _loading = self.loading.begin();
        match work.await {
            Ok(html) => {
                self.show_result(target, &html);
                SubmitOutcome::Rendered
            }
            Err(e) => {
                warn!(panel = target, error = %e, "analysis failed");
                self.loading.ui().report_error(&e.to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn show_result(&self, target: &str, html: &str) {
        self.page.set_inner_html(target, html);
        self.page.remove_class(target, ids::HIDDEN);
        self.page.scroll_into_view(target);
    }

    // -----------------------------------------------------------------------
    // File-input bindings
    // -----------------------------------------------------------------------

    /// Show the selected image locally, before any request.
    pub async fn on_image_selected(&self) -> Result<(), UiError> {
        self.preview(ids::INPUT_IMAGE, ids::PREVIEW_IMG, ids::IMAGE_PREVIEW)
            .await
    }

    /// Show `Archivo: <name>` for the selected audio file, or nothing.
    pub fn on_audio_selected(&self) {
        let label = self
            .page
            .selected_file(ids::INPUT_AUDIO)
            .map(|f| format!("Archivo: {}", f.name))
            .unwrap_or_default();
        self.page.set_text(ids::AUDIO_FILE_NAME, &label);
    }

    pub async fn on_multimodal_image_selected(&self) -> Result<(), UiError> {
        if !self.mark_file_label(ids::INPUT_IMAGE_MULTI, ids::IMAGE_MULTI_FILE_NAME) {
            return Ok(());
        }
        self.preview(
            ids::INPUT_IMAGE_MULTI,
            ids::PREVIEW_IMG_MULTI,
            ids::IMAGE_MULTI_PREVIEW,
        )
        .await
    }

    pub fn on_multimodal_audio_selected(&self) {
        self.mark_file_label(ids::INPUT_AUDIO_MULTI, ids::AUDIO_MULTI_FILE_NAME);
    }

    fn mark_file_label(&self, input: &str, label: &str) -> bool {
        match self.page.selected_file(input) {
            Some(file) => {
                self.page
                    .set_inner_html(label, &format!("{CHECK_ICON} {}", file.name));
                self.page.add_class(label, ids::ACTIVE);
                true
            }
            None => false,
        }
    }

    async fn preview(&self, input: &str, img: &str, container: &str) -> Result<(), UiError> {
        if self.page.selected_file(input).is_none() {
            return Ok(());
        }
        let file = self.page.read_file(input).await?;
        debug!(file = %file.file_name, bytes = file.bytes.len(), "rendering local preview");
        self.page.set_attribute(img, "src", &data_url(&file));
        self.page.remove_class(container, ids::HIDDEN);
        Ok(())
    }
}
