#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    use colored::*;

    if let Err(e) = app::run().await {
        eprintln!("{} {e}", "error:".bright_red().bold());
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod app {
    use clap::{CommandFactory, Parser};
    use colored::*;
    use std::io;
    use std::path::Path;
    use std::rc::Rc;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tracing::debug;
    use tracing_subscriber::EnvFilter;

    use feedback_lens::api::{guess_mime, MultimodalRequest, Upload};
    use feedback_lens::chat::{ChatWidget, SendOutcome, CHAT_FALLBACK_MESSAGE};
    use feedback_lens::cli::{AnalyzeTarget, Args, Command, OutputFormat};
    use feedback_lens::client::{AnalysisApi, HttpClient};
    use feedback_lens::config::ClientConfig;
    use feedback_lens::forms::{self, AnalysisForms, SubmitOutcome};
    use feedback_lens::page::{ids, MemoryPage, Page};
    use feedback_lens::storage::{self, FileStore};
    use feedback_lens::ui::PageUi;
    use feedback_lens::web::{self, DevServer};
    use feedback_lens::UiError;

    type BoxError = Box<dyn std::error::Error>;

    pub async fn run() -> Result<(), BoxError> {
        let args = Args::parse();

        if let Command::Completions { shell } = args.command {
            clap_complete::generate(shell, &mut Args::command(), "feedback-lens", &mut io::stdout());
            return Ok(());
        }

        let mut config = ClientConfig::load(args.config.as_deref())?;
        if let Some(url) = args.base_url {
            config = config.with_base_url(url)?;
        }
        init_tracing(&config.log_filter);
        debug!(base_url = %config.base_url, "configuration loaded");

        match args.command {
            Command::Chat { message } => chat(&config, message).await,
            Command::Analyze { output, target } => match output {
                OutputFormat::Html => analyze_html(&config, target).await,
                OutputFormat::Json => analyze_json(&config, target).await,
            },
            Command::Health => health(&config).await,
            Command::Serve { port, assets } => {
                web::serve(port, DevServer::new(config.base_url.clone(), assets))
                    .await
                    .map_err(|e| -> BoxError { e.to_string().into() })
            }
            Command::Completions { .. } => Ok(()),
        }
    }

    /// `RUST_LOG` wins over the configured filter. Logs go to stderr.
    fn init_tracing(default_filter: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    }

    fn load_upload(path: &Path) -> Result<Upload, UiError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| UiError::File {
            name: name.clone(),
            detail: e.to_string(),
        })?;
        let mime = guess_mime(&name);
        Ok(Upload::new(name, mime, bytes))
    }

    // -----------------------------------------------------------------------
    // chat
    // -----------------------------------------------------------------------

    async fn chat(config: &ClientConfig, message: Option<String>) -> Result<(), BoxError> {
        let page = Rc::new(MemoryPage::with_layout());
        let store = FileStore::open(&config.state_file)?;
        let widget = ChatWidget::new(Rc::clone(&page), HttpClient::from_config(config), store)?;
        widget.open();
        debug!(session = %storage::session_id(widget.store()), "chat session");

        if let Some(message) = message {
            page.set_value(ids::CHATBOT_INPUT, &message);
            print_reply(widget.send_message().await);
            return Ok(());
        }

        eprintln!(
            "{}",
            "  Escribe tu mensaje. /salir para terminar.".bright_blue()
        );
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        loop {
            stdout.write_all("tú> ".bright_cyan().to_string().as_bytes()).await?;
            stdout.flush().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if matches!(line.trim(), "/salir" | "/quit") {
                break;
            }
            page.set_value(ids::CHATBOT_INPUT, &line);
            print_reply(widget.send_message().await);
        }
        Ok(())
    }

    fn print_reply(outcome: SendOutcome) {
        match outcome {
            SendOutcome::Empty => {}
            SendOutcome::Replied(text) => println!("{} {text}", "bot>".bright_green()),
            SendOutcome::Fallback => {
                println!("{} {}", "bot>".bright_green(), CHAT_FALLBACK_MESSAGE.yellow())
            }
        }
    }

    // -----------------------------------------------------------------------
    // analyze
    // -----------------------------------------------------------------------

    /// Fill the form on an in-memory page, submit it, print the result panel.
    async fn analyze_html(config: &ClientConfig, target: AnalyzeTarget) -> Result<(), BoxError> {
        let page = Rc::new(MemoryPage::with_layout());
        let ui = Rc::new(PageUi::new(Rc::clone(&page)));
        let forms = AnalysisForms::new(Rc::clone(&page), HttpClient::from_config(config), ui)?;

        let (outcome, panel) = match target {
            AnalyzeTarget::Text { text } => {
                page.set_value(ids::INPUT_TEXT, &text);
                (forms.submit_text().await, ids::RESULT_TEXT)
            }
            AnalyzeTarget::Audio { file } => {
                page.select_file(ids::INPUT_AUDIO, load_upload(&file)?);
                (forms.submit_audio().await, ids::RESULT_AUDIO)
            }
            AnalyzeTarget::Image { file } => {
                page.select_file(ids::INPUT_IMAGE, load_upload(&file)?);
                (forms.submit_image().await, ids::RESULT_IMAGE)
            }
            AnalyzeTarget::Multimodal { text, audio, image } => {
                if let Some(text) = text {
                    page.set_value(ids::INPUT_TEXT_MULTI, &text);
                }
                if let Some(audio) = audio {
                    page.select_file(ids::INPUT_AUDIO_MULTI, load_upload(&audio)?);
                }
                if let Some(image) = image {
                    page.select_file(ids::INPUT_IMAGE_MULTI, load_upload(&image)?);
                }
                (forms.submit_multimodal().await, ids::RESULT_MULTIMODAL)
            }
        };

        match outcome {
            SubmitOutcome::Rendered => {
                println!("{}", page.inner_html(panel).unwrap_or_default());
                Ok(())
            }
            SubmitOutcome::Rejected(reason) => Err(UiError::Validation(reason.to_string()).into()),
            SubmitOutcome::Failed(e) => Err(e.into()),
        }
    }

    /// Call the endpoint directly and print the decoded response.
    async fn analyze_json(config: &ClientConfig, target: AnalyzeTarget) -> Result<(), BoxError> {
        let client = HttpClient::from_config(config);
        let value = match target {
            AnalyzeTarget::Text { text } => {
                if text.trim().is_empty() {
                    return Err(UiError::Validation(forms::TEXT_REQUIRED.into()).into());
                }
                serde_json::to_value(client.analyze_text(&text).await?)?
            }
            AnalyzeTarget::Audio { file } => {
                serde_json::to_value(client.analyze_audio(load_upload(&file)?).await?)?
            }
            AnalyzeTarget::Image { file } => {
                serde_json::to_value(client.analyze_image(load_upload(&file)?).await?)?
            }
            AnalyzeTarget::Multimodal { text, audio, image } => {
                let request = MultimodalRequest {
                    text: text.filter(|t| !t.trim().is_empty()),
                    audio: audio.as_deref().map(load_upload).transpose()?,
                    image: image.as_deref().map(load_upload).transpose()?,
                };
                if request.is_empty() {
                    return Err(UiError::Validation(forms::MULTIMODAL_REQUIRED.into()).into());
                }
                serde_json::to_value(client.analyze_multimodal(request).await?)?
            }
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // health
    // -----------------------------------------------------------------------

    async fn health(config: &ClientConfig) -> Result<(), BoxError> {
        let client = HttpClient::from_config(config);
        let health = client.health().await?;
        let status = if health.is_ok() {
            health.status.bright_green()
        } else {
            health.status.bright_yellow()
        };
        println!("{} {status}", "status: ".bold());
        println!("{} {}", "apis:   ".bold(), health.apis.join(", "));
        if let Some(chatbot) = &health.chatbot {
            let mode = health.chatbot_mode.as_deref().unwrap_or("-");
            println!("{} {chatbot} ({mode})", "chatbot:".bold());
        }
        println!("{} {}", "api:    ".bold(), client.base_url().dimmed());
        Ok(())
    }
}
