use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feedback-lens")]
#[command(version)]
#[command(about = "Terminal client and dev server for the feedback analysis page")]
pub struct Args {
    /// TOML config file (defaults to ./feedback-lens.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Analysis API origin, overrides config and FEEDBACK_LENS_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Talk to the chatbot; without MESSAGE, start an interactive session
    Chat {
        message: Option<String>,
    },

    /// Submit one analysis form and print the result
    Analyze {
        /// Print the rendered result panel or the raw JSON
        #[arg(long, value_enum, default_value = "html")]
        output: OutputFormat,

        #[command(subcommand)]
        target: AnalyzeTarget,
    },

    /// Check that the analysis API is up
    Health,

    /// Serve the analysis page, the wasm bundle and an /api proxy
    Serve {
        /// Port for the dev server
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Directory holding the wasm-bindgen output, served under /pkg/
        #[arg(long, default_value = "pkg")]
        assets: PathBuf,
    },

    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AnalyzeTarget {
    /// Sentiment, entities and category of a text
    Text { text: String },
    /// Transcription and sentiment of an audio file
    Audio { file: PathBuf },
    /// Faces, emotions, objects and text in an image
    Image { file: PathBuf },
    /// Any combination of text, audio and image
    Multimodal {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        audio: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}
