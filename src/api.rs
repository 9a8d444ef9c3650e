//! Wire models for the feedback analysis API.
//!
//! Field names on the wire are Spanish (`sentimiento`, `caras`, ...); the
//! Rust side uses English names with `#[serde(rename)]`. Only fields the
//! renderers consume are modelled, everything else in a response is ignored.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------

pub const CHAT_PATH: &str = "/api/chatbot/message";
pub const TEXT_PATH: &str = "/api/analyze/text";
pub const AUDIO_PATH: &str = "/api/analyze/audio";
pub const IMAGE_PATH: &str = "/api/analyze/image";
pub const MULTIMODAL_PATH: &str = "/api/analyze/multimodal";
pub const HEALTH_PATH: &str = "/api/health";

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A file picked by the user, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// MIME type for a file name, from its extension. Unknown extensions get
/// `application/octet-stream`, like a browser `File` with no type.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "webm" => "audio/webm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Inputs of the multimodal form. Each present field becomes one part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultimodalRequest {
    pub text: Option<String>,
    pub audio: Option<Upload>,
    pub image: Option<Upload>,
}

impl MultimodalRequest {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.audio.is_none() && self.image.is_none()
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body of an error response. FastAPI puts its message in `detail`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Sentiment block of the text endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSentiment {
    #[serde(rename = "clasificacion")]
    pub classification: String,
    pub score: f64,
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "intensidad", default)]
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(rename = "sentimiento")]
    pub sentiment: TextSentiment,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "entidades", default)]
    pub entities: Vec<Entity>,
    #[serde(rename = "recomendacion", default)]
    pub recommendation: String,
}

/// Sentiment block of the audio endpoint (no emoji or intensity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSentiment {
    #[serde(rename = "clasificacion")]
    pub classification: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysis {
    #[serde(rename = "transcripcion")]
    pub transcription: String,
    #[serde(rename = "confianza_audio")]
    pub confidence: f64,
    #[serde(rename = "sentimiento")]
    pub sentiment: AudioSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetail {
    #[serde(rename = "emocion_principal")]
    pub main_emotion: String,
    /// Emotion name to likelihood in `[0, 1]`, in the order the API sent them.
    #[serde(rename = "emociones", default)]
    pub emotions: serde_json::Map<String, serde_json::Value>,
}

impl FaceDetail {
    /// Emotions as `(name, likelihood)` pairs; non-numeric values are skipped.
    pub fn emotion_scores(&self) -> Vec<(&str, f64)> {
        self.emotions
            .iter()
            .filter_map(|(name, v)| v.as_f64().map(|x| (name.as_str(), x)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faces {
    #[serde(rename = "cantidad")]
    pub count: u32,
    #[serde(rename = "detalles", default)]
    pub details: Vec<FaceDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "confianza")]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(rename = "caras")]
    pub faces: Faces,
    #[serde(rename = "objetos", default)]
    pub objects: Vec<DetectedObject>,
    #[serde(rename = "sentimiento_visual")]
    pub visual_sentiment: String,
    /// Text found in the image; empty when none.
    #[serde(rename = "texto", default)]
    pub text: String,
}

/// Cross-channel summary of a multimodal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    #[serde(rename = "canales_analizados")]
    pub channels: u32,
    #[serde(rename = "sentimiento")]
    pub sentiment: String,
    #[serde(rename = "score_promedio")]
    pub average_score: f64,
    #[serde(rename = "recomendacion")]
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimodalAnalysis {
    #[serde(rename = "apis_usadas", default)]
    pub apis_used: Vec<String>,
    #[serde(rename = "resultado_final", default)]
    pub final_result: Option<FinalResult>,
    #[serde(rename = "analisis_texto", default)]
    pub text: Option<TextAnalysis>,
    #[serde(rename = "analisis_audio", default)]
    pub audio: Option<AudioAnalysis>,
    #[serde(rename = "analisis_imagen", default)]
    pub image: Option<ImageAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub apis: Vec<String>,
    #[serde(default)]
    pub chatbot: Option<String>,
    #[serde(default)]
    pub chatbot_mode: Option<String>,
}

impl Health {
    /// The server reports `"ok"` when it is up.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
