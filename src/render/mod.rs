//! HTML fragments for the four result panels.
//!
//! Renderers are pure: typed result in, markup out. API-provided strings are
//! interpolated as-is, the same way the chat bubbles are.

mod audio;
mod image;
mod multimodal;
mod text;

pub use audio::render_audio;
pub use image::{render_image, MAX_LISTED_OBJECTS};
pub use multimodal::render_multimodal;
pub use text::render_text;

/// CSS class for a sentiment label (`positivo`, `negativo`, anything else).
pub fn sentiment_class(classification: &str) -> &'static str {
    match classification {
        "positivo" => "sentimiento-positivo",
        "negativo" => "sentimiento-negativo",
        _ => "sentimiento-neutral",
    }
}

/// A `[0, 1]` likelihood as a whole percentage, e.g. `0.874` -> `"87"`.
pub fn percent(fraction: f64) -> String {
    format!("{}", (fraction * 100.0).round())
}

/// A score the way the page has always printed numbers: shortest form,
/// `1` rather than `1.0`.
pub fn number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// One labelled value block.
pub(crate) fn metric_card(label: &str, value_html: &str, extra: &str) -> String {
    format!(
        r#"
            <div class="metric-card">
                <div class="label">{label}</div>
                {value_html}{extra}
            </div>"#
    )
}
