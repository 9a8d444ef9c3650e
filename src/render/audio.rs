use super::{metric_card, number, percent, sentiment_class};
use crate::api::AudioAnalysis;

/// Transcription box followed by confidence and sentiment cards.
pub fn render_audio(data: &AudioAnalysis) -> String {
    let class = sentiment_class(&data.sentiment.classification);
    let mut html = format!(
        r#"
        <h3><i class="fas fa-check-circle"></i> Análisis Completado</h3>
        <div class="alert alert-info" style="margin-bottom: 20px;">
            <i class="fas fa-quote-left"></i>
            <div>
                <strong>Transcripción:</strong><br>
                "{}"
            </div>
        </div>
        <div class="metric-cards">"#,
        data.transcription
    );
    html.push_str(&metric_card(
        "Confianza Audio",
        &format!(r#"<div class="value">{}%</div>"#, percent(data.confidence)),
        "",
    ));
    html.push_str(&metric_card(
        "Sentimiento",
        &format!(
            r#"<div class="value {class}">{}</div>"#,
            data.sentiment.classification
        ),
        "",
    ));
    html.push_str(&metric_card(
        "Score",
        &format!(r#"<div class="value">{}</div>"#, number(data.sentiment.score)),
        "",
    ));
    html.push_str("\n        </div>\n");
    html
}
