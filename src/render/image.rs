use std::fmt::Write;

use super::{metric_card, percent};
use crate::api::ImageAnalysis;

/// Objects beyond this many are counted but not listed.
pub const MAX_LISTED_OBJECTS: usize = 10;

/// Face/object/sentiment cards, per-face emotion bars, object tags and any
/// text found in the image.
pub fn render_image(data: &ImageAnalysis) -> String {
    let mut html = String::from(
        r#"
        <h3><i class="fas fa-images"></i> Análisis de Imagen Completado</h3>
        <div class="metric-cards">"#,
    );
    html.push_str(&metric_card(
        "Rostros Detectados",
        &format!(r#"<div class="value">{}</div>"#, data.faces.count),
        "",
    ));
    html.push_str(&metric_card(
        "Objetos Encontrados",
        &format!(r#"<div class="value">{}</div>"#, data.objects.len()),
        "",
    ));
    html.push_str(&metric_card(
        "Sentimiento Visual",
        &format!(
            r#"<div class="value sentimiento-{0}">
                    {0}
                </div>"#,
            data.visual_sentiment
        ),
        "",
    ));
    html.push_str("\n        </div>");

    if data.faces.count > 0 && !data.faces.details.is_empty() {
        html.push_str(
            r#"
        <h4 style="margin-top: 25px; margin-bottom: 15px;">
            <i class="fas fa-smile"></i> Emociones Detectadas
        </h4>"#,
        );
        for (idx, face) in data.faces.details.iter().enumerate() {
            let _ = write!(
                html,
                r#"
        <div style="background: white; padding: 15px; border-radius: 8px; margin-bottom: 15px;">
            <strong>Rostro {}:</strong> Emoción principal -
            <span style="color: var(--primary); font-weight: bold;">
                {}
            </span>
            <div style="margin-top: 10px; display: grid; grid-template-columns: repeat(2, 1fr); gap: 10px;">"#,
                idx + 1,
                face.main_emotion
            );
            for (emotion, likelihood) in face.emotion_scores() {
                let pct = percent(likelihood);
                let _ = write!(
                    html,
                    r#"
                <div style="font-size: 0.9rem;">
                    {emotion}: <strong>{pct}%</strong>
                    <div style="background: #e5e7eb; height: 6px; border-radius: 3px; margin-top: 3px;">
                        <div style="background: var(--primary); height: 100%; width: {pct}%; border-radius: 3px;"></div>
                    </div>
                </div>"#
                );
            }
            html.push_str("\n            </div>\n        </div>");
        }
    }

    if !data.objects.is_empty() {
        html.push_str(
            r#"
        <h4 style="margin-top: 25px; margin-bottom: 15px;">
            <i class="fas fa-cubes"></i> Objetos Identificados
        </h4>
        <div class="objetos-grid">"#,
        );
        for obj in data.objects.iter().take(MAX_LISTED_OBJECTS) {
            let _ = write!(
                html,
                r#"
            <span class="objeto-tag">{} ({}%)</span>"#,
                obj.name,
                percent(obj.confidence)
            );
        }
        html.push_str("\n        </div>");
    }

    if !data.text.is_empty() {
        let _ = write!(
            html,
            r#"
        <div class="alert alert-info" style="margin-top: 20px;">
            <i class="fas fa-font"></i>
            <div>
                <strong>Texto detectado en la imagen:</strong><br>
                {}
            </div>
        </div>"#,
            data.text
        );
    }

    html.push('\n');
    html
}
