use std::fmt::Write;

use super::{metric_card, number, sentiment_class};
use crate::api::TextAnalysis;

/// Metric cards, detected entities and the recommendation box.
pub fn render_text(data: &TextAnalysis) -> String {
    let s = &data.sentiment;
    let class = sentiment_class(&s.classification);

    let mut html = String::from(
        r#"
        <h3><i class="fas fa-chart-line"></i> Resultados del Análisis</h3>
        <div class="metric-cards">"#,
    );
    html.push_str(&metric_card(
        "Sentimiento",
        &format!(
            r#"<div class="emoji">{}</div>
                <div class="value {class}">{}</div>"#,
            s.emoji, s.classification
        ),
        "",
    ));
    html.push_str(&metric_card(
        "Score",
        &format!(r#"<div class="value">{}</div>"#, number(s.score)),
        r#"
                <div class="text-muted" style="font-size: 0.85rem;">Rango: -1 a +1</div>"#,
    ));
    html.push_str(&metric_card(
        "Intensidad",
        &format!(r#"<div class="value">{}</div>"#, number(s.intensity)),
        r#"
                <div class="text-muted" style="font-size: 0.85rem;">Magnitud emocional</div>"#,
    ));
    html.push_str(&metric_card(
        "Categoría",
        &format!(
            r#"<div class="value" style="font-size: 1.3rem;">{}</div>"#,
            data.category
        ),
        "",
    ));
    html.push_str("\n        </div>");

    if !data.entities.is_empty() {
        html.push_str(
            r#"
        <h4 style="margin-top: 20px; margin-bottom: 15px;">
            <i class="fas fa-tags"></i> Entidades Detectadas
        </h4>
        <div class="entidades-list">"#,
        );
        for entity in &data.entities {
            let _ = write!(
                html,
                r#"
            <div class="entidad-item">
                <span class="entidad-nombre">{}</span>
                <span class="entidad-tipo">{}</span>
            </div>"#,
                entity.name, entity.kind
            );
        }
        html.push_str("\n        </div>");
    }

    let _ = write!(
        html,
        r#"
        <div class="recomendacion-box">
            <h4><i class="fas fa-lightbulb"></i> Recomendación</h4>
            <p>{}</p>
        </div>
"#,
        data.recommendation
    );
    html
}
