use std::fmt::Write;

use super::number;
use crate::api::MultimodalAnalysis;

/// APIs used, the consolidated verdict and one summary box per channel.
pub fn render_multimodal(data: &MultimodalAnalysis) -> String {
    let channels = data
        .final_result
        .as_ref()
        .map(|r| r.channels.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut html = format!(
        r#"
        <h3><i class="fas fa-trophy"></i> Análisis Multimodal Completo</h3>
        <div class="alert alert-info">
            <i class="fas fa-info-circle"></i>
            <div>
                <strong>APIs utilizadas:</strong> {}<br>
                <strong>Canales analizados:</strong> {channels}
            </div>
        </div>"#,
        data.apis_used.join(", ")
    );

    if let Some(rf) = &data.final_result {
        let _ = write!(
            html,
            r#"
        <div style="background: linear-gradient(135deg, var(--primary), var(--secondary)); color: white; padding: 25px; border-radius: 10px; margin: 20px 0;">
            <h4 style="margin-bottom: 15px; color: white;">
                <i class="fas fa-star"></i> Resultado Consolidado
            </h4>
            <div style="font-size: 1.8rem; font-weight: bold; margin-bottom: 10px;">
                Sentimiento: {}
            </div>
            <div style="font-size: 1.2rem;">
                Score promedio: {}
            </div>
            <hr style="margin: 15px 0; border-color: rgba(255,255,255,0.3);">
            <p style="font-size: 1.1rem; margin: 0;">
                <i class="fas fa-lightbulb"></i> {}
            </p>
        </div>"#,
            rf.sentiment.to_uppercase(),
            number(rf.average_score),
            rf.recommendation
        );
    }

    if let Some(text) = &data.text {
        let _ = write!(
            html,
            r#"
        <div style="background: white; padding: 20px; border-radius: 10px; margin-bottom: 15px; border-left: 4px solid var(--info);">
            <h4><i class="fas fa-file-alt"></i> Análisis de Texto</h4>
            <p><strong>Sentimiento:</strong> {} (Score: {})</p>
            <p><strong>Categoría:</strong> {}</p>
        </div>"#,
            text.sentiment.classification,
            number(text.sentiment.score),
            text.category
        );
    }

    if let Some(audio) = &data.audio {
        let _ = write!(
            html,
            r#"
        <div style="background: white; padding: 20px; border-radius: 10px; margin-bottom: 15px; border-left: 4px solid var(--success);">
            <h4><i class="fas fa-microphone"></i> Análisis de Audio</h4>
            <p><strong>Transcripción:</strong> "{}"</p>
            <p><strong>Sentimiento:</strong> {}</p>
        </div>"#,
            audio.transcription, audio.sentiment.classification
        );
    }

    if let Some(image) = &data.image {
        let _ = write!(
            html,
            r#"
        <div style="background: white; padding: 20px; border-radius: 10px; margin-bottom: 15px; border-left: 4px solid var(--warning);">
            <h4><i class="fas fa-image"></i> Análisis de Imagen</h4>
            <p><strong>Rostros detectados:</strong> {}</p>
            <p><strong>Sentimiento visual:</strong> {}</p>
        </div>"#,
            image.faces.count, image.visual_sentiment
        );
    }

    html.push('\n');
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: serde_json::Value) -> MultimodalAnalysis {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_summary_without_final_result_shows_na() {
        let html = render_multimodal(&parse(serde_json::json!({"apis_usadas": []})));
        assert!(html.contains("<strong>Canales analizados:</strong> N/A"));
        assert!(!html.contains("Resultado Consolidado"));
    }

    #[test]
    fn test_consolidated_result_uppercases_sentiment() {
        let html = render_multimodal(&parse(serde_json::json!({
            "apis_usadas": ["Natural Language", "Vision"],
            "resultado_final": {
                "sentimiento": "positivo",
                "score_promedio": 0.75,
                "canales_analizados": 2,
                "recomendacion": "Cliente satisfecho"
            }
        })));
        assert!(html.contains("Natural Language, Vision"));
        assert!(html.contains("<strong>Canales analizados:</strong> 2"));
        assert!(html.contains("Sentimiento: POSITIVO"));
        assert!(html.contains("Score promedio: 0.75"));
        assert!(html.contains("Cliente satisfecho"));
    }

    #[test]
    fn test_channel_sections_follow_present_inputs() {
        let html = render_multimodal(&parse(serde_json::json!({
            "apis_usadas": ["Natural Language", "Speech-to-Text", "Vision"],
            "analisis_texto": {
                "sentimiento": {"clasificacion": "neutral", "score": 0.1, "emoji": "😐", "intensidad": 0.2},
                "categoria": "Producto"
            },
            "analisis_audio": {
                "transcripcion": "todo bien",
                "confianza_audio": 0.8,
                "sentimiento": {"clasificacion": "positivo", "score": 0.6}
            },
            "analisis_imagen": {
                "caras": {"cantidad": 3, "detalles": []},
                "objetos": [],
                "sentimiento_visual": "neutral"
            }
        })));
        assert!(html.contains("<strong>Sentimiento:</strong> neutral (Score: 0.1)"));
        assert!(html.contains("<strong>Categoría:</strong> Producto"));
        assert!(html.contains(r#"<strong>Transcripción:</strong> "todo bien""#));
        assert!(html.contains("<strong>Rostros detectados:</strong> 3"));
    }

    #[test]
    fn test_only_text_channel() {
        let html = render_multimodal(&parse(serde_json::json!({
            "apis_usadas": ["Natural Language"],
            "analisis_texto": {
                "sentimiento": {"clasificacion": "negativo", "score": -0.5},
                "categoria": "Envío"
            }
        })));
        assert!(html.contains("Análisis de Texto"));
        assert!(!html.contains("Análisis de Audio"));
        assert!(!html.contains("Análisis de Imagen"));
    }
}
