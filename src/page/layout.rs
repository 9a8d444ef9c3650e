//! The fixed analysis document.
//!
//! Served by the development server and used as the reference for every id
//! in [`super::ids`]. The wasm bundle is loaded from `/pkg/` and wires
//! itself up on start.

/// Embedded single-page document: four analysis tabs, a shared loading
/// overlay and the floating chat widget.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sistema de Análisis de Feedback</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
<style>
:root{--primary:#6366f1;--secondary:#8b5cf6;--success:#10b981;--warning:#f59e0b;--info:#3b82f6}
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:system-ui,sans-serif;background:#f3f4f6;color:#1f2937;min-height:100vh}
header{padding:24px;background:linear-gradient(135deg,var(--primary),var(--secondary));color:#fff}
main{max-width:960px;margin:24px auto;padding:0 16px}
.hidden{display:none!important}
.tabs{display:flex;gap:8px;margin-bottom:16px}
.tab-btn{border:none;padding:10px 16px;border-radius:8px;background:#e5e7eb;cursor:pointer}
.tab-btn.active{background:var(--primary);color:#fff}
.tab-content{display:none}.tab-content.active{display:block}
form{background:#fff;padding:20px;border-radius:10px;display:flex;flex-direction:column;gap:12px}
textarea{min-height:120px;padding:10px;border:1px solid #d1d5db;border-radius:8px;font:inherit}
.btn-primary{border:none;padding:10px 16px;border-radius:8px;background:var(--primary);color:#fff;cursor:pointer}
.file-name.active{color:var(--success);font-weight:600}
.preview img{max-width:240px;border-radius:8px}
.resultado{margin-top:16px;background:#f9fafb;padding:20px;border-radius:10px}
.metric-cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(160px,1fr));gap:12px}
.metric-card{background:#fff;padding:14px;border-radius:8px;text-align:center}
.metric-card .label{font-size:.8rem;color:#6b7280;text-transform:uppercase}
.metric-card .value{font-size:1.6rem;font-weight:700}
.metric-card .emoji{font-size:1.8rem}
.sentimiento-positivo{color:var(--success)}.sentimiento-negativo{color:#ef4444}.sentimiento-neutral{color:#6b7280}
.entidades-list,.objetos-grid{display:flex;flex-wrap:wrap;gap:8px}
.entidad-item,.objeto-tag{background:#eef2ff;padding:6px 10px;border-radius:999px;font-size:.85rem}
.entidad-tipo{margin-left:6px;color:#6b7280}
.recomendacion-box{margin-top:16px;background:#fff;border-left:4px solid var(--warning);padding:14px;border-radius:8px}
.alert{display:flex;gap:10px;padding:12px;border-radius:8px}.alert-info{background:#eff6ff}
#loadingOverlay{position:fixed;inset:0;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center;color:#fff;z-index:50}
#chatbot-toggle{position:fixed;right:24px;bottom:24px;width:56px;height:56px;border-radius:50%;border:none;background:var(--primary);color:#fff;font-size:1.4rem;cursor:pointer}
.chatbot-badge{position:absolute;top:-4px;right:-4px;background:#ef4444;border-radius:999px;font-size:.65rem;padding:2px 6px}
#chatbot-container{position:fixed;right:24px;bottom:92px;width:360px;height:520px;background:#fff;border-radius:12px;box-shadow:0 10px 30px rgba(0,0,0,.2);display:flex;flex-direction:column;z-index:40}
#chatbot-container.minimized{height:56px;overflow:hidden}
.chatbot-header{display:flex;justify-content:space-between;padding:12px;background:var(--primary);color:#fff;border-radius:12px 12px 0 0}
#chatbot-messages{flex:1;overflow-y:auto;padding:12px;display:flex;flex-direction:column;gap:8px}
.chatbot-message{display:flex;gap:8px}.user-message{flex-direction:row-reverse}
.message-content{background:#f3f4f6;padding:8px 12px;border-radius:10px;max-width:80%}
.user-message .message-content{background:var(--primary);color:#fff}
.typing-indicator span{display:inline-block;width:6px;height:6px;margin:0 1px;border-radius:50%;background:#9ca3af;animation:blink 1s infinite}
@keyframes blink{50%{opacity:.3}}
.chatbot-suggestions{display:flex;flex-wrap:wrap;gap:6px;padding:0 12px 8px}
.suggestion-btn{border:1px solid #d1d5db;background:#fff;border-radius:999px;padding:4px 10px;font-size:.8rem;cursor:pointer}
.chatbot-input-row{display:flex;gap:6px;padding:12px;border-top:1px solid #e5e7eb}
#chatbot-input{flex:1;padding:8px;border:1px solid #d1d5db;border-radius:8px}
</style>
</head>
<body>
<header><h1><i class="fas fa-brain"></i> Sistema de Análisis de Feedback</h1></header>
<main>
  <nav class="tabs">
    <button id="tab-btn-texto" class="tab-btn active" data-tab="tab-texto"><i class="fas fa-file-alt"></i> Texto</button>
    <button id="tab-btn-audio" class="tab-btn" data-tab="tab-audio"><i class="fas fa-microphone"></i> Audio</button>
    <button id="tab-btn-imagen" class="tab-btn" data-tab="tab-imagen"><i class="fas fa-image"></i> Imagen</button>
    <button id="tab-btn-multimodal" class="tab-btn" data-tab="tab-multimodal"><i class="fas fa-layer-group"></i> Multimodal</button>
  </nav>

  <section id="tab-texto" class="tab-content active">
    <form id="formTexto">
      <textarea id="inputTexto" placeholder="Escribe el comentario del cliente..."></textarea>
      <button type="submit" class="btn-primary">Analizar texto</button>
    </form>
    <div id="resultadoTexto" class="resultado hidden"></div>
  </section>

  <section id="tab-audio" class="tab-content">
    <form id="formAudio">
      <input type="file" id="inputAudio" accept="audio/*">
      <span id="audioFileName" class="file-name"></span>
      <button type="submit" class="btn-primary">Analizar audio</button>
    </form>
    <div id="resultadoAudio" class="resultado hidden"></div>
  </section>

  <section id="tab-imagen" class="tab-content">
    <form id="formImagen">
      <input type="file" id="inputImagen" accept="image/*">
      <div id="imagePreview" class="preview hidden"><img id="previewImg" alt="Vista previa"></div>
      <button type="submit" class="btn-primary">Analizar imagen</button>
    </form>
    <div id="resultadoImagen" class="resultado hidden"></div>
  </section>

  <section id="tab-multimodal" class="tab-content">
    <form id="formMultimodal">
      <textarea id="inputTextoMulti" placeholder="Texto (opcional)"></textarea>
      <input type="file" id="inputAudioMulti" accept="audio/*">
      <span id="audioMultiFileName" class="file-name"></span>
      <input type="file" id="inputImagenMulti" accept="image/*">
      <span id="imageMultiFileName" class="file-name"></span>
      <div id="imageMultiPreview" class="preview hidden"><img id="previewImgMulti" alt="Vista previa"></div>
      <button type="submit" class="btn-primary">Análisis completo</button>
    </form>
    <div id="resultadoMultimodal" class="resultado hidden"></div>
  </section>
</main>

<div id="loadingOverlay" class="hidden"><i class="fas fa-spinner fa-spin fa-3x"></i></div>

<button id="chatbot-toggle" aria-label="Abrir asistente">
  <i class="fas fa-comments"></i>
  <span id="chatbot-badge" class="chatbot-badge">Nuevo</span>
</button>
<div id="chatbot-container" class="hidden">
  <div class="chatbot-header">
    <span><i class="fas fa-robot"></i> Asistente</span>
    <span>
      <button id="chatbot-minimize" aria-label="Minimizar"><i class="fas fa-minus"></i></button>
      <button id="chatbot-close" aria-label="Cerrar"><i class="fas fa-times"></i></button>
    </span>
  </div>
  <div id="chatbot-messages"></div>
  <div class="chatbot-suggestions">
    <button class="suggestion-btn" data-message="¿Qué puedes hacer?">¿Qué puedes hacer?</button>
    <button class="suggestion-btn" data-message="Muéstrame las estadísticas">Estadísticas</button>
    <button class="suggestion-btn" data-message="¿Cómo analizo una imagen?">Analizar imagen</button>
  </div>
  <div class="chatbot-input-row">
    <input type="text" id="chatbot-input" placeholder="Escribe tu mensaje...">
    <button id="chatbot-send" aria-label="Enviar"><i class="fas fa-paper-plane"></i></button>
  </div>
</div>

<script type="module">
import init from "/pkg/feedback_lens.js";
init();
</script>
</body>
</html>
"##;
