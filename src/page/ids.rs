//! Element ids and class names of the fixed analysis page.

// Chat widget
pub const CHATBOT_CONTAINER: &str = "chatbot-container";
pub const CHATBOT_MESSAGES: &str = "chatbot-messages";
pub const CHATBOT_INPUT: &str = "chatbot-input";
pub const CHATBOT_SEND: &str = "chatbot-send";
pub const CHATBOT_TOGGLE: &str = "chatbot-toggle";
pub const CHATBOT_CLOSE: &str = "chatbot-close";
pub const CHATBOT_MINIMIZE: &str = "chatbot-minimize";
pub const CHATBOT_BADGE: &str = "chatbot-badge";
pub const TYPING_INDICATOR: &str = "typing-indicator";

// Text form
pub const FORM_TEXT: &str = "formTexto";
pub const INPUT_TEXT: &str = "inputTexto";
pub const RESULT_TEXT: &str = "resultadoTexto";

// Audio form
pub const FORM_AUDIO: &str = "formAudio";
pub const INPUT_AUDIO: &str = "inputAudio";
pub const AUDIO_FILE_NAME: &str = "audioFileName";
pub const RESULT_AUDIO: &str = "resultadoAudio";

// Image form
pub const FORM_IMAGE: &str = "formImagen";
pub const INPUT_IMAGE: &str = "inputImagen";
pub const IMAGE_PREVIEW: &str = "imagePreview";
pub const PREVIEW_IMG: &str = "previewImg";
pub const RESULT_IMAGE: &str = "resultadoImagen";

// Multimodal form
pub const FORM_MULTIMODAL: &str = "formMultimodal";
pub const INPUT_TEXT_MULTI: &str = "inputTextoMulti";
pub const INPUT_AUDIO_MULTI: &str = "inputAudioMulti";
pub const AUDIO_MULTI_FILE_NAME: &str = "audioMultiFileName";
pub const INPUT_IMAGE_MULTI: &str = "inputImagenMulti";
pub const IMAGE_MULTI_FILE_NAME: &str = "imageMultiFileName";
pub const IMAGE_MULTI_PREVIEW: &str = "imageMultiPreview";
pub const PREVIEW_IMG_MULTI: &str = "previewImgMulti";
pub const RESULT_MULTIMODAL: &str = "resultadoMultimodal";

pub const LOADING_OVERLAY: &str = "loadingOverlay";

/// `(button id, content id)` for each analysis tab, in display order.
pub const TABS: &[(&str, &str)] = &[
    ("tab-btn-texto", "tab-texto"),
    ("tab-btn-audio", "tab-audio"),
    ("tab-btn-imagen", "tab-imagen"),
    ("tab-btn-multimodal", "tab-multimodal"),
];

// Classes
pub const HIDDEN: &str = "hidden";
pub const ACTIVE: &str = "active";
pub const MINIMIZED: &str = "minimized";
pub const SUGGESTION_BUTTON: &str = "suggestion-btn";

/// Elements that start out hidden.
pub const INITIALLY_HIDDEN: &[&str] = &[
    CHATBOT_CONTAINER,
    LOADING_OVERLAY,
    RESULT_TEXT,
    RESULT_AUDIO,
    RESULT_IMAGE,
    RESULT_MULTIMODAL,
    IMAGE_PREVIEW,
    IMAGE_MULTI_PREVIEW,
];

/// Every id the page defines, tabs included.
pub fn all() -> Vec<&'static str> {
    let mut ids = vec![
        CHATBOT_CONTAINER,
        CHATBOT_MESSAGES,
        CHATBOT_INPUT,
        CHATBOT_SEND,
        CHATBOT_TOGGLE,
        CHATBOT_CLOSE,
        CHATBOT_MINIMIZE,
        CHATBOT_BADGE,
        FORM_TEXT,
        INPUT_TEXT,
        RESULT_TEXT,
        FORM_AUDIO,
        INPUT_AUDIO,
        AUDIO_FILE_NAME,
        RESULT_AUDIO,
        FORM_IMAGE,
        INPUT_IMAGE,
        IMAGE_PREVIEW,
        PREVIEW_IMG,
        RESULT_IMAGE,
        FORM_MULTIMODAL,
        INPUT_TEXT_MULTI,
        INPUT_AUDIO_MULTI,
        AUDIO_MULTI_FILE_NAME,
        INPUT_IMAGE_MULTI,
        IMAGE_MULTI_FILE_NAME,
        IMAGE_MULTI_PREVIEW,
        PREVIEW_IMG_MULTI,
        RESULT_MULTIMODAL,
        LOADING_OVERLAY,
    ];
    for (button, content) in TABS {
        ids.push(*button);
        ids.push(*content);
    }
    ids
}
