use vidembed_core::{ContentType, HistoryEntry};

use crate::models::Language;

/// Translation function - returns localized string based on language
pub fn t(key: &str, lang: Language) -> String {
    match (key, lang) {
        ("app_title", _) => "VidEmbed",

        // Form
        ("content_type", Language::English) => "Type",
        ("content_type", Language::Spanish) => "Tipo",
        ("movie", Language::English) => "Movie",
        ("movie", Language::Spanish) => "Película",
        ("series", Language::English) => "Series",
        ("series", Language::Spanish) => "Serie",
        ("content_id", Language::English) => "TMDb / IMDb ID",
        ("content_id", Language::Spanish) => "ID de TMDb / IMDb",
        ("season", Language::English) => "Season",
        ("season", Language::Spanish) => "Temporada",
        ("episode", Language::English) => "Episode",
        ("episode", Language::Spanish) => "Episodio",
        ("play", Language::English) => "▶ Play",
        ("play", Language::Spanish) => "▶ Reproducir",
        ("invalid_id", Language::English) => "Invalid content ID.",
        ("invalid_id", Language::Spanish) => "ID de contenido inválido.",
        ("last_url", Language::English) => "Opened:",
        ("last_url", Language::Spanish) => "Abierto:",
        ("looking_up_title", Language::English) => "Looking up title...",
        ("looking_up_title", Language::Spanish) => "Buscando título...",

        // Settings
        ("api_key", Language::English) => "TMDb API key",
        ("api_key", Language::Spanish) => "API Key de TMDb",
        ("api_key_hint", Language::English) => "Press Enter to save",
        ("api_key_hint", Language::Spanish) => "Pulsa Enter para guardar",
        ("api_key_saved", Language::English) => "TMDb API key saved.",
        ("api_key_saved", Language::Spanish) => "API Key de TMDb guardada.",
        ("theme_light", Language::English) => "☀ Light",
        ("theme_light", Language::Spanish) => "☀ Claro",
        ("theme_dark", Language::English) => "🌙 Dark",
        ("theme_dark", Language::Spanish) => "🌙 Oscuro",
        ("language", Language::English) => "Language",
        ("language", Language::Spanish) => "Idioma",

        // History
        ("history", Language::English) => "Playback history",
        ("history", Language::Spanish) => "Historial de reproducción",
        ("no_history", Language::English) => "No playback history.",
        ("no_history", Language::Spanish) => "No hay historial de reproducción.",
        ("clear_history", Language::English) => "🗑 Clear history",
        ("clear_history", Language::Spanish) => "🗑 Limpiar historial",
        ("confirm_clear", Language::English) => "Are you sure you want to clear the history?",
        ("confirm_clear", Language::Spanish) => "¿Estás seguro de que quieres limpiar el historial?",
        ("yes", Language::English) => "Yes",
        ("yes", Language::Spanish) => "Sí",
        ("cancel", Language::English) => "Cancel",
        ("cancel", Language::Spanish) => "Cancelar",
        ("delete", Language::English) => "Delete",
        ("delete", Language::Spanish) => "Eliminar",
        ("title", Language::English) => "Title",
        ("title", Language::Spanish) => "Título",
        ("details", Language::English) => "Details",
        ("details", Language::Spanish) => "Detalles",

        // Errors
        ("storage_error", Language::English) => "Could not save",
        ("storage_error", Language::Spanish) => "No se pudo guardar",
        ("open_failed", Language::English) => "Could not open the browser",
        ("open_failed", Language::Spanish) => "No se pudo abrir el navegador",

        // Fallback
        _ => key,
    }
    .to_string()
}

pub fn content_type_label(content_type: ContentType, lang: Language) -> String {
    t(content_type.as_str(), lang)
}

/// `S2 E5` for series (`T2 E5` in Spanish), the localized "movie" otherwise.
pub fn entry_details(entry: &HistoryEntry, lang: Language) -> String {
    match (entry.content_type, entry.season, entry.episode) {
        (ContentType::Series, Some(s), Some(e)) => {
            let prefix = if lang == Language::Spanish { "T" } else { "S" };
            format!("{}{} E{}", prefix, s, e)
        }
        (content_type, _, _) => content_type_label(content_type, lang),
    }
}
