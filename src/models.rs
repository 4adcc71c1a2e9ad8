use vidembed_core::embed::DEFAULT_EMBED_BASE_URL;
use vidembed_core::metadata::{DEFAULT_METADATA_BASE_URL, DEFAULT_METADATA_LANGUAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "es" | "spanish" | "español" => Some(Language::Spanish),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub embed_base_url: String,
    pub metadata_base_url: String,
    pub metadata_language: String, // sent as `language=` to the metadata API
    pub ui_language: Language,
    pub browser_command: String, // empty => system browser, `{URL}` placeholder
    pub request_timeout_secs: u64,
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embed_base_url: DEFAULT_EMBED_BASE_URL.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
            metadata_language: DEFAULT_METADATA_LANGUAGE.to_string(),
            ui_language: Language::default(),
            browser_command: String::new(),
            request_timeout_secs: 10,
            log_level: log::LevelFilter::Info,
        }
    }
}
