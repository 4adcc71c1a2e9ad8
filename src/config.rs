use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use url::Url;

use crate::models::{Config, Language};
use crate::storage::data_dir;

fn config_file_path() -> PathBuf {
    data_dir().join("vidembed_config.txt")
}

/// Reads the config file, writing one with defaults if none exists yet.
pub fn read_config() -> Config {
    let path = config_file_path();
    match fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) => {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("cannot read {}: {}, using defaults", path.display(), e);
            }
            let cfg = Config::default();
            if let Err(e) = write_config_to(&path, &cfg) {
                log::warn!("cannot write default config to {}: {}", path.display(), e);
            }
            cfg
        }
    }
}

pub fn parse_config(content: &str) -> Config {
    let defaults = Config::default();
    let mut cfg = Config::default();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else { continue };
        let v = v.trim();
        match k.trim() {
            "embed_base_url" => cfg.embed_base_url = checked_url(k, v, &defaults.embed_base_url),
            "metadata_base_url" => cfg.metadata_base_url = checked_url(k, v, &defaults.metadata_base_url),
            "metadata_language" if !v.is_empty() => cfg.metadata_language = v.to_string(),
            "ui_language" => cfg.ui_language = Language::from_code(v).unwrap_or_default(),
            "browser_command" => cfg.browser_command = v.to_string(),
            "request_timeout_secs" => {
                cfg.request_timeout_secs = v.parse::<u64>().ok().filter(|n| *n > 0).unwrap_or(defaults.request_timeout_secs)
            }
            "log_level" => cfg.log_level = v.parse().unwrap_or(defaults.log_level),
            _ => {}
        }
    }
    cfg
}

fn checked_url(key: &str, value: &str, default: &str) -> String {
    match Url::parse(value) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => value.trim_end_matches('/').to_string(),
        _ => {
            log::warn!("invalid URL for {}: '{}', using {}", key.trim(), value, default);
            default.to_string()
        }
    }
}

pub fn save_config(cfg: &Config) -> Result<(), io::Error> {
    write_config_to(&config_file_path(), cfg)
}

fn write_config_to(path: &Path, cfg: &Config) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)?;
    writeln!(f, "embed_base_url={}", cfg.embed_base_url)?;
    writeln!(f, "metadata_base_url={}", cfg.metadata_base_url)?;
    writeln!(f, "metadata_language={}", cfg.metadata_language)?;
    writeln!(f, "ui_language={}", cfg.ui_language.code())?;
    writeln!(f, "browser_command={}", cfg.browser_command)?;
    writeln!(f, "request_timeout_secs={}", cfg.request_timeout_secs)?;
    writeln!(f, "log_level={}", cfg.log_level.as_str().to_ascii_lowercase())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_gives_defaults() {
        assert_eq!(parse_config(""), Config::default());
    }

    #[test]
    fn parses_known_keys() {
        let cfg = parse_config(
            "# comment\n\
             embed_base_url=https://embed.example.org/e/\n\
             metadata_language = en-US\n\
             ui_language=es\n\
             browser_command=firefox --new-window {URL}\n\
             request_timeout_secs=3\n\
             log_level=debug\n\
             unknown=1\n",
        );
        assert_eq!(cfg.embed_base_url, "https://embed.example.org/e");
        assert_eq!(cfg.metadata_language, "en-US");
        assert_eq!(cfg.ui_language, Language::Spanish);
        assert_eq!(cfg.browser_command, "firefox --new-window {URL}");
        assert_eq!(cfg.request_timeout_secs, 3);
        assert_eq!(cfg.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = parse_config("metadata_base_url=not a url\nrequest_timeout_secs=0\nlog_level=loud\nembed_base_url=ftp://x\n");
        let defaults = Config::default();
        assert_eq!(cfg.metadata_base_url, defaults.metadata_base_url);
        assert_eq!(cfg.embed_base_url, defaults.embed_base_url);
        assert_eq!(cfg.request_timeout_secs, defaults.request_timeout_secs);
        assert_eq!(cfg.log_level, defaults.log_level);
    }

    #[test]
    fn written_config_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vidembed_config.txt");
        let cfg = Config {
            ui_language: Language::Spanish,
            browser_command: "open -a Safari {URL}".into(),
            request_timeout_secs: 4,
            ..Config::default()
        };
        write_config_to(&path, &cfg).unwrap();
        assert_eq!(parse_config(&fs::read_to_string(&path).unwrap()), cfg);
    }
}
