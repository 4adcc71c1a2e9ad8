use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }

    /// Path segment used by both the embed host and the metadata API.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "tv",
        }
    }
}

/// One previously played item, most recent first in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub episode: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
}

impl HistoryEntry {
    pub fn movie(id: impl Into<String>, title: Option<String>) -> Self {
        Self { id: id.into(), content_type: ContentType::Movie, season: None, episode: None, title }
    }

    pub fn series(id: impl Into<String>, season: u32, episode: u32, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            content_type: ContentType::Series,
            season: Some(season),
            episode: Some(episode),
            title,
        }
    }

    /// Entries sharing this key replace each other in the history.
    pub fn key(&self) -> (&str, ContentType) {
        (self.id.as_str(), self.content_type)
    }

    /// `"<title> (<id>)"` when a title is known, otherwise just the id.
    pub fn label(&self) -> String {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => format!("{} ({})", t, self.id),
            _ => self.id.clone(),
        }
    }

    /// Normal form shared by every write and every load. Movies lose any
    /// stray season or episode; series must carry both, but their values
    /// are not range checked. Empty ids are rejected.
    pub fn validated(mut self) -> Option<Self> {
        if self.id.trim().is_empty() {
            return None;
        }
        match self.content_type {
            ContentType::Movie => {
                self.season = None;
                self.episode = None;
            }
            ContentType::Series => {
                if self.season.is_none() || self.episode.is_none() {
                    return None;
                }
            }
        }
        Some(self)
    }
}

/// Accepts `2`, `"2"` or null. Anything else reads as absent and is left for
/// [`HistoryEntry::validated`] to judge.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// A play as requested from the form or from a history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub id: String,
    pub content_type: ContentType,
    pub season: u32,
    pub episode: u32,
}

impl PlayRequest {
    pub fn movie(id: impl Into<String>) -> Self {
        Self { id: id.into(), content_type: ContentType::Movie, season: 1, episode: 1 }
    }

    pub fn series(id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self { id: id.into(), content_type: ContentType::Series, season, episode }
    }

    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            content_type: entry.content_type,
            season: entry.season.unwrap_or(1),
            episode: entry.episode.unwrap_or(1),
        }
    }

    /// History record for this request, without a title yet.
    pub fn to_entry(&self, title: Option<String>) -> HistoryEntry {
        match self.content_type {
            ContentType::Movie => HistoryEntry::movie(self.id.clone(), title),
            ContentType::Series => HistoryEntry::series(self.id.clone(), self.season, self.episode, title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Only an exact `"light"` selects the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_without_episode_fields() {
        let json = serde_json::to_string(&HistoryEntry::movie("100", Some("A".into()))).unwrap();
        assert_eq!(json, r#"{"id":"100","type":"movie","title":"A"}"#);
    }

    #[test]
    fn series_accepts_string_numbers() {
        let raw = r#"{"id":"1399","type":"series","season":"2","episode":5,"title":null}"#;
        let entry: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.validated(), Some(HistoryEntry::series("1399", 2, 5, None)));
    }

    #[test]
    fn movie_drops_stray_season() {
        let raw = r#"{"id":"100","type":"movie","season":"1","episode":"1","title":"A"}"#;
        let entry: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.validated(), Some(HistoryEntry::movie("100", Some("A".into()))));
    }

    #[test]
    fn series_without_valid_episode_is_rejected() {
        let raw = r#"{"id":"1399","type":"series","season":0,"episode":"x"}"#;
        let entry: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.validated(), None);
    }

    #[test]
    fn series_coordinates_are_not_range_checked() {
        let raw = r#"{"id":"1399","type":"series","season":0,"episode":"0"}"#;
        let entry: HistoryEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.validated(), Some(HistoryEntry::series("1399", 0, 0, None)));
    }

    #[test]
    fn label_prefers_title() {
        assert_eq!(HistoryEntry::movie("100", Some("A".into())).label(), "A (100)");
        assert_eq!(HistoryEntry::movie("100", None).label(), "100");
    }

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("LIGHT")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
