use crate::error::StoreError;
use crate::kv::KeyValueStore;
use crate::models::Theme;

pub const API_KEY_KEY: &str = "tmdbApiKey";
pub const THEME_KEY: &str = "theme";

pub fn load_api_key<S: KeyValueStore + ?Sized>(store: &S) -> String {
    store.get(API_KEY_KEY).unwrap_or_default()
}

/// Stores the trimmed key and returns it.
pub fn save_api_key<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> Result<String, StoreError> {
    let key = key.trim().to_string();
    store.set(API_KEY_KEY, &key)?;
    Ok(key)
}

pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    Theme::from_stored(store.get(THEME_KEY).as_deref())
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn api_key_is_trimmed() {
        let mut store = MemoryStore::new();
        assert_eq!(load_api_key(&store), "");
        assert_eq!(save_api_key(&mut store, "  abc123 \n").unwrap(), "abc123");
        assert_eq!(load_api_key(&store), "abc123");
    }

    #[test]
    fn theme_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Dark);
        save_theme(&mut store, Theme::Light).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(load_theme(&store), Theme::Light);
    }
}
