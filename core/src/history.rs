//! Size-bounded playback history, most recent first, persisted as a JSON
//! array under [`HISTORY_KEY`].

use serde_json::Value;

use crate::error::{Error, Result, StoreError};
use crate::kv::KeyValueStore;
use crate::models::HistoryEntry;

pub const HISTORY_KEY: &str = "playbackHistory";
pub const HISTORY_LIMIT: usize = 20;

pub type HistoryList = Vec<HistoryEntry>;

/// Reads the persisted history. Absent or unparseable data yields an empty
/// list; individual malformed records are dropped.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> HistoryList {
    let Some(raw) = store.get(HISTORY_KEY) else {
        return Vec::new();
    };
    let records = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            log::warn!("stored history is not an array, starting empty");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("stored history is corrupt, starting empty: {}", e);
            return Vec::new();
        }
    };

    let total = records.len();
    let mut list: HistoryList = Vec::with_capacity(total.min(HISTORY_LIMIT));
    for record in records {
        let entry = serde_json::from_value::<HistoryEntry>(record).ok().and_then(HistoryEntry::validated);
        match entry {
            Some(e) if !list.iter().any(|x| x.key() == e.key()) => list.push(e),
            _ => {}
        }
        if list.len() == HISTORY_LIMIT {
            break;
        }
    }
    if list.len() < total {
        log::debug!("history load kept {} of {} records", list.len(), total);
    }
    list
}

/// Moves `entry` to the front, replacing any entry with the same id and type.
/// The entry is normalized the same way [`load`] normalizes stored records;
/// one that `load` would drop leaves the list untouched.
pub fn upsert(mut list: HistoryList, entry: HistoryEntry) -> HistoryList {
    let Some(entry) = entry.validated() else {
        log::warn!("refusing to record invalid history entry");
        return list;
    };
    list.retain(|x| x.key() != entry.key());
    list.insert(0, entry);
    list.truncate(HISTORY_LIMIT);
    list
}

pub fn remove(mut list: HistoryList, index: usize) -> Result<HistoryList> {
    if index >= list.len() {
        return Err(Error::IndexOutOfRange { index, len: list.len() });
    }
    list.remove(index);
    Ok(list)
}

pub fn persist<S: KeyValueStore + ?Sized>(store: &mut S, list: &[HistoryEntry]) -> std::result::Result<(), StoreError> {
    let body = serde_json::to_string(list)?;
    store.set(HISTORY_KEY, &body)
}

pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> std::result::Result<HistoryList, StoreError> {
    store.remove(HISTORY_KEY)?;
    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::models::ContentType;

    fn movie(id: &str, title: &str) -> HistoryEntry {
        HistoryEntry::movie(id, Some(title.to_string()))
    }

    #[test]
    fn upsert_into_empty() {
        let list = upsert(Vec::new(), movie("100", "A"));
        assert_eq!(list, vec![movie("100", "A")]);
    }

    #[test]
    fn upsert_replaces_same_id_and_type() {
        let list = upsert(vec![movie("100", "A")], movie("100", "B"));
        assert_eq!(list, vec![movie("100", "B")]);
    }

    #[test]
    fn same_id_different_type_are_distinct() {
        let list = upsert(vec![movie("100", "A")], HistoryEntry::series("100", 1, 1, None));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].content_type, ContentType::Series);
    }

    #[test]
    fn replaying_another_episode_overwrites_position() {
        let list = vec![movie("7", "x"), HistoryEntry::series("1399", 1, 1, None)];
        let list = upsert(list, HistoryEntry::series("1399", 3, 4, None));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], HistoryEntry::series("1399", 3, 4, None));
        assert_eq!(list[1].id, "7");
    }

    #[test]
    fn upsert_evicts_oldest_beyond_limit() {
        let mut list = Vec::new();
        for i in 1..=21 {
            list = upsert(list, HistoryEntry::movie(i.to_string(), None));
        }
        assert_eq!(list.len(), HISTORY_LIMIT);
        assert_eq!(list[0].id, "21");
        assert_eq!(list[19].id, "2");
        assert!(!list.iter().any(|e| e.id == "1"));
    }

    #[test]
    fn length_never_exceeds_limit_with_repeats() {
        let mut list = Vec::new();
        for i in 0..200u32 {
            let id = (i * 7 % 31).to_string();
            let entry = if i % 2 == 0 {
                HistoryEntry::movie(id, None)
            } else {
                HistoryEntry::series(id, i % 5 + 1, 1, None)
            };
            let key = (entry.id.clone(), entry.content_type);
            list = upsert(list, entry);
            assert!(list.len() <= HISTORY_LIMIT);
            assert_eq!((list[0].id.clone(), list[0].content_type), key);
            assert_eq!(list.iter().filter(|e| (e.id.clone(), e.content_type) == key).count(), 1);
        }
    }

    #[test]
    fn remove_preserves_order() {
        let list = vec![movie("1", "a"), movie("2", "b"), movie("3", "c")];
        let list = remove(list, 1).unwrap();
        assert_eq!(list, vec![movie("1", "a"), movie("3", "c")]);
    }

    #[test]
    fn remove_out_of_range_is_an_error() {
        let err = remove(vec![movie("1", "a")], 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn persist_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let mut list = upsert(Vec::new(), movie("100", "A"));
        list = upsert(list, HistoryEntry::series("1399", 2, 5, None));
        list = upsert(list, movie("200", "C"));
        list = remove(list, 2).unwrap();
        persist(&mut store, &list).unwrap();
        assert_eq!(load(&store), list);
    }

    #[test]
    fn upsert_uses_the_same_rules_as_load() {
        let stray = HistoryEntry { season: Some(2), episode: Some(9), ..movie("100", "A") };
        let list = upsert(Vec::new(), stray);
        assert_eq!(list, vec![movie("100", "A")]);

        let list = upsert(list, HistoryEntry::series("1399", 0, 0, None));
        let list = upsert(list, HistoryEntry::movie("  ", None));
        let list = upsert(list, HistoryEntry { season: None, ..HistoryEntry::series("7", 1, 1, None) });
        assert_eq!(list, vec![HistoryEntry::series("1399", 0, 0, None), movie("100", "A")]);

        let mut store = MemoryStore::new();
        persist(&mut store, &list).unwrap();
        assert_eq!(load(&store), list);
    }

    #[test]
    fn load_missing_or_corrupt_is_empty() {
        let mut store = MemoryStore::new();
        assert!(load(&store).is_empty());
        store.set(HISTORY_KEY, "[{broken").unwrap();
        assert!(load(&store).is_empty());
        store.set(HISTORY_KEY, r#"{"id":"1"}"#).unwrap();
        assert!(load(&store).is_empty());
        store.set(HISTORY_KEY, "null").unwrap();
        assert!(load(&store).is_empty());
    }

    #[test]
    fn load_drops_malformed_records() {
        let mut store = MemoryStore::new();
        let raw = r#"[
            {"id":"1","type":"movie","season":"1","episode":"1","title":"One"},
            {"id":"","type":"movie","title":null},
            {"id":"2","type":"podcast"},
            {"id":"3","type":"series","season":"2","episode":"4","title":null},
            {"id":"4","type":"series"},
            {"id":"5","type":"movie","title":42},
            {"id":"1","type":"movie","title":"Duplicate"},
            "junk"
        ]"#;
        store.set(HISTORY_KEY, raw).unwrap();
        let list = load(&store);
        assert_eq!(list, vec![movie("1", "One"), HistoryEntry::series("3", 2, 4, None)]);
    }

    #[test]
    fn load_truncates_oversized_history() {
        let mut store = MemoryStore::new();
        let list: HistoryList = (0..30).map(|i| HistoryEntry::movie(i.to_string(), None)).collect();
        store.set(HISTORY_KEY, &serde_json::to_string(&list).unwrap()).unwrap();
        let loaded = load(&store);
        assert_eq!(loaded.len(), HISTORY_LIMIT);
        assert_eq!(loaded[0].id, "0");
    }

    #[test]
    fn clear_then_load_is_empty() {
        let mut store = MemoryStore::new();
        persist(&mut store, &[movie("1", "a")]).unwrap();
        assert!(clear(&mut store).unwrap().is_empty());
        assert!(load(&store).is_empty());
        assert_eq!(store.get(HISTORY_KEY), None);
    }

    #[test]
    fn persist_failure_propagates() {
        let mut store = MemoryStore::with_quota(8);
        let err = persist(&mut store, &[movie("100", "A")]).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
    }
}
