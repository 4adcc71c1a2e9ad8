//! The state a running player owns: store, history, API key and theme.
//!
//! A play happens in two steps. [`Session::begin_play`] validates the
//! request and hands back a [`PlayTicket`] with the embed URL, which the
//! caller opens right away. Once the title lookup for that ticket finishes,
//! [`Session::complete_play`] records it. Tickets are numbered; a completion
//! for anything but the most recently issued ticket is discarded, so the
//! history reflects the last play the user started rather than the last
//! lookup to return.

use crate::embed::{build_embed_url, DEFAULT_EMBED_BASE_URL};
use crate::error::{Error, Result, StoreError};
use crate::history::{self, HistoryList};
use crate::kv::KeyValueStore;
use crate::models::{HistoryEntry, PlayRequest, Theme};
use crate::preferences;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTicket {
    pub seq: u64,
    pub url: String,
    pub request: PlayRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Recorded,
    Superseded,
}

#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    history: HistoryList,
    api_key: String,
    theme: Theme,
    embed_base_url: String,
    last_seq: u64,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads history, API key and theme from `store`.
    pub fn open(store: S) -> Self {
        Self::with_embed_base(store, DEFAULT_EMBED_BASE_URL)
    }

    pub fn with_embed_base(store: S, embed_base_url: impl Into<String>) -> Self {
        let history = history::load(&store);
        let api_key = preferences::load_api_key(&store);
        let theme = preferences::load_theme(&store);
        log::info!("session opened: {} history entries, theme {}", history.len(), theme.as_str());
        Self { store, history, api_key, theme, embed_base_url: embed_base_url.into(), last_seq: 0 }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn begin_play(&mut self, request: &PlayRequest) -> Result<PlayTicket> {
        let id = request.id.trim();
        if id.is_empty() {
            return Err(Error::EmptyContentId);
        }
        let request = PlayRequest { id: id.to_string(), ..request.clone() };
        self.last_seq += 1;
        let ticket = PlayTicket {
            seq: self.last_seq,
            url: build_embed_url(&self.embed_base_url, &request),
            request,
        };
        log::info!("play #{}: {}", ticket.seq, ticket.url);
        Ok(ticket)
    }

    /// Withdraws a ticket whose play never started, e.g. because the browser
    /// could not be opened. If it is still the latest ticket, the previous
    /// one becomes current again so its pending lookup is still recorded.
    pub fn abandon(&mut self, ticket: &PlayTicket) {
        if ticket.seq == self.last_seq {
            self.last_seq -= 1;
            log::debug!("play #{} abandoned", ticket.seq);
        }
    }

    /// Records a finished play unless a newer one has started since.
    /// In-memory history only changes once the store accepted the write.
    pub fn complete_play(&mut self, ticket: PlayTicket, title: Option<String>) -> std::result::Result<PlayOutcome, StoreError> {
        if ticket.seq != self.last_seq {
            log::debug!("discarding play #{} superseded by #{}", ticket.seq, self.last_seq);
            return Ok(PlayOutcome::Superseded);
        }
        let entry = ticket.request.to_entry(title);
        let updated = history::upsert(self.history.clone(), entry);
        history::persist(&mut self.store, &updated)?;
        self.history = updated;
        Ok(PlayOutcome::Recorded)
    }

    pub fn delete_entry(&mut self, index: usize) -> Result<HistoryEntry> {
        let removed = self
            .history
            .get(index)
            .cloned()
            .ok_or(Error::IndexOutOfRange { index, len: self.history.len() })?;
        let updated = history::remove(self.history.clone(), index)?;
        history::persist(&mut self.store, &updated)?;
        self.history = updated;
        Ok(removed)
    }

    pub fn clear_history(&mut self) -> std::result::Result<(), StoreError> {
        self.history = history::clear(&mut self.store)?;
        Ok(())
    }

    pub fn set_api_key(&mut self, key: &str) -> std::result::Result<(), StoreError> {
        self.api_key = preferences::save_api_key(&mut self.store, key)?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> std::result::Result<Theme, StoreError> {
        let next = self.theme.toggled();
        preferences::save_theme(&mut self.store, next)?;
        self.theme = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_KEY;
    use crate::kv::MemoryStore;

    #[test]
    fn empty_id_changes_nothing() {
        let mut session = Session::open(MemoryStore::new());
        let err = session.begin_play(&PlayRequest::movie("   ")).unwrap_err();
        assert!(matches!(err, Error::EmptyContentId));
        assert!(session.history().is_empty());
        assert_eq!(session.store().get(HISTORY_KEY), None);
    }

    #[test]
    fn play_records_trimmed_entry_with_title() {
        let mut session = Session::open(MemoryStore::new());
        let ticket = session.begin_play(&PlayRequest::series(" 1399 ", 2, 5)).unwrap();
        assert_eq!(ticket.url, "https://vidsrc.to/embed/tv/1399/2/5");

        let outcome = session.complete_play(ticket, Some("Juego de tronos".into())).unwrap();
        assert_eq!(outcome, PlayOutcome::Recorded);
        assert_eq!(session.history(), &[HistoryEntry::series("1399", 2, 5, Some("Juego de tronos".into()))]);

        let reopened = Session::open(session.store().clone());
        assert_eq!(reopened.history(), session.history());
    }

    #[test]
    fn stale_lookup_is_discarded() {
        let mut session = Session::open(MemoryStore::new());
        let first = session.begin_play(&PlayRequest::movie("1")).unwrap();
        let second = session.begin_play(&PlayRequest::movie("2")).unwrap();

        // the newer lookup resolves first, the older one afterwards
        assert_eq!(session.complete_play(second, None).unwrap(), PlayOutcome::Recorded);
        assert_eq!(session.complete_play(first, Some("late".into())).unwrap(), PlayOutcome::Superseded);

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].id, "2");
    }

    #[test]
    fn abandoned_play_does_not_supersede_earlier_one() {
        let mut session = Session::open(MemoryStore::new());
        let opened = session.begin_play(&PlayRequest::movie("100")).unwrap();
        let failed = session.begin_play(&PlayRequest::movie("200")).unwrap();
        session.abandon(&failed);

        let outcome = session.complete_play(opened, Some("A title".into())).unwrap();
        assert_eq!(outcome, PlayOutcome::Recorded);
        assert_eq!(session.history(), &[HistoryEntry::movie("100", Some("A title".into()))]);

        // the withdrawn number is free again; no lookup ever carried it
        let next = session.begin_play(&PlayRequest::movie("300")).unwrap();
        assert_eq!(next.seq, 2);
    }

    #[test]
    fn abandoning_an_old_ticket_changes_nothing() {
        let mut session = Session::open(MemoryStore::new());
        let first = session.begin_play(&PlayRequest::movie("1")).unwrap();
        let second = session.begin_play(&PlayRequest::movie("2")).unwrap();
        session.abandon(&first);
        assert_eq!(session.complete_play(second, None).unwrap(), PlayOutcome::Recorded);
    }

    #[test]
    fn unchecked_coordinates_survive_reopen() {
        let mut session = Session::open(MemoryStore::new());
        for request in [PlayRequest::series("1399", 0, 3), PlayRequest::series("66732", 4, 0), PlayRequest::movie("550")] {
            let ticket = session.begin_play(&request).unwrap();
            assert_eq!(session.complete_play(ticket, None).unwrap(), PlayOutcome::Recorded);
        }
        assert_eq!(session.history()[1], HistoryEntry::series("66732", 4, 0, None));
        assert_eq!(session.history()[2], HistoryEntry::series("1399", 0, 3, None));

        let reopened = Session::open(session.store().clone());
        assert_eq!(reopened.history(), session.history());
    }

    #[test]
    fn write_failure_propagates_and_keeps_memory() {
        let mut session = Session::open(MemoryStore::with_quota(10));
        let ticket = session.begin_play(&PlayRequest::movie("100")).unwrap();
        let err = session.complete_play(ticket, Some("A".into())).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert!(session.history().is_empty());
    }

    #[test]
    fn delete_and_clear() {
        let mut session = Session::open(MemoryStore::new());
        for id in ["1", "2", "3"] {
            let t = session.begin_play(&PlayRequest::movie(id)).unwrap();
            session.complete_play(t, None).unwrap();
        }
        let removed = session.delete_entry(1).unwrap();
        assert_eq!(removed.id, "2");
        let ids: Vec<_> = session.history().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);

        assert!(matches!(session.delete_entry(5), Err(Error::IndexOutOfRange { index: 5, len: 2 })));

        session.clear_history().unwrap();
        assert!(session.history().is_empty());
        assert!(Session::open(session.store().clone()).history().is_empty());
    }

    #[test]
    fn preferences_persist() {
        let mut session = Session::open(MemoryStore::new());
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
        session.set_api_key(" key ").unwrap();

        let reopened = Session::open(session.store().clone());
        assert_eq!(reopened.theme(), Theme::Light);
        assert_eq!(reopened.api_key(), "key");
    }

    #[test]
    fn replay_from_history_reuses_coordinates() {
        let entry = HistoryEntry::series("1399", 3, 7, None);
        let mut session = Session::open(MemoryStore::new());
        let ticket = session.begin_play(&PlayRequest::from_entry(&entry)).unwrap();
        assert_eq!(ticket.url, "https://vidsrc.to/embed/tv/1399/3/7");
    }
}
