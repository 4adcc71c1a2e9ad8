use vidembed_core::{ContentType, PlayRequest, PlayTicket};

/// Results delivered from background tasks to the UI thread.
#[derive(Debug, Clone)]
pub enum Msg {
    TitleResolved { ticket: PlayTicket, title: Option<String> },
}

/// Current contents of the play form.
#[derive(Debug, Clone)]
pub struct PlayForm {
    pub content_type: ContentType,
    pub id: String,
    pub season: u32,
    pub episode: u32,
}

impl Default for PlayForm {
    fn default() -> Self {
        Self { content_type: ContentType::Movie, id: String::new(), season: 1, episode: 1 }
    }
}

impl PlayForm {
    pub fn to_request(&self) -> PlayRequest {
        PlayRequest {
            id: self.id.trim().to_string(),
            content_type: self.content_type,
            season: self.season,
            episode: self.episode,
        }
    }

    /// Mirrors a started play back into the form, as when replaying from
    /// the history list.
    pub fn fill_from(&mut self, request: &PlayRequest) {
        self.id = request.id.clone();
        self.content_type = request.content_type;
        if request.content_type == ContentType::Series {
            self.season = request.season;
            self.episode = request.episode;
        }
    }

    pub fn shows_episode_fields(&self) -> bool {
        self.content_type == ContentType::Series
    }
}

/// A confirmation the user still has to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    ClearHistory,
}
