//! UI-independent core of VidEmbed: playback history, title lookups,
//! embed URL construction and the persisted preferences behind them.

mod error;
mod models;

pub mod embed;
pub mod history;
pub mod kv;
pub mod metadata;
pub mod preferences;
pub mod session;

pub use error::{Error, Result, StoreError};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use metadata::TmdbClient;
pub use models::*;
pub use session::{PlayOutcome, PlayTicket, Session};
