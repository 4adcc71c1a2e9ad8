use std::fs;
use std::path::PathBuf;

use vidembed_core::FileStore;

/// Platform data directory, e.g. `~/.local/share/vidembed` on Linux or
/// `~/Library/Application Support/org.vidembed.VidEmbed` on macOS.
pub fn data_dir() -> PathBuf {
    let dir = directories::ProjectDirs::from("org", "vidembed", "VidEmbed")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".vidembed")
        });
    let _ = fs::create_dir_all(&dir);
    dir
}

fn store_file() -> PathBuf {
    data_dir().join("local_storage.json")
}

/// Opens the persisted key-value store holding history, API key and theme.
pub fn open_store() -> FileStore {
    let path = store_file();
    log::debug!("opening store at {}", path.display());
    FileStore::open(path)
}
