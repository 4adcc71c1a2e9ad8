use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use once_cell::sync::Lazy;

use crate::storage::data_dir;

static LOG_PATH: Lazy<PathBuf> = Lazy::new(|| {
    let dir = data_dir();
    let _ = fs::create_dir_all(&dir);
    dir.join("vidembed.log")
});

pub fn log_path() -> PathBuf {
    LOG_PATH.clone()
}

/// Pipe target that echoes every line to stderr and appends it to the log
/// file when that could be opened.
struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _ = io::stderr().write_all(buf);
        if let Some(f) = self.file.as_mut() {
            f.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

/// Installs the logger. The builder lets everything through; the effective
/// level is the global max level, which [`set_level`] adjusts once the
/// config has been read.
pub fn init(level: LevelFilter) {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&*LOG_PATH)
        .inspect_err(|e| eprintln!("cannot open log file {}: {}", LOG_PATH.display(), e))
        .ok();

    let installed = Builder::new()
        .filter_level(LevelFilter::Trace)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(LogSink { file })))
        .try_init();
    if installed.is_err() {
        eprintln!("logger already installed");
    }
    set_level(level);
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
