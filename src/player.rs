use std::io;
use std::process::Command;

use crate::models::Config;

/// Splits a user browser command and substitutes the URL for a `{URL}`
/// placeholder, appending it when there is none.
pub fn build_command(cmd: &str, url: &str) -> Option<(String, Vec<String>)> {
    let mut parts: Vec<String> = cmd.split_whitespace().map(|s| s.to_string()).collect();
    if parts.is_empty() {
        return None;
    }
    let mut replaced = false;
    for p in &mut parts {
        if p == "URL" || p == "{URL}" || p == "{url}" {
            *p = url.to_string();
            replaced = true;
        }
    }
    if !replaced {
        parts.push(url.to_string());
    }
    let program = parts.remove(0);
    Some((program, parts))
}

/// Opens an embed URL, through `browser_command` when configured and the
/// system browser otherwise. Does not wait for the browser.
pub fn open_embed(cfg: &Config, url: &str) -> io::Result<()> {
    match build_command(&cfg.browser_command, url) {
        Some((program, args)) => {
            log::info!("RUN: {} {}", program, args.join(" "));
            let child = Command::new(&program).args(&args).spawn().inspect_err(|e| {
                log::error!("failed to spawn browser '{}': {}", program, e);
            })?;
            log::debug!("spawned browser pid={}", child.id());
            Ok(())
        }
        None => webbrowser::open(url).inspect_err(|e| log::error!("failed to open system browser: {}", e)),
    }
}
