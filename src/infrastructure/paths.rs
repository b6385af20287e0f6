//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from.
const HOST_ROOT: &str = "/host";

/// Returns the data directory for serpdeck trace files.
///
/// Located at `/host/.local/share/zellij/serpdeck`. In Zellij's plugin
/// environment `/host` points to the cwd of the last focused terminal, or the
/// folder Zellij was started from, which is usually the home directory.
///
/// ```
/// use serpdeck::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/serpdeck"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    [HOST_ROOT, ".local", "share", "zellij", "serpdeck"].iter().collect()
}

/// Maps a `~`-relative path into the sandbox.
///
/// Used for files the plugin reads itself, such as a custom `theme_file`.
/// `~user/...` and other paths are returned unchanged.
///
/// ```
/// use serpdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("~bob/x"), "~bob/x");
/// assert_eq!(expand_tilde("/etc/serpdeck.toml"), "/etc/serpdeck.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
