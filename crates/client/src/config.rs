//! Client configuration loaded from the environment.
use std::path::PathBuf;
use std::str::FromStr;

/// Settings owned by the terminal client.
///
/// Rule and pacing settings live in [`runtime::RuntimeConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Spin the reels automatically instead of prompting on stdin.
    pub auto_spin: bool,
    pub log_dir: PathBuf,
    /// JSON-lines transcript of every event, if set.
    pub transcript: Option<PathBuf>,
    /// Session directory name under `log_dir`. Generated when unset.
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auto_spin: false,
            log_dir: default_log_dir(),
            transcript: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_AUTO_SPIN` - Random reels instead of stdin prompts (default: false)
    /// - `ARENA_LOG_DIR` - Directory for session logs (default: platform cache dir)
    /// - `ARENA_TRANSCRIPT` - Path of the JSON-lines event transcript (default: none)
    /// - `ARENA_SESSION_ID` - Session log directory name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(auto_spin) = read_env_bool("ARENA_AUTO_SPIN") {
            config.auto_spin = auto_spin;
        }
        if let Some(dir) = read_env::<PathBuf>("ARENA_LOG_DIR") {
            config.log_dir = dir;
        }
        config.transcript = read_env::<PathBuf>("ARENA_TRANSCRIPT");
        config.session_id = read_env::<String>("ARENA_SESSION_ID");

        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| value.trim().parse().ok())
}

fn read_env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().and_then(|value| parse_bool(&value))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get platform-specific log directory
fn default_log_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Logs/slot-arena");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("slot-arena").join("logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".cache")
                .join("slot-arena")
                .join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join("slot-arena").join("logs");
        }
    }

    std::env::temp_dir().join("slot-arena").join("logs")
}
