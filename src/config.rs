use std::{env, path::PathBuf, time::Duration};

// Runtime settings for the terminal front-end (not gameplay tuning).

pub const DEFAULT_FPS: u32 = 60;

pub fn fps() -> u32 {
    env::var("SPACE_INVADERS_FPS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .map(|v| v.clamp(10, 240))
        .unwrap_or(DEFAULT_FPS)
}

pub fn frame_interval() -> Duration {
    Duration::from_millis(1000 / u64::from(fps()))
}

/// Log destination; logging is off when unset.
pub fn log_file() -> Option<PathBuf> {
    env::var_os("SPACE_INVADERS_LOG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
