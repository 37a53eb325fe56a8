use std::path::PathBuf;

use crate::constants::{DEBUG_HEIGHT, DEBUG_WIDTH, HIGH_SCORE_FILE};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub debug_mode: bool,
    pub debug_width: u16,
    pub debug_height: u16,
    pub max_frames: Option<u64>,
    pub high_score_path: PathBuf,
    pub muted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug_mode: false,
            debug_width: DEBUG_WIDTH,
            debug_height: DEBUG_HEIGHT,
            max_frames: None,
            high_score_path: PathBuf::from(HIGH_SCORE_FILE),
            muted: false,
        }
    }
}

impl Config {
    /// `args` excludes the program name.
    ///
    /// `--debug [WIDTH HEIGHT [FRAMES]]` runs headless; otherwise a leading
    /// number caps the frame count. `--highscore PATH` and `--mute` may appear
    /// anywhere. Values that do not parse fall back to defaults.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Config::default();
        let mut positional: Vec<&str> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" => config.debug_mode = true,
                "--mute" => config.muted = true,
                "--highscore" => {
                    if let Some(path) = iter.next() {
                        config.high_score_path = PathBuf::from(path);
                    }
                }
                other => positional.push(other),
            }
        }

        if config.debug_mode {
            if let [width, height, rest @ ..] = positional.as_slice() {
                config.debug_width = width.parse().unwrap_or(DEBUG_WIDTH);
                config.debug_height = height.parse().unwrap_or(DEBUG_HEIGHT);
                config.max_frames = rest.first().and_then(|frames| frames.parse().ok());
            }
        } else {
            config.max_frames = positional.first().and_then(|frames| frames.parse().ok());
        }
        config
    }
}
