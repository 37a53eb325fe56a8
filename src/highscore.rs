use std::fs;
use std::io;
use std::path::PathBuf;
use log::{info, warn};

/// Where the single persisted integer lives.
pub trait HighScoreStore {
    /// Never fails: anything unreadable counts as zero.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> io::Result<()>;
}

// --- Plain decimal text file ---
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No high score file at {}, starting from 0", self.path.display());
                return 0;
            }
            Err(e) => {
                warn!("Failed to read high score from {}: {}", self.path.display(), e);
                return 0;
            }
        };
        match text.trim().parse::<u32>() {
            Ok(score) => score,
            Err(e) => {
                warn!("Ignoring unparseable high score {:?} in {}: {}", text.trim(), self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        fs::write(&self.path, score.to_string())?;
        info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

// --- In-memory store for headless runs ---
#[derive(Default)]
pub struct MemoryStore {
    pub score: Option<u32>,
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.score.unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        self.score = Some(score);
        Ok(())
    }
}
