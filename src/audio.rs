use std::io::{self, Write};
use log::info;

use crate::session::SoundCue;

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> io::Result<()>;
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        (**self).play(cue)
    }
}

// --- Terminal bell ---
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        let rings = match cue {
            SoundCue::Point => 1,
            SoundCue::Boost => 2,
            SoundCue::Hit => 3,
        };
        for _ in 0..rings {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

// --- Muted / headless ---
#[derive(Default)]
pub struct LogAudio {
    pub played: Vec<SoundCue>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) -> io::Result<()> {
        self.played.push(cue);
        info!("Sound cue #{}: {:?}", self.played.len(), cue);
        Ok(())
    }
}
