use std::io;
use std::thread;
use std::time::{Duration, Instant};
use crossterm::event::Event;
use rand::Rng;
use log::{error, info, warn};

use crate::audio::AudioSink;
use crate::highscore::HighScoreStore;
use crate::rendering::{GameGrid, Glyphs, OutputTarget};
use crate::session::{Command, GameEvent, Session};
use crate::terminal_io::{self, SimulatedInput};

/// Blocks until the next fixed-rate frame boundary. Falling behind resets
/// the schedule instead of bursting to catch up.
pub struct FrameLimiter {
    frame: Duration,
    next: Instant,
}

impl FrameLimiter {
    pub fn new(ticks_per_second: u64) -> Self {
        let frame = Duration::from_nanos(1_000_000_000 / ticks_per_second.max(1));
        FrameLimiter { frame, next: Instant::now() + frame }
    }

    pub fn wait(&mut self) {
        let now = Instant::now();
        match self.next.checked_duration_since(now) {
            Some(remaining) => {
                thread::sleep(remaining);
                self.next += self.frame;
            }
            None => self.next = now + self.frame,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub high_score: u32,
}

pub struct Game<S: HighScoreStore, A: AudioSink> {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    glyphs: Glyphs,
    store: S,
    audio: A,
}

impl<S: HighScoreStore, A: AudioSink> Game<S, A> {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        max_frames: Option<u64>,
        glyphs: Glyphs,
        store: S,
        audio: A,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            debug_mode_active: simulated_input.is_some(),
            stdout_target,
            simulated_input,
            max_frames,
            glyphs,
            store,
            audio,
        }
    }

    /// Runs sessions back to back until quit or the frame cap.
    pub fn run(&mut self, rng: &mut impl Rng, mut limiter: Option<FrameLimiter>) -> io::Result<RunSummary> {
        let mut session = Session::new(self.store.load());
        info!("Starting with high score {}", session.high_score());

        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut frame_count = 0;
        let mut running = true;

        while running && self.max_frames.map_or(true, |max| frame_count < max) {
            for command in self.poll_commands(frame_count)? {
                if command == Command::Quit {
                    info!("Quit requested at frame {}", frame_count);
                    running = false;
                    break;
                }
                session.apply(command);
            }
            if !running {
                break;
            }

            let events = session.tick(rng);
            self.dispatch(&events);
            if events.contains(&GameEvent::Collision) {
                info!(
                    "Session ended at tick {} with score {} ({:?})",
                    session.tick_count(),
                    session.score(),
                    session.state()
                );
            }

            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height {
                game_grid.resize(self.terminal_width, self.terminal_height);
            }
            game_grid.draw_snapshot(&session.snapshot(), &self.glyphs);
            self.render(&game_grid)?;

            frame_count += 1;
            if let Some(limiter) = limiter.as_mut() {
                limiter.wait();
            }
        }

        Ok(RunSummary { frames: frame_count, high_score: session.high_score() })
    }

    fn poll_commands(&mut self, frame_count: u64) -> io::Result<Vec<Command>> {
        let events = if self.debug_mode_active {
            match &mut self.simulated_input {
                Some(sim_input) => sim_input.drain(frame_count),
                None => Vec::new(),
            }
        } else {
            terminal_io::drain_events().map_err(|e| { error!("Failed to poll events: {}", e); e })?
        };

        let mut commands = Vec::new();
        for event in &events {
            if let Event::Resize(new_width, new_height) = event {
                self.terminal_width = *new_width;
                self.terminal_height = *new_height;
                info!("Terminal resized to {}x{}", new_width, new_height);
            }
            commands.extend(terminal_io::command_for(event));
        }
        Ok(commands)
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(cue) = event.sound_cue() {
                if let Err(e) = self.audio.play(cue) {
                    warn!("Failed to play {:?}: {}", cue, e);
                }
            }
            if let GameEvent::HighScoreBeaten(score) = event {
                if let Err(e) = self.store.save(*score) {
                    warn!("Failed to save high score {}: {}", score, e);
                }
            }
        }
    }

    fn render(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        if self.debug_mode_active {
            if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
                sb.print_to_log();
            }
        }
        Ok(())
    }
}
