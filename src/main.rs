mod audio;
mod collision;
mod config;
mod constants;
mod entities;
mod game;
mod highscore;
mod rendering;
mod session;
mod spawner;
mod terminal_io;
mod types;

use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use crate::audio::{AudioSink, LogAudio, TerminalBell};
use crate::config::Config;
use crate::constants::{LOG_FILE, TICKS_PER_SECOND};
use crate::game::{FrameLimiter, Game, RunSummary};
use crate::highscore::{FileStore, MemoryStore};
use crate::rendering::{GameGrid, Glyphs, OutputTarget, ScreenBuffer};
use crate::terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Starting flappy-boost.");

    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::from_args(&args);
    let mut rng = rand::thread_rng();

    let summary = if config.debug_mode {
        info!("Debug mode enabled. Resolution {}x{}", config.debug_width, config.debug_height);
        let mut game = Game::new(
            config.debug_width,
            config.debug_height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(config.debug_width, config.debug_height)),
            Some(SimulatedInput::demo_script()),
            config.max_frames,
            Glyphs::default(),
            MemoryStore::default(),
            LogAudio::default(),
        );
        game.run(&mut rng, None)?
    } else {
        run_interactive(&config, &mut rng)?
    };

    info!("Exiting after {} frames. High score: {}", summary.frames, summary.high_score);
    Ok(())
}

fn run_interactive(config: &Config, rng: &mut impl rand::Rng) -> io::Result<RunSummary> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let result = play(config, rng);

    // Restore the terminal whatever happened in the loop
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    writeln!(stdout)?;
    result
}

fn play(config: &Config, rng: &mut impl rand::Rng) -> io::Result<RunSummary> {
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::new(width, height)
        .clear_screen_manual(&mut stdout_target)
        .map_err(|e| { error!("Failed to clear screen: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    stdout_target.flush()?;

    let audio: Box<dyn AudioSink> = if config.muted {
        Box::new(LogAudio::default())
    } else {
        Box::new(TerminalBell::new(io::stdout()))
    };

    let mut game = Game::new(
        width,
        height,
        stdout_target,
        None,
        config.max_frames,
        Glyphs::default(),
        FileStore::new(&config.high_score_path),
        audio,
    );
    game.run(rng, Some(FrameLimiter::new(TICKS_PER_SECOND)))
}
