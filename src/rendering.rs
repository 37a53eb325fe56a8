use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::*;
use crate::session::Snapshot;
use crate::types::Rect;

// --- Glyph bundle, built once at startup ---
#[derive(Clone, Debug)]
pub struct Glyphs {
    pub bird_up: char,
    pub bird_level: char,
    pub bird_down: char,
    pub pipe: char,
    pub boost: char,
    pub ground: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            bird_up: '/',
            bird_level: '>',
            bird_down: '\\',
            pipe: '#',
            boost: '$',
            ground: '=',
        }
    }
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if let Some(cell) = self
            .buffer
            .get_mut(self.cursor_y as usize)
            .and_then(|row| row.get_mut(self.cursor_x as usize))
        {
            *cell = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row_text(y));
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: the world scaled into terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = GameGrid::new(width, height);
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    fn to_col(&self, world_x: f64) -> f64 {
        world_x * self.width as f64 / SCREEN_WIDTH
    }

    fn to_row(&self, world_y: f64) -> f64 {
        world_y * self.height as f64 / SCREEN_HEIGHT
    }

    /// Fills every cell the world box touches, clipped to the grid. A box
    /// always covers at least one cell when it is on screen.
    pub fn fill_world_rect(&mut self, rect: &Rect, c: char) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let first_col = self.to_col(rect.x).floor().max(0.0);
        let last_col = (self.to_col(rect.right()).ceil() - 1.0).min(self.width as f64 - 1.0);
        let first_row = self.to_row(rect.y).floor().max(0.0);
        let last_row = (self.to_row(rect.bottom()).ceil() - 1.0).min(self.height as f64 - 1.0);
        if first_col > last_col || first_row > last_row {
            return;
        }
        for y in first_row as u16..=last_row as u16 {
            for x in first_col as u16..=last_col as u16 {
                self.set_char(x, y, c);
            }
        }
    }

    pub fn put_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    /// Centers `text` horizontally on the row that `world_y` maps to.
    pub fn put_text_centered(&mut self, world_y: f64, text: &str) {
        let len = text.chars().count() as u16;
        let x = (self.width / 2).saturating_sub(len / 2);
        let y = self.to_row(world_y).floor().max(0.0) as u16;
        self.put_text(x, y, text);
    }

    pub fn draw_snapshot(&mut self, snapshot: &Snapshot<'_>, glyphs: &Glyphs) {
        self.clear();

        for slot in snapshot.pipes {
            slot.pipe.draw(self, glyphs);
        }
        for boost in snapshot.boosts {
            boost.draw(self, glyphs);
        }
        snapshot.bird.draw(self, glyphs);
        self.fill_world_rect(&Rect::new(0.0, GROUND_Y, SCREEN_WIDTH, GROUND_HEIGHT), glyphs.ground);

        if snapshot.game_over {
            let mid = SCREEN_HEIGHT / 2.0;
            self.put_text_centered(mid - 200.0, "Game Over!");
            self.put_text_centered(mid - 100.0, &format!("Score: {}", snapshot.score));
            self.put_text_centered(mid - 40.0, &format!("High Score: {}", snapshot.high_score));
            self.put_text_centered(mid + 20.0, "Press Enter To Play Again");
            self.put_text_centered(mid + 80.0, "Press ESC to Exit");
        } else {
            self.put_text_centered(0.0, &snapshot.score.to_string());
            if let Some(seconds) = snapshot.boost_seconds_left {
                let text = format!("Boost Time: {}s", seconds);
                let x = self.width.saturating_sub(text.len() as u16 + 1);
                self.put_text(x, 0, &text);
            }
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        stdout.flush()
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}
