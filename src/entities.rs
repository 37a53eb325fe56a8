use crate::constants::*;
use crate::types::Rect;
use crate::rendering::{GameGrid, Glyphs};
use rand::Rng;
use log::info;

// --- Bird (physics lives here) ---
#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub velocity: f64, // Positive is downward
    pub flap_ticks: u32,
    pub rotation: f64, // Degrees, negative is nose up
}

impl Bird {
    pub fn new() -> Self {
        Bird {
            x: BIRD_X,
            y: BIRD_START_Y,
            velocity: 0.0,
            flap_ticks: 0,
            rotation: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BIRD_WIDTH, BIRD_HEIGHT)
    }

    /// One physics tick. Gravity accumulates without a cap; an active flap
    /// lifts on top of the velocity integration.
    pub fn update(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;
        if self.flap_ticks > 0 {
            self.flap_ticks -= 1;
            self.y -= FLAP_LIFT;
            self.rotation = FLAP_ROTATION;
        } else {
            self.rotation = (self.rotation + ROTATION_STEP).min(MAX_ROTATION);
        }
    }

    /// Overrides the current velocity instead of adding to it.
    pub fn flap(&mut self) {
        self.flap_ticks = FLAP_TICKS;
        self.velocity = FLAP_VELOCITY;
        info!("Flap: y = {:.1}", self.y);
    }

    pub fn touches_ground(&self) -> bool {
        self.bounds().bottom() >= GROUND_Y
    }

    pub fn draw(&self, game_grid: &mut GameGrid, glyphs: &Glyphs) {
        let glyph = if self.rotation < -10.0 {
            glyphs.bird_up
        } else if self.rotation > 45.0 {
            glyphs.bird_down
        } else {
            glyphs.bird_level
        };
        game_grid.fill_world_rect(&self.bounds(), glyph);
    }
}

impl Default for Bird {
    fn default() -> Self {
        Bird::new()
    }
}

// --- Pipe ---
#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub gap: f64,
    pub height: f64, // Lower segment
    pub y: f64,      // Top of the lower segment
}

impl Pipe {
    pub fn new(x: f64, height: f64) -> Self {
        Pipe { x, gap: PIPE_GAP, height, y: GROUND_Y - height }
    }

    pub fn random(x: f64, rng: &mut impl Rng) -> Self {
        let height = rng.gen_range(PIPE_MIN_HEIGHT..=PIPE_MAX_HEIGHT);
        Pipe::new(x, height as f64)
    }

    pub fn lower_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PIPE_WIDTH, self.height)
    }

    /// The upper segment ends `gap` above the lower one and is as tall as the
    /// space the lower segment leaves free above the ground.
    pub fn upper_bounds(&self) -> Rect {
        let free = GROUND_Y - self.height;
        Rect::new(self.x, self.y - self.gap - free, PIPE_WIDTH, free)
    }

    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    pub fn update(&mut self) {
        self.x -= SCROLL_SPEED;
    }

    pub fn off_screen(&self) -> bool {
        self.x < -PIPE_WIDTH
    }

    pub fn draw(&self, game_grid: &mut GameGrid, glyphs: &Glyphs) {
        game_grid.fill_world_rect(&self.lower_bounds(), glyphs.pipe);
        game_grid.fill_world_rect(&self.upper_bounds(), glyphs.pipe);
    }
}

/// A pipe together with its scoring marker, so the two can never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct PipeSlot {
    pub pipe: Pipe,
    pub passed: bool,
}

impl PipeSlot {
    pub fn new(pipe: Pipe) -> Self {
        PipeSlot { pipe, passed: false }
    }
}

// --- Boost ---
#[derive(Clone, Debug, PartialEq)]
pub struct Boost {
    pub x: f64,
    pub y: f64,
}

impl Boost {
    pub fn new(x: f64, y: f64) -> Self {
        Boost { x, y }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BOOST_SIZE, BOOST_SIZE)
    }

    pub fn update(&mut self) {
        self.x -= SCROLL_SPEED;
    }

    pub fn off_screen(&self) -> bool {
        self.x < -BOOST_SIZE
    }

    pub fn draw(&self, game_grid: &mut GameGrid, glyphs: &Glyphs) {
        game_grid.fill_world_rect(&self.bounds(), glyphs.boost);
    }
}
