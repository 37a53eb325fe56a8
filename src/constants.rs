// --- World Constants ---
// Every per-tick value below is tuned for exactly TICKS_PER_SECOND. A variable
// timestep would have to scale them by elapsed time.
pub const TICKS_PER_SECOND: u64 = 60;

pub const SCREEN_WIDTH: f64 = 1270.0;
pub const SCREEN_HEIGHT: f64 = 720.0;
pub const GROUND_HEIGHT: f64 = 100.0;
pub const GROUND_Y: f64 = SCREEN_HEIGHT - GROUND_HEIGHT;

// --- Bird ---
pub const BIRD_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = SCREEN_HEIGHT / 2.0;
pub const BIRD_WIDTH: f64 = 50.0;
pub const BIRD_HEIGHT: f64 = 35.0;

pub const GRAVITY: f64 = 0.8; // Added to velocity every tick, no terminal velocity
pub const FLAP_VELOCITY: f64 = -6.0; // Overrides velocity on flap
pub const FLAP_TICKS: u32 = 10;
pub const FLAP_LIFT: f64 = 8.0; // Extra upward offset per tick while the flap lasts
pub const FLAP_ROTATION: f64 = -30.0; // Degrees, nose up
pub const MAX_ROTATION: f64 = 90.0; // Degrees, nose down
pub const ROTATION_STEP: f64 = 2.0;

// --- Pipes ---
pub const PIPE_WIDTH: f64 = 100.0;
pub const PIPE_GAP: f64 = 350.0;
pub const PIPE_MIN_HEIGHT: u32 = 100;
pub const PIPE_MAX_HEIGHT: u32 = 400;
pub const PIPE_SPAWN_X: f64 = SCREEN_WIDTH + PIPE_WIDTH;
pub const PIPE_SPAWN_INTERVAL: u64 = 150; // Ticks between pipes

pub const SCROLL_SPEED: f64 = 5.0; // Shared by pipes and boosts

// --- Boosts ---
pub const BOOST_SIZE: f64 = 50.0;
pub const BOOST_SPAWN_CHANCE: f64 = 0.25;
pub const BOOST_X_OFFSET: f64 = 50.0;
pub const BOOST_MIN_Y: i32 = 50;
pub const BOOST_TOP_MARGIN: i32 = 50; // Kept clear below the lower pipe's top edge
pub const BOOST_DURATION_TICKS: u32 = 300; // 5 seconds

// --- Files ---
pub const HIGH_SCORE_FILE: &str = "highscore.txt";
pub const LOG_FILE: &str = "flappy-boost.log";

pub const DEBUG_WIDTH: u16 = 80;
pub const DEBUG_HEIGHT: u16 = 24;
