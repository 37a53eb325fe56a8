//! One play-through from reset to game over, plus the high score that
//! outlives it.

use crate::collision::{self, BoostTimer};
use crate::entities::{Bird, Boost, PipeSlot};
use crate::spawner::{self, Spawner};
use rand::Rng;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Flap,
    Reset,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Point,
    Boost,
    Hit,
}

/// Everything a tick can report to the outside world, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PointScored,
    BoostAcquired,
    Collision,
    /// The final score beat the stored high score and should be persisted.
    HighScoreBeaten(u32),
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::PointScored => Some(SoundCue::Point),
            GameEvent::BoostAcquired => Some(SoundCue::Boost),
            GameEvent::Collision => Some(SoundCue::Hit),
            GameEvent::HighScoreBeaten(_) => None,
        }
    }
}

/// Read-only view handed to the renderer once per tick.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub bird: &'a Bird,
    pub pipes: &'a [PipeSlot],
    pub boosts: &'a [Boost],
    pub score: u32,
    pub high_score: u32,
    pub boost_seconds_left: Option<u32>,
    pub game_over: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    bird: Bird,
    pipes: Vec<PipeSlot>,
    boosts: Vec<Boost>,
    tick: u64,
    score: u32,
    high_score: u32,
    state: SessionState,
    boost: BoostTimer,
    spawner: Spawner,
}

impl Session {
    pub fn new(high_score: u32) -> Self {
        Session::with_spawner(high_score, Spawner::default())
    }

    pub fn with_spawner(high_score: u32, spawner: Spawner) -> Self {
        Session {
            bird: Bird::new(),
            pipes: Vec::new(),
            boosts: Vec::new(),
            tick: 0,
            score: 0,
            high_score,
            state: SessionState::Active,
            boost: BoostTimer::default(),
            spawner,
        }
    }

    /// Applies one input command. `Quit` is left to the caller, which owns the
    /// run loop.
    pub fn apply(&mut self, command: Command) {
        match (command, self.state) {
            (Command::Flap, SessionState::Active) => self.bird.flap(),
            (Command::Reset, SessionState::GameOver) => self.reset(),
            _ => {}
        }
    }

    /// Re-initializes everything except the high score.
    pub fn reset(&mut self) {
        info!("Session reset. Previous score: {}, high score: {}", self.score, self.high_score);
        *self = Session::with_spawner(self.high_score, self.spawner);
    }

    /// Advances the simulation by one tick. A no-op once the session is over.
    pub fn tick(&mut self, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state == SessionState::GameOver {
            return events;
        }

        self.bird.update();
        self.spawner.spawn(self.tick, &mut self.pipes, &mut self.boosts, rng);
        spawner::advance(&mut self.pipes, &mut self.boosts);

        let points = collision::score_passed_pipes(&self.bird, &mut self.pipes);
        self.score += points;
        events.extend((0..points).map(|_| GameEvent::PointScored));

        let pickups = collision::collect_boosts(&self.bird, &mut self.boosts);
        if pickups > 0 {
            self.boost.activate();
            info!("Boost acquired ({} this tick)", pickups);
            events.extend((0..pickups).map(|_| GameEvent::BoostAcquired));
        }

        if self.boost.is_active() {
            self.boost.tick();
        }

        if !self.boost.is_active() {
            if let Some(kind) = collision::detect_collision(&self.bird, &self.pipes) {
                self.end(kind, &mut events);
            }
        }

        self.tick += 1;
        events
    }

    fn end(&mut self, kind: collision::CollisionKind, events: &mut Vec<GameEvent>) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.state = SessionState::GameOver;
        events.push(GameEvent::Collision);
        info!("Game over ({:?} collision). Score: {}", kind, self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            info!("New high score: {}", self.high_score);
            events.push(GameEvent::HighScoreBeaten(self.high_score));
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            bird: &self.bird,
            pipes: &self.pipes,
            boosts: &self.boosts,
            score: self.score,
            high_score: self.high_score,
            boost_seconds_left: self.boost.is_active().then(|| self.boost.seconds_left()),
            game_over: self.is_game_over(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::entities::Pipe;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet_spawner() -> Spawner {
        // Interval far beyond any test length so only tick 0 spawns
        Spawner { interval: u64::MAX, boost_chance: 0.0 }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Keeps the bird hovering around mid-screen.
    fn hover(session: &mut Session) {
        if session.bird.y > BIRD_START_Y && session.bird.flap_ticks == 0 {
            session.apply(Command::Flap);
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(7);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 7);
        assert_eq!(session.tick_count(), 0);
        assert!(session.pipes.is_empty());
        assert!(session.boosts.is_empty());
        assert!(!session.boost.is_active());
        assert_eq!(session.bird, Bird::new());
    }

    #[test]
    fn test_first_tick_spawns_pipe() {
        let mut session = Session::new(0);
        let mut rng = rng();
        session.tick(&mut rng);
        assert_eq!(session.pipes.len(), 1);
        // Spawned at PIPE_SPAWN_X, then scrolled once
        assert!((session.pipes[0].pipe.x - (PIPE_SPAWN_X - SCROLL_SPEED)).abs() < f64::EPSILON);
        assert_eq!(session.tick_count(), 1);
    }

    #[test]
    fn test_spawn_at_interval_with_no_pipes() {
        let mut session = Session::new(0);
        session.tick = 150;
        let mut rng = rng();
        session.tick(&mut rng);
        assert_eq!(session.pipes.len(), 1);
    }

    #[test]
    fn test_pass_scenario() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.tick = 1;
        // Right edge at 95, after one scroll 90: behind the bird at x=100
        session.pipes.push(PipeSlot::new(Pipe::new(-5.0, 100.0)));
        let mut rng = rng();

        let events = session.tick(&mut rng);
        assert_eq!(session.score(), 1);
        assert!(session.pipes[0].passed);
        assert_eq!(events, vec![GameEvent::PointScored]);

        let events = session.tick(&mut rng);
        assert_eq!(session.score(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_flap_ignored_after_game_over_and_reset_ignored_while_active() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.apply(Command::Reset);
        assert_eq!(session.state(), SessionState::Active);

        session.state = SessionState::GameOver;
        let before = session.bird.clone();
        session.apply(Command::Flap);
        assert_eq!(session.bird, before);
    }

    #[test]
    fn test_quit_does_not_change_state() {
        let mut session = Session::new(3);
        session.apply(Command::Quit);
        assert_eq!(session.state(), SessionState::Active);
        session.state = SessionState::GameOver;
        session.apply(Command::Quit);
        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn test_pipe_collision_ends_game_without_new_high_score() {
        let mut session = Session::with_spawner(10, quiet_spawner());
        session.tick = 1;
        session.score = 4;
        session.bird.y = 330.0;
        session.pipes.push(PipeSlot::new(Pipe::new(85.0, 300.0)));
        let mut rng = rng();

        let events = session.tick(&mut rng);

        assert!(session.is_game_over());
        assert_eq!(events, vec![GameEvent::Collision]);
        assert_eq!(session.high_score(), 10);
    }

    #[test]
    fn test_pipe_collision_with_new_high_score() {
        let mut session = Session::with_spawner(3, quiet_spawner());
        session.tick = 1;
        session.score = 4;
        session.bird.y = 330.0;
        session.pipes.push(PipeSlot::new(Pipe::new(85.0, 300.0)));
        let mut rng = rng();

        let events = session.tick(&mut rng);

        assert!(session.is_game_over());
        assert_eq!(events, vec![GameEvent::Collision, GameEvent::HighScoreBeaten(4)]);
        assert_eq!(session.high_score(), 4);
    }

    #[test]
    fn test_equal_score_does_not_persist() {
        let mut session = Session::with_spawner(4, quiet_spawner());
        session.tick = 1;
        session.score = 4;
        session.bird.y = GROUND_Y;
        let events = session.tick(&mut rng());
        assert_eq!(events, vec![GameEvent::Collision]);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.bird.y = GROUND_Y;
        let mut rng = rng();
        session.tick(&mut rng);
        assert!(session.is_game_over());

        let bird = session.bird.clone();
        let pipes = session.pipes.to_vec();
        let tick = session.tick_count();
        for _ in 0..10 {
            let events = session.tick(&mut rng);
            assert!(events.is_empty());
        }
        assert_eq!(session.bird, bird);
        assert_eq!(session.pipes, pipes);
        assert_eq!(session.tick_count(), tick);
    }

    #[test]
    fn test_falling_bird_eventually_hits_ground() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        let mut rng = rng();
        let mut collisions = 0;
        for _ in 0..200 {
            collisions += session
                .tick(&mut rng)
                .iter()
                .filter(|e| **e == GameEvent::Collision)
                .count();
        }
        assert!(session.is_game_over());
        assert_eq!(collisions, 1);
    }

    #[test]
    fn test_boost_makes_bird_invulnerable() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.tick = 1;
        session.boost.activate();
        session.bird.y = 330.0;
        session.pipes.push(PipeSlot::new(Pipe::new(85.0, 300.0)));
        let mut rng = rng();

        for _ in 0..5 {
            session.tick(&mut rng);
            assert!(!session.is_game_over());
        }
        // Deep below the ground line as well
        session.bird.y = GROUND_Y + 100.0;
        session.tick(&mut rng);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_boost_expiry_restores_collisions() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.tick = 1;
        session.boost.activate();
        let mut rng = rng();
        let mut ticks = 0;
        while !session.is_game_over() {
            session.tick(&mut rng);
            assert_eq!(session.boost.is_active(), session.boost.remaining() > 0);
            ticks += 1;
            assert!(ticks <= BOOST_DURATION_TICKS, "boost never expired");
        }
        // The bird had long since fallen through the ground; death comes on expiry
        assert_eq!(ticks, BOOST_DURATION_TICKS);
        assert!(!session.boost.is_active());
    }

    #[test]
    fn test_boost_pickup_emits_event_and_activates() {
        let mut session = Session::with_spawner(0, quiet_spawner());
        session.tick = 1;
        // One scroll later these overlap the bird
        let (x, y) = (session.bird.x + 5.0, session.bird.y);
        session.boosts.push(Boost::new(x, y));
        session.boosts.push(Boost::new(x + 10.0, y));
        let events = session.tick(&mut rng());

        assert!(session.boosts.is_empty());
        assert_eq!(events, vec![GameEvent::BoostAcquired, GameEvent::BoostAcquired]);
        assert!(session.boost.is_active());
        // Activated to full duration, then decayed once this tick
        assert_eq!(session.boost.remaining(), BOOST_DURATION_TICKS - 1);
    }

    #[test]
    fn test_reset_restores_initial_values_but_keeps_high_score() {
        let mut session = Session::new(2);
        let mut rng = rng();
        session.score = 9;
        session.tick(&mut rng);
        session.bird.y = GROUND_Y;
        session.tick(&mut rng);
        assert!(session.is_game_over());
        assert_eq!(session.high_score(), 9);

        session.apply(Command::Reset);

        let fresh = Session::new(9);
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.tick_count(), 0);
        assert_eq!(session.bird, fresh.bird);
        assert!(session.pipes.is_empty());
        assert!(session.boosts.is_empty());
        assert!(!session.boost.is_active());
        assert_eq!(session.high_score(), 9);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut session = Session::new(5);
        let mut rng = rng();
        let mut best = 0;

        for round in 0..5 {
            let mut previous_score = 0;
            for _ in 0..3_000 {
                if session.is_game_over() {
                    break;
                }
                hover(&mut session);
                session.tick(&mut rng);
                assert!(session.score() >= previous_score);
                assert_eq!(session.boost.is_active(), session.boost.remaining() > 0);
                // Pipes only move left, so a passed flag can never fall back to false
                let bird_x = session.bird.x;
                for slot in &session.pipes {
                    assert_eq!(slot.passed, slot.pipe.right() < bird_x);
                }
                previous_score = session.score();
            }
            if !session.is_game_over() {
                session.boost = BoostTimer::default();
                session.bird.y = GROUND_Y;
                session.tick(&mut rng);
            }
            assert!(session.is_game_over());
            best = best.max(session.score());
            assert_eq!(session.high_score(), best.max(5), "round {}", round);
            session.apply(Command::Reset);
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut session = Session::with_spawner(11, quiet_spawner());
        session.score = 3;
        session.boost.activate();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 3);
        assert_eq!(snapshot.high_score, 11);
        assert_eq!(snapshot.boost_seconds_left, Some(5));
        assert!(!snapshot.game_over);

        session.boost = BoostTimer::default();
        assert_eq!(session.snapshot().boost_seconds_left, None);
    }

    #[test]
    fn test_sound_cues() {
        assert_eq!(GameEvent::PointScored.sound_cue(), Some(SoundCue::Point));
        assert_eq!(GameEvent::BoostAcquired.sound_cue(), Some(SoundCue::Boost));
        assert_eq!(GameEvent::Collision.sound_cue(), Some(SoundCue::Hit));
        assert_eq!(GameEvent::HighScoreBeaten(3).sound_cue(), None);
    }
}
