//! Pipe and boost spawning, scrolling and culling.

use crate::constants::*;
use crate::entities::{Boost, Pipe, PipeSlot};
use rand::Rng;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawner {
    pub interval: u64,
    pub boost_chance: f64,
}

impl Default for Spawner {
    fn default() -> Self {
        Spawner { interval: PIPE_SPAWN_INTERVAL, boost_chance: BOOST_SPAWN_CHANCE }
    }
}

impl Spawner {
    /// Spawn check for one tick: a pipe every `interval` ticks (tick 0 included),
    /// then one boost attempt relative to the newest pipe.
    pub fn spawn(&self, tick: u64, pipes: &mut Vec<PipeSlot>, boosts: &mut Vec<Boost>, rng: &mut impl Rng) {
        if tick % self.interval != 0 {
            return;
        }
        let pipe = Pipe::random(PIPE_SPAWN_X, rng);
        info!("Pipe spawned at tick {}: height {}", tick, pipe.height);
        pipes.push(PipeSlot::new(pipe));

        if rng.gen_bool(self.boost_chance) {
            if let Some(boost) = boost_near(pipes.last().map(|slot| &slot.pipe), rng) {
                info!("Boost spawned at x: {}, y: {}", boost.x, boost.y);
                boosts.push(boost);
            }
        }
    }
}

/// Places a boost just past `last_pipe`, above its lower segment. Nothing is
/// placed without a pipe or when the vertical range is empty.
pub fn boost_near(last_pipe: Option<&Pipe>, rng: &mut impl Rng) -> Option<Boost> {
    let pipe = last_pipe?;
    let max_y = pipe.y as i32 - BOOST_TOP_MARGIN;
    if max_y < BOOST_MIN_Y {
        return None;
    }
    let x = pipe.x + pipe.height + BOOST_X_OFFSET;
    let y = rng.gen_range(BOOST_MIN_Y..=max_y);
    Some(Boost::new(x, y as f64))
}

/// Scrolls everything left by one tick and drops what has left the screen.
pub fn advance(pipes: &mut Vec<PipeSlot>, boosts: &mut Vec<Boost>) {
    pipes.retain_mut(|slot| {
        slot.pipe.update();
        !slot.pipe.off_screen()
    });
    boosts.retain_mut(|boost| {
        boost.update();
        !boost.off_screen()
    });
}
