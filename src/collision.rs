//! Bird-versus-world checks: pass-through scoring, boost pickup, pipe and
//! ground collisions, and the invulnerability timer.

use crate::constants::*;
use crate::entities::{Bird, Boost, PipeSlot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionKind {
    Pipe,
    Ground,
}

/// Invulnerability countdown. Active exactly while ticks remain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoostTimer {
    remaining: u32,
}

impl BoostTimer {
    /// Restarts the full duration. Pickups do not stack.
    pub fn activate(&mut self) {
        self.remaining = BOOST_DURATION_TICKS;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn seconds_left(&self) -> u32 {
        self.remaining / TICKS_PER_SECOND as u32
    }
}

/// Marks every pipe the bird has fully cleared and returns how many were
/// newly passed. Already passed pipes never count again.
pub fn score_passed_pipes(bird: &Bird, pipes: &mut [PipeSlot]) -> u32 {
    let mut points = 0;
    for slot in pipes.iter_mut().filter(|slot| !slot.passed) {
        if slot.pipe.right() < bird.x {
            slot.passed = true;
            points += 1;
        }
    }
    points
}

/// Removes every boost overlapping the bird and returns how many were taken.
pub fn collect_boosts(bird: &Bird, boosts: &mut Vec<Boost>) -> usize {
    let bird_box = bird.bounds();
    let hits: Vec<usize> = boosts
        .iter()
        .enumerate()
        .filter(|(_, boost)| bird_box.intersects(&boost.bounds()))
        .map(|(index, _)| index)
        .collect();
    if hits.is_empty() {
        return 0;
    }
    let mut index = 0;
    boosts.retain(|_| {
        let keep = !hits.contains(&index);
        index += 1;
        keep
    });
    hits.len()
}

/// Pipe hits are reported before ground contact.
pub fn detect_collision(bird: &Bird, pipes: &[PipeSlot]) -> Option<CollisionKind> {
    let bird_box = bird.bounds();
    let hit_pipe = pipes.iter().any(|slot| {
        bird_box.intersects(&slot.pipe.lower_bounds()) || bird_box.intersects(&slot.pipe.upper_bounds())
    });
    if hit_pipe {
        Some(CollisionKind::Pipe)
    } else if bird.touches_ground() {
        Some(CollisionKind::Ground)
    } else {
        None
    }
}
