//! Low-displacement ("stuck") detection.

use patron_core::{Point3, Tick};

/// Watches an actor's per-tick positions for a window of near-zero net
/// displacement.
///
/// The monitor keeps an anchor: the last position that differed from its
/// predecessor by more than `epsilon`.  Real progress re-anchors; an actor
/// that jitters in place keeps the old anchor, and once the anchor is
/// `dwell_ticks` old the actor is declared stuck.  O(1) state, no ring
/// buffer.
#[derive(Debug, Clone)]
pub struct StuckMonitor {
    anchor: Point3,
    anchor_tick: Tick,
    epsilon: f32,
}

impl StuckMonitor {
    pub fn new(at: Point3, now: Tick, epsilon: f32) -> Self {
        Self { anchor: at, anchor_tick: now, epsilon }
    }

    /// Restart the window, e.g. after a new destination or a recovery.
    pub fn reset(&mut self, at: Point3, now: Tick) {
        self.anchor = at;
        self.anchor_tick = now;
    }

    /// Feed one tick's position.  Returns `true` when the actor has gone
    /// `dwell_ticks` without net displacement above epsilon.
    pub fn observe(&mut self, pos: Point3, now: Tick, dwell_ticks: u64) -> bool {
        if pos.planar_distance(self.anchor) > self.epsilon {
            self.reset(pos, now);
            return false;
        }
        now.since(self.anchor_tick) >= dwell_ticks
    }

    /// Ticks since the last real displacement.
    pub fn dwell(&self, now: Tick) -> u64 {
        now.since(self.anchor_tick)
    }
}
