//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; `SimClock` holds the
//! tick-to-seconds mapping.  Deliberately there is *no* wall-clock anchor:
//! every duration in the simulator — browse timers, checkout timeouts,
//! retry delays — is counted in ticks, so pausing the host loop (or
//! stepping it in a debugger) can never expire a timeout.  Elapsed time is
//! derived, never measured.
//!
//! The default is 10 ticks per simulated second (0.1 s per tick), fine
//! enough that a customer walking 1.3 m/s moves in smooth 13 cm steps.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 10 ticks per second a u64 lasts ~58 billion years of
/// shop time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// Cheap to copy; holds no heap data and no wall-clock state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 0.1.
    pub seconds_per_tick: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(seconds_per_tick: f32) -> Self {
        Self { seconds_per_tick, current: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current = Tick(self.current.0 + 1);
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.current
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.current.0 as f32 * self.seconds_per_tick
    }

    /// How many ticks span `secs` simulated seconds?  Rounds up, and never
    /// returns 0 for a positive duration — a timer set "for 0.01 s" still
    /// waits one whole tick.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        ((secs / self.seconds_per_tick).ceil() as u64).max(1)
    }

    /// Break elapsed time into (minutes, seconds) from sim start.  Useful
    /// for human-readable status lines without a datetime library.
    pub fn elapsed_ms(&self) -> (u64, u32) {
        let total = self.elapsed_secs().max(0.0) as u64;
        (total / 60, (total % 60) as u32)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        SimClock::new(0.1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({:02}:{:02})", self.current, m, s)
    }
}
