//! Observer seam for progress reporting and data collection.

use patron_core::Tick;
use patron_customer::CustomerEvent;

use crate::DaySummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about. Events arrive in emission order:
/// customers are ticked in ascending id, so one customer's events for a
/// tick are contiguous.
///
/// # Example — departure printer
///
/// ```rust,ignore
/// struct DeparturePrinter;
///
/// impl SimObserver for DeparturePrinter {
///     fn on_event(&mut self, tick: Tick, event: &CustomerEvent) {
///         if let CustomerEvent::Departed { customer, reason, spent, .. } = event {
///             println!("{tick}: {customer} left ({reason}), spent {spent}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per customer event emitted this tick.
    fn on_event(&mut self, _tick: Tick, _event: &CustomerEvent) {}

    /// Called at the end of each tick. `active` is the number of
    /// customers still on the floor after despawns.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// Called once after the run ends, with the finished summary.
    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &DaySummary) {}
}

/// A [`SimObserver`] that does nothing. Use when you need to call `run`
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
