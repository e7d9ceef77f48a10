//! The store context handed to every customer tick.

use patron_core::{SimClock, Tick};
use patron_nav::NavSurface;
use patron_shop::{Checkouts, FloorPlan, Inventory, StoreStatus};

use crate::config::BehaviorConfig;

/// Everything a customer may touch during one tick, passed explicitly.
///
/// There are no globals anywhere in the lifecycle code: the orchestrator
/// assembles a `StoreContext` from its own fields once per customer per
/// tick, which is also what makes behaviors trivially testable — a test
/// builds a context from local values and ticks a customer by hand.
///
/// Shared state is split by mutability: the clock, surface, floor plan
/// and status are read-only views, while the inventory and checkout desks
/// are the two authorities customers negotiate with.
pub struct StoreContext<'a, S: NavSurface> {
    pub clock: &'a SimClock,
    pub surface: &'a S,
    pub floor: &'a FloorPlan,
    pub status: &'a StoreStatus,
    pub behavior: &'a BehaviorConfig,
    pub inventory: &'a mut Inventory,
    pub checkouts: &'a mut Checkouts,
}

impl<'a, S: NavSurface> StoreContext<'a, S> {
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    /// Tick count for a simulated duration, at this run's resolution.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        self.clock.ticks_for_secs(secs)
    }
}
