//! The `Sim` struct and its day loop.

use std::collections::BTreeMap;

use patron_core::{CustomerId, Money, SimClock, SimRng, Tick};
use patron_customer::{Customer, CustomerEvent, LeaveReason, StoreContext, TickOutcome};
use patron_nav::NavSurface;
use patron_shop::{Checkouts, FloorPlan, Inventory, StoreStatus};

use crate::{SimConfig, SimObserver};

// ── DaySummary ────────────────────────────────────────────────────────────────

/// Bookkeeping for one shop day, updated as events are emitted.
///
/// `served + left_empty + timeouts + stranded == spawned` once the run
/// ends normally; a hard stop (see [`SimConfig::max_ticks`]) can leave
/// the difference still on the floor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DaySummary {
    /// Customers who came through the door.
    pub spawned: u32,
    /// Departures that paid for at least a transaction (degraded no-desk
    /// sales included).
    pub served: u32,
    /// Departures with nothing bought: empty-handed and closed-out alike.
    pub left_empty: u32,
    /// Departures after abandoning a stalled till.
    pub timeouts: u32,
    /// Customers removed in place because the exit was unreachable.
    pub stranded: u32,
    /// Money through the tills (plus degraded-mode sales).
    pub revenue: Money,
    pub items_sold: u32,
    /// The tick the run stopped on.
    pub final_tick: Tick,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The day-loop orchestrator.
///
/// `Sim<S>` owns the whole shop — clock, surface, floor plan, inventory,
/// desks, status and every customer — and drives the tick pipeline:
///
/// 1. **Store hours**: flip `closing_soon` / `closed` latches from the
///    configured opening span.
/// 2. **Arrivals**: spawn due customers (open, not closing, floor below
///    the concurrency cap), with personality and budget drawn at the door.
/// 3. **Customers**: tick every customer in ascending id order, buffering
///    their events. Correctness never depends on this relative order; the
///    fixed order makes runs reproducible.
/// 4. **Desks**: advance every checkout desk by one tick.
/// 5. **Despawns**: remove departed customers; release a stranded
///    customer's claims and queue slot before removal.
/// 6. **Observer**: forward the tick's events and a summary heartbeat.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: NavSurface> {
    /// Global configuration. Read-only after the builder.
    pub config: SimConfig,

    /// The simulation clock; advanced once per [`Sim::tick`].
    pub clock: SimClock,

    /// The walkable surface every destination is sampled against.
    pub surface: S,

    /// Spawn, optional entry waypoint, exit.
    pub floor: FloorPlan,

    /// Open / closing-soon / closed latches, flipped by phase 1.
    pub status: StoreStatus,

    /// Shelf stock and claims.
    pub inventory: Inventory,

    /// Checkout desks and their queues.
    pub checkouts: Checkouts,

    /// Everyone currently on the floor. `BTreeMap` gives the ascending-id
    /// tick order.
    pub customers: BTreeMap<CustomerId, Customer>,

    /// Orchestrator-level RNG: arrival gaps, budgets, personalities.
    /// Customer decisions use per-customer streams instead, so arrival
    /// order never disturbs them.
    pub rng: SimRng,

    pub(crate) close_at: Tick,
    pub(crate) warn_at: Tick,
    pub(crate) next_customer: u32,
    pub(crate) next_spawn_at: Tick,
    pub(crate) summary: DaySummary,
    /// Per-tick event buffer, reused between ticks.
    pub(crate) events: Vec<CustomerEvent>,
}

impl<S: NavSurface> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the store is closed and the floor is empty, bounded by
    /// `config.max_ticks`. Returns the day's summary; the same summary
    /// stays available through [`Sim::summary`] afterwards.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> DaySummary {
        loop {
            if !self.status.is_open() && self.customers.is_empty() {
                break;
            }
            if self.clock.now().0 >= self.config.max_ticks {
                self.hard_stop();
                break;
            }
            self.tick(observer);
        }
        self.summary.final_tick = self.clock.now();
        observer.on_sim_end(self.summary.final_tick, &self.summary);
        self.summary.clone()
    }

    /// One pass of the six-phase pipeline. Exposed for incremental
    /// stepping in tests and embedders; [`Sim::run`] is this in a loop.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.now();
        observer.on_tick_start(now);
        self.events.clear();

        // ── Phase 1: store hours ──────────────────────────────────────────
        if now >= self.close_at {
            self.status.close();
        } else if now >= self.warn_at {
            self.status.announce_closing();
        }

        // ── Phase 2: arrivals ─────────────────────────────────────────────
        self.spawn_arrivals(now);

        // ── Phase 3: tick customers, ascending id ─────────────────────────
        let mut finished: Vec<(CustomerId, TickOutcome)> = Vec::new();
        for (&id, customer) in self.customers.iter_mut() {
            let mut ctx = StoreContext {
                clock: &self.clock,
                surface: &self.surface,
                floor: &self.floor,
                status: &self.status,
                behavior: &self.config.behavior,
                inventory: &mut self.inventory,
                checkouts: &mut self.checkouts,
            };
            let outcome = customer.tick(&mut ctx, &mut self.events);
            if outcome != TickOutcome::Active {
                finished.push((id, outcome));
            }
        }

        // ── Phase 4: desks ────────────────────────────────────────────────
        self.checkouts.service_all(now);

        // ── Phase 5: despawns ─────────────────────────────────────────────
        for (id, outcome) in finished {
            if let Some(mut customer) = self.customers.remove(&id) {
                if outcome == TickOutcome::Stranded {
                    customer.release_resources(&mut self.inventory, &mut self.checkouts);
                }
            }
        }

        // ── Phase 6: bookkeeping + observer ───────────────────────────────
        self.absorb_events();
        for event in &self.events {
            observer.on_event(now, event);
        }
        observer.on_tick_end(now, self.customers.len());

        self.clock.advance();
    }

    /// The running (or, after [`Sim::run`], final) day summary.
    #[inline]
    pub fn summary(&self) -> &DaySummary {
        &self.summary
    }

    /// One debug line per customer on the floor, in id order.
    pub fn status_lines(&self) -> Vec<String> {
        self.customers.values().map(Customer::status_line).collect()
    }

    // ── Arrivals ──────────────────────────────────────────────────────────

    fn spawn_arrivals(&mut self, now: Tick) {
        if !self.status.is_open() || self.status.is_closing_soon() {
            return;
        }
        while now >= self.next_spawn_at
            && self.customers.len() < self.config.spawn.max_concurrent
        {
            let personality = self.config.spawn.personality.sample(&mut self.rng);
            let (lo, hi) = self.config.spawn.budget_cents;
            let budget = Money(self.rng.gen_range(lo..=hi));

            let id = CustomerId(self.next_customer);
            self.next_customer += 1;
            let customer = Customer::new(
                id,
                personality,
                budget,
                self.config.seed,
                &self.config.movement,
                self.floor.spawn,
                now,
            );
            self.customers.insert(id, customer);
            self.summary.spawned += 1;

            // Next arrival: mean interval with ±50% jitter.
            let jitter: f32 = self.rng.gen_range(0.5..1.5);
            let gap = self
                .clock
                .ticks_for_secs(self.config.spawn.arrival_interval_secs * jitter);
            self.next_spawn_at = now.offset(gap);
        }
    }

    // ── Bookkeeping ───────────────────────────────────────────────────────

    /// Fold this tick's events into the running summary.
    ///
    /// Revenue is counted at the transaction (`Purchased` /
    /// `CheckoutSkipped`), not at departure: a customer who pays and then
    /// gets stuck on the way out still paid.
    fn absorb_events(&mut self) {
        for event in &self.events {
            match event {
                CustomerEvent::Purchased { receipt, .. } => {
                    self.summary.revenue += receipt.total;
                    self.summary.items_sold += receipt.item_count();
                }
                CustomerEvent::CheckoutSkipped { total, items, .. } => {
                    self.summary.revenue += *total;
                    self.summary.items_sold += *items;
                }
                CustomerEvent::Departed { reason, .. } => match reason {
                    LeaveReason::Purchased => self.summary.served += 1,
                    LeaveReason::EmptyHanded | LeaveReason::StoreClosing => {
                        self.summary.left_empty += 1
                    }
                    LeaveReason::CheckoutTimeout => self.summary.timeouts += 1,
                },
                CustomerEvent::Stranded { .. } => self.summary.stranded += 1,
                _ => {}
            }
        }
    }

    /// Evict everyone still inside at the max-tick stop, releasing their
    /// claims and queue slots so nothing in the shop refers to a removed
    /// customer.
    fn hard_stop(&mut self) {
        let customers = std::mem::take(&mut self.customers);
        for (_, mut customer) in customers {
            customer.release_resources(&mut self.inventory, &mut self.checkouts);
        }
    }
}
