//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use patron_core::{Point3, SimClock, SimRng, Tick};
use patron_nav::NavSurface;
use patron_shop::{Checkouts, FloorPlan, Inventory, StoreStatus};

use crate::{DaySummary, Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick resolution, seed, store hours, spawn/behavior
///   tuning
/// - `S: NavSurface` — the walkable surface (e.g.
///   [`patron_nav::GridSurface`])
/// - [`FloorPlan`] — spawn, optional entry waypoint, exit
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                              |
/// |------------------|--------------------------------------|
/// | `.inventory(i)`  | Empty shop floor, nothing stocked    |
/// | `.desks(v)`      | No desks (degraded checkout mode)    |
///
/// # Example
///
/// ```rust,ignore
/// let (surface, markers) = GridSurface::parse(FLOOR, 1.0)?;
/// let floor = FloorPlan::new(markers.one('E').unwrap(), markers.one('X').unwrap());
/// let mut sim = SimBuilder::new(SimConfig::default(), surface, floor)
///     .inventory(inventory)
///     .desks(markers.all('K').to_vec())
///     .build()?;
/// let summary = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<S: NavSurface> {
    config: SimConfig,
    surface: S,
    floor: FloorPlan,
    inventory: Option<Inventory>,
    desks: Vec<Point3>,
}

impl<S: NavSurface> SimBuilder<S> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, surface: S, floor: FloorPlan) -> Self {
        SimBuilder { config, surface, floor, inventory: None, desks: Vec::new() }
    }

    /// Supply the stocked (or empty) shelf inventory.
    ///
    /// If not called, the shop has no shelves at all: every customer
    /// finds nothing to browse and leaves empty-handed.
    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Supply checkout desk positions; each gets `config.service` as its
    /// rate. No desks is valid — sales then complete in degraded mode.
    pub fn desks(mut self, positions: Vec<Point3>) -> Self {
        self.desks = positions;
        self
    }

    /// Validate the configuration and floor plan and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<S>> {
        let config = self.config;

        // ── Validate configuration ────────────────────────────────────────
        if !(config.seconds_per_tick > 0.0) || !config.seconds_per_tick.is_finite() {
            return Err(SimError::Config(format!(
                "seconds_per_tick must be positive and finite, got {}",
                config.seconds_per_tick
            )));
        }
        if !(config.open_secs > 0.0) || !config.open_secs.is_finite() {
            return Err(SimError::Config(format!(
                "open_secs must be positive and finite, got {}",
                config.open_secs
            )));
        }
        if !(config.closing_warning_secs >= 0.0)
            || config.closing_warning_secs > config.open_secs
        {
            return Err(SimError::Config(format!(
                "closing_warning_secs must lie within the opening span, got {}",
                config.closing_warning_secs
            )));
        }
        if config.max_ticks == 0 {
            return Err(SimError::Config("max_ticks must be nonzero".into()));
        }
        if !(config.movement.speed > 0.0) {
            return Err(SimError::Config(format!(
                "walk speed must be positive, got {}",
                config.movement.speed
            )));
        }
        if !(config.spawn.arrival_interval_secs > 0.0) {
            return Err(SimError::Config(format!(
                "arrival interval must be positive, got {}",
                config.spawn.arrival_interval_secs
            )));
        }
        let (lo, hi) = config.spawn.budget_cents;
        if lo > hi {
            return Err(SimError::Config(format!("budget range inverted: {lo}..={hi}")));
        }
        if config.behavior.items_target_min > config.behavior.items_target_max {
            return Err(SimError::Config(format!(
                "items target range inverted: {}..={}",
                config.behavior.items_target_min, config.behavior.items_target_max
            )));
        }
        let p = &config.spawn.personality;
        for (name, lo, hi) in [
            ("speed", p.speed.0 as f64, p.speed.1 as f64),
            ("browse", p.browse.0 as f64, p.browse.1 as f64),
            ("buy", p.buy.0, p.buy.1),
            ("patience", p.patience.0 as f64, p.patience.1 as f64),
        ] {
            if lo > hi {
                return Err(SimError::Config(format!(
                    "personality {name} range inverted: {lo}..={hi}"
                )));
            }
        }

        // ── Validate the floor plan against the surface ───────────────────
        //
        // Desk and shelf positions are deliberately not checked here: an
        // unreachable desk or shelf has defined in-run behavior (items
        // returned, shelf skipped), while a bad spawn or exit would break
        // every single customer.
        let radius = config.movement.sample_radius;
        if self.surface.sample(self.floor.spawn, radius).is_none() {
            return Err(SimError::OffSurface { what: "spawn point" });
        }
        if self.surface.sample(self.floor.exit, radius).is_none() {
            return Err(SimError::OffSurface { what: "exit point" });
        }
        if let Some(waypoint) = self.floor.entry_waypoint {
            if self.surface.sample(waypoint, radius).is_none() {
                return Err(SimError::OffSurface { what: "entry waypoint" });
            }
        }

        // ── Assemble ──────────────────────────────────────────────────────
        let mut checkouts = Checkouts::new();
        for position in self.desks {
            checkouts.add_desk(position, config.service);
        }

        let clock = SimClock::new(config.seconds_per_tick);
        let close_at = Tick(clock.ticks_for_secs(config.open_secs));
        let warn_at =
            Tick(close_at.0.saturating_sub(clock.ticks_for_secs(config.closing_warning_secs)));
        let rng = SimRng::new(config.seed);

        Ok(Sim {
            clock,
            surface: self.surface,
            floor: self.floor,
            status: StoreStatus::open(),
            inventory: self.inventory.unwrap_or_else(Inventory::new),
            checkouts,
            customers: BTreeMap::new(),
            rng,
            close_at,
            warn_at,
            next_customer: 0,
            next_spawn_at: Tick::ZERO,
            summary: DaySummary::default(),
            events: Vec::new(),
            config,
        })
    }
}
