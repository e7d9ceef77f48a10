//! Run-level configuration.

use patron_customer::{BehaviorConfig, PersonalityRanges};
use patron_movement::MovementConfig;
use patron_shop::ServiceRate;

/// Arrival-process knobs.
///
/// Arrivals are drawn one at a time: after each spawn the next arrival is
/// scheduled `interval × U(0.5, 1.5)` simulated seconds later. When the
/// floor is at `max_concurrent` the pending arrival waits at the door and
/// enters as soon as someone leaves.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnConfig {
    /// Mean seconds between arrivals.
    pub arrival_interval_secs: f32,

    /// Customers allowed on the floor at once.
    pub max_concurrent: usize,

    /// Inclusive budget range in cents, drawn uniformly per customer.
    pub budget_cents: (u32, u32),

    /// Per-customer personality sampling ranges.
    pub personality: PersonalityRanges,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            arrival_interval_secs: 20.0,
            max_concurrent: 12,
            budget_cents: (1_500, 12_000),
            personality: PersonalityRanges::default(),
        }
    }
}

/// Everything a run needs beyond the shop itself.
///
/// One value of this drives the whole day; the builder validates it once
/// and the orchestrator only reads it afterwards.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated seconds per tick.
    pub seconds_per_tick: f32,

    /// Master seed. The spawner derives its stream from this directly;
    /// each customer derives an independent stream from (seed, id).
    pub seed: u64,

    /// How long the doors stay open, simulated seconds from tick 0.
    pub open_secs: f32,

    /// How long before closing the "wrap it up" warning sounds. Zero
    /// means no warning period.
    pub closing_warning_secs: f32,

    /// Hard stop: the run never exceeds this many ticks even if customers
    /// are somehow still inside.
    pub max_ticks: u64,

    pub spawn: SpawnConfig,
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,

    /// Service rate for every desk registered through the builder.
    pub service: ServiceRate,
}

impl Default for SimConfig {
    /// A one-hour shop day at 10 ticks per simulated second, with enough
    /// tick headroom after closing for the floor to drain.
    fn default() -> Self {
        SimConfig {
            seconds_per_tick: 0.1,
            seed: 0,
            open_secs: 3_600.0,
            closing_warning_secs: 300.0,
            max_ticks: 50_000,
            spawn: SpawnConfig::default(),
            movement: MovementConfig::default(),
            behavior: BehaviorConfig::default(),
            service: ServiceRate::default(),
        }
    }
}
