//! `patron-sim` — day-loop orchestrator for the patron shop simulator.
//!
//! # Six-phase tick loop
//!
//! ```text
//! while store open or customers present:
//!   ① Hours    — latch ClosingSoon at warn_at, Closed at close_at.
//!   ② Arrivals — spawn customers while open, below the concurrency
//!                cap and the arrival timer is due (mean interval with
//!                ±50% jitter; a cap-blocked arrival retries next tick).
//!   ③ Customers— tick each customer in ascending CustomerId order,
//!                collecting finished ones for despawn.
//!   ④ Service  — advance every checkout desk by one tick.
//!   ⑤ Despawn  — remove finished customers; stranded ones get their
//!                claims and queue slots force-released.
//!   ⑥ Absorb   — fold customer events into the DaySummary and hand
//!                them to the observer.
//! ```
//!
//! # Cargo features
//!
//! | Feature | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Serialize/Deserialize on [`SimConfig`] and [`DaySummary`]. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use patron_nav::GridSurface;
//! use patron_shop::{FloorPlan, Inventory};
//! use patron_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let (surface, markers) = GridSurface::parse(FLOOR_ART, 1.0)?;
//! let floor = FloorPlan::new(markers.one('E').unwrap(), markers.one('X').unwrap());
//! let mut sim = SimBuilder::new(SimConfig::default(), surface, floor)
//!     .inventory(inventory)
//!     .desks(markers.all('K').to_vec())
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver);
//! println!("served {} of {}", summary.served, summary.spawned);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{SimConfig, SpawnConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{DaySummary, Sim};
