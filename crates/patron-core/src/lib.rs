//! `patron-core` — foundational types for the `patron` shop simulator.
//!
//! This crate is a dependency of every other `patron-*` crate.  It
//! intentionally has no `patron-*` dependencies and minimal external ones
//! (only `rand`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `CustomerId`, `ShelfId`, `ItemId`, `ProductId`, `DeskId`  |
//! | [`money`]  | `Money` — integer cents, no float currency anywhere       |
//! | [`point`]  | `Point3`, planar (walkable-surface) distance helpers      |
//! | [`time`]   | `Tick`, `SimClock`                                        |
//! | [`rng`]    | `CustomerRng` (per-customer), `SimRng` (orchestrator)     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.          |

pub mod ids;
pub mod money;
pub mod point;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{CustomerId, DeskId, ItemId, ProductId, ShelfId};
pub use money::Money;
pub use point::Point3;
pub use rng::{CustomerRng, SimRng};
pub use time::{SimClock, Tick};
