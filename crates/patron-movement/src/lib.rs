//! `patron-movement` — how a customer actually gets anywhere.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`coordinator`] | `MovementCoordinator`, `MovementStatus`                 |
//! | [`stuck`]       | `StuckMonitor` — low-displacement detection             |
//! | [`config`]      | `MovementConfig`                                        |
//!
//! # Movement model (continuous stepping)
//!
//! One coordinator owns one actor's destination and walks it there:
//!
//! 1. `set_destination` samples the request onto the surface (the
//!    *effective* destination) and computes a path.  It refuses — returns
//!    `false` — only when no walkable point exists near the request.
//! 2. Each `tick` advances the position `speed × dt` metres along the
//!    waypoint polyline.
//! 3. Arrival is a dual check: remaining path distance within the stopping
//!    distance, *or* straight-line distance to the effective destination
//!    within the (larger) arrive radius.  Whichever fires first wins.
//! 4. A goal that accepts no path, or progress that stalls (the
//!    [`StuckMonitor`]), runs a graduated recovery ladder: up to
//!    `offset_attempts` randomized nearby goals, then a delayed full retry
//!    of the original destination, and after `max_retries` failed retries a
//!    single permanent `Failed` status.  The coordinator never spins
//!    forever and never fails without exhausting the ladder.
//!
//! All waiting (stuck dwell, retry delay) is counted in ticks, so a paused
//! host loop cannot expire a timer.

pub mod config;
pub mod coordinator;
pub mod stuck;


pub use config::MovementConfig;
pub use coordinator::{MovementCoordinator, MovementStatus};
pub use stuck::StuckMonitor;
