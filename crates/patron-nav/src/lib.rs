//! `patron-nav` — the walkable surface under every customer's feet.
//!
//! Movement code never talks to a concrete floor representation; it goes
//! through the [`NavSurface`] trait (nearest-point sampling, pathfinding,
//! walkability queries).  The default implementation is [`GridSurface`], a
//! uniform walkable-cell grid with A* pathfinding and an R-tree for
//! nearest-walkable-point lookups.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`surface`] | `NavSurface` trait                                        |
//! | [`path`]    | `NavPath` — waypoint polyline                             |
//! | [`grid`]    | `GridSurface`, `GridSurfaceBuilder`, ASCII floor parser   |
//! | [`error`]   | `NavError`, `NavResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod path;
pub mod surface;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use grid::{FloorMarkers, GridSurface, GridSurfaceBuilder};
pub use path::NavPath;
pub use surface::NavSurface;
