//! Navigation-subsystem error type.

use thiserror::Error;

use patron_core::Point3;

/// Errors produced by `patron-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Point3, to: Point3 },

    #[error("point {0} is not on the walkable surface")]
    OffSurface(Point3),

    #[error("surface has no walkable cells")]
    EmptySurface,
}

pub type NavResult<T> = Result<T, NavError>;
