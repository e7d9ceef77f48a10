use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// A configured floor-plan point has no walkable surface within the
    /// movement sample radius. Caught at build time so a mis-placed spawn
    /// or exit fails loudly instead of stranding every customer at tick 0.
    #[error("{what} does not reach the walkable surface")]
    OffSurface { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
