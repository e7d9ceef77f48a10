//! Error type shared by the shop authorities.

use patron_core::ShelfId;
use thiserror::Error;

/// Errors from catalog loading and inventory management.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A catalog record could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(String),

    /// Underlying I/O failure while reading a catalog file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A product name that the catalog does not contain.
    #[error("unknown product {0:?}")]
    UnknownProduct(String),

    /// Attempted to stock a shelf that already holds an item.
    #[error("shelf {0} is already stocked")]
    ShelfOccupied(ShelfId),

    /// A shelf id that the inventory does not contain.
    #[error("no such shelf {0}")]
    NoSuchShelf(ShelfId),
}

/// Convenience alias used throughout the crate.
pub type ShopResult<T> = Result<T, ShopError>;
