//! Shop-side authorities for the patron simulator.
//!
//! Everything a customer negotiates with while inside the shop lives
//! here, behind narrow mutating APIs:
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | `product`   | [`Product`], [`ProductKind`], the immutable [`Catalog`]   |
//! | `loader`    | Catalog CSV loading                                       |
//! | `shelf`     | [`ShelfSlot`], [`StockedItem`], [`ClaimedItem`]           |
//! | `inventory` | [`Inventory`] — stock, atomic claims, the returns bin     |
//! | `checkout`  | [`CheckoutDesk`] FIFO queues, [`Receipt`], [`Checkouts`]  |
//! | `store`     | [`StoreStatus`] open/closing flags, [`FloorPlan`]         |
//!
//! Two concurrency-shaped guarantees matter even though the simulation is
//! single-threaded: item claims are atomic (claim-or-`None`, never a
//! reserved limbo), and checkout queues are strict FIFO with positions
//! customers poll rather than callbacks. Both hold under any interleaving
//! of per-customer ticks.

mod checkout;
mod error;
mod inventory;
mod loader;
mod product;
mod shelf;
mod store;

#[cfg(test)]
mod tests;

pub use checkout::{CheckoutDesk, Checkouts, Receipt, ServiceRate};
pub use error::{ShopError, ShopResult};
pub use inventory::Inventory;
pub use loader::{load_catalog_csv, load_catalog_reader};
pub use product::{Catalog, Product, ProductKind};
pub use shelf::{ClaimedItem, ShelfSlot, StockedItem};
pub use store::{FloorPlan, StoreStatus};
