//! Customer lifecycle: Entering → Shopping → Purchasing → Leaving.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | `customer`    | [`Customer`], [`TickOutcome`] — the state machine          |
//! | `state`       | [`Phase`], [`can_transition`] — the transition table       |
//! | `shopping`    | Browse loop: shelf choice, dwell, budget, atomic claims   |
//! | `purchasing`  | Checkout: queue, staging, bounded completion wait         |
//! | `context`     | [`StoreContext`] — per-tick dependency injection           |
//! | `cart`        | [`Cart`] — claimed items under a budget invariant          |
//! | `personality` | [`Personality`], [`PersonalityRanges`]                    |
//! | `config`      | [`BehaviorConfig`]                                        |
//! | `events`      | [`CustomerEvent`], [`LeaveReason`]                        |
//!
//! # Design
//!
//! Each customer is advanced by explicit [`Customer::tick`] calls — there
//! are no threads, callbacks or timers. Waits (shelf dwell, retry delays,
//! checkout patience) are tick-counted checkpoints, so pausing the host
//! loop never expires anything. The orchestrator may tick customers in
//! any relative order: the only cross-customer couplings are the
//! inventory's atomic claims and the desks' FIFO queues, both of which
//! are order-safe by construction.
//!
//! Movement failure is survivable everywhere except the exit walk:
//! blocked on the way in, the customer shops from where they stand;
//! blocked on the way to a shelf, the shelf is skipped; blocked on the
//! way to a till, the items go back; blocked on the way *out*, the
//! customer is reported stranded and removed by the orchestrator.

mod cart;
mod config;
mod context;
mod customer;
mod events;
mod personality;
mod purchasing;
mod shopping;
mod state;

#[cfg(test)]
mod tests;

pub use cart::Cart;
pub use config::BehaviorConfig;
pub use context::StoreContext;
pub use customer::{Customer, TickOutcome};
pub use events::{CustomerEvent, LeaveReason};
pub use personality::{Personality, PersonalityRanges};
pub use state::{can_transition, Phase};
