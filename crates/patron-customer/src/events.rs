//! Outbound events — the only thing the lifecycle pushes to the world.

use std::fmt;

use patron_core::{CustomerId, DeskId, ItemId, Money, Point3, ProductId, ShelfId};
use patron_shop::Receipt;

use crate::state::Phase;

/// Why a customer headed for the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeaveReason {
    /// Paid and done.
    Purchased,
    /// Nothing bought; nothing owed.
    EmptyHanded,
    /// The shop closed around them before they could finish.
    StoreClosing,
    /// Gave up waiting at the till.
    CheckoutTimeout,
}

impl LeaveReason {
    pub fn name(self) -> &'static str {
        match self {
            LeaveReason::Purchased => "purchased",
            LeaveReason::EmptyHanded => "empty-handed",
            LeaveReason::StoreClosing => "store-closing",
            LeaveReason::CheckoutTimeout => "checkout-timeout",
        }
    }
}

impl fmt::Display for LeaveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One observable thing a customer did.
///
/// Events are appended to a per-tick buffer during [`crate::Customer::tick`]
/// and drained by the orchestrator, which forwards them to observers. They
/// are facts, not commands: nothing reacts to an event inside the
/// lifecycle itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerEvent {
    /// A lifecycle transition, in transition-table order.
    StateChanged { customer: CustomerId, from: Phase, to: Phase },

    /// An item came off a shelf into this customer's cart.
    ItemClaimed {
        customer: CustomerId,
        item: ItemId,
        product: ProductId,
        price: Money,
        shelf: ShelfId,
    },

    /// A checkout transaction completed.
    Purchased { customer: CustomerId, receipt: Receipt },

    /// The customer abandoned a till after waiting out their patience.
    CheckoutTimedOut { customer: CustomerId, desk: DeskId, waited_ticks: u64 },

    /// No checkout desk exists; the sale completed in degraded mode.
    CheckoutSkipped { customer: CustomerId, total: Money, items: u32 },

    /// A destination was given up after the full recovery ladder.
    MovementFailed { customer: CustomerId, to: Point3 },

    /// The customer reached the exit and despawned.
    Departed { customer: CustomerId, reason: LeaveReason, spent: Money, items: u32 },

    /// The customer could not reach the exit and was removed in place.
    Stranded { customer: CustomerId },
}

impl CustomerEvent {
    /// The customer this event belongs to.
    pub fn customer(&self) -> CustomerId {
        match *self {
            CustomerEvent::StateChanged { customer, .. }
            | CustomerEvent::ItemClaimed { customer, .. }
            | CustomerEvent::Purchased { customer, .. }
            | CustomerEvent::CheckoutTimedOut { customer, .. }
            | CustomerEvent::CheckoutSkipped { customer, .. }
            | CustomerEvent::MovementFailed { customer, .. }
            | CustomerEvent::Departed { customer, .. }
            | CustomerEvent::Stranded { customer } => customer,
        }
    }

    /// Stable snake_case tag, used as the event column in output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            CustomerEvent::StateChanged { .. } => "state_changed",
            CustomerEvent::ItemClaimed { .. } => "item_claimed",
            CustomerEvent::Purchased { .. } => "purchased",
            CustomerEvent::CheckoutTimedOut { .. } => "checkout_timed_out",
            CustomerEvent::CheckoutSkipped { .. } => "checkout_skipped",
            CustomerEvent::MovementFailed { .. } => "movement_failed",
            CustomerEvent::Departed { .. } => "departed",
            CustomerEvent::Stranded { .. } => "stranded",
        }
    }
}

impl fmt::Display for CustomerEvent {
    /// Human-readable detail, without the customer id (callers prepend it).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerEvent::StateChanged { from, to, .. } => write!(f, "{from} -> {to}"),
            CustomerEvent::ItemClaimed { item, product, price, shelf, .. } => {
                write!(f, "claimed {item} ({product}, {price}) from {shelf}")
            }
            CustomerEvent::Purchased { receipt, .. } => write!(
                f,
                "paid {} for {} item(s) at {}",
                receipt.total,
                receipt.item_count(),
                receipt.desk
            ),
            CustomerEvent::CheckoutTimedOut { desk, waited_ticks, .. } => {
                write!(f, "gave up on {desk} after {waited_ticks} ticks")
            }
            CustomerEvent::CheckoutSkipped { total, items, .. } => {
                write!(f, "no desk; took {items} item(s) worth {total}")
            }
            CustomerEvent::MovementFailed { to, .. } => write!(f, "could not reach {to}"),
            CustomerEvent::Departed { reason, spent, items, .. } => {
                write!(f, "departed {reason}, spent {spent} on {items} item(s)")
            }
            CustomerEvent::Stranded { .. } => f.write_str("stranded"),
        }
    }
}
