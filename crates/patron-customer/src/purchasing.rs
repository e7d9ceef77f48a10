//! Checkout: queue at a till, stage the cart, wait out the transaction.
//!
//! Two different waits live here, with different bounds. The *queue
//! position* wait is unbounded — a long line is legitimate, and anyone who
//! has joined one is in flight and allowed to finish even after closing
//! time. The *completion* wait after items are on the counter is bounded
//! by the personality-scaled timeout: a till that never finishes must not
//! deadlock the customer.

use patron_core::{CustomerId, DeskId, Tick};
use patron_movement::{MovementCoordinator, MovementStatus};
use patron_nav::NavSurface;

use crate::cart::Cart;
use crate::context::StoreContext;
use crate::events::CustomerEvent;
use crate::personality::Personality;

/// What ended the Purchasing phase.
#[derive(Debug)]
pub(crate) enum CheckoutOutcome {
    /// Transaction complete; receipt in hand, claims closed as sold.
    Done(patron_shop::Receipt),
    /// Patience ran out waiting for completion; items returned.
    TimedOut,
    /// Doors shut before the queue was joined; items returned.
    ClosedOut,
    /// The walk to the desk failed permanently; items returned.
    Unreachable,
}

#[derive(Debug, Clone, Copy)]
enum CheckoutStage {
    WalkingToDesk,
    /// In line; `position` is the 1-based spot polled out of the desk
    /// each tick (the desk never calls us back).
    Queued { position: u32 },
    /// Items on the counter; bounded wait for the receipt.
    AwaitingReceipt { placed_at: Tick },
}

/// Working state for the Purchasing phase.
#[derive(Debug)]
pub(crate) struct CheckoutBehavior {
    desk: DeskId,
    timeout_ticks: u64,
    stage: CheckoutStage,
}

impl CheckoutBehavior {
    /// Pick the shortest queue and start walking. `None` means no desk
    /// could be targeted at all (none exist, or the desk point refused to
    /// sample); the caller decides the degraded path.
    pub(crate) fn begin<S: NavSurface>(
        personality: &Personality,
        movement: &mut MovementCoordinator,
        ctx: &mut StoreContext<'_, S>,
    ) -> Option<CheckoutBehavior> {
        let desk = ctx.checkouts.shortest_queue()?;
        let target = ctx.checkouts.get(desk)?.position();
        if !movement.set_destination(target, ctx.surface, ctx.now()) {
            return None;
        }
        let timeout_ticks =
            ctx.ticks_for_secs(ctx.behavior.checkout_timeout_secs * personality.patience_mul);
        Some(CheckoutBehavior { desk, timeout_ticks, stage: CheckoutStage::WalkingToDesk })
    }

    #[inline]
    pub(crate) fn desk(&self) -> DeskId {
        self.desk
    }

    /// One tick at the till. `Some` ends the Purchasing phase.
    pub(crate) fn tick<S: NavSurface>(
        &mut self,
        id: CustomerId,
        movement: &mut MovementCoordinator,
        cart: &mut Cart,
        move_status: MovementStatus,
        ctx: &mut StoreContext<'_, S>,
        events: &mut Vec<CustomerEvent>,
    ) -> Option<CheckoutOutcome> {
        match self.stage {
            CheckoutStage::WalkingToDesk => {
                // Closing blocks *new* queue joins; whoever already joined
                // is in flight and allowed to finish.
                if !ctx.status.is_open() {
                    for item in cart.take_all() {
                        ctx.inventory.return_item(item);
                    }
                    movement.stop();
                    return Some(CheckoutOutcome::ClosedOut);
                }
                match move_status {
                    MovementStatus::Arrived => {
                        let Some(desk) = ctx.checkouts.get_mut(self.desk) else {
                            return None;
                        };
                        let position = desk.join(id);
                        self.stage = CheckoutStage::Queued { position };
                    }
                    MovementStatus::Failed => {
                        for item in cart.take_all() {
                            ctx.inventory.return_item(item);
                        }
                        return Some(CheckoutOutcome::Unreachable);
                    }
                    MovementStatus::Moving | MovementStatus::Idle => {}
                }
                None
            }

            CheckoutStage::Queued { .. } => {
                let Some(desk) = ctx.checkouts.get_mut(self.desk) else {
                    return None;
                };
                if desk.at_head(id) {
                    let items = cart.take_all();
                    match desk.place_items(id, items) {
                        Ok(()) => {
                            self.stage = CheckoutStage::AwaitingReceipt { placed_at: ctx.now() };
                        }
                        Err(items) => {
                            debug_assert!(false, "head of {} rejected staging", self.desk);
                            cart.restore(items);
                        }
                    }
                } else if let Some(position) = desk.position_of(id) {
                    self.stage = CheckoutStage::Queued { position };
                }
                None
            }

            CheckoutStage::AwaitingReceipt { placed_at } => {
                let now = ctx.now();
                let Some(desk) = ctx.checkouts.get_mut(self.desk) else {
                    return None;
                };
                if let Some(receipt) = desk.take_receipt(id) {
                    for item in &receipt.items {
                        ctx.inventory.mark_sold(item, id);
                    }
                    return Some(CheckoutOutcome::Done(receipt));
                }
                let waited = now.since(placed_at);
                if waited >= self.timeout_ticks {
                    let items = desk.leave(id);
                    for item in items {
                        ctx.inventory.return_item(item);
                    }
                    events.push(CustomerEvent::CheckoutTimedOut {
                        customer: id,
                        desk: self.desk,
                        waited_ticks: waited,
                    });
                    return Some(CheckoutOutcome::TimedOut);
                }
                None
            }
        }
    }

    /// Status-line fragment.
    pub(crate) fn describe(&self) -> String {
        match self.stage {
            CheckoutStage::WalkingToDesk => format!("heading to {}", self.desk),
            CheckoutStage::Queued { position } => format!("queue #{position} at {}", self.desk),
            CheckoutStage::AwaitingReceipt { .. } => format!("paying at {}", self.desk),
        }
    }
}
