//! Browsing: pick a stocked shelf, walk over, look, maybe buy, repeat.

use patron_core::{CustomerId, CustomerRng, ShelfId, Tick};
use patron_movement::{MovementCoordinator, MovementStatus};
use patron_nav::NavSurface;

use crate::cart::Cart;
use crate::context::StoreContext;
use crate::events::CustomerEvent;
use crate::personality::Personality;

/// What ended the browse loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShoppingOutcome {
    /// Cart has items; head for a till.
    Checkout,
    /// Nothing in the cart; straight to the door.
    LeaveEmpty,
    /// Doors closed mid-browse; items already returned to the shelves.
    Abandon,
}

#[derive(Debug, Clone, Copy)]
enum BrowseStage {
    /// Decide this tick: satisfied, or pick the next shelf.
    ChoosingShelf,
    WalkingToShelf { shelf: ShelfId },
    Examining { shelf: ShelfId, until: Tick },
}

/// Working state for the Shopping phase.
#[derive(Debug)]
pub(crate) struct ShoppingBehavior {
    /// How many items this customer came in hoping to find.
    items_target: u32,
    entered_at: Tick,
    /// Shelves the recovery ladder gave up on this visit; never re-picked.
    unreachable: Vec<ShelfId>,
    stage: BrowseStage,
}

impl ShoppingBehavior {
    pub(crate) fn begin<S: NavSurface>(
        ctx: &StoreContext<'_, S>,
        rng: &mut CustomerRng,
    ) -> ShoppingBehavior {
        let lo = ctx.behavior.items_target_min;
        let hi = ctx.behavior.items_target_max.max(lo);
        ShoppingBehavior {
            items_target: rng.gen_range(lo..=hi),
            entered_at: ctx.now(),
            unreachable: Vec::new(),
            stage: BrowseStage::ChoosingShelf,
        }
    }

    /// One tick of browsing. `Some` ends the Shopping phase.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn tick<S: NavSurface>(
        &mut self,
        id: CustomerId,
        personality: &Personality,
        movement: &mut MovementCoordinator,
        cart: &mut Cart,
        rng: &mut CustomerRng,
        move_status: MovementStatus,
        ctx: &mut StoreContext<'_, S>,
        events: &mut Vec<CustomerEvent>,
    ) -> Option<ShoppingOutcome> {
        // Doors shut: put everything back and go. The closing *warning*
        // is gentler and handled as instant satisfaction below.
        if !ctx.status.is_open() {
            for item in cart.take_all() {
                ctx.inventory.return_item(item);
            }
            movement.stop();
            return Some(ShoppingOutcome::Abandon);
        }

        match self.stage {
            BrowseStage::ChoosingShelf => {
                if self.is_satisfied(cart, personality, rng, ctx) {
                    movement.stop();
                    return Some(if cart.is_empty() {
                        ShoppingOutcome::LeaveEmpty
                    } else {
                        ShoppingOutcome::Checkout
                    });
                }

                let candidates: Vec<ShelfId> = ctx
                    .inventory
                    .stocked_shelves()
                    .map(|s| s.id())
                    .filter(|id| !self.unreachable.contains(id))
                    .collect();
                // `is_satisfied` returned false, so something browsable
                // exists; the fallback mirrors the empty-cart exit anyway.
                let Some(&shelf) = rng.choose(&candidates) else {
                    return Some(if cart.is_empty() {
                        ShoppingOutcome::LeaveEmpty
                    } else {
                        ShoppingOutcome::Checkout
                    });
                };
                let Some(slot) = ctx.inventory.shelf(shelf) else {
                    return None;
                };
                if movement.set_destination(slot.position(), ctx.surface, ctx.now()) {
                    self.stage = BrowseStage::WalkingToShelf { shelf };
                } else {
                    // Not even a sampleable point near the shelf.
                    self.unreachable.push(shelf);
                }
                None
            }

            BrowseStage::WalkingToShelf { shelf } => {
                match move_status {
                    MovementStatus::Arrived => {
                        let dwell = ctx
                            .ticks_for_secs(ctx.behavior.shelf_dwell_secs * personality.browse_mul);
                        self.stage = BrowseStage::Examining { shelf, until: ctx.now() + dwell };
                    }
                    MovementStatus::Failed => {
                        self.unreachable.push(shelf);
                        self.stage = BrowseStage::ChoosingShelf;
                    }
                    MovementStatus::Idle => {
                        // Destination vanished under us; re-choose.
                        self.stage = BrowseStage::ChoosingShelf;
                    }
                    MovementStatus::Moving => {}
                }
                None
            }

            BrowseStage::Examining { shelf, until } => {
                if ctx.now() < until {
                    return None;
                }
                self.consider_purchase(shelf, id, personality, cart, rng, ctx, events);
                self.stage = BrowseStage::ChoosingShelf;
                None
            }
        }
    }

    /// The buy decision at the end of a shelf dwell: affordable first,
    /// then a personality-scaled coin flip, then an atomic claim.
    #[allow(clippy::too_many_arguments)]
    fn consider_purchase<S: NavSurface>(
        &mut self,
        shelf: ShelfId,
        id: CustomerId,
        personality: &Personality,
        cart: &mut Cart,
        rng: &mut CustomerRng,
        ctx: &mut StoreContext<'_, S>,
        events: &mut Vec<CustomerEvent>,
    ) {
        // The shelf may have been emptied by someone else mid-dwell.
        let Some(stocked) = ctx.inventory.shelf(shelf).and_then(|s| s.stocked()) else {
            return;
        };
        let price = stocked.price;
        if !cart.can_afford(price) {
            return;
        }
        let chance = ctx.behavior.buy_chance * personality.buy_mul;
        if !rng.gen_bool(chance) {
            return;
        }
        // Claim-or-nothing: a rival claim between the peek above and here
        // simply yields None and the browse loop moves on.
        let Some(claimed) = ctx.inventory.try_claim(shelf, id) else {
            return;
        };
        events.push(CustomerEvent::ItemClaimed {
            customer: id,
            item: claimed.item,
            product: claimed.product,
            price: claimed.price,
            shelf,
        });
        if let Err(item) = cart.try_add(claimed) {
            debug_assert!(false, "cart refused an item that passed can_afford");
            ctx.inventory.return_item(item);
        }
    }

    /// Checked every time the customer is back at `ChoosingShelf`.
    ///
    /// Contentment proper is `min browse elapsed && cart non-empty &&
    /// (target reached || "good enough" draw)`. Around that sit the
    /// overrides that end a browse regardless of contentment: the closing
    /// warning, a floor with nothing left worth walking to, and the
    /// boredom cap.
    fn is_satisfied<S: NavSurface>(
        &self,
        cart: &Cart,
        personality: &Personality,
        rng: &mut CustomerRng,
        ctx: &StoreContext<'_, S>,
    ) -> bool {
        // Closing warning collapses the rest of the browse.
        if ctx.status.is_closing_soon() {
            return true;
        }

        let mut any_browsable = false;
        let mut any_affordable = false;
        for slot in ctx.inventory.stocked_shelves() {
            if self.unreachable.contains(&slot.id()) {
                continue;
            }
            any_browsable = true;
            if let Some(item) = slot.stocked() {
                if cart.can_afford(item.price) {
                    any_affordable = true;
                    break;
                }
            }
        }
        // Nothing left worth walking to is "done", not an error.
        if !any_browsable || !any_affordable {
            return true;
        }

        let elapsed = ctx.now().since(self.entered_at);
        let max_browse =
            ctx.ticks_for_secs(ctx.behavior.max_browse_secs * personality.browse_mul);
        if elapsed >= max_browse {
            return true;
        }
        let min_browse =
            ctx.ticks_for_secs(ctx.behavior.min_browse_secs * personality.browse_mul);
        if elapsed < min_browse {
            return false;
        }
        if cart.is_empty() {
            return false;
        }
        cart.len() as u32 >= self.items_target || rng.gen_bool(ctx.behavior.good_enough_chance)
    }

    /// Status-line fragment.
    pub(crate) fn describe(&self) -> String {
        match self.stage {
            BrowseStage::ChoosingShelf => "browsing".to_string(),
            BrowseStage::WalkingToShelf { shelf } => format!("heading to {shelf}"),
            BrowseStage::Examining { shelf, .. } => format!("examining {shelf}"),
        }
    }
}
