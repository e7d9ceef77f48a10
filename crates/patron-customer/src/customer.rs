//! One customer: the state machine that ties movement, shopping and
//! checkout together.

use patron_core::{CustomerId, CustomerRng, Money, Point3, Tick};
use patron_movement::{MovementConfig, MovementCoordinator, MovementStatus};
use patron_nav::NavSurface;
use patron_shop::{Checkouts, Inventory};

use crate::cart::Cart;
use crate::context::StoreContext;
use crate::events::{CustomerEvent, LeaveReason};
use crate::personality::Personality;
use crate::purchasing::{CheckoutBehavior, CheckoutOutcome};
use crate::shopping::{ShoppingBehavior, ShoppingOutcome};
use crate::state::{can_transition, CustomerState, Phase};

/// What the orchestrator should do with this customer after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still in the shop; tick again next round.
    Active,
    /// Walked out the exit; despawn. All resources already released.
    Departed,
    /// Could not reach the exit; despawn in place. The orchestrator must
    /// call [`Customer::release_resources`] before dropping them.
    Stranded,
}

/// The per-tick decision, applied after the state borrow ends.
enum Step {
    Stay,
    Goto(CustomerState),
    Depart(LeaveReason),
    Strand,
}

/// A customer for the lifetime of one shop visit.
///
/// Everything the customer owns is in here — RNG stream, movement
/// coordinator, cart, lifecycle state. Everything shared arrives each
/// tick through a [`StoreContext`], never through globals, so two
/// customers can never observe each other except through the inventory
/// and checkout authorities.
pub struct Customer {
    id: CustomerId,
    personality: Personality,
    rng: CustomerRng,
    movement: MovementCoordinator,
    cart: Cart,
    state: CustomerState,
    spawned_at: Tick,
    spent: Money,
    bought: u32,
}

impl Customer {
    /// Spawn a customer at `spawn` in the Entering state.
    ///
    /// The walk speed in `movement_config` is scaled by the personality
    /// before the coordinator is built, so a hurried customer is hurried
    /// for their whole visit.
    pub fn new(
        id: CustomerId,
        personality: Personality,
        budget: Money,
        global_seed: u64,
        movement_config: &MovementConfig,
        spawn: Point3,
        spawned_at: Tick,
    ) -> Customer {
        let mut config = movement_config.clone();
        config.speed *= personality.speed_mul;
        Customer {
            id,
            personality,
            rng: CustomerRng::new(global_seed, id),
            movement: MovementCoordinator::new(config, spawn),
            cart: Cart::new(budget),
            state: CustomerState::Entering,
            spawned_at,
            spent: Money::ZERO,
            bought: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.movement.position()
    }

    #[inline]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[inline]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    #[inline]
    pub fn spawned_at(&self) -> Tick {
        self.spawned_at
    }

    /// Money actually paid (or owed, in degraded no-desk mode).
    #[inline]
    pub fn spent(&self) -> Money {
        self.spent
    }

    #[inline]
    pub fn items_bought(&self) -> u32 {
        self.bought
    }

    #[inline]
    pub fn movement(&self) -> &MovementCoordinator {
        &self.movement
    }

    /// One-line debug status: id, doing-what, cart, position.
    pub fn status_line(&self) -> String {
        let doing = match &self.state {
            CustomerState::Entering => "walking in".to_string(),
            CustomerState::Shopping(b) => b.describe(),
            CustomerState::Purchasing(b) => b.describe(),
            CustomerState::Leaving { reason } => format!("leaving ({reason})"),
        };
        let p = self.movement.position();
        format!(
            "{} | {} | cart {} ({}) | at ({:.1}, {:.1})",
            self.id,
            doing,
            self.cart.len(),
            self.cart.total(),
            p.x,
            p.z
        )
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this customer by one tick.
    ///
    /// Order inside the tick: movement first (one step along the current
    /// path, surfacing an `Arrived`/`Failed` edge), then the current
    /// state's logic, then at most one transition. Events are appended to
    /// `events`; the return value tells the orchestrator whether the
    /// customer is still in the shop.
    pub fn tick<S: NavSurface>(
        &mut self,
        ctx: &mut StoreContext<'_, S>,
        events: &mut Vec<CustomerEvent>,
    ) -> TickOutcome {
        let walk_target = self.movement.requested_destination();
        let move_status =
            self.movement
                .tick(ctx.now(), ctx.clock.seconds_per_tick, ctx.surface, &mut self.rng);
        if move_status == MovementStatus::Failed {
            events.push(CustomerEvent::MovementFailed {
                customer: self.id,
                to: walk_target.unwrap_or_else(|| self.movement.position()),
            });
        }

        let step = {
            let Customer { id, personality, rng, movement, cart, state, spent, bought, .. } =
                self;
            let id = *id;
            match state {
                CustomerState::Entering => match move_status {
                    MovementStatus::Arrived => {
                        Step::Goto(CustomerState::Shopping(ShoppingBehavior::begin(ctx, rng)))
                    }
                    // The way in is blocked: browse from wherever we stand
                    // rather than refusing the visit.
                    MovementStatus::Failed => {
                        Step::Goto(CustomerState::Shopping(ShoppingBehavior::begin(ctx, rng)))
                    }
                    MovementStatus::Idle => {
                        if let Some(waypoint) = ctx.floor.entry_waypoint {
                            if movement.set_destination(waypoint, ctx.surface, ctx.now()) {
                                Step::Stay
                            } else {
                                Step::Goto(CustomerState::Shopping(ShoppingBehavior::begin(
                                    ctx, rng,
                                )))
                            }
                        } else {
                            Step::Goto(CustomerState::Shopping(ShoppingBehavior::begin(ctx, rng)))
                        }
                    }
                    MovementStatus::Moving => Step::Stay,
                },

                CustomerState::Shopping(behavior) => {
                    match behavior
                        .tick(id, personality, movement, cart, rng, move_status, ctx, events)
                    {
                        None => Step::Stay,
                        Some(ShoppingOutcome::LeaveEmpty) => {
                            Step::Goto(CustomerState::Leaving { reason: LeaveReason::EmptyHanded })
                        }
                        Some(ShoppingOutcome::Abandon) => {
                            Step::Goto(CustomerState::Leaving { reason: LeaveReason::StoreClosing })
                        }
                        Some(ShoppingOutcome::Checkout) => {
                            if ctx.checkouts.is_empty() {
                                // Degraded mode: no till exists anywhere.
                                // Complete the sale locally so shelf and
                                // claim state stay consistent, and say so.
                                let items = cart.take_all();
                                let total: Money = items.iter().map(|i| i.price).sum();
                                for item in &items {
                                    ctx.inventory.mark_sold(item, id);
                                }
                                *spent += total;
                                *bought += items.len() as u32;
                                events.push(CustomerEvent::CheckoutSkipped {
                                    customer: id,
                                    total,
                                    items: items.len() as u32,
                                });
                                Step::Goto(CustomerState::Leaving {
                                    reason: LeaveReason::Purchased,
                                })
                            } else {
                                match CheckoutBehavior::begin(personality, movement, ctx) {
                                    Some(behavior) => {
                                        Step::Goto(CustomerState::Purchasing(behavior))
                                    }
                                    None => {
                                        // Desk exists but its spot refused
                                        // to sample; give the items back.
                                        for item in cart.take_all() {
                                            ctx.inventory.return_item(item);
                                        }
                                        Step::Goto(CustomerState::Leaving {
                                            reason: LeaveReason::EmptyHanded,
                                        })
                                    }
                                }
                            }
                        }
                    }
                }

                CustomerState::Purchasing(behavior) => {
                    match behavior.tick(id, movement, cart, move_status, ctx, events) {
                        None => Step::Stay,
                        Some(CheckoutOutcome::Done(receipt)) => {
                            *spent += receipt.total;
                            *bought += receipt.item_count();
                            events.push(CustomerEvent::Purchased { customer: id, receipt });
                            Step::Goto(CustomerState::Leaving { reason: LeaveReason::Purchased })
                        }
                        Some(CheckoutOutcome::TimedOut) => Step::Goto(CustomerState::Leaving {
                            reason: LeaveReason::CheckoutTimeout,
                        }),
                        Some(CheckoutOutcome::ClosedOut) => Step::Goto(CustomerState::Leaving {
                            reason: LeaveReason::StoreClosing,
                        }),
                        Some(CheckoutOutcome::Unreachable) => Step::Goto(CustomerState::Leaving {
                            reason: LeaveReason::EmptyHanded,
                        }),
                    }
                }

                CustomerState::Leaving { reason } => match move_status {
                    MovementStatus::Arrived => Step::Depart(*reason),
                    MovementStatus::Failed => Step::Strand,
                    MovementStatus::Idle => {
                        if movement.set_destination(ctx.floor.exit, ctx.surface, ctx.now()) {
                            Step::Stay
                        } else {
                            Step::Strand
                        }
                    }
                    MovementStatus::Moving => Step::Stay,
                },
            }
        };

        match step {
            Step::Stay => TickOutcome::Active,
            Step::Goto(next) => {
                self.transition(next, events);
                TickOutcome::Active
            }
            Step::Depart(reason) => {
                events.push(CustomerEvent::Departed {
                    customer: self.id,
                    reason,
                    spent: self.spent,
                    items: self.bought,
                });
                TickOutcome::Departed
            }
            Step::Strand => {
                events.push(CustomerEvent::Stranded { customer: self.id });
                TickOutcome::Stranded
            }
        }
    }

    fn transition(&mut self, next: CustomerState, events: &mut Vec<CustomerEvent>) {
        let from = self.state.phase();
        let to = next.phase();
        debug_assert!(
            can_transition(from, to),
            "illegal transition {from} -> {to} for {}",
            self.id
        );
        self.state = next;
        events.push(CustomerEvent::StateChanged { customer: self.id, from, to });
    }

    /// Hand back everything this customer still holds: cart items to the
    /// inventory, queue membership and staged items to their desk. Called
    /// by the orchestrator before despawning a stranded customer (or any
    /// customer removed at a hard stop).
    pub fn release_resources(&mut self, inventory: &mut Inventory, checkouts: &mut Checkouts) {
        if let CustomerState::Purchasing(behavior) = &self.state {
            if let Some(desk) = checkouts.get_mut(behavior.desk()) {
                for item in desk.leave(self.id) {
                    inventory.return_item(item);
                }
            }
        }
        for item in self.cart.take_all() {
            inventory.return_item(item);
        }
        self.movement.stop();
    }
}
