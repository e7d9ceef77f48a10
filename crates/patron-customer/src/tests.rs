//! Integration-style tests: hand-built shop, hand-ticked customers.
//!
//! Every test drives real collaborators (grid surface, inventory, desks)
//! through a [`StoreContext`] exactly the way an orchestrator would, with
//! seeds and budgets pinned so outcomes are reproducible.

use patron_core::{CustomerId, Money, Point3, ProductId, ShelfId, SimClock};
use patron_movement::MovementConfig;
use patron_nav::GridSurface;
use patron_shop::{
    Checkouts, FloorPlan, Inventory, Product, ProductKind, ServiceRate, StoreStatus,
};

use crate::config::BehaviorConfig;
use crate::context::StoreContext;
use crate::customer::{Customer, TickOutcome};
use crate::events::{CustomerEvent, LeaveReason};
use crate::personality::Personality;
use crate::state::Phase;

/// 12x7 shop: three shelves (A/B/C), one desk (K), entry (E), exit (X).
const SHOP_FLOOR: &str = "\
############
#..........#
#.A..B..C..#
#..........#
#....K.....#
#E........X#
############";

/// Exit X is sealed inside a wall pocket; everything else is reachable.
const DEAD_END_FLOOR: &str = "\
############
#..........#
#.A........#
#......###.#
#......#X#.#
#E.....###.#
############";

const SEED: u64 = 0xFEED_FACE;

fn product(id: u16, name: &str, cents: u32) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        price: Money(cents),
        kind: ProductKind::Miniature,
    }
}

fn walk_config() -> MovementConfig {
    MovementConfig { speed: 5.0, ..MovementConfig::default() }
}

/// Movement config whose recovery ladder exhausts quickly and whose
/// sampling cannot escape a sealed pocket.
fn cornered_config() -> MovementConfig {
    MovementConfig {
        speed: 5.0,
        sample_radius: 0.4,
        offset_radius: 0.3,
        retry_delay_secs: 0.2,
        max_retries: 2,
        ..MovementConfig::default()
    }
}

/// Deterministic behavior: always buy, one item, no early-exit draws.
fn eager_config() -> BehaviorConfig {
    BehaviorConfig {
        min_browse_secs: 0.0,
        max_browse_secs: 600.0,
        shelf_dwell_secs: 0.3,
        items_target_min: 1,
        items_target_max: 1,
        buy_chance: 1.0,
        good_enough_chance: 0.0,
        checkout_timeout_secs: 60.0,
    }
}

struct Shop {
    surface: GridSurface,
    floor: FloorPlan,
    status: StoreStatus,
    behavior: BehaviorConfig,
    clock: SimClock,
    inventory: Inventory,
    checkouts: Checkouts,
    shelves: Vec<ShelfId>,
}

impl Shop {
    /// Parse `art`, register a shelf slot per A/B/C marker, nothing
    /// stocked and no desks.
    fn bare(art: &str) -> Shop {
        let (surface, markers) = GridSurface::parse(art, 1.0).unwrap();
        let spawn = markers.one('E').unwrap();
        let exit = markers.one('X').unwrap();
        let mut inventory = Inventory::new();
        let mut shelves = Vec::new();
        for marker in ['A', 'B', 'C'] {
            if let Some(p) = markers.one(marker) {
                shelves.push(inventory.add_shelf(p));
            }
        }
        Shop {
            surface,
            floor: FloorPlan::new(spawn, exit),
            status: StoreStatus::open(),
            behavior: eager_config(),
            clock: SimClock::new(0.1),
            inventory,
            checkouts: Checkouts::new(),
            shelves,
        }
    }

    /// The standard fixture: stocked shelves at $30 / $25 / $15 and one
    /// desk with a quick service rate.
    fn standard() -> Shop {
        let mut shop = Shop::bare(SHOP_FLOOR);
        shop.stock_defaults();
        let (_, markers) = GridSurface::parse(SHOP_FLOOR, 1.0).unwrap();
        shop.checkouts.add_desk(
            markers.one('K').unwrap(),
            ServiceRate { base_ticks: 3, per_item_ticks: 1 },
        );
        shop
    }

    fn stock_defaults(&mut self) {
        let items = [
            product(0, "Hero Blister", 3000),
            product(1, "Terrain Kit", 2500),
            product(2, "Dice Set", 1500),
        ];
        for (shelf, item) in self.shelves.iter().zip(items.iter()) {
            self.inventory.stock(*shelf, item).unwrap();
        }
    }

    fn customer(&self, id: u32, budget: Money) -> Customer {
        Customer::new(
            CustomerId(id),
            Personality::default(),
            budget,
            SEED,
            &walk_config(),
            self.floor.spawn,
            self.clock.now(),
        )
    }

    /// One orchestrator round for a single customer: tick them, service
    /// the desks, advance the clock.
    fn tick(&mut self, customer: &mut Customer, events: &mut Vec<CustomerEvent>) -> TickOutcome {
        let mut ctx = StoreContext {
            clock: &self.clock,
            surface: &self.surface,
            floor: &self.floor,
            status: &self.status,
            behavior: &self.behavior,
            inventory: &mut self.inventory,
            checkouts: &mut self.checkouts,
        };
        let out = customer.tick(&mut ctx, events);
        self.checkouts.service_all(self.clock.now());
        self.clock.advance();
        out
    }

    /// Tick until the customer despawns or `max_ticks` elapse.
    fn run(
        &mut self,
        customer: &mut Customer,
        events: &mut Vec<CustomerEvent>,
        max_ticks: u64,
    ) -> TickOutcome {
        for _ in 0..max_ticks {
            let out = self.tick(customer, events);
            if out != TickOutcome::Active {
                return out;
            }
        }
        TickOutcome::Active
    }
}

fn kinds(events: &[CustomerEvent]) -> Vec<&'static str> {
    events.iter().map(|e| e.kind()).collect()
}

fn departed_reason(events: &[CustomerEvent]) -> Option<LeaveReason> {
    events.iter().find_map(|e| match e {
        CustomerEvent::Departed { reason, .. } => Some(*reason),
        _ => None,
    })
}

mod transitions {
    use crate::state::{can_transition, Phase};

    #[test]
    fn table_is_exactly_four_edges() {
        use Phase::*;
        let legal = [
            (Entering, Shopping),
            (Shopping, Purchasing),
            (Shopping, Leaving),
            (Purchasing, Leaving),
        ];
        for from in [Entering, Shopping, Purchasing, Leaving] {
            for to in [Entering, Shopping, Purchasing, Leaving] {
                assert_eq!(
                    can_transition(from, to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn full_visit_buys_one_item_and_departs() {
        let mut shop = Shop::standard();
        let mut customer = shop.customer(1, Money::from_dollars(100));
        let mut events = Vec::new();

        let out = shop.run(&mut customer, &mut events, 2000);
        assert_eq!(out, TickOutcome::Departed);
        assert_eq!(
            kinds(&events),
            vec![
                "state_changed", // entering -> shopping
                "item_claimed",
                "state_changed", // shopping -> purchasing
                "purchased",
                "state_changed", // purchasing -> leaving
                "departed",
            ]
        );
        assert_eq!(departed_reason(&events), Some(LeaveReason::Purchased));

        let claimed_price = events
            .iter()
            .find_map(|e| match e {
                CustomerEvent::ItemClaimed { price, .. } => Some(*price),
                _ => None,
            })
            .unwrap();
        assert_eq!(customer.spent(), claimed_price);
        assert_eq!(customer.items_bought(), 1);
        assert_eq!(shop.inventory.stocked_count(), 2);
        assert_eq!(shop.inventory.open_claims(), 0);
        assert_eq!(shop.checkouts.total_queued(), 0);
    }

    #[test]
    fn every_observed_transition_is_legal() {
        let mut shop = Shop::standard();
        let mut customer = shop.customer(3, Money::from_dollars(100));
        let mut events = Vec::new();
        shop.run(&mut customer, &mut events, 2000);

        let changes: Vec<(Phase, Phase)> = events
            .iter()
            .filter_map(|e| match e {
                CustomerEvent::StateChanged { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert!(!changes.is_empty());
        for (from, to) in changes {
            assert!(crate::can_transition(from, to), "saw illegal {from} -> {to}");
        }
    }

    #[test]
    fn identical_seed_replays_identically() {
        let run = || {
            let mut shop = Shop::standard();
            let mut customer = shop.customer(1, Money::from_dollars(100));
            let mut events = Vec::new();
            shop.run(&mut customer, &mut events, 2000);
            (kinds(&events), customer.spent(), customer.position())
        };
        let (kinds_a, spent_a, pos_a) = run();
        let (kinds_b, spent_b, pos_b) = run();
        assert_eq!(kinds_a, kinds_b);
        assert_eq!(spent_a, spent_b);
        assert_eq!(pos_a.planar_distance(pos_b), 0.0);
    }

    #[test]
    fn empty_cart_skips_purchasing_entirely() {
        let mut shop = Shop::standard();
        // Never likes anything; boredom cap sends them out empty-handed.
        shop.behavior.buy_chance = 0.0;
        shop.behavior.max_browse_secs = 5.0;
        let mut customer = shop.customer(2, Money::from_dollars(100));
        let mut events = Vec::new();

        let out = shop.run(&mut customer, &mut events, 2000);
        assert_eq!(out, TickOutcome::Departed);
        assert_eq!(departed_reason(&events), Some(LeaveReason::EmptyHanded));
        // No shopping -> purchasing edge anywhere in the stream.
        assert!(events.iter().all(|e| !matches!(
            e,
            CustomerEvent::StateChanged { to: Phase::Purchasing, .. }
        )));
        assert_eq!(shop.inventory.stocked_count(), 3);
    }

    #[test]
    fn budget_is_a_hard_ceiling() {
        let mut shop = Shop::standard();
        // Wants ten items but can only pay for two of these prices.
        shop.behavior.items_target_min = 10;
        shop.behavior.items_target_max = 10;
        let budget = Money::from_dollars(50);
        let mut customer = shop.customer(4, budget);
        let mut events = Vec::new();

        for _ in 0..4000 {
            let out = shop.tick(&mut customer, &mut events);
            assert!(customer.cart().total() <= budget, "cart busted the budget");
            if out != TickOutcome::Active {
                assert_eq!(out, TickOutcome::Departed);
                break;
            }
        }
        assert_eq!(departed_reason(&events), Some(LeaveReason::Purchased));
        // $30/$25/$15 under a $50 budget always lands on exactly two items.
        assert_eq!(customer.items_bought(), 2);
        assert!(customer.spent() <= budget);
        assert_eq!(shop.inventory.open_claims(), 0);
    }
}

mod closing {
    use super::*;

    #[test]
    fn closing_warning_sends_a_shopper_to_the_till() {
        let mut shop = Shop::standard();
        // Wants three items; the warning will cut that short.
        shop.behavior.items_target_min = 3;
        shop.behavior.items_target_max = 3;
        let mut customer = shop.customer(5, Money::from_dollars(100));
        let mut events = Vec::new();

        // Browse until the first claim, then announce closing.
        for _ in 0..2000 {
            shop.tick(&mut customer, &mut events);
            if events.iter().any(|e| matches!(e, CustomerEvent::ItemClaimed { .. })) {
                break;
            }
        }
        shop.status.announce_closing();

        let out = shop.run(&mut customer, &mut events, 2000);
        assert_eq!(out, TickOutcome::Departed);
        // Went through checkout with the single item rather than browsing on.
        assert_eq!(departed_reason(&events), Some(LeaveReason::Purchased));
        assert_eq!(customer.items_bought(), 1);
    }

    #[test]
    fn hard_close_mid_browse_returns_the_cart() {
        let mut shop = Shop::standard();
        shop.behavior.items_target_min = 3;
        shop.behavior.items_target_max = 3;
        let mut customer = shop.customer(6, Money::from_dollars(100));
        let mut events = Vec::new();

        for _ in 0..2000 {
            shop.tick(&mut customer, &mut events);
            if events.iter().any(|e| matches!(e, CustomerEvent::ItemClaimed { .. })) {
                break;
            }
        }
        shop.status.close();

        let out = shop.run(&mut customer, &mut events, 2000);
        assert_eq!(out, TickOutcome::Departed);
        assert_eq!(departed_reason(&events), Some(LeaveReason::StoreClosing));
        // The claimed item went back on its shelf.
        assert_eq!(shop.inventory.stocked_count(), 3);
        assert_eq!(shop.inventory.open_claims(), 0);
        assert_eq!(customer.spent(), Money::ZERO);
    }
}

mod checkout_flow {
    use super::*;

    #[test]
    fn stalled_till_times_out_and_items_go_back() {
        let mut shop = Shop::bare(SHOP_FLOOR);
        shop.stock_defaults();
        let (_, markers) = GridSurface::parse(SHOP_FLOOR, 1.0).unwrap();
        // A till that never finishes anything.
        shop.checkouts.add_desk(
            markers.one('K').unwrap(),
            ServiceRate { base_ticks: 1_000_000, per_item_ticks: 0 },
        );
        shop.behavior.checkout_timeout_secs = 2.0; // 20 ticks
        let mut customer = shop.customer(7, Money::from_dollars(100));
        let mut events = Vec::new();

        let out = shop.run(&mut customer, &mut events, 4000);
        assert_eq!(out, TickOutcome::Departed);
        assert_eq!(departed_reason(&events), Some(LeaveReason::CheckoutTimeout));

        let waited = events
            .iter()
            .find_map(|e| match e {
                CustomerEvent::CheckoutTimedOut { waited_ticks, .. } => Some(*waited_ticks),
                _ => None,
            })
            .expect("timeout event missing");
        assert_eq!(waited, 20);
        assert_eq!(shop.inventory.stocked_count(), 3);
        assert_eq!(shop.inventory.open_claims(), 0);
        assert_eq!(shop.checkouts.total_queued(), 0);
        assert_eq!(customer.spent(), Money::ZERO);
    }

    #[test]
    fn no_desk_completes_the_sale_in_degraded_mode() {
        let mut shop = Shop::bare(SHOP_FLOOR);
        shop.stock_defaults();
        // No desks registered at all.
        let mut customer = shop.customer(8, Money::from_dollars(100));
        let mut events = Vec::new();

        let out = shop.run(&mut customer, &mut events, 2000);
        assert_eq!(out, TickOutcome::Departed);
        assert_eq!(departed_reason(&events), Some(LeaveReason::Purchased));
        assert!(events
            .iter()
            .any(|e| matches!(e, CustomerEvent::CheckoutSkipped { items: 1, .. })));
        // The claim was closed as sold, not leaked.
        assert_eq!(shop.inventory.open_claims(), 0);
        assert_eq!(shop.inventory.stocked_count(), 2);
        assert!(customer.spent() > Money::ZERO);
    }

    #[test]
    fn two_customers_share_one_till_fifo() {
        let mut shop = Shop::bare(SHOP_FLOOR);
        shop.stock_defaults();
        let (_, markers) = GridSurface::parse(SHOP_FLOOR, 1.0).unwrap();
        // Slow enough that the second customer is guaranteed to queue up
        // behind the first, whichever shelves the two of them browse.
        shop.checkouts.add_desk(
            markers.one('K').unwrap(),
            ServiceRate { base_ticks: 60, per_item_ticks: 2 },
        );
        let mut first = shop.customer(1, Money::from_dollars(100));
        let mut second = shop.customer(2, Money::from_dollars(100));
        let mut events = Vec::new();
        let mut out_first = TickOutcome::Active;
        let mut out_second = TickOutcome::Active;
        let mut saw_depth_two = false;

        for _ in 0..4000 {
            let mut ctx = StoreContext {
                clock: &shop.clock,
                surface: &shop.surface,
                floor: &shop.floor,
                status: &shop.status,
                behavior: &shop.behavior,
                inventory: &mut shop.inventory,
                checkouts: &mut shop.checkouts,
            };
            if out_first == TickOutcome::Active {
                out_first = first.tick(&mut ctx, &mut events);
            }
            if out_second == TickOutcome::Active {
                out_second = second.tick(&mut ctx, &mut events);
            }
            drop(ctx);
            shop.checkouts.service_all(shop.clock.now());
            shop.clock.advance();

            if let Some(desk) = shop.checkouts.iter().next() {
                if desk.queue_len() == 2 {
                    saw_depth_two = true;
                }
            }
            if out_first != TickOutcome::Active && out_second != TickOutcome::Active {
                break;
            }
        }

        assert_eq!(out_first, TickOutcome::Departed);
        assert_eq!(out_second, TickOutcome::Departed);
        let purchases = events
            .iter()
            .filter(|e| matches!(e, CustomerEvent::Purchased { .. }))
            .count();
        assert_eq!(purchases, 2);
        assert_eq!(shop.checkouts.total_queued(), 0);
        assert_eq!(shop.inventory.open_claims(), 0);
        // Both were in line together at least once on this layout.
        assert!(saw_depth_two);
    }
}

mod movement_edges {
    use super::*;

    #[test]
    fn entry_waypoint_is_visited_before_shopping() {
        let mut shop = Shop::standard();
        shop.floor = shop.floor.with_entry_waypoint(Point3::on_floor(5.5, 1.5));
        let mut customer = shop.customer(9, Money::from_dollars(100));
        let mut events = Vec::new();

        // While the walk to the waypoint is in progress the phase stays
        // Entering; the first transition fires on arrival.
        shop.tick(&mut customer, &mut events);
        assert_eq!(customer.phase(), Phase::Entering);
        assert!(events.is_empty());

        for _ in 0..200 {
            shop.tick(&mut customer, &mut events);
            if customer.phase() != Phase::Entering {
                break;
            }
        }
        assert_eq!(customer.phase(), Phase::Shopping);
        // Arrived near the waypoint before the transition.
        assert!(events
            .iter()
            .any(|e| matches!(e, CustomerEvent::StateChanged { from: Phase::Entering, .. })));
    }

    #[test]
    fn unreachable_entry_degrades_to_shopping_in_place() {
        let mut shop = Shop::bare(DEAD_END_FLOOR);
        shop.stock_defaults();
        // The waypoint sits inside the sealed pocket.
        let pocket = Point3::on_floor(8.5, 4.5);
        shop.floor = shop.floor.with_entry_waypoint(pocket);
        let mut customer = Customer::new(
            CustomerId(10),
            Personality::default(),
            Money::from_dollars(100),
            SEED,
            &cornered_config(),
            shop.floor.spawn,
            shop.clock.now(),
        );
        let mut events = Vec::new();

        for _ in 0..400 {
            shop.tick(&mut customer, &mut events);
            if customer.phase() == Phase::Shopping {
                break;
            }
        }
        assert_eq!(customer.phase(), Phase::Shopping);
        assert!(events
            .iter()
            .any(|e| matches!(e, CustomerEvent::MovementFailed { .. })));
    }

    #[test]
    fn sealed_exit_strands_the_customer() {
        let mut shop = Shop::bare(DEAD_END_FLOOR);
        // Nothing stocked: browsing is instantly "done", cart stays empty,
        // and the only job left is the impossible walk to the exit.
        let mut customer = Customer::new(
            CustomerId(11),
            Personality::default(),
            Money::from_dollars(100),
            SEED,
            &cornered_config(),
            shop.floor.spawn,
            shop.clock.now(),
        );
        let mut events = Vec::new();

        let out = shop.run(&mut customer, &mut events, 400);
        assert_eq!(out, TickOutcome::Stranded);
        assert!(events.iter().any(|e| matches!(e, CustomerEvent::Stranded { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, CustomerEvent::MovementFailed { .. })));

        // The orchestrator's despawn path must leave the shop clean.
        customer.release_resources(&mut shop.inventory, &mut shop.checkouts);
        assert_eq!(shop.inventory.open_claims(), 0);
        assert_eq!(shop.checkouts.total_queued(), 0);
    }
}

mod surfaces {
    use super::*;

    #[test]
    fn status_line_tracks_the_phase() {
        let mut shop = Shop::standard();
        let mut customer = shop.customer(12, Money::from_dollars(100));
        let mut events = Vec::new();

        assert!(customer.status_line().contains("walking in"));
        for _ in 0..2000 {
            shop.tick(&mut customer, &mut events);
            if customer.phase() == Phase::Shopping {
                break;
            }
        }
        let line = customer.status_line();
        assert!(
            line.contains("browsing") || line.contains("heading") || line.contains("examining"),
            "unexpected status line: {line}"
        );
        assert!(line.starts_with("C12"));
    }

    #[test]
    fn claims_are_attributed_while_shopping() {
        let mut shop = Shop::standard();
        let mut customer = shop.customer(13, Money::from_dollars(100));
        let mut events = Vec::new();

        for _ in 0..2000 {
            shop.tick(&mut customer, &mut events);
            let claimed = events.iter().find_map(|e| match e {
                CustomerEvent::ItemClaimed { item, .. } => Some(*item),
                _ => None,
            });
            if let Some(item) = claimed {
                // Claim registered to this customer until sold.
                if customer.phase() != Phase::Leaving {
                    assert_eq!(shop.inventory.claim_holder(item), Some(CustomerId(13)));
                }
                break;
            }
        }
    }
}
