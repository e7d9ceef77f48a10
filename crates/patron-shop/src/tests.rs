//! Unit tests for the shop authorities.

use patron_core::{Money, ProductId};

use crate::product::{Product, ProductKind};

fn product(id: u16, name: &str, cents: u32) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        price: Money(cents),
        kind: ProductKind::Miniature,
    }
}

mod catalog {
    use super::product;
    use crate::error::ShopError;
    use crate::loader::load_catalog_reader;
    use crate::product::{Catalog, ProductKind};
    use patron_core::{Money, ProductId};

    const GOOD_CSV: &str = "\
product_id,name,price_cents,kind
0,Skirmish Starter Set,4999,miniature
2,Chaos Black Primer,650,paint
1,Siege of Karak Rulebook,3500,rulebook
";

    #[test]
    fn loads_rows_in_any_order_into_dense_ids() {
        let catalog = load_catalog_reader(GOOD_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let primer = catalog.get(ProductId(2)).unwrap();
        assert_eq!(primer.name, "Chaos Black Primer");
        assert_eq!(primer.price, Money::from_parts(6, 50));
        assert_eq!(primer.kind, ProductKind::Paint);

        let book = catalog.by_name("Siege of Karak Rulebook").unwrap();
        assert_eq!(book.id, ProductId(1));
    }

    #[test]
    fn cheapest_price_scans_the_whole_catalog() {
        let catalog = load_catalog_reader(GOOD_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.cheapest_price(), Some(Money(650)));
        assert_eq!(Catalog::default().cheapest_price(), None);
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let csv = "product_id,name,price_cents,kind\n0,Mystery Box,100,mystery\n";
        let err = load_catalog_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ShopError::Parse(msg) if msg.contains("mystery")));
    }

    #[test]
    fn duplicate_and_missing_ids_are_rejected() {
        let dup = "product_id,name,price_cents,kind\n0,A,100,dice\n0,B,200,dice\n";
        assert!(matches!(
            load_catalog_reader(dup.as_bytes()),
            Err(ShopError::Parse(msg)) if msg.contains("duplicate")
        ));

        let gap = "product_id,name,price_cents,kind\n0,A,100,dice\n2,B,200,dice\n";
        assert!(matches!(
            load_catalog_reader(gap.as_bytes()),
            Err(ShopError::Parse(msg)) if msg.contains("missing")
        ));
    }

    #[test]
    fn display_forms() {
        assert_eq!(product(3, "x", 1).id.to_string(), "P3");
        assert_eq!(ProductKind::Scenery.to_string(), "scenery");
    }
}

mod stocking {
    use super::product;
    use crate::error::ShopError;
    use crate::inventory::Inventory;
    use patron_core::{ItemId, Point3, ShelfId};

    #[test]
    fn stock_mints_dense_item_ids() {
        let mut inv = Inventory::new();
        let s0 = inv.add_shelf(Point3::on_floor(1.0, 1.0));
        let s1 = inv.add_shelf(Point3::on_floor(2.0, 1.0));
        let p = product(0, "Dice Cube", 1200);

        assert_eq!(inv.stock(s0, &p).unwrap(), ItemId(0));
        assert_eq!(inv.stock(s1, &p).unwrap(), ItemId(1));
        assert_eq!(inv.stocked_count(), 2);
    }

    #[test]
    fn occupied_shelf_refuses_a_second_item() {
        let mut inv = Inventory::new();
        let shelf = inv.add_shelf(Point3::on_floor(1.0, 1.0));
        let p = product(0, "Dice Cube", 1200);
        inv.stock(shelf, &p).unwrap();

        assert!(matches!(
            inv.stock(shelf, &p),
            Err(ShopError::ShelfOccupied(s)) if s == shelf
        ));
    }

    #[test]
    fn unknown_shelf_is_an_error() {
        let mut inv = Inventory::new();
        let p = product(0, "Dice Cube", 1200);
        assert!(matches!(
            inv.stock(ShelfId(9), &p),
            Err(ShopError::NoSuchShelf(ShelfId(9)))
        ));
    }

    #[test]
    fn stocked_shelves_skips_empty_slots() {
        let mut inv = Inventory::new();
        let s0 = inv.add_shelf(Point3::on_floor(1.0, 1.0));
        let _s1 = inv.add_shelf(Point3::on_floor(2.0, 1.0));
        inv.stock(s0, &product(0, "Dice Cube", 1200)).unwrap();

        let stocked: Vec<ShelfId> = inv.stocked_shelves().map(|s| s.id()).collect();
        assert_eq!(stocked, vec![s0]);
    }
}

mod claims {
    use super::product;
    use crate::inventory::Inventory;
    use patron_core::{CustomerId, Point3, ShelfId};

    fn stocked_inventory() -> (Inventory, ShelfId) {
        let mut inv = Inventory::new();
        let shelf = inv.add_shelf(Point3::on_floor(1.0, 1.0));
        inv.stock(shelf, &product(0, "Hero Blister", 900)).unwrap();
        (inv, shelf)
    }

    #[test]
    fn claim_is_atomic_against_a_same_tick_rival() {
        let (mut inv, shelf) = stocked_inventory();
        let first = inv.try_claim(shelf, CustomerId(1));
        let second = inv.try_claim(shelf, CustomerId(2));

        let claimed = first.unwrap();
        assert!(second.is_none());
        assert_eq!(inv.claim_holder(claimed.item), Some(CustomerId(1)));
        assert_eq!(inv.stocked_count(), 0);
    }

    #[test]
    fn return_restocks_the_origin_shelf_when_empty() {
        let (mut inv, shelf) = stocked_inventory();
        let claimed = inv.try_claim(shelf, CustomerId(1)).unwrap();
        let item = claimed.item;

        inv.return_item(claimed);
        assert_eq!(inv.open_claims(), 0);
        assert_eq!(inv.shelf(shelf).unwrap().stocked().map(|s| s.item), Some(item));
        assert!(inv.returns_bin().is_empty());
    }

    #[test]
    fn return_falls_back_to_the_bin_when_the_shelf_was_restocked() {
        let (mut inv, shelf) = stocked_inventory();
        let claimed = inv.try_claim(shelf, CustomerId(1)).unwrap();
        // Staff restock the now-empty shelf before the customer gives up.
        inv.stock(shelf, &product(0, "Hero Blister", 900)).unwrap();

        inv.return_item(claimed.clone());
        assert_eq!(inv.open_claims(), 0);
        assert_eq!(inv.returns_bin().len(), 1);
        assert_eq!(inv.returns_bin()[0].item, claimed.item);
    }

    #[test]
    fn mark_sold_closes_the_claim_for_good() {
        let (mut inv, shelf) = stocked_inventory();
        let claimed = inv.try_claim(shelf, CustomerId(1)).unwrap();

        inv.mark_sold(&claimed, CustomerId(1));
        assert_eq!(inv.open_claims(), 0);
        assert_eq!(inv.claim_holder(claimed.item), None);
        assert!(inv.shelf(shelf).unwrap().is_empty());
    }
}

mod checkout {
    use super::product;
    use crate::checkout::{Checkouts, ServiceRate};
    use crate::inventory::Inventory;
    use crate::shelf::ClaimedItem;
    use patron_core::{CustomerId, Money, Point3, Tick};

    const RATE: ServiceRate = ServiceRate { base_ticks: 5, per_item_ticks: 2 };

    fn claimed_pair(customer: CustomerId) -> Vec<ClaimedItem> {
        let mut inv = Inventory::new();
        let a = inv.add_shelf(Point3::on_floor(1.0, 1.0));
        let b = inv.add_shelf(Point3::on_floor(2.0, 1.0));
        inv.stock(a, &product(0, "Objective Markers", 800)).unwrap();
        inv.stock(b, &product(1, "Sector Ruins", 2700)).unwrap();
        vec![
            inv.try_claim(a, customer).unwrap(),
            inv.try_claim(b, customer).unwrap(),
        ]
    }

    #[test]
    fn queue_positions_are_one_based_and_fifo() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();

        assert_eq!(d.join(CustomerId(1)), 1);
        assert_eq!(d.join(CustomerId(2)), 2);
        // Re-joining is a no-op.
        assert_eq!(d.join(CustomerId(1)), 1);
        assert_eq!(d.position_of(CustomerId(2)), Some(2));
        assert!(d.at_head(CustomerId(1)));
        assert!(!d.at_head(CustomerId(2)));
    }

    #[test]
    fn only_the_head_may_stage_items() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(1));
        d.join(CustomerId(2));

        let items = claimed_pair(CustomerId(2));
        let bounced = d.place_items(CustomerId(2), items).unwrap_err();
        assert_eq!(bounced.len(), 2);

        let items = claimed_pair(CustomerId(1));
        assert!(d.place_items(CustomerId(1), items).is_ok());
    }

    #[test]
    fn staging_twice_does_not_double_charge() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(1));

        let items = claimed_pair(CustomerId(1));
        d.place_items(CustomerId(1), items.clone()).unwrap();
        d.place_items(CustomerId(1), items).unwrap();

        // base 5 + 2 items * 2 = 9 ticks, then the receipt totals two
        // items, not four.
        d.service(Tick(0));
        let done = d.service(Tick(9));
        assert_eq!(done, Some(CustomerId(1)));
        let receipt = d.take_receipt(CustomerId(1)).unwrap();
        assert_eq!(receipt.item_count(), 2);
        assert_eq!(receipt.total, Money(800 + 2700));
    }

    #[test]
    fn service_takes_base_plus_per_item_ticks() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(7));
        d.place_items(CustomerId(7), claimed_pair(CustomerId(7))).unwrap();

        // Service starts on the first tick that sees staged items.
        assert_eq!(d.service(Tick(0)), None);
        for t in 1..9 {
            assert_eq!(d.service(Tick(t)), None, "finished early at tick {t}");
        }
        assert_eq!(d.service(Tick(9)), Some(CustomerId(7)));

        let receipt = d.take_receipt(CustomerId(7)).unwrap();
        assert_eq!(receipt.completed_at, Tick(9));
        assert_eq!(receipt.desk, desk);
        // A receipt is collected exactly once.
        assert!(d.take_receipt(CustomerId(7)).is_none());
    }

    #[test]
    fn next_in_line_is_served_after_the_head_collects() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(1));
        d.join(CustomerId(2));
        d.place_items(CustomerId(1), claimed_pair(CustomerId(1))).unwrap();

        d.service(Tick(0));
        assert_eq!(d.service(Tick(9)), Some(CustomerId(1)));
        assert!(d.at_head(CustomerId(2)));

        d.place_items(CustomerId(2), claimed_pair(CustomerId(2))).unwrap();
        d.service(Tick(10));
        assert_eq!(d.service(Tick(19)), Some(CustomerId(2)));
    }

    #[test]
    fn leaving_returns_staged_items_and_unblocks_the_queue() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(1));
        d.join(CustomerId(2));
        d.place_items(CustomerId(1), claimed_pair(CustomerId(1))).unwrap();
        d.service(Tick(0));

        // Head abandons mid-service.
        let returned = d.leave(CustomerId(1));
        assert_eq!(returned.len(), 2);
        assert!(!d.is_serving());
        assert!(d.at_head(CustomerId(2)));
        assert_eq!(d.position_of(CustomerId(1)), None);
    }

    #[test]
    fn leaving_with_an_uncollected_receipt_returns_those_items_too() {
        let mut desks = Checkouts::new();
        let desk = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d = desks.get_mut(desk).unwrap();
        d.join(CustomerId(1));
        d.place_items(CustomerId(1), claimed_pair(CustomerId(1))).unwrap();
        d.service(Tick(0));
        d.service(Tick(9));

        let returned = d.leave(CustomerId(1));
        assert_eq!(returned.len(), 2);
        assert!(d.take_receipt(CustomerId(1)).is_none());
    }

    #[test]
    fn shortest_queue_breaks_ties_by_desk_id() {
        let mut desks = Checkouts::new();
        let d0 = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d1 = desks.add_desk(Point3::on_floor(7.0, 1.0), RATE);

        assert_eq!(desks.shortest_queue(), Some(d0));
        desks.get_mut(d0).unwrap().join(CustomerId(1));
        assert_eq!(desks.shortest_queue(), Some(d1));
        desks.get_mut(d1).unwrap().join(CustomerId(2));
        assert_eq!(desks.shortest_queue(), Some(d0));

        assert_eq!(desks.total_queued(), 2);
        assert_eq!(Checkouts::new().shortest_queue(), None);
    }

    #[test]
    fn service_all_reports_completions_in_desk_order() {
        let mut desks = Checkouts::new();
        let d0 = desks.add_desk(Point3::on_floor(5.0, 1.0), RATE);
        let d1 = desks.add_desk(Point3::on_floor(7.0, 1.0), RATE);
        desks.get_mut(d0).unwrap().join(CustomerId(1));
        desks.get_mut(d1).unwrap().join(CustomerId(2));
        desks
            .get_mut(d0)
            .unwrap()
            .place_items(CustomerId(1), claimed_pair(CustomerId(1)))
            .unwrap();
        desks
            .get_mut(d1)
            .unwrap()
            .place_items(CustomerId(2), claimed_pair(CustomerId(2)))
            .unwrap();

        desks.service_all(Tick(0));
        assert_eq!(
            desks.service_all(Tick(9)),
            vec![CustomerId(1), CustomerId(2)]
        );
    }
}

mod status {
    use crate::store::{FloorPlan, StoreStatus};
    use patron_core::Point3;

    #[test]
    fn flags_latch_in_order() {
        let mut status = StoreStatus::open();
        assert!(status.is_open());
        assert!(!status.is_closing_soon());

        status.announce_closing();
        assert!(status.is_open());
        assert!(status.is_closing_soon());

        status.close();
        assert!(!status.is_open());
        assert!(status.is_closing_soon());
    }

    #[test]
    fn display_tracks_the_day() {
        let mut status = StoreStatus::open();
        assert_eq!(status.to_string(), "open");
        status.announce_closing();
        assert_eq!(status.to_string(), "closing soon");
        status.close();
        assert_eq!(status.to_string(), "closed");
    }

    #[test]
    fn floor_plan_waypoint_is_optional() {
        let plan = FloorPlan::new(Point3::on_floor(0.5, 0.5), Point3::on_floor(0.5, 1.5));
        assert!(plan.entry_waypoint.is_none());

        let plan = plan.with_entry_waypoint(Point3::on_floor(2.0, 2.0));
        assert_eq!(plan.entry_waypoint.map(|p| p.x), Some(2.0));
    }
}
