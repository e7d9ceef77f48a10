//! openday — one simulated day in a tabletop wargaming shop.
//!
//! Builds a small shop floor from ASCII art, stocks its shelves from an
//! embedded catalog, opens the doors for a simulated hour and lets the
//! customer lifecycle do the rest. Transactions and trouble are printed
//! as they happen; the full event log lands as CSV under
//! `output/openday/`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use patron_core::{ProductId, Tick};
use patron_customer::CustomerEvent;
use patron_nav::GridSurface;
use patron_output::{CsvWriter, OutputWriter, SimOutputObserver};
use patron_shop::{load_catalog_reader, FloorPlan, Inventory};
use patron_sim::{DaySummary, SimBuilder, SimConfig, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const OPEN_SECS: f32 = 3_600.0; // one shop hour
const WARNING_SECS: f32 = 300.0; // "we close in five minutes!"
const OUT_DIR: &str = "output/openday";

// ── Floor plan ────────────────────────────────────────────────────────────────

// 22×11 shop. Legend: '#' wall, '.' floor, '1'-'8' shelf slots, 'K'
// checkout desks, 'E' entrance, 'W' door waypoint, 'X' exit. The small
// island in the middle is a display table customers must walk around.
const FLOOR: &str = "\
######################
#....................#
#.1...2...3...4......#
#....................#
#......####..........#
#.5...6....7...8.....#
#....................#
#..K....K............#
#....................#
#E.W................X#
######################";

// ── Catalog ───────────────────────────────────────────────────────────────────

const CATALOG_CSV: &str = "\
product_id,name,price_cents,kind
0,Skirmish Starter Set,4999,miniature
1,Chaos Black Primer,650,paint
2,Core Rulebook 4th Ed.,3500,rulebook
3,D6 Dice Brick (36),1800,dice
4,Ruined Chapel,2700,terrain
5,Crimson Lance Squad,2250,miniature
6,Verdant Flock Bag,950,scenery
7,Sector Gamma Tiles,3150,terrain
";

// ── Observer: print the interesting bits, write everything ───────────────────

struct TillsideObserver<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    event_rows: usize,
    summary_rows: usize,
}

impl<W: OutputWriter> TillsideObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, event_rows: 0, summary_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for TillsideObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_event(&mut self, tick: Tick, event: &CustomerEvent) {
        match event {
            CustomerEvent::Purchased { .. }
            | CustomerEvent::CheckoutSkipped { .. }
            | CustomerEvent::CheckoutTimedOut { .. }
            | CustomerEvent::MovementFailed { .. }
            | CustomerEvent::Stranded { .. } => {
                println!("[t{:>6}] {}: {}", tick.0, event.customer(), event);
            }
            _ => {}
        }
        self.event_rows += 1;
        self.inner.on_event(tick, event);
    }

    fn on_tick_end(&mut self, tick: Tick, active: usize) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, active);
    }

    fn on_sim_end(&mut self, final_tick: Tick, summary: &DaySummary) {
        self.inner.on_sim_end(final_tick, summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== openday — one day in a wargaming shop ===");
    println!("Seed: {SEED}  |  Doors open: {OPEN_SECS:.0} s simulated");
    println!();

    // 1. Parse the floor and find its markers.
    let (surface, markers) = GridSurface::parse(FLOOR, 1.0).context("parse floor plan")?;
    let floor = FloorPlan::new(
        markers.one('E').context("floor plan needs an entrance 'E'")?,
        markers.one('X').context("floor plan needs an exit 'X'")?,
    )
    .with_entry_waypoint(markers.one('W').context("floor plan needs a door waypoint 'W'")?);

    // 2. Load the embedded catalog and stock the shelves, cycling through
    //    the SKUs in marker order.
    let catalog =
        load_catalog_reader(CATALOG_CSV.as_bytes()).context("parse embedded catalog")?;
    let mut inventory = Inventory::new();
    let mut stocked = 0;
    for (i, marker) in ('1'..='8').enumerate() {
        let Some(position) = markers.one(marker) else { continue };
        let shelf = inventory.add_shelf(position);
        let product = catalog
            .get(ProductId((i % catalog.len()) as u16))
            .context("catalog is empty")?;
        inventory.stock(shelf, product)?;
        stocked += 1;
    }
    let desks = markers.all('K').to_vec();
    println!("Stocked {stocked} shelves from {} SKUs; {} tills", catalog.len(), desks.len());

    // 3. Configure and build the sim.
    let config = SimConfig {
        seed: SEED,
        open_secs: OPEN_SECS,
        closing_warning_secs: WARNING_SECS,
        ..SimConfig::default()
    };
    let mut sim = SimBuilder::new(config, surface, floor)
        .inventory(inventory)
        .desks(desks)
        .build()?;

    // 4. Write the event log as CSV.
    std::fs::create_dir_all(OUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUT_DIR))?;
    let mut obs = TillsideObserver::new(SimOutputObserver::new(writer));

    // 5. Run the day.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Closing summary.
    println!();
    println!(
        "Doors closed; floor drained after {} ticks ({:.3} s real time)",
        summary.final_tick.0,
        elapsed.as_secs_f64()
    );
    println!();
    println!("Day summary");
    println!("{}", "-".repeat(28));
    println!("{:<18} {:>8}", "came in", summary.spawned);
    println!("{:<18} {:>8}", "bought something", summary.served);
    println!("{:<18} {:>8}", "left empty-handed", summary.left_empty);
    println!("{:<18} {:>8}", "till walkouts", summary.timeouts);
    println!("{:<18} {:>8}", "stranded", summary.stranded);
    println!("{:<18} {:>8}", "items sold", summary.items_sold);
    println!("{:<18} {:>8}", "revenue", summary.revenue.to_string());
    println!();
    println!("Wrote {OUT_DIR}/");
    println!("  customer_events.csv : {} rows", obs.event_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);

    Ok(())
}
