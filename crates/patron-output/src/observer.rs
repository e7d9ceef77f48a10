//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use patron_core::{DeskId, ShelfId, Tick};
use patron_customer::CustomerEvent;
use patron_sim::{DaySummary, SimObserver};

use crate::row::{CustomerEventRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes customer events and tick summaries to any
/// [`OutputWriter`] backend (CSV, SQLite).
///
/// Errors from the writer are stored internally because observer methods
/// have no return value. After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    events_this_tick: u32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, events_this_tick: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// Flatten one event into a row, filling sentinels for the fields the
/// event kind does not carry.
fn event_row(tick: Tick, event: &CustomerEvent) -> CustomerEventRow {
    let mut row = CustomerEventRow {
        tick: tick.0,
        customer: event.customer().0,
        kind: event.kind(),
        from_phase: "",
        to_phase: "",
        shelf: ShelfId::INVALID.0,
        desk: DeskId::INVALID.0,
        amount_cents: 0,
    };
    match event {
        CustomerEvent::StateChanged { from, to, .. } => {
            row.from_phase = from.name();
            row.to_phase = to.name();
        }
        CustomerEvent::ItemClaimed { price, shelf, .. } => {
            row.shelf = shelf.0;
            row.amount_cents = price.0;
        }
        CustomerEvent::Purchased { receipt, .. } => {
            row.desk = receipt.desk.0;
            row.amount_cents = receipt.total.0;
        }
        CustomerEvent::CheckoutTimedOut { desk, .. } => row.desk = desk.0,
        CustomerEvent::CheckoutSkipped { total, .. } => row.amount_cents = total.0,
        CustomerEvent::Departed { spent, .. } => row.amount_cents = spent.0,
        CustomerEvent::MovementFailed { .. } | CustomerEvent::Stranded { .. } => {}
    }
    row
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.events_this_tick = 0;
    }

    fn on_event(&mut self, tick: Tick, event: &CustomerEvent) {
        self.events_this_tick += 1;
        let row = event_row(tick, event);
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, active: usize) {
        let row = TickSummaryRow {
            tick: tick.0,
            active_customers: active as u32,
            events: self.events_this_tick,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &DaySummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
