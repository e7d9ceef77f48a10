//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `customer_events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CustomerEventRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    events: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("customer_events.csv"))?;
        events.write_record([
            "tick",
            "customer",
            "kind",
            "from_phase",
            "to_phase",
            "shelf",
            "desk",
            "amount_cents",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "active_customers", "events"])?;

        Ok(Self { events, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &CustomerEventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.customer.to_string(),
            row.kind.to_string(),
            row.from_phase.to_string(),
            row.to_phase.to_string(),
            row.shelf.to_string(),
            row.desk.to_string(),
            row.amount_cents.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.active_customers.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
