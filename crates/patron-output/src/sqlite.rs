//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory
//! with two tables: `customer_events` and `tick_summaries`. Event rows
//! are buffered and inserted one transaction per tick, flushed by the
//! summary write that closes each tick (and again by `finish`).

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CustomerEventRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
    pending: Vec<CustomerEventRow>,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS customer_events (
                 tick         INTEGER NOT NULL,
                 customer     INTEGER NOT NULL,
                 kind         TEXT    NOT NULL,
                 from_phase   TEXT    NOT NULL,
                 to_phase     TEXT    NOT NULL,
                 shelf        INTEGER NOT NULL,
                 desk         INTEGER NOT NULL,
                 amount_cents INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick             INTEGER PRIMARY KEY,
                 active_customers INTEGER NOT NULL,
                 events           INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, pending: Vec::new(), finished: false })
    }

    /// Insert every buffered event row inside one transaction.
    fn flush_events(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO customer_events \
                 (tick, customer, kind, from_phase, to_phase, shelf, desk, amount_cents) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for row in &self.pending {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.customer,
                    row.kind,
                    row.from_phase,
                    row.to_phase,
                    row.shelf,
                    row.desk,
                    row.amount_cents,
                ])?;
            }
        }
        tx.commit()?;
        self.pending.clear();
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_event(&mut self, row: &CustomerEventRow) -> OutputResult<()> {
        self.pending.push(*row);
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.flush_events()?;
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, active_customers, events) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.tick, row.active_customers, row.events],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush_events()?;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
