//! The `OutputWriter` trait implemented by all backend writers.

use crate::{CustomerEventRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Backends may buffer internally; only [`finish`][OutputWriter::finish]
/// guarantees everything written so far is durable. From the observer's
/// perspective all methods are infallible — errors are stored and
/// retrieved with [`SimOutputObserver::take_error`][te] after the run.
///
/// [te]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one customer event row.
    fn write_event(&mut self, row: &CustomerEventRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
