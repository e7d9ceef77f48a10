//! Plain data row types written by output backends.

/// One customer event, flattened for tabular output.
///
/// Fields that do not apply to a given event kind hold sentinels: empty
/// strings for the phases, `u32::MAX` / `u16::MAX` for the shelf and desk
/// (matching the typed-id `INVALID` values), and `0` cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerEventRow {
    pub tick: u64,
    pub customer: u32,
    /// Stable snake_case event tag (`CustomerEvent::kind`).
    pub kind: &'static str,
    /// Phase names for `state_changed` rows.
    pub from_phase: &'static str,
    pub to_phase: &'static str,
    /// Shelf touched by the event; `u32::MAX` when none.
    pub shelf: u32,
    /// Desk touched by the event; `u16::MAX` when none.
    pub desk: u16,
    /// Cents moved by the event: the item price for claims, the
    /// transaction total for purchases, the money spent for departures.
    pub amount_cents: u32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick: u64,
    /// Customers on the floor at the end of the tick.
    pub active_customers: u32,
    /// Events emitted during the tick.
    pub events: u32,
}
