//! Store-level facts every customer can see: opening state and the floor
//! plan's fixed points.

use std::fmt;

use patron_core::Point3;

/// Whether the shop is taking customers, and whether closing time is near.
///
/// Flags only move one way over a day: `closing_soon` latches on at the
/// warning, `open` latches off at close. Customer behavior reads these
/// every tick and winds itself down cooperatively — nothing is despawned
/// by force at closing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatus {
    open: bool,
    closing_soon: bool,
}

impl StoreStatus {
    /// Doors open, no closing warning yet.
    pub fn open() -> Self {
        StoreStatus { open: true, closing_soon: false }
    }

    /// Latch the closing warning. Shoppers finish up; no new arrivals.
    pub fn announce_closing(&mut self) {
        self.closing_soon = true;
    }

    /// Latch the doors shut. Implies the closing warning.
    pub fn close(&mut self) {
        self.open = false;
        self.closing_soon = true;
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn is_closing_soon(&self) -> bool {
        self.closing_soon
    }
}

impl Default for StoreStatus {
    fn default() -> Self {
        StoreStatus::open()
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = if !self.open {
            "closed"
        } else if self.closing_soon {
            "closing soon"
        } else {
            "open"
        };
        f.write_str(word)
    }
}

/// Where customers enter, pause, and leave.
///
/// `entry_waypoint` is an optional just-inside-the-door point customers
/// walk to before browsing, so arrivals don't start shopping from the
/// doormat. When `None`, arrivals go straight to browsing from `spawn`.
#[derive(Debug, Clone, Copy)]
pub struct FloorPlan {
    pub spawn: Point3,
    pub entry_waypoint: Option<Point3>,
    pub exit: Point3,
}

impl FloorPlan {
    pub fn new(spawn: Point3, exit: Point3) -> Self {
        FloorPlan { spawn, entry_waypoint: None, exit }
    }

    pub fn with_entry_waypoint(mut self, waypoint: Point3) -> Self {
        self.entry_waypoint = Some(waypoint);
        self
    }
}
