//! The four-phase lifecycle and its transition table.

use std::fmt;

use crate::events::LeaveReason;
use crate::purchasing::CheckoutBehavior;
use crate::shopping::ShoppingBehavior;

/// Fieldless view of the lifecycle, for logging, events and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Entering,
    Shopping,
    Purchasing,
    Leaving,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Entering => "entering",
            Phase::Shopping => "shopping",
            Phase::Purchasing => "purchasing",
            Phase::Leaving => "leaving",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full transition table. Everything not listed here is illegal, and
/// [`crate::Customer`] asserts against it in debug builds:
///
/// - Entering → Shopping
/// - Shopping → Purchasing
/// - Shopping → Leaving (empty cart, nothing affordable, store closing)
/// - Purchasing → Leaving (success and failure paths both converge here)
pub fn can_transition(from: Phase, to: Phase) -> bool {
    matches!(
        (from, to),
        (Phase::Entering, Phase::Shopping)
            | (Phase::Shopping, Phase::Purchasing)
            | (Phase::Shopping, Phase::Leaving)
            | (Phase::Purchasing, Phase::Leaving)
    )
}

/// Lifecycle state plus the per-state working data. The variant IS the
/// phase: entering a state constructs its data, leaving drops it, so
/// stale browse targets or queue tickets cannot leak across phases.
#[derive(Debug)]
pub(crate) enum CustomerState {
    Entering,
    Shopping(ShoppingBehavior),
    Purchasing(CheckoutBehavior),
    Leaving { reason: LeaveReason },
}

impl CustomerState {
    pub(crate) fn phase(&self) -> Phase {
        match self {
            CustomerState::Entering => Phase::Entering,
            CustomerState::Shopping(_) => Phase::Shopping,
            CustomerState::Purchasing(_) => Phase::Purchasing,
            CustomerState::Leaving { .. } => Phase::Leaving,
        }
    }
}
