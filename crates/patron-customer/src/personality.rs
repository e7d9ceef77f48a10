//! Per-customer personality multipliers.

use patron_core::SimRng;

/// How one customer deviates from the configured baseline.
///
/// All fields are multipliers around 1.0 applied to [`crate::BehaviorConfig`]
/// values (and, for `speed_mul`, to the movement config's walk speed). A
/// personality is sampled once at spawn and never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Personality {
    /// Walk speed multiplier.
    pub speed_mul: f32,
    /// Scales browse and shelf-dwell durations. Above 1.0 lingers.
    pub browse_mul: f32,
    /// Scales the base buy probability. Above 1.0 is an impulse buyer.
    pub buy_mul: f64,
    /// Scales the checkout timeout. Above 1.0 queues patiently.
    pub patience_mul: f32,
}

impl Default for Personality {
    /// The neutral personality: every multiplier 1.0.
    fn default() -> Self {
        Personality { speed_mul: 1.0, browse_mul: 1.0, buy_mul: 1.0, patience_mul: 1.0 }
    }
}

/// Uniform sampling ranges for [`Personality`] fields, drawn by the
/// orchestrator at spawn time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonalityRanges {
    pub speed: (f32, f32),
    pub browse: (f32, f32),
    pub buy: (f64, f64),
    pub patience: (f32, f32),
}

impl Default for PersonalityRanges {
    fn default() -> Self {
        PersonalityRanges {
            speed: (0.8, 1.25),
            browse: (0.6, 1.6),
            buy: (0.7, 1.4),
            patience: (0.5, 1.8),
        }
    }
}

impl PersonalityRanges {
    /// Draw one personality. Degenerate ranges (lo == hi) are allowed and
    /// produce that exact value.
    pub fn sample(&self, rng: &mut SimRng) -> Personality {
        Personality {
            speed_mul: rng.gen_range(self.speed.0..=self.speed.1),
            browse_mul: rng.gen_range(self.browse.0..=self.browse.1),
            buy_mul: rng.gen_range(self.buy.0..=self.buy.1),
            patience_mul: rng.gen_range(self.patience.0..=self.patience.1),
        }
    }
}
