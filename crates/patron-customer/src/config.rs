//! Tunables for shopping and checkout behavior.

/// Behavior knobs shared by every customer. Personality multipliers
/// ([`crate::Personality`]) scale these per customer; the config itself is
/// one struct for the whole run.
///
/// All durations are simulated seconds. They are converted to tick counts
/// through the clock at the point of use, so the same config behaves
/// identically at any tick resolution.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorConfig {
    /// Minimum time on the shop floor before a customer will even consider
    /// declaring themselves done browsing.
    pub min_browse_secs: f32,

    /// Hard cap on browsing. A customer who has not hit their item target
    /// by now leaves with whatever is in the cart, so a picky customer
    /// cannot wander the aisles until closing time.
    pub max_browse_secs: f32,

    /// Time spent standing at a shelf deciding whether to buy.
    pub shelf_dwell_secs: f32,

    /// Inclusive range for the per-customer item target, drawn at the
    /// start of browsing.
    pub items_target_min: u32,
    pub items_target_max: u32,

    /// Base probability of buying an examined, affordable item.
    pub buy_chance: f64,

    /// After each shelf visit with at least one item in the cart, the
    /// chance the customer decides what they have is good enough.
    pub good_enough_chance: f64,

    /// Base patience at the till: how long a customer whose items are on
    /// the counter will wait for the transaction to complete.
    pub checkout_timeout_secs: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            min_browse_secs: 5.0,
            max_browse_secs: 120.0,
            shelf_dwell_secs: 2.5,
            items_target_min: 1,
            items_target_max: 4,
            buy_chance: 0.55,
            good_enough_chance: 0.25,
            checkout_timeout_secs: 90.0,
        }
    }
}
