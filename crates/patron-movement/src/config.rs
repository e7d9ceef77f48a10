//! Movement tuning knobs.

/// Per-actor movement parameters.
///
/// Distances are planar metres, durations are simulated seconds (converted
/// to ticks at use sites).  The defaults describe an unhurried adult
/// walking an aisle.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementConfig {
    /// Walking speed, m/s.
    pub speed: f32,

    /// Path-following arrival threshold: remaining path distance at or
    /// below this counts as arrived.
    pub stopping_distance: f32,

    /// Straight-line arrival threshold, strictly larger than
    /// `stopping_distance`: close enough to the effective destination
    /// counts as arrived even if the path cursor disagrees.
    pub arrive_radius: f32,

    /// How far a requested destination may sit from the walkable surface
    /// and still be accepted (sampled to the nearest walkable point).
    pub sample_radius: f32,

    /// Net displacement below this over the dwell window means "stuck".
    pub stuck_epsilon: f32,

    /// How long near-zero displacement must persist before recovery starts.
    pub stuck_dwell_secs: f32,

    /// Randomized nearby goals tried per recovery round.
    pub offset_attempts: u32,

    /// Radius of the disc the offset candidates are drawn from.
    pub offset_radius: f32,

    /// Pause before a full retry of the original destination.
    pub retry_delay_secs: f32,

    /// Failed full retries tolerated before the destination is abandoned
    /// with a permanent failure.
    pub max_retries: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 1.3,
            stopping_distance: 0.2,
            arrive_radius: 0.5,
            sample_radius: 1.5,
            stuck_epsilon: 0.05,
            stuck_dwell_secs: 1.5,
            offset_attempts: 8,
            offset_radius: 1.2,
            retry_delay_secs: 2.0,
            max_retries: 3,
        }
    }
}
