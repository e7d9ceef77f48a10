//! The movement coordinator: one actor's destination, progress, and
//! recovery policy.

use patron_core::{CustomerRng, Point3, Tick};
use patron_nav::{NavPath, NavSurface};

use crate::{MovementConfig, StuckMonitor};

// ── Status ────────────────────────────────────────────────────────────────────

/// What one movement tick produced.  `Arrived` and `Failed` are
/// edge-triggered: reported exactly once, after which the coordinator is
/// `Idle` until the next destination.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MovementStatus {
    /// No destination.
    Idle,
    /// Walking, waiting out a retry delay, or mid-recovery.
    Moving,
    /// Reached the effective destination this tick.
    Arrived,
    /// Recovery ladder exhausted this tick; the destination is abandoned.
    Failed,
}

// ── Internal destination state ────────────────────────────────────────────────

#[derive(Debug)]
enum Progress {
    /// Walking a computed polyline; `next` indexes the upcoming waypoint.
    Following { path: NavPath, next: usize },
    /// No usable path right now — the recovery ladder owns the next step.
    Recovering,
}

#[derive(Debug)]
struct ActiveDestination {
    /// What the caller asked for.
    requested: Point3,
    /// Nearest walkable point to the request; where we actually walk.
    effective: Point3,
    progress: Progress,
}

// ── MovementCoordinator ───────────────────────────────────────────────────────

/// Owns an actor's position and destination, and walks the actor there one
/// tick at a time.
///
/// See the crate docs for the movement model; in short: continuous
/// stepping, dual-threshold arrival, stuck detection, and a bounded
/// offset-then-retry recovery ladder.
#[derive(Debug)]
pub struct MovementCoordinator {
    config: MovementConfig,
    position: Point3,
    dest: Option<ActiveDestination>,
    stuck: StuckMonitor,
    /// Tick at which the next full retry may run, if one is scheduled.
    retry_pending: Option<Tick>,
    /// Failed full retries so far for the current destination.
    retries_used: u32,
    /// Latched by arrival; cleared by the next destination or `stop`.
    reached: bool,
}

impl MovementCoordinator {
    pub fn new(config: MovementConfig, at: Point3) -> Self {
        let epsilon = config.stuck_epsilon;
        Self {
            config,
            position: at,
            dest: None,
            stuck: StuckMonitor::new(at, Tick::ZERO, epsilon),
            retry_pending: None,
            retries_used: 0,
            reached: false,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// The effective (surface-sampled) destination, if one is active.
    pub fn destination(&self) -> Option<Point3> {
        self.dest.as_ref().map(|d| d.effective)
    }

    /// The destination exactly as the caller requested it.
    pub fn requested_destination(&self) -> Option<Point3> {
        self.dest.as_ref().map(|d| d.requested)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.dest.is_some()
    }

    /// `true` from the moment of arrival until the next destination or an
    /// explicit `stop`.
    #[inline]
    pub fn has_reached_destination(&self) -> bool {
        self.reached
    }

    #[inline]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Drop the actor at `at` with no destination (spawn placement).
    pub fn place(&mut self, at: Point3, now: Tick) {
        self.position = at;
        self.dest = None;
        self.retry_pending = None;
        self.retries_used = 0;
        self.reached = false;
        self.stuck.reset(at, now);
    }

    /// Aim at `requested`.  Returns `false` — with no state change — only
    /// when no walkable point exists within `sample_radius` of the request.
    ///
    /// An on-surface point that currently accepts no path is *accepted*:
    /// the recovery ladder (offsets, delayed retries) gets its chance
    /// before the coordinator reports a permanent failure.
    pub fn set_destination<S: NavSurface>(
        &mut self,
        requested: Point3,
        surface: &S,
        now: Tick,
    ) -> bool {
        let Some(effective) = surface.sample(requested, self.config.sample_radius) else {
            return false;
        };

        let progress = match surface.find_path(self.position, effective) {
            Ok(path) => Progress::Following { path, next: 0 },
            Err(_) => Progress::Recovering,
        };
        self.dest = Some(ActiveDestination { requested, effective, progress });
        self.retry_pending = None;
        self.retries_used = 0;
        self.reached = false;
        self.stuck.reset(self.position, now);
        true
    }

    /// Cancel the current destination, recovery state included.  An
    /// already-latched arrival stays latched.
    pub fn stop(&mut self) {
        if self.dest.take().is_some() {
            self.reached = false;
        }
        self.retry_pending = None;
        self.retries_used = 0;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick of `dt_secs` simulated seconds.
    pub fn tick<S: NavSurface>(
        &mut self,
        now: Tick,
        dt_secs: f32,
        surface: &S,
        rng: &mut CustomerRng,
    ) -> MovementStatus {
        let Some(mut dest) = self.dest.take() else {
            return MovementStatus::Idle;
        };

        // Recovery ladder: delayed retry first, then an offset round.
        if matches!(dest.progress, Progress::Recovering) {
            if let Some(at) = self.retry_pending {
                if now < at {
                    self.dest = Some(dest);
                    return MovementStatus::Moving;
                }
                self.retry_pending = None;
                match surface.find_path(self.position, dest.effective) {
                    Ok(path) => {
                        dest.progress = Progress::Following { path, next: 0 };
                        self.stuck.reset(self.position, now);
                    }
                    Err(_) => {
                        self.retries_used += 1;
                        if self.retries_used >= self.config.max_retries {
                            // Ladder exhausted; destination abandoned.
                            return MovementStatus::Failed;
                        }
                    }
                }
            }

            if matches!(dest.progress, Progress::Recovering) {
                match self.try_offsets(dest.requested, surface, rng) {
                    Some((effective, path)) => {
                        dest.effective = effective;
                        dest.progress = Progress::Following { path, next: 0 };
                        self.stuck.reset(self.position, now);
                    }
                    None => {
                        self.retry_pending = Some(now + self.retry_ticks(dt_secs));
                        self.dest = Some(dest);
                        return MovementStatus::Moving;
                    }
                }
            }
        }

        // Walk the polyline.
        if let Progress::Following { path, next } = &mut dest.progress {
            let mut step = self.config.speed * dt_secs;
            while step > 1e-6 {
                let Some(&wp) = path.waypoints().get(*next) else {
                    break;
                };
                let gap = self.position.planar_distance(wp);
                if gap <= step {
                    self.position = wp;
                    step -= gap;
                    *next += 1;
                } else {
                    self.position = self.position.step_towards(wp, step);
                    break;
                }
            }

            let remaining = path.remaining_from(self.position, *next);
            let close_enough = remaining <= self.config.stopping_distance
                || self.position.planar_distance(dest.effective) <= self.config.arrive_radius;
            if close_enough {
                self.reached = true;
                return MovementStatus::Arrived; // dest dropped
            }

            if self.stuck.observe(self.position, now, self.dwell_ticks(dt_secs)) {
                dest.progress = Progress::Recovering;
            }
        }

        self.dest = Some(dest);
        MovementStatus::Moving
    }

    // ── Recovery internals ────────────────────────────────────────────────

    /// One offset round: up to `offset_attempts` random points in a disc
    /// around the original goal; the first that samples onto the surface
    /// *and* accepts a path wins.
    fn try_offsets<S: NavSurface>(
        &self,
        goal: Point3,
        surface: &S,
        rng: &mut CustomerRng,
    ) -> Option<(Point3, NavPath)> {
        for _ in 0..self.config.offset_attempts {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            // sqrt keeps the candidates uniform over the disc area.
            let radius = self.config.offset_radius * rng.gen_range(0.0f32..1.0).sqrt();
            let candidate = goal.offset_xz(radius * angle.cos(), radius * angle.sin());

            let Some(effective) = surface.sample(candidate, self.config.sample_radius) else {
                continue;
            };
            if let Ok(path) = surface.find_path(self.position, effective) {
                return Some((effective, path));
            }
        }
        None
    }

    fn dwell_ticks(&self, dt_secs: f32) -> u64 {
        secs_to_ticks(self.config.stuck_dwell_secs, dt_secs)
    }

    fn retry_ticks(&self, dt_secs: f32) -> u64 {
        secs_to_ticks(self.config.retry_delay_secs, dt_secs)
    }
}

/// Ceiling conversion; a positive duration always costs at least one tick.
fn secs_to_ticks(secs: f32, dt_secs: f32) -> u64 {
    ((secs / dt_secs).ceil() as u64).max(1)
}
