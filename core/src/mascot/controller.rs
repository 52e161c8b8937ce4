//! Mascot Controller
//!
//! The state machine that turns inputs into a coherent mascot snapshot.
//!
//! # Design
//!
//! The controller is pure and clock-driven: every call takes `now` instead of
//! reading the clock, and timers are plain deadlines checked by [`tick`].
//! An event loop asks [`next_deadline`] how long it may sleep. This keeps
//! transitions strictly serialized and makes timing fully testable.
//!
//! # Timers
//!
//! | Timer | Armed by | Fires after | Effect |
//! |-------|----------|-------------|--------|
//! | click reset | click | 3-4 s (variant) | back to idle |
//! | particle clear | success, click | 2 s | particles emptied |
//!
//! Each accepted input advances an epoch. The click reset remembers the epoch
//! it was armed in and is dropped at fire time if anything happened since,
//! so a stale timer can never stomp on a later state. The particle timer is
//! tied to the burst that armed it; a newer burst re-arms it.
//!
//! [`tick`]: MascotController::tick
//! [`next_deadline`]: MascotController::next_deadline

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::particles::ParticleBurst;
use super::phrases;
use super::{Expression, MascotState, MascotTimings, MascotView, Mood, Variant};
use crate::events::{MascotInput, SignalKind, SignalSet};

/// Range the starting streak is drawn from
const INITIAL_STREAK: std::ops::RangeInclusive<u32> = 1..=15;

/// Range the starting level is drawn from
const INITIAL_LEVEL: std::ops::RangeInclusive<u8> = 1..=5;

/// A pending timer
#[derive(Clone, Copy, Debug)]
struct Pending {
    due: Instant,
    /// Epoch (reset) or burst number (particles) that armed it
    token: u64,
}

/// Mood state machine for the dashboard mascot
#[derive(Debug)]
pub struct MascotController {
    variant: Variant,
    timings: MascotTimings,
    state: MascotState,
    /// Last external signal set seen (edge detection)
    signals: SignalSet,
    rng: StdRng,
    particles: ParticleBurst,
    /// Advanced by every accepted input
    epoch: u64,
    /// Advanced whenever the mood changes
    mood_epoch: u64,
    /// Advanced by every particle burst
    burst: u64,
    reset_timer: Option<Pending>,
    particle_timer: Option<Pending>,
}

impl MascotController {
    /// Create a controller with entropy-seeded randomness
    #[must_use]
    pub fn new(variant: Variant, timings: MascotTimings) -> Self {
        Self::with_rng(variant, timings, StdRng::from_entropy())
    }

    /// Create a controller with deterministic randomness
    #[must_use]
    pub fn with_seed(variant: Variant, timings: MascotTimings, seed: u64) -> Self {
        Self::with_rng(variant, timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(variant: Variant, timings: MascotTimings, mut rng: StdRng) -> Self {
        let streak = rng.gen_range(INITIAL_STREAK);
        let level = rng.gen_range(INITIAL_LEVEL);

        tracing::debug!(?variant, streak, level, "Mascot mounted");

        Self {
            variant,
            timings,
            state: MascotState::new(streak, level),
            signals: SignalSet::CLEAR,
            rng,
            particles: ParticleBurst::new(),
            epoch: 0,
            mood_epoch: 0,
            burst: 0,
            reset_timer: None,
            particle_timer: None,
        }
    }

    /// Apply one input
    ///
    /// Returns `true` if the input was applied. Only an unchanged or empty
    /// signal set is ignored.
    pub fn handle(&mut self, input: MascotInput, now: Instant) -> bool {
        let before_mood = self.state.mood;
        let changed = match input {
            MascotInput::Signals(signals) => self.on_signals(signals, now),
            MascotInput::PointerEnter => {
                self.on_pointer_enter();
                true
            }
            MascotInput::PointerLeave => {
                self.on_pointer_leave();
                true
            }
            MascotInput::Click => {
                self.on_click(now);
                true
            }
        };

        if changed {
            self.epoch += 1;
            if self.state.mood != before_mood {
                self.mood_epoch += 1;
            }
            tracing::debug!(
                ?input,
                mood = %self.state.mood,
                expression = %self.state.expression,
                streak = self.state.streak,
                "Mascot transition"
            );
        }

        changed
    }

    /// Fire every timer that is due at `now`
    ///
    /// Returns `true` if anything observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(timer) = self.particle_timer {
            if timer.due <= now {
                self.particle_timer = None;
                if timer.token == self.burst && !self.state.particles.is_empty() {
                    self.state.particles.clear();
                    changed = true;
                }
            }
        }

        if let Some(timer) = self.reset_timer {
            if timer.due <= now {
                self.reset_timer = None;
                if timer.token == self.epoch {
                    let before_mood = self.state.mood;
                    self.state.settle();
                    self.state.tooltip_visible = false;
                    if before_mood != Mood::Idle {
                        self.mood_epoch += 1;
                    }
                    changed = true;
                    tracing::debug!("Mascot click celebration settled");
                } else {
                    tracing::trace!(
                        armed = timer.token,
                        current = self.epoch,
                        "Discarding stale reset timer"
                    );
                }
            }
        }

        changed
    }

    /// Earliest pending timer deadline, if any
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.reset_timer, self.particle_timer) {
            (Some(a), Some(b)) => Some(a.due.min(b.due)),
            (Some(t), None) | (None, Some(t)) => Some(t.due),
            (None, None) => None,
        }
    }

    /// Current raw state
    #[must_use]
    pub fn state(&self) -> &MascotState {
        &self.state
    }

    /// Renderer snapshot
    #[must_use]
    pub fn view(&self) -> MascotView {
        MascotView::from_state(&self.state, self.mood_epoch)
    }

    /// Configured variant
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Configured timings
    #[must_use]
    pub fn timings(&self) -> MascotTimings {
        self.timings
    }

    /// Last external signal set received
    #[must_use]
    pub fn signals(&self) -> SignalSet {
        self.signals
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn on_signals(&mut self, signals: SignalSet, now: Instant) -> bool {
        if signals == self.signals {
            return false;
        }
        self.signals = signals;

        match signals.resolve() {
            Some(SignalKind::Generating) => {
                self.state
                    .show(Mood::Working, Expression::Focused, phrases::GENERATING);
            }
            Some(SignalKind::PostSuccess) => {
                let message = phrases::pick(&phrases::MOTIVATIONAL, &mut self.rng);
                self.state
                    .show(Mood::Celebrating, Expression::Success, message);
                self.state.streak = self.state.streak.saturating_add(1);
                self.burst_particles(now);
            }
            Some(SignalKind::PostFailure) => {
                let message = phrases::pick(&phrases::ENCOURAGING, &mut self.rng);
                self.state.show(Mood::Error, Expression::Concerned, message);
            }
            None => return false,
        }

        true
    }

    fn on_pointer_enter(&mut self) {
        let greeting = match self.variant {
            Variant::Classic => phrases::CLASSIC_GREETING.to_string(),
            Variant::Enhanced => phrases::level_greeting(self.state.level),
        };
        self.state
            .show(self.variant.hover_mood(), Expression::Mischievous, greeting);
        self.state.tooltip_visible = true;
    }

    fn on_pointer_leave(&mut self) {
        self.state.settle();
        self.state.tooltip_visible = false;
    }

    fn on_click(&mut self, now: Instant) {
        let cheer = phrases::streak_cheer(self.state.streak);
        self.state.show(Mood::Celebrating, Expression::Excited, cheer);
        self.state.streak = self.state.streak.saturating_add(1);
        self.burst_particles(now);

        // Armed with the epoch this click is about to become
        self.reset_timer = Some(Pending {
            due: now + self.timings.click_reset,
            token: self.epoch + 1,
        });
    }

    fn burst_particles(&mut self, now: Instant) {
        self.burst += 1;
        self.state.particles = self.particles.emit(&mut self.rng);
        self.particle_timer = Some(Pending {
            due: now + self.timings.particle_clear,
            token: self.burst,
        });
    }
}
