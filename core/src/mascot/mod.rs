//! Mascot State
//!
//! The dashboard mascot is a small animated companion that reacts to content
//! generation, post outcomes and direct pointer interaction. This module owns
//! the state it shows; rendering is left entirely to the surface.
//!
//! # Module Structure
//!
//! - [`controller`]: The mood state machine and its timers
//! - [`particles`]: Short-lived decorative particle bursts
//! - [`phrases`]: Fixed message sets shown in the activity bubble
//!
//! # Lifecycle
//!
//! State is created fresh for each mascot instance and never persisted.
//! Dropping the controller drops everything, including pending timers.

pub mod controller;
pub mod particles;
pub mod phrases;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{Icon, MotionProfile};

pub use controller::MascotController;
pub use particles::{Particle, ParticleBurst, PARTICLE_BURST_SIZE};

/// Coarse animation/emotional state that drives icon and motion selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Resting baseline
    #[default]
    Idle,
    /// Content generation in progress
    Working,
    /// Post went out or the mascot was clicked
    Celebrating,
    /// Pondering
    Thinking,
    /// Post failed
    Error,
    /// Dozing
    Sleeping,
    /// Hovered (classic variant)
    Active,
    /// Generic success
    Success,
    /// Generic failure
    Failure,
    /// Hovered (enhanced variant)
    Excited,
    /// Concentrating
    Focused,
}

impl Mood {
    /// Every mood tag, in declaration order
    pub const ALL: [Mood; 11] = [
        Mood::Idle,
        Mood::Working,
        Mood::Celebrating,
        Mood::Thinking,
        Mood::Error,
        Mood::Sleeping,
        Mood::Active,
        Mood::Success,
        Mood::Failure,
        Mood::Excited,
        Mood::Focused,
    ];

    /// Lowercase tag name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Celebrating => "celebrating",
            Self::Thinking => "thinking",
            Self::Error => "error",
            Self::Sleeping => "sleeping",
            Self::Active => "active",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Excited => "excited",
            Self::Focused => "focused",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Secondary descriptive tag, always set together with [`Mood`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// Baseline
    #[default]
    Happy,
    /// Heads down
    Focused,
    /// Clicked
    Excited,
    /// Something went wrong
    Concerned,
    /// Being hovered
    Mischievous,
    /// Post went out
    Success,
    /// Generic failure
    Failure,
    /// Affectionate
    Loving,
    /// Determined
    Determined,
}

impl Expression {
    /// Lowercase tag name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Focused => "focused",
            Self::Excited => "excited",
            Self::Concerned => "concerned",
            Self::Mischievous => "mischievous",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Loving => "loving",
            Self::Determined => "determined",
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mascot flavour
///
/// The two variants differ only in hover mood, greeting and how long a click
/// celebration lasts before settling back to idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Simple mascot: `active` on hover, fixed greeting
    Classic,
    /// Richer mascot: `excited` on hover, level-aware greeting
    #[default]
    Enhanced,
}

impl Variant {
    /// Mood entered on pointer enter
    #[must_use]
    pub fn hover_mood(self) -> Mood {
        match self {
            Self::Classic => Mood::Active,
            Self::Enhanced => Mood::Excited,
        }
    }

    /// Default delay between a click and the automatic return to idle
    #[must_use]
    pub fn default_click_reset(self) -> Duration {
        match self {
            Self::Classic => Duration::from_millis(3000),
            Self::Enhanced => Duration::from_millis(4000),
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(format!("unknown mascot variant '{other}'")),
        }
    }
}

/// Timer durations used by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MascotTimings {
    /// Click celebration length before returning to idle
    pub click_reset: Duration,
    /// How long a particle burst stays on screen
    pub particle_clear: Duration,
}

impl MascotTimings {
    /// Default particle display time
    pub const PARTICLE_CLEAR: Duration = Duration::from_millis(2000);

    /// Defaults for a variant
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            click_reset: variant.default_click_reset(),
            particle_clear: Self::PARTICLE_CLEAR,
        }
    }
}

impl Default for MascotTimings {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

/// Everything the mascot currently shows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MascotState {
    /// Current mood
    pub mood: Mood,
    /// Current expression
    pub expression: Expression,
    /// Activity bubble text, empty when nothing is being said
    pub activity: String,
    /// Positive interaction count, never decreases
    pub streak: u32,
    /// Creator level, fixed for the lifetime of the mascot
    pub level: u8,
    /// Live particles from the latest burst
    pub particles: Vec<Particle>,
    /// Whether the hover tooltip is showing
    pub tooltip_visible: bool,
}

impl MascotState {
    /// Fresh state at mount time
    #[must_use]
    pub fn new(streak: u32, level: u8) -> Self {
        Self {
            mood: Mood::Idle,
            expression: Expression::Happy,
            activity: String::new(),
            streak,
            level,
            particles: Vec::new(),
            tooltip_visible: false,
        }
    }

    /// Set mood, expression and activity in one step
    pub(crate) fn show(&mut self, mood: Mood, expression: Expression, activity: impl Into<String>) {
        self.mood = mood;
        self.expression = expression;
        self.activity = activity.into();
    }

    /// Back to the idle baseline
    pub(crate) fn settle(&mut self) {
        self.show(Mood::Idle, Expression::Happy, String::new());
    }
}

/// Renderer-facing snapshot: state plus everything derived from mood
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MascotView {
    /// Current mood
    pub mood: Mood,
    /// Current expression
    pub expression: Expression,
    /// Activity bubble text (empty = hidden)
    pub activity: String,
    /// Streak counter
    pub streak: u32,
    /// Creator level
    pub level: u8,
    /// Glyph to draw
    pub icon: Icon,
    /// Motion to play for the current mood
    pub motion: MotionProfile,
    /// Live particles
    pub particles: Vec<Particle>,
    /// Tooltip text while hovered
    pub tooltip: Option<String>,
    /// Bumped whenever mood changes, so renderers can restart motion
    pub mood_epoch: u64,
}

impl MascotView {
    /// Derive the view from state
    #[must_use]
    pub fn from_state(state: &MascotState, mood_epoch: u64) -> Self {
        Self {
            mood: state.mood,
            expression: state.expression,
            activity: state.activity.clone(),
            streak: state.streak,
            level: state.level,
            icon: Icon::for_mood(state.mood),
            motion: MotionProfile::for_mood(state.mood),
            particles: state.particles.clone(),
            tooltip: state
                .tooltip_visible
                .then(|| phrases::tooltip(state.level, state.streak)),
            mood_epoch,
        }
    }

    /// Whether the activity bubble should be drawn
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !self.activity.is_empty()
    }
}
