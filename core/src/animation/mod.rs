//! Derived Mascot View - Icon and Motion
//!
//! Both are pure functions of [`Mood`]. The core describes WHAT to show;
//! each surface decides HOW (terminal cells, SVG, CSS keyframes).
//!
//! # Motion
//!
//! A [`MotionProfile`] is a small set of evenly spaced keyframes for scale,
//! rotation (degrees) and vertical offset, plus a duration and repeat policy.
//! `idle` and `working` loop forever; every other mood plays once and holds
//! its final keyframe.

mod timing;

pub use timing::EasingFunction;

use std::time::Duration;

use serde::Serialize;

use crate::mascot::Mood;

/// Glyph identifiers the renderer can draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// Working
    Brain,
    /// Celebrating
    Rocket,
    /// Success
    Star,
    /// Error / failure
    Heart,
    /// Thinking
    Lightbulb,
    /// Excited
    Flame,
    /// Focused
    Target,
    /// Everything else
    Lightning,
}

impl Icon {
    /// Fixed mood to icon mapping
    #[must_use]
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::Working => Self::Brain,
            Mood::Celebrating => Self::Rocket,
            Mood::Success => Self::Star,
            Mood::Error | Mood::Failure => Self::Heart,
            Mood::Thinking => Self::Lightbulb,
            Mood::Excited => Self::Flame,
            Mood::Focused => Self::Target,
            Mood::Idle | Mood::Sleeping | Mood::Active => Self::Lightning,
        }
    }

    /// Stable identifier
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Brain => "brain",
            Self::Rocket => "rocket",
            Self::Star => "star",
            Self::Heart => "heart",
            Self::Lightbulb => "lightbulb",
            Self::Flame => "flame",
            Self::Target => "target",
            Self::Lightning => "lightning",
        }
    }
}

/// Repeat policy for a motion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Loop indefinitely
    Forever,
    /// Play once and settle on the last keyframe
    Once,
}

/// Keyframed motion descriptor for one mood
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotionProfile {
    /// Scale keyframes (1.0 = natural size)
    pub scale: &'static [f32],
    /// Rotation keyframes in degrees
    pub rotate: &'static [f32],
    /// Vertical offset keyframes (negative = up)
    pub translate_y: &'static [f32],
    /// Length of one pass
    pub duration_secs: f32,
    /// Loop or settle
    pub repeat: Repeat,
    /// Progress curve
    pub easing: EasingFunction,
}

/// One sampled point of a motion
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MotionFrame {
    /// Scale factor
    pub scale: f32,
    /// Rotation in degrees
    pub rotate: f32,
    /// Vertical offset
    pub translate_y: f32,
}

impl Default for MotionFrame {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate: 0.0,
            translate_y: 0.0,
        }
    }
}

impl MotionProfile {
    const fn new(
        scale: &'static [f32],
        rotate: &'static [f32],
        translate_y: &'static [f32],
        duration_secs: f32,
        repeat: Repeat,
        easing: EasingFunction,
    ) -> Self {
        Self {
            scale,
            rotate,
            translate_y,
            duration_secs,
            repeat,
            easing,
        }
    }

    /// Fixed mood to motion mapping
    #[must_use]
    pub fn for_mood(mood: Mood) -> Self {
        use EasingFunction::{EaseInOut, EaseOut, EaseOutBack, Linear};
        use Repeat::{Forever, Once};

        match mood {
            Mood::Idle => Self::new(
                &[1.0, 1.05, 1.0],
                &[0.0, 0.0, 0.0],
                &[0.0, -5.0, 0.0],
                2.0,
                Forever,
                EaseInOut,
            ),
            Mood::Working => Self::new(
                &[1.0, 1.1, 1.0],
                &[0.0, 180.0, 360.0],
                &[0.0, 0.0, 0.0],
                1.5,
                Forever,
                Linear,
            ),
            Mood::Celebrating => Self::new(
                &[1.0, 1.3, 1.1, 1.0],
                &[0.0, -10.0, 10.0, 0.0],
                &[0.0, -20.0, -10.0, 0.0],
                0.8,
                Once,
                EaseOutBack,
            ),
            Mood::Success => Self::new(
                &[1.0, 1.2, 1.0],
                &[0.0, 15.0, -15.0, 0.0],
                &[0.0, -10.0, 0.0],
                0.6,
                Once,
                EaseOut,
            ),
            Mood::Error | Mood::Failure => Self::new(
                &[1.0, 0.9, 1.0],
                &[0.0, -5.0, 5.0, -5.0, 0.0],
                &[0.0, 0.0],
                0.5,
                Once,
                Linear,
            ),
            Mood::Thinking => Self::new(
                &[1.0, 1.02, 1.0],
                &[0.0, 5.0, -5.0, 0.0],
                &[0.0, 0.0],
                1.5,
                Once,
                EaseInOut,
            ),
            Mood::Sleeping => Self::new(
                &[1.0, 0.95, 1.0],
                &[0.0, 0.0],
                &[0.0, 2.0, 0.0],
                3.0,
                Once,
                EaseInOut,
            ),
            Mood::Active => Self::new(
                &[1.0, 1.1],
                &[0.0, 0.0],
                &[0.0, -2.0],
                0.3,
                Once,
                EaseOut,
            ),
            Mood::Excited => Self::new(
                &[1.0, 1.15, 1.1],
                &[0.0, -5.0, 0.0],
                &[0.0, -8.0, -4.0],
                0.5,
                Once,
                EaseOutBack,
            ),
            Mood::Focused => Self::new(
                &[1.0, 1.05, 1.0],
                &[0.0, 0.0],
                &[0.0, 0.0],
                1.0,
                Once,
                EaseInOut,
            ),
        }
    }

    /// Whether this motion loops
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.repeat == Repeat::Forever
    }

    /// Duration of one pass
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration_secs)
    }

    /// Sample the motion `elapsed` after it started
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> MotionFrame {
        let raw = if self.duration_secs <= 0.0 {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration_secs
        };

        let progress = match self.repeat {
            Repeat::Forever => raw.fract(),
            Repeat::Once => raw.min(1.0),
        };
        let t = self.easing.apply(progress);

        MotionFrame {
            scale: interpolate(self.scale, t, 1.0),
            rotate: interpolate(self.rotate, t, 0.0),
            translate_y: interpolate(self.translate_y, t, 0.0),
        }
    }
}

/// Linear interpolation across evenly spaced keyframes
///
/// `t` may overshoot `[0, 1]` (back easing); it is extrapolated from the
/// nearest segment.
fn interpolate(keys: &[f32], t: f32, fallback: f32) -> f32 {
    match keys {
        [] => fallback,
        [only] => *only,
        _ => {
            let segments = (keys.len() - 1) as f32;
            let pos = t * segments;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = (pos.floor().max(0.0) as usize).min(keys.len() - 2);
            let local = pos - idx as f32;
            keys[idx] + (keys[idx + 1] - keys[idx]) * local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mapping() {
        assert_eq!(Icon::for_mood(Mood::Working), Icon::Brain);
        assert_eq!(Icon::for_mood(Mood::Celebrating), Icon::Rocket);
        assert_eq!(Icon::for_mood(Mood::Success), Icon::Star);
        assert_eq!(Icon::for_mood(Mood::Error), Icon::Heart);
        assert_eq!(Icon::for_mood(Mood::Failure), Icon::Heart);
        assert_eq!(Icon::for_mood(Mood::Thinking), Icon::Lightbulb);
        assert_eq!(Icon::for_mood(Mood::Excited), Icon::Flame);
        assert_eq!(Icon::for_mood(Mood::Focused), Icon::Target);
        assert_eq!(Icon::for_mood(Mood::Idle), Icon::Lightning);
        assert_eq!(Icon::for_mood(Mood::Sleeping), Icon::Lightning);
    }

    #[test]
    fn test_only_idle_and_working_loop() {
        for mood in Mood::ALL {
            let looping = MotionProfile::for_mood(mood).is_looping();
            assert_eq!(
                looping,
                matches!(mood, Mood::Idle | Mood::Working),
                "{mood}"
            );
        }
    }

    #[test]
    fn test_once_settles_on_last_keyframe() {
        let profile = MotionProfile::for_mood(Mood::Celebrating);
        let frame = profile.sample(Duration::from_secs(5));
        assert!((frame.scale - 1.0).abs() < 0.001);
        assert!(frame.rotate.abs() < 0.001);
        assert!(frame.translate_y.abs() < 0.001);
    }

    #[test]
    fn test_forever_wraps() {
        let profile = MotionProfile::for_mood(Mood::Idle);
        let start = profile.sample(Duration::ZERO);
        let wrapped = profile.sample(Duration::from_secs(4));
        assert!((start.translate_y - wrapped.translate_y).abs() < 0.001);

        // Halfway through idle is the top of the bob
        let mid = profile.sample(Duration::from_secs(1));
        assert!((mid.translate_y + 5.0).abs() < 0.001);
    }

    #[test]
    fn test_interpolate() {
        assert!((interpolate(&[0.0, 10.0], 0.5, 0.0) - 5.0).abs() < f32::EPSILON);
        assert!((interpolate(&[0.0, 10.0, 0.0], 0.75, 0.0) - 5.0).abs() < f32::EPSILON);
        assert!((interpolate(&[], 0.3, 1.0) - 1.0).abs() < f32::EPSILON);
        assert!((interpolate(&[2.0], 0.3, 1.0) - 2.0).abs() < f32::EPSILON);
    }
}
