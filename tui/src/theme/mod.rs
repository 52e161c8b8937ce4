//! Theme and Colors
//!
//! Swifter's palette: an electric violet brand color, warm mood accents for
//! the mascot, and muted grays for chrome.

use ratatui::style::Color;

use swifter_core::Mood;

// ============================================================================
// Brand Palette
// ============================================================================

/// Signature violet (titles, focused borders)
pub const SWIFTER_VIOLET: Color = Color::Rgb(139, 92, 246);

/// Softer violet for inactive accents
pub const SWIFTER_LAVENDER: Color = Color::Rgb(196, 181, 253);

/// Activity bubble background text
pub const BUBBLE_TEXT: Color = Color::Rgb(240, 240, 255);

/// Particle sparkle
pub const SPARKLE: Color = Color::Rgb(253, 224, 71);

// ============================================================================
// Mood Colors
// ============================================================================

/// Resting - calm blue
pub const MOOD_IDLE: Color = Color::Rgb(125, 175, 255);

/// Working - focused cyan
pub const MOOD_WORKING: Color = Color::Rgb(94, 234, 212);

/// Celebrating / success - warm yellow
pub const MOOD_CELEBRATING: Color = Color::Rgb(255, 223, 128);

/// Hovered - bright coral
pub const MOOD_EXCITED: Color = Color::Rgb(255, 150, 120);

/// Error / failure - muted red
pub const MOOD_ERROR: Color = Color::Rgb(255, 100, 100);

/// Thinking - soft blue
pub const MOOD_THINKING: Color = Color::Rgb(150, 180, 255);

/// Sleeping - dim lilac
pub const MOOD_SLEEPING: Color = Color::Rgb(160, 150, 190);

// ============================================================================
// UI Colors
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Accent color for a mood
#[must_use]
pub fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Idle | Mood::Focused => MOOD_IDLE,
        Mood::Working => MOOD_WORKING,
        Mood::Celebrating | Mood::Success => MOOD_CELEBRATING,
        Mood::Active | Mood::Excited => MOOD_EXCITED,
        Mood::Error | Mood::Failure => MOOD_ERROR,
        Mood::Thinking => MOOD_THINKING,
        Mood::Sleeping => MOOD_SLEEPING,
    }
}
