//! Activity Bubble Phrases
//!
//! Fixed message sets the mascot says. Selection from a set is uniform;
//! no ordering is implied.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shown while content is being generated
pub const GENERATING: &str = "Generating amazing content...";

/// Greeting shown on hover by the classic mascot
pub const CLASSIC_GREETING: &str = "Ready to create something awesome?";

/// Picked on a successful post
pub const MOTIVATIONAL: [&str; 8] = [
    "Another post out in the wild!",
    "You're on fire today!",
    "The algorithm loves you!",
    "Content machine unlocked!",
    "Crushing it, keep going!",
    "Your audience is growing!",
    "That one's going viral!",
    "Nailed it! High five!",
];

/// Picked on a failed post
pub const ENCOURAGING: [&str; 5] = [
    "Don't worry, we'll get it next time!",
    "Every setback is a setup for a comeback!",
    "Even great posts bounce sometimes.",
    "Let's tweak it and try again!",
    "Keep going, you've got this!",
];

/// Uniform pick from a non-empty phrase set
pub(crate) fn pick<R: Rng>(set: &[&'static str], rng: &mut R) -> &'static str {
    set.choose(rng).copied().unwrap_or_default()
}

/// Greeting shown on hover by the enhanced mascot
#[must_use]
pub fn level_greeting(level: u8) -> String {
    format!("Level {level} creator reporting for duty!")
}

/// Activity shown on click, using the streak as it stood before the click
#[must_use]
pub fn streak_cheer(streak: u32) -> String {
    format!("{streak} day streak! Keep it up!")
}

/// Hover tooltip text
#[must_use]
pub fn tooltip(level: u8, streak: u32) -> String {
    format!("Level {level} · {streak} day streak")
}
