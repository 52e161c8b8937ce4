//! Dashboard State
//!
//! Plain state for the screens around the mascot: which tab is open, the
//! sign-in form, and the studio's mock content pipeline. Nothing here
//! touches the terminal, so all of it is unit tested directly.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::Rng;

use swifter_core::{ContentType, Credentials, EngagementMetrics, Platform, PostResult};

/// How long a mock generation runs before results come back
pub const MOCK_GENERATION_TIME: Duration = Duration::from_millis(1500);

/// Failure reasons picked for mock posts
const MOCK_FAILURES: [&str; 4] = [
    "rate limited",
    "webhook not configured",
    "session expired",
    "manual posting required",
];

// ============================================================================
// Screens and Tabs
// ============================================================================

/// Top-level screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Sign-in form
    Login,
    /// Signed-in dashboard
    Dashboard,
}

/// Dashboard tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Generate and post content
    #[default]
    Studio,
    /// Engagement overview
    Analytics,
}

impl Tab {
    /// Every tab, in display order
    pub const ALL: [Tab; 2] = [Tab::Studio, Tab::Analytics];

    /// Tab title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::Analytics => "Analytics",
        }
    }

    /// The other tab
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Studio => Self::Analytics,
            Self::Analytics => Self::Studio,
        }
    }

    /// Position in [`Tab::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Studio => 0,
            Self::Analytics => 1,
        }
    }
}

// ============================================================================
// Sign-in Form
// ============================================================================

/// Which sign-in field has focus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    /// Username
    #[default]
    Username,
    /// Password
    Password,
}

/// Sign-in form contents
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    /// Typed username
    pub username: String,
    /// Typed password
    pub password: String,
    /// Focused field
    pub focus: LoginField,
    /// Last sign-in error
    pub error: Option<String>,
}

impl LoginForm {
    /// Type a character into the focused field
    pub fn push(&mut self, c: char) {
        self.error = None;
        self.focused_mut().push(c);
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Move focus to the other field
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Credentials as typed
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Password rendered as bullets
    #[must_use]
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Record a failed attempt; the password is cleared
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.password.clear();
        self.focus = LoginField::Password;
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

// ============================================================================
// Studio
// ============================================================================

/// Content studio selections and the in-flight mock generation
#[derive(Clone, Debug)]
pub struct StudioState {
    content_type: usize,
    platforms: BTreeSet<Platform>,
    generating_since: Option<Instant>,
    last_results: Vec<PostResult>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            content_type: 0,
            platforms: [Platform::Reddit, Platform::Mastodon].into_iter().collect(),
            generating_since: None,
            last_results: Vec::new(),
        }
    }
}

impl StudioState {
    /// Selected content type
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        ContentType::ALL[self.content_type % ContentType::ALL.len()]
    }

    /// Select the next content type
    pub fn cycle_content_type(&mut self) {
        self.content_type = (self.content_type + 1) % ContentType::ALL.len();
    }

    /// Toggle a platform by its position in [`Platform::ALL`]
    pub fn toggle_platform(&mut self, index: usize) {
        let Some(&platform) = Platform::ALL.get(index) else {
            return;
        };
        if !self.platforms.remove(&platform) {
            self.platforms.insert(platform);
        }
    }

    /// Whether a platform is selected
    #[must_use]
    pub fn is_selected(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// Selected platforms in display order
    pub fn selected(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.iter().copied()
    }

    /// Start a mock generation; `false` if one is already running or
    /// nothing is selected
    pub fn begin(&mut self, now: Instant) -> bool {
        if self.generating_since.is_some() || self.platforms.is_empty() {
            return false;
        }
        self.generating_since = Some(now);
        self.last_results.clear();
        true
    }

    /// Whether a mock generation is running
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating_since.is_some()
    }

    /// Finish the running generation if its time is up
    ///
    /// Each selected platform gets a post that succeeds three times out of
    /// four.
    pub fn poll<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Option<&[PostResult]> {
        let started = self.generating_since?;
        if now.saturating_duration_since(started) < MOCK_GENERATION_TIME {
            return None;
        }
        self.generating_since = None;

        self.last_results = self
            .platforms
            .iter()
            .map(|&platform| {
                if rng.gen_bool(0.75) {
                    let id: u32 = rng.gen();
                    PostResult::posted(platform, format!("{id:08x}"))
                } else {
                    let reason = MOCK_FAILURES[rng.gen_range(0..MOCK_FAILURES.len())];
                    PostResult::failed(platform, reason)
                }
            })
            .collect();

        Some(&self.last_results)
    }

    /// Record a forced outcome so it shows in the results list
    pub fn record(&mut self, results: Vec<PostResult>) {
        self.generating_since = None;
        self.last_results = results;
    }

    /// Results of the last finished generation
    #[must_use]
    pub fn last_results(&self) -> &[PostResult] {
        &self.last_results
    }
}

// ============================================================================
// Analytics
// ============================================================================

/// Fixed engagement figures shown on the analytics tab
#[must_use]
pub fn mock_analytics() -> Vec<(Platform, EngagementMetrics)> {
    vec![
        (
            Platform::Reddit,
            EngagementMetrics {
                likes: 412,
                comments: 87,
                shares: 19,
                views: 9_840,
                clicks: 233,
            },
        ),
        (
            Platform::Discord,
            EngagementMetrics {
                likes: 96,
                comments: 41,
                shares: 3,
                views: 1_210,
                clicks: 58,
            },
        ),
        (
            Platform::Mastodon,
            EngagementMetrics {
                likes: 158,
                comments: 22,
                shares: 64,
                views: 3_475,
                clicks: 101,
            },
        ),
        (
            Platform::Twitter,
            EngagementMetrics {
                likes: 275,
                comments: 30,
                shares: 48,
                views: 12_300,
                clicks: 140,
            },
        ),
    ]
}
