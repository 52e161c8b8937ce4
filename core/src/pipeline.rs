//! Content Pipeline Vocabulary and Signal Bridge
//!
//! The dashboard talks about content the same way the posting backend does:
//! content types, target platforms, post statuses and per-platform results.
//! Nothing here generates or posts anything. [`PipelineTracker`] only turns
//! pipeline milestones into the [`SignalSet`] the mascot reacts to.

use serde::{Deserialize, Serialize};

use crate::events::SignalSet;

/// Kinds of content the studio can generate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// Personal development journey
    DevJourney,
    /// Explaining a technology
    TechExplainer,
    /// Security findings and lessons
    HackingInsights,
    /// Show off a project
    ProjectShowcase,
    /// Opinion pieces
    HotTakes,
}

impl ContentType {
    /// Every content type, in display order
    pub const ALL: [ContentType; 5] = [
        ContentType::DevJourney,
        ContentType::TechExplainer,
        ContentType::HackingInsights,
        ContentType::ProjectShowcase,
        ContentType::HotTakes,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DevJourney => "Dev Journey",
            Self::TechExplainer => "Tech Explainer",
            Self::HackingInsights => "Hacking Insights",
            Self::ProjectShowcase => "Project Showcase",
            Self::HotTakes => "Hot Takes",
        }
    }
}

/// Social platforms posts go to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Reddit
    Reddit,
    /// Discord
    Discord,
    /// Mastodon
    Mastodon,
    /// Twitter / X
    Twitter,
}

impl Platform {
    /// Every platform, in display order
    pub const ALL: [Platform; 4] = [
        Platform::Reddit,
        Platform::Discord,
        Platform::Mastodon,
        Platform::Twitter,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Reddit => "Reddit",
            Self::Discord => "Discord",
            Self::Mastodon => "Mastodon",
            Self::Twitter => "Twitter",
        }
    }
}

/// Lifecycle of a single post
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Written, not scheduled
    Draft,
    /// Waiting for its slot
    Scheduled,
    /// Live on the platform
    Posted,
    /// Platform rejected it
    Failed,
}

/// Outcome of posting to one platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    /// Target platform
    pub platform: Platform,
    /// Where the post ended up
    pub status: PostStatus,
    /// Platform-side id, when posted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    /// Public URL, when posted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PostResult {
    /// A successful post
    pub fn posted(platform: Platform, post_id: impl Into<String>) -> Self {
        Self {
            platform,
            status: PostStatus::Posted,
            post_id: Some(post_id.into()),
            post_url: None,
            error: None,
        }
    }

    /// A failed post
    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            status: PostStatus::Failed,
            post_id: None,
            post_url: None,
            error: Some(error.into()),
        }
    }
}

/// Engagement counters for a post or platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMetrics {
    /// Likes / favourites / upvotes
    pub likes: u64,
    /// Replies
    pub comments: u64,
    /// Reposts / boosts
    pub shares: u64,
    /// Impressions
    pub views: u64,
    /// Link clicks
    pub clicks: u64,
}

impl EngagementMetrics {
    /// Interactions per view, as a percentage
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_rate(&self) -> f64 {
        if self.views == 0 {
            return 0.0;
        }
        let interactions = self.likes + self.comments + self.shares + self.clicks;
        interactions as f64 / self.views as f64 * 100.0
    }
}

/// Turns pipeline milestones into mascot signals
///
/// The tracker always returns the full signal set so the caller can forward
/// it unchanged as [`crate::MascotInput::Signals`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineTracker {
    signals: SignalSet,
}

impl PipelineTracker {
    /// New tracker with every flag cleared
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation started
    pub fn begin_generation(&mut self) -> SignalSet {
        self.signals = SignalSet::generating();
        self.signals
    }

    /// Generation and posting finished
    ///
    /// Any `Posted` result counts as success. Otherwise any `Failed` result
    /// counts as failure. Results that are only drafted or scheduled raise
    /// neither flag.
    pub fn finish(&mut self, results: &[PostResult]) -> SignalSet {
        let posted = results.iter().any(|r| r.status == PostStatus::Posted);
        let failed = results.iter().any(|r| r.status == PostStatus::Failed);

        self.signals = SignalSet {
            content_generating: false,
            post_success: posted,
            post_failure: !posted && failed,
        };

        tracing::debug!(
            results = results.len(),
            posted,
            failed,
            "Pipeline finished"
        );

        self.signals
    }

    /// Clear every flag
    pub fn reset(&mut self) -> SignalSet {
        self.signals = SignalSet::CLEAR;
        self.signals
    }

    /// Current signals
    #[must_use]
    pub fn signals(&self) -> SignalSet {
        self.signals
    }
}
