//! Mascot Inputs
//!
//! Everything the mascot reacts to. Surfaces report what happened; the
//! controller decides what it means.
//!
//! Two kinds of input exist:
//! - External signals from the hosting view (content generation and post
//!   outcomes), delivered as a whole [`SignalSet`] every time any flag changes
//! - Local pointer interaction with the mascot itself

use serde::{Deserialize, Serialize};

/// Inputs accepted by the mascot controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MascotInput {
    /// The hosting view's external signals changed
    Signals(SignalSet),
    /// Pointer moved onto the mascot
    PointerEnter,
    /// Pointer moved off the mascot
    PointerLeave,
    /// Mascot was clicked/tapped
    Click,
}

/// The three external flags the hosting view drives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalSet {
    /// Content is being generated right now
    pub content_generating: bool,
    /// A post just went out successfully
    pub post_success: bool,
    /// A post just failed
    pub post_failure: bool,
}

/// Which external signal won a recompute
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// `content_generating` was set
    Generating,
    /// `post_success` was set
    PostSuccess,
    /// `post_failure` was set
    PostFailure,
}

impl SignalSet {
    /// All flags cleared
    pub const CLEAR: Self = Self {
        content_generating: false,
        post_success: false,
        post_failure: false,
    };

    /// Only `content_generating` set
    #[must_use]
    pub const fn generating() -> Self {
        Self {
            content_generating: true,
            post_success: false,
            post_failure: false,
        }
    }

    /// Only `post_success` set
    #[must_use]
    pub const fn success() -> Self {
        Self {
            content_generating: false,
            post_success: true,
            post_failure: false,
        }
    }

    /// Only `post_failure` set
    #[must_use]
    pub const fn failure() -> Self {
        Self {
            content_generating: false,
            post_success: false,
            post_failure: true,
        }
    }

    /// Pick the winning signal, first match wins:
    /// generating, then success, then failure.
    #[must_use]
    pub fn resolve(&self) -> Option<SignalKind> {
        if self.content_generating {
            Some(SignalKind::Generating)
        } else if self.post_success {
            Some(SignalKind::PostSuccess)
        } else if self.post_failure {
            Some(SignalKind::PostFailure)
        } else {
            None
        }
    }
}
