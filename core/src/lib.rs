//! Swifter Core - Headless mascot and session logic for the Swifter dashboard
//!
//! This crate holds everything the dashboard needs that is not drawing:
//! the mascot's mood state machine, its derived icon/motion view, an async
//! driver that owns the machine on a tokio task, a bridge from content
//! pipeline outcomes to mascot signals, and the session/credential boundary.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       UI Surface (TUI)                        │
//! │   pointer enter/leave/click      pipeline milestones          │
//! └───────────────┬─────────────────────────────┬────────────────┘
//!                 │ MascotInput (up)            │ SignalSet
//!                 │                             │ (PipelineTracker)
//! ┌───────────────┴─────────────────────────────┴────────────────┐
//! │                         SWIFTER CORE                          │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐ │
//! │  │ MascotDriver │──▶│ MascotController │──▶│  MascotView   │ │
//! │  │ (tokio task) │   │ (mood machine)   │   │ icon + motion │ │
//! │  └──────────────┘   └──────────────────┘   └───────────────┘ │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌───────────────┐ │
//! │  │SessionManager│──▶│  SessionStore    │   │CredentialVeri-│ │
//! │  │              │   │ (file / memory)  │   │ fier (stub)   │ │
//! │  └──────────────┘   └──────────────────┘   └───────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Overview
//!
//! - [`mascot`]: Mood/expression state machine, particles, phrases
//! - [`animation`]: Icon selection and motion profiles derived from mood
//! - [`driver`]: Async owner of the controller with timer scheduling
//! - [`events`]: Inputs accepted by the mascot
//! - [`pipeline`]: Content/post vocabulary and the signal bridge
//! - [`session`]: Explicit session state with a load/save boundary
//! - [`auth`]: Credential verification seam
//! - [`config`]: TOML + environment configuration
//!
//! # No TUI Dependencies
//!
//! Nothing in here depends on ratatui or crossterm. A web or desktop
//! surface can drive the same controller.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod auth;
pub mod config;
pub mod driver;
pub mod events;
pub mod mascot;
pub mod pipeline;
pub mod session;

pub use animation::{EasingFunction, Icon, MotionFrame, MotionProfile, Repeat};
pub use auth::{AuthError, CredentialVerifier, Credentials, Identity, StaticCredentialVerifier};
pub use config::{
    default_config_path, load_config, load_config_from_path, AuthToml, ConfigError,
    ConfigOverrides, ConfigSource, DashboardConfig, DashboardToml, MascotToml, SessionToml,
};
pub use driver::{DriverError, MascotDriver, MascotHandle};
pub use events::{MascotInput, SignalKind, SignalSet};
pub use mascot::{
    Expression, MascotController, MascotState, MascotTimings, MascotView, Mood, Particle,
    Variant, PARTICLE_BURST_SIZE,
};
pub use pipeline::{
    ContentType, EngagementMetrics, PipelineTracker, Platform, PostResult, PostStatus,
};
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionError, SessionManager, SessionStore,
};
