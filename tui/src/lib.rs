//! Swifter TUI - Terminal dashboard for the Swifter content studio
//!
//! A full-screen dashboard with a sign-in screen, a studio tab for mock
//! content generation, an analytics tab, and an animated mascot that reacts
//! to everything the user does.
//!
//! # Architecture
//!
//! - **App**: Event loop, screens and rendering
//! - **Dashboard**: Plain tab/form/studio state
//! - **MascotClient**: Thin wrapper over the core's mascot driver
//! - **Widgets**: Mascot rendering from the core's view snapshot
//! - **Theme**: Palette and mood colors

pub mod app;
pub mod dashboard;
pub mod mascot_client;
pub mod theme;
pub mod widgets;

pub use app::App;
