//! Dashboard Widgets

pub mod mascot;

pub use mascot::MascotWidget;
