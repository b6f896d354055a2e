//! Theme styling for the lookup TUI.
//!
//! Semantic roles live in `roles`, the Nord palette in `nord`, and small
//! widget builders in `theme_helpers`. Prefer these helpers over hard-coded
//! colors so the field, list and toast stay visually consistent.

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::NordTheme;
pub use roles::Theme;
