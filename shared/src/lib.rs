//! Toolkit-independent pieces of ghostdrag: geometry, drag point tracking
//! and configuration.

pub mod config;
pub mod geometry;
pub mod tracker;

pub use config::{ConfigError, DragConfig, GhostSection, LoggingSection};
pub use geometry::{Point, Rect, Size};
pub use tracker::{DragStart, DragTracker};
