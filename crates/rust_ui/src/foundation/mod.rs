//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the UI layer:
//! - Math types (vectors, points, rectangles, colors)
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;
