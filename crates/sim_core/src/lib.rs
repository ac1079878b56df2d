//! Core simulation types for Starfall.
//!
//! This crate provides the foundational types used across all simulation
//! systems:
//! - Tick clock for the fixed-step loop
//! - Common component types for the entity world
//! - Degree-space angle helpers for orientation smoothing

pub mod angle;
pub mod components;
pub mod tick;

pub use angle::*;
pub use components::*;
pub use tick::*;

// Re-export commonly used types
pub use glam::{DVec3, IVec3, Vec3};
pub use hecs::{Entity, World};
