//! Pure domain types with minimal dependencies
//!
//! This module contains the core types used throughout the crate: the crop
//! annotation codec, embed markup handling, and selection geometry. Types
//! here have no host or UI dependencies so they can be tested in isolation.

pub mod crop;
pub mod embed;
pub mod geometry;

pub use crop::*;
pub use embed::*;
pub use geometry::*;
