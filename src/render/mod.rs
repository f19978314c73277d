//! Embed rendering module
//!
//! This module contains:
//! - Pure layout computation for cropped embeds
//! - The idempotent embed-processing pass and hover preview handling

pub mod embed;
pub mod layout;

pub use embed::{EmbedNode, EmbedRenderer};
pub use layout::{EmbedLayout, crop_layout};
