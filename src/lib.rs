//! Crop annotations for image embeds in plain-text notes.
//!
//! Two cooperating halves, connected only through the encoded alias string
//! embedded in document text:
//!
//! - the [`session`] module: an interactive picker/canvas session that lets
//!   the user draw a selection rectangle over an image (with independent
//!   zoom/pan) and encodes it as an embed alias on confirmation;
//! - the [`render`] module: a passive pass over rendered image embeds that
//!   decodes matching aliases and computes the clipped, rescaled layout.
//!
//! The hosting application (document storage, widget toolkit, event bus) is
//! injected through the [`host`] traits so everything here runs and tests
//! without a host present.

pub mod config;
pub mod core;
pub mod domain;
pub mod host;
pub mod render;
pub mod session;

pub use crate::config::CropConfig;
pub use crate::core::plugin::CropPlugin;
pub use crate::domain::crop::CropRect;
pub use crate::host::HostContext;
