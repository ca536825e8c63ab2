//! proposal-export
//!
//! Filesystem side of proposal generation: template loading, asset
//! directories, layout settings, image resolution and attachment pages.
//! Drives the pure engine in `proposal-core`.

pub mod assets;
pub mod attachments;
pub mod build;
pub mod error;
pub mod layout;
pub mod mime;
pub mod resolve;
pub mod template;
