//! proposal-core
//!
//! Pure substitution engine for proposal HTML templates. No filesystem
//! access — every operation takes text and returns a new string.

pub mod attachments;
pub mod encode;
pub mod fields;
pub mod images;
pub mod rules;
pub mod substitution;
pub mod theme;

pub use encode::encode_data_url;
pub use fields::{BasicFields, apply_basic_fields};
pub use images::{ImageReplacement, list_image_srcs, replace_images};
pub use substitution::Substitution;
pub use theme::{ThemeBindings, apply_theme_vars, ensure_root_var};
