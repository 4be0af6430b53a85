//! Configuration for archive builders.
//!
//! [`BuildSettings`] carries the class path searched by class-containing
//! builders, the `Created-By` value written into default manifests and an
//! optional local repository override for dependency resolution.
//! [`BuildSettingsBuilder`] constructs it fluently.

mod builder;
mod core;

pub use builder::BuildSettingsBuilder;
pub use self::core::{BuildSettings, CLASS_PATH_ENV, DEFAULT_CREATED_BY};
