//! Core BuildSettings struct and implementations.

use crate::classpath::ClassPath;
use std::path::{Path, PathBuf};

/// Environment variable holding the default class path (platform path-list syntax).
pub const CLASS_PATH_ENV: &str = "ARCHIVE_CLASS_PATH";

/// Default `Created-By` manifest header value.
pub const DEFAULT_CREATED_BY: &str = "kodegen_bundler_archive";

/// Class path used when [`CLASS_PATH_ENV`] is not set.
const DEFAULT_CLASS_PATH: [&str; 2] = ["target/classes", "target/resources"];

/// Settings shared by every builder created from them.
///
/// Constructed via [`BuildSettingsBuilder`](super::BuildSettingsBuilder) or
/// [`BuildSettings::default`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_archive::{BuildSettingsBuilder, library_with};
///
/// # fn example() -> kodegen_bundler_archive::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .class_path_root("build/classes")
///     .class_path_root("build/resources")
///     .created_by("acme-build 2.1")
///     .build()?;
///
/// let builder = library_with("app.jar", settings)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BuildSettings {
    /// Roots searched for classes, packages and resources.
    class_path: ClassPath,

    /// `Created-By` header of generated manifests.
    created_by: String,

    /// Local repository override for the default descriptor loader.
    ///
    /// None means: descriptor setting, then `$MAVEN_REPOSITORY`, then `~/.m2/repository`.
    local_repository: Option<PathBuf>,
}

impl BuildSettings {
    /// Returns the class path.
    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    /// Returns the `Created-By` manifest value.
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the local repository override, if any.
    pub fn local_repository(&self) -> Option<&Path> {
        self.local_repository.as_deref()
    }

    /// Class path from [`CLASS_PATH_ENV`], falling back to `target/classes` and `target/resources`.
    pub fn default_class_path() -> ClassPath {
        match std::env::var_os(CLASS_PATH_ENV) {
            Some(value) if !value.is_empty() => ClassPath::new(std::env::split_paths(&value)),
            _ => ClassPath::new(DEFAULT_CLASS_PATH),
        }
    }

    /// Creates a new BuildSettings instance (used by BuildSettingsBuilder).
    pub(super) fn new(
        class_path: ClassPath,
        created_by: String,
        local_repository: Option<PathBuf>,
    ) -> Self {
        Self {
            class_path,
            created_by,
            local_repository,
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self::new(
            Self::default_class_path(),
            DEFAULT_CREATED_BY.to_string(),
            None,
        )
    }
}
