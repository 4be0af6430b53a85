//! Builder for constructing BuildSettings.

use super::{BuildSettings, DEFAULT_CREATED_BY};
use crate::classpath::ClassPath;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`BuildSettings`].
///
/// Provides a fluent API for building archive settings with validation.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_archive::BuildSettingsBuilder;
///
/// # fn example() -> kodegen_bundler_archive::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .class_path(["target/classes", "target/generated-classes"])
///     .local_repository("/opt/maven/repository")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`BuildSettings`] - The built settings struct
#[derive(Default)]
pub struct BuildSettingsBuilder {
    class_path: Option<Vec<PathBuf>>,
    created_by: Option<String>,
    local_repository: Option<PathBuf>,
}

impl BuildSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the class path roots.
    ///
    /// Default: `$ARCHIVE_CLASS_PATH`, else `target/classes` and `target/resources`
    pub fn class_path<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.class_path = Some(roots.into_iter().map(Into::into).collect());
        self
    }

    /// Appends one class path root after those already configured.
    pub fn class_path_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.class_path
            .get_or_insert_with(Vec::new)
            .push(root.as_ref().to_path_buf());
        self
    }

    /// Sets the `Created-By` value written into default manifests.
    ///
    /// Default: `kodegen_bundler_archive`
    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Sets the local repository used by the default descriptor loader.
    ///
    /// Default: None (descriptor setting, `$MAVEN_REPOSITORY`, `~/.m2/repository`)
    pub fn local_repository<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.local_repository = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`] if:
    /// - `created_by` is empty or spans several lines (it becomes a manifest header)
    /// - the class path was explicitly set to no roots
    pub fn build(self) -> Result<BuildSettings> {
        let created_by = self
            .created_by
            .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string());
        if created_by.trim().is_empty() || created_by.contains(['\r', '\n']) {
            return Err(Error::Settings(format!(
                "created_by must be a single non-empty line, got {created_by:?}"
            )));
        }

        let class_path = match self.class_path {
            Some(roots) if roots.is_empty() => {
                return Err(Error::Settings(
                    "class_path was set without any roots".to_string(),
                ));
            }
            Some(roots) => ClassPath::new(roots),
            None => BuildSettings::default_class_path(),
        };

        Ok(BuildSettings::new(
            class_path,
            created_by,
            self.local_repository,
        ))
    }
}
