use super::ArchiveBuilder;
use crate::error::Result;

/// Class and resource operations for shapes that carry classes.
///
/// Classes and packages are looked up on the settings' class path and
/// stored under the shape's classes root, resources under its resources
/// root and manifest resources under `META-INF`.
pub trait ClassContainingArchiveBuilder: ArchiveBuilder {
    /// Adds the named classes, each with its nested classes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNotFound`](crate::Error::ClassNotFound) if a
    /// class is on no class path root. Nothing is added in that case.
    fn append_classes<I, S>(mut self, classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core_mut().add_classes(classes)?;
        Ok(self)
    }

    /// Adds every class of `packages` and of their sub-packages.
    fn append_packages_recursively<I, S>(mut self, packages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core_mut().add_packages(true, packages)?;
        Ok(self)
    }

    /// Adds the classes directly in `packages`.
    fn append_packages_non_recursively<I, S>(mut self, packages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.core_mut().add_packages(false, packages)?;
        Ok(self)
    }

    /// Adds class path resource `resource` under its own name.
    fn append_resource(self, resource: &str) -> Result<Self> {
        self.append_resource_at(resource, resource)
    }

    /// Adds class path resource `resource` at `target`.
    fn append_resource_at(mut self, resource: &str, target: &str) -> Result<Self> {
        self.core_mut().add_resource(resource, target)?;
        Ok(self)
    }

    /// Adds class path resource `resource` at `META-INF/<target>`.
    fn append_manifest_resource(mut self, resource: &str, target: &str) -> Result<Self> {
        self.core_mut().add_manifest_resource(resource, target)?;
        Ok(self)
    }
}
