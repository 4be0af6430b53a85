//! State shared by every archive builder.

use crate::archive::{Archive, ArchivePath, ArchiveShape, TypedArchive};
use crate::classpath::ClassPathEntry;
use crate::error::{Error, Result};
use crate::settings::BuildSettings;
use crate::utils::fs;

/// The archive under construction and the settings it is built with.
///
/// Every operation replaces the owned archive with the result of the
/// corresponding container call. Class path files are read before the
/// archive is touched, so a failed append leaves it as it was.
#[derive(Debug, Clone)]
pub struct BuilderCore {
    archive: Archive,
    settings: BuildSettings,
}

impl BuilderCore {
    /// Creates an empty archive of `shape` named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] for an unusable name.
    pub fn new(shape: ArchiveShape, name: impl Into<String>, settings: BuildSettings) -> Result<Self> {
        let archive = Archive::create(shape, name)?;
        log::info!("Assembling {} archive {}", shape, archive.name());
        Ok(Self { archive, settings })
    }

    /// Archive assembled so far.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Builder settings.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Replaces the archive with `op(archive, settings)`.
    ///
    /// `op` cannot fail; fallible preparation happens before the call.
    pub fn rebind<F>(&mut self, op: F)
    where
        F: FnOnce(Archive, &BuildSettings) -> Archive,
    {
        let placeholder = self.archive.detached();
        let current = std::mem::replace(&mut self.archive, placeholder);
        self.archive = op(current, &self.settings);
    }

    /// Fallible rebind for operations whose caller drops the builder on error.
    ///
    /// A failed `op` leaves an empty archive behind.
    pub(crate) fn rebind_or_discard<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(Archive, &BuildSettings) -> Result<Archive>,
    {
        let placeholder = self.archive.detached();
        let current = std::mem::replace(&mut self.archive, placeholder);
        self.archive = op(current, &self.settings)?;
        Ok(())
    }

    /// Narrows the finished archive, consuming the core.
    pub fn finish<T: TypedArchive>(self) -> Result<T> {
        log::info!(
            "Built {} ({} entries, .{})",
            self.archive.name(),
            self.archive.len(),
            T::SHAPE.extension()
        );
        self.archive.narrow()
    }

    /// Adds the named classes (and their nested classes) under the classes root.
    pub fn add_classes<I, S>(&mut self, classes: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = self.root_for("append_classes", ArchiveShape::classes_root)?;
        let mut entries = Vec::new();
        for class in classes {
            entries.extend(self.settings.class_path().find_class(class.as_ref())?);
        }
        self.add_class_path_entries(&root, entries)
    }

    /// Adds every class of `packages`, descending into sub-packages when `recursive`.
    pub fn add_packages<I, S>(&mut self, recursive: bool, packages: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = self.root_for("append_packages", ArchiveShape::classes_root)?;
        let mut entries = Vec::new();
        for package in packages {
            entries.extend(
                self.settings
                    .class_path()
                    .find_package(package.as_ref(), recursive)?,
            );
        }
        self.add_class_path_entries(&root, entries)
    }

    /// Adds class path resource `resource` at `target` below the resources root.
    pub fn add_resource(&mut self, resource: &str, target: &str) -> Result<()> {
        let root = self.root_for("append_resource", ArchiveShape::resources_root)?;
        self.add_resource_under(&root, resource, target)
    }

    /// Adds class path resource `resource` at `target` below `META-INF`.
    pub fn add_manifest_resource(&mut self, resource: &str, target: &str) -> Result<()> {
        let root = self.archive.shape().manifest_root();
        self.add_resource_under(&root, resource, target)
    }

    /// Adds class path resource `resource` at `target` below the web root.
    pub fn add_web_resource(&mut self, resource: &str, target: &str) -> Result<()> {
        let root = self.root_for("append_web_resource", ArchiveShape::web_root)?;
        self.add_resource_under(&root, resource, target)
    }

    /// Nests `module` at the archive root.
    pub fn add_module(&mut self, module: Archive) -> Result<()> {
        let path = ArchivePath::root().join(module.name())?;
        log::debug!("{}: adding module {}", self.archive.name(), module.name());
        self.rebind(|archive, _| archive.add(path, module));
        Ok(())
    }

    fn root_for(
        &self,
        operation: &'static str,
        layout: fn(ArchiveShape) -> Option<ArchivePath>,
    ) -> Result<ArchivePath> {
        let shape = self.archive.shape();
        layout(shape).ok_or(Error::UnsupportedOperation { operation, shape })
    }

    fn add_resource_under(&mut self, root: &ArchivePath, resource: &str, target: &str) -> Result<()> {
        let source = self.settings.class_path().find_resource(resource)?;
        let path = root.join(target)?;
        let content = fs::read_file(&source)?;

        log::debug!(
            "{}: adding resource {} as {}",
            self.archive.name(),
            source.display(),
            path
        );
        self.rebind(|archive, _| archive.add_bytes(path, content));
        Ok(())
    }

    fn add_class_path_entries(&mut self, root: &ArchivePath, entries: Vec<ClassPathEntry>) -> Result<()> {
        let mut staged = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = root.join(&entry.relative)?;
            staged.push((path, fs::read_file(&entry.source)?));
        }

        log::debug!("{}: adding {} class files", self.archive.name(), staged.len());
        self.rebind(|archive, _| {
            staged
                .into_iter()
                .fold(archive, |acc, (path, content)| acc.add_bytes(path, content))
        });
        Ok(())
    }
}

/// Batch merge policy: nest every library under the shape's libraries directory.
pub(crate) fn nest_libraries(archive: Archive, libraries: Vec<Archive>) -> Result<Archive> {
    let shape = archive.shape();
    let root = shape.libraries_root().ok_or(Error::UnsupportedOperation {
        operation: "append_libraries",
        shape,
    })?;

    archive.add_archives_at(&root, libraries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enterprise_core() -> BuilderCore {
        BuilderCore::new(ArchiveShape::Enterprise, "app.ear", BuildSettings::default()).unwrap()
    }

    #[test]
    fn failed_operations_keep_earlier_entries() {
        let mut core = enterprise_core();
        core.add_module(Archive::create(ArchiveShape::WebDeployable, "shop.war").unwrap())
            .unwrap();

        assert!(matches!(
            core.add_classes(["com.acme.App"]),
            Err(Error::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            core.add_manifest_resource("no-such-resource.xml", "application.xml"),
            Err(Error::ResourceNotFound { .. })
        ));

        assert_eq!(core.archive().len(), 1);
        assert!(core.archive().contains("/shop.war"));
    }

    #[test]
    fn rebind_threads_the_archive_through() {
        let mut core = enterprise_core();
        core.rebind(|archive, settings| {
            let path = ArchivePath::new("created-by").unwrap();
            archive.add_bytes(path, settings.created_by().to_string())
        });

        assert!(core.archive().contains("/created-by"));
        assert_eq!(core.archive().name(), "app.ear");
    }
}
