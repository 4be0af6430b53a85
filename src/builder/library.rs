use super::core::BuilderCore;
use super::{ArchiveBuilder, ClassContainingArchiveBuilder};
use crate::archive::{Archive, ArchiveShape, JavaArchive};
use crate::error::Result;
use crate::settings::BuildSettings;

/// Builder for library (.jar) archives.
///
/// Libraries are flattened: each one is merged into the archive in the
/// order given, later entries overwriting earlier ones at the same path.
#[derive(Debug, Clone)]
pub struct JarArchiveBuilder {
    core: BuilderCore,
}

impl JarArchiveBuilder {
    pub(crate) fn new(name: impl Into<String>, settings: BuildSettings) -> Result<Self> {
        Ok(Self {
            core: BuilderCore::new(ArchiveShape::Library, name, settings)?,
        })
    }
}

impl ArchiveBuilder for JarArchiveBuilder {
    type Output = JavaArchive;

    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn merge_libraries(
        archive: Archive,
        libraries: Vec<Archive>,
        settings: &BuildSettings,
    ) -> Result<Archive> {
        let merged = libraries.into_iter().fold(archive, Archive::merge);
        Ok(merged.add_manifest(settings.created_by()))
    }

    fn build(self) -> Result<JavaArchive> {
        self.core.finish()
    }
}

impl ClassContainingArchiveBuilder for JarArchiveBuilder {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchivePath;

    fn library_archive(name: &str, entries: &[(&str, &'static str)]) -> Archive {
        entries.iter().fold(
            Archive::create(ArchiveShape::Generic, name).unwrap(),
            |archive, (path, content)| archive.add_bytes(ArchivePath::new(path).unwrap(), *content),
        )
    }

    #[test]
    fn merged_libraries_are_flattened_with_manifest() {
        let jar = JarArchiveBuilder::new("app.jar", BuildSettings::default())
            .unwrap()
            .append_libraries([library_archive("f.jar", &[("/f/F.class", "F")])])
            .unwrap()
            .build()
            .unwrap();

        assert!(jar.contains("/f/F.class"));
        assert!(jar.manifest().is_some());
        assert_eq!(jar.nested_archives_in(&ArchivePath::root()).len(), 0);
    }

    #[test]
    fn later_library_wins() {
        let jar = JarArchiveBuilder::new("app.jar", BuildSettings::default())
            .unwrap()
            .append_libraries([
                library_archive("one.jar", &[("/x.txt", "one")]),
                library_archive("two.jar", &[("/x.txt", "two")]),
            ])
            .unwrap()
            .build()
            .unwrap();

        let content = jar.get(&ArchivePath::new("/x.txt").unwrap()).unwrap();
        assert_eq!(content.as_bytes().unwrap().as_ref(), b"two");
    }

    #[test]
    fn no_manifest_without_libraries() {
        let jar = JarArchiveBuilder::new("app.jar", BuildSettings::default())
            .unwrap()
            .build()
            .unwrap();
        assert!(jar.is_empty());
    }
}
