use super::core::{BuilderCore, nest_libraries};
use super::ArchiveBuilder;
use crate::archive::{Archive, ArchiveShape, EnterpriseArchive};
use crate::error::Result;
use crate::settings::BuildSettings;

/// Builder for enterprise archives (.ear).
///
/// Modules sit at the archive root; libraries are nested as a batch
/// under `/lib`. Enterprise archives carry no classes of their own.
#[derive(Debug, Clone)]
pub struct EarArchiveBuilder {
    core: BuilderCore,
}

impl EarArchiveBuilder {
    pub(crate) fn new(name: impl Into<String>, settings: BuildSettings) -> Result<Self> {
        Ok(Self {
            core: BuilderCore::new(ArchiveShape::Enterprise, name, settings)?,
        })
    }

    /// Adds `module` at the archive root, under its own name.
    pub fn append_module(mut self, module: impl Into<Archive>) -> Result<Self> {
        self.core.add_module(module.into())?;
        Ok(self)
    }

    /// Adds class path resource `resource` at `META-INF/<target>`.
    pub fn append_manifest_resource(mut self, resource: &str, target: &str) -> Result<Self> {
        self.core.add_manifest_resource(resource, target)?;
        Ok(self)
    }
}

impl ArchiveBuilder for EarArchiveBuilder {
    type Output = EnterpriseArchive;

    fn core(&self) -> &BuilderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BuilderCore {
        &mut self.core
    }

    fn merge_libraries(
        archive: Archive,
        libraries: Vec<Archive>,
        _settings: &BuildSettings,
    ) -> Result<Archive> {
        nest_libraries(archive, libraries)
    }

    fn build(self) -> Result<EnterpriseArchive> {
        self.core.finish()
    }
}
