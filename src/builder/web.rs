use super::core::{BuilderCore, nest_libraries};
use super::{ArchiveBuilder, ClassContainingArchiveBuilder};
use crate::archive::{Archive, ArchiveShape, WebArchive};
use crate::error::Result;
use crate::settings::BuildSettings;

/// Builder for web archives (.war).
///
/// Classes go to `/WEB-INF/classes`, libraries are nested as a batch
/// under `/WEB-INF/lib`.
#[derive(Debug, Clone)]
pub struct WarArchiveBuilder {
    core: BuilderCore,
}

impl WarArchiveBuilder {
    pub(crate) fn new(name: impl Into<String>, settings: BuildSettings) -> Result<Self> {
        Ok(Self {
            core: BuilderCore::new(ArchiveShape::WebDeployable, name, settings)?,
        })
    }

    /// Adds class path resource `resource` at `/WEB-INF/<target>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceNotFound`](crate::Error::ResourceNotFound)
    /// when the resource is on no class path root and is not a file.
    pub fn append_web_resource(mut self, resource: &str, target: &str) -> Result<Self> {
        self.core.add_web_resource(resource, target)?;
        Ok(self)
    }
}

impl ArchiveBuilder for WarArchiveBuilder {
    type Output = WebArchive;

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

    fn build(self) -> Result<WebArchive> {
        self.core.finish()
    }
}

impl ClassContainingArchiveBuilder for WarArchiveBuilder {}
