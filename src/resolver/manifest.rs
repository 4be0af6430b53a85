//! Default descriptor loader backed by a TOML project descriptor and a local repository.

use super::descriptor::{DeclaredDependency, ProjectDescriptor};
use super::repository::LocalRepository;
use super::stage::{DescriptorLoader, ResolveStage, StrategyStage};
use super::{Coordinate, ScopeType};
use crate::error::{Error, Result};
use crate::settings::BuildSettings;
use std::path::{Path, PathBuf};

/// Loads TOML project descriptors and resolves against a [`LocalRepository`].
///
/// The repository is chosen in this order: the descriptor's
/// `[repository] local` entry (relative to the descriptor), the loader's
/// configured repository, `$MAVEN_REPOSITORY`, then `~/.m2/repository`.
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    local_repository: Option<PathBuf>,
}

impl ManifestLoader {
    /// Loader with an explicit repository fallback.
    pub fn new(local_repository: Option<PathBuf>) -> Self {
        Self { local_repository }
    }

    /// Loader configured from builder settings.
    pub fn from_settings(settings: &BuildSettings) -> Self {
        Self::new(settings.local_repository().map(Path::to_path_buf))
    }

    fn repository_for(
        &self,
        descriptor_path: &Path,
        descriptor: &ProjectDescriptor,
    ) -> Result<LocalRepository> {
        let declared = descriptor
            .repository
            .as_ref()
            .and_then(|repository| repository.local.as_ref())
            .map(|local| {
                descriptor_path
                    .parent()
                    .map(|dir| dir.join(local))
                    .unwrap_or_else(|| local.clone())
            });

        declared
            .or_else(|| self.local_repository.clone())
            .or_else(LocalRepository::default_location)
            .map(LocalRepository::new)
            .ok_or_else(|| Error::Descriptor {
                path: descriptor_path.to_path_buf(),
                reason: "no local repository configured and no home directory found".to_string(),
            })
    }
}

impl DescriptorLoader for ManifestLoader {
    fn load_descriptor(
        &self,
        descriptor: &Path,
        profiles: &[String],
    ) -> Result<Box<dyn ResolveStage>> {
        let parsed = ProjectDescriptor::load(descriptor)?;
        let repository = self.repository_for(descriptor, &parsed)?;
        let dependencies = parsed.dependencies_for(profiles);

        log::debug!(
            "Loaded {} with {} dependencies (profiles: {:?}, repository: {})",
            descriptor.display(),
            dependencies.len(),
            profiles,
            repository.root().display()
        );

        Ok(Box::new(ManifestStage {
            descriptor: descriptor.to_path_buf(),
            dependencies,
            repository,
        }))
    }
}

/// Resolve stage over the dependencies of one loaded descriptor.
#[derive(Debug, Clone)]
pub struct ManifestStage {
    descriptor: PathBuf,
    dependencies: Vec<DeclaredDependency>,
    repository: LocalRepository,
}

impl ManifestStage {
    /// Dependencies visible to this stage.
    pub fn dependencies(&self) -> &[DeclaredDependency] {
        &self.dependencies
    }

    /// Pins `coordinate` to the matching declaration unless it carries a version.
    ///
    /// The declaration also supplies packaging and classifier when the query
    /// leaves them out.
    fn pin(&self, coordinate: &Coordinate) -> Result<Coordinate> {
        if coordinate.version().is_some() {
            return Ok(coordinate.clone());
        }

        self.dependencies
            .iter()
            .find(|dependency| dependency.version.is_some() && dependency.matches(coordinate))
            .ok_or_else(|| Error::UnresolvedVersion {
                coordinate: format!("{} in {}", coordinate, self.descriptor.display()),
            })?
            .coordinate()
    }
}

impl ResolveStage for ManifestStage {
    fn with_scopes(mut self: Box<Self>, scopes: &[ScopeType]) -> Result<Box<dyn ResolveStage>> {
        if !scopes.is_empty() {
            self.dependencies
                .retain(|dependency| scopes.contains(&dependency.scope));
            log::debug!(
                "Imported {} dependencies with scopes {:?}",
                self.dependencies.len(),
                scopes
            );
        }
        Ok(self)
    }

    fn resolve(&self, coordinate: &Coordinate) -> Result<StrategyStage> {
        let pinned = self.pin(coordinate)?;
        self.repository.resolve(&pinned)
    }
}
