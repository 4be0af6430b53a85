//! Local artifact repository in Maven directory layout.
//!
//! ```text
//! <root>/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.jar
//! <root>/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9-sources.jar
//! <root>/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.toml   (optional dependency list)
//! ```

use super::descriptor::{DeclaredDependency, ProjectDescriptor};
use super::{Coordinate, StrategyStage};
use crate::error::{Error, Result};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Environment variable overriding the default repository location.
pub const REPOSITORY_ENV: &str = "MAVEN_REPOSITORY";

/// Packaging that carries no artifact file, only dependencies.
const POM_PACKAGING: &str = "pom";

/// Artifact repository rooted at a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    /// Repository rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$MAVEN_REPOSITORY`, else `~/.m2/repository`.
    pub fn default_location() -> Option<PathBuf> {
        match std::env::var_os(REPOSITORY_ENV) {
            Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
            _ => dirs::home_dir().map(|home| home.join(".m2").join("repository")),
        }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every file of a pinned coordinate.
    fn version_dir<'c>(&self, coordinate: &'c Coordinate) -> Result<(PathBuf, &'c str)> {
        let version = pinned_version(coordinate)?;
        let mut dir = self.root.clone();
        dir.extend(coordinate.group().split('.'));
        dir.push(coordinate.artifact());
        dir.push(version);
        Ok((dir, version))
    }

    /// Expected location of the artifact file of a pinned coordinate.
    pub fn artifact_path(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let (dir, version) = self.version_dir(coordinate)?;
        let classifier = coordinate
            .classifier()
            .map(|c| format!("-{c}"))
            .unwrap_or_default();

        Ok(dir.join(format!(
            "{}-{}{}.{}",
            coordinate.artifact(),
            version,
            classifier,
            coordinate.packaging_or_default()
        )))
    }

    /// Location of the optional dependency list of a pinned coordinate.
    pub fn descriptor_path(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let (dir, version) = self.version_dir(coordinate)?;
        Ok(dir.join(format!("{}-{}.toml", coordinate.artifact(), version)))
    }

    /// Artifact file of a pinned coordinate, `None` for `pom` packaging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArtifactNotFound`] when the file is missing.
    pub fn artifact_file(&self, coordinate: &Coordinate) -> Result<Option<PathBuf>> {
        if coordinate.packaging_or_default() == POM_PACKAGING {
            return Ok(None);
        }

        let path = self.artifact_path(coordinate)?;
        if !path.is_file() {
            return Err(Error::ArtifactNotFound {
                coordinate: coordinate.to_string(),
                path,
            });
        }
        Ok(Some(path))
    }

    /// Dependencies declared by a pinned coordinate; empty when it ships no descriptor.
    pub fn dependencies_of(&self, coordinate: &Coordinate) -> Result<Vec<DeclaredDependency>> {
        let path = self.descriptor_path(coordinate)?;
        if !path.is_file() {
            return Ok(Vec::new());
        }
        Ok(ProjectDescriptor::load(&path)?.dependencies)
    }

    /// Resolves a pinned coordinate and walks its dependencies breadth-first.
    ///
    /// Only `compile` and `runtime` dependencies are followed. The first
    /// version reached for an artifact key wins, so nearer declarations
    /// shadow deeper ones and cycles terminate.
    pub fn resolve(&self, root: &Coordinate) -> Result<StrategyStage> {
        let direct: Vec<PathBuf> = self.artifact_file(root)?.into_iter().collect();

        let mut closure = Vec::new();
        let mut seen = HashSet::from([root.key()]);
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(current) = queue.pop_front() {
            if let Some(file) = self.artifact_file(&current)? {
                closure.push(file);
            }

            for dependency in self.dependencies_of(&current)? {
                if !dependency.scope.is_transitive() {
                    log::debug!(
                        "Skipping {} dependency {}:{} of {}",
                        dependency.scope,
                        dependency.group,
                        dependency.artifact,
                        current
                    );
                    continue;
                }

                let coordinate = dependency.coordinate()?;
                if seen.insert(coordinate.key()) {
                    pinned_version(&coordinate)?;
                    queue.push_back(coordinate);
                }
            }
        }

        log::debug!("Resolved {} to {} files", root, closure.len());
        Ok(StrategyStage::new(direct, closure))
    }
}

fn pinned_version(coordinate: &Coordinate) -> Result<&str> {
    coordinate.version().ok_or_else(|| Error::UnresolvedVersion {
        coordinate: coordinate.to_string(),
    })
}
