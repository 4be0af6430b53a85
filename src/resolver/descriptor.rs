//! Project descriptor parsing.
//!
//! The same TOML format serves two purposes: the project descriptor handed
//! to [`DependencyResolver`](super::DependencyResolver), and the optional
//! per-artifact descriptor stored next to an artifact in the local
//! repository, which lists that artifact's own dependencies.
//!
//! ```toml
//! [project]
//! group = "com.acme"
//! artifact = "shop"
//! version = "1.4.0"
//!
//! [repository]
//! local = "../repository"
//!
//! [[dependencies]]
//! group = "org.slf4j"
//! artifact = "slf4j-api"
//! version = "2.0.9"
//!
//! [[dependencies]]
//! group = "org.junit"
//! artifact = "junit"
//! version = "5.10.0"
//! scope = "test"
//!
//! [profiles.postgres]
//! dependencies = [
//!     { group = "org.postgresql", artifact = "postgresql", version = "42.7.1", scope = "runtime" },
//! ]
//! ```

use super::{Coordinate, ScopeType};
use crate::error::{Error, Result};
use crate::utils::fs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parsed project descriptor.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDescriptor {
    /// Identity of the project itself.
    #[serde(default)]
    pub project: Option<ProjectInfo>,

    /// Repository configuration.
    #[serde(default)]
    pub repository: Option<RepositorySection>,

    /// Dependencies active without any profile.
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,

    /// Named profiles contributing extra dependencies when active.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileSection>,
}

/// `[project]` section.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ProjectInfo {
    /// Group id.
    #[serde(default)]
    pub group: Option<String>,
    /// Artifact id.
    #[serde(default)]
    pub artifact: Option<String>,
    /// Version.
    #[serde(default)]
    pub version: Option<String>,
}

/// `[repository]` section.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct RepositorySection {
    /// Local repository directory, relative to the descriptor's directory.
    #[serde(default)]
    pub local: Option<PathBuf>,
}

/// `[profiles.<name>]` section.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ProfileSection {
    /// Dependencies added while the profile is active.
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
}

/// One `[[dependencies]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct DeclaredDependency {
    /// Group id.
    pub group: String,
    /// Artifact id.
    pub artifact: String,
    /// Version; may be omitted only when the coordinate is pinned by the caller.
    #[serde(default)]
    pub version: Option<String>,
    /// Scope (default `compile`).
    #[serde(default)]
    pub scope: ScopeType,
    /// Packaging (default `jar`).
    #[serde(default)]
    pub packaging: Option<String>,
    /// Classifier.
    #[serde(default)]
    pub classifier: Option<String>,
}

impl DeclaredDependency {
    /// Coordinate of this declaration, pinned when a version is declared.
    pub fn coordinate(&self) -> Result<Coordinate> {
        let mut coordinate = Coordinate::new(&self.group, &self.artifact)?;
        if let Some(packaging) = &self.packaging {
            coordinate = coordinate.with_packaging(packaging)?;
        }
        if let Some(classifier) = &self.classifier {
            coordinate = coordinate.with_classifier(classifier)?;
        }
        if let Some(version) = &self.version {
            coordinate = coordinate.with_version(version)?;
        }
        Ok(coordinate)
    }

    /// Whether this declaration answers a query for `coordinate`.
    ///
    /// Group and artifact must match; packaging and classifier are compared
    /// only when the query names them.
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        let packaging = self.packaging.as_deref().unwrap_or(super::DEFAULT_PACKAGING);

        self.group == coordinate.group()
            && self.artifact == coordinate.artifact()
            && coordinate.packaging().is_none_or(|p| p == packaging)
            && coordinate
                .classifier()
                .is_none_or(|c| self.classifier.as_deref() == Some(c))
    }
}

impl ProjectDescriptor {
    /// Reads and parses the descriptor at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Descriptor`] when the file is unreadable or not a valid descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Descriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::Descriptor {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Base dependencies followed by those of every active profile found.
    ///
    /// Unknown profile names are skipped.
    pub fn dependencies_for(&self, profiles: &[String]) -> Vec<DeclaredDependency> {
        let mut dependencies = self.dependencies.clone();
        for name in profiles {
            match self.profiles.get(name) {
                Some(profile) => dependencies.extend(profile.dependencies.iter().cloned()),
                None => log::debug!("Profile {} not declared, ignoring", name),
            }
        }
        dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
        [project]
        group = "com.acme"
        artifact = "shop"
        version = "1.0.0"

        [[dependencies]]
        group = "org.slf4j"
        artifact = "slf4j-api"
        version = "2.0.9"

        [[dependencies]]
        group = "org.junit"
        artifact = "junit"
        version = "5.10.0"
        scope = "test"

        [profiles.pg]
        dependencies = [
            { group = "org.postgresql", artifact = "postgresql", version = "42.7.1", scope = "runtime" },
        ]
    "#;

    #[test]
    fn parses_dependencies_and_profiles() {
        let descriptor: ProjectDescriptor = toml::from_str(DESCRIPTOR).unwrap();

        assert_eq!(descriptor.dependencies.len(), 2);
        assert_eq!(descriptor.dependencies[0].scope, ScopeType::Compile);
        assert_eq!(descriptor.dependencies[1].scope, ScopeType::Test);

        let all = descriptor.dependencies_for(&["pg".to_string(), "missing".to_string()]);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].scope, ScopeType::Runtime);
    }

    #[test]
    fn matching_respects_optional_parts() {
        let descriptor: ProjectDescriptor = toml::from_str(DESCRIPTOR).unwrap();
        let slf4j = &descriptor.dependencies[0];

        assert!(slf4j.matches(&Coordinate::new("org.slf4j", "slf4j-api").unwrap()));
        assert!(!slf4j.matches(&Coordinate::new("org.slf4j", "slf4j-simple").unwrap()));
        assert!(
            !slf4j.matches(&Coordinate::classified("org.slf4j", "slf4j-api", "jar", "sources").unwrap())
        );
        assert_eq!(
            slf4j.coordinate().unwrap().to_string(),
            "org.slf4j:slf4j-api:2.0.9"
        );
    }

    #[test]
    fn scopes_are_case_insensitive() {
        let descriptor: ProjectDescriptor = toml::from_str(
            r#"
            [[dependencies]]
            group = "org.postgresql"
            artifact = "postgresql"
            version = "42.7.1"
            scope = "Runtime"

            [[dependencies]]
            group = "org.junit"
            artifact = "junit"
            version = "5.10.0"
            scope = " TEST "
            "#,
        )
        .unwrap();

        assert_eq!(descriptor.dependencies[0].scope, ScopeType::Runtime);
        assert_eq!(descriptor.dependencies[1].scope, ScopeType::Test);
    }

    #[test]
    fn unknown_scope_is_a_parse_error() {
        let err = toml::from_str::<ProjectDescriptor>(
            "[[dependencies]]\ngroup = \"g\"\nartifact = \"a\"\nscope = \"sometimes\"\n",
        )
        .unwrap_err();

        assert!(err.to_string().contains("Unknown dependency scope: sometimes"));
    }

    #[test]
    fn load_reports_descriptor_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        std::fs::write(&path, "[[dependencies]]\ngroup = 1\n").unwrap();

        assert!(matches!(
            ProjectDescriptor::load(&path),
            Err(Error::Descriptor { .. })
        ));
        assert!(matches!(
            ProjectDescriptor::load(&dir.path().join("missing.toml")),
            Err(Error::Descriptor { .. })
        ));
    }
}
