//! Dependency resolution bound to an archive builder.
//!
//! A [`DependencyResolver`] is opened from a builder with
//! [`ArchiveBuilder::resolve_maven_dependencies`]. It takes ownership of the
//! builder, accumulates profile and scope filters, resolves coordinates
//! (with their transitive closure) into imported archives, and finally
//! [`apply`](DependencyResolver::apply)s them through the builder's
//! library-merge policy, handing the builder back.
//!
//! # Failure policy
//!
//! Resolution is fail-soft: when loading the descriptor, resolving a
//! coordinate or importing one of its files fails, that resolve call adds
//! nothing and the chain carries on. Each absorbed failure is logged at
//! `warn` level and recorded as a [`ResolutionFailure`], available from
//! [`DependencyResolver::failures`] before applying.
//!
//! # Module Organization
//!
//! - [`coordinate`] - coordinates and scopes
//! - [`stage`] - loader / stage traits implemented by resolvers
//! - [`descriptor`] - TOML project descriptor format
//! - [`manifest`] - default loader over a TOML descriptor
//! - [`repository`] - local repository layout and transitive walk

pub mod coordinate;
pub mod descriptor;
pub mod manifest;
pub mod repository;
pub mod stage;

pub use coordinate::{Coordinate, DEFAULT_PACKAGING, ScopeType};
pub use manifest::ManifestLoader;
pub use repository::LocalRepository;
pub use stage::{DescriptorLoader, ResolveStage, ResolvedFiles, StrategyStage};

use crate::archive::{Archive, GenericArchive};
use crate::builder::ArchiveBuilder;
use crate::error::Result;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

/// A resolve call whose failure was absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    /// Coordinate as requested.
    pub coordinate: String,
    /// Rendered error.
    pub reason: String,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coordinate, self.reason)
    }
}

/// Resolves dependencies declared in a project descriptor into the owning builder.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_archive::{ArchiveBuilder, ScopeType, web_deployable};
///
/// # fn example() -> kodegen_bundler_archive::Result<()> {
/// let war = web_deployable("shop.war")?
///     .resolve_maven_dependencies("project.toml")
///     .with_profile("postgres")
///     .with_scopes([ScopeType::Compile, ScopeType::Runtime])
///     .resolve_dependency("org.slf4j", "slf4j-api")
///     .resolve_dependency("org.postgresql", "postgresql")
///     .apply()?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct DependencyResolver<B> {
    builder: B,
    descriptor: PathBuf,
    loader: Box<dyn DescriptorLoader>,
    stage: Option<Box<dyn ResolveStage>>,
    profiles: BTreeSet<String>,
    scopes: BTreeSet<ScopeType>,
    resolved: Vec<GenericArchive>,
    digests: HashSet<String>,
    failures: Vec<ResolutionFailure>,
}

impl<B> fmt::Debug for DependencyResolver<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("descriptor", &self.descriptor)
            .field("loaded", &self.stage.is_some())
            .field("profiles", &self.profiles)
            .field("scopes", &self.scopes)
            .field(
                "resolved",
                &self.resolved.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("failures", &self.failures)
            .finish()
    }
}

impl<B: ArchiveBuilder> DependencyResolver<B> {
    /// Binds a resolver to `builder`; the descriptor is not read until the first resolve.
    pub(crate) fn new(builder: B, descriptor: PathBuf, loader: Box<dyn DescriptorLoader>) -> Self {
        Self {
            builder,
            descriptor,
            loader,
            stage: None,
            profiles: BTreeSet::new(),
            scopes: BTreeSet::new(),
            resolved: Vec::new(),
            digests: HashSet::new(),
            failures: Vec::new(),
        }
    }

    /// Activates `profile` for the descriptor load.
    ///
    /// Profiles and scopes are read when the descriptor is loaded, i.e. at
    /// the first resolve call; later changes do not reload it.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.insert(profile.into());
        self.warn_if_loaded("profile");
        self
    }

    /// Restricts resolution to dependencies declared with one of `scopes`.
    pub fn with_scopes<I>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = ScopeType>,
    {
        self.scopes.extend(scopes);
        self.warn_if_loaded("scope");
        self
    }

    /// Resolves `group:artifact` with its transitive closure.
    pub fn resolve_dependency(self, group: &str, artifact: &str) -> Self {
        let requested = format!("{group}:{artifact}");
        self.resolve_requested(requested, Coordinate::new(group, artifact))
    }

    /// Resolves `group:artifact:packaging:classifier` with its transitive closure.
    pub fn resolve_dependency_classified(
        self,
        group: &str,
        artifact: &str,
        packaging: &str,
        classifier: &str,
    ) -> Self {
        let requested = format!("{group}:{artifact}:{packaging}:{classifier}");
        self.resolve_requested(
            requested,
            Coordinate::classified(group, artifact, packaging, classifier),
        )
    }

    /// Resolves an already built coordinate with its transitive closure.
    pub fn resolve_coordinate(self, coordinate: Coordinate) -> Self {
        let requested = coordinate.to_string();
        self.resolve_requested(requested, Ok(coordinate))
    }

    /// Merges every resolved archive into the owning builder and returns it.
    ///
    /// With nothing resolved the builder is returned untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from the builder's library-merge policy.
    pub fn apply(self) -> Result<B> {
        if !self.failures.is_empty() {
            log::warn!(
                "Applying {} resolved archives for {} ({} resolve calls failed)",
                self.resolved.len(),
                self.descriptor.display(),
                self.failures.len()
            );
        }

        if self.resolved.is_empty() {
            log::debug!("No dependencies resolved from {}", self.descriptor.display());
            return Ok(self.builder);
        }

        log::debug!(
            "Applying {} resolved archives from {}",
            self.resolved.len(),
            self.descriptor.display()
        );
        self.builder.append_libraries(self.resolved)
    }

    /// Project descriptor this resolver reads.
    pub fn descriptor(&self) -> &Path {
        &self.descriptor
    }

    /// Accumulated profiles.
    pub fn profiles(&self) -> &BTreeSet<String> {
        &self.profiles
    }

    /// Accumulated scopes.
    pub fn scopes(&self) -> &BTreeSet<ScopeType> {
        &self.scopes
    }

    /// Archives resolved so far, deduplicated by content.
    pub fn resolved(&self) -> &[GenericArchive] {
        &self.resolved
    }

    /// Resolve calls whose failure was absorbed.
    pub fn failures(&self) -> &[ResolutionFailure] {
        &self.failures
    }

    /// Whether the descriptor has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.stage.is_some()
    }

    fn resolve_requested(mut self, requested: String, coordinate: Result<Coordinate>) -> Self {
        match coordinate.and_then(|coordinate| self.try_resolve(&coordinate)) {
            Ok(archives) => {
                let before = self.resolved.len();
                for archive in archives {
                    if self.digests.insert(archive.content_digest()) {
                        self.resolved.push(archive);
                    }
                }
                log::debug!(
                    "Resolved {} ({} new archives)",
                    requested,
                    self.resolved.len() - before
                );
            }
            Err(error) => {
                log::warn!("Failed to resolve {}: {}", requested, error);
                self.failures.push(ResolutionFailure {
                    coordinate: requested,
                    reason: error.to_string(),
                });
            }
        }
        self
    }

    /// Resolves one coordinate; all-or-nothing for the imports of this call.
    fn try_resolve(&mut self, coordinate: &Coordinate) -> Result<Vec<GenericArchive>> {
        let files = self
            .stage()?
            .resolve(coordinate)?
            .with_transitivity()
            .as_files();

        files.iter().map(Archive::import_zip).collect()
    }

    /// Loads the descriptor on first use. A failed load is retried by the next call.
    fn stage(&mut self) -> Result<&dyn ResolveStage> {
        let stage = match self.stage.take() {
            Some(stage) => stage,
            None => self.load_stage()?,
        };
        Ok(&**self.stage.insert(stage))
    }

    fn load_stage(&self) -> Result<Box<dyn ResolveStage>> {
        let profiles: Vec<String> = self.profiles.iter().cloned().collect();
        let stage = self.loader.load_descriptor(&self.descriptor, &profiles)?;

        if self.scopes.is_empty() {
            return Ok(stage);
        }
        let scopes: Vec<ScopeType> = self.scopes.iter().copied().collect();
        stage.with_scopes(&scopes)
    }

    fn warn_if_loaded(&self, what: &str) {
        if self.stage.is_some() {
            log::warn!(
                "{} added after {} was loaded; it applies to no further resolution",
                what,
                self.descriptor.display()
            );
        }
    }
}
