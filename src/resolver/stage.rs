//! Resolution stages exposed by descriptor loaders.
//!
//! A [`DescriptorLoader`] turns a project descriptor into a [`ResolveStage`],
//! which answers coordinate queries with a [`StrategyStage`]; the strategy
//! stage then yields either the direct artifact files or the whole
//! transitive closure. [`ManifestLoader`](super::ManifestLoader) is the
//! default implementation; any other resolver can be plugged in through
//! these traits.

use super::{Coordinate, ScopeType};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Loads a project descriptor with a set of active profiles.
pub trait DescriptorLoader {
    /// Loads `descriptor`, activating `profiles`.
    fn load_descriptor(&self, descriptor: &Path, profiles: &[String])
    -> Result<Box<dyn ResolveStage>>;
}

impl<F> DescriptorLoader for F
where
    F: Fn(&Path, &[String]) -> Result<Box<dyn ResolveStage>>,
{
    fn load_descriptor(
        &self,
        descriptor: &Path,
        profiles: &[String],
    ) -> Result<Box<dyn ResolveStage>> {
        self(descriptor, profiles)
    }
}

/// A loaded descriptor, ready to resolve coordinates.
pub trait ResolveStage {
    /// Restricts the stage to dependencies declared with one of `scopes`.
    fn with_scopes(self: Box<Self>, scopes: &[ScopeType]) -> Result<Box<dyn ResolveStage>>;

    /// Resolves `coordinate` against the descriptor.
    fn resolve(&self, coordinate: &Coordinate) -> Result<StrategyStage>;
}

/// Outcome of resolving one coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyStage {
    direct: Vec<PathBuf>,
    closure: Vec<PathBuf>,
}

impl StrategyStage {
    /// Creates a stage from the coordinate's own files and its full closure.
    ///
    /// `closure` is expected to start with the direct files.
    pub fn new(direct: Vec<PathBuf>, closure: Vec<PathBuf>) -> Self {
        Self { direct, closure }
    }

    /// Stage where the closure is just the direct files.
    pub fn direct_only(files: Vec<PathBuf>) -> Self {
        Self {
            closure: files.clone(),
            direct: files,
        }
    }

    /// Selects the whole transitive closure.
    pub fn with_transitivity(self) -> ResolvedFiles {
        ResolvedFiles(self.closure)
    }

    /// Selects only the coordinate's own files.
    pub fn without_transitivity(self) -> ResolvedFiles {
        ResolvedFiles(self.direct)
    }
}

/// Artifact files selected from a [`StrategyStage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFiles(Vec<PathBuf>);

impl ResolvedFiles {
    /// Artifact files in resolution order.
    pub fn as_files(self) -> Vec<PathBuf> {
        self.0
    }
}
