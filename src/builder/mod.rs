//! Fluent archive builders.
//!
//! Every shape has its own builder type; the shared API lives in the
//! [`ArchiveBuilder`] trait (and [`ClassContainingArchiveBuilder`] for shapes
//! that carry classes). Trait methods return `Self`, so shape-specific
//! methods stay chainable after shared ones:
//!
//! ```no_run
//! use kodegen_bundler_archive::{ArchiveBuilder, ClassContainingArchiveBuilder, web_deployable};
//!
//! # fn example() -> kodegen_bundler_archive::Result<()> {
//! let war = web_deployable("shop.war")?
//!     .append_packages_recursively(["com.acme.shop"])?
//!     .append_web_resource("web.xml", "web.xml")?
//!     .append_libraries(Vec::<kodegen_bundler_archive::Archive>::new())?
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Library merge policies
//!
//! - [`JarArchiveBuilder`] merges each library into the archive in argument
//!   order, then makes sure a manifest exists.
//! - [`WarArchiveBuilder`] and [`EarArchiveBuilder`] nest all libraries in one
//!   batch under their libraries directory.
//!
//! # Module Organization
//!
//! - `core` - [`BuilderCore`], the owned archive plus settings
//! - `classes` - [`ClassContainingArchiveBuilder`]
//! - `library`, `web`, `enterprise` - the shape builders

mod classes;
mod core;
mod enterprise;
mod library;
mod web;

pub use self::core::BuilderCore;
pub use classes::ClassContainingArchiveBuilder;
pub use enterprise::EarArchiveBuilder;
pub use library::JarArchiveBuilder;
pub use web::WarArchiveBuilder;

use crate::archive::{Archive, TypedArchive};
use crate::error::Result;
use crate::resolver::{DependencyResolver, DescriptorLoader, ManifestLoader};
use crate::settings::BuildSettings;
use std::path::Path;

/// Operations shared by every archive builder.
pub trait ArchiveBuilder: Sized {
    /// Typed archive returned by [`ArchiveBuilder::build`].
    type Output: TypedArchive;

    /// Shared builder state.
    fn core(&self) -> &BuilderCore;

    /// Mutable shared builder state.
    fn core_mut(&mut self) -> &mut BuilderCore;

    /// Library-merge policy of this shape.
    fn merge_libraries(
        archive: Archive,
        libraries: Vec<Archive>,
        settings: &BuildSettings,
    ) -> Result<Archive>;

    /// Narrows the assembled archive to [`Self::Output`], consuming the builder.
    fn build(self) -> Result<Self::Output>;

    /// Archive assembled so far.
    fn archive(&self) -> &Archive {
        self.core().archive()
    }

    /// Settings this builder was created with.
    fn settings(&self) -> &BuildSettings {
        self.core().settings()
    }

    /// Appends `libraries` through the shape's merge policy.
    ///
    /// The builder is consumed on error.
    fn append_libraries<I, A>(mut self, libraries: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Archive>,
    {
        let libraries: Vec<Archive> = libraries.into_iter().map(Into::into).collect();
        log::debug!(
            "{}: appending {} libraries",
            self.archive().name(),
            libraries.len()
        );

        self.core_mut().rebind_or_discard(|archive, settings| {
            Self::merge_libraries(archive, libraries, settings)
        })?;
        Ok(self)
    }

    /// Opens a resolver over the TOML project descriptor at `descriptor`.
    ///
    /// The descriptor is read lazily by the first resolve call.
    fn resolve_maven_dependencies(self, descriptor: impl AsRef<Path>) -> DependencyResolver<Self> {
        let loader = ManifestLoader::from_settings(self.settings());
        self.resolve_dependencies_with(descriptor, loader)
    }

    /// Opens a resolver using a custom descriptor `loader`.
    fn resolve_dependencies_with<L>(
        self,
        descriptor: impl AsRef<Path>,
        loader: L,
    ) -> DependencyResolver<Self>
    where
        L: DescriptorLoader + 'static,
    {
        let descriptor = descriptor.as_ref().to_path_buf();
        DependencyResolver::new(self, descriptor, Box::new(loader))
    }
}

/// Library (.jar) builder with default settings.
pub fn library(name: impl Into<String>) -> Result<JarArchiveBuilder> {
    library_with(name, BuildSettings::default())
}

/// Library (.jar) builder with explicit settings.
pub fn library_with(name: impl Into<String>, settings: BuildSettings) -> Result<JarArchiveBuilder> {
    JarArchiveBuilder::new(name, settings)
}

/// Web archive (.war) builder with default settings.
pub fn web_deployable(name: impl Into<String>) -> Result<WarArchiveBuilder> {
    web_deployable_with(name, BuildSettings::default())
}

/// Web archive (.war) builder with explicit settings.
pub fn web_deployable_with(
    name: impl Into<String>,
    settings: BuildSettings,
) -> Result<WarArchiveBuilder> {
    WarArchiveBuilder::new(name, settings)
}

/// Enterprise archive (.ear) builder with default settings.
pub fn enterprise(name: impl Into<String>) -> Result<EarArchiveBuilder> {
    enterprise_with(name, BuildSettings::default())
}

/// Enterprise archive (.ear) builder with explicit settings.
pub fn enterprise_with(
    name: impl Into<String>,
    settings: BuildSettings,
) -> Result<EarArchiveBuilder> {
    EarArchiveBuilder::new(name, settings)
}
