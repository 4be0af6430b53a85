//! Fluent builders for deployable archives.
//!
//! This library assembles archives of three shapes:
//! - Library archives (.jar): classes, resources and merged-in libraries
//! - Web archives (.war): classes under `WEB-INF/classes`, libraries under `WEB-INF/lib`
//! - Enterprise archives (.ear): deployable modules plus libraries under `lib/`
//!
//! Dependencies declared in a project descriptor can be resolved (with their
//! transitive closure) from a local repository and merged into the archive
//! under construction.
//!
//! ```no_run
//! use kodegen_bundler_archive::{ArchiveBuilder, ClassContainingArchiveBuilder, ScopeType};
//!
//! # fn example() -> kodegen_bundler_archive::Result<()> {
//! let jar = kodegen_bundler_archive::library("app.jar")?
//!     .append_classes(["com.acme.App", "com.acme.Config"])?
//!     .append_resource("logging.properties")?
//!     .resolve_maven_dependencies("project.toml")
//!     .with_scopes([ScopeType::Compile, ScopeType::Runtime])
//!     .resolve_dependency("org.slf4j", "slf4j-api")
//!     .apply()?
//!     .build()?;
//!
//! jar.write_zip("target/app.jar")?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod builder;
pub mod classpath;
pub mod error;
pub mod resolver;
pub mod settings;
mod utils;

// Re-export commonly used types
pub use archive::{
    Archive, ArchivePath, ArchiveShape, Asset, EnterpriseArchive, GenericArchive, JavaArchive,
    TypedArchive, WebArchive,
};
pub use builder::{
    ArchiveBuilder, ClassContainingArchiveBuilder, EarArchiveBuilder, JarArchiveBuilder,
    WarArchiveBuilder, enterprise, enterprise_with, library, library_with, web_deployable,
    web_deployable_with,
};
pub use error::{Error, Result};
pub use resolver::{Coordinate, DependencyResolver, ResolutionFailure, ScopeType};
pub use settings::{BuildSettings, BuildSettingsBuilder};
