//! Archive shapes and their internal layout.

use super::ArchivePath;
use std::fmt;

/// Archive shape.
///
/// The shape decides where classes, resources, manifest files and libraries
/// live inside the archive.
///
/// | shape           | classes            | resources          | libraries      | web root   |
/// |-----------------|--------------------|--------------------|----------------|------------|
/// | `Library`       | `/`                | `/`                | merged in      | -          |
/// | `WebDeployable` | `/WEB-INF/classes` | `/WEB-INF/classes` | `/WEB-INF/lib` | `/WEB-INF` |
/// | `Enterprise`    | -                  | -                  | `/lib`         | -          |
/// | `Generic`       | `/`                | `/`                | -              | -          |
///
/// Manifest resources always go under `/META-INF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiveShape {
    /// Shapeless container, e.g. an imported artifact.
    Generic,
    /// Java library archive (.jar).
    Library,
    /// Web archive (.war).
    WebDeployable,
    /// Enterprise archive (.ear).
    Enterprise,
}

impl ArchiveShape {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Generic => "zip",
            Self::Library => "jar",
            Self::WebDeployable => "war",
            Self::Enterprise => "ear",
        }
    }

    /// Directory holding compiled classes, if the shape carries classes.
    pub fn classes_root(self) -> Option<ArchivePath> {
        match self {
            Self::Generic | Self::Library => Some(ArchivePath::root()),
            Self::WebDeployable => Some(ArchivePath::from_static("/WEB-INF/classes")),
            Self::Enterprise => None,
        }
    }

    /// Directory holding class path resources.
    pub fn resources_root(self) -> Option<ArchivePath> {
        self.classes_root()
    }

    /// Directory holding manifest resources.
    pub fn manifest_root(self) -> ArchivePath {
        ArchivePath::from_static("/META-INF")
    }

    /// Directory holding nested library archives, for shapes that keep libraries nested.
    pub fn libraries_root(self) -> Option<ArchivePath> {
        match self {
            Self::WebDeployable => Some(ArchivePath::from_static("/WEB-INF/lib")),
            Self::Enterprise => Some(ArchivePath::from_static("/lib")),
            Self::Generic | Self::Library => None,
        }
    }

    /// Directory holding web descriptors and web resources.
    pub fn web_root(self) -> Option<ArchivePath> {
        match self {
            Self::WebDeployable => Some(ArchivePath::from_static("/WEB-INF")),
            _ => None,
        }
    }

    /// Whether an archive of this shape may be viewed as `target`.
    pub fn can_narrow_to(self, target: ArchiveShape) -> bool {
        self == target || self == Self::Generic || target == Self::Generic
    }
}

impl fmt::Display for ArchiveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generic => "generic",
            Self::Library => "library",
            Self::WebDeployable => "web",
            Self::Enterprise => "enterprise",
        };
        f.write_str(name)
    }
}
