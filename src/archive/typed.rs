//! Typed archive views.
//!
//! Builders hand out one of these from `build()`. Each view wraps an
//! [`Archive`] whose shape matches the view and dereferences to it.

use super::{Archive, ArchivePath, ArchiveShape};
use bytes::Bytes;
use std::ops::Deref;

/// Archive with a statically known shape.
///
/// Sealed: values are only obtained through [`Archive::narrow`], which
/// checks the shape.
pub trait TypedArchive: Sized + sealed::Wrap {
    /// Shape carried by every archive of this type.
    const SHAPE: ArchiveShape;

    /// Unwraps the underlying archive.
    fn into_archive(self) -> Archive;
}

pub(super) mod sealed {
    use super::Archive;

    pub trait Wrap {
        /// Wraps an archive whose shape was already checked.
        fn wrap(archive: Archive) -> Self;
    }
}

macro_rules! typed_archive {
    ($(#[$meta:meta])* $name:ident => $shape:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(Archive);

        impl sealed::Wrap for $name {
            fn wrap(archive: Archive) -> Self {
                debug_assert_eq!(archive.shape(), $shape);
                Self(archive)
            }
        }

        impl TypedArchive for $name {
            const SHAPE: ArchiveShape = $shape;

            fn into_archive(self) -> Archive {
                self.0
            }
        }

        impl Deref for $name {
            type Target = Archive;

            fn deref(&self) -> &Archive {
                &self.0
            }
        }

        impl From<$name> for Archive {
            fn from(typed: $name) -> Archive {
                typed.0
            }
        }
    };
}

typed_archive!(
    /// Shapeless archive, the result of importing an artifact file.
    GenericArchive => ArchiveShape::Generic
);

typed_archive!(
    /// Library archive (.jar).
    JavaArchive => ArchiveShape::Library
);

typed_archive!(
    /// Web archive (.war).
    WebArchive => ArchiveShape::WebDeployable
);

typed_archive!(
    /// Enterprise archive (.ear).
    EnterpriseArchive => ArchiveShape::Enterprise
);

impl JavaArchive {
    /// Content of `META-INF/MANIFEST.MF`, if present.
    pub fn manifest(&self) -> Option<&Bytes> {
        self.get(&super::manifest::manifest_path())
            .and_then(|asset| asset.as_bytes())
    }
}

impl WebArchive {
    /// Libraries nested under `WEB-INF/lib`.
    pub fn libraries(&self) -> Vec<&Archive> {
        self.nested_archives_in(&libraries_root(Self::SHAPE))
    }
}

impl EnterpriseArchive {
    /// Deployable modules at the archive root.
    pub fn modules(&self) -> Vec<&Archive> {
        self.nested_archives_in(&ArchivePath::root())
    }

    /// Libraries nested under `lib/`.
    pub fn libraries(&self) -> Vec<&Archive> {
        self.nested_archives_in(&libraries_root(Self::SHAPE))
    }
}

fn libraries_root(shape: ArchiveShape) -> ArchivePath {
    shape.libraries_root().unwrap_or_else(ArchivePath::root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn typed_views_come_from_a_checked_narrow() {
        let imported = Archive::create(ArchiveShape::Generic, "shop.war").unwrap();
        let war: WebArchive = imported.narrow().unwrap();
        assert_eq!(war.shape(), ArchiveShape::WebDeployable);
        assert!(war.libraries().is_empty());

        let jar = Archive::create(ArchiveShape::Library, "a.jar").unwrap();
        assert!(matches!(
            jar.narrow::<EnterpriseArchive>(),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
