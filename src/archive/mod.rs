//! In-memory archive container.
//!
//! An [`Archive`] is a named, shaped collection of path-addressed entries.
//! Entries hold either raw bytes or a nested archive (libraries inside a web
//! archive, modules inside an enterprise archive). Mutating operations take
//! the archive by value and hand back the updated archive, so the owner
//! always rebinds to the latest result.
//!
//! # Module Organization
//!
//! - [`path`] - normalized entry paths
//! - [`shape`] - archive shapes and their layout
//! - [`typed`] - typed views returned by the builders
//! - `digest` - content digests used for deduplication
//! - `manifest` - default `META-INF/MANIFEST.MF`
//! - `zipfile` - ZIP import and export

mod digest;
mod manifest;
pub mod path;
pub mod shape;
pub mod typed;
mod zipfile;

pub use path::ArchivePath;
pub use shape::ArchiveShape;
pub use typed::{EnterpriseArchive, GenericArchive, JavaArchive, TypedArchive, WebArchive};

use crate::error::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Content stored at an archive path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    /// Raw file content.
    Bytes(Bytes),
    /// Nested archive, serialized to ZIP bytes on export.
    Archive(Box<Archive>),
}

impl Asset {
    /// Raw content, if this is a file entry.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Archive(_) => None,
        }
    }

    /// Nested archive, if this is an archive entry.
    pub fn as_archive(&self) -> Option<&Archive> {
        match self {
            Self::Archive(archive) => Some(archive),
            Self::Bytes(_) => None,
        }
    }
}

impl From<Bytes> for Asset {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Archive> for Asset {
    fn from(archive: Archive) -> Self {
        Self::Archive(Box::new(archive))
    }
}

/// Named, shaped container of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    name: String,
    shape: ArchiveShape,
    entries: BTreeMap<ArchivePath, Asset>,
}

impl Archive {
    /// Creates an empty archive of `shape` named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is empty, blank, `.` or `..`,
    /// or contains a path separator.
    pub fn create(shape: ArchiveShape, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        log::debug!("Created {} archive {}", shape, name);

        Ok(Self {
            name,
            shape,
            entries: BTreeMap::new(),
        })
    }

    /// Empty archive with the same name and shape, used while an owner rebinds.
    pub(crate) fn detached(&self) -> Self {
        Self {
            name: self.name.clone(),
            shape: self.shape,
            entries: BTreeMap::new(),
        }
    }

    /// Archive name (also the file name used when nested or exported).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archive shape.
    pub fn shape(&self) -> ArchiveShape {
        self.shape
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the archive holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = (&ArchivePath, &Asset)> {
        self.entries.iter()
    }

    /// Entry paths in path order.
    pub fn paths(&self) -> impl Iterator<Item = &ArchivePath> {
        self.entries.keys()
    }

    /// Entry at `path`.
    pub fn get(&self, path: &ArchivePath) -> Option<&Asset> {
        self.entries.get(path)
    }

    /// Whether an entry exists at `path` (any spelling accepted by [`ArchivePath::new`]).
    pub fn contains(&self, path: impl AsRef<str>) -> bool {
        ArchivePath::new(path)
            .map(|p| self.entries.contains_key(&p))
            .unwrap_or(false)
    }

    /// Nested archives stored directly inside `dir`.
    pub fn nested_archives_in(&self, dir: &ArchivePath) -> Vec<&Archive> {
        self.entries
            .iter()
            .filter(|(path, _)| path.parent().as_ref() == Some(dir))
            .filter_map(|(_, asset)| asset.as_archive())
            .collect()
    }

    /// Adds `asset` at `path`. An existing entry at the same path is replaced.
    pub fn add(mut self, path: ArchivePath, asset: impl Into<Asset>) -> Self {
        let asset = asset.into();
        if self.entries.insert(path.clone(), asset).is_some() {
            log::debug!("{}: replaced entry {}", self.name, path);
        }
        self
    }

    /// Adds raw bytes at `path`.
    pub fn add_bytes(self, path: ArchivePath, bytes: impl Into<Bytes>) -> Self {
        self.add(path, Asset::Bytes(bytes.into()))
    }

    /// Nests `archive` inside `dir` under its own name.
    pub fn add_archive_at(self, dir: &ArchivePath, archive: Archive) -> Result<Self> {
        let path = dir.join(&archive.name)?;
        Ok(self.add(path, archive))
    }

    /// Nests every archive in `archives` inside `dir` in one call.
    pub fn add_archives_at<I>(self, dir: &ArchivePath, archives: I) -> Result<Self>
    where
        I: IntoIterator<Item = Archive>,
    {
        archives
            .into_iter()
            .try_fold(self, |acc, archive| acc.add_archive_at(dir, archive))
    }

    /// Copies every entry of `other` into this archive.
    ///
    /// Entries of `other` replace entries at the same path; `other`'s name
    /// and shape are not carried over.
    pub fn merge(mut self, other: Archive) -> Self {
        log::debug!(
            "{}: merging {} entries from {}",
            self.name,
            other.entries.len(),
            other.name
        );
        self.entries.extend(other.entries);
        self
    }

    /// Views this archive as the typed archive `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the shapes are incompatible
    /// (see [`ArchiveShape::can_narrow_to`]).
    pub fn narrow<T: TypedArchive>(mut self) -> Result<T> {
        if !self.shape.can_narrow_to(T::SHAPE) {
            return Err(Error::ShapeMismatch {
                name: self.name,
                shape: self.shape,
                target: T::SHAPE,
            });
        }
        self.shape = T::SHAPE;
        Ok(<T as typed::sealed::Wrap>::wrap(self))
    }

    /// Content digest (name and entries) used to deduplicate identical archives.
    pub fn content_digest(&self) -> String {
        digest::archive_sha256(self)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name must not be empty"
    } else if name.contains(['/', '\\']) {
        "name must not contain path separators"
    } else if matches!(name, "." | "..") {
        "name must not be a relative directory"
    } else {
        return Ok(());
    };

    Err(Error::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
