//! Normalized entry paths inside an archive.

use crate::error::{Error, Result};
use std::fmt;

/// Absolute, `/`-separated location of an entry inside an [`Archive`](super::Archive).
///
/// Paths are normalized on construction: backslashes become `/`, empty and
/// `.` segments are dropped, and the result always starts with `/`.
/// Parent segments (`..`) are rejected so an entry can never escape the
/// archive root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchivePath(String);

impl ArchivePath {
    /// Parses and normalizes `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] when the path contains a `..` segment.
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let mut segments = Vec::new();

        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(Error::InvalidPath {
                        path: raw.to_string(),
                        reason: "parent segments are not allowed".to_string(),
                    });
                }
                s => segments.push(s),
            }
        }

        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// The archive root (`/`).
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Builds a path from a literal that is already normalized.
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(path.starts_with('/') && !path[1..].contains("//"));
        Self(path.to_string())
    }

    /// Returns the normalized path, always starting with `/`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the archive root.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Appends `child` (itself normalized) below this path.
    pub fn join(&self, child: impl AsRef<str>) -> Result<Self> {
        let child = Self::new(child)?;
        if self.is_root() {
            return Ok(child);
        }
        if child.is_root() {
            return Ok(self.clone());
        }
        Ok(Self(format!("{}{}", self.0, child.0)))
    }

    /// Returns the containing directory, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// Returns the last segment, `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit('/').next()
    }

    /// The path relative to the root, without the leading `/` (ZIP entry name form).
    pub(crate) fn entry_name(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for ArchivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArchivePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_dots() {
        let path = ArchivePath::new(r"WEB-INF\\lib/./a.jar//").unwrap();
        assert_eq!(path.as_str(), "/WEB-INF/lib/a.jar");
        assert_eq!(path.entry_name(), "WEB-INF/lib/a.jar");
    }

    #[test]
    fn rejects_parent_segments() {
        let err = ArchivePath::new("META-INF/../../etc/passwd").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn join_parent_and_file_name() {
        let lib = ArchivePath::from_static("/WEB-INF/lib");
        let jar = lib.join("commons.jar").unwrap();

        assert_eq!(jar.as_str(), "/WEB-INF/lib/commons.jar");
        assert_eq!(jar.parent(), Some(lib));
        assert_eq!(jar.file_name(), Some("commons.jar"));
        assert_eq!(ArchivePath::root().join("a").unwrap().parent(), Some(ArchivePath::root()));
        assert_eq!(ArchivePath::root().file_name(), None);
    }
}
