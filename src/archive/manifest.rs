//! Default `META-INF/MANIFEST.MF`.

use super::{Archive, ArchivePath};

const MANIFEST_PATH: &str = "/META-INF/MANIFEST.MF";

pub(crate) fn manifest_path() -> ArchivePath {
    ArchivePath::from_static(MANIFEST_PATH)
}

/// Renders the default manifest (CRLF line endings, trailing blank line).
fn default_manifest(created_by: &str) -> String {
    format!("Manifest-Version: 1.0\r\nCreated-By: {created_by}\r\n\r\n")
}

impl Archive {
    /// Whether `META-INF/MANIFEST.MF` exists.
    pub fn has_manifest(&self) -> bool {
        self.get(&manifest_path()).is_some()
    }

    /// Adds the default manifest unless one is already present.
    pub fn add_manifest(self, created_by: &str) -> Self {
        if self.has_manifest() {
            return self;
        }
        self.add_bytes(manifest_path(), default_manifest(created_by))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveShape, Asset};

    #[test]
    fn adds_manifest_only_when_missing() {
        let jar = Archive::create(ArchiveShape::Library, "a.jar")
            .unwrap()
            .add_manifest("tests");
        let manifest = jar.get(&manifest_path()).and_then(Asset::as_bytes).unwrap();
        assert!(manifest.starts_with(b"Manifest-Version: 1.0\r\nCreated-By: tests\r\n"));

        let custom = Archive::create(ArchiveShape::Library, "b.jar")
            .unwrap()
            .add_bytes(manifest_path(), "Manifest-Version: 1.0\r\nMain-Class: App\r\n")
            .add_manifest("tests");
        let kept = custom.get(&manifest_path()).and_then(Asset::as_bytes).unwrap();
        assert!(kept.ends_with(b"Main-Class: App\r\n"));
    }
}
