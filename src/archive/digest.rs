//! Archive content digests.
//!
//! Archives are compared by content when the resolver deduplicates imported
//! artifacts: the digest covers the archive name plus every entry path and
//! its content, walked in path order so the result is deterministic.

use super::{Archive, Asset};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of an archive's name and entries.
pub(super) fn archive_sha256(archive: &Archive) -> String {
    let mut hasher = Sha256::new();
    update(&mut hasher, archive);
    format!("{:x}", hasher.finalize())
}

fn update(hasher: &mut Sha256, archive: &Archive) {
    hasher.update(archive.name().as_bytes());
    hasher.update([0u8]);

    for (path, asset) in archive.entries() {
        hasher.update(path.as_str().as_bytes());
        hasher.update([0u8]);
        match asset {
            Asset::Bytes(bytes) => {
                hasher.update((bytes.len() as u64).to_le_bytes());
                hasher.update(bytes);
            }
            // Nested archives contribute their own digest
            Asset::Archive(nested) => {
                let mut inner = Sha256::new();
                update(&mut inner, nested);
                hasher.update(inner.finalize());
            }
        }
    }
}
