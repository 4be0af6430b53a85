//! ZIP import and export.
//!
//! Imported archives are always [`GenericArchive`]s named after the source
//! file; nested archives found inside a ZIP stay opaque byte entries.
//! On export, nested [`Asset::Archive`] entries are serialized recursively.

use super::{Archive, ArchivePath, ArchiveShape, Asset, GenericArchive};
use crate::error::{Context, ErrorExt, Result};
use crate::utils::fs;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

impl Archive {
    /// Imports the ZIP file at `path` as a generic archive named after the file.
    pub fn import_zip(path: impl AsRef<Path>) -> Result<GenericArchive> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("archive path {} has no UTF-8 file name", path.display()))?;

        let file = std::fs::File::open(path).fs_context("opening archive for import", path)?;
        let archive = Self::read_zip(name, BufReader::new(file))
            .with_context(|| format!("importing {}", path.display()))?;

        log::debug!("Imported {} ({} entries)", name, archive.len());
        archive.narrow()
    }

    /// Reads ZIP content from `reader` into a new generic archive.
    pub fn read_zip<R: Read + Seek>(name: &str, reader: R) -> Result<Self> {
        let mut zip = ZipArchive::new(reader)?;
        let mut archive = Self::create(ArchiveShape::Generic, name)?;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }

            let path = ArchivePath::new(entry.name())?;
            // The declared size comes from the file and is not trusted for allocation.
            let mut content = Vec::with_capacity(entry.size().min(MAX_PREALLOCATION) as usize);
            entry.read_to_end(&mut content)?;
            archive = archive.add_bytes(path, content);
        }

        Ok(archive)
    }

    /// Writes this archive as a ZIP stream and returns the writer.
    pub fn write_zip_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);

        for (path, asset) in self.entries() {
            zip.start_file(path.entry_name(), entry_options())?;
            match asset {
                Asset::Bytes(bytes) => zip.write_all(bytes)?,
                Asset::Archive(nested) => zip.write_all(&nested.to_zip_bytes()?)?,
            }
        }

        Ok(zip.finish()?)
    }

    /// Serializes this archive to ZIP bytes.
    pub fn to_zip_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write_zip_to(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Exports this archive to `path`, creating parent directories as needed.
    pub fn write_zip(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = fs::create_file(path)?;
        let mut writer = self.write_zip_to(BufWriter::new(file))?;
        writer.flush().fs_context("flushing exported archive", path)?;

        log::info!("Exported {} to {}", self.name(), path.display());
        Ok(())
    }
}

/// Upper bound for the buffer reserved up front per imported entry.
const MAX_PREALLOCATION: u64 = 1 << 20;

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}
