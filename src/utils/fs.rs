//! File system utilities for archive assembly.
//!
//! Thin wrappers that attach the operation and path to every IO error.

use crate::error::{ErrorExt, Result};
use bytes::Bytes;
use std::{fs, path::Path};

/// Creates a new file at the given path, creating any parent directories as needed.
pub fn create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).fs_context("creating parent directory", parent)?;
    }
    fs::File::create(path).fs_context("creating file", path)
}

/// Reads a whole file into memory.
pub fn read_file(path: &Path) -> Result<Bytes> {
    fs::read(path)
        .map(Bytes::from)
        .fs_context("reading file", path)
}

/// Reads a UTF-8 text file.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).fs_context("reading file", path)
}
