//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use kodegen_bundler_archive::resolver::{DescriptorLoader, ResolveStage, StrategyStage};
use kodegen_bundler_archive::{
    Archive, ArchivePath, ArchiveShape, BuildSettings, BuildSettingsBuilder, Coordinate, Error,
    Result, ScopeType,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Temporary class path root holding compiled classes and resources.
pub struct ClassPathFixture {
    dir: TempDir,
}

impl ClassPathFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn settings(&self) -> BuildSettings {
        BuildSettingsBuilder::new()
            .class_path_root(self.root())
            .created_by("integration-tests")
            .build()
            .unwrap()
    }
}

/// In-memory archive with the given entries.
pub fn archive(name: &str, entries: &[(&str, &str)]) -> Archive {
    entries.iter().fold(
        Archive::create(ArchiveShape::Generic, name).unwrap(),
        |archive, (path, content)| {
            archive.add_bytes(ArchivePath::new(path).unwrap(), content.to_string())
        },
    )
}

/// Writes a zip artifact named `name` into `dir` and returns its path.
pub fn write_jar(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    archive(name, entries).write_zip(&path).unwrap();
    path
}

/// Descriptor loader answering `group:artifact` queries from a fixed table.
#[derive(Clone, Default)]
pub struct FakeLoader {
    artifacts: HashMap<String, Vec<PathBuf>>,
    fail_load: bool,
    loads: Arc<AtomicUsize>,
    profiles: Arc<Mutex<Vec<String>>>,
    scopes: Arc<Mutex<Vec<ScopeType>>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader whose descriptor can never be read.
    pub fn unreadable() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn with_artifact(mut self, key: &str, files: Vec<PathBuf>) -> Self {
        self.artifacts.insert(key.to_string(), files);
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn loaded_profiles(&self) -> Vec<String> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn applied_scopes(&self) -> Vec<ScopeType> {
        self.scopes.lock().unwrap().clone()
    }
}

impl DescriptorLoader for FakeLoader {
    fn load_descriptor(
        &self,
        descriptor: &Path,
        profiles: &[String],
    ) -> Result<Box<dyn ResolveStage>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(Error::Descriptor {
                path: descriptor.to_path_buf(),
                reason: "unreadable".to_string(),
            });
        }

        *self.profiles.lock().unwrap() = profiles.to_vec();
        Ok(Box::new(FakeStage {
            artifacts: self.artifacts.clone(),
            scopes: Arc::clone(&self.scopes),
        }))
    }
}

struct FakeStage {
    artifacts: HashMap<String, Vec<PathBuf>>,
    scopes: Arc<Mutex<Vec<ScopeType>>>,
}

impl ResolveStage for FakeStage {
    fn with_scopes(self: Box<Self>, scopes: &[ScopeType]) -> Result<Box<dyn ResolveStage>> {
        *self.scopes.lock().unwrap() = scopes.to_vec();
        Ok(self)
    }

    fn resolve(&self, coordinate: &Coordinate) -> Result<StrategyStage> {
        let key = format!("{}:{}", coordinate.group(), coordinate.artifact());
        self.artifacts
            .get(&key)
            .cloned()
            .map(StrategyStage::direct_only)
            .ok_or_else(|| Error::UnresolvedVersion {
                coordinate: coordinate.to_string(),
            })
    }
}
