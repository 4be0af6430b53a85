//! Class path lookup for classes, packages and resources.
//!
//! A [`ClassPath`] is an ordered list of directories (typically compiler
//! output and resource directories). Lookups return [`ClassPathEntry`]
//! values pairing the file on disk with its location relative to the root it
//! was found in, which is also its location inside the archive.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const CLASS_EXTENSION: &str = "class";

/// A file found on the class path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPathEntry {
    /// `/`-separated location relative to the class path root.
    pub relative: String,
    /// File on disk.
    pub source: PathBuf,
}

/// Ordered list of class path roots. Earlier roots shadow later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassPath {
    roots: Vec<PathBuf>,
}

impl ClassPath {
    /// Creates a class path from `roots`, searched in order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Class path roots in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Finds the class file for `class_name` plus its nested classes (`Outer$Inner`).
    ///
    /// The first root holding the class wins; nested classes are taken from
    /// the same directory.
    pub fn find_class(&self, class_name: &str) -> Result<Vec<ClassPathEntry>> {
        let not_found = || Error::ClassNotFound {
            class: class_name.to_string(),
            roots: self.roots.clone(),
        };

        let (package_dir, simple_name) = match class_name.rsplit_once('.') {
            Some((package, simple)) => (package.replace('.', "/"), simple),
            None => (String::new(), class_name),
        };
        if simple_name.is_empty() || !is_valid_name(class_name) {
            return Err(not_found());
        }

        for root in &self.roots {
            let dir = root.join(&package_dir);
            let class_file = dir.join(format!("{simple_name}.{CLASS_EXTENSION}"));
            if !class_file.is_file() {
                continue;
            }

            let nested_prefix = format!("{simple_name}$");
            let mut entries = vec![entry(root, class_file)?];
            for found in WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let found = found?;
                let nested = found.file_type().is_file()
                    && found.file_name().to_string_lossy().starts_with(&nested_prefix)
                    && has_class_extension(found.path());
                if nested {
                    entries.push(entry(root, found.into_path())?);
                }
            }

            log::debug!(
                "Found class {} in {} ({} files)",
                class_name,
                root.display(),
                entries.len()
            );
            return Ok(entries);
        }

        Err(not_found())
    }

    /// Finds every class file of `package`, descending into sub-packages when `recursive`.
    ///
    /// Classes are collected from all roots; when the same file exists in
    /// several roots the first one wins.
    pub fn find_package(&self, package: &str, recursive: bool) -> Result<Vec<ClassPathEntry>> {
        if !is_valid_name(package) {
            return Err(Error::PackageNotFound {
                package: package.to_string(),
                roots: self.roots.clone(),
            });
        }

        let package_dir = package.replace('.', "/");
        let mut found_package = false;
        let mut classes = BTreeMap::new();

        for root in &self.roots {
            let dir = root.join(&package_dir);
            if !dir.is_dir() {
                continue;
            }
            found_package = true;

            let walker = WalkDir::new(&dir).min_depth(1).sort_by_file_name();
            let walker = if recursive { walker } else { walker.max_depth(1) };

            for found in walker {
                let found = found?;
                if !found.file_type().is_file() || !has_class_extension(found.path()) {
                    continue;
                }
                let class = entry(root, found.into_path())?;
                classes.entry(class.relative.clone()).or_insert(class);
            }
        }

        if !found_package {
            return Err(Error::PackageNotFound {
                package: package.to_string(),
                roots: self.roots.clone(),
            });
        }

        log::debug!(
            "Found {} classes in package {} (recursive: {})",
            classes.len(),
            package,
            recursive
        );
        Ok(classes.into_values().collect())
    }

    /// Finds a resource by its `/`-separated name.
    ///
    /// Roots are searched first; a name that is a path to an existing file
    /// is accepted as-is. Names with a `..` segment are never found.
    pub fn find_resource(&self, resource: &str) -> Result<PathBuf> {
        let relative = resource.trim_start_matches('/');
        let escapes = resource.split(['/', '\\']).any(|segment| segment == "..");

        if !relative.is_empty() && !escapes {
            if let Some(found) = self
                .roots
                .iter()
                .map(|root| root.join(relative))
                .find(|candidate| candidate.is_file())
            {
                return Ok(found);
            }

            let literal = Path::new(resource);
            if literal.is_file() {
                return Ok(literal.to_path_buf());
            }
        }

        Err(Error::ResourceNotFound {
            resource: resource.to_string(),
            roots: self.roots.clone(),
        })
    }
}

fn entry(root: &Path, source: PathBuf) -> Result<ClassPathEntry> {
    let Ok(stripped) = source.strip_prefix(root) else {
        crate::bail!("{} is outside class path root {}", source.display(), root.display());
    };
    let relative = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Ok(ClassPathEntry { relative, source })
}

fn has_class_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(CLASS_EXTENSION)
}

/// Dotted Java-style name: non-empty segments without path separators.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.contains(['/', '\\']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    fn relatives(entries: &[ClassPathEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative.as_str()).collect()
    }

    #[test]
    fn class_lookup_includes_nested_classes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "com/acme/App.class");
        touch(dir.path(), "com/acme/App$Inner.class");
        touch(dir.path(), "com/acme/Application.class");

        let cp = ClassPath::new([dir.path()]);
        let entries = cp.find_class("com.acme.App").unwrap();

        assert_eq!(
            relatives(&entries),
            ["com/acme/App.class", "com/acme/App$Inner.class"]
        );
    }

    #[test]
    fn first_root_shadows_later_ones() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(first.path(), "a/B.class");
        touch(second.path(), "a/B.class");
        touch(second.path(), "a/C.class");

        let cp = ClassPath::new([first.path(), second.path()]);
        let class = cp.find_class("a.B").unwrap();
        assert!(class[0].source.starts_with(first.path()));

        let package = cp.find_package("a", false).unwrap();
        assert_eq!(relatives(&package), ["a/B.class", "a/C.class"]);
        assert!(package[0].source.starts_with(first.path()));
    }

    #[test]
    fn package_recursion() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "p/A.class");
        touch(dir.path(), "p/notes.txt");
        touch(dir.path(), "p/sub/B.class");

        let cp = ClassPath::new([dir.path()]);
        assert_eq!(relatives(&cp.find_package("p", false).unwrap()), ["p/A.class"]);
        assert_eq!(
            relatives(&cp.find_package("p", true).unwrap()),
            ["p/A.class", "p/sub/B.class"]
        );
        assert!(matches!(
            cp.find_package("missing", true),
            Err(Error::PackageNotFound { .. })
        ));
    }

    #[test]
    fn missing_class_and_resource() {
        let dir = tempfile::tempdir().unwrap();
        let cp = ClassPath::new([dir.path()]);

        assert!(matches!(cp.find_class("x.Y"), Err(Error::ClassNotFound { .. })));
        assert!(matches!(cp.find_class("x..Y"), Err(Error::ClassNotFound { .. })));
        assert!(matches!(
            cp.find_resource("nope.properties"),
            Err(Error::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn resource_found_in_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config/app.properties");

        let cp = ClassPath::new([dir.path()]);
        let found = cp.find_resource("/config/app.properties").unwrap();
        assert_eq!(found, dir.path().join("config/app.properties"));
    }

    #[test]
    fn resources_cannot_escape_the_roots() {
        let outer = tempfile::tempdir().unwrap();
        touch(outer.path(), "secret.properties");
        touch(outer.path(), "cp/app.properties");
        let root = outer.path().join("cp");

        let cp = ClassPath::new([root]);
        assert!(cp.find_resource("app.properties").is_ok());
        for name in ["../secret.properties", "/../secret.properties", "sub/../../secret.properties"] {
            assert!(
                matches!(cp.find_resource(name), Err(Error::ResourceNotFound { .. })),
                "{name}"
            );
        }

        let literal = outer.path().join("cp/../secret.properties");
        assert!(matches!(
            cp.find_resource(&literal.to_string_lossy()),
            Err(Error::ResourceNotFound { .. })
        ));
    }
}
