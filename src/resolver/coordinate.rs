//! Dependency coordinates and scopes.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Packaging assumed when a coordinate does not name one.
pub const DEFAULT_PACKAGING: &str = "jar";

/// Dependency query: `group:artifact[:packaging[:classifier]]`, optionally pinned to a version.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_archive::Coordinate;
///
/// let plain: Coordinate = "org.slf4j:slf4j-api".parse().unwrap();
/// assert_eq!(plain.to_string(), "org.slf4j:slf4j-api");
///
/// let pinned: Coordinate = "org.slf4j:slf4j-api:jar:sources:2.0.9".parse().unwrap();
/// assert_eq!(pinned.classifier(), Some("sources"));
/// assert_eq!(pinned.version(), Some("2.0.9"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    packaging: Option<String>,
    classifier: Option<String>,
    version: Option<String>,
}

impl Coordinate {
    /// Creates a `group:artifact` coordinate.
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Result<Self> {
        let coordinate = Self {
            group: group.into(),
            artifact: artifact.into(),
            packaging: None,
            classifier: None,
            version: None,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Creates a `group:artifact:packaging:classifier` coordinate.
    pub fn classified(
        group: impl Into<String>,
        artifact: impl Into<String>,
        packaging: impl Into<String>,
        classifier: impl Into<String>,
    ) -> Result<Self> {
        let coordinate = Self {
            group: group.into(),
            artifact: artifact.into(),
            packaging: Some(packaging.into()),
            classifier: Some(classifier.into()),
            version: None,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Returns a copy with `packaging` set.
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Result<Self> {
        self.packaging = Some(packaging.into());
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with `classifier` set.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Result<Self> {
        self.classifier = Some(classifier.into());
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy pinned to `version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Result<Self> {
        self.version = Some(version.into());
        self.validate()?;
        Ok(self)
    }

    /// Group id.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Artifact id.
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Explicit packaging, if any.
    pub fn packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// Packaging, defaulting to `jar`.
    pub fn packaging_or_default(&self) -> &str {
        self.packaging().unwrap_or(DEFAULT_PACKAGING)
    }

    /// Classifier, if any.
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Version, if pinned.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Version-less identity used to pick the nearest declaration of an artifact.
    pub fn key(&self) -> String {
        let mut key = format!("{}:{}:{}", self.group, self.artifact, self.packaging_or_default());
        if let Some(classifier) = &self.classifier {
            key.push(':');
            key.push_str(classifier);
        }
        key
    }

    fn validate(&self) -> Result<()> {
        let parts = [
            ("group", Some(self.group.as_str())),
            ("artifact", Some(self.artifact.as_str())),
            ("packaging", self.packaging.as_deref()),
            ("classifier", self.classifier.as_deref()),
            ("version", self.version.as_deref()),
        ];

        for (label, value) in parts {
            let Some(value) = value else { continue };
            if value.is_empty() || value.contains(':') || value.contains(char::is_whitespace) {
                return Err(Error::InvalidCoordinate {
                    coordinate: self.to_string(),
                    reason: format!("{label} must be non-empty without ':' or whitespace"),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    /// Versioned coordinates print as `g:a[:p[:c]]:v`, version-less ones as `g:a[:p[:c]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(packaging) = &self.packaging {
            write!(f, ":{packaging}")?;
        } else if self.classifier.is_some() {
            write!(f, ":{DEFAULT_PACKAGING}")?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parses `g:a`, `g:a:v`, `g:a:p:v` or `g:a:p:c:v`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let (group, artifact, packaging, classifier, version) = match parts.as_slice() {
            [g, a] => (g, a, None, None, None),
            [g, a, v] => (g, a, None, None, Some(v)),
            [g, a, p, v] => (g, a, Some(p), None, Some(v)),
            [g, a, p, c, v] => (g, a, Some(p), Some(c), Some(v)),
            _ => {
                return Err(Error::InvalidCoordinate {
                    coordinate: s.to_string(),
                    reason: "expected group:artifact[[:packaging[:classifier]]:version]"
                        .to_string(),
                });
            }
        };

        let coordinate = Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
            packaging: packaging.map(|p| p.to_string()),
            classifier: classifier.map(|c| c.to_string()),
            version: version.map(|v| v.to_string()),
        };
        coordinate.validate()?;
        Ok(coordinate)
    }
}

/// Dependency scope.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Deserialize,
)]
#[serde(try_from = "String")]
pub enum ScopeType {
    /// Needed to compile and run (default).
    #[default]
    Compile,
    /// Supplied by the runtime environment.
    Provided,
    /// Needed only at run time.
    Runtime,
    /// Needed only by tests.
    Test,
    /// Supplied from an explicit system path.
    System,
    /// Imported dependency management.
    Import,
}

impl ScopeType {
    /// All scopes, in declaration order.
    pub const ALL: [ScopeType; 6] = [
        Self::Compile,
        Self::Provided,
        Self::Runtime,
        Self::Test,
        Self::System,
        Self::Import,
    ];

    /// Whether dependencies of this scope are followed when walking the transitive closure.
    pub fn is_transitive(self) -> bool {
        matches!(self, Self::Compile | Self::Runtime)
    }

    /// Lower-case scope name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownScope(s.to_string()))
    }
}

impl TryFrom<String> for ScopeType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}
