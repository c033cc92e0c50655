use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{DiscoveryError, DiscoveryResult};

/// A Maven coordinate, resolved against the local libraries directory.
///
/// Supported textual forms:
///   `groupId:artifactId:version`
///   `groupId:artifactId:version:classifier`
///   `groupId:artifactId:version:classifier@packaging`
///   `groupId:artifactId:version@packaging`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    /// File extension / packaging type. Defaults to `"jar"`.
    pub packaging: String,
}

impl MavenArtifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        classifier: Option<&str>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: classifier.map(str::to_string),
            packaging: "jar".to_string(),
        }
    }

    /// Parse a Maven coordinate string.
    pub fn parse(coord: &str) -> DiscoveryResult<Self> {
        // Split off @packaging first
        let (coord_part, packaging_override) = if let Some(idx) = coord.rfind('@') {
            (&coord[..idx], Some(&coord[idx + 1..]))
        } else {
            (coord, None)
        };

        let parts: Vec<&str> = coord_part.split(':').collect();

        match parts.len() {
            3 => Ok(Self {
                group_id: parts[0].to_string(),
                artifact_id: parts[1].to_string(),
                version: parts[2].to_string(),
                classifier: None,
                packaging: packaging_override.unwrap_or("jar").to_string(),
            }),
            4 => Ok(Self {
                group_id: parts[0].to_string(),
                artifact_id: parts[1].to_string(),
                version: parts[2].to_string(),
                classifier: Some(parts[3].to_string()),
                packaging: packaging_override.unwrap_or("jar").to_string(),
            }),
            _ => Err(DiscoveryError::InvalidMavenCoordinate(coord.to_string())),
        }
    }

    /// Construct the group path portion (`net/minecraft`).
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// Build the artifact filename: `artifactId-version[-classifier].packaging`.
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, c, self.packaging
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.packaging),
        }
    }

    /// Path relative to the libraries directory, mirroring Maven's repo layout:
    /// `<group_path>/<artifact_id>/<version>/<filename>`.
    ///
    /// Pure string transform; never touches the filesystem.
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(self.group_path())
            .join(&self.artifact_id)
            .join(&self.version)
            .join(self.filename())
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, c, self.packaging
            ),
            None => write!(
                f,
                "{}:{}:{}@{}",
                self.group_id, self.artifact_id, self.version, self.packaging
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_coordinate() {
        let a = MavenArtifact::parse("net.sf.jopt-simple:jopt-simple:5.0.4").unwrap();
        assert_eq!(a.group_id, "net.sf.jopt-simple");
        assert_eq!(a.artifact_id, "jopt-simple");
        assert_eq!(a.version, "5.0.4");
        assert_eq!(a.classifier, None);
        assert_eq!(a.packaging, "jar");
    }

    #[test]
    fn parse_with_classifier() {
        let a = MavenArtifact::parse("net.minecraft:client:1.21.1:srg").unwrap();
        assert_eq!(a.classifier, Some("srg".to_string()));
    }

    #[test]
    fn parse_with_packaging_override() {
        let a = MavenArtifact::parse("com.example:lib:1.0@zip").unwrap();
        assert_eq!(a.packaging, "zip");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(MavenArtifact::parse("just-one-part").is_err());
        assert!(MavenArtifact::parse("a:b:c:d:e").is_err());
    }

    #[test]
    fn local_path_construction() {
        let a = MavenArtifact::new("net.minecraft", "client", "1.21.1", Some("extra"));
        assert_eq!(
            a.local_path(),
            PathBuf::from("net/minecraft/client/1.21.1/client-1.21.1-extra.jar")
        );
    }

    #[test]
    fn local_path_without_classifier() {
        let a = MavenArtifact::new("org.quarrymc", "quarry", "2.0.15", None);
        assert_eq!(
            a.local_path(),
            PathBuf::from("org/quarrymc/quarry/2.0.15/quarry-2.0.15.jar")
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let a = MavenArtifact::new("net.minecraft", "server", "1.21.1", Some("srg"));
        assert_eq!(MavenArtifact::parse(&a.to_string()).unwrap(), a);
    }
}
