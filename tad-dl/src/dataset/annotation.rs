use crate::{common::*, error::DatasetError};

/// The subset of videos to index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    Train,
    Validation,
    Full,
}

impl Subset {
    /// The recorded subset name this variant admits, or `None` for all.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Train => Some("train"),
            Self::Validation => Some("validation"),
            Self::Full => None,
        }
    }

    pub fn admits(&self, recorded: &str) -> bool {
        self.name().map(|name| name == recorded).unwrap_or(true)
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Full => "full",
        };
        write!(f, "{}", name)
    }
}

/// The annotation database file content.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationDatabase {
    pub database: HashMap<String, VideoEntry>,
}

/// One video's entry in the annotation database.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    pub subset: String,
    /// Video duration in seconds.
    pub duration: f64,
    pub annotations: Vec<SegmentAnnotation>,
}

/// One annotated action segment, measured in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentAnnotation {
    pub segment: [f64; 2],
    pub label: String,
}

impl AnnotationDatabase {
    /// Load and validate the annotation database file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let database = tokio::task::spawn_blocking(move || -> Result<_> {
            let text = std::fs::read_to_string(&path).with_context(|| {
                format!("failed to read annotation file '{}'", path.display())
            })?;
            let database: AnnotationDatabase =
                serde_json::from_str(&text).map_err(|err| DatasetError::MalformedAnnotation {
                    message: err.to_string(),
                })?;
            database.validate()?;
            Ok(database)
        })
        .await??;
        Ok(database)
    }

    fn validate(&self) -> Result<(), DatasetError> {
        let malformed = |message: String| DatasetError::MalformedAnnotation { message };

        self.database.iter().try_for_each(|(id, entry)| {
            if !(entry.duration.is_finite() && entry.duration > 0.0) {
                return Err(malformed(format!(
                    "video '{}' has invalid duration {}",
                    id, entry.duration
                )));
            }

            entry.annotations.iter().try_for_each(|ann| {
                let [start, end] = ann.segment;
                let valid =
                    start.is_finite() && end.is_finite() && start >= 0.0 && end >= start;
                if !valid {
                    return Err(malformed(format!(
                        "video '{}' has invalid segment [{}, {}]",
                        id, start, end
                    )));
                }
                Ok(())
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_membership() {
        assert!(Subset::Train.admits("train"));
        assert!(!Subset::Train.admits("training"));
        assert!(!Subset::Train.admits("validation"));
        assert!(Subset::Full.admits("train"));
        assert!(Subset::Full.admits("validation"));
    }

    #[test]
    fn rejects_bad_values() {
        let text = r#"{
            "database": {
                "clip": {
                    "subset": "train",
                    "duration": -3.0,
                    "annotations": []
                }
            }
        }"#;
        let database: AnnotationDatabase = serde_json::from_str(text).unwrap();
        assert!(matches!(
            database.validate(),
            Err(DatasetError::MalformedAnnotation { .. })
        ));
    }

    #[test]
    fn rejects_missing_keys() {
        let text = r#"{"database": {"clip": {"subset": "train"}}}"#;
        assert!(serde_json::from_str::<AnnotationDatabase>(text).is_err());
    }
}
