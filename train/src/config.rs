//! Data preparation program configuration format.

use crate::common::*;

/// The main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: VideoDatasetConfig,
    pub stream: StreamConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = std::fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// Batched data stream options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// The batch size.
    pub batch_size: NonZeroUsize,
    /// The maximum number of waiting data records per worker.
    pub worker_buf_size: Option<usize>,
    /// If set, stop after this many batches instead of one pass over the
    /// dataset.
    pub max_steps: Option<NonZeroUsize>,
}

/// Data logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json5_config() {
        let text = r#"{
            dataset: {
                temporal_scale: 100,
                feature_path: "data/features.npz",
                video_anno: "data/annotations.json",
                subset: "train",
                mode: "train",
            },
            stream: {
                batch_size: 16,
                worker_buf_size: 4,
                max_steps: null,
            },
            logging: {
                dir: "logs",
            },
        }"#;
        let config: Config = json5::from_str(text).unwrap();

        assert_eq!(config.dataset.temporal_scale.get(), 100);
        assert_eq!(config.dataset.subset, Subset::Train);
        assert_eq!(config.dataset.mode, DatasetMode::Train);
        assert_eq!(config.stream.batch_size.get(), 16);
        assert_eq!(config.stream.max_steps, None);
    }
}
