use super::*;
use crate::common::*;
use tspan::{Span as _, SE};

/// The dataset mode. Train mode emits supervision targets along the
/// features, inference mode emits features only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetMode {
    Train,
    Inference,
}

/// The video dataset options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDatasetConfig {
    /// The number of discrete time steps per video.
    pub temporal_scale: NonZeroUsize,
    /// The feature storage selector.
    pub feature_path: String,
    /// The annotation database file.
    pub video_anno: PathBuf,
    pub subset: Subset,
    pub mode: DatasetMode,
}

/// The temporal action localization video dataset.
#[derive(Debug)]
pub struct VideoDataset {
    config: VideoDatasetConfig,
    classes: IndexSet<String>,
    records: Vec<Arc<VideoRecord>>,
    grid: Arc<AnchorGrid>,
    storage: FeatureStorage,
}

impl VideoDataset {
    /// Load the annotation database and build the video index.
    pub async fn load(config: VideoDatasetConfig) -> Result<Self> {
        let VideoDatasetConfig {
            temporal_scale,
            ref feature_path,
            ref video_anno,
            subset,
            mode,
        } = config;

        let annotations = AnnotationDatabase::load(video_anno).await.with_context(|| {
            format!("failed to load annotation database '{}'", video_anno.display())
        })?;

        // collect the class list over every annotation
        let classes: IndexSet<String> = annotations
            .database
            .values()
            .flat_map(|entry| entry.annotations.iter().map(|ann| ann.label.clone()))
            .collect();

        // index the qualifying videos in canonical order
        let mut skipped_unlabeled = 0;
        let mut records: Vec<_> = annotations
            .database
            .iter()
            .filter(|(_, entry)| subset.admits(&entry.subset))
            .filter(|(_, entry)| {
                let unlabeled = mode == DatasetMode::Train && entry.annotations.is_empty();
                if unlabeled {
                    skipped_unlabeled += 1;
                }
                !unlabeled
            })
            .map(|(id, entry)| -> Result<_> {
                let segments: Vec<_> = entry
                    .annotations
                    .iter()
                    .map(|ann| -> Result<_> {
                        let [start, end] = ann.segment;
                        let span = SE::try_from_se([r64(start), r64(end)])?;
                        let class = classes
                            .get_index_of(ann.label.as_str())
                            .ok_or_else(|| format_err!("unknown class '{}'", ann.label))?;
                        Ok(SegmentLabel { span, class })
                    })
                    .try_collect()?;

                Ok(Arc::new(VideoRecord {
                    name: format!("v_{}", id),
                    duration: r64(entry.duration),
                    segments,
                }))
            })
            .try_collect()?;
        records.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));

        if skipped_unlabeled > 0 {
            warn!(
                "filtered out {} videos without annotated segments",
                skipped_unlabeled
            );
        }
        info!("{} subset video numbers: {}", subset, records.len());

        let storage = FeatureStorage::from_feature_path(feature_path, subset)?;
        let grid = Arc::new(AnchorGrid::new(temporal_scale));

        Ok(Self {
            config,
            classes,
            records,
            grid,
            storage,
        })
    }

    pub fn mode(&self) -> DatasetMode {
        self.config.mode
    }

    pub fn grid(&self) -> &AnchorGrid {
        &self.grid
    }
}

impl GenericDataset for VideoDataset {
    fn temporal_scale(&self) -> usize {
        self.config.temporal_scale.get()
    }

    fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }
}

impl VideoIndexDataset for VideoDataset {
    fn records(&self) -> &[Arc<VideoRecord>] {
        &self.records
    }
}

impl RandomAccessDataset for VideoDataset {
    fn num_records(&self) -> usize {
        self.records.len()
    }

    fn nth(&self, index: usize) -> Pin<Box<dyn Future<Output = Result<DataRecord>> + Send>> {
        let record = self.records.get(index).cloned();
        let storage = self.storage.clone();
        let grid = self.grid.clone();
        let temporal_scale = self.config.temporal_scale.get();
        let mode = self.config.mode;

        Box::pin(async move {
            let record = record.ok_or_else(|| format_err!("invalid index {}", index))?;

            let record = tokio::task::spawn_blocking(move || -> Result<_> {
                let features = storage
                    .load(&record.name, temporal_scale)
                    .with_context(|| {
                        format!("failed to load features of video '{}'", record.name)
                    })?;
                let supervision = match mode {
                    DatasetMode::Train => Some(Supervision::new(&grid, &record)?),
                    DatasetMode::Inference => None,
                };
                Ok(DataRecord {
                    index,
                    features,
                    supervision,
                })
            })
            .await??;

            Ok(record)
        })
    }
}
