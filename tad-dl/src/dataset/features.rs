use super::Subset;
use crate::{common::*, error::DatasetError};
use ndarray::{Array2, Axis};
use ndarray_npy::{NpzReader, ReadNpyExt};
use std::fs::File;

/// The feature storage backend. The variant is selected once at dataset
/// construction; every fetch re-opens the underlying file, so storages can
/// be cloned into concurrent item fetches.
#[derive(Debug, Clone)]
pub enum FeatureStorage {
    /// A single archive holding one array per video name.
    Aggregate { archive: PathBuf },
    /// One archive per video name.
    PerVideo { dir: PathBuf },
    /// Raw per-video arrays in a subset-specific directory.
    SubsetDir { dir: PathBuf },
    /// Two sources concatenated along the channel axis.
    Concat {
        first: Box<FeatureStorage>,
        second: Box<FeatureStorage>,
    },
}

impl FeatureStorage {
    /// Select the backend from the shape of the feature path option: a
    /// comma joins two concatenated sources, a trailing separator selects
    /// per-video archives, an `I3D` marker selects per-subset raw arrays,
    /// and a bare path selects one aggregate archive.
    pub fn from_feature_path(feature_path: &str, subset: Subset) -> Result<Self> {
        let storage = if let Some((first, second)) = feature_path.split_once(',') {
            Self::Concat {
                first: Box::new(Self::from_feature_path(first, subset)?),
                second: Box::new(Self::from_feature_path(second, subset)?),
            }
        } else if feature_path.ends_with('/') {
            if feature_path.contains("I3D") {
                let subset_dir = match subset {
                    Subset::Train => "training",
                    Subset::Validation => "validation",
                    Subset::Full => {
                        bail!("I3D features require the 'train' or 'validation' subset")
                    }
                };
                Self::SubsetDir {
                    dir: Path::new(feature_path).join(subset_dir),
                }
            } else {
                Self::PerVideo {
                    dir: PathBuf::from(feature_path),
                }
            }
        } else {
            Self::Aggregate {
                archive: PathBuf::from(feature_path),
            }
        };
        Ok(storage)
    }

    /// Fetch the raw `[time, channels]` feature array of a video.
    pub fn fetch(&self, name: &str) -> Result<Array2<f32>> {
        let features = match self {
            Self::Aggregate { archive } => read_npz_entry(archive, name)?,
            Self::PerVideo { dir } => {
                read_npz_entry(&dir.join(format!("{}.npz", name)), name)?
            }
            Self::SubsetDir { dir } => {
                // raw array files are named by the bare id without the
                // source prefix
                let bare = name.strip_prefix("v_").unwrap_or(name);
                let path = dir.join(format!("{}.npy", bare));
                let file = open_storage(&path)?;
                Array2::<f32>::read_npy(file).with_context(|| {
                    format!("failed to parse array file '{}'", path.display())
                })?
            }
            Self::Concat { first, second } => {
                let lhs = first.fetch(name)?;
                let rhs = second.fetch(name)?;
                if lhs.nrows() != rhs.nrows() {
                    return Err(DatasetError::ShapeMismatch {
                        message: format!(
                            "cannot concatenate features of video '{}': {} vs {} time steps",
                            name,
                            lhs.nrows(),
                            rhs.nrows()
                        ),
                    }
                    .into());
                }
                ndarray::concatenate(Axis(1), &[lhs.view(), rhs.view()])?
            }
        };
        Ok(features)
    }

    /// Load a video's features as a `[channels, temporal_scale]` tensor.
    pub fn load(&self, name: &str, temporal_scale: usize) -> Result<Tensor> {
        let features = self.fetch(name)?;
        let (num_steps, num_channels) = features.dim();
        ensure!(
            num_steps > 0 && num_channels > 0,
            "empty feature array of video '{}'",
            name
        );

        let values: Vec<f32> = features.iter().copied().collect();
        let features = Tensor::of_slice(&values)
            .view([num_steps as i64, num_channels as i64])
            .transpose(0, 1);

        Ok(resample(features, temporal_scale))
    }
}

/// Rescale the temporal axis of a `[channels, time]` tensor to the fixed
/// length by linear interpolation.
fn resample(features: Tensor, temporal_scale: usize) -> Tensor {
    let num_steps = features.size()[1];
    if num_steps == temporal_scale as i64 {
        features
    } else {
        features
            .unsqueeze(0)
            .upsample_linear1d(&[temporal_scale as i64], false, None)
            .i(0)
    }
}

fn open_storage(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(DatasetError::StorageNotFound {
            path: path.to_owned(),
        }
        .into()),
        Err(err) => Err(err)
            .with_context(|| format!("failed to open feature storage '{}'", path.display())),
    }
}

fn read_npz_entry(path: &Path, name: &str) -> Result<Array2<f32>> {
    let file = open_storage(path)?;
    let mut npz = NpzReader::new(file)
        .with_context(|| format!("failed to open feature archive '{}'", path.display()))?;

    // writers may or may not append the `.npy` suffix to entry names
    let features = match npz.by_name(name) {
        Ok(features) => features,
        Err(_) => npz.by_name(&format!("{}.npy", name)).with_context(|| {
            format!(
                "no feature entry '{}' in archive '{}'",
                name,
                path.display()
            )
        })?,
    };
    Ok(features)
}
