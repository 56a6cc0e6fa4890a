//! Common imports from external crates.

pub use anyhow::{ensure, format_err, Context, Error, Result};
pub use futures::stream::{self, Stream, StreamExt, TryStreamExt};
pub use itertools::Itertools;
pub use par_stream::{ParStreamExt, TryParStreamExt};
pub use rand::{prelude::*, rngs::OsRng};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fmt::Debug,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
pub use tad_dl::dataset::{
    DataRecord, DatasetMode, GenericDataset, RandomAccessDataset, Subset, Supervision,
    VideoDataset, VideoDatasetConfig, VideoIndexDataset,
};
pub use tch::Tensor;
pub use tracing::{info, warn};
