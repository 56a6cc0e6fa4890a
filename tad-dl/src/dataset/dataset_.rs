use super::*;
use crate::common::*;

/// The generic dataset trait.
pub trait GenericDataset
where
    Self: Debug + Send + Sync,
{
    /// The number of discrete time steps per video.
    fn temporal_scale(&self) -> usize;

    /// The list of action class names of the dataset.
    fn classes(&self) -> &IndexSet<String>;
}

/// The dataset with a list of indexed video records.
pub trait VideoIndexDataset
where
    Self: GenericDataset,
{
    /// Get the list of video records in the dataset.
    fn records(&self) -> &[Arc<VideoRecord>];
}

/// The dataset that can be random accessed.
pub trait RandomAccessDataset
where
    Self: GenericDataset,
{
    /// Get number of records in the dataset.
    fn num_records(&self) -> usize;

    /// Get the nth record in the dataset.
    fn nth(&self, index: usize) -> Pin<Box<dyn Future<Output = Result<DataRecord>> + Send>>;
}
