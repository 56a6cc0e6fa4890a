//! Batched data stream over the video dataset.

use crate::{common::*, config};

/// Asynchronous data stream feeding shuffled batches of dataset items.
#[derive(Debug)]
pub struct DataStream {
    batch_size: usize,
    worker_buf_size: Option<usize>,
    dataset: Arc<VideoDataset>,
}

impl DataStream {
    pub async fn new(config: &config::Config) -> Result<Self> {
        let dataset = VideoDataset::load(config.dataset.clone()).await?;

        Ok(Self {
            batch_size: config.stream.batch_size.get(),
            worker_buf_size: config.stream.worker_buf_size,
            dataset: Arc::new(dataset),
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_records(&self) -> usize {
        self.dataset.num_records()
    }

    pub fn dataset(&self) -> &VideoDataset {
        &self.dataset
    }

    /// The endless stream of shuffled batches. Items are fetched
    /// concurrently by the worker pool; batch order is not deterministic.
    pub fn stream(&self) -> Result<impl Stream<Item = Result<Batch>> + Send + 'static> {
        let num_records = self.dataset.num_records();
        ensure!(num_records > 0, "the dataset has no videos");

        // parallel stream config
        let par_params: par_stream::ParParams = {
            let buf_size: par_stream::BufSize = self
                .worker_buf_size
                .map(|buf_size| Some(buf_size).into())
                .unwrap_or(2.0.into());

            Some(par_stream::ParParamsConfig::Manual {
                num_workers: par_stream::NumWorkers::Default,
                buf_size,
            })
            .into()
        };

        // endless shuffled epochs of indexes
        let stream = stream::iter(0..).flat_map(move |_epoch: u64| {
            let mut indexes = (0..num_records).collect_vec();
            indexes.shuffle(&mut OsRng);
            stream::iter(indexes)
        });

        // fetch records concurrently from the worker pool
        let stream = {
            let dataset = self.dataset.clone();
            stream.par_then_unordered(par_params, move |index| {
                let dataset = dataset.clone();
                async move { dataset.nth(index).await }
            })
        };

        // group into batches
        let batch_size = self.batch_size;
        let stream = stream.chunks(batch_size).map(|chunk| {
            let records: Vec<_> = chunk.into_iter().try_collect()?;
            Batch::new(records)
        });

        Ok(stream)
    }
}

/// One batch of collated records.
#[derive(Debug)]
pub struct Batch {
    pub indexes: Vec<usize>,
    /// Features in `[batch, channels, temporal_scale]` shape.
    pub features: Tensor,
    /// Present in train mode only.
    pub supervision: Option<Supervision>,
}

impl Batch {
    fn new(records: Vec<DataRecord>) -> Result<Self> {
        ensure!(!records.is_empty(), "cannot collate an empty batch");

        let indexes: Vec<_> = records.iter().map(|record| record.index).collect();
        let features: Vec<_> = records.iter().map(|record| &record.features).collect();
        let features = Tensor::stack(&features, 0);

        let supervision = records
            .iter()
            .map(|record| record.supervision.as_ref())
            .collect::<Option<Vec<_>>>()
            .map(|targets| Supervision {
                gt_iou_map: stack_targets(&targets, |target| &target.gt_iou_map),
                match_score_start: stack_targets(&targets, |target| &target.match_score_start),
                match_score_end: stack_targets(&targets, |target| &target.match_score_end),
            });

        Ok(Self {
            indexes,
            features,
            supervision,
        })
    }
}

fn stack_targets<'a>(
    targets: &[&'a Supervision],
    select: impl Fn(&'a Supervision) -> &'a Tensor,
) -> Tensor {
    let tensors: Vec<_> = targets.iter().map(|&target| select(target)).collect();
    Tensor::stack(&tensors, 0)
}
