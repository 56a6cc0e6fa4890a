//! The data preparation program for the tad-dl project.

pub mod common;
pub mod config;
pub mod data;

use crate::common::*;
use data::DataStream;

/// The entry of the data preparation program.
pub async fn start(config: Arc<config::Config>) -> Result<()> {
    // create the logging dir and save the resolved config
    tokio::fs::create_dir_all(&config.logging.dir).await?;
    {
        let path = config.logging.dir.join("config.json5");
        let text = serde_json::to_string_pretty(&*config)?;
        tokio::fs::write(&path, text).await?;
    }

    // load dataset
    info!("loading dataset");
    let data_stream = DataStream::new(&config).await?;
    info!(
        "dataset has {} videos and {} classes",
        data_stream.num_records(),
        data_stream.dataset().classes().len()
    );

    // drive one pass over the dataset unless configured otherwise
    let max_steps = config.stream.max_steps.map(|steps| steps.get()).unwrap_or_else(|| {
        (data_stream.num_records() + data_stream.batch_size() - 1) / data_stream.batch_size()
    });

    let start_time = Instant::now();
    let mut stream = data_stream.stream()?.take(max_steps).enumerate().boxed();

    while let Some((step, batch)) = stream.next().await {
        let batch = batch?;
        match &batch.supervision {
            Some(supervision) => info!(
                "step {}\tfeatures {:?}\tiou map {:?}\tboundary scores {:?}",
                step,
                batch.features.size(),
                supervision.gt_iou_map.size(),
                supervision.match_score_start.size()
            ),
            None => info!("step {}\tfeatures {:?}", step, batch.features.size()),
        }
    }

    info!(
        "processed {} batches in {:?}",
        max_steps,
        start_time.elapsed()
    );

    Ok(())
}
