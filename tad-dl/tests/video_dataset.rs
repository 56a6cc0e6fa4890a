use anyhow::Result;
use approx::assert_abs_diff_eq;
use ndarray::Array2;
use ndarray_npy::NpzWriter;
use serde_json::json;
use std::{fs, fs::File, num::NonZeroUsize, path::PathBuf};
use tad_dl::dataset::{
    DatasetMode, GenericDataset, RandomAccessDataset, Subset, VideoDataset, VideoDatasetConfig,
    VideoIndexDataset,
};

fn fixture_dir(tag: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("tad-dl-dataset-{}-{}", tag, std::process::id()));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn write_annotations(dir: &PathBuf) -> Result<PathBuf> {
    let annotations = json!({
        "database": {
            "alpha": {
                "subset": "train",
                "duration": 100.0,
                "annotations": [{"segment": [10.0, 20.0], "label": "run"}],
            },
            "delta": {
                "subset": "train",
                "duration": 60.0,
                "annotations": [{"segment": [30.0, 40.0], "label": "jump"}],
            },
            "epsilon": {
                "subset": "train",
                "duration": 80.0,
                "annotations": [
                    {"segment": [5.0, 35.0], "label": "run"},
                    {"segment": [50.0, 75.0], "label": "jump"},
                ],
            },
            "gamma": {
                "subset": "train",
                "duration": 45.0,
                "annotations": [],
            },
            "beta": {
                "subset": "validation",
                "duration": 30.0,
                "annotations": [{"segment": [1.0, 2.0], "label": "run"}],
            },
            "zeta": {
                "subset": "validation",
                "duration": 20.0,
                "annotations": [{"segment": [3.0, 4.0], "label": "jump"}],
            },
        }
    });

    let path = dir.join("annotations.json");
    fs::write(&path, serde_json::to_string_pretty(&annotations)?)?;
    Ok(path)
}

fn write_features(dir: &PathBuf) -> Result<PathBuf> {
    let path = dir.join("features.npz");
    let mut npz = NpzWriter::new(File::create(&path)?);

    let videos: [(&str, usize, usize); 5] = [
        ("v_alpha", 50, 8),
        ("v_delta", 100, 4),
        ("v_epsilon", 25, 6),
        ("v_beta", 30, 8),
        ("v_zeta", 100, 8),
    ];
    for (name, num_steps, num_channels) in videos {
        let features =
            Array2::from_shape_fn((num_steps, num_channels), |(row, col)| (row + col) as f32);
        npz.add_array(name, &features)?;
    }
    npz.finish()?;
    Ok(path)
}

fn config(dir: &PathBuf, subset: Subset, mode: DatasetMode) -> Result<VideoDatasetConfig> {
    let video_anno = write_annotations(dir)?;
    let feature_path = write_features(dir)?;

    Ok(VideoDatasetConfig {
        temporal_scale: NonZeroUsize::new(100).unwrap(),
        feature_path: feature_path.to_str().unwrap().to_owned(),
        video_anno,
        subset,
        mode,
    })
}

#[tokio::test]
async fn index_filters_and_sorts() -> Result<()> {
    let dir = fixture_dir("index")?;
    let dataset = VideoDataset::load(config(&dir, Subset::Train, DatasetMode::Train)?).await?;

    // the unlabeled train video and both validation videos are excluded
    assert_eq!(dataset.num_records(), 3);
    let names: Vec<_> = dataset
        .records()
        .iter()
        .map(|record| record.name.as_str())
        .collect();
    assert_eq!(names, ["v_alpha", "v_delta", "v_epsilon"]);
    assert_eq!(dataset.classes().len(), 2);

    let validation =
        VideoDataset::load(config(&dir, Subset::Validation, DatasetMode::Train)?).await?;
    assert_eq!(validation.num_records(), 2);

    Ok(())
}

#[tokio::test]
async fn train_item_has_features_and_supervision() -> Result<()> {
    let dir = fixture_dir("train-item")?;
    let dataset = VideoDataset::load(config(&dir, Subset::Train, DatasetMode::Train)?).await?;

    // v_alpha: one segment [10, 20] out of 100 seconds
    let record = dataset.nth(0).await?;
    assert_eq!(record.index, 0);
    assert_eq!(record.features.size(), &[8, 100]);

    let supervision = record.supervision.expect("missing supervision targets");
    assert_eq!(supervision.gt_iou_map.size(), &[100, 100]);
    assert_eq!(supervision.match_score_start.size(), &[100]);
    assert_eq!(supervision.match_score_end.size(), &[100]);

    // the best candidate cell is the one spanning [0.1, 0.2] exactly:
    // duration index 9, start index 10
    let best = supervision.gt_iou_map.view([-1]).argmax(0, false);
    assert_eq!(best.int64_value(&[]), 9 * 100 + 10);

    // boundary scores peak at one and two tenths of the video
    assert_abs_diff_eq!(
        supervision.match_score_start.double_value(&[10]),
        1.0,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        supervision.match_score_end.double_value(&[20]),
        1.0,
        epsilon = 1e-6
    );

    Ok(())
}

#[tokio::test]
async fn inference_item_has_features_only() -> Result<()> {
    let dir = fixture_dir("inference-item")?;
    let dataset =
        VideoDataset::load(config(&dir, Subset::Validation, DatasetMode::Inference)?).await?;

    let record = dataset.nth(0).await?;
    assert_eq!(record.features.size(), &[8, 100]);
    assert!(record.supervision.is_none());

    Ok(())
}

#[tokio::test]
async fn missing_features_abort_the_fetch() -> Result<()> {
    let dir = fixture_dir("missing-features")?;
    let video_anno = write_annotations(&dir)?;
    let config = VideoDatasetConfig {
        temporal_scale: NonZeroUsize::new(100).unwrap(),
        feature_path: dir.join("absent.npz").to_str().unwrap().to_owned(),
        video_anno,
        subset: Subset::Train,
        mode: DatasetMode::Train,
    };

    let dataset = VideoDataset::load(config).await?;
    assert!(dataset.nth(0).await.is_err());

    Ok(())
}
