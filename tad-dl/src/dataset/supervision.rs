use super::*;
use crate::{common::*, error::DatasetError};
use tspan::{iou_with_anchors, Span as _, SpanFloat as _, SpanNum as _, SE};

impl Supervision {
    /// Build the supervision targets of one video from its ground-truth
    /// segments and the precomputed grid.
    pub fn new(grid: &AnchorGrid, record: &VideoRecord) -> Result<Self> {
        if record.segments.is_empty() {
            return Err(DatasetError::NoAnnotations {
                name: record.name.clone(),
            }
            .into());
        }

        let temporal_scale = grid.temporal_scale() as i64;
        let duration = record.duration;

        // measure segments in fractions of the video instead of seconds
        let gt_spans: Vec<SE<R64>> = record
            .segments
            .iter()
            .map(|segment| {
                SE::from_se([
                    clamp_unit(segment.span.s() / duration),
                    clamp_unit(segment.span.e() / duration),
                ])
            })
            .collect();

        // per-cell max IoU over all ground-truth segments
        let mut iou_flat = vec![r64(0.0); grid.match_map().len()];
        gt_spans.iter().for_each(|span| {
            let scores = iou_with_anchors(grid.match_map(), span);
            izip!(&mut iou_flat, scores).for_each(|(cell, score)| {
                *cell = (*cell).max(score);
            });
        });
        let gt_iou_map = to_tensor(&iou_flat).view([temporal_scale, temporal_scale]);

        // boundary regions spanning three time steps centered on each
        // segment's start and end
        let region_half = grid.temporal_gap() * 3.0 / 2.0;
        let start_regions: Vec<SE<R64>> = gt_spans
            .iter()
            .map(|span| SE::from_se([span.s() - region_half, span.s() + region_half]))
            .collect();
        let end_regions: Vec<SE<R64>> = gt_spans
            .iter()
            .map(|span| SE::from_se([span.e() - region_half, span.e() + region_half]))
            .collect();

        // per-anchor max IoA against the boundary regions
        let match_score_start: Vec<R64> = grid
            .anchors()
            .iter()
            .map(|anchor| max_ioa(anchor, &start_regions))
            .collect();
        let match_score_end: Vec<R64> = grid
            .anchors()
            .iter()
            .map(|anchor| max_ioa(anchor, &end_regions))
            .collect();

        Ok(Self {
            gt_iou_map,
            match_score_start: to_tensor(&match_score_start),
            match_score_end: to_tensor(&match_score_end),
        })
    }
}

fn clamp_unit(value: R64) -> R64 {
    value.max(r64(0.0)).min(r64(1.0))
}

fn max_ioa(anchor: &SE<R64>, regions: &[SE<R64>]) -> R64 {
    regions
        .iter()
        .map(|region| anchor.ioa_with(region))
        .fold(r64(0.0), |max, score| max.max(score))
}

fn to_tensor(values: &[R64]) -> Tensor {
    let values: Vec<f32> = values.iter().map(|value| value.raw() as f32).collect();
    Tensor::of_slice(&values)
}
