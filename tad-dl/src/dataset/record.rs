use crate::common::*;
use tspan::SE;

/// The record with video metadata and segments, but without feature data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoRecord {
    pub name: String,
    /// Video duration in seconds.
    pub duration: R64,
    /// Ground-truth segments in seconds.
    pub segments: Vec<SegmentLabel>,
}

/// One ground-truth segment paired with its class index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentLabel {
    pub span: SE<R64>,
    pub class: usize,
}

/// The supervision targets of one video.
#[derive(Debug, TensorLike)]
pub struct Supervision {
    /// Max IoU against ground truth per candidate (duration, start) cell.
    pub gt_iou_map: Tensor,
    /// Max IoA of each anchor against the start boundary regions.
    pub match_score_start: Tensor,
    /// Max IoA of each anchor against the end boundary regions.
    pub match_score_end: Tensor,
}

/// The record with feature data and supervision targets.
#[derive(Debug, TensorLike)]
pub struct DataRecord {
    #[tensor_like(clone)]
    pub index: usize,
    /// Features in `[channels, temporal_scale]` shape.
    pub features: Tensor,
    /// Present in train mode only.
    pub supervision: Option<Supervision>,
}
