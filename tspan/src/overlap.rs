use super::{Span, SpanFloat};
use crate::common::*;

/// Compute the IoU score of every anchor against one query span.
pub fn iou_with_anchors<S, Q, T>(anchors: &[S], query: &Q) -> Vec<T>
where
    S: Span<Type = T>,
    Q: Span<Type = T>,
    T: Float,
{
    anchors.iter().map(|anchor| anchor.iou_with(query)).collect()
}

/// Compute the IoA score of every anchor against one query span. The
/// score measures the covered proportion of the anchor itself.
pub fn ioa_with_anchors<S, Q, T>(anchors: &[S], query: &Q) -> Vec<T>
where
    S: Span<Type = T>,
    Q: Span<Type = T>,
    T: Float,
{
    anchors.iter().map(|anchor| anchor.ioa_with(query)).collect()
}
