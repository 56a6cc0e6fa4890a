use crate::common::*;
use tspan::{SpanNum as _, SD, SE};

/// Precomputed temporal anchors and the (duration, start) match map.
///
/// All fields are read-only once built, so the grid can be shared freely
/// between concurrent item fetches.
#[derive(Debug, Clone)]
pub struct AnchorGrid {
    temporal_scale: usize,
    temporal_gap: R64,
    anchors: Vec<SE<R64>>,
    match_map: Vec<SD<R64>>,
}

impl AnchorGrid {
    /// Build the grid for the given temporal scale.
    pub fn new(temporal_scale: NonZeroUsize) -> Self {
        let temporal_scale = temporal_scale.get();
        let gap = r64(1.0 / temporal_scale as f64);

        // anchor i is the i-th time step padded by a half step on both sides
        let anchors: Vec<_> = (0..temporal_scale)
            .map(|index| {
                SE::from_se([
                    gap * (index as f64 - 0.5),
                    gap * (index as f64 + 1.5),
                ])
            })
            .collect();

        // cell k covers [s/T, s/T + (d+1)/T] with d = k / T and s = k % T;
        // cells sharing a duration are contiguous and label generation
        // relies on this exact order when reshaping score vectors
        let match_map: Vec<_> = (1..=temporal_scale)
            .flat_map(|duration| {
                (0..temporal_scale).map(move |start| {
                    SD::from_sd([gap * start as f64, gap * duration as f64])
                })
            })
            .collect();

        Self {
            temporal_scale,
            temporal_gap: gap,
            anchors,
            match_map,
        }
    }

    pub fn temporal_scale(&self) -> usize {
        self.temporal_scale
    }

    /// The width of one time step in normalized time.
    pub fn temporal_gap(&self) -> R64 {
        self.temporal_gap
    }

    pub fn anchors(&self) -> &[SE<R64>] {
        &self.anchors
    }

    pub fn match_map(&self) -> &[SD<R64>] {
        &self.match_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tspan::Span as _;

    #[test]
    fn anchors_pad_half_step() {
        let grid = AnchorGrid::new(NonZeroUsize::new(2).unwrap());
        let anchors = grid.anchors();

        assert_eq!(anchors.len(), 2);
        assert_abs_diff_eq!(anchors[0].s().raw(), -0.25);
        assert_abs_diff_eq!(anchors[0].e().raw(), 0.75);
        assert_abs_diff_eq!(anchors[1].s().raw(), 0.25);
        assert_abs_diff_eq!(anchors[1].e().raw(), 1.25);
    }

    #[test]
    fn match_map_layout() {
        let grid = AnchorGrid::new(NonZeroUsize::new(2).unwrap());
        let cells = grid.match_map();

        // duration varies slowest, start fastest
        let expected = [[0.0, 0.5], [0.5, 1.0], [0.0, 1.0], [0.5, 1.5]];
        assert_eq!(cells.len(), 4);
        izip!(cells, expected).for_each(|(cell, [s, e])| {
            assert_abs_diff_eq!(cell.s().raw(), s);
            assert_abs_diff_eq!(cell.e().raw(), e);
        });
    }

    #[test]
    fn match_map_index_convention() {
        let temporal_scale = 5;
        let grid = AnchorGrid::new(NonZeroUsize::new(temporal_scale).unwrap());
        let gap = 1.0 / temporal_scale as f64;

        grid.match_map().iter().enumerate().for_each(|(k, cell)| {
            let duration = k / temporal_scale;
            let start = k % temporal_scale;
            assert_abs_diff_eq!(cell.s().raw(), start as f64 * gap, epsilon = 1e-9);
            assert_abs_diff_eq!(
                cell.d().raw(),
                (duration + 1) as f64 * gap,
                epsilon = 1e-9
            );
        });
    }
}
