//! Plot geometry
//!
//! Scaling math shared by the canvas renderer in the browser and the text
//! renderer in the terminal. Points are spaced evenly by index because the
//! x-axis is categorical (time-of-day labels).

use super::widget::ChartState;

/// Number of horizontal grid lines (and y-axis ticks) minus one
pub const GRID_DIVISIONS: usize = 5;

/// Drawing area of a chart, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_left: 60.0,
            margin_right: 20.0,
            margin_top: 20.0,
            margin_bottom: 40.0,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// Pixel x of point `index` out of `count`
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.margin_left + self.plot_width() / 2.0;
        }
        self.margin_left + (index as f64 / (count - 1) as f64) * self.plot_width()
    }

    /// Pixel y of `value` within `range` (canvas y grows downward)
    pub fn y_at(&self, value: f64, range: &YRange) -> f64 {
        self.margin_top + ((range.max - value) / range.span()) * self.plot_height()
    }
}

/// Vertical extent of a chart, padded so lines do not touch the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
}

impl YRange {
    /// Range covering `values` plus 10 % padding, or ±1 around a flat series
    pub fn for_values(values: &[f64]) -> Option<Self> {
        let mut finite = values.iter().copied().filter(|v| v.is_finite());
        let first = finite.next()?;
        let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let spread = max - min;
        if spread > 0.0 {
            let padding = spread * 0.1;
            Some(Self {
                min: min - padding,
                max: max + padding,
            })
        } else {
            Some(Self {
                min: min - 1.0,
                max: max + 1.0,
            })
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Grid-line values from top to bottom
    pub fn ticks(&self) -> Vec<f64> {
        (0..=GRID_DIVISIONS)
            .map(|i| self.max - (i as f64 / GRID_DIVISIONS as f64) * self.span())
            .collect()
    }
}

/// Pixel coordinates of every point of `state`
pub fn project(state: &ChartState, viewport: &Viewport) -> Vec<(f64, f64)> {
    let Some(range) = YRange::for_values(state.values()) else {
        return Vec::new();
    };
    let count = state.len();

    state
        .values()
        .iter()
        .enumerate()
        .map(|(i, &value)| (viewport.x_at(i, count), viewport.y_at(value, &range)))
        .collect()
}

/// Indices of the points whose labels are drawn, at most `max_labels`
///
/// Always includes the first and last point.
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    if count <= max_labels {
        return (0..count).collect();
    }
    if max_labels == 1 {
        return vec![count - 1];
    }

    let step = (count - 1) as f64 / (max_labels - 1) as f64;
    let mut indices: Vec<usize> = (0..max_labels)
        .map(|i| (i as f64 * step).round() as usize)
        .collect();
    indices.dedup();
    indices
}

/// Reduce `values` to `width` buckets by averaging
///
/// Series shorter than `width` are returned unchanged.
pub fn downsample(values: &[f64], width: usize) -> Vec<f64> {
    if width == 0 {
        return Vec::new();
    }
    if values.len() <= width {
        return values.to_vec();
    }

    (0..width)
        .map(|bucket| {
            let start = bucket * values.len() / width;
            let end = ((bucket + 1) * values.len() / width).max(start + 1);
            let slice = &values[start..end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range_padding() {
        let range = YRange::for_values(&[10.0, 20.0]).unwrap();
        assert_eq!(range.min, 9.0);
        assert_eq!(range.max, 21.0);
    }

    #[test]
    fn test_y_range_flat_series() {
        let range = YRange::for_values(&[50.0, 50.0]).unwrap();
        assert_eq!(range.min, 49.0);
        assert_eq!(range.max, 51.0);
        assert!(YRange::for_values(&[]).is_none());
        assert!(YRange::for_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_ticks_top_to_bottom() {
        let range = YRange { min: 0.0, max: 10.0 };
        assert_eq!(range.ticks(), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    fn test_project_spans_plot_area() {
        let state = ChartState::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![10.0, 15.0, 20.0],
        )
        .unwrap();
        let viewport = Viewport::new(880.0, 360.0);

        let points = project(&state, &viewport);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].0, 60.0);
        assert_eq!(points[2].0, 860.0);
        // higher values sit higher on the canvas
        assert!(points[2].1 < points[0].1);
        // the middle value lands on the vertical midpoint
        assert!((points[1].1 - (20.0 + 150.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_is_centered() {
        let state = ChartState::new(vec!["a".into()], vec![3.0]).unwrap();
        let viewport = Viewport::new(880.0, 360.0);
        let points = project(&state, &viewport);
        assert_eq!(points, vec![(460.0, 170.0)]);
    }

    #[test]
    fn test_label_indices() {
        assert_eq!(label_indices(3, 6), vec![0, 1, 2]);
        assert_eq!(label_indices(100, 5), vec![0, 25, 50, 74, 99]);
        assert_eq!(label_indices(10, 1), vec![9]);
        assert!(label_indices(0, 5).is_empty());
    }

    #[test]
    fn test_downsample() {
        assert_eq!(downsample(&[1.0, 2.0], 10), vec![1.0, 2.0]);
        assert_eq!(downsample(&[1.0, 3.0, 5.0, 7.0], 2), vec![2.0, 6.0]);
        assert_eq!(downsample(&(0..100).map(f64::from).collect::<Vec<_>>(), 60).len(), 60);
    }
}
