//! Chart geometry: bounds, bins, quartiles, densities, wedges.
//!
//! Everything here is pure so the terminal painter only maps shapes to cells.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Axis-aligned data extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// `[min, max]` along X.
    pub x: [f64; 2],
    /// `[min, max]` along Y.
    pub y: [f64; 2],
}

impl Bounds {
    /// An extent containing nothing yet.
    pub fn empty() -> Self {
        Self {
            x: [f64::INFINITY, f64::NEG_INFINITY],
            y: [f64::INFINITY, f64::NEG_INFINITY],
        }
    }

    /// Whether any finite point has been included.
    pub fn is_empty(&self) -> bool {
        self.x[0] > self.x[1] || self.y[0] > self.y[1]
    }

    /// Grow to contain `(x, y)`; non-finite points are ignored.
    pub fn include(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.x = [self.x[0].min(x), self.x[1].max(x)];
        self.y = [self.y[0].min(y), self.y[1].max(y)];
    }

    /// Add a margin of `fraction` of the span on each side, widening
    /// zero-width spans to one unit.
    pub fn padded(self, fraction: f64) -> Self {
        fn pad([lo, hi]: [f64; 2], fraction: f64) -> [f64; 2] {
            if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
                [lo - 0.5, hi + 0.5]
            } else {
                let margin = (hi - lo) * fraction;
                [lo - margin, hi + margin]
            }
        }
        Self {
            x: pad(self.x, fraction),
            y: pad(self.y, fraction),
        }
    }

    /// Expand the shorter axis so both cover the same span.
    pub fn equalized(self) -> Self {
        let width = self.x[1] - self.x[0];
        let height = self.y[1] - self.y[0];
        let span = width.max(height);
        let cx = (self.x[0] + self.x[1]) / 2.0;
        let cy = (self.y[0] + self.y[1]) / 2.0;
        Self {
            x: [cx - span / 2.0, cx + span / 2.0],
            y: [cy - span / 2.0, cy + span / 2.0],
        }
    }
}

fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// One histogram bin, `[lo, hi)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistBin {
    /// Left edge.
    pub lo: f64,
    /// Right edge.
    pub hi: f64,
    /// Samples in the bin.
    pub count: usize,
}

/// Equal-width bins over the finite range of `values`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistBin> {
    let Some((mut lo, mut hi)) = finite_min_max(values) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values.iter().filter(|v| v.is_finite()) {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistBin {
            lo: lo + i as f64 * width,
            hi: if i + 1 == bins {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

/// Five-number summary with 1.5 IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Lowest sample within 1.5 IQR below Q1.
    pub whisker_lo: f64,
    /// Highest sample within 1.5 IQR above Q3.
    pub whisker_hi: f64,
    /// Samples beyond the whiskers.
    pub outliers: Vec<f64>,
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Linear-interpolated percentile of sorted data, `p` in `[0, 1]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = p.clamp(0.0, 1.0) * last as f64;
    let below = position.floor() as usize;
    let above = (below + 1).min(last);
    let fraction = position - below as f64;
    Some(sorted[below] + (sorted[above] - sorted[below]) * fraction)
}

impl BoxStats {
    /// Summarize the finite samples of `values`.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        let q1 = percentile(&sorted, 0.25)?;
        let median = percentile(&sorted, 0.5)?;
        let q3 = percentile(&sorted, 0.75)?;
        let reach = 1.5 * (q3 - q1);

        let inside = |v: &&f64| **v >= q1 - reach && **v <= q3 + reach;
        let whisker_lo = sorted.iter().find(inside).copied().unwrap_or(q1);
        let whisker_hi = sorted.iter().rev().find(inside).copied().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_lo || *v > whisker_hi)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_lo,
            whisker_hi,
            outliers,
        })
    }
}

/// Gaussian kernel density of `values` at `points` evenly spaced positions
/// from the sample minimum to maximum, as `(position, density)` pairs.
/// Uses Scott's bandwidth.
pub fn kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let sorted = sorted_finite(values);
    let n = sorted.len();
    let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = if n > 1 {
        sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };
    let std_dev = variance.sqrt();
    if std_dev == 0.0 || points < 2 {
        return vec![(lo, 1.0)];
    }

    let bandwidth = std_dev * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * TAU.sqrt());
    (0..points)
        .map(|i| {
            let at = lo + (hi - lo) * i as f64 / (points - 1) as f64;
            let density = sorted
                .iter()
                .map(|v| (-0.5 * ((at - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (at, density)
        })
        .collect()
}

/// Sample mean of the finite values.
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        None
    } else {
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    }
}

/// One occupied hexagon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexCell {
    /// Centre X.
    pub x: f64,
    /// Centre Y.
    pub y: f64,
    /// Samples in the hexagon.
    pub count: usize,
}

/// Hexagonal binning result.
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    /// Occupied cells.
    pub cells: Vec<HexCell>,
    /// Horizontal lattice spacing.
    pub dx: f64,
    /// Vertical lattice spacing.
    pub dy: f64,
}

impl HexGrid {
    /// Largest cell count.
    pub fn max_count(&self) -> usize {
        self.cells.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Bin `(x[i], y[i])` pairs into a two-lattice hexagonal grid with
/// `grid_size` hexagons across the X range.
pub fn hexbin(x: &[f64], y: &[f64], grid_size: usize) -> HexGrid {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .map(|(&a, &b)| (a, b))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    let nx = grid_size.max(1) as f64;
    let ny = (nx / 3f64.sqrt()).floor().max(1.0);

    let span = |values: Vec<f64>| -> (f64, f64) {
        match finite_min_max(&values) {
            Some((lo, hi)) if hi > lo => (lo, hi),
            Some((lo, _)) => (lo - 0.5, lo + 0.5),
            None => (0.0, 1.0),
        }
    };
    let (xmin, xmax) = span(pairs.iter().map(|p| p.0).collect());
    let (ymin, ymax) = span(pairs.iter().map(|p| p.1).collect());
    let dx = (xmax - xmin) / nx;
    let dy = (ymax - ymin) / ny;

    // Keyed by (lattice, column, row); lattice 1 is offset by half a cell.
    let mut counts: BTreeMap<(u8, i64, i64), usize> = BTreeMap::new();
    for (px, py) in pairs {
        let fx = (px - xmin) / dx;
        let fy = (py - ymin) / dy;
        let (ix1, iy1) = (fx.round(), fy.round());
        let (ix2, iy2) = (fx.floor(), fy.floor());
        let d1 = (fx - ix1).powi(2) + 3.0 * (fy - iy1).powi(2);
        let d2 = (fx - ix2 - 0.5).powi(2) + 3.0 * (fy - iy2 - 0.5).powi(2);
        let key = if d1 < d2 {
            (0, ix1 as i64, iy1 as i64)
        } else {
            (1, ix2 as i64, iy2 as i64)
        };
        *counts.entry(key).or_insert(0) += 1;
    }

    let cells = counts
        .into_iter()
        .map(|((lattice, ix, iy), count)| {
            let offset = if lattice == 0 { 0.0 } else { 0.5 };
            HexCell {
                x: xmin + (ix as f64 + offset) * dx,
                y: ymin + (iy as f64 + offset) * dy,
                count,
            }
        })
        .collect();

    HexGrid { cells, dx, dy }
}

/// One pie wedge, angles in radians counter-clockwise from +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    /// Start angle.
    pub start: f64,
    /// End angle.
    pub end: f64,
    /// Share of the whole.
    pub fraction: f64,
}

impl Wedge {
    /// Angle halfway through the wedge.
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Wedges proportional to `values`; negative and non-finite sizes count as 0.
pub fn pie_wedges(values: &[f64]) -> Vec<Wedge> {
    let sizes: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect();
    let total: f64 = sizes.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    sizes
        .into_iter()
        .map(|size| {
            let fraction = size / total;
            let end = start + fraction * TAU;
            let wedge = Wedge {
                start,
                end,
                fraction,
            };
            start = end;
            wedge
        })
        .collect()
}

/// Vertices of a stair line whose steps change halfway between X values.
pub fn mid_steps(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(points.len() * 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.push((x, y));
            continue;
        }
        let (px, py) = points[i - 1];
        let mid = (px + x) / 2.0;
        path.push((mid, py));
        path.push((mid, y));
        if i + 1 == points.len() {
            path.push((x, y));
        }
    }
    path
}

/// Round tick positions covering `[lo, hi]`, about `count` of them.
pub fn ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || count == 0 {
        return Vec::new();
    }
    let raw = (hi - lo) / count as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn histogram_closes_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0], 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins[0].lo, 0.0);
        assert_eq!(bins[9].hi, 10.0);
        assert_eq!(bins[9].count, 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 11);
    }

    #[test]
    fn histogram_of_constant_values_widens() {
        let bins = histogram(&[3.0, 3.0], 10);
        assert_eq!(bins[0].lo, 2.5);
        assert_eq!(bins[9].hi, 3.5);
        assert_eq!(bins[5].count, 2);
    }

    #[test]
    fn box_stats_quartiles_and_outliers() {
        let stats = BoxStats::from_values(&[1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.whisker_lo, 1.0);
        assert_eq!(stats.whisker_hi, 4.0);
        assert_eq!(stats.outliers, vec![100.0]);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn percentile_interpolates() {
        assert_relative_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.25).unwrap(), 1.75);
    }

    #[test]
    fn kde_integrates_to_about_one_over_a_wide_sample() {
        let values: Vec<f64> = (0..200).map(|i| i as f64 / 20.0).collect();
        let density = kde(&values, 100);
        assert_eq!(density.len(), 100);
        let step = density[1].0 - density[0].0;
        let area: f64 = density.iter().map(|(_, d)| d * step).sum();
        assert!(area > 0.7 && area <= 1.05, "area {area}");
    }

    #[test]
    fn kde_of_constant_sample_is_a_spike() {
        assert_eq!(kde(&[2.0, 2.0, 2.0], 100), vec![(2.0, 1.0)]);
    }

    #[test]
    fn hexbin_counts_every_pair() {
        let x: Vec<f64> = (0..100).map(|i| (i % 10) as f64).collect();
        let y: Vec<f64> = (0..100).map(|i| (i / 10) as f64).collect();
        let grid = hexbin(&x, &y, 30);
        assert_eq!(grid.cells.iter().map(|c| c.count).sum::<usize>(), 100);
        assert_relative_eq!(grid.dx, 9.0 / 30.0);
        assert!(grid.max_count() >= 1);
    }

    #[test]
    fn pie_wedges_cover_the_circle() {
        let wedges = pie_wedges(&[1.0, 1.0, 2.0]);
        assert_eq!(wedges.len(), 3);
        assert_relative_eq!(wedges[2].fraction, 0.5);
        assert_relative_eq!(wedges[2].end, TAU);
        assert!(pie_wedges(&[0.0, -1.0]).is_empty());
    }

    #[test]
    fn mid_steps_change_between_points() {
        let path = mid_steps(&[(0.0, 1.0), (2.0, 3.0), (4.0, 2.0)]);
        assert_eq!(
            path,
            vec![
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 3.0),
                (3.0, 3.0),
                (3.0, 2.0),
                (4.0, 2.0),
            ]
        );
        assert_eq!(mid_steps(&[(1.0, 1.0)]), vec![(1.0, 1.0)]);
    }

    #[test]
    fn ticks_are_round() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(-3.0, 3.0, 3), vec![-2.0, 0.0, 2.0]);
        assert_eq!(ticks(0.0, 1.0, 4), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(ticks(1.0, 1.0, 5).is_empty());
    }

    #[test]
    fn bounds_padding_and_equalizing() {
        let mut b = Bounds::empty();
        assert!(b.is_empty());
        b.include(0.0, 0.0);
        b.include(10.0, 2.0);
        b.include(f64::NAN, 100.0);
        let padded = b.padded(0.1);
        assert_eq!(padded.x, [-1.0, 11.0]);
        let eq = b.equalized();
        assert_eq!(eq.y, [-4.0, 6.0]);
    }
}
