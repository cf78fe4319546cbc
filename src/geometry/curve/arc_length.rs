use std::cell::OnceCell;

use crate::math::Point2;

/// Cumulative chord lengths sampled at uniform parameter steps along a curve.
///
/// Entry `i` is the distance travelled from `t = 0` to `t = i / divisions`,
/// so the first entry is always `0` and the last is the curve length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Samples `eval` at `divisions + 1` uniform parameters and accumulates
    /// the chord lengths between consecutive samples.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(divisions: usize, mut eval: impl FnMut(f64) -> Point2) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);

        let mut last = eval(0.0);
        let mut sum = 0.0;
        for i in 1..=divisions {
            let current = eval(i as f64 / divisions as f64);
            sum += nalgebra::distance(&last, &current);
            lengths.push(sum);
            last = current;
        }

        tracing::trace!(divisions, length = sum, "sampled arc-length table");
        Self { lengths }
    }

    /// Returns the cumulative lengths.
    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Returns the number of divisions the table was sampled with.
    #[must_use]
    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Returns the total sampled length.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Maps an arc-length fraction `u` in `[0, 1]` to a raw curve parameter.
    #[must_use]
    pub fn parameter_at(&self, u: f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        self.parameter_at_distance(u.clamp(0.0, 1.0) * total)
    }

    /// Maps an absolute distance along the curve to a raw curve parameter.
    ///
    /// Binary-searches the table for the division containing `distance`
    /// and interpolates linearly inside it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn parameter_at_distance(&self, distance: f64) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let target = distance.clamp(0.0, total);
        let divisions = self.divisions() as f64;

        // First entry with a cumulative length >= target.
        let i = self.lengths.partition_point(|&l| l < target);
        if i == 0 {
            return 0.0;
        }

        let before = self.lengths[i - 1];
        let after = self.lengths[i];
        let span = after - before;
        let fraction = if span > 0.0 {
            (target - before) / span
        } else {
            0.0
        };

        ((i - 1) as f64 + fraction) / divisions
    }
}

/// Lazily built [`ArcLengthTable`] owned by a curve.
///
/// Curves clear it from every setter that changes their shape.
#[derive(Debug, Clone, Default)]
pub(crate) struct CachedArcLengths(OnceCell<ArcLengthTable>);

impl CachedArcLengths {
    pub(crate) fn get_or_build(&self, build: impl FnOnce() -> ArcLengthTable) -> &ArcLengthTable {
        self.0.get_or_init(build)
    }

    pub(crate) fn invalidate(&mut self) {
        self.0.take();
    }

    #[cfg(test)]
    pub(crate) fn is_built(&self) -> bool {
        self.0.get().is_some()
    }
}
