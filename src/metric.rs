//! The metric contract consumed by every other module in this crate.
//!
//! This crate treats the point type and the metric itself as external
//! collaborators: only the contract in [`Metric`] matters to `NeighborGraph`,
//! `BallTree`, `DualTreeRange`, and `Gt`. Concrete metrics below
//! ([`Euclidean`], `Manhattan`) are provided for convenience, tests, and
//! benchmarks; callers with their own point representation need only
//! implement `Metric` for it.

/// A metric over points of type `P`.
///
/// Implementors must ensure `dist` is a true metric: nonnegative, symmetric,
/// `dist(a, a) == 0`, and satisfying the triangle inequality. Violating the
/// triangle inequality is not checked at runtime (see the crate's error
/// handling design) and will silently produce incorrect, non-covering radii.
pub trait Metric<P: ?Sized> {
    /// Returns the true distance between `a` and `b`.
    fn dist(&self, a: &P, b: &P) -> f64;

    /// Returns a value that orders the same way as `dist`, but may be cheaper
    /// to compute (e.g. a squared distance that avoids a square root).
    ///
    /// The default forwards to [`Metric::dist`]; override only when a
    /// cheaper monotone surrogate exists. Wherever both `dist` and
    /// `compare_dist` are used against the same pair of points, they must
    /// agree on ordering with every other `dist`/`compare_dist` pair produced
    /// by this metric.
    fn compare_dist(&self, a: &P, b: &P) -> f64 {
        self.dist(a, b)
    }
}

impl<P: ?Sized, F: Fn(&P, &P) -> f64> Metric<P> for F {
    fn dist(&self, a: &P, b: &P) -> f64 {
        self(a, b)
    }
}

/// The Euclidean (L2) metric over slices of `f64`.
///
/// `compare_dist` returns the *squared* Euclidean distance, avoiding a square
/// root on every comparison; callers that need the true distance use `dist`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Euclidean {
    /// Returns the sum of squared componentwise differences between `a` and `b`.
    fn squared(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
    }
}

impl Metric<[f64]> for Euclidean {
    fn dist(&self, a: &[f64], b: &[f64]) -> f64 {
        Self::squared(a, b).sqrt()
    }

    fn compare_dist(&self, a: &[f64], b: &[f64]) -> f64 {
        Self::squared(a, b)
    }
}

impl Metric<Vec<f64>> for Euclidean {
    fn dist(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        Metric::<[f64]>::dist(self, a, b)
    }

    fn compare_dist(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        Metric::<[f64]>::compare_dist(self, a, b)
    }
}

/// The Manhattan (L1) metric over slices of `f64`.
///
/// `dist` and `compare_dist` coincide: there is no cheaper monotone surrogate
/// for a sum of absolute differences.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Metric<[f64]> for Manhattan {
    fn dist(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}

impl Metric<Vec<f64>> for Manhattan {
    fn dist(&self, a: &Vec<f64>, b: &Vec<f64>) -> f64 {
        Metric::<[f64]>::dist(self, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_matches_compare_dist_ordering() {
        let origin = vec![0.0, 0.0];
        let near = vec![1.0, 0.0];
        let far = vec![3.0, 4.0];

        let metric = Euclidean;
        assert!(metric.dist(&origin, &near) < metric.dist(&origin, &far));
        assert!(metric.compare_dist(&origin, &near) < metric.compare_dist(&origin, &far));
        assert!((metric.dist(&origin, &far) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn manhattan_sums_absolute_differences() {
        let a = vec![0.0, 0.0];
        let b = vec![3.0, -4.0];
        assert!((Manhattan.dist(&a, &b) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn closure_implements_metric() {
        let metric = |a: &f64, b: &f64| (a - b).abs();
        assert!((Metric::dist(&metric, &1.0, &4.0) - 3.0).abs() < 1e-12);
    }
}
