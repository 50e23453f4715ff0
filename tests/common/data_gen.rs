//! Data generation utilities for testing.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// `2 * max + 1` evenly spaced points on a line, centered at zero.
pub fn line(max: i32) -> Vec<Vec<f64>> {
    (-max..=max).map(|x| vec![x as f64]).collect()
}

/// `car` random points in `[min, max)^dim`, seeded for reproducibility.
pub fn tabular(car: usize, dim: usize, min: f64, max: f64) -> Vec<Vec<f64>> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..car).map(|_| (0..dim).map(|_| rng.gen_range(min..max)).collect()).collect()
}

/// A line with exponentially shrinking gaps, exercising degenerate,
/// near-coincident inputs.
pub fn pathological_line() -> Vec<Vec<f64>> {
    let min_delta = 1e-9;
    let mut delta = min_delta;
    let mut line = vec![vec![0.0]];
    while line.len() < 200 {
        let last = line.last().unwrap_or_else(|| unreachable!())[0];
        line.push(vec![last + delta]);
        delta *= 2.0;
        delta += min_delta;
    }
    line
}
