//! Axis aggregation and the stability metric.
//!
//! Turns the raw per-axis ratings of a finished session into a [`Profile`]:
//! rounded averages, the dominant and lowest axis, and a stability score
//! derived from the population standard deviation of the averages.

use serde::{Deserialize, Serialize};

use crate::model::Axis;

/// Ratings recorded for each axis, in answer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisScores {
    ratings: [Vec<f64>; 4],
}

impl AxisScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rating to an axis.
    pub fn record(&mut self, axis: Axis, value: f64) {
        self.ratings[axis.index()].push(value);
    }

    /// Ratings recorded so far for an axis.
    pub fn ratings(&self, axis: Axis) -> &[f64] {
        &self.ratings[axis.index()]
    }

    /// Total number of ratings across all axes.
    pub fn total(&self) -> usize {
        self.ratings.iter().map(Vec::len).sum()
    }
}

/// Per-axis mean rating, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAverages {
    pub reflection: f64,
    pub assertion: f64,
    pub regulation: f64,
    pub control: f64,
}

impl AxisAverages {
    /// Average of every axis; an axis without ratings averages to 0.
    pub fn from_scores(scores: &AxisScores) -> Self {
        let avg = |axis: Axis| {
            let values = scores.ratings(axis);
            if values.is_empty() {
                0.0
            } else {
                round2(values.iter().sum::<f64>() / values.len() as f64)
            }
        };
        Self {
            reflection: avg(Axis::Reflection),
            assertion: avg(Axis::Assertion),
            regulation: avg(Axis::Regulation),
            control: avg(Axis::Control),
        }
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Reflection => self.reflection,
            Axis::Assertion => self.assertion,
            Axis::Regulation => self.regulation,
            Axis::Control => self.control,
        }
    }

    /// `(axis, average)` pairs in canonical axis order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    /// The four averages in canonical axis order.
    pub fn values(&self) -> [f64; 4] {
        Axis::ALL.map(|axis| self.get(axis))
    }
}

/// Round to two decimal places; exact halves go to the even neighbour.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Population standard deviation (divides by N). Returns 0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Axis with the highest average; the first in canonical order wins ties.
pub fn dominant_axis(averages: &AxisAverages) -> Axis {
    let mut best = Axis::ALL[0];
    for (axis, value) in averages.iter() {
        if value > averages.get(best) {
            best = axis;
        }
    }
    best
}

/// Axis with the lowest average; the first in canonical order wins ties.
pub fn lowest_axis(averages: &AxisAverages) -> Axis {
    let mut worst = Axis::ALL[0];
    for (axis, value) in averages.iter() {
        if value < averages.get(worst) {
            worst = axis;
        }
    }
    worst
}

/// `100 - pstdev(averages) * 20`, rounded to two places. Not clamped.
pub fn stability(averages: &AxisAverages) -> f64 {
    round2(100.0 - population_std_dev(&averages.values()) * 20.0)
}

/// Everything the narrative needs about a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub averages: AxisAverages,
    pub dominant: Axis,
    pub lowest: Axis,
    pub stability: f64,
}

impl Profile {
    pub fn from_scores(scores: &AxisScores) -> Self {
        Self::from_averages(AxisAverages::from_scores(scores))
    }

    pub fn from_averages(averages: AxisAverages) -> Self {
        Self {
            averages,
            dominant: dominant_axis(&averages),
            lowest: lowest_axis(&averages),
            stability: stability(&averages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn averages(values: [f64; 4]) -> AxisAverages {
        AxisAverages {
            reflection: values[0],
            assertion: values[1],
            regulation: values[2],
            control: values[3],
        }
    }

    #[test]
    fn averages_are_rounded_to_two_places() {
        let mut scores = AxisScores::new();
        for v in [4.0, 5.0, 4.0] {
            scores.record(Axis::Assertion, v);
        }
        let avg = AxisAverages::from_scores(&scores);
        assert_eq!(avg.assertion, 4.33);
    }

    #[test]
    fn half_hundredths_round_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(1.375), 1.38);
        assert_eq!(round2(-0.625), -0.62);

        let mut scores = AxisScores::new();
        for _ in 0..3 {
            scores.record(Axis::Regulation, 1.125);
        }
        assert_eq!(AxisAverages::from_scores(&scores).regulation, 1.12);
    }

    #[test]
    fn half_tie_decides_lowest_axis() {
        let mut scores = AxisScores::new();
        for _ in 0..3 {
            scores.record(Axis::Reflection, 1.13);
            scores.record(Axis::Assertion, 5.0);
            scores.record(Axis::Regulation, 1.125);
            scores.record(Axis::Control, 5.0);
        }
        let profile = Profile::from_scores(&scores);
        assert_eq!(profile.averages.reflection, 1.13);
        assert_eq!(profile.averages.regulation, 1.12);
        assert_eq!(profile.lowest, Axis::Regulation);
        assert_eq!(profile.dominant, Axis::Assertion);
    }

    #[test]
    fn empty_axis_averages_to_zero() {
        let mut scores = AxisScores::new();
        scores.record(Axis::Reflection, 3.0);
        let avg = AxisAverages::from_scores(&scores);
        assert_eq!(avg.reflection, 3.0);
        assert_eq!(avg.assertion, 0.0);
        assert_eq!(avg.regulation, 0.0);
        assert_eq!(avg.control, 0.0);
    }

    #[test]
    fn all_empty_scores_do_not_panic() {
        let profile = Profile::from_scores(&AxisScores::new());
        assert_eq!(profile.dominant, Axis::Reflection);
        assert_eq!(profile.lowest, Axis::Reflection);
        assert_eq!(profile.stability, 100.0);
    }

    #[test]
    fn ties_resolve_in_canonical_order() {
        let avg = averages([5.0, 5.0, 1.0, 1.0]);
        assert_eq!(dominant_axis(&avg), Axis::Reflection);
        assert_eq!(lowest_axis(&avg), Axis::Regulation);
    }

    #[test]
    fn strict_max_and_min_pick_later_axes() {
        let avg = averages([2.0, 3.0, 1.5, 4.5]);
        assert_eq!(dominant_axis(&avg), Axis::Control);
        assert_eq!(lowest_axis(&avg), Axis::Regulation);
    }

    #[test]
    fn uniform_averages_are_fully_stable() {
        let avg = averages([4.0, 4.0, 4.0, 4.0]);
        assert_eq!(population_std_dev(&avg.values()), 0.0);
        assert_eq!(stability(&avg), 100.0);
    }

    #[test]
    fn spread_averages_lower_stability() {
        let avg = averages([5.0, 1.0, 3.0, 3.0]);
        let sd = population_std_dev(&avg.values());
        assert!((sd - std::f64::consts::SQRT_2).abs() < 1e-9, "sd={sd}");
        assert_eq!(stability(&avg), 71.72);
    }

    #[test]
    fn stability_is_not_clamped() {
        let avg = averages([100.0, -100.0, 100.0, -100.0]);
        assert!(stability(&avg) < 0.0);
    }

    #[test]
    fn scores_track_total() {
        let mut scores = AxisScores::new();
        scores.record(Axis::Control, 1.0);
        scores.record(Axis::Control, 2.0);
        scores.record(Axis::Reflection, 5.0);
        assert_eq!(scores.total(), 3);
        assert_eq!(scores.ratings(Axis::Control), &[1.0, 2.0]);
    }
}
