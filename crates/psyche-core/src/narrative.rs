//! Narrative assembly for completed sessions.

use serde::{Deserialize, Serialize};

use crate::model::Axis;
use crate::statistics::{AxisScores, Profile};

const OPENING: &str = "You are more internally structured than you appear.";
const CLOSING: &str =
    "Your shadow is not weakness. It is the part of you that waits to be acknowledged.";

/// How evenly the four axis averages cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityBand {
    /// Stability above 80.
    Stable,
    /// Stability above 60, up to and including 80.
    Tension,
    /// Stability of 60 or below.
    Competing,
}

impl StabilityBand {
    pub fn from_stability(stability: f64) -> Self {
        if stability > 80.0 {
            StabilityBand::Stable
        } else if stability > 60.0 {
            StabilityBand::Tension
        } else {
            StabilityBand::Competing
        }
    }

    fn sentence(self) -> &'static str {
        match self {
            StabilityBand::Stable => {
                "Your psychological structure is stable. You are consistent under pressure."
            }
            StabilityBand::Tension => {
                "There is balance within you, but tension exists between parts."
            }
            StabilityBand::Competing => {
                "Your internal forces compete. Growth will require conscious integration."
            }
        }
    }
}

fn dominant_sentence(axis: Axis) -> &'static str {
    match axis {
        Axis::Reflection => {
            "You analyze before you act. You rarely move without internal alignment."
        }
        Axis::Assertion => "You hold strong positions. Even when silent, you are not passive.",
        Axis::Regulation => {
            "You contain more than you reveal. Control is your emotional language."
        }
        Axis::Control => "You prefer structure. Chaos unsettles you more than you admit.",
    }
}

fn lowest_sentence(axis: Axis) -> &'static str {
    match axis {
        Axis::Reflection => "You may avoid sitting too long with your own uncertainty.",
        Axis::Assertion => "You sometimes retreat instead of claiming space.",
        Axis::Regulation => "Emotion can leak out when pressure builds.",
        Axis::Control => "Letting go is harder for you than you show.",
    }
}

/// Render the five-paragraph narrative for a profile.
pub fn build_narrative(profile: &Profile) -> String {
    [
        OPENING,
        dominant_sentence(profile.dominant),
        lowest_sentence(profile.lowest),
        StabilityBand::from_stability(profile.stability).sentence(),
        CLOSING,
    ]
    .join("\n\n")
}

/// Score a finished session and render its narrative.
pub fn generate_result(scores: &AxisScores) -> String {
    build_narrative(&Profile::from_scores(scores))
}
