//! Core data model types for psyche.
//!
//! The four personality axes and the fixed twelve-question bank that every
//! session walks through in order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// A personality dimension every question is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Reflection,
    Assertion,
    Regulation,
    Control,
}

impl Axis {
    /// Canonical axis order. Dominant/lowest ties resolve to the earliest entry.
    pub const ALL: [Axis; 4] = [
        Axis::Reflection,
        Axis::Assertion,
        Axis::Regulation,
        Axis::Control,
    ];

    /// Position of this axis in [`Axis::ALL`].
    pub fn index(self) -> usize {
        match self {
            Axis::Reflection => 0,
            Axis::Assertion => 1,
            Axis::Regulation => 2,
            Axis::Control => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Reflection => write!(f, "reflection"),
            Axis::Assertion => write!(f, "assertion"),
            Axis::Regulation => write!(f, "regulation"),
            Axis::Control => write!(f, "control"),
        }
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reflection" => Ok(Axis::Reflection),
            "assertion" => Ok(Axis::Assertion),
            "regulation" => Ok(Axis::Regulation),
            "control" => Ok(Axis::Control),
            other => Err(format!("unknown axis: {other}")),
        }
    }
}

/// A single prompt shown to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Text shown to the respondent.
    pub text: &'static str,
    /// Axis the rating for this question contributes to.
    pub axis: Axis,
}

/// Number of questions in a session.
pub const QUESTION_COUNT: usize = 12;

/// The fixed question bank, asked in this order.
pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        text: "When criticized, you usually:",
        axis: Axis::Reflection,
    },
    Question {
        text: "In conflict, you tend to:",
        axis: Axis::Assertion,
    },
    Question {
        text: "When overwhelmed, you:",
        axis: Axis::Regulation,
    },
    Question {
        text: "You prefer decisions that are:",
        axis: Axis::Control,
    },
    Question {
        text: "When misunderstood, you:",
        axis: Axis::Assertion,
    },
    Question {
        text: "Your emotions are:",
        axis: Axis::Regulation,
    },
    Question {
        text: "You trust:",
        axis: Axis::Control,
    },
    Question {
        text: "Silence makes you feel:",
        axis: Axis::Reflection,
    },
    Question {
        text: "When pressured, you:",
        axis: Axis::Regulation,
    },
    Question {
        text: "Structure feels:",
        axis: Axis::Control,
    },
    Question {
        text: "You process pain by:",
        axis: Axis::Reflection,
    },
    Question {
        text: "Power, to you, is:",
        axis: Axis::Assertion,
    },
];

/// Lowest rating accepted at input boundaries.
pub const RATING_MIN: f64 = 1.0;
/// Highest rating accepted at input boundaries.
pub const RATING_MAX: f64 = 5.0;

/// Check that a rating lies within `RATING_MIN..=RATING_MAX`.
///
/// The session engine itself folds any value into its averages; this is for
/// callers that want to reject bad input before it gets there.
pub fn check_rating(value: f64) -> Result<f64, SessionError> {
    if value.is_finite() && (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(SessionError::RatingOutOfRange(value))
    }
}

/// Whole-number completion percentage after `answered` questions, rounded down.
pub fn progress_percent(answered: usize) -> u32 {
    (answered.min(QUESTION_COUNT) * 100 / QUESTION_COUNT) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_display_and_parse() {
        assert_eq!(Axis::Reflection.to_string(), "reflection");
        assert_eq!(Axis::Control.to_string(), "control");
        assert_eq!("assertion".parse::<Axis>().unwrap(), Axis::Assertion);
        assert_eq!("Regulation".parse::<Axis>().unwrap(), Axis::Regulation);
        assert!("openness".parse::<Axis>().is_err());
    }

    #[test]
    fn axis_index_matches_canonical_order() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn bank_has_three_questions_per_axis() {
        for axis in Axis::ALL {
            let count = QUESTIONS.iter().filter(|q| q.axis == axis).count();
            assert_eq!(count, 3, "axis {axis} has {count} questions");
        }
    }

    #[test]
    fn bank_order_starts_and_ends_as_expected() {
        assert_eq!(QUESTIONS[0].text, "When criticized, you usually:");
        assert_eq!(QUESTIONS[0].axis, Axis::Reflection);
        assert_eq!(QUESTIONS[11].text, "Power, to you, is:");
        assert_eq!(QUESTIONS[11].axis, Axis::Assertion);
    }

    #[test]
    fn progress_is_floored() {
        assert_eq!(progress_percent(0), 0);
        assert_eq!(progress_percent(1), 8);
        assert_eq!(progress_percent(3), 25);
        assert_eq!(progress_percent(7), 58);
        assert_eq!(progress_percent(11), 91);
        assert_eq!(progress_percent(12), 100);
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(check_rating(1.0).unwrap(), 1.0);
        assert_eq!(check_rating(5.0).unwrap(), 5.0);
        assert_eq!(check_rating(3.5).unwrap(), 3.5);
        assert!(check_rating(0.0).is_err());
        assert!(check_rating(5.01).is_err());
        assert!(check_rating(f64::NAN).is_err());
        assert!(check_rating(f64::INFINITY).is_err());
    }

    #[test]
    fn axis_serde_lowercase() {
        let json = serde_json::to_string(&Axis::Regulation).unwrap();
        assert_eq!(json, "\"regulation\"");
        let axis: Axis = serde_json::from_str("\"control\"").unwrap();
        assert_eq!(axis, Axis::Control);
    }
}
