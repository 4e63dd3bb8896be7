//! The `psyche score` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use psyche_core::model::{check_rating, QUESTIONS, QUESTION_COUNT};
use psyche_core::narrative::{build_narrative, StabilityBand};
use psyche_core::statistics::{AxisScores, Profile};

/// Parse exactly twelve comma-separated ratings, each between 1 and 5.
pub fn parse_answers(input: &str) -> Result<Vec<f64>> {
    let values = input
        .split(',')
        .map(|s| -> Result<f64> {
            let s = s.trim();
            let value = s
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("invalid rating: '{s}'"))?;
            Ok(check_rating(value)?)
        })
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(
        values.len() == QUESTION_COUNT,
        "expected {QUESTION_COUNT} ratings, got {}",
        values.len()
    );
    Ok(values)
}

/// Score answers in question order.
pub fn profile_for(answers: &[f64]) -> Profile {
    let mut scores = AxisScores::new();
    for (question, &value) in QUESTIONS.iter().zip(answers) {
        scores.record(question.axis, value);
    }
    Profile::from_scores(&scores)
}

pub fn execute(answers: &str, json: bool) -> Result<()> {
    let answers = parse_answers(answers)?;
    let profile = profile_for(&answers);
    let narrative = build_narrative(&profile);

    if json {
        let out = serde_json::json!({
            "profile": profile,
            "band": StabilityBand::from_stability(profile.stability),
            "result": narrative,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Axis", "Average", ""]);
    for (axis, average) in profile.averages.iter() {
        let marker = if axis == profile.dominant {
            "dominant"
        } else if axis == profile.lowest {
            "lowest"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(axis),
            Cell::new(format!("{average:.2}")),
            Cell::new(marker),
        ]);
    }
    println!("{table}");
    println!("Stability: {:.2}", profile.stability);
    println!();
    println!("{narrative}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psyche_core::model::Axis;

    #[test]
    fn parses_twelve_ratings() {
        let answers = parse_answers("5, 4,5,1,5,4,1,5,4,1,5,4").unwrap();
        assert_eq!(answers.len(), 12);
        assert_eq!(answers[1], 4.0);
    }

    #[test]
    fn rejects_wrong_count() {
        let err = parse_answers("1,2,3").unwrap_err();
        assert!(err.to_string().contains("expected 12 ratings, got 3"));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_answers("6,4,5,1,5,4,1,5,4,1,5,4").is_err());
        assert!(parse_answers("x,4,5,1,5,4,1,5,4,1,5,4").is_err());
    }

    #[test]
    fn profile_uses_question_axes() {
        let profile = profile_for(&[5.0, 4.0, 5.0, 1.0, 5.0, 4.0, 1.0, 5.0, 4.0, 1.0, 5.0, 4.0]);
        assert_eq!(profile.dominant, Axis::Reflection);
        assert_eq!(profile.lowest, Axis::Control);
        assert_eq!(profile.stability, 68.74);
    }
}
