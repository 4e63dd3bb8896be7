//! The `psyche questions` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use psyche_core::model::{Axis, QUESTIONS};

pub fn execute(axis: Option<Axis>) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Axis", "Question"]);

    let selected = QUESTIONS
        .iter()
        .enumerate()
        .filter(|(_, q)| axis.is_none_or(|a| q.axis == a));
    for (i, question) in selected {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(question.axis),
            Cell::new(question.text),
        ]);
    }

    println!("{table}");
    Ok(())
}
