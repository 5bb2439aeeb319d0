//! Constraint-table parsing.
//!
//! One task per line: `<task_id> <duration> [<predecessor_id> ...]`, fields
//! separated by whitespace. Blank lines are skipped. Structural checks (dense
//! ids, known predecessors) happen when the graph is built.

use std::fs;
use std::path::Path;

use crate::error::MalformedInputError;
use crate::models::TaskRecord;

fn parse_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    field: &'static str,
) -> Result<T, MalformedInputError> {
    value
        .parse::<T>()
        .map_err(|_| MalformedInputError::InvalidInteger {
            line,
            field,
            value: value.to_string(),
        })
}

/// Parse a single non-blank line. `line` is the 1-based physical line number.
fn parse_line(text: &str, line: usize) -> Result<TaskRecord, MalformedInputError> {
    let mut fields = text.split_whitespace();

    // Callers skip blank lines, so there is always a first field
    let task_id = parse_field::<usize>(fields.next().unwrap_or_default(), line, "task id")?;

    // Durations are signed so a negative one survives until validation
    let duration = match fields.next() {
        Some(value) => parse_field::<i64>(value, line, "duration")?,
        None => return Err(MalformedInputError::MissingDuration { line }),
    };

    let predecessors = fields
        .map(|value| parse_field::<usize>(value, line, "predecessor id"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TaskRecord::new(task_id, duration, predecessors))
}

/// Parse a constraint table held in memory.
pub fn parse_constraint_table(text: &str) -> Result<Vec<TaskRecord>, MalformedInputError> {
    text.lines()
        .enumerate()
        .filter(|(_, content)| !content.trim().is_empty())
        .map(|(index, content)| parse_line(content, index + 1))
        .collect()
}

/// Read and parse a constraint table file.
pub fn read_constraint_table(
    path: impl AsRef<Path>,
) -> Result<Vec<TaskRecord>, MalformedInputError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| MalformedInputError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_constraint_table(&text)
}
