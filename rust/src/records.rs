//! Line-oriented task list reader.
//!
//! Each non-blank line reads `<name> <duration> [<predecessor> ...]`,
//! separated by whitespace. Lines starting with `#` are comments.

use thiserror::Error;

use crate::models::TaskRecord;

/// Errors raised while reading a task list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: task {name:?} has no duration")]
    MissingDuration { line: usize, name: String },
    #[error("line {line}: invalid duration {value:?}")]
    InvalidDuration { line: usize, value: String },
}

/// Parse a task list into records, in file order.
pub fn parse_task_list(text: &str) -> Result<Vec<TaskRecord>, ParseError> {
    let mut records = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line_no = number + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        // A trimmed non-empty line always has a first field
        let Some(name) = fields.next() else {
            continue;
        };
        let value = fields.next().ok_or_else(|| ParseError::MissingDuration {
            line: line_no,
            name: name.to_string(),
        })?;
        let duration = value
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidDuration {
                line: line_no,
                value: value.to_string(),
            })?;

        records.push(TaskRecord {
            name: name.to_string(),
            duration,
            predecessors: fields.map(str::to_string).collect(),
        });
    }

    Ok(records)
}
