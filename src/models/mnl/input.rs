//! Task grouping for choice datasets.

use std::collections::{BTreeMap, BTreeSet};

use crate::input::ChoiceDataset;

use super::types::MnlError;

/// Row indices for one choice task.
#[derive(Debug, Clone)]
pub(crate) struct TaskRows {
    pub respondent_id: u64,
    pub rows: Vec<usize>,
    /// Position of the chosen row within `rows`.
    pub chosen_position: usize,
}

/// Prepared task partition reused by the likelihood, MLE, and sampler
/// components.
#[derive(Debug, Clone)]
pub(crate) struct PreparedChoiceData {
    pub tasks: Vec<TaskRows>,
}

impl PreparedChoiceData {
    #[must_use]
    pub(crate) fn n_tasks(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub(crate) fn n_respondents(&self) -> usize {
        self.tasks
            .iter()
            .map(|task| task.respondent_id)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Partition rows into tasks keyed by `(respondent_id, task_id)` and enforce
/// the exactly-one-chosen-per-task invariant.
///
/// # Errors
///
/// Returns `MnlError` if the dataset is invalid or a task has zero or more
/// than one chosen row.
pub(crate) fn prepare_tasks(input: &ChoiceDataset) -> Result<PreparedChoiceData, MnlError> {
    input.validate()?;

    let mut grouped: BTreeMap<(u64, u64), Vec<usize>> = BTreeMap::new();
    for row in 0..input.n_rows() {
        let key = (input.respondent_ids[row], input.task_ids[row]);
        grouped.entry(key).or_default().push(row);
    }

    let mut tasks = Vec::with_capacity(grouped.len());
    for ((respondent_id, task_id), rows) in grouped {
        let mut chosen_position = None;
        for (position, row) in rows.iter().copied().enumerate() {
            if input.chosen[row] {
                if chosen_position.is_some() {
                    return Err(MnlError::MultipleChosenRows {
                        respondent: respondent_id,
                        task: task_id,
                    });
                }
                chosen_position = Some(position);
            }
        }
        let chosen_position = chosen_position.ok_or(MnlError::MissingChosenRow {
            respondent: respondent_id,
            task: task_id,
        })?;
        tasks.push(TaskRows {
            respondent_id,
            rows,
            chosen_position,
        });
    }

    Ok(PreparedChoiceData { tasks })
}
