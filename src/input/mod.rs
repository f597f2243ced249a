//! # Choice inputs
//!
//! Defines a light-weight container for choice-task data: a feature matrix
//! over alternatives, a chosen-row indicator, and the respondent/task labels
//! that partition rows into choice tasks.
//!
//! # Examples
//!
//! ```
//! use faer::Mat;
//! use choice_models::ChoiceDataset;
//!
//! // One respondent, one task, two alternatives.
//! let features = Mat::from_fn(2, 1, |i, _| if i == 0 { 1.0 } else { 0.0 });
//! let dataset = ChoiceDataset::new(features, vec![true, false], vec![1, 1], vec![1, 1]);
//!
//! assert!(dataset.validate().is_ok());
//! ```
//!
//! ```
//! use faer::Mat;
//! use choice_models::ChoiceDataset;
//!
//! let features = Mat::from_fn(2, 1, |_i, _| 1.0);
//! let dataset = ChoiceDataset::new(features, vec![true], vec![1, 1], vec![1, 1]);
//!
//! assert!(dataset.validate().is_err());
//! ```

use faer::Mat;
use thiserror::Error;

use crate::utils::matrix_is_finite;

/// Errors returned when validating choice datasets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceInputError {
    #[error("feature matrix must have at least one column")]
    EmptyDesign,
    #[error("feature matrix must have at least one row")]
    EmptyDataset,
    #[error("chosen indicator length ({len}) must equal number of rows ({rows})")]
    InvalidChosenLength { len: usize, rows: usize },
    #[error("respondent id length ({len}) must equal number of rows ({rows})")]
    InvalidRespondentLength { len: usize, rows: usize },
    #[error("task id length ({len}) must equal number of rows ({rows})")]
    InvalidTaskLength { len: usize, rows: usize },
    #[error("feature matrix contains non-finite values")]
    NonFiniteFeatures,
}

/// Row-per-alternative input for grouped choice models.
///
/// Each row describes one alternative inside one choice task; rows belong to
/// the same task when they share `(respondent_id, task_id)`.
#[derive(Debug, Clone)]
pub struct ChoiceDataset {
    pub features: Mat<f64>,
    pub chosen: Vec<bool>,
    pub respondent_ids: Vec<u64>,
    pub task_ids: Vec<u64>,
}

impl ChoiceDataset {
    #[must_use]
    pub const fn new(
        features: Mat<f64>,
        chosen: Vec<bool>,
        respondent_ids: Vec<u64>,
        task_ids: Vec<u64>,
    ) -> Self {
        Self {
            features,
            chosen,
            respondent_ids,
            task_ids,
        }
    }

    /// Number of alternative rows in the dataset.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of encoded attribute columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Validate shapes and values for the feature matrix and row labels.
    ///
    /// The exactly-one-chosen-per-task invariant is checked during task
    /// grouping, not here, since it needs the task partition.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceInputError` if inputs are malformed.
    pub fn validate(&self) -> Result<(), ChoiceInputError> {
        if self.features.ncols() == 0 {
            return Err(ChoiceInputError::EmptyDesign);
        }
        let rows = self.features.nrows();
        if rows == 0 {
            return Err(ChoiceInputError::EmptyDataset);
        }
        if self.chosen.len() != rows {
            return Err(ChoiceInputError::InvalidChosenLength {
                len: self.chosen.len(),
                rows,
            });
        }
        if self.respondent_ids.len() != rows {
            return Err(ChoiceInputError::InvalidRespondentLength {
                len: self.respondent_ids.len(),
                rows,
            });
        }
        if self.task_ids.len() != rows {
            return Err(ChoiceInputError::InvalidTaskLength {
                len: self.task_ids.len(),
                rows,
            });
        }
        if !matrix_is_finite(&self.features) {
            return Err(ChoiceInputError::NonFiniteFeatures);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_row_features() -> Mat<f64> {
        Mat::from_fn(2, 2, |i, j| if j == 0 || i == 0 { 1.0 } else { 0.0 })
    }

    #[test]
    fn validate_accepts_well_formed_dataset() {
        let dataset =
            ChoiceDataset::new(two_row_features(), vec![true, false], vec![1, 1], vec![1, 1]);
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_design() {
        let dataset = ChoiceDataset::new(
            Mat::<f64>::zeros(2, 0),
            vec![true, false],
            vec![1, 1],
            vec![1, 1],
        );
        let err = dataset.validate().expect_err("empty design should fail");
        assert_eq!(err, ChoiceInputError::EmptyDesign);
    }

    #[test]
    fn validate_rejects_empty_dataset() {
        let dataset = ChoiceDataset::new(Mat::<f64>::zeros(0, 2), vec![], vec![], vec![]);
        let err = dataset.validate().expect_err("empty dataset should fail");
        assert_eq!(err, ChoiceInputError::EmptyDataset);
    }

    #[test]
    fn validate_rejects_chosen_length_mismatch() {
        let dataset = ChoiceDataset::new(two_row_features(), vec![true], vec![1, 1], vec![1, 1]);
        let err = dataset.validate().expect_err("chosen mismatch should fail");
        assert_eq!(err, ChoiceInputError::InvalidChosenLength { len: 1, rows: 2 });
    }

    #[test]
    fn validate_rejects_respondent_length_mismatch() {
        let dataset =
            ChoiceDataset::new(two_row_features(), vec![true, false], vec![1], vec![1, 1]);
        let err = dataset
            .validate()
            .expect_err("respondent mismatch should fail");
        assert_eq!(
            err,
            ChoiceInputError::InvalidRespondentLength { len: 1, rows: 2 }
        );
    }

    #[test]
    fn validate_rejects_task_length_mismatch() {
        let dataset =
            ChoiceDataset::new(two_row_features(), vec![true, false], vec![1, 1], vec![1]);
        let err = dataset.validate().expect_err("task mismatch should fail");
        assert_eq!(err, ChoiceInputError::InvalidTaskLength { len: 1, rows: 2 });
    }

    #[test]
    fn validate_rejects_non_finite_features() {
        let features = Mat::from_fn(2, 1, |i, _| if i == 0 { f64::NAN } else { 1.0 });
        let dataset = ChoiceDataset::new(features, vec![true, false], vec![1, 1], vec![1, 1]);
        let err = dataset
            .validate()
            .expect_err("non-finite features should fail");
        assert_eq!(err, ChoiceInputError::NonFiniteFeatures);
    }
}
