use super::catalog::SurveyCatalog;
use super::domain::{QuestionId, ResponseMap};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ResponseImportError {
    #[error("failed to read responses: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid responses CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: question {question} is not part of the survey catalog")]
    UnknownQuestion { row: usize, question: QuestionId },
    #[error("row {row}: {value} is not an option value of question {question}")]
    InvalidValue {
        row: usize,
        question: QuestionId,
        value: u32,
    },
    #[error("{value} is not an option value of question {question}")]
    UnlistedValue { question: QuestionId, value: u32 },
}

/// Loads a `question_id,value` CSV export into a [`ResponseMap`] for offline scoring.
pub struct ResponseImporter;

impl ResponseImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &SurveyCatalog,
    ) -> Result<ResponseMap, ResponseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    /// Later rows for the same question overwrite earlier ones.
    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &SurveyCatalog,
    ) -> Result<ResponseMap, ResponseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut responses = ResponseMap::new();

        for (idx, record) in csv_reader.deserialize::<ResponseRow>().enumerate() {
            let row = record?;
            // Header is row 1.
            let row_number = idx + 2;
            let question_id = QuestionId(row.question_id);

            let question =
                catalog
                    .question(&question_id)
                    .ok_or_else(|| ResponseImportError::UnknownQuestion {
                        row: row_number,
                        question: question_id.clone(),
                    })?;
            if question.option_for_value(row.value).is_none() {
                return Err(ResponseImportError::InvalidValue {
                    row: row_number,
                    question: question_id,
                    value: row.value,
                });
            }

            responses.record(question_id, row.value);
        }

        Ok(responses)
    }

    /// Checks answers submitted as a map. Ids outside the catalog are left for
    /// scoring to ignore; answers to known questions must be one of their options.
    pub fn check_values(
        responses: &ResponseMap,
        catalog: &SurveyCatalog,
    ) -> Result<(), ResponseImportError> {
        for (question_id, value) in responses.iter() {
            let Some(question) = catalog.question(question_id) else {
                continue;
            };
            if question.option_for_value(value).is_none() {
                return Err(ResponseImportError::UnlistedValue {
                    question: question_id.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    question_id: String,
    value: u32,
}
