//! The single submission operation: validate, preprocess, predict

use crate::artifacts::ArtifactStore;
use crate::features::{self, FeatureRow};
use crate::types::transaction::TransactionInput;
use crate::types::verdict::Verdict;
use tracing::{info, warn};

/// Successful outcome of one submission
#[derive(Debug, Clone)]
pub struct Prediction {
    pub verdict: Verdict,
    /// Processed row, rendered for auditability
    pub features: FeatureRow,
}

/// Everything that can stop a submission short of a verdict
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    /// Artifacts were missing at load time; fatal for every submission.
    #[error("Model artifacts are unavailable: {0}")]
    ArtifactsUnavailable(String),
    /// Required text fields left empty; the user may correct and resubmit.
    #[error("Please fill all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// Any other preprocessing or inference failure.
    #[error("An error occurred during prediction: {0}")]
    Prediction(String),
}

/// Handle one submit action end to end.
///
/// All failures fold into [`SubmissionError`]; nothing propagates past this
/// boundary, and no partial result is produced.
pub fn handle(
    input: &TransactionInput,
    store: &ArtifactStore,
) -> Result<Prediction, SubmissionError> {
    let missing = input.missing_required_fields();
    if !missing.is_empty() {
        warn!(fields = ?missing, "Submission rejected: required fields empty");
        return Err(SubmissionError::MissingFields(missing));
    }

    let artifacts = store.get().ok_or_else(|| {
        SubmissionError::ArtifactsUnavailable(
            store
                .error()
                .unwrap_or("artifacts were never loaded")
                .to_string(),
        )
    })?;

    let row = features::build_row(input, &artifacts.encoders);
    let verdict = artifacts
        .classifier
        .predict(&row.to_model_input())
        .map_err(|e| SubmissionError::Prediction(format!("{e:#}")))?;

    info!(merchant = %input.merchant, ?verdict, "Fraud check complete");
    Ok(Prediction {
        verdict,
        features: row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactStore;
    use crate::config::ArtifactConfig;
    use std::path::PathBuf;

    fn empty_store() -> ArtifactStore {
        ArtifactStore::load(&ArtifactConfig {
            model_path: PathBuf::from("no/such/model.onnx"),
            encoders_path: PathBuf::from("no/such/encoders.json"),
        })
    }

    fn complete_input() -> TransactionInput {
        TransactionInput {
            merchant: "Acme".to_string(),
            category: "grocery".to_string(),
            cc_num: "4111111111111111".to_string(),
            ..TransactionInput::default()
        }
    }

    #[test]
    fn test_empty_merchant_is_rejected_before_anything_else() {
        let mut input = complete_input();
        input.merchant = String::new();

        let result = handle(&input, &empty_store());
        assert_eq!(
            result.unwrap_err(),
            SubmissionError::MissingFields(vec!["merchant"])
        );
    }

    #[test]
    fn test_all_required_fields_listed_when_empty() {
        let input = TransactionInput::default();

        match handle(&input, &empty_store()) {
            Err(SubmissionError::MissingFields(fields)) => {
                assert_eq!(fields, vec!["merchant", "category", "credit card number"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_store_halts_before_preprocessing() {
        let result = handle(&complete_input(), &empty_store());

        match result {
            Err(SubmissionError::ArtifactsUnavailable(message)) => {
                assert!(message.contains("model.onnx"), "unexpected message: {message}");
            }
            other => panic!("expected ArtifactsUnavailable, got {other:?}"),
        }
    }
}
