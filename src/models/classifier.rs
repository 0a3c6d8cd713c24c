//! Single-row classifier inference

use crate::models::loader::LoadedModel;
use crate::types::verdict::Verdict;
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType};
use std::sync::RwLock;
use tracing::debug;

/// Probability threshold used when the export lacks a label output.
const FRAUD_THRESHOLD: f64 = 0.5;

/// The pre-trained binary classifier.
///
/// The session is wrapped in a lock because ONNX inference needs mutable
/// access; the artifact itself is immutable for the process lifetime.
pub struct FraudClassifier {
    model: RwLock<LoadedModel>,
}

impl FraudClassifier {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }

    /// Predict the binary label for one feature row.
    pub fn predict(&self, features: &[f32]) -> Result<Verdict> {
        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Model lock poisoned: {}", e))?;

        let label = run_model(&mut model, features)?;
        debug!(label, "Classifier inference complete");
        Ok(Verdict::from_label(label))
    }
}

fn run_model(model: &mut LoadedModel, features: &[f32]) -> Result<i64> {
    use ort::value::Tensor;

    // Input tensor shape [1, num_features]: one row per prediction.
    let shape = vec![1_i64, features.len() as i64];
    let input_tensor =
        Tensor::from_array((shape, features.to_vec())).context("Failed to create input tensor")?;

    let input_name = model.input_name.clone();
    let label_output = model.label_output.clone();
    let prob_output = model.prob_output.clone();

    let outputs = model
        .session
        .run(ort::inputs![input_name.as_str() => input_tensor])?;

    // Prefer the integer label output when the export has one.
    if let Some(name) = &label_output {
        if let Some(output) = outputs.get(name) {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    return Ok(label);
                }
            }
        }
    }

    // Otherwise threshold the fraud-class probability.
    let prob = extract_probability(&outputs, prob_output.as_deref())?;
    Ok(i64::from(prob >= FRAUD_THRESHOLD))
}

/// Extract the fraud-class probability from the classifier outputs.
/// Handles both tensor outputs and the seq(map) form of LightGBM-style exports.
fn extract_probability(
    outputs: &ort::session::SessionOutputs,
    preferred: Option<&str>,
) -> Result<f64> {
    if let Some(name) = preferred {
        if let Some(output) = outputs.get(name) {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                let dims: Vec<i64> = shape.iter().copied().collect();
                return Ok(fraud_prob_from_tensor(&dims, data));
            }
            if DynSequenceValueType::can_downcast(&output.dtype()) {
                if let Ok(prob) = probability_from_sequence_map(output) {
                    return Ok(prob);
                }
            }
        }
    }

    // Fallback: iterate all outputs and try extraction.
    for (name, output) in outputs.iter() {
        if name.contains("label") {
            continue;
        }

        if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
            let dims: Vec<i64> = shape.iter().copied().collect();
            debug!(output = %name, "Extracted probability from tensor (fallback)");
            return Ok(fraud_prob_from_tensor(&dims, data));
        }

        if DynSequenceValueType::can_downcast(&output.dtype()) {
            if let Ok(prob) = probability_from_sequence_map(&output) {
                return Ok(prob);
            }
        }
    }

    anyhow::bail!("Could not extract a label or probability from classifier outputs")
}

/// Extract the fraud-class probability from seq(map(int64, float)) output.
fn probability_from_sequence_map(output: &ort::value::DynValue) -> Result<f64> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

    let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
    let map_value = maps
        .first()
        .ok_or_else(|| anyhow::anyhow!("Empty probability sequence"))?;

    let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

    for (class_id, prob) in &kv_pairs {
        if *class_id == 1 {
            return Ok(*prob as f64);
        }
    }
    for (class_id, prob) in &kv_pairs {
        if *class_id == 0 {
            return Ok(1.0 - *prob as f64);
        }
    }

    Err(anyhow::anyhow!("No class probability found in map"))
}

/// Extract the fraud-class probability from raw tensor data.
fn fraud_prob_from_tensor(dims: &[i64], data: &[f32]) -> f64 {
    if dims.len() == 2 {
        let num_classes = dims[1] as usize;
        if num_classes >= 2 {
            // [batch, num_classes]: fraud class is index 1
            return data[1] as f64;
        } else if num_classes == 1 {
            return data[0] as f64;
        }
    } else if dims.len() == 1 {
        let num_classes = dims[0] as usize;
        if num_classes >= 2 {
            return data[1] as f64;
        } else if num_classes == 1 {
            return data[0] as f64;
        }
    }

    data.last().map(|&v| v as f64).unwrap_or(0.5)
}
