//! ONNX model loading and inference via the `ort` crate.
//!
//! The classifier is an externally trained decision forest exported to ONNX
//! with a single float input (`float_input`, shape `(1, 17)`) and an int64
//! `label` output in {0, 1}. It is opaque here: this module only shapes the
//! feature row, runs the session and maps the label.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use ort::session::Session;
use ort::value::TensorRef;
use serde::Deserialize;

use crate::features::{UrlFeatures, FEATURE_COLUMNS, NUM_FEATURES};

/// Classifier output: 0 = benign, 1 = malicious. The encoding is the
/// model's, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Benign,
    Malicious,
}

impl Verdict {
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Verdict::Benign),
            1 => Some(Verdict::Malicious),
            _ => None,
        }
    }

    pub fn is_malicious(self) -> bool {
        matches!(self, Verdict::Malicious)
    }
}

/// Sidecar written at model-export time, describing the column schema the
/// model was trained on.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    pub feature_columns: Vec<String>,
}

pub fn load_model_config(path: &Path) -> Result<ModelConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read model config {}", path.display()))?;
    let config: ModelConfig = serde_json::from_str(&data)?;
    Ok(config)
}

impl ModelConfig {
    /// Fail fast when the extractor's schema and the model's disagree. A
    /// reordered or missing column would otherwise be accepted silently and
    /// predict garbage.
    pub fn validate(&self) -> Result<()> {
        if self.feature_columns.len() != NUM_FEATURES {
            bail!(
                "model config lists {} feature columns, extractor produces {}",
                self.feature_columns.len(),
                NUM_FEATURES
            );
        }
        for (i, (got, want)) in self.feature_columns.iter().zip(FEATURE_COLUMNS).enumerate() {
            if got.as_str() != want {
                bail!("feature column {i} mismatch: model expects {got:?}, extractor produces {want:?}");
            }
        }
        Ok(())
    }
}

pub struct UrlClassifier {
    session: Mutex<Session>,
}

impl UrlClassifier {
    /// Load an ONNX model from the given path.
    pub fn load(model_path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_intra_threads(4)?
            .commit_from_file(model_path)?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Classify a single feature record.
    pub fn predict(&self, features: &UrlFeatures) -> Result<Verdict> {
        let row = Array2::<f32>::from_shape_vec((1, NUM_FEATURES), features.to_vec())?;
        let input_tensor = TensorRef::from_array_view(&row)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("lock error: {e}"))?;
        let outputs = session.run(ort::inputs!["float_input" => input_tensor])?;

        let labels = outputs["label"].try_extract_array::<i64>()?;
        let label = labels
            .iter()
            .next()
            .copied()
            .context("classifier returned an empty label tensor")?;

        match Verdict::from_label(label) {
            Some(verdict) => Ok(verdict),
            None => bail!("unexpected classifier label: {label}"),
        }
    }
}
