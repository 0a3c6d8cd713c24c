//! Loading and process-wide caching of the model artifacts

use crate::config::ArtifactConfig;
use crate::encoders::EncoderSet;
use crate::models::classifier::FraudClassifier;
use crate::models::loader::ModelLoader;
use anyhow::Result;
use std::sync::OnceLock;
use tracing::{error, info};

/// The two pre-trained artifacts every prediction depends on
pub struct Artifacts {
    pub classifier: FraudClassifier,
    pub encoders: EncoderSet,
}

/// Result of the one-shot artifact load.
///
/// An empty store (missing artifact files) carries the user-facing error;
/// submissions must treat it as a fatal precondition and abort. There is no
/// retry and no reload.
pub struct ArtifactStore {
    artifacts: Option<Artifacts>,
    error: Option<String>,
}

impl ArtifactStore {
    /// Load both artifacts from the configured paths.
    pub fn load(config: &ArtifactConfig) -> Self {
        match Self::try_load(config) {
            Ok(artifacts) => {
                info!(
                    encoded_columns = artifacts.encoders.column_count(),
                    "Model artifacts loaded"
                );
                Self {
                    artifacts: Some(artifacts),
                    error: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to load model artifacts");
                Self {
                    artifacts: None,
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }

    fn try_load(config: &ArtifactConfig) -> Result<Artifacts> {
        // Check existence up front so a missing file never reaches ONNX Runtime.
        for path in [&config.model_path, &config.encoders_path] {
            if !path.exists() {
                anyhow::bail!(
                    "Artifact file not found: {}. Ensure the classifier and encoder files are in the correct path.",
                    path.display()
                );
            }
        }

        let encoders = EncoderSet::from_file(&config.encoders_path)?;
        let loader = ModelLoader::new()?;
        let model = loader.load_model(&config.model_path)?;

        Ok(Artifacts {
            classifier: FraudClassifier::new(model),
            encoders,
        })
    }

    /// The loaded artifacts, or `None` when loading failed.
    pub fn get(&self) -> Option<&Artifacts> {
        self.artifacts.as_ref()
    }

    /// The load error, when there is one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

static STORE: OnceLock<ArtifactStore> = OnceLock::new();

/// Process-wide artifact cache, populated lazily on first access and never
/// reloaded or invalidated.
pub fn shared(config: &ArtifactConfig) -> &'static ArtifactStore {
    STORE.get_or_init(|| ArtifactStore::load(config))
}
