use thiserror::Error;

use crate::data::{ParamError, PresetError};

/// Errors surfaced by [`crate::LeonardoLab`]
#[derive(Debug, Error)]
pub enum LabError {
    #[error(transparent)]
    Params(#[from] ParamError),
    #[error(transparent)]
    Presets(#[from] PresetError),
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown observation mode '{0}'")]
    UnknownMode(String),
}
