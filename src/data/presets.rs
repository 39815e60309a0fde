use std::collections::HashMap;
use serde::Deserialize;
use thiserror::Error;

use super::params::{ParamError, TreeParams};
use super::species::TreeSpecies;

const BUILTIN_PRESETS: &str = include_str!("presets.yaml");

/// YAML input format for a preset document
#[derive(Debug, Deserialize)]
struct PresetInput {
    presets: Vec<Preset>,
}

/// Default parameters and blurb for one species
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preset {
    pub params: TreeParams,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("no preset defined for species '{}'", .0.display_name())]
    MissingSpecies(TreeSpecies),
    #[error("preset for '{}' is invalid: {source}", .species.display_name())]
    Invalid {
        species: TreeSpecies,
        #[source]
        source: ParamError,
    },
}

/// Parsed and indexed species presets
#[derive(Debug, Clone)]
pub struct Presets {
    by_species: HashMap<TreeSpecies, Preset>,
}

impl Presets {
    /// Presets compiled into the crate
    pub fn builtin() -> Result<Self, PresetError> {
        Self::from_yaml(BUILTIN_PRESETS)
    }

    /// Parse from a YAML string. Every species must be present and every
    /// parameter set must validate.
    pub fn from_yaml(yaml: &str) -> Result<Self, PresetError> {
        let input: PresetInput = serde_yaml::from_str(yaml)?;

        let mut by_species = HashMap::new();
        for preset in input.presets {
            preset.params.validate().map_err(|source| PresetError::Invalid {
                species: preset.params.species,
                source,
            })?;
            by_species.insert(preset.params.species, preset);
        }

        if let Some(missing) = TreeSpecies::ALL.into_iter().find(|s| !by_species.contains_key(s)) {
            return Err(PresetError::MissingSpecies(missing));
        }

        log::debug!("loaded {} species presets", by_species.len());
        Ok(Self { by_species })
    }

    /// Preset for a species. Construction guarantees every species is present.
    pub fn get(&self, species: TreeSpecies) -> Option<&Preset> {
        self.by_species.get(&species)
    }

    /// Default parameters for a species, falling back to the crate default
    pub fn params_for(&self, species: TreeSpecies) -> TreeParams {
        self.get(species)
            .map(|p| p.params)
            .unwrap_or_else(|| TreeParams { species, ..TreeParams::default() })
    }

    pub fn description(&self, species: TreeSpecies) -> &str {
        self.get(species).map(|p| p.description.as_str()).unwrap_or_default()
    }
}
