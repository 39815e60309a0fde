use serde::{Deserialize, Serialize};

/// Reference species offered in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TreeSpecies {
    #[default]
    #[serde(rename = "Coast Redwood")]
    CoastRedwood,
    #[serde(rename = "Douglas Fir")]
    DouglasFir,
    #[serde(rename = "California Bay Laurel")]
    BayLaurel,
    #[serde(rename = "Ponderosa Pine")]
    PonderosaPine,
}

impl TreeSpecies {
    pub const ALL: [TreeSpecies; 4] = [
        TreeSpecies::CoastRedwood,
        TreeSpecies::DouglasFir,
        TreeSpecies::BayLaurel,
        TreeSpecies::PonderosaPine,
    ];

    /// Conic species grow steeper, shorter laterals (pyramidal canopy)
    pub fn is_conic(&self) -> bool {
        matches!(
            self,
            TreeSpecies::CoastRedwood | TreeSpecies::DouglasFir | TreeSpecies::PonderosaPine
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TreeSpecies::CoastRedwood => "Coast Redwood",
            TreeSpecies::DouglasFir => "Douglas Fir",
            TreeSpecies::BayLaurel => "California Bay Laurel",
            TreeSpecies::PonderosaPine => "Ponderosa Pine",
        }
    }

    /// Look up a species by its display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.display_name() == name)
    }
}

/// What the 3D view emphasizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObservationMode {
    /// Cross-sections at the measuring plane (system view)
    #[default]
    #[serde(rename = "Pipe Model (System)")]
    PipeModel,
    /// Highlight the leader chain (individual view)
    #[serde(rename = "Conical Taper (Individual)")]
    ConicalTaper,
}

impl ObservationMode {
    pub const ALL: [ObservationMode; 2] = [ObservationMode::PipeModel, ObservationMode::ConicalTaper];

    pub fn display_name(&self) -> &'static str {
        match self {
            ObservationMode::PipeModel => "Pipe Model (System)",
            ObservationMode::ConicalTaper => "Conical Taper (Individual)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.display_name() == name)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            ObservationMode::PipeModel => "View cross-sections",
            ObservationMode::ConicalTaper => "View main path",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conic_subset() {
        assert!(TreeSpecies::CoastRedwood.is_conic());
        assert!(TreeSpecies::DouglasFir.is_conic());
        assert!(TreeSpecies::PonderosaPine.is_conic());
        assert!(!TreeSpecies::BayLaurel.is_conic());
    }

    #[test]
    fn test_name_round_trip() {
        for species in TreeSpecies::ALL {
            assert_eq!(TreeSpecies::from_name(species.display_name()), Some(species));
        }
        assert_eq!(TreeSpecies::from_name("Baobab"), None);

        for mode in ObservationMode::ALL {
            assert_eq!(ObservationMode::from_name(mode.display_name()), Some(mode));
        }
        assert_eq!(ObservationMode::ConicalTaper.button_label(), "View main path");
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&TreeSpecies::BayLaurel).unwrap();
        assert_eq!(json, "\"California Bay Laurel\"");

        let mode: ObservationMode = serde_json::from_str("\"Conical Taper (Individual)\"").unwrap();
        assert_eq!(mode, ObservationMode::ConicalTaper);
    }
}
