pub mod params;
pub mod presets;
pub mod species;

pub use params::{ParamError, TreeParams};
pub use presets::{Preset, PresetError, Presets};
pub use species::{ObservationMode, TreeSpecies};
