use serde::Serialize;

use crate::analysis::SliceStats;

/// Scales raw areas for the readout. Display only; never fed back into geometry.
pub const AREA_CONVERSION_FACTOR: f32 = 10.7639;
/// Height used as 100% on the measuring-height gauge
pub const FULL_HEIGHT: f32 = 6.8;
/// At most this many node dots are drawn next to the branch sum
pub const MAX_NODE_DOTS: usize = 12;
/// Measuring height shown when the lab opens
pub const DEFAULT_SLICE_HEIGHT: f32 = 3.5;

/// Range and formatting of one sidebar slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub unit: &'static str,
}

pub const SLICE_HEIGHT_SLIDER: SliderSpec = SliderSpec {
    label: "Measuring Height",
    min: 0.1,
    max: 6.5,
    step: 0.1,
    unit: "ft",
};

pub const EXPONENT_SLIDER: SliderSpec = SliderSpec {
    label: "Leonardo Exponent (n)",
    min: 1.5,
    max: 2.5,
    step: 0.01,
    unit: "",
};

pub const TRUNK_GIRTH_SLIDER: SliderSpec = SliderSpec {
    label: "Trunk Girth",
    min: 0.1,
    max: 0.6,
    step: 0.01,
    unit: "",
};

pub const LIMB_SCALE_SLIDER: SliderSpec = SliderSpec {
    label: "Limb Scale",
    min: 0.8,
    max: 1.2,
    step: 0.01,
    unit: "",
};

pub const SLIDERS: [SliderSpec; 4] = [
    SLICE_HEIGHT_SLIDER,
    EXPONENT_SLIDER,
    TRUNK_GIRTH_SLIDER,
    LIMB_SCALE_SLIDER,
];

impl SliderSpec {
    /// Whole numbers for integer steps, two decimals otherwise
    pub fn format(&self, value: f32) -> String {
        if self.step >= 1.0 {
            format!("{:.0}{}", value, self.unit)
        } else {
            format!("{:.2}{}", value, self.unit)
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// Formatted numbers for the area-conservation card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readout {
    pub trunk_area: String,
    pub branch_sum: String,
    pub branch_count: usize,
    pub node_dots: usize,
    pub height_percent: String,
}

impl Readout {
    pub fn from_stats(stats: &SliceStats) -> Self {
        Self {
            trunk_area: format_area(stats.trunk_area),
            branch_sum: format_area(stats.current_sum),
            branch_count: stats.branch_count,
            node_dots: stats.branch_count.min(MAX_NODE_DOTS),
            height_percent: height_percent(stats.height),
        }
    }
}

/// Area in display units, two decimals
pub fn format_area(area: f32) -> String {
    format!("{:.2}", area * AREA_CONVERSION_FACTOR)
}

/// Measuring height as a whole percentage of [`FULL_HEIGHT`]
pub fn height_percent(height: f32) -> String {
    format!("{:.0}", height / FULL_HEIGHT * 100.0)
}
