use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::species::TreeSpecies;

/// Maximum recursion depth accepted from callers
pub const MAX_DEPTH: u32 = 12;
/// Maximum branching angle in degrees
pub const MAX_BRANCHING_ANGLE: f32 = 90.0;
/// Upper bound of the Leonardo exponent
pub const MAX_EXPONENT: f32 = 4.0;
/// Upper bound for trunk girth and limb multiplier
pub const MAX_THICKNESS: f32 = 2.0;
/// Upper bound of the direction jitter magnitude
pub const MAX_RANDOMNESS: f32 = 1.0;

/// Smallest step used when clamping into an open interval
const OPEN_MARGIN: f32 = 0.01;

/// Parameters for one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeParams {
    /// Lateral branching angle in degrees (0 to 90)
    pub branching_angle: f32,
    /// Recursion depth; the trunk counts as one level
    pub depth: u32,
    /// Child length over parent length, in (0, 1)
    pub length_ratio: f32,
    /// Leonardo exponent n, in (1, 4]
    pub exponent: f32,
    /// Radius of the trunk
    pub trunk_thickness: f32,
    /// Multiplier applied to Leonardo's predicted child radius
    pub branch_thickness: f32,
    pub species: TreeSpecies,
    /// Magnitude of the symmetric angular jitter (radians)
    pub randomness: f32,
}

impl Default for TreeParams {
    /// The Coast Redwood preset
    fn default() -> Self {
        Self {
            branching_angle: 25.0,
            depth: 7,
            length_ratio: 0.88,
            exponent: 2.1,
            trunk_thickness: 0.45,
            branch_thickness: 1.0,
            species: TreeSpecies::CoastRedwood,
            randomness: 0.05,
        }
    }
}

/// Rejected parameter values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} = {value} is outside the valid range {range}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        range: &'static str,
    },
    #[error("depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },
}

impl TreeParams {
    /// Check every field against its documented range
    pub fn validate(&self) -> Result<(), ParamError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { field, value });
            }
        }

        check(
            "branchingAngle",
            self.branching_angle,
            (0.0..=MAX_BRANCHING_ANGLE).contains(&self.branching_angle),
            "[0, 90]",
        )?;
        if self.depth > MAX_DEPTH {
            return Err(ParamError::DepthTooLarge {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        check(
            "lengthRatio",
            self.length_ratio,
            self.length_ratio > 0.0 && self.length_ratio < 1.0,
            "(0, 1)",
        )?;
        check(
            "exponent",
            self.exponent,
            self.exponent > 1.0 && self.exponent <= MAX_EXPONENT,
            "(1, 4]",
        )?;
        check(
            "trunkThickness",
            self.trunk_thickness,
            self.trunk_thickness > 0.0 && self.trunk_thickness <= MAX_THICKNESS,
            "(0, 2]",
        )?;
        check(
            "branchThickness",
            self.branch_thickness,
            self.branch_thickness > 0.0 && self.branch_thickness <= MAX_THICKNESS,
            "(0, 2]",
        )?;
        check(
            "randomness",
            self.randomness,
            (0.0..=MAX_RANDOMNESS).contains(&self.randomness),
            "[0, 1]",
        )?;

        Ok(())
    }

    /// Pull every field into its valid range. Non-finite values fall back to
    /// the default preset's value.
    pub fn clamped(&self) -> Self {
        let fallback = Self::default();
        let pick = |v: f32, d: f32| if v.is_finite() { v } else { d };

        Self {
            branching_angle: pick(self.branching_angle, fallback.branching_angle)
                .clamp(0.0, MAX_BRANCHING_ANGLE),
            depth: self.depth.min(MAX_DEPTH),
            length_ratio: pick(self.length_ratio, fallback.length_ratio)
                .clamp(OPEN_MARGIN, 1.0 - OPEN_MARGIN),
            exponent: pick(self.exponent, fallback.exponent)
                .clamp(1.0 + OPEN_MARGIN, MAX_EXPONENT),
            trunk_thickness: pick(self.trunk_thickness, fallback.trunk_thickness)
                .clamp(OPEN_MARGIN, MAX_THICKNESS),
            branch_thickness: pick(self.branch_thickness, fallback.branch_thickness)
                .clamp(OPEN_MARGIN, MAX_THICKNESS),
            species: self.species,
            randomness: pick(self.randomness, fallback.randomness).clamp(0.0, MAX_RANDOMNESS),
        }
    }

    /// Cross-sectional area of the trunk
    pub fn trunk_area(&self) -> f32 {
        std::f32::consts::PI * self.trunk_thickness * self.trunk_thickness
    }

    fn float_fields(&self) -> [(&'static str, f32); 6] {
        [
            ("branchingAngle", self.branching_angle),
            ("lengthRatio", self.length_ratio),
            ("exponent", self.exponent),
            ("trunkThickness", self.trunk_thickness),
            ("branchThickness", self.branch_thickness),
            ("randomness", self.randomness),
        ]
    }
}

fn check(field: &'static str, value: f32, ok: bool, range: &'static str) -> Result<(), ParamError> {
    if ok {
        Ok(())
    } else {
        Err(ParamError::OutOfRange { field, value, range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TreeParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_exponent_at_one() {
        let params = TreeParams { exponent: 1.0, ..Default::default() };
        let err = params.validate().unwrap_err();
        assert!(matches!(err, ParamError::OutOfRange { field: "exponent", .. }));
        assert!(err.to_string().contains("(1, 4]"));
    }

    #[test]
    fn test_rejects_nan() {
        let params = TreeParams { length_ratio: f32::NAN, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite { field: "lengthRatio", .. })
        ));
    }

    #[test]
    fn test_rejects_deep_recursion() {
        let params = TreeParams { depth: 20, ..Default::default() };
        assert_eq!(
            params.validate(),
            Err(ParamError::DepthTooLarge { depth: 20, max: MAX_DEPTH })
        );
    }

    #[test]
    fn test_depth_zero_is_valid() {
        let params = TreeParams { depth: 0, ..Default::default() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_clamped_is_always_valid() {
        let wild = TreeParams {
            branching_angle: 400.0,
            depth: 99,
            length_ratio: 0.0,
            exponent: -3.0,
            trunk_thickness: f32::INFINITY,
            branch_thickness: 0.0,
            species: TreeSpecies::BayLaurel,
            randomness: f32::NAN,
        };
        let clamped = wild.clamped();
        assert!(clamped.validate().is_ok(), "{:?}", clamped);
        assert_eq!(clamped.depth, MAX_DEPTH);
        assert_eq!(clamped.trunk_thickness, TreeParams::default().trunk_thickness);
        assert_eq!(clamped.species, TreeSpecies::BayLaurel);
    }

    #[test]
    fn test_clamped_leaves_valid_params_alone() {
        let params = TreeParams::default();
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(TreeParams::default()).unwrap();
        assert_eq!(json["branchingAngle"], 25.0);
        assert_eq!(json["species"], "Coast Redwood");
    }
}
