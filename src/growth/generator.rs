use std::f32::consts::{PI, TAU};

use rand::Rng;
use serde::Serialize;

use crate::data::params::MAX_DEPTH;
use crate::data::{ParamError, TreeParams};
use crate::math::Vec3;

/// Height of the trunk base in world space
pub const GROUND_LEVEL: f32 = -2.5;
/// Where the trunk is planted
pub const TRUNK_BASE: Vec3 = Vec3::new(0.0, GROUND_LEVEL, 0.0);
/// Length of the trunk segment
pub const TRUNK_LENGTH: f32 = 1.8;
/// A child is never thicker than this fraction of its parent
pub const TAPER_CAP: f32 = 0.95;
/// Fraction of the branching angle the leader deviates by
pub const LEADER_ANGLE_FRACTION: f32 = 0.2;
/// Lateral angle multiplier for conic species
pub const CONIC_LATERAL_ANGLE_SCALE: f32 = 1.5;
/// Lateral length multiplier for conic species
pub const CONIC_LATERAL_LENGTH_SCALE: f32 = 0.7;

/// One cylindrical branch segment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    /// Remaining recursion depth when this segment was created
    pub depth: u32,
    /// π·r²·length
    pub volume: f32,
    /// On the unbroken leader chain from the trunk
    pub is_main_path: bool,
}

impl Branch {
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Cross-sectional area π·r²
    pub fn cross_section(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// Lowest and highest endpoint heights
    pub fn vertical_span(&self) -> (f32, f32) {
        (self.start.y.min(self.end.y), self.start.y.max(self.end.y))
    }

    pub fn midpoint(&self) -> Vec3 {
        self.start.lerp(&self.end, 0.5)
    }
}

/// Output of one generation pass
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    /// Depth-first order: trunk, then each leader subtree before its lateral
    pub branches: Vec<Branch>,
    pub total_volume: f32,
    pub trunk_area: f32,
}

impl Generation {
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Branches on the leader chain
    pub fn main_path(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.is_main_path)
    }

    /// Lowest and highest point reached by any branch
    pub fn vertical_extent(&self) -> Option<(f32, f32)> {
        self.branches.iter().map(Branch::vertical_span).reduce(|(lo, hi), (l, h)| {
            (lo.min(l), hi.max(h))
        })
    }
}

/// Growth state handed down the recursion
#[derive(Debug, Clone, Copy)]
struct Bud {
    start: Vec3,
    direction: Vec3,
    radius: f32,
    length: f32,
    depth: u32,
    is_main_path: bool,
}

/// Recursive Leonardo-rule branch generator
pub struct BranchGenerator {
    pub params: TreeParams,
}

impl BranchGenerator {
    pub fn new(params: TreeParams) -> Self {
        Self { params }
    }

    /// Grow the tree. The random source drives the azimuthal twist and jitter
    /// of every fork; a seeded source makes the output reproducible.
    ///
    /// Parameters are not range-checked here, see [`Self::generate_checked`].
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Generation {
        let mut generation = Generation {
            branches: Vec::with_capacity(expected_count(self.params.depth.min(MAX_DEPTH))),
            total_volume: 0.0,
            trunk_area: self.params.trunk_area(),
        };

        let trunk = Bud {
            start: TRUNK_BASE,
            direction: Vec3::UP,
            radius: self.params.trunk_thickness,
            length: TRUNK_LENGTH,
            depth: self.params.depth,
            is_main_path: true,
        };
        self.grow(trunk, rng, &mut generation);

        log::debug!(
            "grew {} branches for {} (depth {}), volume {:.4}",
            generation.branches.len(),
            self.params.species.display_name(),
            self.params.depth,
            generation.total_volume
        );

        generation
    }

    /// Validate parameters, then grow
    pub fn generate_checked<R: Rng>(&self, rng: &mut R) -> Result<Generation, ParamError> {
        self.params.validate()?;
        Ok(self.generate(rng))
    }

    fn grow<R: Rng>(&self, bud: Bud, rng: &mut R, out: &mut Generation) {
        if bud.depth == 0 {
            return;
        }

        let params = &self.params;
        let end = bud.start + bud.direction.scale(bud.length);
        let volume = PI * bud.radius * bud.radius * bud.length;

        out.total_volume += volume;
        out.branches.push(Branch {
            start: bud.start,
            end,
            radius: bud.radius,
            depth: bud.depth,
            volume,
            is_main_path: bud.is_main_path,
        });

        let child_radius = self.child_radius(bud.radius);
        let conic = params.species.is_conic();

        // Leader: small deviation, keeps the main-path flag
        let leader_angle = (params.branching_angle * LEADER_ANGLE_FRACTION).to_radians()
            + self.jitter(rng);
        let leader_axis = Vec3::horizontal_axis(rng.random::<f32>() * TAU);
        self.grow(
            Bud {
                start: end,
                direction: bud.direction.rotate_around_axis(leader_axis, leader_angle).normalize(),
                radius: child_radius,
                length: bud.length * params.length_ratio,
                depth: bud.depth - 1,
                is_main_path: bud.is_main_path,
            },
            rng,
            out,
        );

        // Lateral: wider, opposite sense, shorter on conic species
        let angle_scale = if conic { CONIC_LATERAL_ANGLE_SCALE } else { 1.0 };
        let length_scale = if conic { CONIC_LATERAL_LENGTH_SCALE } else { 1.0 };
        let lateral_angle = (params.branching_angle * angle_scale).to_radians() + self.jitter(rng);
        let lateral_axis = Vec3::horizontal_axis(rng.random::<f32>() * TAU);
        self.grow(
            Bud {
                start: end,
                direction: bud.direction.rotate_around_axis(lateral_axis, -lateral_angle).normalize(),
                radius: child_radius,
                length: bud.length * params.length_ratio * length_scale,
                depth: bud.depth - 1,
                is_main_path: false,
            },
            rng,
            out,
        );
    }

    /// Leonardo's rule with the limb multiplier, capped at the taper limit.
    /// `f32::min` drops a NaN operand, so a degenerate exponent lands on the cap.
    pub fn child_radius(&self, parent_radius: f32) -> f32 {
        let leonardo = parent_radius / 2f32.powf(1.0 / self.params.exponent);
        let scaled = leonardo * self.params.branch_thickness;
        scaled.min(parent_radius * TAPER_CAP)
    }

    fn jitter<R: Rng>(&self, rng: &mut R) -> f32 {
        (rng.random::<f32>() - 0.5) * self.params.randomness
    }
}

/// Number of segments a depth-`d` tree produces: 2^d − 1
pub fn expected_count(depth: u32) -> usize {
    1usize
        .checked_shl(depth)
        .map(|n| n - 1)
        .unwrap_or(usize::MAX)
}
