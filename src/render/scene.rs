use crate::analysis::{spans_height, world_height};
use crate::data::ObservationMode;
use crate::growth::{Branch, Generation};
use crate::math::{Mat4, Vec3};
use super::color::Rgb;

/// Cylinder top radius relative to its base
pub const TOP_TAPER: f32 = 0.85;
/// Radius of the translucent measuring plane
pub const PLANE_RADIUS: f32 = 4.5;
/// Inner radius of the plane's rim
pub const PLANE_RIM_INNER: f32 = 4.45;

const BARK_HUE: f32 = 25.0;
const SLICED_COLOR: u32 = 0xef4444;
const SLICED_GLOW: u32 = 0xf87171;
const MAIN_PATH_GLOW: u32 = 0xfbbf24;
const SLICED_GLOW_INTENSITY: f32 = 0.4;
const MAIN_PATH_GLOW_INTENSITY: f32 = 0.6;
const DIMMED_OPACITY: f32 = 0.08;

/// Draw parameters for one branch cylinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchInstance {
    /// Places a unit cylinder (Y-up, height 1, centered at origin) on the branch
    pub transform: Mat4,
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub sliced: bool,
}

impl BranchInstance {
    /// Layout: transform(16) + radii(2) + color(3) + opacity(1) + emissive(3) + intensity(1) + sliced(1)
    pub const STRIDE: usize = 27;

    pub fn to_array(&self) -> [f32; Self::STRIDE] {
        let mut out = [0.0f32; Self::STRIDE];
        out[..16].copy_from_slice(self.transform.as_slice());
        out[16] = self.radius_top;
        out[17] = self.radius_bottom;
        out[18..21].copy_from_slice(&self.color.to_array());
        out[21] = self.opacity;
        out[22..25].copy_from_slice(&self.emissive.to_array());
        out[25] = self.emissive_intensity;
        out[26] = if self.sliced { 1.0 } else { 0.0 };
        out
    }
}

/// Cross-section disc where a branch meets the measuring plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceDisc {
    pub center: Vec3,
    pub radius: f32,
}

/// Translucent disc marking the measuring height, with a thin rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuringPlane {
    /// World y
    pub height: f32,
    pub radius: f32,
    pub rim_inner: f32,
}

impl MeasuringPlane {
    pub fn at(height: f32) -> Self {
        Self {
            height,
            radius: PLANE_RADIUS,
            rim_inner: PLANE_RIM_INNER,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.height, self.radius, self.rim_inner]
    }
}

/// Everything the host needs to draw one frame of the tree
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub instances: Vec<BranchInstance>,
    pub discs: Vec<SliceDisc>,
    /// Only shown in pipe-model mode
    pub plane: Option<MeasuringPlane>,
}

impl Scene {
    /// Flattened instance buffer, `BranchInstance::STRIDE` floats per branch
    pub fn instance_data(&self) -> Vec<f32> {
        self.instances.iter().flat_map(|i| i.to_array()).collect()
    }

    /// Flattened disc buffer: x, y, z, radius
    pub fn disc_data(&self) -> Vec<f32> {
        self.discs
            .iter()
            .flat_map(|d| [d.center.x, d.center.y, d.center.z, d.radius])
            .collect()
    }

    pub fn sliced_count(&self) -> usize {
        self.instances.iter().filter(|i| i.sliced).count()
    }
}

/// Maps a generation to draw instances for the current view
#[derive(Debug, Clone, Copy)]
pub struct SceneBuilder {
    pub mode: ObservationMode,
    /// Measuring height above the trunk base
    pub slice_height: f32,
}

impl SceneBuilder {
    pub fn new(mode: ObservationMode, slice_height: f32) -> Self {
        Self { mode, slice_height }
    }

    pub fn build(&self, generation: &Generation) -> Scene {
        let world_y = world_height(self.slice_height);
        let pipe_model = self.mode == ObservationMode::PipeModel;

        let mut scene = Scene {
            instances: Vec::with_capacity(generation.len()),
            discs: Vec::new(),
            plane: pipe_model.then(|| MeasuringPlane::at(world_y)),
        };

        for branch in &generation.branches {
            let sliced = pipe_model && spans_height(branch, world_y);
            scene.instances.push(self.instance(branch, sliced));

            if sliced {
                let mid = branch.midpoint();
                scene.discs.push(SliceDisc {
                    center: Vec3::new(mid.x, world_y, mid.z),
                    radius: branch.radius,
                });
            }
        }

        scene
    }

    fn instance(&self, branch: &Branch, sliced: bool) -> BranchInstance {
        let taper_view = self.mode == ObservationMode::ConicalTaper;
        let highlighted = taper_view && branch.is_main_path;
        let dimmed = taper_view && !branch.is_main_path;

        let color = if sliced {
            Rgb::from_hex(SLICED_COLOR)
        } else {
            bark_color(branch.depth)
        };

        let (emissive, emissive_intensity) = if highlighted {
            (Rgb::from_hex(MAIN_PATH_GLOW), MAIN_PATH_GLOW_INTENSITY)
        } else if sliced {
            (Rgb::from_hex(SLICED_GLOW), SLICED_GLOW_INTENSITY)
        } else {
            (Rgb::BLACK, 0.0)
        };

        BranchInstance {
            transform: branch_transform(branch),
            radius_top: branch.radius * TOP_TAPER,
            radius_bottom: branch.radius,
            color,
            opacity: if dimmed { DIMMED_OPACITY } else { 1.0 },
            emissive,
            emissive_intensity,
            sliced,
        }
    }
}

/// Bark darkens toward the tips: hsl(25, s, s) with s = 15 + 5·depth percent
pub fn bark_color(depth: u32) -> Rgb {
    let s = (15.0 + depth as f32 * 5.0) / 100.0;
    Rgb::from_hsl(BARK_HUE, s, s)
}

/// Translate to the midpoint, turn +Y onto the branch, stretch to its length
pub fn branch_transform(branch: &Branch) -> Mat4 {
    let axis = branch.end - branch.start;
    let length = axis.length();

    let rotation = if length > f32::EPSILON {
        Mat4::rotation_arc(Vec3::UP, axis.scale(1.0 / length))
    } else {
        Mat4::identity()
    };

    Mat4::translation(branch.midpoint())
        .mul(&rotation)
        .mul(&Mat4::scale(1.0, length, 1.0))
}
