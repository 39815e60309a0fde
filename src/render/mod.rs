//! Draw-instance output for the host's 3D view
//!
//! The host owns the GPU, camera and scene chrome. This module only decides
//! where each branch cylinder goes and how it is coloured for the current
//! observation mode.

pub mod color;
pub mod scene;

pub use color::Rgb;
pub use scene::{BranchInstance, MeasuringPlane, Scene, SceneBuilder, SliceDisc};
