pub mod generator;

pub use generator::{Branch, BranchGenerator, Generation, GROUND_LEVEL};
