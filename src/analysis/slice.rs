use serde::Serialize;

use crate::growth::{Branch, GROUND_LEVEL};

/// Cross-section statistics at one measuring height
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceStats {
    /// π·r² of the trunk, independent of height
    pub trunk_area: f32,
    /// Σ π·r² over branches crossing the plane
    pub current_sum: f32,
    pub branch_count: usize,
    /// Individual areas, in branch order
    pub branch_areas: Vec<f32>,
    /// Height offset above the trunk base that was queried
    pub height: f32,
}

impl SliceStats {
    /// Branch sum over trunk area; 1.0 means Leonardo's rule holds exactly
    pub fn conservation_ratio(&self) -> f32 {
        if self.trunk_area > 0.0 {
            self.current_sum / self.trunk_area
        } else {
            0.0
        }
    }
}

/// World-space height of a measuring plane at `offset` above the trunk base
pub fn world_height(offset: f32) -> f32 {
    GROUND_LEVEL + offset
}

/// Inclusive at both endpoints
pub fn spans_height(branch: &Branch, world_y: f32) -> bool {
    let (lo, hi) = branch.vertical_span();
    world_y >= lo && world_y <= hi
}

/// Aggregate the cross-sections of every branch crossing the plane at
/// `height_offset` above the trunk base. One linear pass.
pub fn analyze(branches: &[Branch], trunk_area: f32, height_offset: f32) -> SliceStats {
    let world_y = world_height(height_offset);

    let branch_areas: Vec<f32> = branches
        .iter()
        .filter(|b| spans_height(b, world_y))
        .map(Branch::cross_section)
        .collect();

    SliceStats {
        trunk_area,
        current_sum: branch_areas.iter().sum(),
        branch_count: branch_areas.len(),
        branch_areas,
        height: height_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{TreeParams, TreeSpecies};
    use crate::growth::BranchGenerator;
    use crate::math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn branch(y0: f32, y1: f32, radius: f32) -> Branch {
        Branch {
            start: Vec3::new(0.0, y0, 0.0),
            end: Vec3::new(0.0, y1, 0.0),
            radius,
            depth: 1,
            volume: 0.0,
            is_main_path: false,
        }
    }

    fn sample_tree() -> crate::growth::Generation {
        let params = TreeParams { depth: 6, species: TreeSpecies::DouglasFir, ..Default::default() };
        BranchGenerator::new(params).generate(&mut StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_base_includes_trunk() {
        let tree = sample_tree();
        let stats = analyze(&tree.branches, tree.trunk_area, 0.0);
        assert!(stats.branch_count >= 1);
        assert_eq!(stats.branch_areas[0], tree.branches[0].cross_section());
        assert!(stats.current_sum >= stats.trunk_area - 1e-6);
    }

    #[test]
    fn test_outside_extent_is_empty() {
        let tree = sample_tree();
        let (_, top) = tree.vertical_extent().unwrap();

        for offset in [-20.0, top - GROUND_LEVEL + 0.5, 1000.0] {
            let stats = analyze(&tree.branches, tree.trunk_area, offset);
            assert_eq!(stats.branch_count, 0);
            assert_eq!(stats.current_sum, 0.0);
            assert!(stats.branch_areas.is_empty());
            assert_eq!(stats.trunk_area, tree.trunk_area);
            assert_eq!(stats.height, offset);
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let branches = vec![branch(-2.5, -1.0, 0.2), branch(-1.0, 0.5, 0.1)];
        // Plane at -1.0 touches the top of one and the bottom of the other
        let stats = analyze(&branches, 1.0, 1.5);
        assert_eq!(stats.branch_count, 2);
        assert!((stats.current_sum - PI * (0.04 + 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_descending_branch_counts() {
        let branches = vec![branch(0.0, -2.0, 0.1)];
        let stats = analyze(&branches, 1.0, 1.5);
        assert_eq!(stats.branch_count, 1);
    }

    #[test]
    fn test_areas_follow_branch_order() {
        let branches = vec![branch(-3.0, 3.0, 0.1), branch(-3.0, 3.0, 0.3), branch(5.0, 6.0, 0.2)];
        let stats = analyze(&branches, 1.0, 2.5);
        assert_eq!(stats.branch_areas, vec![PI * 0.1 * 0.1, PI * 0.3 * 0.3]);
    }

    #[test]
    fn test_empty_tree() {
        let stats = analyze(&[], 0.5, 1.0);
        assert_eq!(stats.branch_count, 0);
        assert_eq!(stats.trunk_area, 0.5);
        assert_eq!(stats.conservation_ratio(), 0.0);
    }

    #[test]
    fn test_conservation_ratio() {
        let stats = SliceStats { trunk_area: 2.0, current_sum: 1.5, ..Default::default() };
        assert!((stats.conservation_ratio() - 0.75).abs() < 1e-6);
        assert_eq!(SliceStats::default().conservation_ratio(), 0.0);
    }

    #[test]
    fn test_leonardo_exponent_two_conserves_area_above_fork() {
        // With n = 2, no jitter and a unit limb multiplier, the two children
        // together carry the trunk's area just above the first fork
        let params = TreeParams {
            depth: 2,
            exponent: 2.0,
            branch_thickness: 1.0,
            randomness: 0.0,
            species: TreeSpecies::BayLaurel,
            ..Default::default()
        };
        let tree = BranchGenerator::new(params).generate(&mut StdRng::seed_from_u64(1));
        let stats = analyze(&tree.branches, tree.trunk_area, 1.9);
        assert_eq!(stats.branch_count, 2);
        assert!((stats.conservation_ratio() - 1.0).abs() < 1e-4);
    }
}
