//! Browser-side checks of the exported lab. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use leonardo_branching::render::BranchInstance;
use leonardo_branching::LeonardoLab;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn lab_builds_default_tree() {
    let lab = LeonardoLab::new().unwrap();
    assert_eq!(lab.branch_count(), 127);
    assert_eq!(lab.instance_data().len(), 127 * BranchInstance::STRIDE);
    assert!(lab.total_volume() > 0.0);
}

#[wasm_bindgen_test]
fn unknown_species_is_a_js_error() {
    let mut lab = LeonardoLab::new().unwrap();
    let err = lab.select_species("Baobab").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("unknown species 'Baobab'"));
}

#[wasm_bindgen_test]
fn non_finite_slice_height_is_a_js_error() {
    let mut lab = LeonardoLab::new().unwrap();
    assert!(lab.set_slice_height(f32::NAN).is_err());
    assert!(lab.set_slice_height(2.0).is_ok());
    assert_eq!(lab.plane_data().len(), 3);
}

#[wasm_bindgen_test]
fn pinned_seed_repeats_silhouette() {
    let mut a = LeonardoLab::new().unwrap();
    let mut b = LeonardoLab::new().unwrap();
    a.pin_seed(99);
    b.pin_seed(99);
    assert_eq!(a.branches_json(), b.branches_json());
}

#[wasm_bindgen_test]
fn insight_failure_degrades_to_fallback() {
    let mut lab = LeonardoLab::new().unwrap();
    lab.set_exponent(2.2).unwrap();
    assert_eq!(lab.insight_tick(1000.0), None);
    let token = lab.insight_tick(500.0).unwrap();
    let text = lab.insight_complete(token, None, Some("network down".into()));
    assert!(text.unwrap().starts_with("The forest is quiet"));
}
