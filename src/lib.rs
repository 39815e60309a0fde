use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

pub mod analysis;
pub mod data;
pub mod display;
pub mod error;
pub mod growth;
pub mod insight;
pub mod logging;
pub mod math;
pub mod render;

use analysis::SliceStats;
use data::{ObservationMode, ParamError, Presets, TreeParams, TreeSpecies};
use display::{
    Readout, SliderSpec, DEFAULT_SLICE_HEIGHT, EXPONENT_SLIDER, LIMB_SCALE_SLIDER, SLIDERS,
    TRUNK_GIRTH_SLIDER,
};
use error::LabError;
use growth::{BranchGenerator, Generation};
use insight::{InsightError, InsightRequests};
use render::{Scene, SceneBuilder};

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

/// Main lab state exposed to JavaScript.
///
/// Holds the current parameters and the latest generation. Every setter
/// reruns the affected stages (generate → analyze → build scene) from scratch.
#[wasm_bindgen]
pub struct LeonardoLab {
    presets: Presets,
    params: TreeParams,
    mode: ObservationMode,
    slice_height: f32,
    /// Fixed seed for reproducible silhouettes; clock-seeded when unset
    seed: Option<u64>,
    generation: Generation,
    stats: SliceStats,
    scene: Scene,
    insights: InsightRequests,
    /// Host time in ms, advanced by [`LeonardoLab::insight_tick`]
    clock_ms: f64,
}

#[wasm_bindgen]
impl LeonardoLab {
    /// Create a lab showing the Coast Redwood preset
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LeonardoLab, JsValue> {
        Self::create(None).map_err(to_js)
    }

    /// Replace all parameters from a JSON object (camelCase field names)
    #[wasm_bindgen]
    pub fn set_params_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.apply_params_json(json).map_err(to_js)
    }

    /// Load the preset for a species by display name
    #[wasm_bindgen]
    pub fn select_species(&mut self, name: &str) -> Result<(), JsValue> {
        self.apply_species(name).map_err(to_js)
    }

    /// Switch between "Pipe Model (System)" and "Conical Taper (Individual)"
    #[wasm_bindgen]
    pub fn set_mode(&mut self, name: &str) -> Result<(), JsValue> {
        self.apply_mode(name).map_err(to_js)
    }

    /// Slider input; finite values are clamped to the slider range
    #[wasm_bindgen]
    pub fn set_exponent(&mut self, exponent: f32) -> Result<(), JsValue> {
        self.apply_exponent(exponent).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_trunk_thickness(&mut self, trunk_thickness: f32) -> Result<(), JsValue> {
        self.apply_trunk_thickness(trunk_thickness).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn set_branch_thickness(&mut self, branch_thickness: f32) -> Result<(), JsValue> {
        self.apply_branch_thickness(branch_thickness).map_err(to_js)
    }

    /// Move the measuring plane. Geometry is untouched.
    #[wasm_bindgen]
    pub fn set_slice_height(&mut self, height: f32) -> Result<(), JsValue> {
        self.apply_slice_height(height).map_err(to_js)
    }

    /// Regrow with a fresh random silhouette (or the pinned seed)
    #[wasm_bindgen]
    pub fn regenerate(&mut self) {
        self.regrow();
    }

    /// Pin the random seed so every regrowth is identical
    #[wasm_bindgen]
    pub fn pin_seed(&mut self, seed: u32) {
        self.seed = Some(seed as u64);
        self.regrow();
    }

    /// Return to clock-seeded growth
    #[wasm_bindgen]
    pub fn unpin_seed(&mut self) {
        self.seed = None;
    }

    // === Geometry output ===

    #[wasm_bindgen]
    pub fn branch_count(&self) -> usize {
        self.generation.len()
    }

    #[wasm_bindgen]
    pub fn total_volume(&self) -> f32 {
        self.generation.total_volume
    }

    /// Per-branch draw instances, `BranchInstance::STRIDE` floats each
    #[wasm_bindgen]
    pub fn instance_data(&self) -> Vec<f32> {
        self.scene.instance_data()
    }

    /// Slice discs as x, y, z, radius
    #[wasm_bindgen]
    pub fn disc_data(&self) -> Vec<f32> {
        self.scene.disc_data()
    }

    /// World height of the measuring plane, when the current mode shows it
    #[wasm_bindgen]
    pub fn plane_height(&self) -> Option<f32> {
        self.scene.plane.map(|p| p.height)
    }

    /// Measuring plane as height, radius, rim inner radius; empty when hidden
    #[wasm_bindgen]
    pub fn plane_data(&self) -> Vec<f32> {
        self.scene.plane.map(|p| p.to_array().to_vec()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn branches_json(&self) -> String {
        to_json(&self.generation.branches)
    }

    // === Readouts ===

    #[wasm_bindgen]
    pub fn params_json(&self) -> String {
        to_json(&self.params)
    }

    #[wasm_bindgen]
    pub fn stats_json(&self) -> String {
        to_json(&self.stats)
    }

    #[wasm_bindgen]
    pub fn readout_json(&self) -> String {
        to_json(&Readout::from_stats(&self.stats))
    }

    #[wasm_bindgen]
    pub fn sliders_json(&self) -> String {
        to_json(&SLIDERS)
    }

    #[wasm_bindgen]
    pub fn species_names(&self) -> Vec<String> {
        TreeSpecies::ALL.iter().map(|s| s.display_name().to_string()).collect()
    }

    #[wasm_bindgen]
    pub fn species_description(&self) -> String {
        self.presets.description(self.params.species).to_string()
    }

    // === Narrative insight ===

    #[wasm_bindgen]
    pub fn insight_prompt(&self) -> String {
        insight::build_prompt(&self.params)
    }

    /// Advance the lab clock by the host's frame delta. Returns the token of a
    /// request the host should send now, once the quiet period has elapsed.
    #[wasm_bindgen]
    pub fn insight_tick(&mut self, dt_ms: f64) -> Option<u32> {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.clock_ms += dt_ms;
        }
        self.insights.due(self.clock_ms)
    }

    /// Hand back the outcome of a request. Pass `error` when the call failed.
    /// Returns the text to show, or nothing when the request was superseded.
    #[wasm_bindgen]
    pub fn insight_complete(&self, token: u32, text: Option<String>, error: Option<String>) -> Option<String> {
        let outcome = match error {
            Some(message) => Err(InsightError::Request(message)),
            None => Ok(text.unwrap_or_default()),
        };
        self.insights.complete(token, outcome)
    }

    #[wasm_bindgen]
    pub fn cancel_insight(&mut self) {
        self.insights.cancel();
    }
}

impl LeonardoLab {
    /// Build a lab with the default preset, optionally seeded
    pub fn create(seed: Option<u64>) -> Result<Self, LabError> {
        let presets = Presets::builtin()?;
        let params = presets.params_for(TreeSpecies::default());

        let mut lab = Self {
            presets,
            params,
            mode: ObservationMode::default(),
            slice_height: DEFAULT_SLICE_HEIGHT,
            seed,
            generation: Generation::default(),
            stats: SliceStats::default(),
            scene: Scene::default(),
            insights: InsightRequests::default(),
            clock_ms: 0.0,
        };
        lab.regrow();
        Ok(lab)
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    pub fn mode(&self) -> ObservationMode {
        self.mode
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    pub fn stats(&self) -> &SliceStats {
        &self.stats
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Validate and adopt new parameters, then regrow
    pub fn apply_params(&mut self, params: TreeParams) -> Result<(), LabError> {
        params.validate()?;
        self.params = params;
        self.insights.changed(self.clock_ms);
        self.regrow();
        Ok(())
    }

    pub fn apply_exponent(&mut self, exponent: f32) -> Result<(), LabError> {
        let exponent = slider_value(&EXPONENT_SLIDER, "exponent", exponent)?;
        self.apply_params(TreeParams { exponent, ..self.params })
    }

    pub fn apply_trunk_thickness(&mut self, trunk_thickness: f32) -> Result<(), LabError> {
        let trunk_thickness = slider_value(&TRUNK_GIRTH_SLIDER, "trunkThickness", trunk_thickness)?;
        self.apply_params(TreeParams { trunk_thickness, ..self.params })
    }

    pub fn apply_branch_thickness(&mut self, branch_thickness: f32) -> Result<(), LabError> {
        let branch_thickness =
            slider_value(&LIMB_SCALE_SLIDER, "branchThickness", branch_thickness)?;
        self.apply_params(TreeParams { branch_thickness, ..self.params })
    }

    /// Heights outside the tree are allowed and slice nothing
    pub fn apply_slice_height(&mut self, height: f32) -> Result<(), LabError> {
        if !height.is_finite() {
            return Err(ParamError::NonFinite { field: "sliceHeight", value: height }.into());
        }
        self.slice_height = height;
        self.refresh_stats();
        Ok(())
    }

    pub fn apply_params_json(&mut self, json: &str) -> Result<(), LabError> {
        let params: TreeParams = serde_json::from_str(json)?;
        self.apply_params(params)
    }

    pub fn apply_species(&mut self, name: &str) -> Result<(), LabError> {
        let species = TreeSpecies::from_name(name)
            .ok_or_else(|| LabError::UnknownSpecies(name.to_string()))?;
        self.apply_params(self.presets.params_for(species))
    }

    pub fn apply_mode(&mut self, name: &str) -> Result<(), LabError> {
        self.mode = ObservationMode::from_name(name)
            .ok_or_else(|| LabError::UnknownMode(name.to_string()))?;
        self.rebuild_scene();
        Ok(())
    }

    fn regrow(&mut self) {
        let seed = self.seed.unwrap_or_else(clock_seed);
        let mut rng = StdRng::seed_from_u64(seed);
        self.generation = BranchGenerator::new(self.params).generate(&mut rng);
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        self.stats = analysis::analyze(
            &self.generation.branches,
            self.generation.trunk_area,
            self.slice_height,
        );
        self.rebuild_scene();
    }

    fn rebuild_scene(&mut self) {
        self.scene = SceneBuilder::new(self.mode, self.slice_height).build(&self.generation);
    }
}

fn to_js(e: LabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Reject NaN/∞ slider input, clamp the rest into the slider's range
fn slider_value(slider: &SliderSpec, field: &'static str, value: f32) -> Result<f32, LabError> {
    if !value.is_finite() {
        return Err(ParamError::NonFinite { field, value }.into());
    }
    Ok(slider.clamp(value))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("failed to serialize output: {}", e);
        String::from("null")
    })
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

/// Wall-clock seed for unpinned growth
fn clock_seed() -> u64 {
    now_ms().to_bits()
}
