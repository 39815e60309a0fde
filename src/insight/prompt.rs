use thiserror::Error;

use crate::data::TreeParams;

/// Shown when the text service answers with nothing
pub const FALLBACK_EMPTY: &str =
    "Nature follows many patterns. Explore the sliders to find the balance between math and biology.";
/// Shown when the text service fails
pub const FALLBACK_ERROR: &str =
    "The forest is quiet right now. Check your parameters to see how the geometry shifts!";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("insight request failed: {0}")]
    Request(String),
}

/// Prompt describing the current model to the text service
pub fn build_prompt(params: &TreeParams) -> String {
    format!(
        "You are an expert botanist teaching students about Leonardo da Vinci's Rule of Trees \
and plant hydraulic architecture.

Current Model Parameters:
- Species: {species}
- Trunk Girth (Starting Radius): {trunk}
- Branch Mass Scalar: {limb}x (multiplied against Leonardo's theoretical prediction)
- Leonardo Exponent (n): {exponent}

Leonardo's rule (exponent n=2) suggests area is conserved to optimize water flow.

Explain in 2 sentences how the current combination of trunk girth and branch mass affects \
the tree's structural \"believability.\"
If the branch mass is high (>1.0) while the trunk is thin, note that the tree would likely \
collapse under its own weight in the real world.
Keep the tone educational, encouraging, and scientifically grounded.",
        species = params.species.display_name(),
        trunk = params.trunk_thickness,
        limb = params.branch_thickness,
        exponent = params.exponent,
    )
}

/// Map a text-service outcome to what the sidebar shows. Never fails.
pub fn resolve(outcome: Result<String, InsightError>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_EMPTY.to_string(),
        Err(e) => {
            log::warn!("{}", e);
            FALLBACK_ERROR.to_string()
        }
    }
}
