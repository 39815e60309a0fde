pub mod readout;

pub use readout::{
    format_area, height_percent, Readout, SliderSpec, AREA_CONVERSION_FACTOR,
    DEFAULT_SLICE_HEIGHT, EXPONENT_SLIDER, LIMB_SCALE_SLIDER, SLICE_HEIGHT_SLIDER, SLIDERS,
    TRUNK_GIRTH_SLIDER,
};
