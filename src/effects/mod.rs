//! Page effects that are not character reveals.
//!
//! - [`HighlightSweep`] - accent bar behind text, driven by visibility
//! - [`NoiseField`] - faint animated grain
//! - [`easing`] - the curves both use

pub mod easing;
mod highlight;
mod noise;

pub use highlight::HighlightSweep;
pub use noise::{DEFAULT_OPACITY, NoiseField};
