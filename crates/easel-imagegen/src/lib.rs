//! easel-imagegen - Image-generation provider for easel.
//!
//! Sends prompts to the Pixazo gateway for FLUX.1 [schnell] with a fixed
//! square resolution, a small step count and a fresh random seed per call.

mod pixazo;

pub use pixazo::PixazoImageGenerator;

// Re-export core types for convenience
pub use easel_core::traits::{ImageConfig, ImageGenerator};
pub use easel_core::types::ImageReference;
