//! Core traits for easel providers.

mod completion;
mod image;

pub use completion::*;
pub use image::*;
