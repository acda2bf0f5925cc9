//! Core types for easel.

mod reply;
mod turn;

pub use reply::*;
pub use turn::*;
