//! quadpass engine crate.
//!
//! Owns the GPU device layer, the fixed quad renderer, and the window runtime
//! that drives frame submission.

pub mod device;
pub mod logging;
pub mod render;
pub mod submit;
pub mod window;
