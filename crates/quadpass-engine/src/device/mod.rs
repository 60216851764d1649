//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod error;
mod gpu;
mod surface;

pub use error::{BuildError, InitError, SubmitError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, GpuInit};
