//! One-shot frame submission over the device layer.

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{
    BuildError, Gpu, GpuInit, InitError, SubmitError, SurfaceErrorAction,
};
use crate::render::QuadRenderer;

/// Owns the full lifecycle from device acquisition through frame submission.
///
/// The three stages run in strict order:
/// 1. [`initialize`](Self::initialize) — adapter/device acquisition and
///    surface configuration,
/// 2. [`build_resources`](Self::build_resources) — shader, vertex buffer and
///    pipeline construction,
/// 3. [`submit_frame`](Self::submit_frame) — encode and submit one frame.
///
/// Submitting before resources are built is rejected rather than reordered.
pub struct FrameSubmitter<'w> {
    gpu: Gpu<'w>,
    quad: Option<QuadRenderer>,
}

impl<'w> FrameSubmitter<'w> {
    /// Requests an adapter and logical device and binds the surface to the
    /// window, selecting the surface's preferred color format.
    pub async fn initialize(window: &'w Window, init: GpuInit) -> Result<Self, InitError> {
        let gpu = Gpu::new(window, init).await?;
        Ok(Self { gpu, quad: None })
    }

    /// Compiles the fixed shader, uploads the quad vertex buffer, and builds
    /// the render pipeline against the configured surface format.
    pub async fn build_resources(&mut self) -> Result<(), BuildError> {
        let quad = QuadRenderer::new(self.gpu.device(), self.gpu.surface_format()).await?;
        self.quad = Some(quad);
        Ok(())
    }

    /// Encodes one render pass (clear + draw) and submits it to the queue.
    ///
    /// No state mutates between calls; submitting repeatedly produces the
    /// same frame each time.
    pub fn submit_frame(&self) -> Result<(), SubmitError> {
        let quad = self.quad.as_ref().ok_or(SubmitError::ResourcesNotBuilt)?;

        let mut frame = self.gpu.begin_frame()?;
        quad.record(&mut frame.encoder, &frame.view);
        self.gpu.submit(frame);

        Ok(())
    }

    /// Forwards a window resize to the surface configuration.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// Maps a surface acquisition error to a recovery action, reconfiguring
    /// the surface when that can bring it back.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        self.gpu.handle_surface_error(err)
    }

    /// Returns the underlying GPU context.
    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }
}
