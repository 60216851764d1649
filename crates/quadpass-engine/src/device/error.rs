use thiserror::Error;

/// Failure while acquiring the adapter/device and binding the surface.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no compatible graphics adapter available")]
    NoAdapter(#[source] wgpu::RequestAdapterError),

    #[error("graphics device request failed")]
    DeviceRequestFailed(#[from] wgpu::RequestDeviceError),

    #[error("failed to create a rendering surface for the window")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    #[error("surface reports no supported color formats")]
    NoSurfaceFormat,

    #[error("window has zero drawable size")]
    ZeroSizeSurface,
}

/// Failure while building GPU resources (shader, vertex buffer, pipeline).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("shader failed to compile")]
    ShaderCompileFailed(#[source] wgpu::Error),

    #[error("render pipeline creation was rejected by the device")]
    PipelineCreationFailed(#[source] wgpu::Error),
}

/// Failure while encoding and submitting a frame.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("surface could not provide a frame to render into")]
    SurfaceUnavailable(#[from] wgpu::SurfaceError),

    #[error("frame submitted before GPU resources were built")]
    ResourcesNotBuilt,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}
