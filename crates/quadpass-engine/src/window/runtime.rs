use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{GpuInit, SubmitError, SurfaceErrorAction};
use crate::submit::FrameSubmitter;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "quadpass".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens a window, runs initialization and resource building, and
    /// resubmits the frame whenever the platform requests a redraw.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    submitter: FrameSubmitter<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    entry: Option<WindowEntry>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = match event_loop.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu_init = self.gpu_init.clone();
        let mut entry = WindowEntryBuilder {
            window,
            submitter_builder: |w| {
                pollster::block_on(FrameSubmitter::initialize(w, gpu_init))
                    .expect("graphics initialization failed")
            },
        }
        .build();

        // Resource building is part of startup; a failure here is fatal.
        if let Err(e) = entry.with_submitter_mut(|s| pollster::block_on(s.build_resources())) {
            log::error!("failed to build GPU resources: {e}");
            event_loop.exit();
            return;
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Single-shot workload: redraw only when the platform asks for it.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.entry = None;
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(new_size) => {
                entry.with_submitter_mut(|s| s.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_submitter_mut(|s| s.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => match entry.with_submitter(|s| s.submit_frame()) {
                Ok(()) => {}

                Err(SubmitError::SurfaceUnavailable(err)) => {
                    match entry.with_submitter_mut(|s| s.handle_surface_error(err)) {
                        SurfaceErrorAction::Reconfigured => {
                            entry.with_window(|w| w.request_redraw());
                        }
                        SurfaceErrorAction::SkipFrame => {}
                        SurfaceErrorAction::Fatal => {
                            log::error!("surface is out of memory; exiting");
                            event_loop.exit();
                        }
                    }
                }

                Err(err) => {
                    log::error!("frame submission failed: {err}");
                    event_loop.exit();
                }
            },

            _ => {}
        }
    }
}
