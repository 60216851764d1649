//! Headless build + submit integration tests.
//!
//! These tests acquire a real adapter without a window and render into an
//! offscreen texture. When the host has no usable graphics adapter the tests
//! skip themselves rather than fail, so machines without a GPU stay green.

use quadpass_engine::device::BuildError;
use quadpass_engine::render::QuadRenderer;

const TEST_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn request_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;

    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("quadpass test device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_defaults(),
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::Performance,
        trace: wgpu::Trace::Off,
    }))
    .ok()
}

fn offscreen_view(device: &wgpu::Device) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("quadpass test target"),
        size: wgpu::Extent3d {
            width: 64,
            height: 64,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEST_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[test]
fn builds_and_submits_one_offscreen_frame() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("no graphics adapter available; skipping");
        return;
    };

    let quad = pollster::block_on(QuadRenderer::new(&device, TEST_FORMAT))
        .expect("quad resources should build against a plain color target");

    let view = offscreen_view(&device);
    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("quadpass test encoder"),
    });
    quad.record(&mut encoder, &view);
    queue.submit(std::iter::once(encoder.finish()));
}

#[test]
fn repeated_submission_reuses_resources() {
    let Some((device, queue)) = request_test_device() else {
        eprintln!("no graphics adapter available; skipping");
        return;
    };

    let quad = pollster::block_on(QuadRenderer::new(&device, TEST_FORMAT))
        .expect("quad resources should build against a plain color target");
    let view = offscreen_view(&device);

    // Nothing mutates between frames, so every submission must succeed alike.
    for _ in 0..3 {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("quadpass test encoder"),
        });
        quad.record(&mut encoder, &view);
        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[test]
fn broken_shader_reports_compile_failure() {
    let Some((device, _queue)) = request_test_device() else {
        eprintln!("no graphics adapter available; skipping");
        return;
    };

    let err = pollster::block_on(QuadRenderer::with_shader(
        &device,
        TEST_FORMAT,
        "@vertex fn vs_main( -> { nonsense",
    ))
    .expect_err("invalid WGSL must not produce a renderer");

    assert!(matches!(err, BuildError::ShaderCompileFailed(_)));
}
