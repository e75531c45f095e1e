//! Fresnel crystal under an orbiting camera, drawn by a tracing backend.
//!
//! Run with: `cargo run --example crystal`

use prism::prelude::*;

/// Prints what a GPU backend would record.
struct TraceBackend;

impl DrawBackend for TraceBackend {
    fn draw(
        &mut self,
        pass: &PassDesc,
        _view: &PassView,
        _inputs: &PassInputs,
        surfaces: &[SurfaceDraw<'_>],
        _target: &mut dyn RenderTarget,
    ) -> std::result::Result<PassOutput, DrawError> {
        for draw in surfaces {
            let view_dir = draw.uniforms.get("view_dir");
            log::info!(
                "[{}] draw '{}' ({}) view_dir={view_dir:?}",
                pass.name(),
                draw.surface.name(),
                draw.surface.geometry.name(),
            );
        }
        Ok(PassOutput::new())
    }
}

fn main() -> prism::Result<()> {
    env_logger::init();

    let mut camera = Camera::new_perspective(75.0, 16.0 / 9.0, 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 0.0, 5.0);
    camera.look_at(Vec3::ZERO);

    let light = Light::new(Vec3::new(4.0, 8.0, 4.0));

    let (mut composition, _keys) = Composition::builder(camera, light)
        .with_surface(presets::crystal(GeometryRef::new("models/Crystal.glb")))
        .build();

    let plan = FramePlan::new(vec![PassDesc::new("main", TargetKind::Screen)])?;
    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(1280, 720, 1024);
    let mut backend = TraceBackend;

    // Orbit the camera; view_dir is re-derived every frame.
    for frame in 0..120u32 {
        let t = f64::from(frame) * (1000.0 / 60.0);
        let angle = frame as f32 * 0.05;
        composition.camera.position = Vec3::new(angle.sin() * 5.0, 1.0, angle.cos() * 5.0);
        composition.camera.look_at(Vec3::ZERO);

        scheduler.run_frame(&composition, &mut targets, &mut backend, t)?;
    }

    log::info!("rendered {} frames", scheduler.clock().frame_count());
    Ok(())
}
