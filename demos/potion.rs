//! Potion bottle: tinted glass over an animated liquid fill.
//!
//! The liquid's `fill_amount` is a static binding edited between ticks,
//! the way a debug-UI slider would drive it.
//!
//! Run with: `cargo run --example potion`

use prism::prelude::*;

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
            log::info!(
                "[{}] draw '{}' fill={:?}",
                pass.name(),
                draw.surface.name(),
                draw.uniforms.get("fill_amount"),
            );
        }
        Ok(PassOutput::new())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut camera = Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0);
    camera.position = Vec3::new(0.0, 1.2, 4.0);
    camera.look_at(Vec3::new(0.0, 0.8, 0.0));

    let light = Light::new(Vec3::new(3.0, 6.0, 2.0));

    // Bottle mesh bounds measured from the asset: fill goes from the
    // bottle's base to its neck.
    let height_bounds = Vec2::new(0.12, 1.55);

    let (mut composition, keys) = Composition::builder(camera, light)
        .with_surface(presets::liquid("models/Potion_liquid.glb", height_bounds))
        .with_surface(presets::glass("models/Potion_glass.glb"))
        .build();
    let liquid_key = keys[0];

    let plan = FramePlan::new(vec![PassDesc::new("main", TargetKind::Screen)])?;
    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(1280, 720, 1024);
    let mut backend = TraceBackend;

    for frame in 0..90u32 {
        let t = f64::from(frame) * (1000.0 / 60.0);

        // Slider moves the fill between ticks; the binder picks up the new
        // value on the next resolve.
        let fill = (frame as f32 / 90.0).min(1.0);
        let liquid = composition
            .surface_mut(liquid_key)
            .ok_or_else(|| anyhow::anyhow!("liquid surface missing"))?;
        if !liquid.set_static("fill_amount", fill) {
            log::warn!("fill_amount is not a static binding");
        }

        scheduler.run_frame(&composition, &mut targets, &mut backend, t)?;
    }

    Ok(())
}
