//! Terrain with a depth pre-pass, a shadow pass and a lit main pass.
//!
//! Shows the full pipeline: the depth pass publishes the scene depth for
//! the water shader, the shadow pass publishes the shadow map and the
//! light's view-projection, and the main pass consumes all three.
//!
//! Run with: `cargo run --example shadowed_terrain`

use prism::prelude::*;

/// Publishes the attachments a GPU backend would have rendered into.
struct TraceBackend;

impl DrawBackend for TraceBackend {
    fn draw(
        &mut self,
        pass: &PassDesc,
        view: &PassView,
        inputs: &PassInputs,
        surfaces: &[SurfaceDraw<'_>],
        target: &mut dyn RenderTarget,
    ) -> std::result::Result<PassOutput, DrawError> {
        log::info!(
            "[{}] {} surfaces, {} inputs",
            pass.name(),
            surfaces.len(),
            inputs.len(),
        );

        let mut output = PassOutput::new();
        for key in pass.outputs() {
            match key.as_str() {
                k @ (keys::DEPTH | keys::SHADOW_MAP) => {
                    let texture = target
                        .depth_attachment()
                        .ok_or(DrawError::MissingAttachment { attachment: "depth" })?;
                    output.publish(k.to_owned(), texture);
                }
                keys::LIGHT_VIEW_PROJECTION => {
                    output.publish(keys::LIGHT_VIEW_PROJECTION, view.view_projection);
                }
                other => {
                    return Err(DrawError::Backend(format!("unhandled output key '{other}'")));
                }
            }
        }
        Ok(output)
    }
}

fn main() -> prism::Result<()> {
    env_logger::init();

    let mut camera = Camera::new_perspective(70.0, 16.0 / 9.0, 0.5, 500.0);
    camera.position = Vec3::new(0.0, 12.0, 30.0);
    camera.look_at(Vec3::ZERO);

    let mut light = Light::new(Vec3::new(25.0, 40.0, 20.0));
    light.set_shadow(ShadowConfig {
        map_size: 2048,
        projection: ShadowProjection::Orthographic {
            extent: 60.0,
            near: 0.1,
            far: 150.0,
        },
        ..ShadowConfig::default()
    });

    let (mut composition, _keys) = Composition::builder(camera, light)
        .with_surface(presets::terrain("models/Terrain.glb"))
        .with_surface(presets::water("models/Water_plane.glb"))
        .with_surface(
            presets::crystal("models/Crystal.glb")
                .with_layers(LayerMask::MAIN | LayerMask::SHADOW_CASTERS),
        )
        .build();

    let plan = FramePlan::new(vec![
        PassDesc::new("main", TargetKind::Screen)
            .reads(keys::DEPTH)
            .reads(keys::SHADOW_MAP)
            .reads(keys::LIGHT_VIEW_PROJECTION),
        PassDesc::new("shadow", TargetKind::OffscreenShadow)
            .with_camera(PassCamera::Light)
            .with_layers(LayerMask::SHADOW_CASTERS)
            .writes(keys::SHADOW_MAP)
            .writes(keys::LIGHT_VIEW_PROJECTION),
        PassDesc::new("depth", TargetKind::OffscreenDepth)
            .with_layers(LayerMask::DEPTH_PREPASS)
            .writes(keys::DEPTH),
    ])?;
    // Declaration order above is deliberately scrambled; the plan reorders
    // it to depth, shadow, main.

    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(1920, 1080, 2048);
    let mut backend = TraceBackend;

    for frame in 0..300u32 {
        let t = f64::from(frame) * (1000.0 / 60.0);

        // Simulated window resize halfway through. The shadow map keeps
        // its own resolution.
        if frame == 150 {
            targets.resize(1280, 720);
            composition.camera.set_aspect(1280, 720);
        }

        // Swing the light; the shadow matrix cache is rebuilt only on the
        // frames where the position actually changes.
        if frame % 60 == 0 {
            let angle = (frame / 60) as f32 * 0.4;
            composition
                .light
                .set_position(Vec3::new(angle.cos() * 30.0, 40.0, angle.sin() * 30.0));
        }

        scheduler.run_frame(&composition, &mut targets, &mut backend, t)?;
    }

    log::info!("rendered {} frames", scheduler.clock().frame_count());
    Ok(())
}
