//! End-to-end frame execution: pass ordering, context flow, frame aborts.

use prism::prelude::*;
use prism::PrismError;

/// Records every draw call and publishes the declared outputs of each
/// pass, the way a GPU backend would after rendering.
#[derive(Default)]
struct RecordingBackend {
    /// Pass names in draw order, across all frames.
    calls: Vec<String>,
    /// Per draw call: the pass's resolved input entries.
    inputs: Vec<(String, Vec<(String, Option<UniformValue>)>)>,
    /// Per surface draw: (pass, surface, probed uniform value).
    probed: Vec<(String, String, Option<UniformValue>)>,
    /// Uniform name sampled into `probed`.
    probe: Option<&'static str>,
    /// Fail the draw of the named pass.
    fail_on: Option<&'static str>,
    /// Publish a key no pass declares.
    extra_output: bool,
    /// Publish every declared texture output twice.
    repeat_outputs: bool,
    /// Publish nothing regardless of declarations.
    suppress_outputs: bool,
}

impl DrawBackend for RecordingBackend {
    fn draw(
        &mut self,
        pass: &PassDesc,
        view: &PassView,
        inputs: &PassInputs,
        surfaces: &[SurfaceDraw<'_>],
        target: &mut dyn RenderTarget,
    ) -> std::result::Result<PassOutput, DrawError> {
        self.calls.push(pass.name().to_owned());
        self.inputs.push((
            pass.name().to_owned(),
            inputs
                .iter()
                .map(|(k, v)| (k.as_str().to_owned(), v))
                .collect(),
        ));
        if let Some(probe) = self.probe {
            for draw in surfaces {
                self.probed.push((
                    pass.name().to_owned(),
                    draw.surface.name().to_owned(),
                    draw.uniforms.get(probe).copied(),
                ));
            }
        }

        if self.fail_on == Some(pass.name()) {
            return Err(DrawError::Backend("induced draw failure".to_owned()));
        }
        if self.suppress_outputs {
            return Ok(PassOutput::new());
        }

        let mut output = PassOutput::new();
        for key in pass.outputs() {
            match key.as_str() {
                k @ (keys::DEPTH | keys::SHADOW_MAP) => {
                    let texture = target
                        .depth_attachment()
                        .ok_or(DrawError::MissingAttachment { attachment: "depth" })?;
                    output.publish(k.to_owned(), texture);
                    if self.repeat_outputs {
                        output.publish(k.to_owned(), texture);
                    }
                }
                keys::LIGHT_VIEW_PROJECTION => {
                    output.publish(keys::LIGHT_VIEW_PROJECTION, view.view_projection);
                }
                other => {
                    output.publish(other.to_owned(), self.calls.len() as f32);
                }
            }
        }
        if self.extra_output {
            output = output.with("uninvited", 1.0);
        }
        Ok(output)
    }
}

fn scene() -> Composition {
    let mut camera = Camera::new_perspective(70.0, 16.0 / 9.0, 0.5, 500.0);
    camera.position = Vec3::new(0.0, 12.0, 30.0);
    camera.look_at(Vec3::ZERO);
    let light = Light::new(Vec3::new(25.0, 40.0, 20.0));

    Composition::builder(camera, light)
        .with_surface(presets::terrain("terrain"))
        .with_surface(presets::water("water"))
        .with_surface(
            presets::crystal("crystal").with_layers(LayerMask::MAIN | LayerMask::SHADOW_CASTERS),
        )
        .build()
        .0
}

fn three_pass_plan() -> FramePlan {
    FramePlan::new(vec![
        PassDesc::new("main", TargetKind::Screen)
            .reads(keys::DEPTH)
            .reads(keys::SHADOW_MAP)
            .reads(keys::LIGHT_VIEW_PROJECTION),
        PassDesc::new("depth", TargetKind::OffscreenDepth)
            .with_layers(LayerMask::DEPTH_PREPASS)
            .writes(keys::DEPTH),
        PassDesc::new("shadow", TargetKind::OffscreenShadow)
            .with_camera(PassCamera::Light)
            .with_layers(LayerMask::SHADOW_CASTERS)
            .writes(keys::SHADOW_MAP)
            .writes(keys::LIGHT_VIEW_PROJECTION),
    ])
    .expect("valid pass set")
}

fn input_value(backend: &RecordingBackend, pass: &str, key: &str) -> Option<UniformValue> {
    backend
        .inputs
        .iter()
        .rev()
        .find(|(p, _)| p == pass)
        .and_then(|(_, entries)| entries.iter().find(|(k, _)| k == key))
        .and_then(|(_, v)| *v)
}

#[test]
fn frame_executes_passes_in_dependency_order() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend::default();

    for (frame, t) in [0.0, 16.0, 33.0].into_iter().enumerate() {
        scheduler
            .run_frame(&composition, &mut targets, &mut backend, t)
            .expect("frame should complete");
        assert_eq!(
            &backend.calls[frame * 3..frame * 3 + 3],
            ["depth", "shadow", "main"],
            "frame {frame} ran out of order"
        );
    }
    assert_eq!(scheduler.clock().frame_count(), 3);
}

#[test]
fn pass_outputs_reach_later_passes_in_the_same_frame() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend::default();

    scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect("frame should complete");

    let depth_texture = targets
        .get(TargetKind::OffscreenDepth)
        .depth_attachment()
        .unwrap();
    let shadow_texture = targets
        .get(TargetKind::OffscreenShadow)
        .depth_attachment()
        .unwrap();

    assert_eq!(
        input_value(&backend, "main", keys::DEPTH),
        Some(UniformValue::Texture(depth_texture))
    );
    assert_eq!(
        input_value(&backend, "main", keys::SHADOW_MAP),
        Some(UniformValue::Texture(shadow_texture))
    );
    assert_eq!(
        input_value(&backend, "main", keys::LIGHT_VIEW_PROJECTION),
        Some(UniformValue::Mat4(composition.light.view_projection()))
    );
}

#[test]
fn draw_failure_aborts_the_frame_and_skips_remaining_passes() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend {
        fail_on: Some("shadow"),
        ..RecordingBackend::default()
    };

    let err = scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect_err("shadow failure must abort the frame");
    match err {
        PrismError::PassExecution { pass, .. } => assert_eq!(pass, "shadow"),
        other => panic!("expected PassExecution, got {other:?}"),
    }
    assert_eq!(backend.calls, ["depth", "shadow"], "main must be skipped");

    // The next frame runs cleanly; the scheduler stays usable.
    backend.fail_on = None;
    scheduler
        .run_frame(&composition, &mut targets, &mut backend, 16.0)
        .expect("next frame should recover");
    assert_eq!(&backend.calls[2..], ["depth", "shadow", "main"]);
    assert_eq!(scheduler.clock().frame_count(), 2);
}

#[test]
fn context_values_do_not_leak_across_frames() {
    // "early" runs before the producer of "beacon", so its surface must see
    // the fallback on every frame. A leaked context would expose the
    // previous frame's value on frame two.
    let camera = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    let light = Light::new(Vec3::new(5.0, 10.0, 5.0));
    let composition = Composition::builder(camera, light)
        .with_surface(
            ShaderSurface::new("listener", "quad").bind_context("u_beacon", "beacon", 7.0),
        )
        .build()
        .0;

    let plan = FramePlan::new(vec![
        PassDesc::new("early", TargetKind::Screen),
        PassDesc::new("producer", TargetKind::Screen).writes("beacon"),
    ])
    .expect("valid pass set");

    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(64, 64, 64);
    let mut backend = RecordingBackend {
        probe: Some("u_beacon"),
        ..RecordingBackend::default()
    };

    for t in [0.0, 16.0, 33.0] {
        scheduler
            .run_frame(&composition, &mut targets, &mut backend, t)
            .expect("frame should complete");
    }

    let early_values: Vec<_> = backend
        .probed
        .iter()
        .filter(|(pass, _, _)| pass == "early")
        .map(|(_, _, v)| *v)
        .collect();
    assert_eq!(early_values.len(), 3);
    for value in early_values {
        assert_eq!(value, Some(UniformValue::Float(7.0)));
    }
}

#[test]
fn undeclared_output_aborts_the_frame() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend {
        extra_output: true,
        ..RecordingBackend::default()
    };

    let err = scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect_err("undeclared output must abort the frame");
    match err {
        PrismError::PassExecution {
            source: DrawError::UndeclaredOutput { key },
            ..
        } => assert_eq!(key, "uninvited"),
        other => panic!("expected UndeclaredOutput, got {other:?}"),
    }
}

#[test]
fn repeated_output_key_aborts_the_frame() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend {
        repeat_outputs: true,
        ..RecordingBackend::default()
    };

    let err = scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect_err("a twice-produced output must abort the frame");
    match err {
        PrismError::PassExecution {
            pass,
            source: DrawError::DuplicateOutput { key },
        } => {
            assert_eq!(pass, "depth");
            assert_eq!(key, keys::DEPTH);
        }
        other => panic!("expected DuplicateOutput, got {other:?}"),
    }
}

#[test]
fn missing_declared_output_aborts_the_frame() {
    let composition = scene();
    let mut scheduler = FrameScheduler::new(three_pass_plan());
    let mut targets = RenderTargetSet::offscreen(640, 480, 256);
    let mut backend = RecordingBackend {
        suppress_outputs: true,
        ..RecordingBackend::default()
    };

    let err = scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect_err("missing output must abort the frame");
    match err {
        PrismError::PassExecution {
            pass,
            source: DrawError::MissingOutput { key },
        } => {
            assert_eq!(pass, "depth");
            assert_eq!(key, keys::DEPTH);
        }
        other => panic!("expected MissingOutput, got {other:?}"),
    }
}

#[test]
fn clock_uniforms_advance_with_the_host_timestamps() {
    let camera = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    let light = Light::new(Vec3::new(5.0, 10.0, 5.0));
    let composition = Composition::builder(camera, light)
        .with_surface(presets::water("water"))
        .build()
        .0;

    let plan = FramePlan::new(vec![
        PassDesc::new("depth", TargetKind::OffscreenDepth)
            .with_layers(LayerMask::DEPTH_PREPASS)
            .writes(keys::DEPTH),
        PassDesc::new("main", TargetKind::Screen).reads(keys::DEPTH),
    ])
    .expect("valid pass set");

    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(64, 64, 64);
    let mut backend = RecordingBackend {
        probe: Some("time"),
        ..RecordingBackend::default()
    };

    scheduler
        .run_frame(&composition, &mut targets, &mut backend, 0.0)
        .expect("frame should complete");
    scheduler
        .run_frame(&composition, &mut targets, &mut backend, 16.0)
        .expect("frame should complete");

    let times: Vec<_> = backend
        .probed
        .iter()
        .filter(|(pass, surface, _)| pass == "main" && surface == "water")
        .map(|(_, _, v)| *v)
        .collect();
    assert_eq!(times[0], Some(UniformValue::Float(0.0)));
    match times[1] {
        Some(UniformValue::Float(t)) => assert!((t - 0.016).abs() < 1e-6),
        other => panic!("expected elapsed seconds, got {other:?}"),
    }
}

#[test]
fn empty_plan_still_ticks_the_clock() {
    let composition = scene();
    let plan = FramePlan::new(Vec::new()).expect("empty set is valid");
    let mut scheduler = FrameScheduler::new(plan);
    let mut targets = RenderTargetSet::offscreen(64, 64, 64);
    let mut backend = RecordingBackend::default();

    scheduler
        .run_frame(&composition, &mut targets, &mut backend, 100.0)
        .expect("empty frame is a no-op");
    assert!(backend.calls.is_empty());
    assert_eq!(scheduler.clock().frame_count(), 1);
}
