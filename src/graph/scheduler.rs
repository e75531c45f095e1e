//! Frame execution.
//!
//! [`FrameScheduler`] drives one frame tick: advance the clock, execute
//! the validated plan pass by pass, resolve each surface's uniforms just
//! before its pass draws it, and carry pass outputs forward through the
//! frame context. The context is exclusively owned by the scheduler and
//! cleared at the end of every frame; nothing carries across frames
//! except the clock's monotonic elapsed time.

use log::error;
use rustc_hash::FxHashSet;

use crate::clock::FrameClock;
use crate::errors::{DrawError, PrismError, Result};
use crate::graph::backend::{DrawBackend, PassInputs, PassOutput, PassView, SurfaceDraw};
use crate::graph::binder;
use crate::graph::context::FrameContext;
use crate::graph::pass::{PassCamera, PassDesc};
use crate::graph::plan::FramePlan;
use crate::graph::target::RenderTargetSet;
use crate::scene::Composition;

/// Executes a validated [`FramePlan`] once per host tick.
pub struct FrameScheduler {
    plan: FramePlan,
    context: FrameContext,
    clock: FrameClock,
}

impl FrameScheduler {
    #[must_use]
    pub fn new(plan: FramePlan) -> Self {
        Self {
            plan,
            context: FrameContext::new(),
            clock: FrameClock::new(),
        }
    }

    #[must_use]
    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Runs one frame at the given host timestamp (milliseconds).
    ///
    /// Executes every pass of the plan in dependency order. On a draw
    /// failure the frame is aborted: the context is cleared, remaining
    /// passes are skipped, and [`PrismError::PassExecution`] is returned.
    /// A discarded frame is never presented; the screen keeps showing the
    /// last completed one, and the caller may continue ticking.
    pub fn run_frame(
        &mut self,
        composition: &Composition,
        targets: &mut RenderTargetSet,
        backend: &mut dyn DrawBackend,
        raw_ms: f64,
    ) -> Result<()> {
        self.clock.tick(raw_ms);
        self.context.clear();

        for index in 0..self.plan.len() {
            let pass = &self.plan.passes()[index];

            let inputs = PassInputs::resolve(pass.inputs(), &self.context);
            let view = match pass.camera() {
                PassCamera::Scene => PassView::from_camera(&composition.camera),
                PassCamera::Light => PassView::from_light(&composition.light),
            };

            let surfaces: Vec<SurfaceDraw<'_>> = composition
                .surfaces_on(pass.layers())
                .map(|(key, surface)| SurfaceDraw {
                    key,
                    surface,
                    uniforms: binder::resolve(
                        surface,
                        &self.context,
                        &self.clock,
                        &composition.camera,
                    ),
                })
                .collect();

            let target = targets.get_mut(pass.target());
            let output = match backend.draw(pass, &view, &inputs, &surfaces, target) {
                Ok(output) => output,
                Err(cause) => return Self::abort(&mut self.context, &self.clock, pass.name(), cause),
            };

            if let Err(cause) = Self::check_outputs(pass, &output) {
                return Self::abort(&mut self.context, &self.clock, pass.name(), cause);
            }
            for (key, value) in output.into_values() {
                self.context.insert(key, value);
            }
        }

        self.context.clear();
        Ok(())
    }

    /// Verifies that the draw produced exactly the declared output keys.
    fn check_outputs(pass: &PassDesc, output: &PassOutput) -> std::result::Result<(), DrawError> {
        let declared: FxHashSet<&str> = pass.outputs().iter().map(|k| k.as_str()).collect();
        let mut produced: FxHashSet<&str> = FxHashSet::default();
        for (key, _) in output.iter() {
            if !declared.contains(key.as_str()) {
                return Err(DrawError::UndeclaredOutput {
                    key: key.as_str().to_owned(),
                });
            }
            if !produced.insert(key.as_str()) {
                return Err(DrawError::DuplicateOutput {
                    key: key.as_str().to_owned(),
                });
            }
        }
        for key in pass.outputs() {
            if !produced.contains(key.as_str()) {
                return Err(DrawError::MissingOutput {
                    key: key.as_str().to_owned(),
                });
            }
        }
        Ok(())
    }

    fn abort(
        context: &mut FrameContext,
        clock: &FrameClock,
        pass: &str,
        cause: DrawError,
    ) -> Result<()> {
        error!("frame {} aborted in pass '{pass}': {cause}", clock.frame_count());
        context.clear();
        Err(PrismError::PassExecution {
            pass: pass.to_owned(),
            source: cause,
        })
    }
}
