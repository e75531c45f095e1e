//! Draw delegation.
//!
//! The scheduler owns ordering and data flow; recording actual draw work
//! is handed to a [`DrawBackend`]. One `draw` call corresponds to one
//! complete pass: a scene subset rendered into one target. Backends run on
//! a single logical queue and never block mid-frame.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

use crate::errors::DrawError;
use crate::graph::binder::ResolvedUniforms;
use crate::graph::context::{ContextKey, FrameContext, UniformValue};
use crate::graph::pass::PassDesc;
use crate::graph::target::RenderTarget;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::surface::{ShaderSurface, SurfaceKey};

/// The projection a pass draws with, resolved from the scene camera or the
/// light's shadow projection.
#[derive(Debug, Clone, Copy)]
pub struct PassView {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    pub position: Vec3,
}

impl PassView {
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        Self {
            view,
            projection,
            view_projection: projection * view,
            position: camera.position,
        }
    }

    #[must_use]
    pub fn from_light(light: &Light) -> Self {
        let (view, projection) = light.view_and_projection();
        Self {
            view,
            projection,
            view_projection: light.view_projection(),
            position: light.position(),
        }
    }
}

/// A pass's declared inputs, resolved against the frame context just
/// before the draw.
///
/// An entry is `None` when the key is absent from the context, i.e. no
/// earlier pass of the frame produced it. Backends fall back to the
/// documented defaults ([`TextureHandle::ZERO`] zero-filled texture,
/// identity matrix) rather than failing.
///
/// [`TextureHandle::ZERO`]: crate::graph::target::TextureHandle::ZERO
#[derive(Debug, Default)]
pub struct PassInputs {
    entries: SmallVec<[(ContextKey, Option<UniformValue>); 4]>,
}

impl PassInputs {
    #[must_use]
    pub fn resolve(keys: &[ContextKey], context: &FrameContext) -> Self {
        let entries = keys
            .iter()
            .map(|key| (key.clone(), context.get(key)))
            .collect();
        Self { entries }
    }

    /// Looks up a declared input by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .and_then(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, Option<UniformValue>)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One surface scheduled into a pass, with its uniforms already resolved.
pub struct SurfaceDraw<'a> {
    pub key: SurfaceKey,
    pub surface: &'a ShaderSurface,
    pub uniforms: ResolvedUniforms,
}

/// Values produced by a draw, to be published into the frame context.
///
/// The scheduler checks the produced keys against the pass's declared
/// outputs; an undeclared or missing key aborts the frame.
#[derive(Debug, Default)]
pub struct PassOutput {
    values: SmallVec<[(ContextKey, UniformValue); 4]>,
}

impl PassOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a produced value (chainable).
    #[must_use]
    pub fn with(mut self, key: impl Into<ContextKey>, value: impl Into<UniformValue>) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Records a produced value.
    pub fn publish(&mut self, key: impl Into<ContextKey>, value: impl Into<UniformValue>) {
        self.values.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, UniformValue)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_values(self) -> SmallVec<[(ContextKey, UniformValue); 4]> {
        self.values
    }
}

/// Executes the draw work of a single pass against its target.
pub trait DrawBackend {
    /// Draws `surfaces` into `target` and returns the values the pass
    /// produced for downstream passes.
    ///
    /// # Errors
    ///
    /// A [`DrawError`] aborts the current frame; the scheduler clears the
    /// frame context and skips the remaining passes.
    fn draw(
        &mut self,
        pass: &PassDesc,
        view: &PassView,
        inputs: &PassInputs,
        surfaces: &[SurfaceDraw<'_>],
        target: &mut dyn RenderTarget,
    ) -> std::result::Result<PassOutput, DrawError>;
}
