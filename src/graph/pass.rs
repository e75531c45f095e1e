//! Pass descriptors.
//!
//! A [`PassDesc`] declares, for one render pass, which scene subset to
//! draw, which camera to project with, which target to draw into, and
//! which context keys the pass reads and writes. The pass set is fixed at
//! setup time; descriptors are immutable per frame.

use std::borrow::Cow;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::graph::context::ContextKey;
use crate::graph::target::TargetKind;

bitflags! {
    /// Scene-subset membership. A surface is drawn by a pass iff its
    /// layers intersect the pass's mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Default layer for regular scene objects.
        const MAIN = 1 << 0;
        /// Objects that cast shadows (drawn by the shadow pass).
        const SHADOW_CASTERS = 1 << 1;
        /// Objects written by the depth pre-pass.
        const DEPTH_PREPASS = 1 << 2;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::MAIN
    }
}

/// Which projection a pass draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassCamera {
    /// The scene camera.
    Scene,
    /// The light's shadow projection (shadow passes).
    Light,
}

/// Declaration of one render pass.
#[derive(Debug, Clone)]
pub struct PassDesc {
    name: Cow<'static, str>,
    target: TargetKind,
    camera: PassCamera,
    layers: LayerMask,
    inputs: SmallVec<[ContextKey; 4]>,
    outputs: SmallVec<[ContextKey; 4]>,
}

impl PassDesc {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, target: TargetKind) -> Self {
        Self {
            name: name.into(),
            target,
            camera: PassCamera::Scene,
            layers: LayerMask::MAIN,
            inputs: SmallVec::new(),
            outputs: SmallVec::new(),
        }
    }

    /// Selects the projection used by this pass.
    #[must_use]
    pub fn with_camera(mut self, camera: PassCamera) -> Self {
        self.camera = camera;
        self
    }

    /// Restricts the pass to surfaces on the given layers.
    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Declares a context key this pass consumes.
    #[must_use]
    pub fn reads(mut self, key: impl Into<ContextKey>) -> Self {
        self.inputs.push(key.into());
        self
    }

    /// Declares a context key this pass produces.
    #[must_use]
    pub fn writes(mut self, key: impl Into<ContextKey>) -> Self {
        self.outputs.push(key.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn target(&self) -> TargetKind {
        self.target
    }

    #[must_use]
    pub fn camera(&self) -> PassCamera {
        self.camera
    }

    #[must_use]
    pub fn layers(&self) -> LayerMask {
        self.layers
    }

    #[must_use]
    pub fn inputs(&self) -> &[ContextKey] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[ContextKey] {
        &self.outputs
    }
}
