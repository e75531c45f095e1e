//! Shader surfaces: a drawable object paired with a declarative uniform
//! binding table.
//!
//! Every dependency between a pass output and a shader input is declared
//! here once, instead of being encoded implicitly via per-frame assignment
//! order. Static values may be replaced between ticks by a debug UI; all
//! other bindings are re-resolved every frame by
//! [`binder::resolve`](crate::graph::binder::resolve).

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use slotmap::new_key_type;

use crate::graph::context::{ContextKey, UniformValue};
use crate::graph::pass::LayerMask;

new_key_type! {
    /// Stable handle of a surface inside a [`Composition`](crate::scene::Composition).
    pub struct SurfaceKey;
}

/// Name of a shader uniform.
pub type UniformName = Cow<'static, str>;

/// Opaque reference to externally loaded geometry.
///
/// Asset decoding is out of scope; the scheduler only routes the reference
/// to the draw backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryRef(Cow<'static, str>);

impl GeometryRef {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for GeometryRef {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

/// Clock-driven uniform sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockBinding {
    /// Seconds since process start.
    Elapsed,
    /// Seconds since the previous tick.
    Delta,
}

/// Camera-derived uniform sources, computed fresh every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedBinding {
    /// World-space view direction of the scene camera.
    ViewDirection,
    /// World-space position of the scene camera.
    CameraPosition,
}

/// One entry of a surface's binding table.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformBinding {
    /// Set once at composition; editable between ticks via
    /// [`ShaderSurface::set_static`].
    Static(UniformValue),
    /// Looked up in the frame context each frame. `fallback` applies when
    /// the key is absent, so a surface drawn before its dependency exists
    /// degrades gracefully instead of failing.
    Context {
        key: ContextKey,
        fallback: UniformValue,
    },
    /// Pulled from the frame clock.
    Clock(ClockBinding),
    /// Computed from the scene camera, never cached.
    Derived(DerivedBinding),
}

/// A drawable object paired with a shader program's uniform bindings.
#[derive(Debug, Clone)]
pub struct ShaderSurface {
    name: Cow<'static, str>,
    pub geometry: GeometryRef,
    pub layers: LayerMask,
    bindings: FxHashMap<UniformName, UniformBinding>,
}

impl ShaderSurface {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, geometry: impl Into<GeometryRef>) -> Self {
        Self {
            name: name.into(),
            geometry: geometry.into(),
            layers: LayerMask::MAIN,
            bindings: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Declares a binding (chainable). Redeclaring a name replaces it.
    #[must_use]
    pub fn bind(mut self, name: impl Into<UniformName>, binding: UniformBinding) -> Self {
        self.bindings.insert(name.into(), binding);
        self
    }

    /// Declares a static value binding (chainable).
    #[must_use]
    pub fn bind_static(
        self,
        name: impl Into<UniformName>,
        value: impl Into<UniformValue>,
    ) -> Self {
        self.bind(name, UniformBinding::Static(value.into()))
    }

    /// Declares a context-key binding with a fallback (chainable).
    #[must_use]
    pub fn bind_context(
        self,
        name: impl Into<UniformName>,
        key: impl Into<ContextKey>,
        fallback: impl Into<UniformValue>,
    ) -> Self {
        self.bind(
            name,
            UniformBinding::Context {
                key: key.into(),
                fallback: fallback.into(),
            },
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates the declared bindings.
    pub fn bindings(&self) -> impl Iterator<Item = (&UniformName, &UniformBinding)> {
        self.bindings.iter()
    }

    /// Reads the current value of a static binding (debug-control surface).
    #[must_use]
    pub fn static_value(&self, name: &str) -> Option<UniformValue> {
        match self.bindings.get(name) {
            Some(UniformBinding::Static(value)) => Some(*value),
            _ => None,
        }
    }

    /// Replaces the value of a static binding (debug-control surface).
    ///
    /// Takes effect on the next frame tick. Returns `false` if `name` is
    /// not a static binding; the caller decides whether that is a bug.
    #[must_use]
    pub fn set_static(&mut self, name: &str, value: impl Into<UniformValue>) -> bool {
        match self.bindings.get_mut(name) {
            Some(UniformBinding::Static(slot)) => {
                *slot = value.into();
                true
            }
            _ => false,
        }
    }
}
