//! Uniform resolution.
//!
//! For each shader-bearing surface, [`resolve`] turns the surface's
//! declared binding table into concrete uniform values for this frame:
//! static values pass through, context bindings are looked up in the
//! frame context (with the binding's declared fallback when absent),
//! clock bindings read the frame clock, and derived bindings are computed
//! fresh from the camera on every call, never cached.
//!
//! Resolution is pure: it mutates neither the context nor the clock, and
//! identical inputs produce identical outputs. Tests rely on this.

use rustc_hash::FxHashMap;

use crate::clock::FrameClock;
use crate::graph::context::{FrameContext, UniformValue};
use crate::scene::camera::Camera;
use crate::scene::surface::{ClockBinding, DerivedBinding, ShaderSurface, UniformBinding, UniformName};

/// Uniform name to value mapping for one surface, one frame.
pub type ResolvedUniforms = FxHashMap<UniformName, UniformValue>;

/// Resolves every declared binding on `surface` for the current frame.
#[must_use]
pub fn resolve(
    surface: &ShaderSurface,
    context: &FrameContext,
    clock: &FrameClock,
    camera: &Camera,
) -> ResolvedUniforms {
    let mut resolved = ResolvedUniforms::default();
    for (name, binding) in surface.bindings() {
        let value = match binding {
            UniformBinding::Static(value) => *value,
            UniformBinding::Context { key, fallback } => context.get(key).unwrap_or(*fallback),
            UniformBinding::Clock(ClockBinding::Elapsed) => {
                UniformValue::Float(clock.elapsed_seconds())
            }
            UniformBinding::Clock(ClockBinding::Delta) => {
                UniformValue::Float(clock.delta_seconds())
            }
            UniformBinding::Derived(DerivedBinding::ViewDirection) => {
                UniformValue::Vec3(camera.view_direction())
            }
            UniformBinding::Derived(DerivedBinding::CameraPosition) => {
                UniformValue::Vec3(camera.position)
            }
        };
        resolved.insert(name.clone(), value);
    }
    resolved
}
