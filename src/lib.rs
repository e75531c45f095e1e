#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! An engine-independent render-pass scheduler.
//!
//! A fixed set of [`PassDesc`]s is validated and ordered once at setup
//! ([`FramePlan`]); each host tick the [`FrameScheduler`] executes the
//! passes in dependency order, resolves every surface's shader uniforms
//! from its declarative binding table, hands the draw work to a
//! [`DrawBackend`], and carries pass outputs (depth texture, shadow map,
//! light matrices) to downstream passes through the per-frame
//! [`FrameContext`].

pub mod clock;
pub mod errors;
pub mod graph;
pub mod scene;

pub use clock::FrameClock;
pub use errors::{DrawError, PrismError, Result};
pub use graph::{
    ContextKey, DrawBackend, FrameContext, FramePlan, FrameScheduler, LayerMask, OffscreenTarget,
    PassCamera, PassDesc, PassInputs, PassOutput, PassView, RenderTarget, RenderTargetSet,
    Sampling, ScreenTarget, SurfaceDraw, TargetKind, TextureHandle, UniformValue,
};
pub use scene::{
    AssetSource, Camera, Composition, CompositionBuilder, GeometryRef, Light, ShaderSurface,
    ShadowConfig, ShadowProjection, SurfaceKey, UniformBinding,
};

/// Convenience glob import for demos and downstream users.
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::errors::{DrawError, PrismError, Result};
    pub use crate::graph::{
        ContextKey, DrawBackend, FrameContext, FramePlan, FrameScheduler, LayerMask,
        OffscreenTarget, PassCamera, PassDesc, PassInputs, PassOutput, PassView, RenderTarget,
        RenderTargetSet, Sampling, ScreenTarget, SurfaceDraw, TargetKind, TextureHandle,
        UniformValue, keys,
    };
    pub use crate::scene::{
        AssetSource, Camera, ClockBinding, Composition, DerivedBinding, GeometryRef, Light,
        ShaderSurface, ShadowConfig, ShadowProjection, SurfaceKey, UniformBinding, presets,
    };
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
}
