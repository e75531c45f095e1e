//! Render-pass orchestration.
//!
//! Provides:
//! - `PassDesc`: declaration of one render pass (target, camera, subset, keys)
//! - `FramePlan`: setup-time validation and topological ordering
//! - `FrameScheduler`: per-tick execution in dependency order
//! - `FrameContext`: ephemeral per-frame key/value store for pass outputs
//! - `binder`: per-surface uniform resolution
//! - `RenderTarget`/`RenderTargetSet`: target contracts
//! - `DrawBackend`: draw delegation trait

pub mod backend;
pub mod binder;
pub mod context;
pub mod pass;
pub mod plan;
pub mod scheduler;
pub mod target;

pub use backend::{DrawBackend, PassInputs, PassOutput, PassView, SurfaceDraw};
pub use binder::ResolvedUniforms;
pub use context::{ContextKey, FrameContext, UniformValue, keys};
pub use pass::{LayerMask, PassCamera, PassDesc};
pub use plan::FramePlan;
pub use scheduler::FrameScheduler;
pub use target::{
    FilterMode, OffscreenTarget, RenderTarget, RenderTargetSet, Sampling, ScreenTarget,
    TargetKind, TextureHandle,
};
