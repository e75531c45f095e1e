//! Per-frame key/value store carrying pass outputs to later passes.
//!
//! The [`FrameContext`] is built fresh each frame tick and cleared at the
//! end of the frame (and on frame abort). A pass may only read keys that
//! were produced by passes which ran strictly earlier in the same frame;
//! cycle-freedom among pass dependencies is verified at setup by
//! [`FramePlan`](crate::graph::FramePlan), never discovered at runtime.

use std::borrow::Cow;
use std::fmt;

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::graph::target::TextureHandle;

/// Well-known context key names used by the built-in surface presets.
pub mod keys {
    /// Depth texture produced by a depth pre-pass.
    pub const DEPTH: &str = "depth";
    /// Shadow-map texture produced by a shadow pass.
    pub const SHADOW_MAP: &str = "shadow_map";
    /// Light-space view-projection matrix published alongside the shadow map.
    pub const LIGHT_VIEW_PROJECTION: &str = "light_vp";
}

/// Name of a pass output (and of the inputs that consume it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(Cow<'static, str>);

impl ContextKey {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ContextKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for ContextKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value flowing between passes or into a shader uniform.
///
/// The same representation serves both the frame context (pass outputs:
/// texture handles, matrices, scalars) and resolved surface uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Texture(TextureHandle),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

impl From<TextureHandle> for UniformValue {
    fn from(v: TextureHandle) -> Self {
        Self::Texture(v)
    }
}

/// Ephemeral mapping from output key to the resource produced this frame.
///
/// Exclusively owned by the scheduler for the duration of one frame; no
/// cross-frame carryover.
#[derive(Debug, Default)]
pub struct FrameContext {
    values: FxHashMap<ContextKey, UniformValue>,
}

impl FrameContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a pass output under its declared key.
    pub fn insert(&mut self, key: ContextKey, value: UniformValue) {
        self.values.insert(key, value);
    }

    /// Looks up a key produced earlier this frame.
    #[must_use]
    pub fn get(&self, key: &ContextKey) -> Option<UniformValue> {
        self.values.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, key: &ContextKey) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drops all values. Called at the end of every frame tick.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}
