//! Ready-made binding tables for the stock demo materials.
//!
//! These mirror the shader materials of the accompanying demos: a fresnel
//! crystal, a glass bottle with a liquid fill, a scrolling water plane and
//! a shadow-receiving terrain. They double as realistic fixtures for the
//! scheduler tests, covering every binding kind.

use glam::{Vec2, Vec3, Vec4};

use crate::graph::context::{UniformValue, keys};
use crate::graph::pass::LayerMask;
use crate::graph::target::TextureHandle;
use crate::scene::surface::{
    ClockBinding, DerivedBinding, GeometryRef, ShaderSurface, UniformBinding,
};

/// Refractive crystal with a view-dependent fresnel rim.
#[must_use]
pub fn crystal(geometry: impl Into<GeometryRef>) -> ShaderSurface {
    ShaderSurface::new("crystal", geometry)
        .bind_static("crystal_color", Vec3::new(0.2, 0.0, 0.5))
        .bind_static("fresnel_color", Vec3::new(0.9, 0.4, 0.8))
        .bind_static("fresnel_intensity", 0.7)
        .bind_static("fresnel_power", 0.8)
        .bind("view_dir", UniformBinding::Derived(DerivedBinding::ViewDirection))
}

/// Tinted glass shell of the potion bottle. Alpha of the colors is used.
#[must_use]
pub fn glass(geometry: impl Into<GeometryRef>) -> ShaderSurface {
    ShaderSurface::new("glass", geometry)
        .bind_static("tint_color", Vec4::new(0.0, 0.8, 0.0, 0.1))
        .bind_static("rim_color", Vec4::new(0.0, 1.0, 0.0, 0.6))
        .bind_static("rim_width", 1.0)
        .bind_static("rim_smoothness", 1.0)
        .bind("view_dir", UniformBinding::Derived(DerivedBinding::ViewDirection))
}

/// Liquid fill inside the bottle. `height_bounds` are the world-space
/// min/max Y of the fill mesh's bounding box.
#[must_use]
pub fn liquid(geometry: impl Into<GeometryRef>, height_bounds: Vec2) -> ShaderSurface {
    ShaderSurface::new("liquid", geometry)
        .bind_static("fill_amount", 0.0)
        .bind_static("liquid_color_gradient_1", Vec3::new(0.02, 0.2, 0.03))
        .bind_static("liquid_color_gradient_2", Vec3::new(0.1, 0.2, 0.05))
        .bind_static("liquid_top_color", Vec3::new(0.1, 0.4, 0.1))
        .bind_static("fresnel_color", Vec3::new(0.0, 0.08, 0.01))
        .bind_static("fresnel_intensity", 1.0)
        .bind_static("fresnel_power", 0.3)
        .bind_static("edge_width", 0.01)
        .bind_static("edge_color", Vec3::ONE)
        .bind_static("height_bounds", height_bounds)
        .bind_static("object_position", Vec3::ZERO)
        .bind("view_dir", UniformBinding::Derived(DerivedBinding::ViewDirection))
}

/// Stylized scrolling water. Reads the depth pre-pass output for shoreline
/// blending; on the very first resolution before a depth texture exists it
/// falls back to the zero-filled texture.
#[must_use]
pub fn water(geometry: impl Into<GeometryRef>) -> ShaderSurface {
    ShaderSurface::new("water", geometry)
        .bind_static("shallow_color", Vec3::new(0.2, 0.7, 0.75))
        .bind_static("deep_color", Vec3::new(0.05, 0.25, 0.4))
        .bind_static("wave_speed", 0.4)
        .bind_static("wave_height", 0.15)
        .bind("time", UniformBinding::Clock(ClockBinding::Elapsed))
        .bind("view_dir", UniformBinding::Derived(DerivedBinding::ViewDirection))
        .bind_context("depth_texture", keys::DEPTH, TextureHandle::ZERO)
}

/// Shadow-receiving terrain. Consumes the shadow pass outputs.
#[must_use]
pub fn terrain(geometry: impl Into<GeometryRef>) -> ShaderSurface {
    ShaderSurface::new("terrain", geometry)
        .with_layers(LayerMask::MAIN | LayerMask::SHADOW_CASTERS | LayerMask::DEPTH_PREPASS)
        .bind_static("grass_color", Vec3::new(0.25, 0.5, 0.2))
        .bind_static("rock_color", Vec3::new(0.45, 0.4, 0.35))
        .bind_static("shadow_bias", 0.005)
        .bind_context("shadow_map", keys::SHADOW_MAP, TextureHandle::ZERO)
        .bind_context("light_vp", keys::LIGHT_VIEW_PROJECTION, glam::Mat4::IDENTITY)
}
